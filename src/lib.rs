//! `cagr-compare` computes and charts the Compound Annual Growth Rate (CAGR) of a value that
//! grows linearly each year, with and without a forward-carried interest effect.
//!
//! # Pipeline overview
//!
//! 1. **Compute**: `GrowthParams -> GrowthSeries` (two `f32` value series, two `f64` CAGR curves)
//! 2. **Chart**: `GrowthSeries -> SVG` (value panel over CAGR panel, optional point labels)
//! 3. **Rasterize** (optional): `SVG -> RasterImage -> PNG`
//!
//! The interest model is additive: each year's value times the rate is added flat to every
//! later year, walking left to right so later years see earlier carries.
//!
//! ```
//! let s = cagr_compare::compute(20.0, 20.0, 3, 0.1)?;
//! assert_eq!(s.without_interest, vec![40.0, 60.0, 80.0]);
//! assert!((s.with_interest[2] - 90.4).abs() < 1e-4);
//! # Ok::<(), cagr_compare::CagrError>(())
//! ```
#![forbid(unsafe_code)]

mod chart;
mod foundation;
mod series;

pub use chart::annotate::{
    Annotation, Placement, annotation_indices, annotation_step, cagr_annotations, cagr_label,
    value_annotations, value_label,
};
pub use chart::raster::{
    RasterImage, ensure_parent_dir, rasterize_svg, render_png, write_png, write_svg,
};
pub use chart::scale::{Extent, PlotFrame, format_tick, nice_step, ticks};
pub use chart::svg::{ChartOpts, render_svg};
pub use foundation::core::{GrowthParams, InputBounds};
pub use foundation::error::{CagrError, CagrResult};
pub use series::calc::{
    GrowthSeries, YearRow, apply_forward_interest, cagr_series, compute, linear_series,
    year_indices,
};
