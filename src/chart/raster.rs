use std::{
    path::Path,
    sync::{Arc, OnceLock},
};

use anyhow::Context;

use crate::{
    chart::svg::{ChartOpts, render_svg},
    foundation::error::{CagrError, CagrResult},
    series::calc::GrowthSeries,
};

const MAX_DIM: u32 = 16_384;

/// Straight-alpha RGBA8 pixels, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in px.
    pub width: u32,
    /// Height in px.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub data: Vec<u8>,
}

fn system_fonts() -> Arc<usvg::fontdb::Database> {
    static FONTS: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            tracing::debug!(faces = db.len(), "loaded system fonts");
            Arc::new(db)
        })
        .clone()
}

/// Parse an SVG document and rasterize it at `scale` times its intrinsic size.
pub fn rasterize_svg(svg: &str, scale: f32) -> CagrResult<RasterImage> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(CagrError::invalid_input(format!(
            "raster scale must be finite and > 0, got {scale}"
        )));
    }

    let mut opts = usvg::Options::default();
    opts.fontdb = system_fonts();
    let tree = usvg::Tree::from_str(svg, &opts).context("parse chart svg")?;

    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;
    if width == 0 || height == 0 {
        return Err(CagrError::render("svg has an empty size"));
    }
    if width > MAX_DIM || height > MAX_DIM {
        return Err(CagrError::render(format!(
            "raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| CagrError::render("failed to allocate pixmap"))?;
    let xform = resvg::tiny_skia::Transform::from_scale(scale, scale);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    let mut data = Vec::with_capacity(pixmap.pixels().len() * 4);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    tracing::debug!(width, height, "rasterized chart");
    Ok(RasterImage {
        width,
        height,
        data,
    })
}

/// Build the chart for `series` and rasterize it.
pub fn render_png(series: &GrowthSeries, opts: &ChartOpts, scale: f32) -> CagrResult<RasterImage> {
    let svg = render_svg(series, opts)?;
    rasterize_svg(&svg, scale)
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> CagrResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

/// Save `img` as a PNG file.
pub fn write_png(path: &Path, img: &RasterImage) -> CagrResult<()> {
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &img.data,
        img.width,
        img.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Save an SVG document.
pub fn write_svg(path: &Path, svg: &str) -> CagrResult<()> {
    ensure_parent_dir(path)?;
    std::fs::write(path, svg).with_context(|| format!("write svg '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/chart/raster.rs"]
mod tests;
