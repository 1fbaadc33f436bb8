use kurbo::{Point, Rect};

use crate::foundation::error::{CagrError, CagrResult};

/// Closed data interval on one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    /// Bounds of the finite values; `None` when there are none.
    pub fn of_finite(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut out: Option<Self> = None;
        for v in values.into_iter().filter(|v| v.is_finite()) {
            out = Some(match out {
                None => Self { min: v, max: v },
                Some(e) => Self {
                    min: e.min.min(v),
                    max: e.max.max(v),
                },
            });
        }
        out
    }

    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Grow by `frac` of the span on both sides. A zero-width extent is widened around its
    /// value so it still maps to a non-degenerate range.
    pub fn padded(self, frac: f64) -> Self {
        let span = self.span();
        if span == 0.0 {
            let half = if self.min == 0.0 {
                1.0
            } else {
                self.min.abs() * 0.05
            };
            return Self {
                min: self.min - half,
                max: self.max + half,
            };
        }
        Self {
            min: self.min - span * frac,
            max: self.max + span * frac,
        }
    }
}

/// A 1, 2 or 5 times power-of-ten step giving roughly `target` intervals across `span`.
pub fn nice_step(span: f64, target: usize) -> f64 {
    if !span.is_finite() || span <= 0.0 {
        return 1.0;
    }
    let raw = span / target.max(1) as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let nice = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * mag
}

/// Multiples of `step` inside `extent`.
pub fn ticks(extent: Extent, step: f64) -> Vec<f64> {
    if step <= 0.0 || !step.is_finite() {
        return Vec::new();
    }
    let first = (extent.min / step).ceil() as i64;
    let last = (extent.max / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

/// Tick label with just enough decimals for `step`.
pub fn format_tick(v: f64, step: f64) -> String {
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    // avoid "-0"
    let v = if v.abs() < step * 1e-9 { 0.0 } else { v };
    format!("{v:.decimals$}")
}

/// Maps data coordinates into a pixel rectangle, y growing downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotFrame {
    pub area: Rect,
    pub x: Extent,
    pub y: Extent,
}

impl PlotFrame {
    pub fn new(area: Rect, x: Extent, y: Extent) -> CagrResult<Self> {
        if area.width() <= 0.0 || area.height() <= 0.0 {
            return Err(CagrError::render("plot area must have positive size"));
        }
        if x.span() <= 0.0 || y.span() <= 0.0 {
            return Err(CagrError::render("plot extents must have positive span"));
        }
        Ok(Self { area, x, y })
    }

    pub fn map_x(&self, x: f64) -> f64 {
        self.area.x0 + (x - self.x.min) / self.x.span() * self.area.width()
    }

    pub fn map_y(&self, y: f64) -> f64 {
        self.area.y1 - (y - self.y.min) / self.y.span() * self.area.height()
    }

    pub fn to_point(&self, x: f64, y: f64) -> Point {
        Point::new(self.map_x(x), self.map_y(y))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/scale.rs"]
mod tests;
