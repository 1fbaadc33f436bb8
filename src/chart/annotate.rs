use crate::series::calc::GrowthSeries;

/// Where a label sits relative to its point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Offset upward; used for the with-interest series.
    Above,
    /// Offset downward; used for the without-interest series.
    Below,
}

/// A formatted label pinned to one data point.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    /// 1-based year of the point.
    pub year: u32,
    /// Data value of the point.
    pub value: f64,
    /// Rendered text.
    pub label: String,
    /// Label offset direction.
    pub placement: Placement,
}

/// Stride between annotated points: every tenth of the span, at least 1.
pub fn annotation_step(years: usize) -> usize {
    (years / 10).max(1)
}

/// 0-based indices that receive a label.
pub fn annotation_indices(years: usize) -> impl Iterator<Item = usize> {
    (0..years).step_by(annotation_step(years))
}

/// One decimal, as shown on the value panel.
pub fn value_label(v: f32) -> String {
    format!("{v:.1}")
}

/// Four decimals, as shown on the CAGR panel.
pub fn cagr_label(c: f64) -> String {
    format!("{c:.4}")
}

/// Labels for the value panel.
pub fn value_annotations(series: &GrowthSeries) -> Vec<Annotation> {
    let mut out = Vec::new();
    for i in annotation_indices(series.len()) {
        let year = series.years[i];
        out.push(Annotation {
            year,
            value: f64::from(series.with_interest[i]),
            label: value_label(series.with_interest[i]),
            placement: Placement::Above,
        });
        out.push(Annotation {
            year,
            value: f64::from(series.without_interest[i]),
            label: value_label(series.without_interest[i]),
            placement: Placement::Below,
        });
    }
    out
}

/// Labels for the CAGR panel.
pub fn cagr_annotations(series: &GrowthSeries) -> Vec<Annotation> {
    let mut out = Vec::new();
    for i in annotation_indices(series.len()) {
        let year = series.years[i];
        out.push(Annotation {
            year,
            value: series.with_interest_cagr[i],
            label: cagr_label(series.with_interest_cagr[i]),
            placement: Placement::Above,
        });
        out.push(Annotation {
            year,
            value: series.without_interest_cagr[i],
            label: cagr_label(series.without_interest_cagr[i]),
            placement: Placement::Below,
        });
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/chart/annotate.rs"]
mod tests;
