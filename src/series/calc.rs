use crate::foundation::{
    core::GrowthParams,
    error::{CagrError, CagrResult},
};

/// Value and CAGR series for one parameter set, indexed by year `1..=years`.
///
/// Value series are `f32`; CAGR series are `f64`. All five vectors have the same length.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GrowthSeries {
    /// CAGR base the series were computed against.
    pub beginning_value: f64,
    /// Year index, `1..=years`.
    pub years: Vec<u32>,
    /// Base linear series, `beginning_value + annual_growth * year`.
    pub without_interest: Vec<f32>,
    /// Base series with each year's interest carried into all later years.
    pub with_interest: Vec<f32>,
    /// CAGR of [`GrowthSeries::without_interest`].
    pub without_interest_cagr: Vec<f64>,
    /// CAGR of [`GrowthSeries::with_interest`].
    pub with_interest_cagr: Vec<f64>,
}

/// One year of a [`GrowthSeries`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YearRow {
    /// 1-based year.
    pub year: u32,
    /// Value without interest.
    pub without_interest: f32,
    /// Value with interest.
    pub with_interest: f32,
    /// CAGR without interest.
    pub without_interest_cagr: f64,
    /// CAGR with interest.
    pub with_interest_cagr: f64,
}

impl GrowthSeries {
    /// Number of years covered.
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Always false for a series produced by [`compute`].
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Fail with [`CagrError::InvalidInput`] unless every vector matches `years` in length.
    pub fn validate(&self) -> CagrResult<()> {
        let n = self.years.len();
        for (name, len) in [
            ("without_interest", self.without_interest.len()),
            ("with_interest", self.with_interest.len()),
            ("without_interest_cagr", self.without_interest_cagr.len()),
            ("with_interest_cagr", self.with_interest_cagr.len()),
        ] {
            if len != n {
                return Err(CagrError::invalid_input(format!(
                    "{name} has {len} entries, expected {n}"
                )));
            }
        }
        Ok(())
    }

    /// Iterate the series year by year, stopping at the shortest vector.
    pub fn rows(&self) -> impl Iterator<Item = YearRow> + '_ {
        self.years
            .iter()
            .zip(&self.without_interest)
            .zip(&self.with_interest)
            .zip(&self.without_interest_cagr)
            .zip(&self.with_interest_cagr)
            .map(|((((&year, &wo), &w), &wo_c), &w_c)| YearRow {
                year,
                without_interest: wo,
                with_interest: w,
                without_interest_cagr: wo_c,
                with_interest_cagr: w_c,
            })
    }
}

impl GrowthParams {
    /// Shorthand for [`compute`] over these parameters.
    pub fn compute(&self) -> CagrResult<GrowthSeries> {
        compute(
            self.beginning_value,
            self.annual_growth,
            self.years,
            self.interest_rate,
        )
    }
}

/// Compute the with/without-interest value series and their CAGR curves.
///
/// Fails with [`CagrError::InvalidInput`] when `years == 0`, when `beginning_value` is zero,
/// or when any real-valued input is non-finite. Values whose ratio to `beginning_value` goes
/// negative yield `NaN` CAGR entries rather than an error.
///
/// The interest pass is quadratic in `years`. A non-zero `beginning_value` too small for
/// `f32` narrows to zero in the CAGR ratio and yields infinite CAGR entries.
#[tracing::instrument(level = "debug")]
pub fn compute(
    beginning_value: f64,
    annual_growth: f64,
    years: u32,
    interest_rate: f64,
) -> CagrResult<GrowthSeries> {
    GrowthParams::new(beginning_value, annual_growth, years, interest_rate).validate()?;

    let year_idx = year_indices(years);
    let without_interest = linear_series(beginning_value, annual_growth, &year_idx);

    let mut with_interest = without_interest.clone();
    apply_forward_interest(&mut with_interest, interest_rate as f32);

    let without_interest_cagr = cagr_series(&without_interest, beginning_value, &year_idx)?;
    let with_interest_cagr = cagr_series(&with_interest, beginning_value, &year_idx)?;

    tracing::debug!(
        final_without = without_interest.last().copied(),
        final_with = with_interest.last().copied(),
        "computed growth series"
    );

    Ok(GrowthSeries {
        beginning_value,
        years: year_idx,
        without_interest,
        with_interest,
        without_interest_cagr,
        with_interest_cagr,
    })
}

/// `[1, 2, ..., years]`.
pub fn year_indices(years: u32) -> Vec<u32> {
    (1..=years).collect()
}

/// `beginning_value + annual_growth * year` per year, evaluated in `f64` and stored as `f32`.
pub fn linear_series(beginning_value: f64, annual_growth: f64, years: &[u32]) -> Vec<f32> {
    years
        .iter()
        .map(|&y| (beginning_value + annual_growth * f64::from(y)) as f32)
        .collect()
}

/// Carry each year's interest into every later year, in place.
///
/// Walks left to right; position `y` is read after all earlier carries have landed on it,
/// and `values[y] * rate` is added flat to `values[y + 1..]`. The last year earns nothing.
pub fn apply_forward_interest(values: &mut [f32], rate: f32) {
    let n = values.len();
    for y in 0..n.saturating_sub(1) {
        let carry = values[y] * rate;
        for v in &mut values[y + 1..] {
            *v += carry;
        }
    }
}

/// `(values[i] / beginning_value) ^ (1 / years[i]) - 1` per element.
///
/// The ratio is taken at value precision (`f32`), the root in `f64`. A negative ratio under
/// a fractional root produces `NaN`.
pub fn cagr_series(values: &[f32], beginning_value: f64, years: &[u32]) -> CagrResult<Vec<f64>> {
    if values.len() != years.len() {
        return Err(CagrError::invalid_input(format!(
            "series length {} does not match year count {}",
            values.len(),
            years.len()
        )));
    }
    if beginning_value == 0.0 {
        return Err(CagrError::invalid_input("beginning_value must be non-zero"));
    }
    if years.contains(&0) {
        return Err(CagrError::invalid_input("year indices must start at 1"));
    }

    let base = beginning_value as f32;
    Ok(values
        .iter()
        .zip(years)
        .map(|(&v, &y)| f64::from(v / base).powf(1.0 / f64::from(y)) - 1.0)
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/series/calc.rs"]
mod tests;
