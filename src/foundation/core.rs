use std::ops::RangeInclusive;

use crate::foundation::error::{CagrError, CagrResult};

/// The four scalar inputs of a growth comparison.
///
/// Missing fields fall back to [`GrowthParams::default`] when deserializing, so a
/// partial JSON document is a valid parameter file.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GrowthParams {
    /// Starting value; also the CAGR base. Must be finite and non-zero.
    pub beginning_value: f64,
    /// Amount added linearly per year.
    pub annual_growth: f64,
    /// Number of years (>= 1).
    pub years: u32,
    /// Fractional per-year rate applied to each year's value and carried forward.
    pub interest_rate: f64,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            beginning_value: 20.0,
            annual_growth: 20.0,
            years: 30,
            interest_rate: 0.0,
        }
    }
}

impl GrowthParams {
    /// Bundle the four inputs.
    pub fn new(beginning_value: f64, annual_growth: f64, years: u32, interest_rate: f64) -> Self {
        Self {
            beginning_value,
            annual_growth,
            years,
            interest_rate,
        }
    }

    /// Parse a (possibly partial) JSON parameter document.
    pub fn from_json_str(s: &str) -> CagrResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse a JSON parameter document from a reader.
    pub fn from_json_reader(r: impl std::io::Read) -> CagrResult<Self> {
        Ok(serde_json::from_reader(r)?)
    }

    /// Preconditions of the calculator. Bounds are not checked here.
    pub fn validate(&self) -> CagrResult<()> {
        if self.years == 0 {
            return Err(CagrError::invalid_input("years must be >= 1"));
        }
        for (name, value) in [
            ("beginning_value", self.beginning_value),
            ("annual_growth", self.annual_growth),
            ("interest_rate", self.interest_rate),
        ] {
            if !value.is_finite() {
                return Err(CagrError::invalid_input(format!("{name} must be finite")));
            }
        }
        if self.beginning_value == 0.0 {
            return Err(CagrError::invalid_input("beginning_value must be non-zero"));
        }
        Ok(())
    }
}

/// Inclusive ranges accepted by an interactive front end.
#[derive(Clone, Debug, PartialEq)]
pub struct InputBounds {
    /// Allowed `beginning_value`.
    pub beginning_value: RangeInclusive<f64>,
    /// Allowed `annual_growth`.
    pub annual_growth: RangeInclusive<f64>,
    /// Allowed `years`.
    pub years: RangeInclusive<u32>,
    /// Allowed `interest_rate`.
    pub interest_rate: RangeInclusive<f64>,
}

impl InputBounds {
    /// Ranges of the interactive slider panel.
    pub fn interactive() -> Self {
        Self {
            beginning_value: 1.0..=100.0,
            annual_growth: 1.0..=100.0,
            years: 1..=50,
            interest_rate: 0.0..=0.2,
        }
    }

    /// Fail with [`CagrError::InvalidInput`] on the first out-of-range field.
    pub fn check(&self, params: &GrowthParams) -> CagrResult<()> {
        fn in_range(name: &str, value: f64, range: &RangeInclusive<f64>) -> CagrResult<()> {
            if range.contains(&value) {
                return Ok(());
            }
            Err(CagrError::invalid_input(format!(
                "{name} = {value} is outside [{}, {}]",
                range.start(),
                range.end()
            )))
        }

        in_range(
            "beginning_value",
            params.beginning_value,
            &self.beginning_value,
        )?;
        in_range("annual_growth", params.annual_growth, &self.annual_growth)?;
        if !self.years.contains(&params.years) {
            return Err(CagrError::invalid_input(format!(
                "years = {} is outside [{}, {}]",
                params.years,
                self.years.start(),
                self.years.end()
            )));
        }
        in_range("interest_rate", params.interest_rate, &self.interest_rate)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
