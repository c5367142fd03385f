//! Derived price columns.
//!
//! - `IndicatorPoint`: a single point in an indicator time series
//! - `IndicatorSeries`: a time series of indicator values, one point per bar

pub mod pct_change;
pub mod sma;

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorPoint {
    pub valid: bool,
    pub value: f64,
}

#[derive(Debug, Clone, Default)]
pub struct IndicatorSeries {
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Value at bar index `i`, or `None` while the indicator is warming up
    /// or where it is undefined.
    pub fn get(&self, i: usize) -> Option<f64> {
        self.values
            .get(i)
            .filter(|p| p.valid)
            .map(|p| p.value)
    }
}
