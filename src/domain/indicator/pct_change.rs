//! Period-over-period percent change of the close.
//!
//! PCT[i] = (C[i] - C[i-1]) / C[i-1], as a fraction (0.01 = 1%).
//! Bar 0 is invalid. A zero previous close yields an invalid point.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_pct_change(bars: &[OhlcvBar]) -> IndicatorSeries {
    let mut values = Vec::with_capacity(bars.len());

    for (i, bar) in bars.iter().enumerate() {
        let value = if i > 0 {
            let prev_close = bars[i - 1].close;
            (bar.close - prev_close) / prev_close
        } else {
            f64::NAN
        };

        values.push(IndicatorPoint {
            valid: value.is_finite(),
            value: if value.is_finite() { value } else { 0.0 },
        });
    }

    IndicatorSeries { values }
}
