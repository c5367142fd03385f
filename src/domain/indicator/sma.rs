//! Simple Moving Average over closing prices.
//!
//! SMA(n)[i] = sum(C[i-n+1..=i]) / n
//! Warmup: first (n-1) bars are invalid. Each value depends only on bars <= i.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_sma(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let mut values = Vec::with_capacity(bars.len());

    for i in 0..bars.len() {
        let valid = period > 0 && i + 1 >= period;

        let value = if valid {
            let window = &bars[i + 1 - period..=i];
            window.iter().map(|b| b.close).sum::<f64>() / period as f64
        } else {
            0.0
        };

        values.push(IndicatorPoint {
            valid: valid && value.is_finite(),
            value,
        });
    }

    IndicatorSeries { values }
}
