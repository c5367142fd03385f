//! Augmented price series: bars plus MA20, MA50 and daily percent change.
//!
//! An [`AugmentedSeries`] can only be built by [`normalize`] from raw bars, so
//! an already-normalized series can never be fed back through the normalizer.

use crate::domain::indicator::pct_change::calculate_pct_change;
use crate::domain::indicator::sma::calculate_sma;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;
use std::collections::HashMap;

pub const SHORT_WINDOW: usize = 20;
pub const LONG_WINDOW: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedBar {
    pub bar: OhlcvBar,
    pub ma20: f64,
    pub ma50: f64,
    /// `None` where the previous close is zero.
    pub pct_change: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct AugmentedSeries {
    symbol: String,
    rows: Vec<AugmentedBar>,
    date_index: HashMap<NaiveDate, usize>,
}

impl AugmentedSeries {
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn rows(&self) -> &[AugmentedBar] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first(&self) -> Option<&AugmentedBar> {
        self.rows.first()
    }

    pub fn last(&self) -> Option<&AugmentedBar> {
        self.rows.last()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&AugmentedBar> {
        self.date_index.get(&date).map(|&i| &self.rows[i])
    }

    /// The trailing `n` rows (fewer if the series is shorter).
    pub fn tail(&self, n: usize) -> &[AugmentedBar] {
        &self.rows[self.rows.len().saturating_sub(n)..]
    }
}

/// Compute MA20, MA50 and percent change over `bars` (ascending by date) and
/// drop the leading rows until all three are defined.
///
/// Only the warm-up prefix is trimmed: with N clean bars the result has
/// N - 49 rows, or none when N < 50. Later rows are always kept; a zero
/// previous close leaves that row's `pct_change` as `None`.
pub fn normalize(symbol: &str, bars: &[OhlcvBar]) -> AugmentedSeries {
    let ma20 = calculate_sma(bars, SHORT_WINDOW);
    let ma50 = calculate_sma(bars, LONG_WINDOW);
    let pct = calculate_pct_change(bars);

    let defined = |i: usize| {
        ma20.get(i).is_some() && ma50.get(i).is_some() && pct.get(i).is_some()
    };
    let Some(start) = (LONG_WINDOW - 1..bars.len()).find(|&i| defined(i)) else {
        return AugmentedSeries::empty(symbol);
    };

    let rows: Vec<AugmentedBar> = bars[start..]
        .iter()
        .enumerate()
        .map(|(k, bar)| {
            let i = start + k;
            AugmentedBar {
                bar: bar.clone(),
                ma20: ma20.values[i].value,
                ma50: ma50.values[i].value,
                pct_change: pct.get(i),
            }
        })
        .collect();

    let date_index = rows
        .iter()
        .enumerate()
        .map(|(i, row)| (row.bar.date, i))
        .collect();

    AugmentedSeries {
        symbol: symbol.to_string(),
        rows,
        date_index,
    }
}
