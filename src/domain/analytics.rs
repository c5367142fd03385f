//! Summary figures and cross-bank statistics over normalized series.

use crate::domain::series::AugmentedSeries;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub symbol: String,
    pub as_of: NaiveDate,
    pub last_close: f64,
    /// `None` when the previous close was zero.
    pub day_change: Option<f64>,
    pub day_change_pct: Option<f64>,
    pub period_high: f64,
    pub period_low: f64,
    pub avg_volume: f64,
    pub ma20: f64,
    pub ma50: f64,
}

impl SeriesSummary {
    pub fn compute(series: &AugmentedSeries) -> Option<Self> {
        let last = series.last()?;
        let rows = series.rows();

        let period_high = rows
            .iter()
            .map(|r| r.bar.high)
            .fold(f64::NEG_INFINITY, f64::max);
        let period_low = rows.iter().map(|r| r.bar.low).fold(f64::INFINITY, f64::min);
        let avg_volume = rows.iter().map(|r| r.bar.volume as f64).sum::<f64>() / rows.len() as f64;

        // pct_change = (c - p) / p  =>  c - p = c * pct / (1 + pct)
        let day_change = last.pct_change.map(|pct| last.bar.close * pct / (1.0 + pct));

        Some(Self {
            symbol: series.symbol().to_string(),
            as_of: last.bar.date,
            last_close: last.bar.close,
            day_change,
            day_change_pct: last.pct_change.map(|pct| pct * 100.0),
            period_high,
            period_low,
            avg_volume,
            ma20: last.ma20,
            ma50: last.ma50,
        })
    }

    /// Short MA above long MA.
    pub fn is_uptrend(&self) -> bool {
        self.ma20 > self.ma50
    }
}

#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    /// `values[i][j]`; NaN where fewer than two common dates exist or a
    /// series has zero variance over them.
    pub values: Vec<Vec<f64>>,
}

/// Pearson correlation of daily percent changes, pairwise over the dates each
/// pair has in common. Rows without a percent change are skipped.
pub fn correlation_matrix(series: &[(&str, &AugmentedSeries)]) -> CorrelationMatrix {
    let returns: Vec<HashMap<NaiveDate, f64>> = series
        .iter()
        .map(|(_, s)| {
            s.rows()
                .iter()
                .filter_map(|r| r.pct_change.map(|pct| (r.bar.date, pct)))
                .collect()
        })
        .collect();

    let n = series.len();
    let mut values = vec![vec![f64::NAN; n]; n];

    for i in 0..n {
        for j in i..n {
            let common: BTreeSet<&NaiveDate> = returns[i]
                .keys()
                .filter(|d| returns[j].contains_key(*d))
                .collect();
            let xs: Vec<f64> = common.iter().map(|d| returns[i][*d]).collect();
            let ys: Vec<f64> = common.iter().map(|d| returns[j][*d]).collect();
            let r = pearson(&xs, &ys);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        labels: series.iter().map(|(label, _)| label.to_string()).collect(),
        values,
    }
}

fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len();
    if n < 2 || n != ys.len() {
        return f64::NAN;
    }
    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}
