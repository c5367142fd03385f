//! OHLCV bar representation.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Sort ascending by date and keep the last bar for any repeated date.
pub fn sort_and_dedup(mut bars: Vec<OhlcvBar>) -> Vec<OhlcvBar> {
    bars.sort_by_key(|b| b.date);
    let mut out: Vec<OhlcvBar> = Vec::with_capacity(bars.len());
    for bar in bars {
        match out.last_mut() {
            Some(last) if last.date == bar.date => *last = bar,
            _ => out.push(bar),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> OhlcvBar {
        OhlcvBar {
            symbol: "HDFCBANK.NS".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: 100.0,
            high: 110.0,
            low: 90.0,
            close,
            volume: 50_000,
        }
    }

    #[test]
    fn sort_and_dedup_orders_by_date() {
        let bars = sort_and_dedup(vec![bar(3, 3.0), bar(1, 1.0), bar(2, 2.0)]);
        let days: Vec<_> = bars.iter().map(|b| b.close).collect();
        assert_eq!(days, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn sort_and_dedup_keeps_last_duplicate() {
        let bars = sort_and_dedup(vec![bar(1, 1.0), bar(2, 2.0), bar(2, 2.5)]);
        assert_eq!(bars.len(), 2);
        assert!((bars[1].close - 2.5).abs() < f64::EPSILON);
    }
}
