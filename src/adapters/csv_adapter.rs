//! CSV file market data adapter for offline use.
//!
//! Reads `{base_path}/{SYMBOL}.csv` with columns
//! `date,open,high,low,close,volume` (ISO dates), trimmed to the lookback
//! window counted back from the latest bar in the file.

use crate::domain::dashboard_config::LookbackPeriod;
use crate::domain::error::FetchError;
use crate::domain::ohlcv::{sort_and_dedup, OhlcvBar};
use crate::ports::market_data_port::MarketDataPort;
use chrono::{Datelike, NaiveDate};
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

fn field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    idx: usize,
    name: &str,
    source: &str,
) -> Result<T, FetchError>
where
    T::Err: std::fmt::Display,
{
    record
        .get(idx)
        .ok_or_else(|| FetchError::decode(source, format!("missing {name} column")))?
        .trim()
        .parse()
        .map_err(|e| FetchError::decode(source, format!("invalid {name} value: {e}")))
}

fn within_period(date: NaiveDate, latest: NaiveDate, period: LookbackPeriod) -> bool {
    match period {
        LookbackPeriod::Max => true,
        LookbackPeriod::YearToDate => date.year() == latest.year(),
        _ => match period.days() {
            Some(days) => date > latest - chrono::Duration::days(days),
            None => true,
        },
    }
}

impl MarketDataPort for CsvAdapter {
    fn fetch_bars(
        &self,
        symbol: &str,
        period: LookbackPeriod,
    ) -> Result<Vec<OhlcvBar>, FetchError> {
        let path = self.csv_path(symbol);
        let source = path.display().to_string();
        let content = fs::read_to_string(&path).map_err(|e| FetchError::unavailable(&source, e))?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| FetchError::decode(&source, e))?;

            let date_str: String = field(&record, 0, "date", &source)?;
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .map_err(|e| FetchError::decode(&source, format!("invalid date format: {e}")))?;

            bars.push(OhlcvBar {
                symbol: symbol.to_string(),
                date,
                open: field(&record, 1, "open", &source)?,
                high: field(&record, 2, "high", &source)?,
                low: field(&record, 3, "low", &source)?,
                close: field(&record, 4, "close", &source)?,
                volume: field(&record, 5, "volume", &source)?,
            });
        }

        let bars = sort_and_dedup(bars);
        let Some(latest) = bars.last().map(|b| b.date) else {
            return Ok(bars);
        };
        Ok(bars
            .into_iter()
            .filter(|b| within_period(b.date, latest, period))
            .collect())
    }
}
