#![allow(dead_code)]

use bankdash::domain::dashboard_config::LookbackPeriod;
use bankdash::domain::error::FetchError;
pub use bankdash::domain::ohlcv::OhlcvBar;
use bankdash::domain::raw_table::TextEncoding;
use bankdash::ports::csv_source_port::CsvSourcePort;
use bankdash::ports::market_data_port::MarketDataPort;
use chrono::NaiveDate;
use std::cell::Cell;
use std::collections::HashMap;

pub struct MockMarketData {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
    pub calls: Cell<usize>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            calls: Cell::new(0),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl MarketDataPort for MockMarketData {
    fn fetch_bars(
        &self,
        symbol: &str,
        _period: LookbackPeriod,
    ) -> Result<Vec<OhlcvBar>, FetchError> {
        self.calls.set(self.calls.get() + 1);
        if let Some(reason) = self.errors.get(symbol) {
            return Err(FetchError::unavailable(symbol, reason));
        }
        Ok(self.data.get(symbol).cloned().unwrap_or_default())
    }
}

/// Serves CSV bodies keyed by the last path segment of the location.
pub struct MockCsvSource {
    pub files: HashMap<String, Vec<u8>>,
}

impl MockCsvSource {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
        }
    }

    pub fn with_file(mut self, name: &str, body: &[u8]) -> Self {
        self.files.insert(name.to_string(), body.to_vec());
        self
    }
}

impl CsvSourcePort for MockCsvSource {
    fn fetch_text(&self, location: &str, encoding: TextEncoding) -> Result<String, FetchError> {
        let name = location.rsplit('/').next().unwrap_or(location);
        match self.files.get(name) {
            Some(bytes) => encoding.decode(location, bytes),
            None => Err(FetchError::unavailable(location, "HTTP 404 Not Found")),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bar(symbol: &str, date: NaiveDate, close: f64) -> OhlcvBar {
    OhlcvBar {
        symbol: symbol.to_string(),
        date,
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
        volume: 1000,
    }
}

/// `count` daily bars with closes rising by one from `start_price`.
pub fn generate_bars(
    symbol: &str,
    start_date: &str,
    count: usize,
    start_price: f64,
) -> Vec<OhlcvBar> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    (0..count)
        .map(|i| make_bar(symbol, start + chrono::Duration::days(i as i64), start_price + i as f64))
        .collect()
}

/// Bars built from an explicit close sequence.
pub fn bars_from_closes(symbol: &str, closes: &[f64]) -> Vec<OhlcvBar> {
    let start = date(2023, 1, 2);
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| make_bar(symbol, start + chrono::Duration::days(i as i64), c))
        .collect()
}
