//! Yahoo Finance market data adapter.
//!
//! Fetches daily OHLCV bars from Yahoo's v8 chart API using the `range`
//! parameter for the lookback window. One request per call, no retries.
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes; a change surfaces as a `Decode` error.

use crate::domain::dashboard_config::LookbackPeriod;
use crate::domain::error::FetchError;
use crate::domain::ohlcv::{sort_and_dedup, OhlcvBar};
use crate::ports::market_data_port::MarketDataPort;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const CHART_BASE_URL: &str = "https://query2.finance.yahoo.com/v8/finance/chart/";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<i64>>,
}

pub struct YahooAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooAdapter {
    /// `timeout` of `None` keeps the client default.
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        Self::with_base_url(CHART_BASE_URL, timeout)
    }

    pub fn with_base_url(base_url: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::blocking::Client::builder().user_agent(USER_AGENT);
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::unavailable("yahoo_finance", e))?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    fn chart_url(&self, symbol: &str, period: LookbackPeriod) -> String {
        format!(
            "{}{}?range={}&interval=1d",
            self.base_url,
            symbol.replace('^', "%5E"),
            period
        )
    }
}

/// Turn a chart API response into bars. Days with no close are skipped.
fn parse_response(symbol: &str, resp: ChartResponse) -> Result<Vec<OhlcvBar>, FetchError> {
    let result = resp.chart.result.ok_or_else(|| match resp.chart.error {
        Some(err) if err.code == "Not Found" => {
            FetchError::unavailable(symbol, format!("symbol not found: {}", err.description))
        }
        Some(err) => FetchError::decode(symbol, format!("{}: {}", err.code, err.description)),
        None => FetchError::decode(symbol, "empty result with no error"),
    })?;

    let data = result
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::decode(symbol, "result array is empty"))?;

    let Some(timestamps) = data.timestamp else {
        return Ok(Vec::new());
    };

    let quote = data
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::decode(symbol, "no quote data"))?;

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let date = chrono::DateTime::from_timestamp(ts, 0)
            .map(|dt| dt.naive_utc().date())
            .ok_or_else(|| FetchError::decode(symbol, format!("invalid timestamp: {ts}")))?;

        let Some(close) = quote.close.get(i).copied().flatten() else {
            continue;
        };

        bars.push(OhlcvBar {
            symbol: symbol.to_string(),
            date,
            open: quote.open.get(i).copied().flatten().unwrap_or(close),
            high: quote.high.get(i).copied().flatten().unwrap_or(close),
            low: quote.low.get(i).copied().flatten().unwrap_or(close),
            close,
            volume: quote.volume.get(i).copied().flatten().unwrap_or(0),
        });
    }

    Ok(sort_and_dedup(bars))
}

impl MarketDataPort for YahooAdapter {
    fn fetch_bars(
        &self,
        symbol: &str,
        period: LookbackPeriod,
    ) -> Result<Vec<OhlcvBar>, FetchError> {
        let url = self.chart_url(symbol, period);
        debug!(%url, "GET chart");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| FetchError::unavailable(symbol, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::unavailable(symbol, format!("HTTP {status}")));
        }

        let chart: ChartResponse = resp
            .json()
            .map_err(|e| FetchError::decode(symbol, format!("failed to parse response: {e}")))?;

        parse_response(symbol, chart)
    }
}
