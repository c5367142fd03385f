//! HTTP CSV source: GET a CSV file and decode it.

use crate::domain::error::FetchError;
use crate::domain::raw_table::TextEncoding;
use crate::ports::csv_source_port::CsvSourcePort;
use std::time::Duration;
use tracing::debug;

pub struct HttpCsvAdapter {
    client: reqwest::blocking::Client,
}

impl HttpCsvAdapter {
    /// `timeout` of `None` keeps the client default.
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::unavailable("http client", e))?;
        Ok(Self { client })
    }
}

impl CsvSourcePort for HttpCsvAdapter {
    fn fetch_text(&self, location: &str, encoding: TextEncoding) -> Result<String, FetchError> {
        debug!(url = location, ?encoding, "GET csv");

        let resp = self
            .client
            .get(location)
            .send()
            .map_err(|e| FetchError::unavailable(location, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::unavailable(location, format!("HTTP {status}")));
        }

        let bytes = resp
            .bytes()
            .map_err(|e| FetchError::unavailable(location, e))?;

        encoding.decode(location, &bytes)
    }
}
