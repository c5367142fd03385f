//! Local file CSV source.
//!
//! Resolves a location against a base directory by its final path segment,
//! so a configured URL such as `https://host/preds/HDFCBANK.csv` maps to
//! `{base}/HDFCBANK.csv`.

use crate::domain::error::FetchError;
use crate::domain::raw_table::TextEncoding;
use crate::ports::csv_source_port::CsvSourcePort;
use std::fs;
use std::path::PathBuf;

pub struct LocalCsvSource {
    base_path: PathBuf,
}

impl LocalCsvSource {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn resolve(&self, location: &str) -> PathBuf {
        let file = location.rsplit('/').next().unwrap_or(location);
        self.base_path.join(file)
    }
}

impl CsvSourcePort for LocalCsvSource {
    fn fetch_text(&self, location: &str, encoding: TextEncoding) -> Result<String, FetchError> {
        let path = self.resolve(location);
        let bytes = fs::read(&path)
            .map_err(|e| FetchError::unavailable(path.display().to_string(), e))?;
        encoding.decode(&path.display().to_string(), &bytes)
    }
}
