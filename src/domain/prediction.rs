//! Predicted-price tables, one per bank.
//!
//! Source files carry `Date` (DD-MM-YYYY), `Open`, `Predicted_Open` and, in
//! some revisions, `%_error`. Headers are trimmed and renamed to the canonical
//! names below before rows are read.

use crate::domain::error::FetchError;
use crate::domain::raw_table::RawTable;
use chrono::NaiveDate;
use std::collections::HashMap;

pub const DATE: &str = "Date";
pub const ACTUAL_PRICE: &str = "Actual Price";
pub const PREDICTED_PRICE: &str = "Predicted Price";
pub const PERCENT_ERROR: &str = "% Error";

pub const HEADER_RENAMES: [(&str, &str); 3] = [
    ("Open", ACTUAL_PRICE),
    ("Predicted_Open", PREDICTED_PRICE),
    ("%_error", PERCENT_ERROR),
];

const DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRow {
    /// `None` when the source date did not parse.
    pub date: Option<NaiveDate>,
    pub actual_price: Option<f64>,
    pub predicted_price: Option<f64>,
    pub percent_error: Option<f64>,
}

impl PredictionRow {
    /// The supplied `% Error`, or |predicted - actual| / actual * 100.
    pub fn error_pct(&self) -> Option<f64> {
        if self.percent_error.is_some() {
            return self.percent_error;
        }
        let actual = self.actual_price?;
        let predicted = self.predicted_price?;
        if actual == 0.0 {
            return None;
        }
        Some((predicted - actual).abs() / actual * 100.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PredictionTable {
    pub source: String,
    pub columns: Vec<String>,
    pub rows: Vec<PredictionRow>,
    date_index: HashMap<NaiveDate, usize>,
}

impl PredictionTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Row for `date`; the last row wins when a date repeats.
    pub fn get(&self, date: NaiveDate) -> Option<&PredictionRow> {
        self.date_index.get(&date).map(|&i| &self.rows[i])
    }

    /// Check that every column a chart needs is present.
    pub fn require_columns(&self, required: &[&str]) -> Result<(), FetchError> {
        let missing: Vec<String> = required
            .iter()
            .filter(|c| !self.has_column(c))
            .map(|c| c.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FetchError::SchemaMismatch {
                table: self.source.clone(),
                missing,
            })
        }
    }

    /// Mean of per-row percent errors over rows where one is available.
    pub fn mean_abs_error_pct(&self) -> Option<f64> {
        let errors: Vec<f64> = self
            .rows
            .iter()
            .filter_map(PredictionRow::error_pct)
            .map(f64::abs)
            .collect();
        if errors.is_empty() {
            None
        } else {
            Some(errors.iter().sum::<f64>() / errors.len() as f64)
        }
    }
}

/// Apply the canonical schema to a raw predictions table.
///
/// Only a missing `Date` column is an error; price columns are optional here
/// and checked by the consumer via [`PredictionTable::require_columns`].
pub fn from_raw(source: &str, mut raw: RawTable) -> Result<PredictionTable, FetchError> {
    canonicalize_headers(&mut raw);

    let date_col = raw
        .column_index(DATE)
        .ok_or_else(|| FetchError::SchemaMismatch {
            table: source.to_string(),
            missing: vec![DATE.to_string()],
        })?;
    let actual_col = raw.column_index(ACTUAL_PRICE);
    let predicted_col = raw.column_index(PREDICTED_PRICE);
    let error_col = raw.column_index(PERCENT_ERROR);

    let mut rows = Vec::with_capacity(raw.rows.len());
    let mut date_index = HashMap::new();

    for i in 0..raw.rows.len() {
        let number = |col: Option<usize>| col.and_then(|c| raw.cell(i, c)).and_then(parse_number);
        let row = PredictionRow {
            date: raw.cell(i, date_col).and_then(parse_day_first),
            actual_price: number(actual_col),
            predicted_price: number(predicted_col),
            percent_error: number(error_col),
        };
        if let Some(date) = row.date {
            date_index.insert(date, rows.len());
        }
        rows.push(row);
    }

    Ok(PredictionTable {
        source: source.to_string(),
        columns: raw.headers,
        rows,
        date_index,
    })
}

pub fn canonicalize_headers(raw: &mut RawTable) {
    raw.trim_headers();
    raw.rename_headers(&HEADER_RENAMES);
}

/// Parse `DD-MM-YYYY`; anything else is `None`.
pub fn parse_day_first(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}
