//! Sector composition: each constituent's weight in the Nifty Bank index.

use crate::domain::error::FetchError;
use crate::domain::raw_table::RawTable;
use std::collections::HashMap;

pub const COMPANY: &str = "Company";
pub const WEIGHT: &str = "Weight(%)";

/// Index weights bundled for offline use.
pub const BUILTIN_WEIGHTS_CSV: &str = "Company,Weight(%)
HDFC Bank Ltd.,27.63
ICICI Bank Ltd.,25.05
Kotak Mahindra Bank Ltd.,9.61
State Bank of India,8.43
Axis Bank Ltd.,8.11
IndusInd Bank Ltd.,4.78
Federal Bank Ltd.,3.34
Bank of Baroda,2.90
IDFC First Bank Ltd.,2.86
Punjab National Bank,2.54
Other,4.75
";

#[derive(Debug, Clone, PartialEq)]
pub struct CompositionRow {
    pub company_name: String,
    /// `None` when the raw cell is not a number; values are not range-checked.
    pub weight_percent: Option<f64>,
    pub raw_weight: String,
}

#[derive(Debug, Clone, Default)]
pub struct CompositionTable {
    pub rows: Vec<CompositionRow>,
    name_index: HashMap<String, usize>,
}

impl CompositionTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, company: &str) -> Option<&CompositionRow> {
        self.name_index.get(company).map(|&i| &self.rows[i])
    }

    /// Sum of numeric weights. Expected to be close to 100 but never checked.
    pub fn total_weight(&self) -> f64 {
        self.rows.iter().filter_map(|r| r.weight_percent).sum()
    }

    /// Rows ordered by descending weight; non-numeric weights sort last.
    pub fn sorted_by_weight(&self) -> Vec<&CompositionRow> {
        let mut rows: Vec<&CompositionRow> = self.rows.iter().collect();
        rows.sort_by(|a, b| {
            let wa = a.weight_percent.unwrap_or(f64::NEG_INFINITY);
            let wb = b.weight_percent.unwrap_or(f64::NEG_INFINITY);
            wb.total_cmp(&wa)
        });
        rows
    }
}

/// Validate the `Company` and `Weight(%)` columns and index rows by company.
/// A repeated company keeps its last row.
pub fn from_raw(source: &str, mut raw: RawTable) -> Result<CompositionTable, FetchError> {
    raw.trim_headers();

    let missing = raw.missing_columns(&[COMPANY, WEIGHT]);
    if !missing.is_empty() {
        return Err(FetchError::SchemaMismatch {
            table: source.to_string(),
            missing,
        });
    }
    // Both present after the check above.
    let company_col = raw.column_index(COMPANY).unwrap_or_default();
    let weight_col = raw.column_index(WEIGHT).unwrap_or_default();

    let mut rows: Vec<CompositionRow> = Vec::with_capacity(raw.rows.len());
    let mut name_index = HashMap::new();

    for i in 0..raw.rows.len() {
        let company_name = raw.cell(i, company_col).unwrap_or_default().trim().to_string();
        let raw_weight = raw.cell(i, weight_col).unwrap_or_default().trim().to_string();
        let row = CompositionRow {
            weight_percent: raw_weight.parse::<f64>().ok(),
            company_name,
            raw_weight,
        };

        match name_index.get(&row.company_name) {
            Some(&existing) => rows[existing] = row,
            None => {
                name_index.insert(row.company_name.clone(), rows.len());
                rows.push(row);
            }
        }
    }

    Ok(CompositionTable { rows, name_index })
}
