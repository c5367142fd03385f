//! Domain error types.

/// Errors raised at the ingestion boundary (market data, CSV sources).
///
/// None of these propagate past the ingestion layer: [`crate::domain::ingest`]
/// turns each one into an unavailable panel carrying the message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("source unavailable: {source_name}: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    #[error("decode error in {source_name}: {reason}")]
    Decode { source_name: String, reason: String },

    #[error("missing columns in {table}: {}", missing.join(", "))]
    SchemaMismatch { table: String, missing: Vec<String> },
}

impl FetchError {
    pub fn unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        FetchError::SourceUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn decode(source_name: impl Into<String>, reason: impl ToString) -> Self {
        FetchError::Decode {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

/// Top-level error type for bankdash.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown bank: {0}")]
    UnknownBank(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&DashboardError> for std::process::ExitCode {
    fn from(err: &DashboardError) -> Self {
        let code: u8 = match err {
            DashboardError::Io(_) => 1,
            DashboardError::ConfigParse { .. }
            | DashboardError::ConfigMissing { .. }
            | DashboardError::ConfigInvalid { .. } => 2,
            DashboardError::UnknownBank(_) => 3,
            DashboardError::Fetch(_) => 4,
        };
        std::process::ExitCode::from(code)
    }
}
