//! CSV source port trait.

use crate::domain::error::FetchError;
use crate::domain::raw_table::TextEncoding;

pub trait CsvSourcePort {
    /// Retrieve the resource at `location` and decode it as `encoding`.
    ///
    /// `SourceUnavailable` when the bytes cannot be retrieved, `Decode` when
    /// they are not valid under `encoding`.
    fn fetch_text(&self, location: &str, encoding: TextEncoding) -> Result<String, FetchError>;
}
