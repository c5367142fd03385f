//! Raw CSV tables as fetched from a source, before any schema is applied.

use crate::domain::error::FetchError;

/// Character encoding a CSV source is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    Utf8,
    /// ISO-8859-1: every byte maps to the code point of the same value.
    Latin1,
}

impl TextEncoding {
    pub fn decode(self, source_name: &str, bytes: &[u8]) -> Result<String, FetchError> {
        match self {
            TextEncoding::Utf8 => String::from_utf8(bytes.to_vec())
                .map(|s| s.trim_start_matches('\u{feff}').to_string())
                .map_err(|e| FetchError::decode(source_name, e)),
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Parse CSV text with a header row. Ragged rows are a decode error.
    pub fn parse(source_name: &str, text: &str) -> Result<Self, FetchError> {
        let mut rdr = csv::Reader::from_reader(text.as_bytes());

        let headers = rdr
            .headers()
            .map_err(|e| FetchError::decode(source_name, e))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| FetchError::decode(source_name, e))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { headers, rows })
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Trim surrounding whitespace from every header.
    pub fn trim_headers(&mut self) {
        for h in &mut self.headers {
            *h = h.trim().to_string();
        }
    }

    /// Rename headers found in `renames` (`(from, to)` pairs). Absent source
    /// headers are ignored, so applying the same renames twice is a no-op.
    pub fn rename_headers(&mut self, renames: &[(&str, &str)]) {
        for h in &mut self.headers {
            if let Some((_, to)) = renames.iter().find(|(from, _)| h == from) {
                *h = to.to_string();
            }
        }
    }

    /// Names from `required` that are not present, in the order given.
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|c| !self.has_column(c))
            .map(|c| c.to_string())
            .collect()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_headers_and_rows() {
        let table = RawTable::parse("t", "a,b\n1,2\n3,4\n").unwrap();
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.cell(1, 0), Some("3"));
        assert_eq!(table.cell(2, 0), None);
    }

    #[test]
    fn parse_ragged_row_is_decode_error() {
        let err = RawTable::parse("t", "a,b\n1,2,3\n").unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[test]
    fn trim_then_rename() {
        let mut table = RawTable::parse("t", " Date , Open ,Predicted_Open\n").unwrap();
        table.trim_headers();
        table.rename_headers(&[("Open", "Actual Price")]);
        assert_eq!(table.headers, vec!["Date", "Actual Price", "Predicted_Open"]);
    }

    #[test]
    fn missing_columns_in_order() {
        let table = RawTable::parse("t", "Company\nHDFC Bank Ltd.\n").unwrap();
        assert_eq!(
            table.missing_columns(&["Company", "Weight(%)", "Sector"]),
            vec!["Weight(%)", "Sector"]
        );
    }

    #[test]
    fn utf8_decode_rejects_latin1_bytes() {
        let bytes = b"Company,Weight(%)\nSoci\xe9t\xe9,1.0\n";
        let err = TextEncoding::Utf8.decode("weights.csv", bytes).unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[test]
    fn latin1_decode_maps_high_bytes() {
        let bytes = b"Soci\xe9t\xe9";
        let text = TextEncoding::Latin1.decode("weights.csv", bytes).unwrap();
        assert_eq!(text, "Société");
    }

    #[test]
    fn utf8_decode_strips_bom() {
        let text = TextEncoding::Utf8
            .decode("p.csv", b"\xef\xbb\xbfDate,Open\n")
            .unwrap();
        assert!(text.starts_with("Date"));
    }
}
