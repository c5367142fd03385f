//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    /// An adapter with no keys; every lookup falls back to its default.
    pub fn empty() -> Self {
        Self { config: Ini::new() }
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[sources]
composition_url = https://host/data/weights.csv
period = 2y

[index]
symbol = ^NSEBANK
name = Nifty Bank
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("sources", "composition_url"),
            Some("https://host/data/weights.csv".to_string())
        );
        assert_eq!(
            adapter.get_string("index", "name"),
            Some("Nifty Bank".to_string())
        );
    }

    #[test]
    fn value_keeps_embedded_equals() {
        let adapter = FileConfigAdapter::from_string(
            "[banks]\nentries = HDFC Bank=HDFCBANK.NS, Axis Bank=AXISBANK.NS\n",
        )
        .unwrap();
        assert_eq!(
            adapter.get_string("banks", "entries"),
            Some("HDFC Bank=HDFCBANK.NS, Axis Bank=AXISBANK.NS".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[sources]\nperiod = 5y\n").unwrap();
        assert_eq!(adapter.get_string("sources", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_value() {
        let adapter = FileConfigAdapter::from_string("[sources]\ntimeout_secs = 15\n").unwrap();
        assert_eq!(adapter.get_int("sources", "timeout_secs", 0), 15);
    }

    #[test]
    fn get_int_returns_default_for_missing() {
        let adapter = FileConfigAdapter::from_string("[sources]\n").unwrap();
        assert_eq!(adapter.get_int("sources", "missing", 42), 42);
    }

    #[test]
    fn get_int_returns_default_for_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[sources]\ntimeout_secs = abc\n").unwrap();
        assert_eq!(adapter.get_int("sources", "timeout_secs", 42), 42);
    }

    #[test]
    fn get_bool_values() {
        let adapter =
            FileConfigAdapter::from_string("[cache]\na = true\nb = no\nc = 1\nd = maybe\n")
                .unwrap();
        assert!(adapter.get_bool("cache", "a", false));
        assert!(!adapter.get_bool("cache", "b", true));
        assert!(adapter.get_bool("cache", "c", false));
        assert!(adapter.get_bool("cache", "d", true));
        assert!(!adapter.get_bool("cache", "missing", false));
    }

    #[test]
    fn empty_adapter_has_no_keys() {
        let adapter = FileConfigAdapter::empty();
        assert_eq!(adapter.get_string("sources", "period"), None);
        assert_eq!(adapter.get_int("sources", "timeout_secs", 7), 7);
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[sources]\nperiod = 1y\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_string("sources", "period"), Some("1y".to_string()));
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/bankdash.ini");
        assert!(result.is_err());
    }
}
