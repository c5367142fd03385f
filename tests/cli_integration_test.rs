//! CLI integration tests for dashboard command orchestration.
//!
//! Tests cover:
//! - Config loading and validation with real INI files on disk
//! - Bank resolution (resolve_bank)
//! - Command rendering against mock ports
//! - Offline mode reading a data directory

mod common;

use bankdash::adapters::file_config_adapter::FileConfigAdapter;
use bankdash::cli::{self, Command, Ports};
use bankdash::domain::dashboard_config::{DashboardConfig, LookbackPeriod};
use bankdash::domain::error::DashboardError;
use common::*;
use std::io::Write;
use std::time::Duration;

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const VALID_INI: &str = r#"
[sources]
predictions_base_url = https://data.example/predictions/
composition_url = https://data.example/weights.csv
heatmap_image_url = https://data.example/heatmap.png
period = 1y
timeout_secs = 15

[index]
symbol = ^NSEBANK
name = Nifty Bank

[banks]
entries = HDFC Bank=HDFCBANK.NS, State Bank of India=SBIN.NS

[cache]
enabled = false
"#;

mod config_loading {
    use super::*;

    #[test]
    fn load_valid_config() {
        let file = write_temp_ini(VALID_INI);
        let adapter = cli::load_config(file.path()).unwrap();
        let config = cli::build_config(&adapter).unwrap();

        assert_eq!(config.period, LookbackPeriod::OneYear);
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
        assert!(!config.cache_enabled);
        assert_eq!(config.universe.banks().len(), 2);
        assert_eq!(
            config.sources.predictions_url("SBIN.csv"),
            "https://data.example/predictions/SBIN.csv"
        );
        assert_eq!(config.index.symbol, "^NSEBANK");
    }

    #[test]
    fn missing_file_is_parse_error() {
        let err = cli::load_config(std::path::Path::new("/nonexistent/bankdash.ini")).unwrap_err();
        assert!(matches!(err, DashboardError::ConfigParse { .. }));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = cli::build_config(&FileConfigAdapter::empty()).unwrap();
        assert_eq!(config.period, LookbackPeriod::FiveYears);
        assert!(config.cache_enabled);
        assert_eq!(config.universe.banks().len(), 10);
    }

    #[test]
    fn invalid_period_rejected() {
        let file = write_temp_ini("[sources]\nperiod = fortnight\n");
        let adapter = cli::load_config(file.path()).unwrap();
        let err = cli::build_config(&adapter).unwrap_err();
        match err {
            DashboardError::ConfigInvalid { section, key, .. } => {
                assert_eq!(section, "sources");
                assert_eq!(key, "period");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn base_url_without_trailing_slash_rejected() {
        let file = write_temp_ini("[sources]\npredictions_base_url = https://data.example/preds\n");
        let adapter = cli::load_config(file.path()).unwrap();
        assert!(matches!(
            cli::build_config(&adapter),
            Err(DashboardError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn malformed_bank_entries_rejected() {
        let file = write_temp_ini("[banks]\nentries = HDFC Bank\n");
        let adapter = cli::load_config(file.path()).unwrap();
        assert!(matches!(
            cli::build_config(&adapter),
            Err(DashboardError::ConfigInvalid { .. })
        ));
    }
}

mod bank_resolution {
    use super::*;

    #[test]
    fn none_selects_index() {
        let config = DashboardConfig::default();
        assert_eq!(cli::resolve_bank(&config, None).unwrap(), config.index);
    }

    #[test]
    fn by_name_or_symbol() {
        let config = DashboardConfig::default();
        assert_eq!(
            cli::resolve_bank(&config, Some("sbin.ns")).unwrap().name,
            "State Bank of India"
        );
        assert_eq!(
            cli::resolve_bank(&config, Some("Axis Bank")).unwrap().symbol,
            "AXISBANK.NS"
        );
        assert_eq!(
            cli::resolve_bank(&config, Some("nifty bank")).unwrap(),
            config.index
        );
    }

    #[test]
    fn unknown_bank() {
        let config = DashboardConfig::default();
        let err = cli::resolve_bank(&config, Some("Yes Bank")).unwrap_err();
        assert!(matches!(err, DashboardError::UnknownBank(ref q) if q == "Yes Bank"));
        let code: std::process::ExitCode = (&err).into();
        assert_eq!(code, std::process::ExitCode::from(3));
    }
}

mod rendering {
    use super::*;

    fn mock_ports() -> Ports {
        let market = MockMarketData::new()
            .with_bars("^NSEBANK", generate_bars("^NSEBANK", "2023-01-01", 80, 40000.0))
            .with_bars("HDFCBANK.NS", generate_bars("HDFCBANK.NS", "2023-01-01", 80, 1500.0))
            .with_bars("SBIN.NS", generate_bars("SBIN.NS", "2023-01-01", 80, 600.0))
            .with_error("PNB.NS", "timed out");
        let csv = MockCsvSource::new()
            .with_file(
                "HDFCBANK.csv",
                b"Date,Open,Predicted_Open,%_error\n01-03-2024,100.0,98.5,1.5\n",
            )
            .with_file(
                "nifty_bank_weights.csv",
                b"Company,Weight(%)\nHDFC Bank,28.5\nICICI Bank,23.1\n",
            );
        Ports {
            market: Box::new(market),
            csv: Box::new(csv),
        }
    }

    #[test]
    fn banks_lists_index_and_members() {
        let config = DashboardConfig::default();
        let out = cli::render_command(&Command::Banks, &config, &mock_ports()).unwrap();
        assert_eq!(out.lines().count(), 11);
        assert!(out.lines().next().unwrap().contains("^NSEBANK"));
    }

    #[test]
    fn series_for_index_by_default() {
        let config = DashboardConfig::default();
        let cmd = Command::Series {
            bank: None,
            period: None,
            rows: 5,
        };
        let out = cli::render_command(&cmd, &config, &mock_ports()).unwrap();
        assert!(out.starts_with("=== Nifty Bank ==="));
        assert!(out.contains("40079.00"));
        assert!(!out.contains("warning:"));
    }

    #[test]
    fn series_failure_is_inline_warning() {
        let config = DashboardConfig::default();
        let cmd = Command::Series {
            bank: Some("PNB.NS".into()),
            period: Some(LookbackPeriod::OneMonth),
            rows: 5,
        };
        let out = cli::render_command(&cmd, &config, &mock_ports()).unwrap();
        assert!(out.contains("warning: Error fetching data for PNB.NS"));
        assert!(out.contains("timed out"));
    }

    #[test]
    fn predictions_command_renders_table() {
        let config = DashboardConfig::default();
        let cmd = Command::Predictions {
            bank: "HDFC Bank".into(),
            with_error: true,
            rows: 10,
        };
        let out = cli::render_command(&cmd, &config, &mock_ports()).unwrap();
        assert!(out.contains("2024-03-01"));
        assert!(out.contains("98.50"));
        assert!(out.contains("Mean abs error: 1.50%"));
    }

    #[test]
    fn predictions_unknown_bank_is_error() {
        let config = DashboardConfig::default();
        let cmd = Command::Predictions {
            bank: "Nifty Bank".into(),
            with_error: false,
            rows: 10,
        };
        let err = cli::render_command(&cmd, &config, &mock_ports()).unwrap_err();
        assert!(matches!(err, DashboardError::UnknownBank(_)));
    }

    #[test]
    fn dashboard_keeps_going_past_failed_panels() {
        let config = DashboardConfig::default();
        let cmd = Command::Dashboard {
            bank: Some("ICICI Bank".into()),
        };
        let out = cli::render_command(&cmd, &config, &mock_ports()).unwrap();

        assert!(out.contains("=== Nifty Bank ==="));
        assert!(out.contains("warning: No data found for ICICIBANK.NS"));
        assert!(out.contains("warning: Error loading prediction data for ICICI Bank"));
        assert!(out.contains("HDFC Bank"));
        assert!(out.contains("Total weight: 51.60%"));
        assert!(out.contains("image: "));
    }

    #[test]
    fn correlation_over_loaded_banks() {
        let config = DashboardConfig::default();
        let cmd = Command::Correlation { period: None };
        let out = cli::render_command(&cmd, &config, &mock_ports()).unwrap();
        assert!(out.contains("warning: Error fetching data for PNB.NS"));
        assert!(out.contains("Daily Return Correlation"));
        assert!(out.contains("HDFC Bank"));
        assert!(out.contains("State Bank of India"));
    }
}

mod offline {
    use super::*;
    use std::fs;

    #[test]
    fn data_dir_serves_prices_and_csvs() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut prices = String::from("date,open,high,low,close,volume\n");
        for bar in generate_bars("SBIN.NS", "2024-01-01", 60, 600.0) {
            prices.push_str(&format!(
                "{},{},{},{},{},{}\n",
                bar.date, bar.open, bar.high, bar.low, bar.close, bar.volume
            ));
        }
        fs::write(dir.path().join("SBIN.NS.csv"), prices).unwrap();
        fs::write(
            dir.path().join("nifty_bank_weights.csv"),
            b"Company,Weight(%)\nState Bank of India,10.0\n",
        )
        .unwrap();

        let config = DashboardConfig::default();
        let ports = cli::build_ports(&config, Some(dir.path())).unwrap();

        let series = Command::Series {
            bank: Some("SBIN.NS".into()),
            period: Some(LookbackPeriod::Max),
            rows: 3,
        };
        let out = cli::render_command(&series, &config, &ports).unwrap();
        assert!(out.contains("659.00"));

        let composition = Command::Composition { builtin: false };
        let out = cli::render_command(&composition, &config, &ports).unwrap();
        assert!(out.contains("Total weight: 10.00%"));
    }

    #[test]
    fn builtin_composition_needs_no_source() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = DashboardConfig::default();
        let ports = cli::build_ports(&config, Some(dir.path())).unwrap();

        let cmd = Command::Composition { builtin: true };
        let out = cli::render_command(&cmd, &config, &ports).unwrap();
        assert!(!out.contains("warning:"));
        assert!(out.contains("HDFC Bank"));
    }
}
