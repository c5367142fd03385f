//! Immutable dashboard configuration, built once at startup.
//!
//! Every key has a default so the dashboard runs without a config file.

use crate::domain::error::DashboardError;
use crate::domain::universe::{parse_bank_entries, Bank, BankUniverse};
use crate::ports::config_port::ConfigPort;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PREDICTIONS_BASE_URL: &str =
    "https://raw.githubusercontent.com/bankdash/data/main/predictions/";
pub const DEFAULT_COMPOSITION_URL: &str =
    "https://raw.githubusercontent.com/bankdash/data/main/nifty_bank_weights.csv";
pub const DEFAULT_HEATMAP_IMAGE_URL: &str =
    "https://raw.githubusercontent.com/bankdash/data/main/heatmap.png";
pub const DEFAULT_INDEX_SYMBOL: &str = "^NSEBANK";
pub const DEFAULT_INDEX_NAME: &str = "Nifty Bank";

/// Lookback window accepted by the market-data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookbackPeriod {
    OneDay,
    FiveDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    TwoYears,
    FiveYears,
    TenYears,
    YearToDate,
    Max,
}

impl LookbackPeriod {
    pub const ALL: [LookbackPeriod; 11] = [
        LookbackPeriod::OneDay,
        LookbackPeriod::FiveDays,
        LookbackPeriod::OneMonth,
        LookbackPeriod::ThreeMonths,
        LookbackPeriod::SixMonths,
        LookbackPeriod::OneYear,
        LookbackPeriod::TwoYears,
        LookbackPeriod::FiveYears,
        LookbackPeriod::TenYears,
        LookbackPeriod::YearToDate,
        LookbackPeriod::Max,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LookbackPeriod::OneDay => "1d",
            LookbackPeriod::FiveDays => "5d",
            LookbackPeriod::OneMonth => "1mo",
            LookbackPeriod::ThreeMonths => "3mo",
            LookbackPeriod::SixMonths => "6mo",
            LookbackPeriod::OneYear => "1y",
            LookbackPeriod::TwoYears => "2y",
            LookbackPeriod::FiveYears => "5y",
            LookbackPeriod::TenYears => "10y",
            LookbackPeriod::YearToDate => "ytd",
            LookbackPeriod::Max => "max",
        }
    }

    /// Calendar days covered, counted back from the latest bar.
    /// `None` for windows without a fixed length.
    pub fn days(self) -> Option<i64> {
        match self {
            LookbackPeriod::OneDay => Some(1),
            LookbackPeriod::FiveDays => Some(5),
            LookbackPeriod::OneMonth => Some(30),
            LookbackPeriod::ThreeMonths => Some(91),
            LookbackPeriod::SixMonths => Some(182),
            LookbackPeriod::OneYear => Some(365),
            LookbackPeriod::TwoYears => Some(730),
            LookbackPeriod::FiveYears => Some(1826),
            LookbackPeriod::TenYears => Some(3652),
            LookbackPeriod::YearToDate | LookbackPeriod::Max => None,
        }
    }
}

impl fmt::Display for LookbackPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LookbackPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<_> = Self::ALL.iter().map(|p| p.as_str()).collect();
                format!("unknown period '{}' (expected one of {})", s, valid.join(", "))
            })
    }
}

#[derive(Debug, Clone)]
pub struct SourceUrls {
    pub predictions_base_url: String,
    pub composition_url: String,
    pub heatmap_image_url: String,
}

impl SourceUrls {
    pub fn predictions_url(&self, file: &str) -> String {
        format!("{}{}", self.predictions_base_url, file)
    }
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub sources: SourceUrls,
    pub period: LookbackPeriod,
    /// `None` leaves the HTTP client's default in place.
    pub timeout: Option<Duration>,
    /// Memoize fetches for the lifetime of the process.
    pub cache_enabled: bool,
    pub index: Bank,
    pub universe: BankUniverse,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            sources: SourceUrls {
                predictions_base_url: DEFAULT_PREDICTIONS_BASE_URL.to_string(),
                composition_url: DEFAULT_COMPOSITION_URL.to_string(),
                heatmap_image_url: DEFAULT_HEATMAP_IMAGE_URL.to_string(),
            },
            period: LookbackPeriod::FiveYears,
            timeout: None,
            cache_enabled: true,
            index: Bank::new(DEFAULT_INDEX_NAME, DEFAULT_INDEX_SYMBOL),
            universe: BankUniverse::default(),
        }
    }
}

pub fn build_dashboard_config(config: &dyn ConfigPort) -> Result<DashboardConfig, DashboardError> {
    let defaults = DashboardConfig::default();

    let period_str = config
        .get_string("sources", "period")
        .unwrap_or_else(|| defaults.period.to_string());
    let period = period_str
        .parse::<LookbackPeriod>()
        .map_err(|reason| DashboardError::ConfigInvalid {
            section: "sources".into(),
            key: "period".into(),
            reason,
        })?;

    let timeout_secs = config.get_int("sources", "timeout_secs", 0);
    let timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs as u64));

    let universe = match config.get_string("banks", "entries") {
        Some(entries) => {
            let banks = parse_bank_entries(&entries).map_err(|e| DashboardError::ConfigInvalid {
                section: "banks".into(),
                key: "entries".into(),
                reason: e.to_string(),
            })?;
            BankUniverse::new(banks)
        }
        None => defaults.universe,
    };

    Ok(DashboardConfig {
        sources: SourceUrls {
            predictions_base_url: config
                .get_string("sources", "predictions_base_url")
                .unwrap_or(defaults.sources.predictions_base_url),
            composition_url: config
                .get_string("sources", "composition_url")
                .unwrap_or(defaults.sources.composition_url),
            heatmap_image_url: config
                .get_string("sources", "heatmap_image_url")
                .unwrap_or(defaults.sources.heatmap_image_url),
        },
        period,
        timeout,
        cache_enabled: config.get_bool("cache", "enabled", defaults.cache_enabled),
        index: Bank::new(
            config
                .get_string("index", "name")
                .unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
            config
                .get_string("index", "symbol")
                .unwrap_or_else(|| DEFAULT_INDEX_SYMBOL.to_string()),
        ),
        universe,
    })
}
