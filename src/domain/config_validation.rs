//! Configuration validation.
//!
//! Validates config fields before any source is contacted.

use crate::domain::dashboard_config::LookbackPeriod;
use crate::domain::error::DashboardError;
use crate::domain::universe::parse_bank_entries;
use crate::ports::config_port::ConfigPort;

pub fn validate_dashboard_config(config: &dyn ConfigPort) -> Result<(), DashboardError> {
    validate_urls(config)?;
    validate_period(config)?;
    validate_timeout(config)?;
    validate_index(config)?;
    validate_banks(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> DashboardError {
    DashboardError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_urls(config: &dyn ConfigPort) -> Result<(), DashboardError> {
    for key in ["predictions_base_url", "composition_url", "heatmap_image_url"] {
        if let Some(url) = config.get_string("sources", key) {
            let url = url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(invalid("sources", key, "must be an http(s) URL"));
            }
        }
    }
    if let Some(base) = config.get_string("sources", "predictions_base_url") {
        if !base.trim().ends_with('/') {
            return Err(invalid(
                "sources",
                "predictions_base_url",
                "must end with '/' so file names can be appended",
            ));
        }
    }
    Ok(())
}

fn validate_period(config: &dyn ConfigPort) -> Result<(), DashboardError> {
    if let Some(period) = config.get_string("sources", "period") {
        period
            .parse::<LookbackPeriod>()
            .map_err(|reason| invalid("sources", "period", reason))?;
    }
    Ok(())
}

fn validate_timeout(config: &dyn ConfigPort) -> Result<(), DashboardError> {
    let value = config.get_int("sources", "timeout_secs", 0);
    if value < 0 {
        return Err(invalid("sources", "timeout_secs", "timeout_secs must be non-negative"));
    }
    Ok(())
}

fn validate_index(config: &dyn ConfigPort) -> Result<(), DashboardError> {
    for key in ["symbol", "name"] {
        if let Some(value) = config.get_string("index", key) {
            if value.trim().is_empty() {
                return Err(invalid("index", key, format!("{key} must not be empty")));
            }
        }
    }
    Ok(())
}

fn validate_banks(config: &dyn ConfigPort) -> Result<(), DashboardError> {
    if let Some(entries) = config.get_string("banks", "entries") {
        parse_bank_entries(&entries).map_err(|e| invalid("banks", "entries", e.to_string()))?;
    }
    Ok(())
}
