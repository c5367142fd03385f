//! Core domain types and logic.

pub mod ohlcv;
pub mod indicator;
pub mod series;
pub mod raw_table;
pub mod prediction;
pub mod composition;
pub mod universe;
pub mod dashboard_config;
pub mod config_validation;
pub mod panel;
pub mod ingest;
pub mod analytics;
pub mod error;
