//! Concrete adapter implementations for ports.

pub mod cache;
pub mod console_report;
pub mod csv_adapter;
pub mod file_config_adapter;
pub mod http_csv_adapter;
pub mod local_csv_source;
pub mod yahoo_adapter;
