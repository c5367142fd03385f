//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

use crate::adapters::cache::{CachedCsvSource, CachedMarketData};
use crate::adapters::console_report;
use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::http_csv_adapter::HttpCsvAdapter;
use crate::adapters::local_csv_source::LocalCsvSource;
use crate::adapters::yahoo_adapter::YahooAdapter;
use crate::domain::analytics::correlation_matrix;
use crate::domain::config_validation::validate_dashboard_config;
use crate::domain::dashboard_config::{build_dashboard_config, DashboardConfig, LookbackPeriod};
use crate::domain::error::DashboardError;
use crate::domain::ingest;
use crate::domain::panel::Panel;
use crate::domain::series::AugmentedSeries;
use crate::domain::universe::Bank;
use crate::ports::csv_source_port::CsvSourcePort;
use crate::ports::market_data_port::MarketDataPort;

const DEFAULT_ROWS: usize = 10;

#[derive(Parser, Debug)]
#[command(name = "bankdash", about = "Indian bank equities dashboard")]
pub struct Cli {
    /// INI config file; built-in defaults are used when absent
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Read prices and CSV files from this directory instead of the network
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the configured banks
    Banks,
    /// Show the normalized price series for a bank or the index
    Series {
        /// Bank name or symbol; the index when omitted
        #[arg(short, long)]
        bank: Option<String>,
        #[arg(short, long)]
        period: Option<LookbackPeriod>,
        #[arg(long, default_value_t = DEFAULT_ROWS)]
        rows: usize,
    },
    /// Show actual vs predicted prices for a bank
    Predictions {
        #[arg(short, long)]
        bank: String,
        /// Also require and show the % Error column
        #[arg(long)]
        with_error: bool,
        #[arg(long, default_value_t = DEFAULT_ROWS)]
        rows: usize,
    },
    /// Show the index composition weights
    Composition {
        /// Use the weights shipped with bankdash
        #[arg(long)]
        builtin: bool,
    },
    /// Correlation of daily returns across all configured banks
    Correlation {
        #[arg(short, long)]
        period: Option<LookbackPeriod>,
    },
    /// Render every panel for one bank
    Dashboard {
        #[arg(short, long)]
        bank: Option<String>,
    },
}

/// The data sources a command reads from.
pub struct Ports {
    pub market: Box<dyn MarketDataPort>,
    pub csv: Box<dyn CsvSourcePort>,
}

pub fn run(cli: Cli) -> ExitCode {
    match execute(&cli) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn execute(cli: &Cli) -> Result<String, DashboardError> {
    let adapter = match &cli.config {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            load_config(path)?
        }
        None => FileConfigAdapter::empty(),
    };
    let config = build_config(&adapter)?;
    let ports = build_ports(&config, cli.data_dir.as_deref())?;
    render_command(&cli.command, &config, &ports)
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, DashboardError> {
    FileConfigAdapter::from_file(path).map_err(|e| DashboardError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Validate the raw settings, then build the immutable config from them.
pub fn build_config(adapter: &FileConfigAdapter) -> Result<DashboardConfig, DashboardError> {
    validate_dashboard_config(adapter)?;
    build_dashboard_config(adapter)
}

/// Pick network or directory-backed adapters, memoized when caching is on.
pub fn build_ports(
    config: &DashboardConfig,
    data_dir: Option<&Path>,
) -> Result<Ports, DashboardError> {
    match data_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "using offline data directory");
            Ok(assemble_ports(
                CsvAdapter::new(dir.to_path_buf()),
                LocalCsvSource::new(dir.to_path_buf()),
                config.cache_enabled,
            ))
        }
        None => Ok(assemble_ports(
            YahooAdapter::new(config.timeout)?,
            HttpCsvAdapter::new(config.timeout)?,
            config.cache_enabled,
        )),
    }
}

fn assemble_ports<M, C>(market: M, csv: C, cached: bool) -> Ports
where
    M: MarketDataPort + 'static,
    C: CsvSourcePort + 'static,
{
    if cached {
        Ports {
            market: Box::new(CachedMarketData::new(market)),
            csv: Box::new(CachedCsvSource::new(csv)),
        }
    } else {
        Ports {
            market: Box::new(market),
            csv: Box::new(csv),
        }
    }
}

/// Resolve a bank by name or symbol; `None` selects the index.
pub fn resolve_bank(config: &DashboardConfig, query: Option<&str>) -> Result<Bank, DashboardError> {
    let Some(query) = query else {
        return Ok(config.index.clone());
    };
    let index = &config.index;
    if query.eq_ignore_ascii_case(&index.symbol) || query.eq_ignore_ascii_case(&index.name) {
        return Ok(config.index.clone());
    }
    config
        .universe
        .find(query)
        .cloned()
        .ok_or_else(|| DashboardError::UnknownBank(query.to_string()))
}

fn resolve_member(config: &DashboardConfig, query: &str) -> Result<Bank, DashboardError> {
    config
        .universe
        .find(query)
        .cloned()
        .ok_or_else(|| DashboardError::UnknownBank(query.to_string()))
}

/// Run one command against the given ports and return its rendered output.
pub fn render_command(
    command: &Command,
    config: &DashboardConfig,
    ports: &Ports,
) -> Result<String, DashboardError> {
    match command {
        Command::Banks => Ok(render_banks(config)),
        Command::Series { bank, period, rows } => {
            let bank = resolve_bank(config, bank.as_deref())?;
            let period = period.unwrap_or(config.period);
            let panel = ingest::fetch_series(ports.market.as_ref(), &bank.symbol, period);
            Ok(console_report::render_series(&bank.name, &panel, *rows))
        }
        Command::Predictions {
            bank,
            with_error,
            rows,
        } => {
            let bank = resolve_member(config, bank)?;
            Ok(render_predictions(config, ports, &bank, *with_error, *rows))
        }
        Command::Composition { builtin } => {
            let panel = if *builtin {
                ingest::builtin_composition()
            } else {
                ingest::load_composition(ports.csv.as_ref(), &config.sources.composition_url)
            };
            Ok(console_report::render_composition(&panel))
        }
        Command::Correlation { period } => {
            let period = period.unwrap_or(config.period);
            Ok(render_correlation(config, ports, period))
        }
        Command::Dashboard { bank } => {
            let bank = match bank {
                Some(q) => resolve_member(config, q)?,
                None => config
                    .universe
                    .banks()
                    .first()
                    .cloned()
                    .ok_or_else(|| DashboardError::UnknownBank("(no banks configured)".into()))?,
            };
            Ok(render_dashboard(config, ports, &bank))
        }
    }
}

fn render_banks(config: &DashboardConfig) -> String {
    let mut out = format!("{:<24} {}\n", config.index.name, config.index.symbol);
    for bank in config.universe.banks() {
        out.push_str(&format!("{:<24} {}\n", bank.name, bank.symbol));
    }
    out
}

fn render_predictions(
    config: &DashboardConfig,
    ports: &Ports,
    bank: &Bank,
    with_error: bool,
    rows: usize,
) -> String {
    let panel = ingest::load_predictions(ports.csv.as_ref(), &config.sources, bank);
    let panel = ingest::require_prediction_columns(panel, with_error);
    console_report::render_predictions(&format!("{} Predictions", bank.name), &panel, rows)
}

fn render_correlation(config: &DashboardConfig, ports: &Ports, period: LookbackPeriod) -> String {
    let mut loaded: Vec<(String, AugmentedSeries)> = Vec::new();
    let mut out = String::new();

    for bank in config.universe.banks() {
        match ingest::fetch_series(ports.market.as_ref(), &bank.symbol, period) {
            Panel::Ready(series) => loaded.push((bank.name.clone(), series)),
            Panel::Unavailable { message } => out.push_str(&format!("warning: {}\n", message)),
        }
    }

    let refs: Vec<(&str, &AugmentedSeries)> =
        loaded.iter().map(|(name, s)| (name.as_str(), s)).collect();
    out.push_str(&console_report::render_correlation(&correlation_matrix(&refs)));
    out
}

fn render_dashboard(config: &DashboardConfig, ports: &Ports, bank: &Bank) -> String {
    let market = ports.market.as_ref();
    let mut out = String::new();

    let index = ingest::fetch_series(market, &config.index.symbol, config.period);
    out.push_str(&console_report::render_series(&config.index.name, &index, DEFAULT_ROWS));
    out.push('\n');

    let series = ingest::fetch_series(market, &bank.symbol, config.period);
    out.push_str(&console_report::render_series(&bank.name, &series, DEFAULT_ROWS));
    out.push('\n');

    out.push_str(&render_predictions(config, ports, bank, false, DEFAULT_ROWS));
    out.push('\n');

    let composition = ingest::load_composition(ports.csv.as_ref(), &config.sources.composition_url);
    out.push_str(&console_report::render_composition(&composition));
    out.push('\n');

    out.push_str(&console_report::render_heatmap_image(&config.sources.heatmap_image_url));
    out
}
