//! Ingestion pipeline: fetch, normalize and load every data panel.
//!
//! Each function here is the last stop for a [`FetchError`]: failures are
//! logged and turned into an unavailable [`Panel`] carrying the cause.

use crate::domain::composition::{self, CompositionTable, BUILTIN_WEIGHTS_CSV};
use crate::domain::dashboard_config::{LookbackPeriod, SourceUrls};
use crate::domain::error::FetchError;
use crate::domain::panel::Panel;
use crate::domain::prediction::{
    self, PredictionTable, ACTUAL_PRICE, PERCENT_ERROR, PREDICTED_PRICE,
};
use crate::domain::raw_table::{RawTable, TextEncoding};
use crate::domain::series::{normalize, AugmentedSeries, LONG_WINDOW};
use crate::domain::universe::Bank;
use crate::ports::csv_source_port::CsvSourcePort;
use crate::ports::market_data_port::MarketDataPort;
use tracing::{info, warn};

pub const HEATMAP_UNAVAILABLE: &str = "Heatmap data not available";

/// Fetch `symbol` over `period` and normalize it.
pub fn fetch_series(
    port: &dyn MarketDataPort,
    symbol: &str,
    period: LookbackPeriod,
) -> Panel<AugmentedSeries> {
    info!(symbol, %period, "fetching series");
    let bars = match port.fetch_bars(symbol, period) {
        Ok(bars) => bars,
        Err(e) => {
            warn!(symbol, error = %e, "series fetch failed");
            return Panel::unavailable(format!("Error fetching data for {}: {}", symbol, e));
        }
    };

    if bars.is_empty() {
        warn!(symbol, "no bars returned");
        return Panel::unavailable(format!("No data found for {}", symbol));
    }

    let series = normalize(symbol, &bars);
    if series.is_empty() {
        warn!(symbol, bars = bars.len(), "not enough history to normalize");
        return Panel::unavailable(format!(
            "Not enough history for {}: {} bars, need at least {}",
            symbol,
            bars.len(),
            LONG_WINDOW
        ));
    }

    Panel::Ready(series)
}

/// Retrieve and parse a CSV from `location`.
pub fn fetch_csv(
    source: &dyn CsvSourcePort,
    location: &str,
    encoding: TextEncoding,
) -> Result<RawTable, FetchError> {
    let text = source.fetch_text(location, encoding)?;
    RawTable::parse(location, &text)
}

/// Load the predictions file for `bank` from the configured base URL.
pub fn load_predictions(
    source: &dyn CsvSourcePort,
    sources: &SourceUrls,
    bank: &Bank,
) -> Panel<PredictionTable> {
    let file = bank.predictions_file();
    let url = sources.predictions_url(&file);
    info!(bank = %bank.name, %url, "loading predictions");

    let result = fetch_csv(source, &url, TextEncoding::Utf8)
        .and_then(|raw| prediction::from_raw(&file, raw));

    match result {
        Ok(table) => Panel::Ready(table),
        Err(e) => {
            warn!(bank = %bank.name, error = %e, "predictions unavailable");
            Panel::unavailable(format!("Error loading prediction data for {}: {}", bank.name, e))
        }
    }
}

/// Gate a predictions panel on the columns its chart needs.
pub fn require_prediction_columns(
    panel: Panel<PredictionTable>,
    with_error: bool,
) -> Panel<PredictionTable> {
    panel.and_then(|table| {
        let mut required = vec![ACTUAL_PRICE, PREDICTED_PRICE];
        if with_error {
            required.push(PERCENT_ERROR);
        }
        match table.require_columns(&required) {
            Ok(()) => Panel::Ready(table),
            Err(FetchError::SchemaMismatch { missing, .. }) => Panel::unavailable(format!(
                "Cannot chart predictions, missing columns: {}",
                missing.join(", ")
            )),
            Err(e) => Panel::unavailable(e.to_string()),
        }
    })
}

/// Load the sector-composition weights (Latin-1 encoded).
pub fn load_composition(source: &dyn CsvSourcePort, url: &str) -> Panel<CompositionTable> {
    info!(%url, "loading composition");
    let result = fetch_csv(source, url, TextEncoding::Latin1)
        .and_then(|raw| composition::from_raw(url, raw));

    match result {
        Ok(table) if table.is_empty() => {
            warn!(%url, "composition file has no rows");
            Panel::unavailable(format!("{}: {} has no rows", HEATMAP_UNAVAILABLE, url))
        }
        Ok(table) => Panel::Ready(table),
        Err(e) => {
            warn!(%url, error = %e, "composition unavailable");
            Panel::unavailable(format!("{}: {}", HEATMAP_UNAVAILABLE, e))
        }
    }
}

/// The weights shipped with the crate, for offline use.
pub fn builtin_composition() -> Panel<CompositionTable> {
    match RawTable::parse("builtin", BUILTIN_WEIGHTS_CSV)
        .and_then(|raw| composition::from_raw("builtin", raw))
    {
        Ok(table) => Panel::Ready(table),
        Err(e) => Panel::unavailable(format!("{}: {}", HEATMAP_UNAVAILABLE, e)),
    }
}
