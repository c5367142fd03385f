//! Plain-text rendering of dashboard panels.
//!
//! Every renderer returns a `String`; unavailable panels render as their
//! warning message so one broken source never hides the others.

use crate::domain::analytics::{CorrelationMatrix, SeriesSummary};
use crate::domain::composition::CompositionTable;
use crate::domain::panel::Panel;
use crate::domain::prediction::PredictionTable;
use crate::domain::series::AugmentedSeries;
use std::fmt::Write;

const HEATMAP_BAR_WIDTH: f64 = 40.0;

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "=== {} ===", title);
}

fn warning(out: &mut String, message: &str) {
    let _ = writeln!(out, "warning: {}", message);
}

pub fn render_series(title: &str, panel: &Panel<AugmentedSeries>, rows: usize) -> String {
    let mut out = String::new();
    heading(&mut out, title);

    let series = match panel {
        Panel::Ready(s) => s,
        Panel::Unavailable { message } => {
            warning(&mut out, message);
            return out;
        }
    };

    if let Some(summary) = SeriesSummary::compute(series) {
        out.push_str(&render_summary(&summary));
    }

    let _ = writeln!(
        out,
        "{:<12} {:>10} {:>10} {:>10} {:>10} {:>12} {:>10} {:>10} {:>8}",
        "Date", "Open", "High", "Low", "Close", "Volume", "MA20", "MA50", "Chg%"
    );
    for row in series.tail(rows) {
        let _ = writeln!(
            out,
            "{:<12} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>12} {:>10.2} {:>10.2} {:>8}",
            row.bar.date,
            row.bar.open,
            row.bar.high,
            row.bar.low,
            row.bar.close,
            row.bar.volume,
            row.ma20,
            row.ma50,
            cell(row.pct_change.map(|p| p * 100.0)),
        );
    }
    out
}

pub fn render_summary(summary: &SeriesSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "As of:        {}", summary.as_of);
    match (summary.day_change, summary.day_change_pct) {
        (Some(change), Some(pct)) => {
            let sign = if change >= 0.0 { "+" } else { "" };
            let _ = writeln!(
                out,
                "Last Close:   {:.2} ({}{:.2}, {}{:.2}%)",
                summary.last_close, sign, change, sign, pct
            );
        }
        _ => {
            let _ = writeln!(out, "Last Close:   {:.2} (change n/a)", summary.last_close);
        }
    }
    let _ = writeln!(
        out,
        "Range:        {:.2} - {:.2}",
        summary.period_low, summary.period_high
    );
    let _ = writeln!(out, "Avg Volume:   {:.0}", summary.avg_volume);
    let _ = writeln!(
        out,
        "MA20 / MA50:  {:.2} / {:.2} ({})",
        summary.ma20,
        summary.ma50,
        if summary.is_uptrend() { "above" } else { "below" }
    );
    out
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

pub fn render_predictions(title: &str, panel: &Panel<PredictionTable>, rows: usize) -> String {
    let mut out = String::new();
    heading(&mut out, title);

    let table = match panel {
        Panel::Ready(t) => t,
        Panel::Unavailable { message } => {
            warning(&mut out, message);
            return out;
        }
    };

    let _ = writeln!(
        out,
        "{:<12} {:>14} {:>16} {:>9}",
        "Date", "Actual Price", "Predicted Price", "% Error"
    );
    for row in &table.rows[table.rows.len().saturating_sub(rows)..] {
        let date = row
            .date
            .map_or_else(|| "-".to_string(), |d| d.to_string());
        let _ = writeln!(
            out,
            "{:<12} {:>14} {:>16} {:>9}",
            date,
            cell(row.actual_price),
            cell(row.predicted_price),
            cell(row.error_pct()),
        );
    }
    if let Some(mape) = table.mean_abs_error_pct() {
        let counted = table.rows.iter().filter(|r| r.error_pct().is_some()).count();
        let _ = writeln!(out, "Mean abs error: {:.2}% over {} rows", mape, counted);
    }
    out
}

/// Bar proportional to `weight`, clamped to the 0..=100 range.
/// Non-finite weights get no bar.
fn weight_bar(weight: f64) -> String {
    if !weight.is_finite() {
        return String::new();
    }
    let n = (weight.clamp(0.0, 100.0) / 100.0 * HEATMAP_BAR_WIDTH).round() as usize;
    "#".repeat(n)
}

pub fn render_composition(panel: &Panel<CompositionTable>) -> String {
    let mut out = String::new();
    heading(&mut out, "Nifty Bank Composition");

    let table = match panel {
        Panel::Ready(t) => t,
        Panel::Unavailable { message } => {
            warning(&mut out, message);
            return out;
        }
    };

    let width = table
        .rows
        .iter()
        .map(|r| r.company_name.chars().count())
        .max()
        .unwrap_or(0);

    for row in table.sorted_by_weight() {
        let (weight, bar) = match row.weight_percent {
            Some(w) => (format!("{:>6.2}", w), weight_bar(w)),
            None => (format!("{:>6}", row.raw_weight), String::new()),
        };
        let _ = writeln!(
            out,
            "{:<width$}  {}  {}",
            row.company_name,
            weight,
            bar,
            width = width
        );
    }
    let _ = writeln!(out, "Total weight: {:.2}%", table.total_weight());
    out
}

pub fn render_correlation(matrix: &CorrelationMatrix) -> String {
    let mut out = String::new();
    heading(&mut out, "Daily Return Correlation");

    let width = matrix.labels.iter().map(String::len).max().unwrap_or(0).max(6);
    let _ = write!(out, "{:<width$}", "", width = width);
    for label in &matrix.labels {
        let _ = write!(out, " {:>width$}", label, width = width);
    }
    out.push('\n');

    for (i, label) in matrix.labels.iter().enumerate() {
        let _ = write!(out, "{:<width$}", label, width = width);
        for value in &matrix.values[i] {
            if value.is_nan() {
                let _ = write!(out, " {:>width$}", "-", width = width);
            } else {
                let _ = write!(out, " {:>width$.2}", value, width = width);
            }
        }
        out.push('\n');
    }
    out
}

pub fn render_heatmap_image(url: &str) -> String {
    format!("=== Sector Heatmap ===\nimage: {}\n", url)
}
