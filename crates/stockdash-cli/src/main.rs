//! Stock dashboard CLI
//!
//! One invocation is one user submission: build the query, run the
//! pipeline, print the fundamentals metrics and the advisory, and
//! optionally write the candlestick chart payload for an external
//! renderer.
//!
//! # Usage
//!
//! ```bash
//! stockdash --symbol AAPL
//! stockdash --symbol TSLA --start 2025-01-01 --end 2025-06-30 --chart-out chart.json
//! ```

use chrono::{NaiveDate, Utc};
use clap::Parser;
use comfy_table::{Table, presets::UTF8_FULL};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use stockdash_core::{DashConfig, Dashboard, Query, Report, format};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "stockdash")]
#[command(about = "Fetch prices and fundamentals for a ticker and print an advisory", long_about = None)]
struct Args {
    /// Ticker symbol to analyze
    #[arg(short, long, default_value = "AAPL")]
    symbol: String,

    /// Range start (YYYY-MM-DD); defaults to one year before the end date
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Range end (YYYY-MM-DD); defaults to today
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Write the candlestick chart payload as JSON to this path
    #[arg(long)]
    chart_out: Option<PathBuf>,

    /// Snapshot cache TTL in seconds
    #[arg(long, default_value_t = 900)]
    cache_ttl: u64,
}

/// Resolve the query window from optional flags.
///
/// The end defaults to today; the start defaults to one year before the
/// resolved end date, so `--end` without `--start` yields the year
/// leading up to that end, not up to today.
fn date_window(start: Option<NaiveDate>, end: Option<NaiveDate>) -> (NaiveDate, NaiveDate) {
    let end = end.unwrap_or_else(|| Utc::now().date_naive());
    let start = start.unwrap_or_else(|| end - chrono::Duration::days(365));
    (start, end)
}

fn init_tracing() {
    let filter = env::var("RUST_LOG").unwrap_or_else(|_| "warn,stockdash_core=info".to_string());
    tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn render_report(report: &Report, chart_out: Option<&Path>) -> anyhow::Result<()> {
    let query = &report.query;
    let snapshot = &report.snapshot;

    println!(
        "{} ({} to {})\n",
        query.symbol(),
        query.start(),
        query.end()
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Metric", "Value"]);
    for (label, value) in format::metric_rows(&snapshot.fundamentals) {
        table.add_row(vec![label.to_string(), value]);
    }
    println!("{table}\n");

    if snapshot.prices.is_empty() {
        println!("No trading data in the requested range.");
    } else {
        let bars = snapshot.prices.bars();
        println!(
            "{} trading days; close {:.2} to {:.2}",
            bars.len(),
            bars[0].close,
            bars[bars.len() - 1].close
        );
    }

    println!("\nAdvisory: {}", report.advisory);

    if let Some(path) = chart_out {
        let payload = report.chart_payload();
        std::fs::write(path, serde_json::to_string_pretty(&payload)?)?;
        println!("Chart payload written to {}", path.display());
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();
    let (start, end) = date_window(args.start, args.end);

    let query = match Query::new(&args.symbol, start, end) {
        Ok(query) => query,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let config = DashConfig::builder()
        .cache_ttl(Duration::from_secs(args.cache_ttl))
        .build()?;
    let dashboard = Dashboard::new(&config)?;

    info!(symbol = %query.symbol(), "running dashboard pipeline");

    match dashboard.run(&query).await {
        Ok(report) => render_report(&report, args.chart_out.as_deref())?,
        Err(e) => {
            // One submission, one result: on failure nothing else renders.
            eprintln!("data load failed: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}
