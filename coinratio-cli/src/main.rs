//! coinratio CLI: plot two cryptocurrencies and their price ratio.
//!
//! Resolves both tickers against the price-index catalog, fetches their USD
//! price history, and shows three charts: coin A, coin B and A/B over the
//! requested number of days.
//!
//! Usage:
//!   coinratio BTC ETH 180        # BTC, ETH and BTC/ETH over the last 180 days
//!   coinratio --no-chart SOL ETH # print the ratio table instead of charting
//!
//! Exit codes: 0 ok, 1 catalog unavailable, 2 usage error, 3 unknown symbol,
//! 4 price history unavailable, 5 anything else (including malformed
//! responses). A rate-limited call counts as its endpoint being unavailable.

mod logging;

use anyhow::{Context, Result};
use chrono::DateTime;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use coinratio_core::{
    run_pair, AlignMode, CoinGeckoClient, Config, DataError, Endpoint, FetchSpan, PairReport,
    PairRequest,
};
use coinratio_tui::RatioView;

const EXIT_CATALOG_UNAVAILABLE: u8 = 1;
const EXIT_UNKNOWN_SYMBOL: u8 = 3;
const EXIT_HISTORY_UNAVAILABLE: u8 = 4;
const EXIT_OTHER: u8 = 5;

#[derive(Parser, Debug)]
#[command(
    name = "coinratio",
    about = "Plots graphs of two cryptocurrencies and their ratio"
)]
struct Cli {
    /// First cryptocurrency ticker (e.g. BTC).
    #[arg(default_value = "BTC")]
    first_crypto: String,

    /// Second cryptocurrency ticker (e.g. ETH).
    #[arg(default_value = "ETH")]
    second_crypto: String,

    /// Number of days to display.
    #[arg(default_value_t = 90, value_parser = clap::value_parser!(u32).range(1..))]
    days: u32,

    /// Debug output: resolved ids, time span and fetched series.
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// TOML config file. Defaults to <config dir>/coinratio/config.toml if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// How to pair the two series: date (by calendar day) or position (by index).
    #[arg(long)]
    align: Option<AlignMode>,

    /// How much history to fetch: window (the displayed days) or year (365 days).
    #[arg(long)]
    span: Option<FetchSpan>,

    /// Print a summary table instead of opening the chart view.
    #[arg(long, default_value_t = false)]
    no_chart: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.debug) {
        eprintln!("Warning: {e:#}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let request = build_request(cli, &config);
    tracing::debug!(?request, base_url = %config.api.base_url, "starting run");

    let client = CoinGeckoClient::new(&config.api, &config.rate_limit)?;
    let report = run_pair(&client, &request)?;

    if cli.no_chart {
        print_summary(&report);
        return Ok(());
    }

    let view = RatioView::from_report(&report, &request.quote);
    coinratio_tui::show(&view).context("chart display failed")?;
    Ok(())
}

/// Merge CLI arguments over the config file; flags win.
fn build_request(cli: &Cli, config: &Config) -> PairRequest {
    PairRequest {
        first: cli.first_crypto.clone(),
        second: cli.second_crypto.clone(),
        days: cli.days,
        quote: config.api.quote_currency.clone(),
        span: cli.span.unwrap_or(config.chart.span),
        align: cli.align.unwrap_or(config.chart.align),
    }
}

fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<DataError>() {
        Some(DataError::CatalogUnavailable(_))
        | Some(DataError::RateLimited {
            endpoint: Endpoint::Catalog,
            ..
        }) => EXIT_CATALOG_UNAVAILABLE,
        Some(DataError::UnknownSymbol { .. }) => EXIT_UNKNOWN_SYMBOL,
        Some(DataError::HistoryUnavailable { .. })
        | Some(DataError::RateLimited {
            endpoint: Endpoint::History { .. },
            ..
        }) => EXIT_HISTORY_UNAVAILABLE,
        _ => EXIT_OTHER,
    }
}

fn print_summary(report: &PairReport) {
    let label = report.ratio_label();
    println!();
    println!("=== {label} ===");
    println!(
        "Ids:        {} / {}",
        report.first.id, report.second.id
    );
    println!("Span:       {} (align: {})", report.span, report.align);
    println!(
        "Samples:    {} / {}",
        report.first.series.len(),
        report.second.series.len()
    );
    println!(
        "Ratios:     {} shown of {}",
        report.aligned.display_ratios.len(),
        report.aligned.ratio.len()
    );
    println!();
    println!("{:<18} {:>16}", "Date", label);
    println!("{}", "-".repeat(35));
    for (ts, ratio) in report.aligned.display_points() {
        let when = DateTime::from_timestamp_millis(ts)
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| ts.to_string());
        println!("{when:<18} {ratio:>16.6}");
    }
    println!();
}
