//! profitfolio - brokerage trade-export analytics.
//!
//! Reads Webull order and transfer exports, marks the portfolio to market
//! against Yahoo Finance daily closes, computes time-weighted and
//! money-weighted returns, compares against a benchmark symbol, and writes
//! CSV/JSON reports.

mod config;
mod report;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use profitfolio_core::activities::{
    import_order_activities, import_transfer_activities, Activity, ActivityError,
};
use profitfolio_core::benchmark::BenchmarkComparator;
use profitfolio_core::constants::DISPLAY_DECIMAL_PRECISION;
use profitfolio_core::portfolio::{
    aggregate_daily_flows, compute_money_weighted, compute_time_weighted,
    cumulative_return_percent, EquityCurveService,
};
use profitfolio_core::Error;
use profitfolio_market_data::YahooProvider;

use config::Config;
use report::Summary;

#[derive(Parser)]
#[command(name = "profitfolio", version, about = "Brokerage trade-export analytics")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "profitfolio.toml")]
    config: PathBuf,

    /// Valuation cut-off date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    as_of: Option<NaiveDate>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = Config::load(&args.config)?;
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    tracing::info!("Starting profitfolio (as of {})", as_of);

    let trades = import_order_activities(&config.trades.folder, &config.trades.patterns)?;
    if trades.is_empty() {
        tracing::warn!(
            "No filled trades parsed after cleaning. Check status values, timestamps, or column names."
        );
        return Ok(());
    }

    let transfers = load_transfers(&config)?;

    let trade_flows = aggregate_daily_flows(&trades);
    let provider = Arc::new(YahooProvider::new()?);

    let service = EquityCurveService::new(provider.clone());
    let equity = service
        .daily_equity(&trades, as_of)
        .await
        .context("Failed to build the equity curve")?;

    let first_date = *equity.keys().next().expect("equity covers the trade span");
    let terminal_value = *equity.values().next_back().expect("non-empty equity curve");

    let twr = compute_time_weighted(&equity);
    tracing::info!(
        "Time-weighted return: {}%",
        twr.round_dp(DISPLAY_DECIMAL_PRECISION)
    );

    // External transfers are the investor's actual contributions; without
    // them the trade flows stand in.
    let transfer_flows;
    let mwr_flows = if transfers.is_empty() {
        &trade_flows
    } else {
        transfer_flows = aggregate_daily_flows(&transfers);
        &transfer_flows
    };
    let mwr = compute_money_weighted(mwr_flows, terminal_value);
    tracing::info!(
        "Money-weighted return (XIRR): {}%",
        mwr.round_dp(DISPLAY_DECIMAL_PRECISION)
    );

    let portfolio_pct = cumulative_return_percent(&equity);
    let comparator = BenchmarkComparator::new(config.benchmark.symbol.clone());
    let benchmark_pct = comparator
        .compare(provider.as_ref(), first_date, as_of)
        .await
        .context("Failed to fetch the benchmark history")?;

    let summary = Summary {
        as_of,
        first_activity_date: first_date,
        time_weighted_return_pct: twr,
        money_weighted_return_pct: mwr,
        benchmark_symbol: comparator.symbol().to_string(),
        benchmark_return_pct: benchmark_pct.values().next_back().copied(),
    };
    report::write_reports(
        &config.output.dir,
        &equity,
        &trade_flows,
        &portfolio_pct,
        &benchmark_pct,
        &summary,
    )?;
    tracing::info!("Reports written to {}", config.output.dir.display());

    Ok(())
}

/// Transfer exports are optional: a missing `[transfers]` section or a
/// configured folder with no matching files both mean "no external flows".
fn load_transfers(config: &Config) -> anyhow::Result<Vec<Activity>> {
    let Some(source) = &config.transfers else {
        return Ok(Vec::new());
    };
    match import_transfer_activities(&source.folder, &source.patterns) {
        Ok(transfers) => {
            if transfers.is_empty() {
                tracing::info!(
                    "No completed transfers parsed; money-weighted return uses trade flows"
                );
            }
            Ok(transfers)
        }
        Err(Error::Activity(ActivityError::NoFilesMatched { .. })) => {
            tracing::info!("No transfer exports found; money-weighted return uses trade flows");
            Ok(Vec::new())
        }
        Err(e) => Err(e).context("Failed to import transfer exports"),
    }
}
