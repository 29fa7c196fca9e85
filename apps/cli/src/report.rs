//! CSV and JSON report writers.
//!
//! The analysis run leaves four artifacts in the output directory:
//! `equity_curve.csv`, `cash_flows.csv`, `portfolio_vs_benchmark.csv` and
//! `summary.json`. Dates are ISO, values full-precision decimals.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use profitfolio_core::portfolio::DailySeries;

/// Scalar results of one analysis run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub as_of: NaiveDate,
    pub first_activity_date: NaiveDate,
    pub time_weighted_return_pct: Decimal,
    pub money_weighted_return_pct: Decimal,
    pub benchmark_symbol: String,
    /// Benchmark cumulative return over the same span; absent when the
    /// benchmark could not be priced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark_return_pct: Option<Decimal>,
}

pub fn write_reports(
    dir: &Path,
    equity_curve: &DailySeries,
    cash_flows: &DailySeries,
    portfolio_pct: &DailySeries,
    benchmark_pct: &DailySeries,
    summary: &Summary,
) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)?;

    write_series(&dir.join("equity_curve.csv"), "value", equity_curve)?;
    write_series(&dir.join("cash_flows.csv"), "amount", cash_flows)?;
    write_comparison(
        &dir.join("portfolio_vs_benchmark.csv"),
        portfolio_pct,
        benchmark_pct,
    )?;

    let file = std::fs::File::create(dir.join("summary.json"))?;
    serde_json::to_writer_pretty(file, summary)?;

    Ok(())
}

fn write_series(path: &Path, value_header: &str, series: &DailySeries) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["date", value_header])?;
    for (date, value) in series {
        writer.write_record([date.to_string(), value.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Outer-join the two percentage series on date; a side with no value that
/// day leaves its cell empty.
fn write_comparison(
    path: &Path,
    portfolio_pct: &DailySeries,
    benchmark_pct: &DailySeries,
) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["date", "portfolio_pct", "benchmark_pct"])?;

    let dates: BTreeSet<NaiveDate> = portfolio_pct
        .keys()
        .chain(benchmark_pct.keys())
        .copied()
        .collect();
    for date in dates {
        let portfolio = portfolio_pct
            .get(&date)
            .map(|v| v.to_string())
            .unwrap_or_default();
        let benchmark = benchmark_pct
            .get(&date)
            .map(|v| v.to_string())
            .unwrap_or_default();
        writer.write_record([date.to_string(), portfolio, benchmark])?;
    }
    writer.flush()?;
    Ok(())
}
