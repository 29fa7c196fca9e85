//! Daily mark-to-market equity curve construction.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::join_all;
use log::{debug, warn};
use rust_decimal::Decimal;

use profitfolio_market_data::QuoteHistoryProvider;

use crate::activities::Activity;
use crate::errors::{Result, ValidationError};

use super::cashflow::aggregate_daily_flows;
use super::holdings::track_positions;
use super::series::{cumulative_sum, forward_fill, union_dates, DailySeries};

/// Build the daily total portfolio value series from activities and
/// pre-fetched per-symbol daily close prices.
///
/// With no priced symbols at all, the curve degrades to the cumulative sum
/// of the daily cash flows: cost basis in, proceeds out, no market movement.
/// Otherwise the result covers the union of all position and price dates;
/// positions are carried forward (zero before a symbol's first trade), and
/// a symbol contributes `position x last known close`. Days before a
/// symbol's first quote contribute nothing for that symbol — an unpriced
/// holding (e.g. an option contract the provider declined) is simply
/// invisible to the mark-to-market value.
pub fn build_equity_curve(
    activities: &[Activity],
    priced: &BTreeMap<String, DailySeries>,
) -> DailySeries {
    if priced.is_empty() {
        return cumulative_sum(&aggregate_daily_flows(activities));
    }

    let positions = track_positions(activities);
    let index = union_dates(positions.values().chain(priced.values()));

    let filled_positions: BTreeMap<&str, DailySeries> = positions
        .iter()
        .map(|(symbol, series)| {
            (
                symbol.as_str(),
                forward_fill(series, &index, Some(Decimal::ZERO)),
            )
        })
        .collect();
    let filled_prices: BTreeMap<&str, DailySeries> = priced
        .iter()
        .map(|(symbol, series)| (symbol.as_str(), forward_fill(series, &index, None)))
        .collect();

    let mut equity = DailySeries::new();
    for date in &index {
        let mut total = Decimal::ZERO;
        for (symbol, position_series) in &filled_positions {
            let quantity = position_series
                .get(date)
                .copied()
                .unwrap_or(Decimal::ZERO);
            if quantity.is_zero() {
                continue;
            }
            if let Some(price) = filled_prices.get(symbol).and_then(|s| s.get(date)) {
                total += quantity * *price;
            }
        }
        equity.insert(*date, total);
    }

    equity
}

/// Drives the price-history provider and hands the results to
/// [`build_equity_curve`].
pub struct EquityCurveService {
    provider: Arc<dyn QuoteHistoryProvider>,
}

impl EquityCurveService {
    pub fn new(provider: Arc<dyn QuoteHistoryProvider>) -> Self {
        Self { provider }
    }

    /// Daily portfolio value from the first activity date through `as_of`.
    ///
    /// Every distinct symbol gets one history request. Symbols the provider
    /// cannot price (empty history, unknown symbol, no data in range) are
    /// excluded from valuation; any other provider failure aborts the build.
    pub async fn daily_equity(
        &self,
        activities: &[Activity],
        as_of: NaiveDate,
    ) -> Result<DailySeries> {
        let start = activities
            .iter()
            .map(|a| a.date())
            .min()
            .ok_or_else(|| ValidationError::InvalidInput("no activities to value".to_string()))?;

        let symbols: Vec<&str> = activities
            .iter()
            .filter(|a| !a.is_transfer())
            .map(|a| a.symbol.as_str())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();

        let fetches = symbols.iter().map(|symbol| {
            let provider = Arc::clone(&self.provider);
            async move { (*symbol, provider.history(symbol, start, as_of).await) }
        });

        let mut priced: BTreeMap<String, DailySeries> = BTreeMap::new();
        for (symbol, result) in join_all(fetches).await {
            match result {
                Ok(quotes) if quotes.is_empty() => {
                    debug!("Symbol {} returned no price data, excluded from valuation", symbol);
                }
                Ok(quotes) => {
                    let series: DailySeries = quotes
                        .into_iter()
                        .map(|q| (q.timestamp.date_naive(), q.close))
                        .collect();
                    priced.insert(symbol.to_string(), series);
                }
                Err(e) if e.is_unpriceable() => {
                    debug!("Symbol {} is unpriceable ({}), excluded from valuation", symbol, e);
                }
                Err(e) => return Err(e.into()),
            }
        }

        if priced.is_empty() {
            warn!("No priceable symbols; equity curve falls back to cumulative cash flows");
        }

        Ok(build_equity_curve(activities, &priced))
    }
}
