//! Benchmark comparison.
//!
//! Expresses a reference symbol's close history as a cumulative percentage
//! return anchored at the first close of the range, so it can sit on the
//! same axis as the portfolio's cumulative return series.

use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;

use profitfolio_market_data::QuoteHistoryProvider;

use crate::constants::DECIMAL_PRECISION;
use crate::errors::Result;
use crate::portfolio::DailySeries;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Compares portfolio performance against a reference symbol.
pub struct BenchmarkComparator {
    symbol: String,
}

impl BenchmarkComparator {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Cumulative % return of the benchmark close over `[start, end]`.
    ///
    /// An unpriceable benchmark yields an empty series rather than an
    /// error; comparison is a reporting concern, not a pipeline gate.
    pub async fn compare(
        &self,
        provider: &dyn QuoteHistoryProvider,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<DailySeries> {
        let quotes = match provider.history(&self.symbol, start, end).await {
            Ok(quotes) => quotes,
            Err(e) if e.is_unpriceable() => {
                warn!("Benchmark {} has no price data: {}", self.symbol, e);
                return Ok(DailySeries::new());
            }
            Err(e) => return Err(e.into()),
        };

        let Some(first_close) = quotes.first().map(|q| q.close) else {
            return Ok(DailySeries::new());
        };
        if first_close.is_zero() {
            warn!("Benchmark {} opens at a zero close, skipping comparison", self.symbol);
            return Ok(DailySeries::new());
        }

        Ok(quotes
            .iter()
            .map(|q| {
                let return_pct = ((q.close / first_close - Decimal::ONE) * HUNDRED)
                    .round_dp(DECIMAL_PRECISION);
                (q.timestamp.date_naive(), return_pct)
            })
            .collect())
    }
}
