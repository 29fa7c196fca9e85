//! Market data provider trait definitions.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::MarketDataError;
use crate::models::Quote;

/// Trait for daily price history providers.
///
/// Implement this trait to add support for a new market data source.
/// Implementations must return quotes in ascending timestamp order with at
/// most one quote per calendar date.
#[async_trait]
pub trait QuoteHistoryProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "YAHOO". Used for logging and as the
    /// `source` field on returned quotes.
    fn id(&self) -> &'static str;

    /// Fetch daily closing quotes for a symbol over `[start, end]` inclusive.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The brokerage symbol as it appears in the trade export
    /// * `start` - Start of the date range (inclusive)
    /// * `end` - End of the date range (inclusive)
    ///
    /// # Returns
    ///
    /// Quotes ordered by timestamp ascending. An empty vector means the
    /// symbol is not priceable by this provider (e.g. an option contract);
    /// that is a valid outcome, not an error.
    async fn history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Quote>, MarketDataError>;
}
