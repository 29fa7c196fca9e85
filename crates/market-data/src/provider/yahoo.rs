//! Yahoo Finance market data provider.
//!
//! Fetches daily closing quotes for equities/ETFs (e.g. AAPL, VTI) and
//! cryptocurrencies (e.g. BTC-USD) through the Yahoo Finance API.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use time::OffsetDateTime;
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::symbol::normalize_symbol;
use crate::provider::traits::QuoteHistoryProvider;

const PROVIDER_ID: &str = "YAHOO";

/// Yahoo Finance daily history provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to initialize Yahoo connector: {}", e),
            })?;
        Ok(Self { connector })
    }

    fn date_to_offset_datetime(date: NaiveDate, end_of_day: bool) -> OffsetDateTime {
        let (h, m, s) = if end_of_day { (23, 59, 59) } else { (0, 0, 0) };
        let naive = date
            .and_hms_opt(h, m, s)
            .expect("valid wall-clock time")
            .and_utc();
        OffsetDateTime::from_unix_timestamp(naive.timestamp())
            .unwrap_or_else(|_| OffsetDateTime::now_utc())
    }

    /// Convert a Yahoo quote to our Quote model.
    fn yahoo_quote_to_quote(yahoo_quote: yahoo::Quote) -> Result<Quote, MarketDataError> {
        let timestamp: DateTime<Utc> = Utc
            .timestamp_opt(yahoo_quote.timestamp as i64, 0)
            .single()
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("Invalid timestamp: {}", yahoo_quote.timestamp),
            })?;

        let close = Decimal::from_f64_retain(yahoo_quote.close).ok_or_else(|| {
            MarketDataError::ValidationFailed {
                message: format!(
                    "Failed to convert close price {} to Decimal",
                    yahoo_quote.close
                ),
            }
        })?;

        // Webull exports are USD-denominated, as is everything we price here.
        Ok(Quote::new(
            timestamp,
            close,
            "USD".to_string(),
            PROVIDER_ID.to_string(),
        ))
    }
}

#[async_trait]
impl QuoteHistoryProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Quote>, MarketDataError> {
        let normalized = match normalize_symbol(symbol) {
            Some(s) => s,
            None => {
                debug!("Symbol {} is not priceable, returning empty history", symbol);
                return Ok(vec![]);
            }
        };

        debug!(
            "Fetching historical quotes for {} ({}) from {} to {} from Yahoo",
            symbol, normalized, start, end
        );

        let start_time = Self::date_to_offset_datetime(start, false);
        let end_time = Self::date_to_offset_datetime(end, true);

        let response = self
            .connector
            .get_quote_history(&normalized, start_time, end_time)
            .await
            .map_err(|e| {
                if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
                    MarketDataError::SymbolNotFound(normalized.clone())
                } else {
                    MarketDataError::ProviderError {
                        provider: PROVIDER_ID.to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        let yahoo_quotes = match response.quotes() {
            Ok(quotes) => quotes,
            Err(yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) => {
                return Err(MarketDataError::SymbolNotFound(normalized));
            }
            Err(e) => {
                return Err(MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: e.to_string(),
                });
            }
        };

        let mut quotes: Vec<Quote> = yahoo_quotes
            .into_iter()
            .filter_map(|q| match Self::yahoo_quote_to_quote(q) {
                Ok(quote) => Some(quote),
                Err(e) => {
                    warn!("Skipping quote due to conversion error: {:?}", e);
                    None
                }
            })
            .collect();

        if quotes.is_empty() {
            return Err(MarketDataError::NoDataForRange);
        }

        // Enforce the contract: ascending order, at most one quote per date.
        quotes.sort_by_key(|q| q.timestamp);
        quotes.dedup_by_key(|q| q.timestamp.date_naive());

        Ok(quotes)
    }
}
