//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur during market data operations.
///
/// `SymbolNotFound` and `NoDataForRange` are soft failures: callers that
/// build valuations treat them as "exclude this symbol" rather than aborting
/// the whole computation.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The symbol exists but has no quotes in the requested period.
    #[error("No data for date range")]
    NoDataForRange,

    /// A provider-specific error occurred (network failure, malformed
    /// response, authentication).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider returned data that failed validation checks.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },
}

impl MarketDataError {
    /// True when the error means "this symbol cannot be priced" rather than
    /// "the fetch itself failed". Unpriceable symbols are skipped during
    /// valuation instead of failing it.
    pub fn is_unpriceable(&self) -> bool {
        matches!(
            self,
            MarketDataError::SymbolNotFound(_) | MarketDataError::NoDataForRange
        )
    }
}
