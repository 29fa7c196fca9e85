//! Core error types for the profitfolio pipeline.
//!
//! Calculation functions themselves return defined degenerate values instead
//! of errors (an equity curve with fewer than two points yields a zero
//! return, an unpriceable symbol is excluded from valuation); the error
//! types here cover import and collaborator failures that the pipeline
//! cannot sensibly absorb.

use thiserror::Error;

use crate::activities::ActivityError;
use profitfolio_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the analytics pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Activity error: {0}")]
    Activity(#[from] ActivityError),
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}
