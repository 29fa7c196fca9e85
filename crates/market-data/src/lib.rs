//! Profitfolio Market Data Crate
//!
//! Provider-agnostic daily price history fetching for the profitfolio
//! analytics pipeline.
//!
//! # Overview
//!
//! The crate exposes one narrow contract: given a brokerage symbol and a date
//! range, return an ascending series of daily closing quotes, with at most one
//! quote per calendar date. Symbols the provider cannot price (OCC option
//! contracts, unmapped instruments) resolve to an empty history rather than an
//! error, so the valuation layer can exclude them from mark-to-market.
//!
//! # Core Types
//!
//! - [`Quote`] - a single dated closing price
//! - [`QuoteHistoryProvider`] - the provider trait
//! - [`YahooProvider`] - Yahoo Finance implementation
//! - [`MarketDataError`] - error taxonomy for provider operations

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::Quote;
pub use provider::symbol::normalize_symbol;
pub use provider::yahoo::YahooProvider;
pub use provider::QuoteHistoryProvider;
