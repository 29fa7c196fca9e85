//! Brokerage symbol normalization.
//!
//! Trade exports carry symbols in the broker's own notation. Before asking a
//! quote provider for history, symbols are normalized to provider notation;
//! symbols with no provider representation (OCC-style option contracts)
//! normalize to `None` and are excluded from pricing.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// OCC-style option symbols, e.g. TSLA250613P00360000:
    /// root + 6-digit expiry + C/P + 8-digit strike.
    static ref OCC_OPTION_RE: Regex = Regex::new(r"\d{6}[CP]\d{8}$").expect("valid regex");
}

/// Normalize a brokerage symbol to provider notation.
///
/// Returns `None` for symbols that cannot be priced (option contracts).
/// Crypto tickers quoted as a fused pair are mapped to the dash notation
/// quote providers use.
pub fn normalize_symbol(symbol: &str) -> Option<String> {
    let s = symbol.trim().to_uppercase();

    if s.is_empty() || OCC_OPTION_RE.is_match(&s) {
        return None;
    }

    let mapped = match s.as_str() {
        "BTCUSD" => "BTC-USD",
        "ETHUSD" => "ETH-USD",
        "SHIBUSD" => "SHIB-USD",
        "DOGEUSD" => "DOGE-USD",
        other => other,
    };

    Some(mapped.to_string())
}
