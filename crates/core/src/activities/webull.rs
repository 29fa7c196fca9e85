//! Webull export parsers.
//!
//! Handles the two CSV exports Webull produces: order records (equities and
//! options, buys and sells) and transfer records (deposits and withdrawals).
//! Both yield [`Activity`] values with the signed cash-flow convention the
//! portfolio layer expects: capital into the account negative, capital out
//! positive.

use chrono::{NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use log::warn;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::{Activity, ActivityError, CsvBatch};

lazy_static! {
    /// Trailing timezone abbreviations ("09:30:01 EDT") the datetime
    /// formats cannot resolve.
    static ref TZ_SUFFIX_RE: Regex = Regex::new(r"\s+[A-Z]{2,4}$").expect("valid regex");
}

const DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d"];

/// Parse a Webull timestamp cell, stripping a trailing timezone token.
/// Date-only cells resolve to midnight.
pub(super) fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let cleaned = TZ_SUFFIX_RE.replace(raw.trim(), "");
    if cleaned.is_empty() {
        return None;
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(&cleaned, fmt) {
            return Some(ts);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&cleaned, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Parse a numeric cell, tolerating currency signs and thousands separators.
pub(super) fn parse_decimal(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ','))
        .collect();
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

fn cell<'r>(row: &'r [String], idx: Option<usize>) -> Option<&'r str> {
    let value = row.get(idx?)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Parser for Webull order-record exports.
///
/// Keeps only rows whose status contains "fill"; fill time falls back to
/// placed time, average price falls back to limit price, filled quantity
/// falls back to total quantity. Rows without a parseable timestamp or
/// price are dropped and counted in a warning.
pub struct WebullOrdersParser;

impl WebullOrdersParser {
    /// Parse all batches into activities sorted by timestamp.
    pub fn parse(batches: &[CsvBatch]) -> Result<Vec<Activity>, ActivityError> {
        let mut activities = Vec::new();
        for batch in batches {
            Self::parse_batch(batch, &mut activities)?;
        }
        activities.sort_by_key(|a| a.timestamp);
        Ok(activities)
    }

    fn parse_batch(batch: &CsvBatch, out: &mut Vec<Activity>) -> Result<(), ActivityError> {
        let symbol_col = batch
            .column("Symbol")
            .ok_or_else(|| ActivityError::MissingColumn {
                file: batch.source_file.clone(),
                column: "Symbol".to_string(),
            })?;
        let side_col = batch.column("Side");
        let status_col = batch.column("Status");
        let filled_qty_col = batch.column("Filled");
        let total_qty_col = batch.column("Total Qty");
        let price_col = batch.column("Price");
        let avg_price_col = batch.column("Avg Price");
        let placed_col = batch.column("Placed Time");
        let filled_time_col = batch.column("Filled Time");

        let mut dropped = 0usize;
        for row in &batch.rows {
            // Only filled orders move cash or shares.
            if let Some(status) = cell(row, status_col) {
                if !status.to_lowercase().contains("fill") {
                    continue;
                }
            }

            let timestamp = cell(row, filled_time_col)
                .and_then(parse_timestamp)
                .or_else(|| cell(row, placed_col).and_then(parse_timestamp));
            let price = cell(row, avg_price_col)
                .and_then(parse_decimal)
                .or_else(|| cell(row, price_col).and_then(parse_decimal));
            let (Some(timestamp), Some(price)) = (timestamp, price) else {
                dropped += 1;
                continue;
            };

            let quantity = cell(row, filled_qty_col)
                .and_then(parse_decimal)
                .or_else(|| cell(row, total_qty_col).and_then(parse_decimal))
                .unwrap_or(Decimal::ZERO);

            let is_sell = cell(row, side_col)
                .map(|s| s.trim().to_lowercase().starts_with("sell"))
                .unwrap_or(false);

            let symbol = cell(row, Some(symbol_col)).unwrap_or("").to_uppercase();
            let gross = price * quantity;
            let (signed_quantity, cash_flow) = if is_sell {
                (-quantity, gross)
            } else {
                (quantity, -gross)
            };

            out.push(Activity::trade(
                timestamp,
                symbol,
                signed_quantity,
                price,
                cash_flow,
                Some(batch.source_file.clone()),
            ));
        }

        if dropped > 0 {
            warn!(
                "{}: dropped {} filled rows without a parseable timestamp or price",
                batch.source_file, dropped
            );
        }
        Ok(())
    }
}

/// Parser for Webull transfer exports (deposits and withdrawals).
///
/// Only completed transfers count. A deposit funds the account, so its cash
/// flow is negative (capital invested); a withdrawal returns capital and is
/// positive.
pub struct WebullTransfersParser;

impl WebullTransfersParser {
    /// Parse all batches into transfer activities sorted by timestamp.
    pub fn parse(batches: &[CsvBatch]) -> Result<Vec<Activity>, ActivityError> {
        let mut activities = Vec::new();
        for batch in batches {
            Self::parse_batch(batch, &mut activities)?;
        }
        activities.sort_by_key(|a| a.timestamp);
        Ok(activities)
    }

    fn parse_batch(batch: &CsvBatch, out: &mut Vec<Activity>) -> Result<(), ActivityError> {
        let amount_col = batch
            .column("Amount")
            .ok_or_else(|| ActivityError::MissingColumn {
                file: batch.source_file.clone(),
                column: "Amount".to_string(),
            })?;
        let date_col = batch
            .column("Date")
            .or_else(|| batch.column("Completed Date"))
            .or_else(|| batch.column("Request Date"));
        let type_col = batch.column("Type").or_else(|| batch.column("Direction"));
        let status_col = batch.column("Status");

        let mut dropped = 0usize;
        for row in &batch.rows {
            if let Some(status) = cell(row, status_col) {
                let s = status.to_lowercase();
                if !(s.contains("complet") || s.contains("success")) {
                    continue;
                }
            }

            let timestamp = cell(row, date_col).and_then(parse_timestamp);
            let amount = cell(row, Some(amount_col)).and_then(parse_decimal);
            let (Some(timestamp), Some(amount)) = (timestamp, amount) else {
                dropped += 1;
                continue;
            };

            let is_withdrawal = cell(row, type_col)
                .map(|t| t.to_lowercase().contains("withdraw"))
                .unwrap_or(false);
            let cash_flow = if is_withdrawal {
                amount.abs()
            } else {
                -amount.abs()
            };

            out.push(Activity::transfer(
                timestamp,
                cash_flow,
                Some(batch.source_file.clone()),
            ));
        }

        if dropped > 0 {
            warn!(
                "{}: dropped {} completed transfers without a parseable date or amount",
                batch.source_file, dropped
            );
        }
        Ok(())
    }
}
