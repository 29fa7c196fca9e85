//! Position tracking from signed quantity events.

use std::collections::BTreeMap;
use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::activities::Activity;

use super::series::DailySeries;

/// Cumulative signed position per symbol per event date.
///
/// `activities` must be sorted by timestamp (the import service guarantees
/// this). For each symbol, the running quantity total is snapshotted at the
/// last event of every date the symbol traded on; dates in between carry no
/// entry here — forward-filling across the full index is the equity-curve
/// builder's job. Pure cash transfers carry no symbol and no position.
pub fn track_positions(activities: &[Activity]) -> BTreeMap<String, DailySeries> {
    let mut running: HashMap<&str, Decimal> = HashMap::new();
    let mut positions: BTreeMap<String, DailySeries> = BTreeMap::new();

    for activity in activities {
        if activity.is_transfer() {
            continue;
        }
        let total = running.entry(activity.symbol.as_str()).or_insert(Decimal::ZERO);
        *total += activity.quantity;
        positions
            .entry(activity.symbol.clone())
            .or_default()
            .insert(activity.date(), *total);
    }

    positions
}
