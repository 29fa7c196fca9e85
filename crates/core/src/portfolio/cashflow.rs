//! Daily cash-flow aggregation.

use rust_decimal::Decimal;

use crate::activities::Activity;

use super::series::DailySeries;

/// Net the signed cash amounts of `activities` per calendar date.
///
/// Time-of-day is dropped; a date appears in the result iff at least one
/// activity fell on it, so a gap means "no flow" rather than "zero flow".
/// Same-day flows that cancel exactly still produce a zero entry.
pub fn aggregate_daily_flows(activities: &[Activity]) -> DailySeries {
    let mut flows = DailySeries::new();
    for activity in activities {
        *flows.entry(activity.date()).or_insert(Decimal::ZERO) += activity.cash_flow;
    }
    flows
}
