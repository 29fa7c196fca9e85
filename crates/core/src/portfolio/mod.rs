//! Portfolio module - cash flows, positions, valuation, and returns.

mod cashflow;
mod holdings;
mod performance;
mod series;
mod valuation;


#[cfg(test)]
mod valuation_tests;

pub use cashflow::aggregate_daily_flows;
pub use holdings::track_positions;
pub use performance::{compute_money_weighted, compute_time_weighted, cumulative_return_percent};
pub use series::{cumulative_sum, forward_fill, union_dates, DailySeries};
pub use valuation::{build_equity_curve, EquityCurveService};
