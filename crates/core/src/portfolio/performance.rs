//! Time-weighted and money-weighted return calculation.
//!
//! Both calculators are pure functions over caller-owned series and report
//! degenerate inputs through defined sentinel results (`Decimal::ZERO`)
//! rather than errors: an equity curve needs at least two points to have a
//! return, and an IRR needs at least two dated flows to discount.

use chrono::Duration;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::constants::{
    DAYS_PER_YEAR, DECIMAL_PRECISION, IRR_BRACKET_HIGH, IRR_BRACKET_LOW, IRR_MAX_ITERATIONS,
    IRR_NPV_TOLERANCE,
};

use super::series::DailySeries;

const HUNDRED: Decimal = dec!(100);
const TWO: Decimal = dec!(2);

/// Time-weighted return over an equity curve, in percent.
///
/// Compounds the daily value ratios: `(prod(equity[i] / equity[i-1]) - 1) x 100`.
/// A curve with fewer than two points yields zero; a period starting from a
/// zero value contributes no growth (the ratio is undefined, not infinite).
pub fn compute_time_weighted(equity_curve: &DailySeries) -> Decimal {
    if equity_curve.len() < 2 {
        return Decimal::ZERO;
    }

    let mut growth = Decimal::ONE;
    let mut prev: Option<Decimal> = None;
    for value in equity_curve.values() {
        if let Some(base) = prev {
            let period_return = if base.is_zero() {
                Decimal::ZERO
            } else {
                *value / base - Decimal::ONE
            };
            growth *= Decimal::ONE + period_return;
        }
        prev = Some(*value);
    }

    ((growth - Decimal::ONE) * HUNDRED).round_dp(DECIMAL_PRECISION)
}

/// Money-weighted return (XIRR) over dated cash flows, in percent.
///
/// The terminal portfolio value is appended as a synthetic inflow one day
/// after the last observed flow, then the internal rate of return is solved
/// by bisection. An empty flow series yields zero.
pub fn compute_money_weighted(cash_flows: &DailySeries, terminal_value: Decimal) -> Decimal {
    let Some((&last_date, _)) = cash_flows.iter().next_back() else {
        return Decimal::ZERO;
    };

    let mut flows = cash_flows.clone();
    flows.insert(last_date + Duration::days(1), terminal_value);

    (solve_irr(&flows) * HUNDRED).round_dp(DECIMAL_PRECISION)
}

/// Cumulative compounded return of an equity curve, in percent per date.
///
/// The first date anchors at zero; subsequent dates compound the daily
/// ratios. Used for plotting the portfolio against a benchmark on the same
/// percentage axis.
pub fn cumulative_return_percent(equity_curve: &DailySeries) -> DailySeries {
    let mut out = DailySeries::new();
    let mut cumulative = Decimal::ONE;
    let mut prev: Option<Decimal> = None;
    for (date, value) in equity_curve {
        if let Some(base) = prev {
            let period_return = if base.is_zero() {
                Decimal::ZERO
            } else {
                *value / base - Decimal::ONE
            };
            cumulative *= Decimal::ONE + period_return;
        }
        out.insert(*date, ((cumulative - Decimal::ONE) * HUNDRED).round_dp(DECIMAL_PRECISION));
        prev = Some(*value);
    }
    out
}

/// Annualized IRR of dated flows via bisection, as a rate (0.10 = 10%).
///
/// Discounts on an actual/365.25 basis from the earliest flow date. The
/// bracket assumes NPV decreases monotonically in the rate, which holds
/// whenever the flows contain at least one investment (negative) and the
/// terminal inflow dominates. Without a sign change in the bracket the loop
/// still terminates after its iteration budget and returns the final
/// midpoint; that value is an accepted approximation, not a root.
fn solve_irr(flows: &DailySeries) -> Decimal {
    if flows.len() < 2 {
        return Decimal::ZERO;
    }

    let first_date = *flows.keys().next().expect("non-empty flows");
    let entries: Vec<(Decimal, Decimal)> = flows
        .iter()
        .map(|(date, amount)| {
            let days = (*date - first_date).num_days();
            (Decimal::from(days) / DAYS_PER_YEAR, *amount)
        })
        .collect();

    let mut low = IRR_BRACKET_LOW;
    let mut high = IRR_BRACKET_HIGH;
    let mut mid = (low + high) / TWO;
    for _ in 0..IRR_MAX_ITERATIONS {
        mid = (low + high) / TWO;
        let value = npv(mid, &entries);
        if value.abs() < IRR_NPV_TOLERANCE {
            return mid;
        }
        if value > Decimal::ZERO {
            low = mid;
        } else {
            high = mid;
        }
    }
    mid
}

fn npv(rate: Decimal, entries: &[(Decimal, Decimal)]) -> Decimal {
    let base = Decimal::ONE + rate;
    entries
        .iter()
        .map(|(years, amount)| *amount / base.powd(*years))
        .sum()
}
