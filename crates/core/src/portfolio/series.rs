//! Date-keyed value series.
//!
//! Every table in the pipeline (daily cash flows, per-symbol positions,
//! per-symbol prices, the equity curve) is a sorted mapping from calendar
//! date to a decimal value. `BTreeMap` gives deterministic ascending
//! iteration, which keeps every downstream computation reproducible.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Sorted mapping from calendar date to value.
pub type DailySeries = std::collections::BTreeMap<NaiveDate, Decimal>;

/// Ascending union of the date keys of several series.
pub fn union_dates<'a, I>(series: I) -> Vec<NaiveDate>
where
    I: IntoIterator<Item = &'a DailySeries>,
{
    let mut dates = BTreeSet::new();
    for s in series {
        dates.extend(s.keys().copied());
    }
    dates.into_iter().collect()
}

/// Align `series` onto `index`, carrying the last known value forward.
///
/// For each index date the result holds the series value at the latest
/// series date on or before it. Index dates before the first observation
/// get `leading` if one is given, and are omitted otherwise (an unpriced
/// leading gap stays a gap; an unopened position is zero).
///
/// `index` must be ascending; `union_dates` output qualifies.
pub fn forward_fill(
    series: &DailySeries,
    index: &[NaiveDate],
    leading: Option<Decimal>,
) -> DailySeries {
    let mut filled = DailySeries::new();
    let mut observations = series.iter().peekable();
    let mut last: Option<Decimal> = None;

    for date in index {
        while let Some((obs_date, value)) = observations.peek() {
            if **obs_date <= *date {
                last = Some(**value);
                observations.next();
            } else {
                break;
            }
        }
        match (last, leading) {
            (Some(value), _) => {
                filled.insert(*date, value);
            }
            (None, Some(default)) => {
                filled.insert(*date, default);
            }
            (None, None) => {}
        }
    }

    filled
}

/// Running total of a series, in date order.
pub fn cumulative_sum(series: &DailySeries) -> DailySeries {
    let mut total = Decimal::ZERO;
    series
        .iter()
        .map(|(date, value)| {
            total += *value;
            (*date, total)
        })
        .collect()
}
