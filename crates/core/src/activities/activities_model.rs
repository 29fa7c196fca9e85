use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One resolved trade fill or external cash transfer.
///
/// Sign convention: `cash_flow` is opposite to the capital direction, so an
/// outflow (buy, deposit into the account) is negative and an inflow (sell
/// proceeds, withdrawal) is positive. Activities are immutable once parsed.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,

    /// Fill or settlement time, broker-local, timezone suffix stripped.
    pub timestamp: NaiveDateTime,

    /// Broker symbol; empty for pure cash transfers.
    pub symbol: String,

    /// Signed quantity delta (buys positive, sells negative).
    pub quantity: Decimal,

    /// Execution price per unit; zero for transfers.
    pub unit_price: Decimal,

    /// Signed net cash amount for this activity.
    pub cash_flow: Decimal,

    /// Export file this activity was parsed from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

impl Activity {
    /// A trade fill.
    pub fn trade(
        timestamp: NaiveDateTime,
        symbol: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
        cash_flow: Decimal,
        source_file: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp,
            symbol: symbol.into(),
            quantity,
            unit_price,
            cash_flow,
            source_file,
        }
    }

    /// An external cash transfer (deposit or withdrawal), no position effect.
    pub fn transfer(
        timestamp: NaiveDateTime,
        cash_flow: Decimal,
        source_file: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp,
            symbol: String::new(),
            quantity: Decimal::ZERO,
            unit_price: Decimal::ZERO,
            cash_flow,
            source_file,
        }
    }

    /// Calendar date of the activity, time-of-day dropped.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// True for pure cash transfers that carry no symbol.
    pub fn is_transfer(&self) -> bool {
        self.symbol.is_empty()
    }
}
