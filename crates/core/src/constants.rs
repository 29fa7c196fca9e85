//! Shared constants for calculations.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Decimal precision for valuation and return calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Annualization basis: actual days over 365.25
pub const DAYS_PER_YEAR: Decimal = dec!(365.25);

/// Lower edge of the IRR bisection bracket
pub const IRR_BRACKET_LOW: Decimal = dec!(-0.9999);

/// Upper edge of the IRR bisection bracket
pub const IRR_BRACKET_HIGH: Decimal = dec!(10.0);

/// Iteration budget for the IRR bisection
pub const IRR_MAX_ITERATIONS: u32 = 100;

/// Convergence tolerance on |NPV| for the IRR bisection
pub const IRR_NPV_TOLERANCE: Decimal = dec!(0.00000001);
