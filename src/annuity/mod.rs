//! Annuity engine: present value of level monthly payments and the
//! minimum qualifying repayment period search

mod present_value;
mod period;

pub use present_value::{AnnuityEngine, AnnuityConfig, monthly_rate_from_annual};
pub use period::RepaymentPeriod;

// ============================================================================
// Statutory Defaults
// ============================================================================
// The statutory discount rate is 5% per annum, converted to an equivalent
// monthly compounding rate. Plans run between 3 and 5 years.

/// Default annual statutory discount rate (5%)
pub const DEFAULT_ANNUAL_RATE: f64 = 0.05;

/// Shortest allowed repayment plan in months
pub const DEFAULT_MIN_MONTHS: u32 = 36;

/// Longest allowed repayment plan in months
pub const DEFAULT_MAX_MONTHS: u32 = 60;
