//! Present value of a level stream of monthly plan payments
//!
//! Payments are made at the end of each month and discounted at the monthly
//! equivalent of the annual statutory rate:
//!
//! ```text
//! r  = (1 + annual_rate)^(1/12) - 1
//! PV = sum_{t=1..n} P / (1 + r)^t
//! ```

use serde::{Deserialize, Serialize};

use super::{DEFAULT_ANNUAL_RATE, DEFAULT_MAX_MONTHS, DEFAULT_MIN_MONTHS};

/// Discount rate and allowed plan length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnuityConfig {
    /// Annual statutory discount rate (0.05 = 5%)
    pub annual_rate: f64,

    /// Shortest plan the court accepts
    pub min_months: u32,

    /// Longest plan the court accepts
    pub max_months: u32,
}

impl Default for AnnuityConfig {
    fn default() -> Self {
        Self {
            annual_rate: DEFAULT_ANNUAL_RATE,
            min_months: DEFAULT_MIN_MONTHS,
            max_months: DEFAULT_MAX_MONTHS,
        }
    }
}

/// Convert an annual effective rate into the equivalent monthly rate
pub fn monthly_rate_from_annual(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / 12.0) - 1.0
}

/// Present value arithmetic over a fixed statutory rate
#[derive(Debug, Clone)]
pub struct AnnuityEngine {
    pub(super) config: AnnuityConfig,
    monthly_rate: f64,
}

impl AnnuityEngine {
    pub fn new(config: AnnuityConfig) -> Self {
        let monthly_rate = monthly_rate_from_annual(config.annual_rate);
        Self { config, monthly_rate }
    }

    pub fn config(&self) -> &AnnuityConfig {
        &self.config
    }

    /// Monthly discount rate derived from the annual statutory rate
    pub fn monthly_rate(&self) -> f64 {
        self.monthly_rate
    }

    /// Present value of `months` end-of-month payments of `monthly_payment`.
    ///
    /// Returns 0 for a non-positive payment or a zero-length plan.
    pub fn present_value(&self, monthly_payment: f64, months: u32) -> f64 {
        if monthly_payment <= 0.0 || months == 0 {
            return 0.0;
        }

        (1..=months)
            .map(|t| monthly_payment / (1.0 + self.monthly_rate).powi(t as i32))
            .sum()
    }

    /// Present value of the payment for every plan length in the allowed range
    pub fn schedule(&self, monthly_payment: f64) -> Vec<(u32, f64)> {
        (self.config.min_months..=self.config.max_months)
            .map(|m| (m, self.present_value(monthly_payment, m)))
            .collect()
    }
}

impl Default for AnnuityEngine {
    fn default() -> Self {
        Self::new(AnnuityConfig::default())
    }
}
