//! Monetary snapshot of a debtor at the time of evaluation

use serde::{Deserialize, Serialize};

use crate::error::{RehabError, Result};

/// Inputs to one evaluation. All amounts share one currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonetarySnapshot {
    /// Total outstanding unsecured debt
    pub total_debt: f64,

    /// Monthly income available before living costs
    pub monthly_income: f64,

    /// Forced-liquidation value of the debtor's assets
    pub liquidation_value: f64,

    /// Household size used for the living cost allowance (fractional
    /// values model partially recognised dependents)
    pub dependent_count: f64,
}

impl MonetarySnapshot {
    /// Build a snapshot from raw caller values, rejecting anything the
    /// calculation is not defined for.
    ///
    /// A dependent count below 1 is raised to 1.
    pub fn validated(
        total_debt: f64,
        monthly_income: f64,
        liquidation_value: f64,
        dependent_count: f64,
    ) -> Result<Self> {
        check_amount("total_debt", total_debt)?;
        check_amount("monthly_income", monthly_income)?;
        check_amount("liquidation_value", liquidation_value)?;
        if !dependent_count.is_finite() {
            return Err(RehabError::invalid("dependent_count", "must be a finite number"));
        }

        Ok(Self {
            total_debt,
            monthly_income,
            liquidation_value,
            dependent_count: dependent_count.max(1.0),
        })
    }

    /// Dependent count used in every computation (never below 1)
    pub fn effective_dependents(&self) -> f64 {
        self.dependent_count.max(1.0)
    }
}

fn check_amount(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(RehabError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(RehabError::invalid(field, format!("must not be negative, got {}", value)));
    }
    Ok(())
}

/// A snapshot tagged with the caller's case identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub case_id: String,
    pub snapshot: MonetarySnapshot,
}
