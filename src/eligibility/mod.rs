//! Eligibility policy for individual rehabilitation repayment plans
//!
//! Given a monetary snapshot, the policy:
//! 1. Derives the statutory living cost and the disposable monthly payment
//! 2. Searches for the shortest qualifying plan (36 to 60 months)
//! 3. When no plan qualifies, tries the adjustment tiers in priority order
//!    (dependents, living cost, asset value, income floor)
//! 4. Computes the reduction figures under the statutory floor and ceiling
//!
//! Infeasibility is reported in the result, never as an error.

mod adjustment;
mod config;
mod policy;
mod reduction;
mod result;

pub use adjustment::{AdjustedPlan, TierContext};
pub use config::EligibilityConfig;
pub use policy::EligibilityPolicy;
pub use reduction::final_reduction;
pub use result::{AdjustmentKind, CalculationResult};

use crate::case::MonetarySnapshot;

/// Evaluate raw figures under the default statutory regime.
///
/// Inputs are expected to be finite and non-negative; use
/// `MonetarySnapshot::validated` when they come from an untrusted source.
pub fn evaluate(
    total_debt: f64,
    monthly_income: f64,
    liquidation_value: f64,
    dependent_count: f64,
) -> CalculationResult {
    let snapshot = MonetarySnapshot {
        total_debt,
        monthly_income,
        liquidation_value,
        dependent_count,
    };
    EligibilityPolicy::default().evaluate(&snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_matches_policy() {
        let direct = evaluate(50_000_000.0, 2_500_000.0, 0.0, 1.0);
        let snapshot = MonetarySnapshot::validated(50_000_000.0, 2_500_000.0, 0.0, 1.0).unwrap();
        assert_eq!(direct, EligibilityPolicy::default().evaluate(&snapshot));
        assert_eq!(direct.repayment_period, 36);
    }
}
