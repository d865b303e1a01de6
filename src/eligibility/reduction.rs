//! Final reduction figures for a feasible plan

use crate::annuity::AnnuityEngine;

use super::config::EligibilityConfig;
use super::result::CalculationResult;

/// Compute repayment and reduction for a plan of `period` months.
///
/// Repayment is the plan's present value bounded by the liquidation value
/// below and the total debt above, then raised to the statutory minimum.
/// The reduction rate is capped at the statutory ceiling with both amounts
/// restated from the capped rate.
pub fn final_reduction(
    config: &EligibilityConfig,
    engine: &AnnuityEngine,
    total_debt: f64,
    monthly_payment: f64,
    period: u32,
    liquidation_value: f64,
) -> CalculationResult {
    let plan_value = engine.present_value(monthly_payment, period);

    // Liquidation value can exceed total debt, so no f64::clamp here
    let mut repayment_amount = plan_value.max(liquidation_value).min(total_debt);

    let minimum_repayment = config.minimum_repayment(total_debt);
    if repayment_amount < minimum_repayment {
        log::debug!(
            "Repayment {:.0} raised to statutory minimum {:.0}",
            repayment_amount,
            minimum_repayment
        );
        repayment_amount = minimum_repayment;
    }

    let mut reduction_amount = total_debt - repayment_amount;
    let mut reduction_rate = if total_debt > 0.0 {
        100.0 * reduction_amount / total_debt
    } else {
        0.0
    };

    if reduction_rate > config.max_reduction_rate {
        reduction_rate = config.max_reduction_rate;
        reduction_amount = total_debt * reduction_rate / 100.0;
        repayment_amount = total_debt - reduction_amount;
    }

    CalculationResult {
        reduction_rate: reduction_rate.max(0.0),
        reduction_amount: reduction_amount.max(0.0),
        repayment_amount,
        monthly_payment,
        repayment_period: period,
        liquidation_value_violation: false,
        needs_consultation: false,
        consultation_reason: None,
        applied_adjustment: None,
    }
}
