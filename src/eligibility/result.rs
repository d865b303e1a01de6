//! Evaluation output

use serde::{Deserialize, Serialize};

/// Adjustment tier that turned an infeasible case into a feasible one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdjustmentKind {
    /// Fewer recognised dependents
    DependentCount,
    /// Lower living cost allowance
    LivingCost,
    /// Lower liquidation valuation
    AssetValue,
    /// Minimum income devoted to the plan
    IncomeFloor,
}

impl AdjustmentKind {
    /// Priority order in which tiers are attempted
    pub const PRIORITY: [AdjustmentKind; 4] = [
        AdjustmentKind::DependentCount,
        AdjustmentKind::LivingCost,
        AdjustmentKind::AssetValue,
        AdjustmentKind::IncomeFloor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentKind::DependentCount => "dependent_count",
            AdjustmentKind::LivingCost => "living_cost",
            AdjustmentKind::AssetValue => "asset_value",
            AdjustmentKind::IncomeFloor => "income_floor",
        }
    }
}

/// Reduction figures for one debtor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Share of total debt written off, in percent
    pub reduction_rate: f64,

    /// Amount written off
    pub reduction_amount: f64,

    /// Amount repaid over the plan
    pub repayment_amount: f64,

    /// Monthly plan payment
    pub monthly_payment: f64,

    /// Plan length in months
    pub repayment_period: u32,

    /// No plan covers the liquidation value, even after adjustments
    pub liquidation_value_violation: bool,

    /// The figures rely on an adjustment that needs professional review
    pub needs_consultation: bool,

    /// Human-readable description of the adjustment applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consultation_reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_adjustment: Option<AdjustmentKind>,
}

impl CalculationResult {
    /// Outcome when no plan in range can cover the liquidation value
    pub fn infeasible(monthly_payment: f64, max_months: u32) -> Self {
        Self {
            reduction_rate: 0.0,
            reduction_amount: 0.0,
            repayment_amount: 0.0,
            monthly_payment,
            repayment_period: max_months,
            liquidation_value_violation: true,
            needs_consultation: false,
            consultation_reason: None,
            applied_adjustment: None,
        }
    }
}
