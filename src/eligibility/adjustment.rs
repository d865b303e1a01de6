//! Adjustment tiers for cases with no qualifying plan
//!
//! Each tier is a pure function of the baseline figures that either proposes
//! an adjusted plan or declines. The policy tries them in
//! `AdjustmentKind::PRIORITY` order and keeps the first proposal.

use crate::annuity::{AnnuityEngine, RepaymentPeriod};
use crate::case::MonetarySnapshot;

use super::config::EligibilityConfig;
use super::result::AdjustmentKind;

/// Baseline figures shared by every tier
#[derive(Debug, Clone)]
pub struct TierContext<'a> {
    pub config: &'a EligibilityConfig,
    pub engine: &'a AnnuityEngine,
    pub snapshot: &'a MonetarySnapshot,
    /// Living cost for the declared dependent count
    pub living_cost: f64,
    /// Unadjusted monthly payment
    pub monthly_payment: f64,
    /// Present value of the unadjusted payment over the longest plan
    pub pv_full_term: f64,
}

impl<'a> TierContext<'a> {
    pub fn new(
        config: &'a EligibilityConfig,
        engine: &'a AnnuityEngine,
        snapshot: &'a MonetarySnapshot,
        living_cost: f64,
        monthly_payment: f64,
    ) -> Self {
        let pv_full_term = engine.present_value(monthly_payment, config.annuity.max_months);
        Self {
            config,
            engine,
            snapshot,
            living_cost,
            monthly_payment,
            pv_full_term,
        }
    }

    /// Whether a search outcome counts as a usable plan under this regime
    pub fn accepts(&self, period: RepaymentPeriod) -> bool {
        match period {
            RepaymentPeriod::Qualified(_) => true,
            RepaymentPeriod::Fallback(_) => !self.config.strict_zero_payment,
            RepaymentPeriod::Infeasible => false,
        }
    }

    fn max_months(&self) -> f64 {
        self.config.annuity.max_months as f64
    }
}

/// Plan proposed by a tier, before the period is recomputed
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustedPlan {
    pub kind: AdjustmentKind,
    pub monthly_payment: f64,
    pub liquidation_value: f64,
    pub reason: String,
}

impl AdjustmentKind {
    /// Run this tier against the baseline
    pub fn attempt(&self, ctx: &TierContext<'_>) -> Option<AdjustedPlan> {
        let plan = match self {
            AdjustmentKind::DependentCount => adjust_dependents(ctx),
            AdjustmentKind::LivingCost => adjust_living_cost(ctx),
            AdjustmentKind::AssetValue => adjust_asset_value(ctx),
            AdjustmentKind::IncomeFloor => adjust_income_floor(ctx),
        };
        log::debug!("Tier {}: {}", self.as_str(), if plan.is_some() { "proposed" } else { "declined" });
        plan
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Suggest a smaller dependent count, scanning down from one step below the
/// declared count and keeping the first count with a qualifying plan.
fn adjust_dependents(ctx: &TierContext<'_>) -> Option<AdjustedPlan> {
    let dependents = ctx.snapshot.effective_dependents();
    let step = ctx.config.dependent_step;
    if dependents <= 1.0 || step <= 0.0 {
        return None;
    }

    let mut candidate = round_one_decimal(dependents - step);
    while candidate >= 1.0 {
        let living_cost = ctx.config.living_cost.living_cost(candidate);
        if living_cost < ctx.config.living_cost_floor {
            break;
        }

        let monthly_payment = ctx.snapshot.monthly_income - living_cost;
        if monthly_payment > 0.0 {
            let period = ctx
                .engine
                .find_minimum_repayment_period(monthly_payment, ctx.snapshot.liquidation_value);
            log::debug!("Dependents {:.1}: payment {:.0}, {:?}", candidate, monthly_payment, period);

            if ctx.accepts(period) {
                return Some(AdjustedPlan {
                    kind: AdjustmentKind::DependentCount,
                    monthly_payment,
                    liquidation_value: ctx.snapshot.liquidation_value,
                    reason: format!(
                        "Feasible if dependents are recognised as {:.1} (monthly payment {:.0})",
                        candidate, monthly_payment
                    ),
                });
            }
        }

        candidate = round_one_decimal(candidate - step);
    }

    None
}

/// Squeeze the living cost allowance when the longest plan almost covers the
/// liquidation value.
fn adjust_living_cost(ctx: &TierContext<'_>) -> Option<AdjustedPlan> {
    let liquidation_value = ctx.snapshot.liquidation_value;
    if liquidation_value <= 0.0 {
        return None;
    }

    let ratio = ctx.pv_full_term / liquidation_value;
    if !(ctx.config.near_miss_ratio..1.0).contains(&ratio) {
        return None;
    }

    let required_increase = ((liquidation_value - ctx.pv_full_term) / ctx.max_months()).ceil();
    let adjusted_living_cost = ctx.living_cost - required_increase;
    if adjusted_living_cost < ctx.config.living_cost_floor {
        return None;
    }

    let monthly_payment = ctx.snapshot.monthly_income - adjusted_living_cost;
    Some(AdjustedPlan {
        kind: AdjustmentKind::LivingCost,
        monthly_payment,
        liquidation_value,
        reason: format!(
            "Feasible if living cost is reduced to {:.0} (monthly payment {:.0})",
            adjusted_living_cost, monthly_payment
        ),
    })
}

/// Revalue the assets down to what the longest plan can cover.
fn adjust_asset_value(ctx: &TierContext<'_>) -> Option<AdjustedPlan> {
    let liquidation_value = ctx.snapshot.liquidation_value;
    if ctx.pv_full_term <= 0.0 || liquidation_value > ctx.pv_full_term * ctx.config.asset_tolerance {
        return None;
    }

    let adjusted_value = liquidation_value - (liquidation_value - ctx.pv_full_term).ceil();
    Some(AdjustedPlan {
        kind: AdjustmentKind::AssetValue,
        monthly_payment: ctx.monthly_payment,
        liquidation_value: adjusted_value,
        reason: format!(
            "Feasible if liquidation value is reassessed at {:.0}",
            adjusted_value
        ),
    })
}

/// With no disposable income, require enough income toward the plan to
/// cover the liquidation value over the longest term.
fn adjust_income_floor(ctx: &TierContext<'_>) -> Option<AdjustedPlan> {
    if ctx.monthly_payment > 0.0 {
        return None;
    }

    let liquidation_value = ctx.snapshot.liquidation_value;
    let required_income =
        (liquidation_value / ctx.max_months() / ctx.config.income_floor_discount).ceil();
    let adjusted_living_cost = ctx.snapshot.monthly_income - required_income;
    if adjusted_living_cost < ctx.config.living_cost_floor {
        return None;
    }

    Some(AdjustedPlan {
        kind: AdjustmentKind::IncomeFloor,
        monthly_payment: required_income,
        liquidation_value,
        reason: format!(
            "Feasible if living cost is limited to {:.0} leaving {:.0} per month for repayment",
            adjusted_living_cost, required_income
        ),
    })
}
