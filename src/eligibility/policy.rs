//! Eligibility policy: baseline feasibility, adjustment tiers, and the
//! final reduction figures

use crate::annuity::AnnuityEngine;
use crate::case::MonetarySnapshot;

use super::adjustment::{AdjustedPlan, TierContext};
use super::config::EligibilityConfig;
use super::reduction::final_reduction;
use super::result::{AdjustmentKind, CalculationResult};

/// Evaluates monetary snapshots against one statutory regime.
///
/// Holds no per-call state; one policy can serve any number of threads.
#[derive(Debug, Clone)]
pub struct EligibilityPolicy {
    config: EligibilityConfig,
    engine: AnnuityEngine,
}

impl EligibilityPolicy {
    pub fn new(config: EligibilityConfig) -> Self {
        let engine = AnnuityEngine::new(config.annuity.clone());
        Self { config, engine }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    pub fn engine(&self) -> &AnnuityEngine {
        &self.engine
    }

    /// Statutory living cost for a (possibly fractional) dependent count
    pub fn compute_living_cost(&self, dependent_count: f64) -> f64 {
        self.config.living_cost.living_cost(dependent_count.max(1.0))
    }

    /// Evaluate one snapshot
    pub fn evaluate(&self, snapshot: &MonetarySnapshot) -> CalculationResult {
        let living_cost = self.compute_living_cost(snapshot.effective_dependents());
        let monthly_payment = (snapshot.monthly_income - living_cost).max(0.0);
        let ctx = TierContext::new(&self.config, &self.engine, snapshot, living_cost, monthly_payment);

        let period = self
            .engine
            .find_minimum_repayment_period(monthly_payment, snapshot.liquidation_value);
        if period.is_fallback() {
            log::warn!(
                "No disposable income (income {:.0}, living cost {:.0}), {} month fallback",
                snapshot.monthly_income,
                living_cost,
                self.config.annuity.max_months
            );
        }

        if let Some(months) = period.months().filter(|_| ctx.accepts(period)) {
            log::debug!("Baseline plan: payment {:.0} over {} months", monthly_payment, months);
            return final_reduction(
                &self.config,
                &self.engine,
                snapshot.total_debt,
                monthly_payment,
                months,
                snapshot.liquidation_value,
            );
        }

        match AdjustmentKind::PRIORITY.iter().find_map(|tier| tier.attempt(&ctx)) {
            Some(plan) => self.apply_adjustment(&ctx, plan),
            None => {
                log::info!("No adjustment tier applies, plan infeasible");
                self.infeasible(monthly_payment)
            }
        }
    }

    /// Recompute the period for an accepted adjustment and produce figures
    fn apply_adjustment(&self, ctx: &TierContext<'_>, plan: AdjustedPlan) -> CalculationResult {
        let period = self
            .engine
            .find_minimum_repayment_period(plan.monthly_payment, plan.liquidation_value);

        match period.months().filter(|_| ctx.accepts(period)) {
            Some(months) => {
                log::info!("Adjustment {} accepted: {}", plan.kind.as_str(), plan.reason);
                let mut result = final_reduction(
                    &self.config,
                    &self.engine,
                    ctx.snapshot.total_debt,
                    plan.monthly_payment,
                    months,
                    plan.liquidation_value,
                );
                result.needs_consultation = true;
                result.consultation_reason = Some(plan.reason);
                result.applied_adjustment = Some(plan.kind);
                result
            }
            None => {
                log::info!(
                    "Adjustment {} proposed but no plan qualifies after recomputation",
                    plan.kind.as_str()
                );
                self.infeasible(ctx.monthly_payment)
            }
        }
    }

    fn infeasible(&self, monthly_payment: f64) -> CalculationResult {
        CalculationResult::infeasible(monthly_payment, self.config.annuity.max_months)
    }
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self::new(EligibilityConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn snapshot(debt: f64, income: f64, liquidation: f64, dependents: f64) -> MonetarySnapshot {
        MonetarySnapshot {
            total_debt: debt,
            monthly_income: income,
            liquidation_value: liquidation,
            dependent_count: dependents,
        }
    }

    #[test]
    fn test_feasible_baseline() {
        let policy = EligibilityPolicy::default();
        let result = policy.evaluate(&snapshot(50_000_000.0, 2_500_000.0, 0.0, 1.0));

        assert_eq!(policy.compute_living_cost(1.0), 1_538_543.0);
        assert_eq!(result.monthly_payment, 961_457.0);
        assert_eq!(result.repayment_period, 36);
        assert!(!result.liquidation_value_violation);
        assert!(!result.needs_consultation);
        assert!(result.consultation_reason.is_none());
        assert_relative_eq!(result.reduction_rate, 35.733767072, epsilon = 1e-6);
        assert!(result.reduction_rate <= 96.9);
    }

    #[test]
    fn test_dependent_adjustment_path() {
        let policy = EligibilityPolicy::default();
        let result = policy.evaluate(&snapshot(100_000_000.0, 3_500_000.0, 20_000_000.0, 3.0));

        assert!(result.needs_consultation);
        assert!(!result.liquidation_value_violation);
        assert_eq!(result.applied_adjustment, Some(AdjustmentKind::DependentCount));
        let reason = result.consultation_reason.as_deref().unwrap_or_default();
        assert!(reason.contains("2.8"), "unexpected reason: {}", reason);
        assert_eq!(result.repayment_period, 53);
        assert_relative_eq!(result.monthly_payment, 423_747.4, epsilon = 1e-6);
        assert_relative_eq!(result.reduction_rate, 79.837394416, epsilon = 1e-6);
    }

    #[test]
    fn test_hard_infeasible() {
        let policy = EligibilityPolicy::default();
        let result = policy.evaluate(&snapshot(10_000_000.0, 1_600_000.0, 200_000_000.0, 1.0));

        assert!(result.liquidation_value_violation);
        assert_eq!(result.reduction_rate, 0.0);
        assert_eq!(result.reduction_amount, 0.0);
        assert_eq!(result.repayment_amount, 0.0);
        assert_eq!(result.repayment_period, 60);
        assert_eq!(result.monthly_payment, 61_457.0);
        assert!(!result.needs_consultation);
        assert!(result.applied_adjustment.is_none());
    }

    #[test]
    fn test_living_cost_tier_falls_short_on_recompute() {
        let policy = EligibilityPolicy::default();
        // Near miss: the squeeze spreads the shortfall evenly over 60 months,
        // which undershoots once discounted, so the case stays infeasible
        let result = policy.evaluate(&snapshot(80_000_000.0, 2_000_000.0, 27_243_313.0, 1.0));

        assert!(result.liquidation_value_violation);
        assert_eq!(result.monthly_payment, 461_457.0);
        assert_eq!(result.repayment_period, 60);
        assert!(result.applied_adjustment.is_none());
    }

    #[test]
    fn test_asset_adjustment_path() {
        let policy = EligibilityPolicy::default();
        let result = policy.evaluate(&snapshot(900_000_000.0, 12_000_000.0, 630_000_000.0, 1.0));

        assert!(!result.liquidation_value_violation);
        assert!(result.needs_consultation);
        assert_eq!(result.applied_adjustment, Some(AdjustmentKind::AssetValue));
        assert_eq!(result.repayment_period, 60);
        assert_eq!(result.monthly_payment, 10_461_457.0);
        assert_relative_eq!(result.repayment_amount, 555_857_362.558, epsilon = 1e-2);
        assert_relative_eq!(result.reduction_rate, 38.238070827, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_income_uses_fallback_period() {
        let policy = EligibilityPolicy::default();
        let result = policy.evaluate(&snapshot(30_000_000.0, 1_000_000.0, 10_000_000.0, 1.0));

        // Fallback counts as a plan: repayment rests on the liquidation value
        assert!(!result.liquidation_value_violation);
        assert!(!result.needs_consultation);
        assert_eq!(result.monthly_payment, 0.0);
        assert_eq!(result.repayment_period, 60);
        assert_relative_eq!(result.repayment_amount, 10_000_000.0);
        assert_relative_eq!(result.reduction_rate, 66.666666667, epsilon = 1e-6);
    }

    #[test]
    fn test_strict_zero_payment_reaches_income_floor() {
        let policy = EligibilityPolicy::new(EligibilityConfig {
            strict_zero_payment: true,
            ..Default::default()
        });
        let result = policy.evaluate(&snapshot(30_000_000.0, 1_000_000.0, 10_000_000.0, 1.0));

        assert!(!result.liquidation_value_violation);
        assert!(result.needs_consultation);
        assert_eq!(result.applied_adjustment, Some(AdjustmentKind::IncomeFloor));
        assert_eq!(result.monthly_payment, 198_413.0);
        assert_eq!(result.repayment_period, 57);
        assert_relative_eq!(result.repayment_amount, 10_074_156.196, epsilon = 1e-2);
    }

    #[test]
    fn test_strict_zero_payment_without_rescue() {
        let policy = EligibilityPolicy::new(EligibilityConfig {
            strict_zero_payment: true,
            ..Default::default()
        });
        // Income floor would leave less than 600,000 to live on
        let result = policy.evaluate(&snapshot(30_000_000.0, 1_000_000.0, 30_000_000.0, 1.0));

        assert!(result.liquidation_value_violation);
        assert_eq!(result.monthly_payment, 0.0);
    }

    #[test]
    fn test_first_proposing_tier_wins() {
        let policy = EligibilityPolicy::default();
        let s = snapshot(100_000_000.0, 2_500_000.0, 26_000_000.0, 1.5);

        // Every tier but the income floor would propose a plan here
        let living_cost = policy.compute_living_cost(1.5);
        let payment = 2_500_000.0 - living_cost;
        let ctx = TierContext::new(policy.config(), policy.engine(), &s, living_cost, payment);
        assert!(AdjustmentKind::DependentCount.attempt(&ctx).is_some());
        assert!(AdjustmentKind::LivingCost.attempt(&ctx).is_some());
        assert!(AdjustmentKind::AssetValue.attempt(&ctx).is_some());
        assert!(AdjustmentKind::IncomeFloor.attempt(&ctx).is_none());

        let result = policy.evaluate(&s);
        assert_eq!(result.applied_adjustment, Some(AdjustmentKind::DependentCount));
        assert!(result.needs_consultation);
        assert!(!result.liquidation_value_violation);
        assert_eq!(result.repayment_period, 51);
        assert_relative_eq!(result.monthly_payment, 569_044.2, epsilon = 1e-6);
        assert!(result.consultation_reason.as_deref().unwrap_or_default().contains("1.4"));
        assert_relative_eq!(result.reduction_rate, 73.843266003, epsilon = 1e-6);
    }

    #[test]
    fn test_failed_dependent_scan_falls_through() {
        let policy = EligibilityPolicy::default();
        let s = snapshot(900_000_000.0, 12_000_000.0, 630_000_000.0, 1.1);

        let living_cost = policy.compute_living_cost(1.1);
        let payment = 12_000_000.0 - living_cost;
        let ctx = TierContext::new(policy.config(), policy.engine(), &s, living_cost, payment);
        // Scanning down to 1.0 still falls short, and the squeeze breaches the floor
        assert!(AdjustmentKind::DependentCount.attempt(&ctx).is_none());
        assert!(AdjustmentKind::LivingCost.attempt(&ctx).is_none());

        let result = policy.evaluate(&s);
        assert_eq!(result.applied_adjustment, Some(AdjustmentKind::AssetValue));
        assert!(!result.liquidation_value_violation);
        assert!(result.needs_consultation);
        assert_eq!(result.repayment_period, 60);
        assert_relative_eq!(result.monthly_payment, payment);
        assert!(result.consultation_reason.as_deref().unwrap_or_default().contains("550644763"));
        assert_relative_eq!(result.reduction_rate, 38.817248554, epsilon = 1e-6);
    }

    #[test]
    fn test_dependent_count_below_one_is_raised() {
        let policy = EligibilityPolicy::default();
        let a = policy.evaluate(&snapshot(50_000_000.0, 2_500_000.0, 0.0, 0.0));
        let b = policy.evaluate(&snapshot(50_000_000.0, 2_500_000.0, 0.0, 1.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_idempotent() {
        let policy = EligibilityPolicy::default();
        let s = snapshot(100_000_000.0, 3_500_000.0, 20_000_000.0, 3.0);

        let first = policy.evaluate(&s);
        let second = policy.evaluate(&s);
        assert_eq!(first, second);
        assert_eq!(first.reduction_rate.to_bits(), second.reduction_rate.to_bits());
    }

    #[test]
    fn test_rate_bounds_over_grid() {
        let policy = EligibilityPolicy::default();

        for debt in [0.0, 1_000_000.0, 49_999_999.0, 50_000_000.0, 50_000_001.0, 2_000_000_000.0] {
            for income in [0.0, 1_600_000.0, 2_500_000.0, 8_000_000.0] {
                for liquidation in [0.0, 5_000_000.0, 40_000_000.0, 500_000_000.0] {
                    for dependents in [1.0, 2.5, 4.0] {
                        let result = policy.evaluate(&snapshot(debt, income, liquidation, dependents));

                        assert!(result.reduction_rate >= 0.0 && result.reduction_rate <= 96.9 + 1e-9);
                        assert!((36..=60).contains(&result.repayment_period));
                        assert!(result.repayment_amount >= 0.0);

                        if !result.liquidation_value_violation && debt > 0.0 {
                            let floor = policy.config().minimum_repayment(debt);
                            assert!(result.repayment_amount >= floor.min(debt) - 1e-6);
                        }
                    }
                }
            }
        }
    }
}
