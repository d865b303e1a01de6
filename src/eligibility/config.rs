//! Statutory parameters for the eligibility policy

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::annuity::AnnuityConfig;
use crate::error::Result;
use crate::household::LivingCostTable;

/// Statutory regime the policy evaluates against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityConfig {
    /// Discount rate and allowed plan length
    pub annuity: AnnuityConfig,

    /// Minimum living cost by household size
    pub living_cost: LivingCostTable,

    /// Living cost below which no adjustment may push the allowance
    pub living_cost_floor: f64,

    /// Step used when suggesting a smaller dependent count
    pub dependent_step: f64,

    /// Lowest PV60 / liquidation ratio treated as a near miss
    pub near_miss_ratio: f64,

    /// Liquidation value may be revalued down when it is at most this
    /// multiple of PV60
    pub asset_tolerance: f64,

    /// Discount margin applied to the 60 month income requirement
    pub income_floor_discount: f64,

    /// Statutory ceiling on the reduction rate, in percent
    pub max_reduction_rate: f64,

    /// Debts up to this amount use the small-debt repayment floor
    pub small_debt_threshold: f64,

    /// Minimum repayment as a share of debt at or below the threshold
    pub small_debt_floor_rate: f64,

    /// Minimum repayment as a share of debt above the threshold
    pub large_debt_floor_rate: f64,

    /// Fixed amount added to the large-debt minimum repayment
    pub large_debt_floor_base: f64,

    /// Treat the zero-income fallback period as infeasible instead of as a
    /// 60 month plan
    pub strict_zero_payment: bool,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            annuity: AnnuityConfig::default(),
            living_cost: LivingCostTable::default(),
            living_cost_floor: 600_000.0,
            dependent_step: 0.1,
            near_miss_ratio: 0.85,
            asset_tolerance: 1.15,
            income_floor_discount: 0.84,
            max_reduction_rate: 96.9,
            small_debt_threshold: 50_000_000.0,
            small_debt_floor_rate: 0.05,
            large_debt_floor_rate: 0.03,
            large_debt_floor_base: 1_000_000.0,
            strict_zero_payment: false,
        }
    }
}

impl EligibilityConfig {
    /// Default regime with a different living cost table
    pub fn with_living_cost(living_cost: LivingCostTable) -> Self {
        Self { living_cost, ..Default::default() }
    }

    /// Load a regime from a JSON file. Missing fields keep their defaults.
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    /// Statutory minimum repayment for a given total debt
    pub fn minimum_repayment(&self, total_debt: f64) -> f64 {
        if total_debt <= self.small_debt_threshold {
            total_debt * self.small_debt_floor_rate
        } else {
            total_debt * self.large_debt_floor_rate + self.large_debt_floor_base
        }
    }
}
