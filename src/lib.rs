//! Rehabilitation System - repayment-plan feasibility and debt reduction
//! estimator for individual rehabilitation
//!
//! This library provides:
//! - Present value of statutory repayment plans and the minimum plan length search
//! - Statutory living cost tables by household size
//! - Eligibility policy with priority-ordered adjustment tiers for infeasible cases
//! - Reduction rate computation under the statutory floor and ceiling
//! - Parallel batch evaluation over CSV case files

pub mod error;
pub mod annuity;
pub mod household;
pub mod case;
pub mod eligibility;
pub mod batch;

// Re-export commonly used types
pub use error::{RehabError, Result};
pub use annuity::{AnnuityEngine, AnnuityConfig, RepaymentPeriod};
pub use household::LivingCostTable;
pub use case::{Case, MonetarySnapshot};
pub use eligibility::{
    evaluate, AdjustmentKind, CalculationResult, EligibilityConfig, EligibilityPolicy,
};
pub use batch::BatchRunner;
