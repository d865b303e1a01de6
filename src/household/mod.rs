//! Statutory minimum living cost by household size

mod living_cost;
pub mod loader;

pub use living_cost::{LivingCostTable, HOUSEHOLD_SIZES};
pub use loader::LoadedLivingCosts;
