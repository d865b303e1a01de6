//! Debtor case data: the monetary snapshot evaluated by the policy

mod data;
mod loader;

pub use data::{MonetarySnapshot, Case};
pub use loader::{load_cases, load_cases_from_reader};
