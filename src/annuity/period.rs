//! Minimum qualifying repayment period search

use serde::{Deserialize, Serialize};

use super::AnnuityEngine;

/// Outcome of the minimum period search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepaymentPeriod {
    /// Shortest plan whose present value covers the liquidation value
    Qualified(u32),
    /// No disposable income: the longest plan is reported without any
    /// coverage test
    Fallback(u32),
    /// No plan within the allowed range covers the liquidation value
    Infeasible,
}

impl RepaymentPeriod {
    /// Month count for `Qualified` and `Fallback`, `None` when infeasible
    pub fn months(&self) -> Option<u32> {
        match self {
            RepaymentPeriod::Qualified(m) | RepaymentPeriod::Fallback(m) => Some(*m),
            RepaymentPeriod::Infeasible => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, RepaymentPeriod::Fallback(_))
    }
}

impl AnnuityEngine {
    /// Find the shortest plan in `[min_months, max_months]` whose present
    /// value reaches `liquidation_value`.
    ///
    /// A non-positive payment yields `Fallback(max_months)` and a
    /// non-positive liquidation value yields `Qualified(min_months)`, in that
    /// order of precedence.
    pub fn find_minimum_repayment_period(
        &self,
        monthly_payment: f64,
        liquidation_value: f64,
    ) -> RepaymentPeriod {
        let min_months = self.config.min_months;
        let max_months = self.config.max_months;

        if monthly_payment <= 0.0 {
            log::debug!("No disposable income, falling back to {} months", max_months);
            return RepaymentPeriod::Fallback(max_months);
        }

        if liquidation_value <= 0.0 {
            return RepaymentPeriod::Qualified(min_months);
        }

        // PV is monotonic in months so the first hit is the minimum
        (min_months..=max_months)
            .find(|&m| self.present_value(monthly_payment, m) >= liquidation_value)
            .map(RepaymentPeriod::Qualified)
            .unwrap_or(RepaymentPeriod::Infeasible)
    }
}
