//! Batch runner for evaluating many cases against one regime
//!
//! Builds the policy once, then evaluates cases in parallel. Every
//! evaluation is independent so no coordination is needed.

use std::io::Write;

use rayon::prelude::*;
use serde::Serialize;

use crate::case::{Case, MonetarySnapshot};
use crate::eligibility::{CalculationResult, EligibilityConfig, EligibilityPolicy};
use crate::error::Result;

/// Result of one case in a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseResult {
    pub case_id: String,
    pub snapshot: MonetarySnapshot,
    pub result: CalculationResult,
}

/// Summary counts over a batch
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total_cases: usize,
    pub feasible: usize,
    pub adjusted: usize,
    pub infeasible: usize,
    pub mean_reduction_rate: f64,
}

/// Pre-built policy for batch evaluation
#[derive(Debug, Clone)]
pub struct BatchRunner {
    policy: EligibilityPolicy,
}

impl BatchRunner {
    pub fn new(config: EligibilityConfig) -> Self {
        Self {
            policy: EligibilityPolicy::new(config),
        }
    }

    pub fn policy(&self) -> &EligibilityPolicy {
        &self.policy
    }

    /// Evaluate every case in parallel; results keep input order
    pub fn run(&self, cases: &[Case]) -> Vec<CaseResult> {
        log::info!("Evaluating {} case(s)", cases.len());
        cases
            .par_iter()
            .map(|case| CaseResult {
                case_id: case.case_id.clone(),
                snapshot: case.snapshot,
                result: self.policy.evaluate(&case.snapshot),
            })
            .collect()
    }

    /// Count outcomes; the mean rate covers feasible and adjusted cases only
    pub fn summarize(results: &[CaseResult]) -> BatchSummary {
        let mut summary = BatchSummary {
            total_cases: results.len(),
            ..Default::default()
        };

        let mut rate_sum = 0.0;
        for r in results {
            if r.result.liquidation_value_violation {
                summary.infeasible += 1;
                continue;
            }
            if r.result.needs_consultation {
                summary.adjusted += 1;
            } else {
                summary.feasible += 1;
            }
            rate_sum += r.result.reduction_rate;
        }

        let priced = summary.feasible + summary.adjusted;
        if priced > 0 {
            summary.mean_reduction_rate = rate_sum / priced as f64;
        }
        summary
    }

    /// Write results as CSV
    pub fn write_csv<W: Write>(results: &[CaseResult], writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record([
            "CaseId",
            "TotalDebt",
            "MonthlyIncome",
            "LiquidationValue",
            "DependentCount",
            "ReductionRate",
            "ReductionAmount",
            "RepaymentAmount",
            "MonthlyPayment",
            "RepaymentPeriod",
            "LiquidationValueViolation",
            "NeedsConsultation",
            "Adjustment",
            "ConsultationReason",
        ])?;

        for r in results {
            let s = &r.snapshot;
            let c = &r.result;
            csv_writer.write_record([
                r.case_id.clone(),
                format!("{:.0}", s.total_debt),
                format!("{:.0}", s.monthly_income),
                format!("{:.0}", s.liquidation_value),
                format!("{:.1}", s.dependent_count),
                format!("{:.4}", c.reduction_rate),
                format!("{:.0}", c.reduction_amount),
                format!("{:.0}", c.repayment_amount),
                format!("{:.0}", c.monthly_payment),
                c.repayment_period.to_string(),
                c.liquidation_value_violation.to_string(),
                c.needs_consultation.to_string(),
                c.applied_adjustment.map(|k| k.as_str()).unwrap_or("").to_string(),
                c.consultation_reason.clone().unwrap_or_default(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new(EligibilityConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::load_cases_from_reader;

    const CASES: &str = "\
CaseId,TotalDebt,MonthlyIncome,LiquidationValue,DependentCount
A,50000000,2500000,0,1
B,100000000,3500000,20000000,3
C,10000000,1600000,200000000,1
";

    #[test]
    fn test_batch_keeps_order_and_matches_single_evaluation() {
        let cases = load_cases_from_reader(CASES.as_bytes()).unwrap();
        let runner = BatchRunner::default();
        let results = runner.run(&cases);

        assert_eq!(results.len(), 3);
        for (case, r) in cases.iter().zip(&results) {
            assert_eq!(case.case_id, r.case_id);
            assert_eq!(r.result, runner.policy().evaluate(&case.snapshot));
        }
    }

    #[test]
    fn test_summary_counts() {
        let cases = load_cases_from_reader(CASES.as_bytes()).unwrap();
        let results = BatchRunner::default().run(&cases);
        let summary = BatchRunner::summarize(&results);

        assert_eq!(summary.total_cases, 3);
        assert_eq!(summary.feasible, 1);
        assert_eq!(summary.adjusted, 1);
        assert_eq!(summary.infeasible, 1);
        let expected = (results[0].result.reduction_rate + results[1].result.reduction_rate) / 2.0;
        assert!((summary.mean_reduction_rate - expected).abs() < 1e-9);
    }

    #[test]
    fn test_write_csv() {
        let cases = load_cases_from_reader(CASES.as_bytes()).unwrap();
        let results = BatchRunner::default().run(&cases);

        let mut buffer = Vec::new();
        BatchRunner::write_csv(&results, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("CaseId,TotalDebt"));
        assert!(lines[2].contains("dependent_count"));
        assert!(lines[3].contains(",true,false,"));
    }

    #[test]
    fn test_empty_batch() {
        let summary = BatchRunner::summarize(&BatchRunner::default().run(&[]));
        assert_eq!(summary, BatchSummary::default());
    }
}
