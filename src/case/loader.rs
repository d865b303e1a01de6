//! Load debtor cases from CSV

use std::io::Read;
use std::path::Path;

use csv::Reader;
use serde::Deserialize;

use super::{Case, MonetarySnapshot};
use crate::error::Result;

/// Raw CSV row matching the case file columns
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "CaseId")]
    case_id: String,
    #[serde(rename = "TotalDebt")]
    total_debt: f64,
    #[serde(rename = "MonthlyIncome")]
    monthly_income: f64,
    #[serde(rename = "LiquidationValue")]
    liquidation_value: f64,
    #[serde(rename = "DependentCount", default = "default_dependents")]
    dependent_count: f64,
}

fn default_dependents() -> f64 {
    1.0
}

impl CsvRow {
    fn into_case(self) -> Result<Case> {
        let snapshot = MonetarySnapshot::validated(
            self.total_debt,
            self.monthly_income,
            self.liquidation_value,
            self.dependent_count,
        )?;
        Ok(Case { case_id: self.case_id, snapshot })
    }
}

/// Load all cases from a CSV file
pub fn load_cases<P: AsRef<Path>>(path: P) -> Result<Vec<Case>> {
    let reader = Reader::from_path(path)?;
    collect_cases(reader)
}

/// Load cases from any reader (e.g., request body, string buffer)
pub fn load_cases_from_reader<R: Read>(reader: R) -> Result<Vec<Case>> {
    collect_cases(Reader::from_reader(reader))
}

fn collect_cases<R: Read>(mut reader: Reader<R>) -> Result<Vec<Case>> {
    let mut cases = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        cases.push(row.into_case()?);
    }
    Ok(cases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RehabError;

    #[test]
    fn test_load_cases_from_reader() {
        let csv = "\
CaseId,TotalDebt,MonthlyIncome,LiquidationValue,DependentCount
X1,50000000,2500000,0,1
X2,100000000,3500000,20000000,2.5
";
        let cases = load_cases_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].case_id, "X1");
        assert_eq!(cases[1].snapshot.dependent_count, 2.5);
        assert_eq!(cases[1].snapshot.liquidation_value, 20_000_000.0);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let csv = "CaseId,TotalDebt,MonthlyIncome,LiquidationValue,DependentCount\nBad,-5,0,0,1\n";
        let result = load_cases_from_reader(csv.as_bytes());
        assert!(matches!(result, Err(RehabError::InvalidInput { .. })));
    }

    #[test]
    fn test_non_numeric_rejected() {
        let csv = "CaseId,TotalDebt,MonthlyIncome,LiquidationValue,DependentCount\nBad,lots,0,0,1\n";
        let result = load_cases_from_reader(csv.as_bytes());
        assert!(matches!(result, Err(RehabError::Csv(_))));
    }

    #[test]
    fn test_load_sample_file() {
        let cases = load_cases("data/sample_cases.csv").expect("sample cases should load");
        assert_eq!(cases.len(), 5);
        assert_eq!(cases[2].case_id, "C-003");
    }
}
