//! CSV-based living cost loader
//!
//! Loads year-keyed living cost tables from data/living_cost.csv

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::{LivingCostTable, HOUSEHOLD_SIZES};
use crate::error::{RehabError, Result};

/// Default path to the living cost table
pub const DEFAULT_LIVING_COST_PATH: &str = "data/living_cost.csv";

/// Raw CSV row matching living_cost.csv columns
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "HouseholdSize")]
    household_size: usize,
    #[serde(rename = "MonthlyAmount")]
    monthly_amount: f64,
}

/// All living cost tables read from one file
#[derive(Debug, Clone)]
pub struct LoadedLivingCosts {
    tables: BTreeMap<i32, LivingCostTable>,
}

impl LoadedLivingCosts {
    /// Load tables from the default path
    pub fn load_default() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_LIVING_COST_PATH))
    }

    /// Load tables from a CSV file
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Load tables from any reader. Every year must list all household sizes.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut partial: BTreeMap<i32, [Option<f64>; HOUSEHOLD_SIZES]> = BTreeMap::new();

        for result in csv_reader.deserialize() {
            let row: CsvRow = result?;
            if row.household_size == 0 || row.household_size > HOUSEHOLD_SIZES {
                return Err(RehabError::MalformedTable(format!(
                    "household size {} outside 1..={} in year {}",
                    row.household_size, HOUSEHOLD_SIZES, row.year
                )));
            }
            partial.entry(row.year).or_insert([None; HOUSEHOLD_SIZES])[row.household_size - 1] =
                Some(row.monthly_amount);
        }

        let mut tables = BTreeMap::new();
        for (year, slots) in partial {
            let mut amounts = [0.0; HOUSEHOLD_SIZES];
            for (i, slot) in slots.iter().enumerate() {
                amounts[i] = slot.ok_or_else(|| {
                    RehabError::MalformedTable(format!(
                        "year {} is missing household size {}",
                        year,
                        i + 1
                    ))
                })?;
            }
            tables.insert(year, LivingCostTable::new(year, amounts)?);
        }

        log::debug!("Loaded living cost tables for {} year(s)", tables.len());
        Ok(Self { tables })
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.tables.keys().copied()
    }

    /// Table for `year`
    pub fn table(&self, year: i32) -> Result<LivingCostTable> {
        self.tables
            .get(&year)
            .cloned()
            .ok_or(RehabError::UnknownTableYear(year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Year,HouseholdSize,MonthlyAmount
2026,1,1538543
2026,2,2519575
2026,3,3215422
2026,4,3896843
2026,5,4534031
2027,1,1600000
2027,2,2600000
2027,3,3300000
2027,4,4000000
2027,5,4650000
";

    #[test]
    fn test_load_from_reader() {
        let loaded = LoadedLivingCosts::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(loaded.years().collect::<Vec<_>>(), vec![2026, 2027]);

        let table_2026 = loaded.table(2026).unwrap();
        assert_eq!(table_2026, LivingCostTable::standard_2026());

        let table_2027 = loaded.table(2027).unwrap();
        assert_eq!(table_2027.living_cost(1.0), 1_600_000.0);
        assert_eq!(table_2027.living_cost(5.0), 4_650_000.0);
    }

    #[test]
    fn test_missing_year() {
        let loaded = LoadedLivingCosts::from_reader(SAMPLE.as_bytes()).unwrap();
        assert!(matches!(loaded.table(2024), Err(RehabError::UnknownTableYear(2024))));
    }

    #[test]
    fn test_incomplete_year_rejected() {
        let csv = "Year,HouseholdSize,MonthlyAmount\n2030,1,1000000\n2030,2,2000000\n";
        let result = LoadedLivingCosts::from_reader(csv.as_bytes());
        assert!(matches!(result, Err(RehabError::MalformedTable(_))));
    }

    #[test]
    fn test_household_size_out_of_range() {
        let csv = "Year,HouseholdSize,MonthlyAmount\n2030,6,1000000\n";
        let result = LoadedLivingCosts::from_reader(csv.as_bytes());
        assert!(matches!(result, Err(RehabError::MalformedTable(_))));
    }

    #[test]
    fn test_load_bundled_file() {
        let loaded = LoadedLivingCosts::load_default().expect("bundled table should load");
        assert_eq!(loaded.table(2025).unwrap(), LivingCostTable::standard_2025());
        assert_eq!(loaded.table(2026).unwrap(), LivingCostTable::standard_2026());
    }
}
