// 📂 Dataset Loader - Country-year Gini Index panel
// Reads Year, Country, Country_codes, Gini_Index rows into an immutable Table

use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

/// Columns the loader insists on (extra columns are ignored)
pub const REQUIRED_COLUMNS: [&str; 4] = ["Year", "Country", "Country_codes", "Gini_Index"];

// ============================================================================
// RECORD
// ============================================================================

/// One observation: a country's Gini Index for one year
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct IncomeRecord {
    #[serde(rename = "Year")]
    pub year: i32,

    #[serde(rename = "Country")]
    pub country: String,

    /// Stable identifier (ISO-3), join key across years
    #[serde(rename = "Country_codes")]
    pub country_code: String,

    #[serde(rename = "Gini_Index")]
    pub gini_index: f64,
}

impl IncomeRecord {
    pub fn new(year: i32, country: &str, country_code: &str, gini_index: f64) -> Self {
        IncomeRecord {
            year,
            country: country.to_string(),
            country_code: country_code.to_string(),
            gini_index,
        }
    }
}

// ============================================================================
// TABLE
// ============================================================================

/// Ordered, read-only collection of records.
///
/// At most one record per `(year, country_code)` is expected; not every
/// country has a record for every year.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    records: Vec<IncomeRecord>,
}

impl Table {
    pub fn from_records(records: Vec<IncomeRecord>) -> Self {
        Table { records }
    }

    pub fn records(&self) -> &[IncomeRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IncomeRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years, latest first (selector order)
    pub fn years(&self) -> Vec<i32> {
        let distinct: BTreeSet<i32> = self.records.iter().map(|r| r.year).collect();
        distinct.into_iter().rev().collect()
    }

    pub fn has_year(&self, year: i32) -> bool {
        self.records.iter().any(|r| r.year == year)
    }

    pub fn min_year(&self) -> Option<i32> {
        self.records.iter().map(|r| r.year).min()
    }

    pub fn max_year(&self) -> Option<i32> {
        self.records.iter().map(|r| r.year).max()
    }

    /// Distinct country names in first-seen order
    pub fn countries(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.country.as_str()))
            .map(|r| r.country.clone())
            .collect()
    }

    /// Largest index value in the whole panel (None when empty)
    pub fn max_index(&self) -> Option<f64> {
        max_gini(&self.records)
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a IncomeRecord;
    type IntoIter = std::slice::Iter<'a, IncomeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Largest `gini_index` among the given records; NaN values are skipped
pub fn max_gini(records: &[IncomeRecord]) -> Option<f64> {
    records
        .iter()
        .map(|r| r.gini_index)
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
}

// ============================================================================
// LOADER
// ============================================================================

pub fn load_csv(csv_path: &Path) -> Result<Table> {
    let file = File::open(csv_path).map_err(|source| DashboardError::DataUnavailable {
        path: csv_path.to_path_buf(),
        source,
    })?;

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = rdr
        .headers()
        .map_err(|e| csv_error(csv_path, e))?
        .clone();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(DashboardError::SchemaError { missing });
    }

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: IncomeRecord = result.map_err(|e| csv_error(csv_path, e))?;
        records.push(record);
    }

    let table = Table::from_records(records);
    log::info!(
        "Loaded {} records ({} years, {} countries) from {}",
        table.len(),
        table.years().len(),
        table.countries().len(),
        csv_path.display()
    );

    Ok(table)
}

/// I/O failures mid-read are still "unavailable"; everything else is a bad row
fn csv_error(csv_path: &Path, err: csv::Error) -> DashboardError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    let message = err.to_string();

    match err.into_kind() {
        csv::ErrorKind::Io(source) => DashboardError::DataUnavailable {
            path: csv_path.to_path_buf(),
            source,
        },
        _ => DashboardError::InvalidRecord { line, message },
    }
}
