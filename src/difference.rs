// 📈 Difference Engine - year-over-year Gini Index migrations
// Joins a year with the year before on country code, gains first

use crate::dataset::{IncomeRecord, Table};
use crate::join::inner_join;
use crate::slice::{descending, filter_year};
use serde::{Deserialize, Serialize};

// ============================================================================
// DIFFERENCE RECORD
// ============================================================================

/// Change of one country's index versus the previous year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferenceRecord {
    #[serde(rename = "Country")]
    pub country: String,

    #[serde(rename = "Country_codes")]
    pub country_code: String,

    /// Current year's value
    #[serde(rename = "Gini_Index")]
    pub gini_index: f64,

    /// current - previous
    #[serde(rename = "Gini_difference")]
    pub gini_difference: f64,

    #[serde(rename = "Gini_absolute_difference")]
    pub gini_absolute_difference: f64,
}

impl DifferenceRecord {
    fn between(current: &IncomeRecord, previous: &IncomeRecord) -> Self {
        let gini_difference = current.gini_index - previous.gini_index;

        DifferenceRecord {
            country: current.country.clone(),
            country_code: current.country_code.clone(),
            gini_index: current.gini_index,
            gini_difference,
            gini_absolute_difference: gini_difference.abs(),
        }
    }

    pub fn is_gain(&self) -> bool {
        self.gini_difference > 0.0
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// Per-country change between `year` and `year - 1`.
///
/// Only countries observed in both years appear. Sorted by difference,
/// largest gain first; equal differences fall back to country name.
/// Returns an empty Vec when either year has no data.
pub fn compute_differences(table: &Table, year: i32) -> Vec<DifferenceRecord> {
    let current = filter_year(table, year);
    let previous = match year.checked_sub(1) {
        Some(prev_year) => filter_year(table, prev_year),
        None => Vec::new(),
    };

    let mut differences = inner_join(
        &current,
        &previous,
        |r| r.country_code.clone(),
        |r| r.country_code.clone(),
        DifferenceRecord::between,
    );

    differences.sort_by(|a, b| {
        descending(a.gini_difference, b.gini_difference)
            .then_with(|| a.country.cmp(&b.country))
    });

    log::debug!(
        "Year {}: {} current, {} previous, {} matched",
        year,
        current.len(),
        previous.len(),
        differences.len()
    );

    differences
}

/// Largest gain and largest loss among the finite differences.
///
/// None when no difference is finite (or the input is empty).
pub fn extremes(differences: &[DifferenceRecord]) -> Option<(&DifferenceRecord, &DifferenceRecord)> {
    let mut finite = differences.iter().filter(|d| d.gini_difference.is_finite());
    let first = finite.next()?;
    let last = finite.last().unwrap_or(first);
    Some((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> Table {
        Table::from_records(vec![
            IncomeRecord::new(2017, "Brazil", "BRA", 53.3),
            IncomeRecord::new(2018, "Brazil", "BRA", 53.9),
            IncomeRecord::new(2018, "Chile", "CHL", 44.4),
            IncomeRecord::new(2018, "Norway", "NOR", 27.6),
            IncomeRecord::new(2019, "Brazil", "BRA", 53.4),
            IncomeRecord::new(2019, "Chile", "CHL", 45.0),
            IncomeRecord::new(2019, "Norway", "NOR", 27.7),
            IncomeRecord::new(2019, "Peru", "PER", 41.5),
        ])
    }

    #[test]
    fn test_single_match_example() {
        let table = Table::from_records(vec![
            IncomeRecord::new(2018, "X", "XXX", 40.0),
            IncomeRecord::new(2019, "X", "XXX", 42.5),
            IncomeRecord::new(2019, "Y", "YYY", 33.0),
        ]);

        let diffs = compute_differences(&table, 2019);

        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].country, "X");
        assert_eq!(diffs[0].country_code, "XXX");
        assert_eq!(diffs[0].gini_index, 42.5);
        assert_eq!(diffs[0].gini_difference, 2.5);
        assert_eq!(diffs[0].gini_absolute_difference, 2.5);
    }

    #[test]
    fn test_join_excludes_unmatched_countries() {
        let diffs = compute_differences(&panel(), 2019);

        let codes: Vec<&str> = diffs.iter().map(|d| d.country_code.as_str()).collect();
        assert_eq!(codes.len(), 3);
        for code in ["BRA", "CHL", "NOR"] {
            assert_eq!(codes.iter().filter(|c| **c == code).count(), 1);
        }
        assert!(!codes.contains(&"PER"));
    }

    #[test]
    fn test_difference_arithmetic() {
        let table = panel();
        let diffs = compute_differences(&table, 2019);

        for d in &diffs {
            let prev = table
                .iter()
                .find(|r| r.year == 2018 && r.country_code == d.country_code)
                .unwrap();
            assert_eq!(d.gini_difference, d.gini_index - prev.gini_index);
            assert_eq!(d.gini_absolute_difference, d.gini_difference.abs());
        }
    }

    #[test]
    fn test_sorted_gain_first() {
        let diffs = compute_differences(&panel(), 2019);

        assert!(diffs
            .windows(2)
            .all(|w| w[0].gini_difference >= w[1].gini_difference));
        assert_eq!(diffs.first().unwrap().country, "Chile");
        assert_eq!(diffs.last().unwrap().country, "Brazil");
    }

    #[test]
    fn test_earliest_year_is_empty() {
        let table = panel();
        let diffs = compute_differences(&table, table.min_year().unwrap());
        assert!(diffs.is_empty());
    }

    #[test]
    fn test_unknown_year_is_empty() {
        assert!(compute_differences(&panel(), 1950).is_empty());
        assert!(compute_differences(&panel(), i32::MIN).is_empty());
    }

    #[test]
    fn test_equal_differences_ordered_by_name() {
        let table = Table::from_records(vec![
            IncomeRecord::new(2018, "Zambia", "ZMB", 50.0),
            IncomeRecord::new(2018, "Angola", "AGO", 40.0),
            IncomeRecord::new(2019, "Zambia", "ZMB", 51.0),
            IncomeRecord::new(2019, "Angola", "AGO", 41.0),
        ]);

        let diffs = compute_differences(&table, 2019);

        assert_eq!(diffs[0].country, "Angola");
        assert_eq!(diffs[1].country, "Zambia");
    }

    #[test]
    fn test_losses_have_positive_absolute_difference() {
        let table = Table::from_records(vec![
            IncomeRecord::new(2018, "Chile", "CHL", 46.0),
            IncomeRecord::new(2019, "Chile", "CHL", 44.0),
        ]);

        let diffs = compute_differences(&table, 2019);

        assert_eq!(diffs[0].gini_difference, -2.0);
        assert_eq!(diffs[0].gini_absolute_difference, 2.0);
        assert!(!diffs[0].is_gain());
    }

    #[test]
    fn test_extremes() {
        let diffs = compute_differences(&panel(), 2019);
        let (gain, loss) = extremes(&diffs).unwrap();
        assert_eq!(gain.country, "Chile");
        assert_eq!(loss.country, "Brazil");

        assert!(extremes(&[]).is_none());
    }

    #[test]
    fn test_extremes_skip_missing_values() {
        let table = Table::from_records(vec![
            IncomeRecord::new(2018, "Brazil", "BRA", 53.9),
            IncomeRecord::new(2018, "Chad", "TCD", 43.3),
            IncomeRecord::new(2018, "Chile", "CHL", 44.4),
            IncomeRecord::new(2019, "Brazil", "BRA", 53.4),
            IncomeRecord::new(2019, "Chad", "TCD", f64::NAN),
            IncomeRecord::new(2019, "Chile", "CHL", 45.0),
        ]);

        let diffs = compute_differences(&table, 2019);
        assert_eq!(diffs.len(), 3);
        assert!(diffs.last().unwrap().gini_difference.is_nan());

        let (gain, loss) = extremes(&diffs).unwrap();
        assert_eq!(gain.country, "Chile");
        assert_eq!(loss.country, "Brazil");

        let only_nan: Vec<DifferenceRecord> = diffs.into_iter().filter(|d| d.country == "Chad").collect();
        assert!(extremes(&only_nan).is_none());
    }
}
