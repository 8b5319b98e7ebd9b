// Year Slice - records of one year, natural or ranked order

use crate::dataset::{IncomeRecord, Table};
use std::cmp::Ordering;

/// Records for `year` in table order
pub fn filter_year(table: &Table, year: i32) -> Vec<IncomeRecord> {
    table.iter().filter(|r| r.year == year).cloned().collect()
}

/// Records for `year` ranked by index, highest first.
///
/// Ties keep table order. An unknown year yields an empty Vec.
pub fn year_slice(table: &Table, year: i32) -> Vec<IncomeRecord> {
    let mut slice = filter_year(table, year);
    // sort_by is stable
    slice.sort_by(|a, b| descending(a.gini_index, b.gini_index));
    slice
}

/// Descending comparison on raw f64 (no epsilon); NaN sorts last
pub(crate) fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(records: &[IncomeRecord]) -> Vec<&str> {
        records.iter().map(|r| r.country.as_str()).collect()
    }

    #[test]
    fn test_slice_ranks_descending_with_stable_ties() {
        let table = Table::from_records(vec![
            IncomeRecord::new(2019, "A", "AAA", 30.0),
            IncomeRecord::new(2019, "B", "BBB", 45.0),
            IncomeRecord::new(2019, "C", "CCC", 45.0),
        ]);

        let slice = year_slice(&table, 2019);

        assert_eq!(names(&slice), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_slice_filters_other_years() {
        let table = Table::from_records(vec![
            IncomeRecord::new(2018, "A", "AAA", 50.0),
            IncomeRecord::new(2019, "A", "AAA", 30.0),
            IncomeRecord::new(2020, "B", "BBB", 60.0),
            IncomeRecord::new(2019, "B", "BBB", 35.0),
        ]);

        let slice = year_slice(&table, 2019);

        assert_eq!(names(&slice), vec!["B", "A"]);
        assert!(slice.iter().all(|r| r.year == 2019));
    }

    #[test]
    fn test_filter_year_keeps_table_order() {
        let table = Table::from_records(vec![
            IncomeRecord::new(2019, "A", "AAA", 30.0),
            IncomeRecord::new(2019, "B", "BBB", 45.0),
        ]);

        assert_eq!(names(&filter_year(&table, 2019)), vec!["A", "B"]);
    }

    #[test]
    fn test_unknown_year_is_empty() {
        let table = Table::from_records(vec![IncomeRecord::new(2019, "A", "AAA", 30.0)]);
        assert!(year_slice(&table, 1990).is_empty());
    }

    #[test]
    fn test_descending_puts_nan_last() {
        let mut values = vec![f64::NAN, 1.0, 3.0];
        values.sort_by(|a, b| descending(*a, *b));
        assert_eq!(values[0], 3.0);
        assert_eq!(values[1], 1.0);
        assert!(values[2].is_nan());
    }
}
