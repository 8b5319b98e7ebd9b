// 🧭 Dashboard - explicit context over the loaded table
// Every selection recomputes its view from the read-only Table

use crate::charts::{make_choropleth, make_donut, make_heatmap};
use crate::dataset::{max_gini, IncomeRecord, Table};
use crate::difference::{compute_differences, extremes, DifferenceRecord};
use crate::error::{DashboardError, Result};
use crate::format::format_or;
use crate::slice::year_slice;
use crate::theme::{ColorTheme, DonutColor};
use serde::Serialize;

/// Shown instead of a name or value when there is nothing to compare
pub const PLACEHOLDER: &str = "-";

// ============================================================================
// VIEW TYPES
// ============================================================================

/// Headline callout: country, current value, change versus last year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub delta: String,
}

impl Metric {
    pub fn placeholder() -> Self {
        Metric {
            label: PLACEHOLDER.to_string(),
            value: PLACEHOLDER.to_string(),
            delta: String::new(),
        }
    }

    fn from_difference(record: &DifferenceRecord) -> Self {
        Metric {
            label: record.country.clone(),
            value: format_or(record.gini_index, PLACEHOLDER),
            delta: format_or(record.gini_difference, ""),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.label == PLACEHOLDER
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Headlines {
    /// Largest increase
    pub gain: Metric,
    /// Largest decrease
    pub loss: Metric,
}

impl Headlines {
    pub fn from_differences(differences: &[DifferenceRecord]) -> Self {
        match extremes(differences) {
            Some((first, last)) => Headlines {
                gain: Metric::from_difference(first),
                loss: Metric::from_difference(last),
            },
            None => Headlines {
                gain: Metric::placeholder(),
                loss: Metric::placeholder(),
            },
        }
    }
}

/// Whole-percent shares of matched countries that rose / fell
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Migration {
    pub gains_percent: f64,
    pub losses_percent: f64,
}

impl Migration {
    pub fn from_differences(differences: &[DifferenceRecord]) -> Self {
        if differences.is_empty() {
            return Migration {
                gains_percent: 0.0,
                losses_percent: 0.0,
            };
        }

        let total = differences.len() as f64;
        let gains = differences.iter().filter(|d| d.gini_difference > 0.0).count() as f64;
        let losses = differences.iter().filter(|d| d.gini_difference < 0.0).count() as f64;

        Migration {
            gains_percent: (gains / total * 100.0).round(),
            losses_percent: (losses / total * 100.0).round(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Charts {
    pub heatmap: serde_json::Value,
    pub choropleth: serde_json::Value,
    pub gains_donut: serde_json::Value,
    pub losses_donut: serde_json::Value,
}

/// Everything one selection renders
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub year: i32,
    pub theme: ColorTheme,
    pub headlines: Headlines,
    /// Highest index first
    pub ranked: Vec<IncomeRecord>,
    /// Upper bound for progress bars and the map scale
    pub max_index: f64,
    pub differences: Vec<DifferenceRecord>,
    pub migration: Migration,
    pub charts: Charts,
}

// ============================================================================
// DASHBOARD
// ============================================================================

pub struct Dashboard {
    table: Table,
    years: Vec<i32>,
}

impl Dashboard {
    pub fn new(table: Table) -> Self {
        let years = table.years();
        Dashboard { table, years }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Distinct years, latest first
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Latest year, the selector's initial position
    pub fn default_year(&self) -> Option<i32> {
        self.years.first().copied()
    }

    pub fn ranked(&self, year: i32) -> Vec<IncomeRecord> {
        year_slice(&self.table, year)
    }

    pub fn differences(&self, year: i32) -> Vec<DifferenceRecord> {
        compute_differences(&self.table, year)
    }

    pub fn headlines(&self, year: i32) -> Headlines {
        let differences = self.differences(year);
        if differences.is_empty() {
            log::warn!("No year-over-year matches for {}, showing placeholders", year);
        }
        Headlines::from_differences(&differences)
    }

    /// Full view for one selection; `EmptySelection` when the year has no rows
    pub fn view(&self, year: i32, theme: ColorTheme) -> Result<DashboardView> {
        let ranked = self.ranked(year);
        if ranked.is_empty() {
            return Err(DashboardError::EmptySelection { year });
        }

        let differences = self.differences(year);
        if differences.is_empty() {
            log::warn!("No year-over-year matches for {}, showing placeholders", year);
        }

        let headlines = Headlines::from_differences(&differences);
        let migration = Migration::from_differences(&differences);
        let max_index = max_gini(&ranked).unwrap_or(0.0);

        let charts = Charts {
            heatmap: make_heatmap(self.table.records(), theme),
            choropleth: make_choropleth(&ranked, theme),
            gains_donut: make_donut(migration.gains_percent, "Gains", DonutColor::Green),
            losses_donut: make_donut(migration.losses_percent, "Losses", DonutColor::Red),
        };

        log::debug!(
            "View {} ({}): {} ranked, {} differences",
            year,
            theme,
            ranked.len(),
            differences.len()
        );

        Ok(DashboardView {
            year,
            theme,
            headlines,
            ranked,
            max_index,
            differences,
            migration,
            charts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard() -> Dashboard {
        Dashboard::new(Table::from_records(vec![
            IncomeRecord::new(2018, "Brazil", "BRA", 53.9),
            IncomeRecord::new(2018, "Chile", "CHL", 44.4),
            IncomeRecord::new(2018, "Norway", "NOR", 27.6),
            IncomeRecord::new(2019, "Brazil", "BRA", 53.4),
            IncomeRecord::new(2019, "Chile", "CHL", 45.0),
            IncomeRecord::new(2019, "Norway", "NOR", 27.6),
            IncomeRecord::new(2019, "Peru", "PER", 41.5),
        ]))
    }

    #[test]
    fn test_default_year_is_latest() {
        let d = dashboard();
        assert_eq!(d.years(), &[2019, 2018]);
        assert_eq!(d.default_year(), Some(2019));
        assert_eq!(Dashboard::new(Table::default()).default_year(), None);
    }

    #[test]
    fn test_headlines_pick_extremes() {
        let headlines = dashboard().headlines(2019);

        assert_eq!(
            headlines.gain,
            Metric {
                label: "Chile".to_string(),
                value: "45.0".to_string(),
                delta: "0.6".to_string(),
            }
        );
        assert_eq!(headlines.loss.label, "Brazil");
        assert_eq!(headlines.loss.value, "53.4");
        assert_eq!(headlines.loss.delta, "-0.5");
    }

    #[test]
    fn test_earliest_year_gets_placeholders() {
        let headlines = dashboard().headlines(2018);

        assert!(headlines.gain.is_placeholder());
        assert_eq!(headlines.loss, Metric::placeholder());
        assert_eq!(headlines.loss.delta, "");
    }

    #[test]
    fn test_missing_value_never_headlines() {
        let d = Dashboard::new(Table::from_records(vec![
            IncomeRecord::new(2018, "Brazil", "BRA", 53.9),
            IncomeRecord::new(2018, "Chad", "TCD", 43.3),
            IncomeRecord::new(2018, "Chile", "CHL", 44.4),
            IncomeRecord::new(2019, "Brazil", "BRA", 53.4),
            IncomeRecord::new(2019, "Chad", "TCD", f64::NAN),
            IncomeRecord::new(2019, "Chile", "CHL", 45.0),
        ]));

        let headlines = d.headlines(2019);
        assert_eq!(headlines.gain.label, "Chile");
        assert_eq!(headlines.loss.label, "Brazil");
        assert_eq!(headlines.loss.delta, "-0.5");

        let view = d.view(2019, ColorTheme::Blues).unwrap();
        assert_eq!(view.max_index, 53.4);
        assert_eq!(view.charts.choropleth["data"][0]["zmax"], 53.4);
    }

    #[test]
    fn test_view_for_year() {
        let view = dashboard().view(2019, ColorTheme::Greens).unwrap();

        assert_eq!(view.year, 2019);
        assert_eq!(view.ranked.len(), 4);
        assert_eq!(view.ranked[0].country, "Brazil");
        assert_eq!(view.max_index, 53.4);
        assert_eq!(view.differences.len(), 3);
        assert_eq!(view.charts.heatmap["encoding"]["color"]["scale"]["scheme"], "greens");
        assert_eq!(view.charts.choropleth["data"][0]["zmax"], 53.4);
    }

    #[test]
    fn test_view_for_unknown_year_is_empty_selection() {
        match dashboard().view(1990, ColorTheme::Blues) {
            Err(DashboardError::EmptySelection { year }) => assert_eq!(year, 1990),
            other => panic!("expected EmptySelection, got {other:?}"),
        }
    }

    #[test]
    fn test_view_for_earliest_year_still_renders() {
        let view = dashboard().view(2018, ColorTheme::Blues).unwrap();

        assert!(view.differences.is_empty());
        assert!(view.headlines.gain.is_placeholder());
        assert_eq!(view.migration.gains_percent, 0.0);
    }

    #[test]
    fn test_migration_shares() {
        let view = dashboard().view(2019, ColorTheme::Blues).unwrap();

        // Chile up, Brazil down, Norway unchanged
        assert_eq!(view.migration.gains_percent, 33.0);
        assert_eq!(view.migration.losses_percent, 33.0);
        assert_eq!(view.charts.gains_donut["layer"][2]["encoding"]["text"]["value"], "33 %");
    }
}
