// Error taxonomy for the dashboard core
// Load-time errors are fatal, per-selection errors are recovered by callers

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// Input file missing or unreadable
    #[error("dataset unavailable at {}: {source}", .path.display())]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Required columns absent from the header row
    #[error("dataset is missing required column(s): {}", .missing.join(", "))]
    SchemaError { missing: Vec<String> },

    /// A row whose values could not be coerced to the record types
    #[error("invalid record at line {line}: {message}")]
    InvalidRecord { line: u64, message: String },

    /// Selection produced nothing to display
    #[error("no data for year {year}")]
    EmptySelection { year: i32 },

    /// Formatter received a non-finite value
    #[error("cannot format non-finite value {value}")]
    FormatError { value: f64 },

    /// Palette name outside the fixed list
    #[error("unknown color theme '{name}'")]
    UnknownTheme { name: String },
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_lists_columns() {
        let err = DashboardError::SchemaError {
            missing: vec!["Year".to_string(), "Gini_Index".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "dataset is missing required column(s): Year, Gini_Index"
        );
    }

    #[test]
    fn test_data_unavailable_keeps_source() {
        let err = DashboardError::DataUnavailable {
            path: PathBuf::from("missing.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("missing.csv"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
