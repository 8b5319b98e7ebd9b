// Gini Index Dashboard - Core Library
// Exposes the data core for the terminal dashboard, the API server, and tests

pub mod error;
pub mod dataset;
pub mod slice;
pub mod join;
pub mod difference;  // Year-over-year engine
pub mod format;
pub mod theme;
pub mod charts;
pub mod dashboard;
pub mod cli;

#[cfg(feature = "tui")]
pub mod ui;

#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use error::{DashboardError, Result};
pub use dataset::{IncomeRecord, Table, load_csv, max_gini, REQUIRED_COLUMNS};
pub use slice::{filter_year, year_slice};
pub use join::inner_join;
pub use difference::{DifferenceRecord, compute_differences, extremes};
pub use format::{format_number, format_or};
pub use theme::{ColorTheme, DonutColor};
pub use charts::{make_choropleth, make_donut, make_heatmap};
pub use dashboard::{Charts, Dashboard, DashboardView, Headlines, Metric, Migration, PLACEHOLDER};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default dataset location, relative to the working directory
pub const DEFAULT_DATA_PATH: &str = "global_income_inequality_reshaped.csv";

/// Dataset attribution shown in the About panels
pub const DATA_SOURCE: &str = "https://www.kaggle.com/datasets/georgehanyfouad/global-income-inequality";

pub const GINI_ABOUT: &str = "In economics, the Gini coefficient, also known as the Gini index or Gini ratio, \
is a measure of statistical dispersion intended to represent the income inequality, \
the wealth inequality, or the consumption inequality within a nation or a social group.";

/// Initialize env_logger with `info` as the default level
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
