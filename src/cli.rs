// ⚙️ Command-line configuration for both binaries

use crate::theme::ColorTheme;
use crate::DEFAULT_DATA_PATH;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "gini-dashboard", version, about = "Gini Index dashboard")]
pub struct Cli {
    /// CSV with Year, Country, Country_codes, Gini_Index columns
    #[arg(long, env = "GINI_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Initial year (defaults to the latest year in the data)
    #[arg(long)]
    pub year: Option<i32>,

    /// Initial color theme
    #[arg(long, value_enum, default_value_t = ColorTheme::Blues)]
    pub theme: ColorTheme,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Commands {
    /// Interactive terminal dashboard (default)
    Tui,
    /// Print gains/losses and the top of the ranking for one year
    Summary {
        /// Number of ranked countries to print
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Write the full dashboard view for one year as JSON to stdout
    Export,
}

#[derive(Debug, Parser)]
#[command(name = "gini-server", version, about = "Gini Index dashboard web server")]
pub struct ServerArgs {
    /// CSV with Year, Country, Country_codes, Gini_Index columns
    #[arg(long, env = "GINI_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Listen address
    #[arg(long, env = "GINI_ADDR", default_value = "0.0.0.0:3000")]
    pub addr: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["gini-dashboard"]).unwrap();
        assert_eq!(cli.year, None);
        assert_eq!(cli.theme, ColorTheme::Blues);
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_summary_with_selection() {
        let cli = Cli::try_parse_from([
            "gini-dashboard",
            "--data",
            "panel.csv",
            "--year",
            "2015",
            "--theme",
            "viridis",
            "summary",
            "--top",
            "3",
        ])
        .unwrap();

        assert_eq!(cli.data, PathBuf::from("panel.csv"));
        assert_eq!(cli.year, Some(2015));
        assert_eq!(cli.theme, ColorTheme::Viridis);
        assert_eq!(cli.command, Some(Commands::Summary { top: 3 }));
    }

    #[test]
    fn test_unknown_theme_rejected() {
        assert!(Cli::try_parse_from(["gini-dashboard", "--theme", "sepia"]).is_err());
    }

    #[test]
    fn test_server_addr() {
        let args = ServerArgs::try_parse_from(["gini-server", "--addr", "127.0.0.1:8080"]).unwrap();
        assert_eq!(args.addr, "127.0.0.1:8080");
    }
}
