use anyhow::{bail, Context, Result};
use clap::Parser;
use gini_dashboard::cli::{Cli, Commands};
use gini_dashboard::{format_or, init_logging, load_csv, Dashboard, PLACEHOLDER};

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    // Load once; every command works off this table
    let table = load_csv(&cli.data)
        .with_context(|| format!("Failed to load dataset {}", cli.data.display()))?;
    let dashboard = Dashboard::new(table);

    let year = match cli.year.or_else(|| dashboard.default_year()) {
        Some(year) => year,
        None => bail!("Dataset {} contains no records", cli.data.display()),
    };

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => run_ui_mode(&dashboard, year, cli.theme)?,
        Commands::Summary { top } => run_summary(&dashboard, year, top)?,
        Commands::Export => run_export(&dashboard, year, cli.theme)?,
    }

    Ok(())
}

fn run_summary(dashboard: &Dashboard, year: i32, top: usize) -> Result<()> {
    println!("💸 Gini Index Dashboard - {}", year);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let ranked = dashboard.ranked(year);
    if ranked.is_empty() {
        println!("\n⚠️  No records for {}", year);
        println!("   Available years: {:?}", dashboard.years());
        return Ok(());
    }

    let headlines = dashboard.headlines(year);
    println!("\n📈 Gains/Losses vs {}", year.saturating_sub(1));
    for (icon, metric) in [("▲", &headlines.gain), ("▼", &headlines.loss)] {
        if metric.is_placeholder() {
            println!("  {} {}", icon, PLACEHOLDER);
        } else {
            println!("  {} {:<30} {:>8} ({})", icon, metric.label, metric.value, metric.delta);
        }
    }

    println!("\n🏆 Top Countries");
    for (rank, record) in ranked.iter().take(top).enumerate() {
        println!(
            "  {:>3}. {:<30} {:>8}",
            rank + 1,
            record.country,
            format_or(record.gini_index, PLACEHOLDER)
        );
    }
    println!("\n✓ {} countries reported for {}", ranked.len(), year);

    Ok(())
}

fn run_export(dashboard: &Dashboard, year: i32, theme: gini_dashboard::ColorTheme) -> Result<()> {
    let view = dashboard.view(year, theme)?;
    let json = serde_json::to_string_pretty(&view).context("Failed to serialize dashboard view")?;
    println!("{}", json);
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(dashboard: &Dashboard, year: i32, theme: gini_dashboard::ColorTheme) -> Result<()> {
    let mut app = gini_dashboard::ui::App::new(dashboard, year, theme);
    gini_dashboard::ui::run_ui(&mut app)?;

    println!("\n✅ Dashboard closed");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_dashboard: &Dashboard, _year: i32, _theme: gini_dashboard::ColorTheme) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use: gini-dashboard summary");
    std::process::exit(1);
}
