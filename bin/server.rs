// Gini Index Dashboard - Web Server

use anyhow::{Context, Result};
use clap::Parser;
use gini_dashboard::cli::ServerArgs;
use gini_dashboard::server::{router, AppState};
use gini_dashboard::{init_logging, load_csv, Dashboard};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let args = ServerArgs::parse();

    println!("🌐 Gini Index Dashboard - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // Load the panel once; every request reads this copy
    let table = load_csv(&args.data)
        .with_context(|| format!("Failed to load dataset {}", args.data.display()))?;
    println!("✓ Dataset loaded: {} records from {:?}", table.len(), args.data);

    let app = router(AppState::new(Dashboard::new(table)));

    let listener = tokio::net::TcpListener::bind(&args.addr)
        .await
        .with_context(|| format!("Failed to bind to {}", args.addr))?;

    println!("\n🚀 Server running on http://{}", args.addr);
    println!("   API: http://{}/api/years", args.addr);
    println!("   UI:  http://{}", args.addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app).await.context("Server stopped unexpectedly")?;

    Ok(())
}
