//! Mate puzzle generator
//!
//! Downloads a chess.com player's games, evaluates every position with a UCI
//! engine and writes the forced-mate positions out as a puzzle catalog.

use clap::Parser;
use tracing::info;

use puzzle_generator::logging::log_filter;
use puzzle_generator::GeneratorConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file for local dev
    let _ = dotenvy::dotenv();

    // Initialize tracing
    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .init();

    let config = GeneratorConfig::parse();
    info!(
        username = %config.username,
        games = config.max_games,
        output = %config.output.display(),
        "Generating checkmate puzzles"
    );

    let report = puzzle_generator::run(&config).await?;
    info!(puzzles = report.catalog.len(), "Done");

    Ok(())
}
