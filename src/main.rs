//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `shipping_table` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use shipping_table::initialization::init_logger_with;
use shipping_table::{run_generation, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists), so the API
    // credentials don't have to be exported manually. Try the current
    // directory first, then next to the executable.
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    // Parse command-line arguments into Config (after .env is loaded, so the
    // credential env fallbacks are visible)
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Run the generation using the library
    match run_generation(config).await {
        Ok(report) => {
            // Print user-friendly summary
            for summary in &report.summaries {
                println!(
                    "✅ Quoted {} of {} cell{} ({} failed) for the {} tier - table saved to {}",
                    summary.succeeded,
                    summary.total_cells,
                    if summary.total_cells == 1 { "" } else { "s" },
                    summary.failed,
                    summary.tier,
                    summary.output_path.display()
                );
            }
            println!("Finished in {:.1}s", report.elapsed_seconds);
            Ok(())
        }
        Err(e) => {
            eprintln!("shipping_table error: {:#}", e);
            process::exit(1);
        }
    }
}
