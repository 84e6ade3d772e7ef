//! shipping_table library: batch generation of shipping-cost lookup tables.
//!
//! This library queries the Total Express freight quote SOAP API across the
//! Cartesian product of Brazilian CEP ranges and weight brackets, one call
//! per cell with a fixed inter-call delay, and writes the quoted costs and
//! transit times to CSV files for offline lookup.
//!
//! # Example
//!
//! ```no_run
//! use clap::Parser;
//! use shipping_table::{run_generation, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::parse_from([
//!     "shipping_table",
//!     "--username", "user",
//!     "--password", "secret",
//!     "--tier", "standard",
//! ]);
//!
//! let report = run_generation(config).await?;
//! for summary in &report.summaries {
//!     println!("{}: {} of {} cells quoted", summary.tier, summary.succeeded, summary.total_cells);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

mod app;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error_handling;
pub mod export;
pub mod generator;
pub mod initialization;

// Re-export public API
pub use catalog::ServiceTier;
pub use config::{Config, LogFormat, LogLevel, TierSelection};
pub use generator::{RunSummary, TableGenerator};
pub use run::{run_generation, GenerationReport};

// Internal run module (contains the main orchestration logic)
mod run {
    use std::time::{Duration, Instant};

    use anyhow::{Context, Result};
    use log::info;

    use crate::app::print_failure_statistics;
    use crate::client::SoapPricingClient;
    use crate::config::Config;
    use crate::generator::{RunSummary, TableGenerator};
    use crate::initialization::init_client;

    /// Results of a table-generation run across the selected tiers.
    #[derive(Debug, Clone)]
    pub struct GenerationReport {
        /// One summary per generated tier table, in generation order.
        pub summaries: Vec<RunSummary>,
        /// Total elapsed time in seconds.
        pub elapsed_seconds: f64,
    }

    /// Runs table generation with the provided configuration.
    ///
    /// This is the main entry point for the library. For each selected tier
    /// it walks the full catalog product, quoting one cell at a time, and
    /// writes that tier's CSV table into the configured output directory.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The HTTP client cannot be initialized
    /// - The output directory cannot be created
    /// - Catalog validation fails
    /// - The endpoint rejects the configured credentials (the run is
    ///   aborted and no file is written for the failing tier)
    /// - A tier's table cannot be written
    pub async fn run_generation(config: Config) -> Result<GenerationReport> {
        let start_time = Instant::now();

        let http = init_client(&config)
            .await
            .context("Failed to initialize HTTP client")?;
        let client = SoapPricingClient::new(
            http,
            config.endpoint.clone(),
            config.username.clone(),
            config.password.clone(),
        );

        std::fs::create_dir_all(&config.output_dir).with_context(|| {
            format!(
                "Failed to create output directory {}",
                config.output_dir.display()
            )
        })?;

        let generator = TableGenerator::new(&client, Duration::from_millis(config.call_delay_ms));
        let stats = generator.failure_stats();

        let tiers = config.tier.tiers();
        let mut summaries = Vec::with_capacity(tiers.len());
        for tier in tiers {
            let output_path = config.output_dir.join(tier.output_file_name());
            info!("Generating {} table: {}", tier, output_path.display());
            let summary = generator
                .generate_table(tier, &output_path)
                .await
                .with_context(|| format!("Failed to generate the {} table", tier))?;
            summaries.push(summary);
        }

        print_failure_statistics(&stats);

        Ok(GenerationReport {
            summaries,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }
}
