//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument
//! parsing and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use super::constants::{DEFAULT_CALL_DELAY_MS, DEFAULT_TIMEOUT_SECS, PRICING_ENDPOINT};
use crate::catalog::ServiceTier;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Which service tiers to generate tables for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TierSelection {
    /// Standard tier only.
    Standard,
    /// Express tier only.
    Express,
    /// Both tiers, Standard first.
    Both,
}

impl TierSelection {
    /// The tiers this selection expands to, in generation order.
    pub fn tiers(&self) -> Vec<ServiceTier> {
        match self {
            TierSelection::Standard => vec![ServiceTier::Standard],
            TierSelection::Express => vec![ServiceTier::Express],
            TierSelection::Both => vec![ServiceTier::Standard, ServiceTier::Express],
        }
    }
}

/// Application configuration, parsed from CLI arguments and environment.
///
/// Credentials fall back to the `TOTAL_EXPRESS_USERNAME` /
/// `TOTAL_EXPRESS_PASSWORD` environment variables, which the binary also
/// loads from a `.env` file when present.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "shipping_table",
    about = "Builds offline shipping-cost tables from the Total Express freight quote API",
    version
)]
pub struct Config {
    /// Service tier(s) to generate tables for
    #[arg(long, value_enum, default_value = "both")]
    pub tier: TierSelection,

    /// Directory where the CSV tables are written
    #[arg(long, default_value = "./output")]
    pub output_dir: PathBuf,

    /// Freight quote endpoint (override when testing against a stub)
    #[arg(long, default_value = PRICING_ENDPOINT)]
    pub endpoint: String,

    /// API username (HTTP Basic authentication)
    #[arg(long, env = "TOTAL_EXPRESS_USERNAME", hide_env_values = true)]
    pub username: String,

    /// API password (HTTP Basic authentication)
    #[arg(long, env = "TOTAL_EXPRESS_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Delay between consecutive quote calls in milliseconds
    #[arg(long, default_value_t = DEFAULT_CALL_DELAY_MS)]
    pub call_delay_ms: u64,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,
}
