//! Error handling and failure statistics.
//!
//! This module provides:
//! - The quote error taxonomy (authentication / transport / malformed response)
//! - Catalog validation and run-level error types
//! - Per-kind failure counters for the end-of-run summary

mod stats;
mod types;

// Re-export public API
pub use stats::FailureStats;
pub use types::{
    GenerationError, InitializationError, QuoteError, QuoteErrorKind, ValidationError,
};
