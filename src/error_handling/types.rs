//! Error type definitions.
//!
//! This module defines all error types used throughout the application. The
//! quote-level taxonomy is deliberately small: authentication failures are
//! fatal to a whole run, transport and malformed-response failures are
//! per-cell and recoverable.

use std::path::PathBuf;

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] reqwest::Error),
}

/// A single quote call failed.
///
/// Every variant is surfaced to the caller as-is; the pricing client never
/// converts a failure into a zero-value quote. The generator decides which
/// variants abort the run and which skip the cell.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// The endpoint rejected our credentials (HTTP 401/403). No further
    /// cell can succeed, so the generator treats this as fatal.
    #[error("credentials rejected by the pricing endpoint (HTTP {status})")]
    Authentication {
        /// HTTP status code returned by the endpoint.
        status: u16,
    },

    /// The request never produced a usable response: connection failure,
    /// timeout, or a non-auth HTTP error status.
    #[error("transport failure reaching the pricing endpoint: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The response arrived but the expected numeric fields could not be
    /// extracted, or the provider declined to quote the cell.
    #[error("malformed pricing response: {0}")]
    MalformedResponse(String),
}

impl QuoteError {
    /// The kind tag for this error, used for failure accounting.
    pub fn kind(&self) -> QuoteErrorKind {
        match self {
            QuoteError::Authentication { .. } => QuoteErrorKind::Authentication,
            QuoteError::Transport(_) => QuoteErrorKind::Transport,
            QuoteError::MalformedResponse(_) => QuoteErrorKind::MalformedResponse,
        }
    }

    /// Whether this error dooms every remaining cell of the run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, QuoteError::Authentication { .. })
    }

    /// Whether this is a transient connection-level failure worth one
    /// immediate retry. HTTP error statuses and parse failures are not.
    pub fn is_transient_transport(&self) -> bool {
        match self {
            QuoteError::Transport(source) => source
                .downcast_ref::<reqwest::Error>()
                .map(|e| e.is_connect() || e.is_timeout())
                .unwrap_or(false),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for QuoteError {
    fn from(error: reqwest::Error) -> Self {
        QuoteError::Transport(Box::new(error))
    }
}

/// Kind tags for [`QuoteError`], used for failure counters and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum QuoteErrorKind {
    /// Credentials rejected.
    Authentication,
    /// Connection-level or HTTP-status failure.
    Transport,
    /// Response could not be parsed or the quote was declined.
    MalformedResponse,
}

impl QuoteErrorKind {
    /// Returns a human-readable string representation of the error kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteErrorKind::Authentication => "Authentication rejected",
            QuoteErrorKind::Transport => "Transport failure",
            QuoteErrorKind::MalformedResponse => "Malformed response",
        }
    }
}

impl std::fmt::Display for QuoteErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invalid range/bracket configuration, detected at startup before any RPC.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// The postal range catalog has no entries.
    #[error("postal range catalog is empty")]
    EmptyPostalCatalog,

    /// A postal range has `start > end`.
    #[error("postal range {label} is inverted ({start} > {end})")]
    InvertedPostalRange {
        /// Label of the offending range.
        label: &'static str,
        /// Range start.
        start: u32,
        /// Range end.
        end: u32,
    },

    /// A postal range bound does not fit in eight digits.
    #[error("postal range {label} exceeds eight digits (end {end})")]
    PostalCodeTooWide {
        /// Label of the offending range.
        label: &'static str,
        /// Range end.
        end: u32,
    },

    /// The weight bracket catalog has no entries.
    #[error("weight bracket catalog is empty")]
    EmptyWeightCatalog,

    /// A weight bracket has `start > end`.
    #[error("weight bracket {start_grams}g-{end_grams}g is inverted")]
    InvertedWeightBracket {
        /// Bracket start in grams.
        start_grams: u32,
        /// Bracket end in grams.
        end_grams: u32,
    },

    /// Consecutive weight brackets do not tile contiguously.
    #[error("weight brackets are not contiguous: expected a bracket starting at {expected_start_grams}g, found {found_start_grams}g")]
    WeightCoverageGap {
        /// Start the next bracket was expected to have.
        expected_start_grams: u32,
        /// Start actually found.
        found_start_grams: u32,
    },

    /// The last bracket does not reach the expected 10000 g upper bound.
    #[error("weight brackets stop at {last_end_grams}g instead of 10000g")]
    WeightCoverageShortfall {
        /// End of the last bracket.
        last_end_grams: u32,
    },
}

/// A table-generation run failed as a whole.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Catalog validation failed before any RPC was issued.
    #[error("invalid catalog configuration: {0}")]
    Validation(#[from] ValidationError),

    /// A fatal quote error short-circuited the run. No output file is
    /// written in this case.
    #[error("run aborted after {cells_attempted} call(s): {source}")]
    Fatal {
        /// Number of cells attempted before the abort, including the one
        /// that failed.
        cells_attempted: usize,
        /// The fatal quote error.
        #[source]
        source: QuoteError,
    },

    /// The accumulated rows could not be written to the output file.
    #[error("failed to write table to {path}: {source}")]
    Output {
        /// Path of the output file.
        path: PathBuf,
        /// Underlying CSV/IO error.
        #[source]
        source: csv::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_quote_error_kinds() {
        let auth = QuoteError::Authentication { status: 401 };
        assert_eq!(auth.kind(), QuoteErrorKind::Authentication);
        assert!(auth.is_fatal());

        let transport = QuoteError::Transport(Box::new(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        )));
        assert_eq!(transport.kind(), QuoteErrorKind::Transport);
        assert!(!transport.is_fatal());

        let malformed = QuoteError::MalformedResponse("missing Prazo".into());
        assert_eq!(malformed.kind(), QuoteErrorKind::MalformedResponse);
        assert!(!malformed.is_fatal());
    }

    #[test]
    fn test_non_reqwest_transport_is_not_transient() {
        // Only connection-level reqwest errors qualify for the immediate retry
        let transport = QuoteError::Transport(Box::new(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        )));
        assert!(!transport.is_transient_transport());

        let malformed = QuoteError::MalformedResponse("garbage".into());
        assert!(!malformed.is_transient_transport());
    }

    #[test]
    fn test_all_error_kinds_have_string_representation() {
        for kind in QuoteErrorKind::iter() {
            assert!(!kind.as_str().is_empty(), "{:?} should have non-empty string", kind);
        }
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::InvertedPostalRange {
            label: "São Paulo (SP)",
            start: 2,
            end: 1,
        };
        assert_eq!(err.to_string(), "postal range São Paulo (SP) is inverted (2 > 1)");
    }

    #[test]
    fn test_generation_error_reports_fatal_cause() {
        let err = GenerationError::Fatal {
            cells_attempted: 1,
            source: QuoteError::Authentication { status: 403 },
        };
        let rendered = err.to_string();
        assert!(rendered.contains("aborted after 1 call(s)"));
        assert!(rendered.contains("HTTP 403"));
    }
}
