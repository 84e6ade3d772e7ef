//! Failure statistics tracking.
//!
//! Per-kind counters for cells skipped during a run, printed as part of the
//! end-of-run summary. All kinds are initialized to zero on creation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::QuoteErrorKind;

/// Failure counter table, one counter per [`QuoteErrorKind`].
///
/// Counters are atomic so the table can be shared behind an `Arc` between the
/// generator and the summary printer without locking.
pub struct FailureStats {
    counts: HashMap<QuoteErrorKind, AtomicUsize>,
}

impl FailureStats {
    /// Creates a new table with every kind initialized to zero.
    pub fn new() -> Self {
        let mut counts = HashMap::new();
        for kind in QuoteErrorKind::iter() {
            counts.insert(kind, AtomicUsize::new(0));
        }
        FailureStats { counts }
    }

    /// Increment the counter for an error kind.
    ///
    /// All kinds are initialized in the constructor; a missing entry
    /// indicates a bug and is logged rather than panicking.
    pub fn increment(&self, kind: QuoteErrorKind) {
        if let Some(counter) = self.counts.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment failure counter for {:?} which is not in the map. \
                 This indicates a bug in FailureStats initialization.",
                kind
            );
        }
    }

    /// Get the count for an error kind.
    pub fn count(&self, kind: QuoteErrorKind) -> usize {
        self.counts
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get the total failure count across all kinds.
    pub fn total(&self) -> usize {
        QuoteErrorKind::iter().map(|k| self.count(k)).sum()
    }
}

impl Default for FailureStats {
    fn default() -> Self {
        Self::new()
    }
}
