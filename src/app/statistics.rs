//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{FailureStats, QuoteErrorKind};

/// Prints the per-kind failure counts accumulated over a run.
///
/// Works with both plain and JSON log formats (`log::info!` handles
/// formatting).
pub fn print_failure_statistics(stats: &FailureStats) {
    let total = stats.total();
    if total == 0 {
        info!("No failed cells");
        return;
    }

    info!("Failed cells by error kind ({} total):", total);
    for kind in QuoteErrorKind::iter() {
        let count = stats.count(kind);
        if count > 0 {
            info!("  {}: {}", kind, count);
        }
    }
}
