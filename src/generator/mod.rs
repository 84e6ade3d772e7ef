//! Table generation: the nested iteration driving one quote per cell.
//!
//! The generator walks the Cartesian product of postal ranges (outer) and
//! weight brackets (inner), issues one pricing call per cell with a fixed
//! delay between consecutive calls, and classifies every outcome: quoted
//! cells become output rows, recoverable failures are logged and skipped,
//! and an authentication failure aborts the run before any file is written.

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::app::log_progress;
use crate::catalog::{self, PostalRange, ServiceTier, WeightBracket};
use crate::client::{PricingClient, QuoteRequest, QuoteResult};
use crate::config::{DECLARED_VALUE, PACKAGE_DIMENSIONS, PROGRESS_LOG_INTERVAL_CELLS};
use crate::error_handling::{FailureStats, GenerationError, QuoteError, QuoteErrorKind};
use crate::export::{self, OutputRow};

/// Outcome of a single cell, separating the fail-soft and fail-fast paths.
///
/// Tagging the outcome up front lets the run loop branch on policy without
/// exception-style control flow: `Skipped` keeps the batch going, `Fatal`
/// short-circuits it.
#[derive(Debug)]
pub enum CellOutcome {
    /// The cell was quoted; a row will be emitted.
    Quoted(QuoteResult),
    /// The cell failed recoverably; it is logged and the run continues.
    Skipped(QuoteError),
    /// The failure dooms every remaining cell; the run aborts.
    Fatal(QuoteError),
}

impl CellOutcome {
    /// Classifies a raw quote result into the run policy it triggers.
    pub fn from_quote(result: Result<QuoteResult, QuoteError>) -> Self {
        match result {
            Ok(quote) => CellOutcome::Quoted(quote),
            Err(error) if error.is_fatal() => CellOutcome::Fatal(error),
            Err(error) => CellOutcome::Skipped(error),
        }
    }
}

/// A cell that failed recoverably during a run.
#[derive(Debug, Clone)]
pub struct CellFailure {
    /// Label of the postal range.
    pub range_label: &'static str,
    /// First postal code of the range.
    pub zip_start: u32,
    /// Last postal code of the range.
    pub zip_end: u32,
    /// Bracket lower bound in grams.
    pub weight_start_grams: u32,
    /// Bracket upper bound in grams.
    pub weight_end_grams: u32,
    /// Tier being priced when the cell failed.
    pub tier: ServiceTier,
    /// Error kind tag.
    pub kind: QuoteErrorKind,
    /// Rendered error message.
    pub message: String,
}

/// Results of one tier's table run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Tier the table was generated for.
    pub tier: ServiceTier,
    /// Total number of cells in the catalog product.
    pub total_cells: usize,
    /// Number of cells successfully quoted (rows written).
    pub succeeded: usize,
    /// Number of cells skipped on recoverable failures.
    pub failed: usize,
    /// Path of the written CSV file.
    pub output_path: PathBuf,
    /// Run-level failure log, one entry per skipped cell.
    pub failures: Vec<CellFailure>,
    /// Elapsed time in seconds.
    pub elapsed_seconds: f64,
}

/// Drives the full batch for a tier: iterate, quote, classify, persist.
///
/// The inter-call delay is enforced between every two consecutive quote
/// calls issued through the same generator, including across tier runs:
/// the generator remembers when its last call completed, so the first cell
/// of a second tier is paced against the last cell of the first.
pub struct TableGenerator<'a, C> {
    client: &'a C,
    postal_ranges: &'a [PostalRange],
    weight_brackets: &'a [WeightBracket],
    call_delay: Duration,
    last_call: Cell<Option<Instant>>,
    stats: Arc<FailureStats>,
}

impl<'a, C: PricingClient> TableGenerator<'a, C> {
    /// Creates a generator over the built-in catalogs.
    pub fn new(client: &'a C, call_delay: Duration) -> Self {
        Self::with_catalogs(
            client,
            catalog::postal_ranges(),
            catalog::weight_brackets(),
            call_delay,
        )
    }

    /// Creates a generator over caller-supplied catalogs.
    pub fn with_catalogs(
        client: &'a C,
        postal_ranges: &'a [PostalRange],
        weight_brackets: &'a [WeightBracket],
        call_delay: Duration,
    ) -> Self {
        TableGenerator {
            client,
            postal_ranges,
            weight_brackets,
            call_delay,
            last_call: Cell::new(None),
            stats: Arc::new(FailureStats::new()),
        }
    }

    /// Waits out the remainder of the inter-call delay since the last quote
    /// call issued by this generator, whichever run it belonged to.
    async fn pace(&self) {
        if let Some(last_call) = self.last_call.get() {
            let remaining = self.call_delay.saturating_sub(last_call.elapsed());
            if !remaining.is_zero() {
                tokio::time::sleep(remaining).await;
            }
        }
    }

    /// The failure counter table shared by every run of this generator.
    pub fn failure_stats(&self) -> Arc<FailureStats> {
        Arc::clone(&self.stats)
    }

    /// Generates the lookup table for one tier and writes it to `output_path`.
    ///
    /// Issues one quote call per (range, bracket) cell in catalog order,
    /// range-major. A recoverable failure skips the cell; an authentication
    /// failure aborts the run and nothing is written. The mandatory
    /// inter-call delay applies between every two consecutive calls,
    /// whatever the prior outcome, and carries over from an earlier run of
    /// this generator, so a two-tier batch is paced across the tier
    /// boundary too.
    pub async fn generate_table(
        &self,
        tier: ServiceTier,
        output_path: &Path,
    ) -> Result<RunSummary, GenerationError> {
        catalog::validate_catalogs(self.postal_ranges, self.weight_brackets)?;

        let total_cells = self.postal_ranges.len() * self.weight_brackets.len();
        let start_time = Instant::now();
        info!("Starting {} table generation: {} cells", tier, total_cells);

        let mut rows: Vec<OutputRow> = Vec::with_capacity(total_cells);
        let mut failures: Vec<CellFailure> = Vec::new();
        let mut cells_attempted = 0usize;

        for range in self.postal_ranges {
            debug!(
                "Quoting {} ({:08}-{:08})",
                range.label, range.start, range.end
            );
            for bracket in self.weight_brackets {
                self.pace().await;
                cells_attempted += 1;

                let request = QuoteRequest {
                    tier,
                    destination: range.start,
                    weight_grams: bracket.midpoint_grams(),
                    declared_value: DECLARED_VALUE,
                    dimensions: PACKAGE_DIMENSIONS,
                };

                let result = self.client.quote(&request).await;
                self.last_call.set(Some(Instant::now()));

                match CellOutcome::from_quote(result) {
                    CellOutcome::Quoted(quote) => {
                        rows.push(OutputRow {
                            zip_start: range.start,
                            zip_end: range.end,
                            weight_start_grams: bracket.start_grams,
                            weight_end_grams: bracket.end_grams,
                            money_cost: quote.money_cost,
                            time_days: quote.time_days,
                        });
                    }
                    CellOutcome::Skipped(error) => {
                        self.stats.increment(error.kind());
                        warn!(
                            "Skipping cell {} {}g-{}g ({}): {}",
                            range.label, bracket.start_grams, bracket.end_grams, tier, error
                        );
                        failures.push(CellFailure {
                            range_label: range.label,
                            zip_start: range.start,
                            zip_end: range.end,
                            weight_start_grams: bracket.start_grams,
                            weight_end_grams: bracket.end_grams,
                            tier,
                            kind: error.kind(),
                            message: error.to_string(),
                        });
                    }
                    CellOutcome::Fatal(error) => {
                        return Err(GenerationError::Fatal {
                            cells_attempted,
                            source: error,
                        });
                    }
                }

                if cells_attempted % PROGRESS_LOG_INTERVAL_CELLS == 0 {
                    log_progress(start_time, cells_attempted, total_cells);
                }
            }
        }

        export::write_table(output_path, &rows).map_err(|source| GenerationError::Output {
            path: output_path.to_path_buf(),
            source,
        })?;

        let summary = RunSummary {
            tier,
            total_cells,
            succeeded: rows.len(),
            failed: failures.len(),
            output_path: output_path.to_path_buf(),
            failures,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        };
        info!(
            "Completed {} table: {} of {} cells quoted ({} failed) in {:.1}s",
            tier, summary.succeeded, summary.total_cells, summary.failed, summary.elapsed_seconds
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_classification() {
        let quoted = CellOutcome::from_quote(Ok(QuoteResult {
            money_cost: 11.08,
            time_days: 4,
        }));
        assert!(matches!(quoted, CellOutcome::Quoted(_)));

        let fatal =
            CellOutcome::from_quote(Err(QuoteError::Authentication { status: 401 }));
        assert!(matches!(fatal, CellOutcome::Fatal(_)));

        let skipped =
            CellOutcome::from_quote(Err(QuoteError::MalformedResponse("no fields".into())));
        assert!(matches!(skipped, CellOutcome::Skipped(_)));
    }
}
