//! Progress logging utilities.

use log::info;

/// Logs progress information about cell processing.
pub fn log_progress(start_time: std::time::Instant, completed_cells: usize, total_cells: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        completed_cells as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Quoted {} of {} cells in {:.2} seconds (~{:.2} cells/sec)",
        completed_cells, total_cells, elapsed_secs, rate
    );
}
