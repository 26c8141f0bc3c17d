//! Progress reporting kept out of the render loop.

use std::sync::atomic::{AtomicU32, Ordering};

/// Receives scanline progress from render workers.
///
/// Calls may arrive from several threads at once and in any row order.
pub trait Progress: Sync {
    /// A frame of `total_rows` rows is about to start.
    fn begin(&self, _total_rows: u32) {}

    /// Row `row` has been written to the film.
    fn row_done(&self, row: u32);

    /// All rows are done.
    fn finish(&self) {}
}

/// Discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl Progress for SilentProgress {
    fn row_done(&self, _row: u32) {}
}

/// Reports progress through the `log` facade.
///
/// Every scanline is logged at debug level; completion percentages are
/// logged at info level in steps of `step_percent`.
#[derive(Debug)]
pub struct LogProgress {
    total: AtomicU32,
    done: AtomicU32,
    step_percent: u32,
}

impl LogProgress {
    pub fn new(step_percent: u32) -> Self {
        Self {
            total: AtomicU32::new(0),
            done: AtomicU32::new(0),
            step_percent: step_percent.clamp(1, 100),
        }
    }

    /// Rows reported so far.
    pub fn rows_done(&self) -> u32 {
        self.done.load(Ordering::Relaxed)
    }
}

impl Default for LogProgress {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Progress for LogProgress {
    fn begin(&self, total_rows: u32) {
        self.total.store(total_rows, Ordering::Relaxed);
        self.done.store(0, Ordering::Relaxed);
    }

    fn row_done(&self, row: u32) {
        log::debug!("Scanline {row} done");

        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        let total = self.total.load(Ordering::Relaxed).max(1);
        let percent = done * 100 / total;
        let previous = (done - 1) * 100 / total;
        if percent / self.step_percent != previous / self.step_percent {
            log::info!("Rendered {done}/{total} scanlines ({percent}%)");
        }
    }

    fn finish(&self) {
        log::debug!("Frame complete after {} scanlines", self.rows_done());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_progress_counts_rows() {
        let progress = LogProgress::new(25);
        progress.begin(8);
        for row in (0..8).rev() {
            progress.row_done(row);
        }
        progress.finish();

        assert_eq!(progress.rows_done(), 8);
    }

    #[test]
    fn test_begin_resets_count() {
        let progress = LogProgress::default();
        progress.begin(2);
        progress.row_done(0);
        progress.begin(4);

        assert_eq!(progress.rows_done(), 0);
    }
}
