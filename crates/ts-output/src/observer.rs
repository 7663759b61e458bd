//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use tracing::warn;

use ts_core::Tick;
use ts_sim::{ResultBundle, SimObserver, TickSummary};

use crate::row::{ClassStatsRow, RunRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that persists one run into any [`OutputWriter`]
/// backend.
///
/// Tick summaries are written as the run progresses (unless disabled); the
/// run row and per-class rows are written once the result is final, followed
/// by a flush.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:         W,
    run_id:         u64,
    tick_summaries: bool,
    last_error:     Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W, run_id: u64) -> Self {
        Self {
            writer,
            run_id,
            tick_summaries: true,
            last_error:     None,
        }
    }

    /// Enable or disable per-tick summary rows.
    pub fn with_tick_summaries(mut self, enabled: bool) -> Self {
        self.tick_summaries = enabled;
        self
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(run_id = self.run_id, error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }

    fn persist(&mut self, result: &ResultBundle) -> OutputResult<()> {
        self.writer.write_run(&RunRow::from_result(self.run_id, result))?;
        let rows: Vec<ClassStatsRow> = result
            .statistics
            .iter()
            .map(|s| ClassStatsRow::from_summary(self.run_id, s))
            .collect();
        self.writer.write_class_stats(&rows)?;
        self.writer.flush()
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, _tick: Tick, summary: &TickSummary) {
        if !self.tick_summaries {
            return;
        }
        let row = TickSummaryRow::from_summary(self.run_id, summary);
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, result: &ResultBundle) {
        let persisted = self.persist(result);
        self.store_err(persisted);
    }
}
