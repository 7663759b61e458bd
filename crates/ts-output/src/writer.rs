//! The `OutputWriter` trait implemented by all backend writers.

use std::sync::{Arc, Mutex};

use crate::{ClassStatsRow, OutputError, OutputResult, RunRow, TickSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// A writer outlives a single run: the controller feeds every run into the
/// same sink, so [`flush`][Self::flush] must leave it usable.
pub trait OutputWriter {
    /// Write the run header row.
    fn write_run(&mut self, row: &RunRow) -> OutputResult<()>;

    /// Write the per-class rows of one run.
    fn write_class_stats(&mut self, rows: &[ClassStatsRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Push buffered rows to storage.
    fn flush(&mut self) -> OutputResult<()>;
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopWriter;

impl OutputWriter for NoopWriter {
    fn write_run(&mut self, _row: &RunRow) -> OutputResult<()> {
        Ok(())
    }

    fn write_class_stats(&mut self, _rows: &[ClassStatsRow]) -> OutputResult<()> {
        Ok(())
    }

    fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        Ok(())
    }
}

/// A writer shared between the caller and a worker thread.
impl<W: OutputWriter> OutputWriter for Arc<Mutex<W>> {
    fn write_run(&mut self, row: &RunRow) -> OutputResult<()> {
        self.lock().map_err(|_| OutputError::Poisoned)?.write_run(row)
    }

    fn write_class_stats(&mut self, rows: &[ClassStatsRow]) -> OutputResult<()> {
        self.lock().map_err(|_| OutputError::Poisoned)?.write_class_stats(rows)
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.lock().map_err(|_| OutputError::Poisoned)?.write_tick_summary(row)
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.lock().map_err(|_| OutputError::Poisoned)?.flush()
    }
}
