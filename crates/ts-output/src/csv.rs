//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `runs.csv`
//! - `class_stats.csv`
//! - `tick_summaries.csv`

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{ClassStatsRow, OutputResult, RunRow, TickSummaryRow};

/// Writes run output to three CSV files.
pub struct CsvWriter {
    runs:      Writer<File>,
    classes:   Writer<File>,
    summaries: Writer<File>,
}

impl CsvWriter {
    /// Create `dir` if needed, (re)create the three CSV files and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut runs = Writer::from_path(dir.join("runs.csv"))?;
        runs.write_record(["run_id", "total_ticks", "ticks_run", "stopped", "seed"])?;

        let mut classes = Writer::from_path(dir.join("class_stats.csv"))?;
        classes.write_record(["run_id", "teller", "class", "arrived", "served", "unserved"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "run_id",
            "tick",
            "arrivals",
            "assignments",
            "completions",
            "queue_len",
            "busy_tellers",
        ])?;

        Ok(Self { runs, classes, summaries })
    }
}

impl OutputWriter for CsvWriter {
    fn write_run(&mut self, row: &RunRow) -> OutputResult<()> {
        self.runs.write_record(&[
            row.run_id.to_string(),
            row.total_ticks.to_string(),
            row.ticks_run.to_string(),
            (row.stopped as u8).to_string(),
            row.seed.map(|s| s.to_string()).unwrap_or_default(),
        ])?;
        Ok(())
    }

    fn write_class_stats(&mut self, rows: &[ClassStatsRow]) -> OutputResult<()> {
        for row in rows {
            self.classes.write_record(&[
                row.run_id.to_string(),
                row.teller.clone(),
                row.class.clone(),
                row.arrived.to_string(),
                row.served.to_string(),
                row.unserved.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.run_id.to_string(),
            row.tick.to_string(),
            row.arrivals.to_string(),
            row.assignments.to_string(),
            row.completions.to_string(),
            row.queue_len.to_string(),
            row.busy_tellers.to_string(),
        ])?;
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.runs.flush()?;
        self.classes.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
