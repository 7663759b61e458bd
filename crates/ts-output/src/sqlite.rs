//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `runs`, `class_stats` and `tick_summaries`.  Existing tables
//! are appended to.

use std::fs;
use std::path::Path;

use rusqlite::{params, Connection};

use crate::writer::OutputWriter;
use crate::{ClassStatsRow, OutputResult, RunRow, TickSummaryRow};

/// Writes run output to an SQLite database.
pub struct SqliteWriter {
    conn: Connection,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        let conn = Connection::open(dir.join("output.db"))?;

        // Seeds span the full u64 range, so they are kept as text.
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS runs (
                 run_id      INTEGER NOT NULL,
                 total_ticks INTEGER NOT NULL,
                 ticks_run   INTEGER NOT NULL,
                 stopped     INTEGER NOT NULL,
                 seed        TEXT
             );
             CREATE TABLE IF NOT EXISTS class_stats (
                 run_id   INTEGER NOT NULL,
                 teller   TEXT    NOT NULL,
                 class    TEXT    NOT NULL,
                 arrived  INTEGER NOT NULL,
                 served   INTEGER NOT NULL,
                 unserved INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 run_id       INTEGER NOT NULL,
                 tick         INTEGER NOT NULL,
                 arrivals     INTEGER NOT NULL,
                 assignments  INTEGER NOT NULL,
                 completions  INTEGER NOT NULL,
                 queue_len    INTEGER NOT NULL,
                 busy_tellers INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_run(&mut self, row: &RunRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO runs (run_id, total_ticks, ticks_run, stopped, seed) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                row.run_id,
                row.total_ticks,
                row.ticks_run,
                row.stopped as i64,
                row.seed.map(|s| s.to_string()),
            ],
        )?;
        Ok(())
    }

    fn write_class_stats(&mut self, rows: &[ClassStatsRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO class_stats \
                 (run_id, teller, class, arrived, served, unserved) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for row in rows {
                stmt.execute(params![
                    row.run_id,
                    row.teller,
                    row.class,
                    row.arrived,
                    row.served,
                    row.unserved,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (run_id, tick, arrivals, assignments, completions, queue_len, busy_tellers) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                row.run_id,
                row.tick,
                row.arrivals,
                row.assignments,
                row.completions,
                row.queue_len,
                row.busy_tellers,
            ],
        )?;
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
