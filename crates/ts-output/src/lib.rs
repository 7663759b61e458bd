//! `ts-output` — persistence sinks for teller_sim runs.
//!
//! Two backends are provided, the second behind a Cargo feature:
//!
//! | Feature   | Backend | Files created                                         |
//! |-----------|---------|-------------------------------------------------------|
//! | *(none)*  | CSV     | `runs.csv`, `class_stats.csv`, `tick_summaries.csv`   |
//! | `sqlite`  | SQLite  | `output.db` (tables `runs`, `class_stats`, `tick_summaries`) |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `ts_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ts_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, 1);
//! let result = sim.run(&mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{ClassStatsRow, RunRow, TickSummaryRow};
pub use writer::{NoopWriter, OutputWriter};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
