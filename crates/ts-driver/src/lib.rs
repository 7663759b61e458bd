//! `ts-driver` — runs simulations on a background thread.
//!
//! [`SimController`] owns a single run slot.  `start` builds a fresh engine,
//! hands it to a named worker thread and returns immediately; the caller can
//! then pause, resume, stop or poll the run, and fetch the result once the
//! worker is done.  Every finished run is written to the controller's
//! [`OutputWriter`][ts_output::OutputWriter]; write failures are logged and
//! never affect the in-memory result.
//!
//! ```rust,ignore
//! let controller = SimController::new(CsvWriter::new(Path::new("out"))?);
//! let run = controller.start(SimConfig::default())?;
//! controller.wait()?;
//! let result = controller.result()?;
//! ```

pub mod controller;
pub mod error;


pub use controller::{RunId, SimController};
pub use error::{DriverError, DriverResult};
