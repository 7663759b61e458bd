//! `ts-sim` — tick loop orchestrator for the teller_sim queueing simulator.
//!
//! # Three-phase tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ⓪ Boundary    — drain control signals; block while paused; leave on stop.
//!   ① Arrivals    — one Bernoulli trial per class (declared order); each
//!                   success enqueues a new customer.
//!   ② Assignment  — each idle teller (declared order) takes the next
//!                   customer of its class and samples a service duration.
//!   ③ Service     — each teller advances one tick; completions move the
//!                   customer into the history log.
//! then:
//!   Reconciliation — everyone still queued or at a teller counts as unserved.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ts_core::SimConfig;
//! use ts_sim::{NoopObserver, SimBuilder};
//!
//! let sim = SimBuilder::new(SimConfig::default()).seed(42).build()?;
//! let control = sim.control();          // hand to another thread to pause/stop
//! let result = sim.run(&mut NoopObserver);
//! println!("served {}", result.total_served());
//! ```

pub mod builder;
pub mod control;
pub mod error;
pub mod event;
pub mod history;
pub mod observer;
pub mod result;
pub mod sim;
pub mod stats;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use control::{ControlSignal, SimControl, StatusSnapshot};
pub use error::{SimError, SimResult};
pub use event::{EventLog, SimEvent, TellerRef};
pub use history::HistoryLog;
pub use observer::{NoopObserver, SimObserver, TickSummary};
pub use result::{ClassSummary, ResultBundle};
pub use sim::Sim;
pub use stats::{ClassCensus, ClassStats, Statistics};
