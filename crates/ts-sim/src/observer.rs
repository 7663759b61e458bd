//! Simulation observer trait for progress reporting and data collection.

use serde::Serialize;

use ts_core::Tick;

use crate::{ClassCensus, ResultBundle};

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickSummary {
    pub tick:         Tick,
    pub arrivals:     usize,
    pub assignments:  usize,
    pub completions:  usize,
    /// Queue length after the tick.
    pub queue_len:    usize,
    /// Tellers still busy after the tick.
    pub busy_tellers: usize,
    /// Per-class census after the tick, indexed by `ClassId`.
    pub census:       Vec<ClassCensus>,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick}: queue {}", summary.queue_len);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the start of each tick, after the control boundary.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called once with the final result, after reconciliation.
    fn on_sim_end(&mut self, _result: &ResultBundle) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
