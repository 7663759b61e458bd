//! Plain data row types written by output backends.

use ts_sim::{ClassSummary, ResultBundle, TickSummary};

/// One row per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunRow {
    pub run_id:      u64,
    pub total_ticks: u64,
    pub ticks_run:   u64,
    pub stopped:     bool,
    /// `None` when the run used an injected RNG.
    pub seed:        Option<u64>,
}

impl RunRow {
    pub fn from_result(run_id: u64, result: &ResultBundle) -> Self {
        Self {
            run_id,
            total_ticks: result.total_ticks,
            ticks_run:   result.ticks_run,
            stopped:     result.stopped,
            seed:        result.seed,
        }
    }
}

/// Final counts for one class of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassStatsRow {
    pub run_id:   u64,
    pub teller:   String,
    /// Class tag, e.g. `"A"`.
    pub class:    String,
    pub arrived:  u64,
    pub served:   u64,
    pub unserved: u64,
}

impl ClassStatsRow {
    pub fn from_summary(run_id: u64, s: &ClassSummary) -> Self {
        Self {
            run_id,
            teller:   s.teller.clone(),
            class:    s.tag.clone(),
            arrived:  s.arrived,
            served:   s.served,
            unserved: s.unserved,
        }
    }
}

/// Counters for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub run_id:       u64,
    pub tick:         u64,
    pub arrivals:     u64,
    pub assignments:  u64,
    pub completions:  u64,
    pub queue_len:    u64,
    pub busy_tellers: u64,
}

impl TickSummaryRow {
    pub fn from_summary(run_id: u64, s: &TickSummary) -> Self {
        Self {
            run_id,
            tick:         s.tick.0,
            arrivals:     s.arrivals as u64,
            assignments:  s.assignments as u64,
            completions:  s.completions as u64,
            queue_len:    s.queue_len as u64,
            busy_tellers: s.busy_tellers as u64,
        }
    }
}
