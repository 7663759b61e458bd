//! The immutable result bundle returned at the end of a run.

use serde::Serialize;

use ts_core::{ClassId, CustomerRecord};
use ts_queue::QueueEntryView;

use crate::SimEvent;

/// Final counts for one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassSummary {
    pub class:    ClassId,
    pub tag:      String,
    pub teller:   String,
    pub arrived:  u64,
    pub served:   u64,
    pub unserved: u64,
}

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultBundle {
    /// Configured horizon.
    pub total_ticks:   u64,
    /// Ticks actually executed (less than `total_ticks` if stopped).
    pub ticks_run:     u64,
    pub stopped:       bool,
    /// RNG seed, when known (an injected RNG carries none).
    pub seed:          Option<u64>,
    /// Per-class statistics, in declared class order.
    pub statistics:    Vec<ClassSummary>,
    /// Served customers, in completion order.
    pub history:       Vec<CustomerRecord>,
    /// Customers still waiting at the end, ordered by `(rank, seq)`.
    pub pending_queue: Vec<QueueEntryView>,
    /// Customers still at a teller at the end, in teller order.
    pub in_service:    Vec<CustomerRecord>,
    pub events:        Vec<SimEvent>,
}

impl ResultBundle {
    /// Statistics for the class tagged `tag`.
    pub fn class(&self, tag: &str) -> Option<&ClassSummary> {
        self.statistics.iter().find(|s| s.tag == tag)
    }

    pub fn total_arrived(&self) -> u64 {
        self.statistics.iter().map(|s| s.arrived).sum()
    }

    pub fn total_served(&self) -> u64 {
        self.statistics.iter().map(|s| s.served).sum()
    }

    pub fn total_unserved(&self) -> u64 {
        self.statistics.iter().map(|s| s.unserved).sum()
    }
}
