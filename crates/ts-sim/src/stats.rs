//! Per-class counters and the conservation census.

use serde::Serialize;

use ts_core::ClassId;

/// Arrived / served / unserved counts for one class.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassStats {
    pub arrived:  u64,
    pub served:   u64,
    /// Only filled in by the end-of-run reconciliation pass.
    pub unserved: u64,
}

/// Counters for every class, indexed by `ClassId`.
#[derive(Debug, Clone)]
pub struct Statistics {
    per_class: Vec<ClassStats>,
}

impl Statistics {
    pub fn new(class_count: usize) -> Self {
        Self { per_class: vec![ClassStats::default(); class_count] }
    }

    #[inline]
    pub fn record_arrival(&mut self, class: ClassId) {
        self.per_class[class.index()].arrived += 1;
    }

    #[inline]
    pub fn record_served(&mut self, class: ClassId) {
        self.per_class[class.index()].served += 1;
    }

    #[inline]
    pub fn record_unserved(&mut self, class: ClassId) {
        self.per_class[class.index()].unserved += 1;
    }

    pub fn get(&self, class: ClassId) -> ClassStats {
        self.per_class[class.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClassId, &ClassStats)> {
        self.per_class
            .iter()
            .enumerate()
            .map(|(i, s)| (ClassId(i as u8), s))
    }
}

/// Where every customer of one class is at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassCensus {
    pub class:      ClassId,
    pub arrived:    u64,
    pub served:     u64,
    pub unserved:   u64,
    pub queued:     u64,
    pub in_service: u64,
}

impl ClassCensus {
    /// `arrived == served + unserved + queued + in_service`.
    pub fn is_conserved(&self) -> bool {
        self.arrived == self.served + self.unserved + self.queued + self.in_service
    }
}
