//! The customer entity.
//!
//! `Customer` is not `Clone`: exactly one container (queue,
//! teller, or history) owns a given customer at any time, and moving it is
//! the only way to hand it over.  Read-only copies for logs and result
//! bundles use [`CustomerRecord`].

use serde::Serialize;

use crate::{ClassId, CustomerId, Tick};

/// A customer waiting for, receiving, or having received service.
#[derive(Debug, PartialEq, Eq)]
pub struct Customer {
    pub id:        CustomerId,
    pub class:     ClassId,
    pub arrival:   Tick,
    service_start: Option<Tick>,
    service_end:   Option<Tick>,
}

impl Customer {
    pub fn new(id: CustomerId, class: ClassId, arrival: Tick) -> Self {
        Self {
            id,
            class,
            arrival,
            service_start: None,
            service_end:   None,
        }
    }

    #[inline]
    pub fn service_start(&self) -> Option<Tick> {
        self.service_start
    }

    #[inline]
    pub fn service_end(&self) -> Option<Tick> {
        self.service_end
    }

    /// Stamp the tick at which a teller took this customer.
    ///
    /// # Panics
    /// Panics if service has already started.
    pub fn begin_service(&mut self, tick: Tick) {
        assert!(
            self.service_start.is_none(),
            "customer {} already started service at {:?}",
            self.id,
            self.service_start,
        );
        self.service_start = Some(tick);
    }

    /// Stamp the tick at which service completed.
    ///
    /// # Panics
    /// Panics if service never started or has already ended.
    pub fn end_service(&mut self, tick: Tick) {
        assert!(self.service_start.is_some(), "customer {} never started service", self.id);
        assert!(self.service_end.is_none(), "customer {} already completed service", self.id);
        self.service_end = Some(tick);
    }

    /// Ticks spent waiting in the queue, once service has started.
    pub fn wait_ticks(&self) -> Option<u64> {
        self.service_start.map(|start| start.since(self.arrival))
    }

    /// A `Copy` view of this customer for logs and result bundles.
    pub fn record(&self) -> CustomerRecord {
        CustomerRecord {
            id:            self.id,
            class:         self.class,
            arrival:       self.arrival,
            service_start: self.service_start,
            service_end:   self.service_end,
        }
    }
}

/// Immutable snapshot of a [`Customer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CustomerRecord {
    pub id:            CustomerId,
    pub class:         ClassId,
    pub arrival:       Tick,
    pub service_start: Option<Tick>,
    pub service_end:   Option<Tick>,
}
