//! Append-only audit trail of tick-level events.

use serde::Serialize;

use ts_core::{ClassId, CustomerRecord, Tick};

/// The teller involved in an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TellerRef {
    pub name:  String,
    pub class: ClassId,
}

/// One entry of the [`EventLog`].
///
/// Serialized with an `"event"` tag: `arrival`, `assignment`, `completion`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimEvent {
    /// A customer joined the queue.
    Arrival {
        tick:     Tick,
        customer: CustomerRecord,
    },
    /// An idle teller took the next customer of its class.
    Assignment {
        tick:     Tick,
        teller:   TellerRef,
        customer: CustomerRecord,
        duration: u32,
    },
    /// A teller finished serving a customer.
    Completion {
        tick:     Tick,
        customer: CustomerRecord,
        start:    Tick,
        end:      Tick,
    },
}

impl SimEvent {
    pub fn tick(&self) -> Tick {
        match self {
            SimEvent::Arrival { tick, .. }
            | SimEvent::Assignment { tick, .. }
            | SimEvent::Completion { tick, .. } => *tick,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SimEvent::Arrival { .. } => "arrival",
            SimEvent::Assignment { .. } => "assignment",
            SimEvent::Completion { .. } => "completion",
        }
    }

    pub fn customer(&self) -> &CustomerRecord {
        match self {
            SimEvent::Arrival { customer, .. }
            | SimEvent::Assignment { customer, .. }
            | SimEvent::Completion { customer, .. } => customer,
        }
    }
}

/// Events in the order they happened.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<SimEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: SimEvent) {
        tracing::trace!(tick = event.tick().0, kind = event.kind(), customer = %event.customer().id, "event");
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SimEvent> {
        self.events.iter()
    }

    pub fn into_vec(self) -> Vec<SimEvent> {
        self.events
    }
}
