//! Single-server teller bound to one customer class.
//!
//! ```text
//!            assign(customer, d)
//!   Idle  ─────────────────────────▶  Busy { remaining: d }
//!    ▲                                   │ tick(): remaining -= 1
//!    └────── remaining == 0 ◀────────────┘   returns the customer
//! ```

use ts_core::{ClassId, Customer};

/// Teller state.  The customer is owned by the state while being served.
#[derive(Debug, Default, PartialEq, Eq)]
pub enum TellerState {
    #[default]
    Idle,
    Busy {
        customer:  Customer,
        /// Ticks of service left, always `>= 1` while busy.
        remaining: u32,
    },
}

#[derive(Debug)]
pub struct Teller {
    class: ClassId,
    name:  String,
    state: TellerState,
}

impl Teller {
    pub fn new(class: ClassId, name: impl Into<String>) -> Self {
        Self {
            class,
            name: name.into(),
            state: TellerState::Idle,
        }
    }

    #[inline]
    pub fn class(&self) -> ClassId {
        self.class
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn state(&self) -> &TellerState {
        &self.state
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self.state, TellerState::Idle)
    }

    /// The customer currently being served, if any.
    pub fn current(&self) -> Option<&Customer> {
        match &self.state {
            TellerState::Busy { customer, .. } => Some(customer),
            TellerState::Idle => None,
        }
    }

    /// Ticks of service left for the current customer.
    pub fn remaining(&self) -> Option<u32> {
        match self.state {
            TellerState::Busy { remaining, .. } => Some(remaining),
            TellerState::Idle => None,
        }
    }

    /// Start serving `customer` for `duration` ticks.
    ///
    /// # Panics
    /// Panics if the teller is busy, if the customer belongs to another
    /// class, or if `duration == 0`.
    pub fn assign(&mut self, customer: Customer, duration: u32) {
        assert!(
            self.is_idle(),
            "teller {} is busy; cannot assign customer {}",
            self.name,
            customer.id,
        );
        assert_eq!(
            customer.class, self.class,
            "customer {} has the wrong class for teller {}",
            customer.id, self.name,
        );
        assert!(duration >= 1, "service duration must be at least one tick");

        self.state = TellerState::Busy { customer, remaining: duration };
    }

    /// Advance service by one tick.
    ///
    /// Returns the customer when service completes (and the teller becomes
    /// idle).  Idle tellers are unaffected and return `None`.
    pub fn tick(&mut self) -> Option<Customer> {
        let TellerState::Busy { remaining, .. } = &mut self.state else {
            return None;
        };
        *remaining -= 1;
        if *remaining > 0 {
            return None;
        }
        self.release()
    }

    /// Take the in-service customer out, leaving the teller idle.
    pub fn release(&mut self) -> Option<Customer> {
        match std::mem::take(&mut self.state) {
            TellerState::Busy { customer, .. } => Some(customer),
            TellerState::Idle => None,
        }
    }
}
