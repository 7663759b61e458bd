//! Completed customers, in completion order.

use ts_core::{Customer, CustomerRecord};

/// Append-only record of served customers.  Takes ownership of each
/// customer when its service completes.
#[derive(Debug, Default)]
pub struct HistoryLog {
    completed: Vec<Customer>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    /// Panics if the customer's service-end tick has not been stamped.
    pub fn push(&mut self, customer: Customer) {
        assert!(
            customer.service_end().is_some(),
            "customer {} entered history without a service-end tick",
            customer.id,
        );
        self.completed.push(customer);
    }

    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Customer> {
        self.completed.iter()
    }

    pub fn records(&self) -> Vec<CustomerRecord> {
        self.completed.iter().map(Customer::record).collect()
    }
}
