use std::collections::HashMap;
use std::sync::RwLock;

use orderflow_core::CustomerId;
use orderflow_customers::{Customer, CustomerDirectory};

/// In-memory customer directory.
///
/// Intended for tests/dev. Customers are seeded by the provisioning flow and
/// only read during fulfillment.
#[derive(Debug, Default)]
pub struct InMemoryCustomerDirectory {
    customers: RwLock<HashMap<CustomerId, Customer>>,
}

impl InMemoryCustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed or replace a customer record.
    pub fn insert(&self, customer: Customer) {
        let mut customers = self
            .customers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        customers.insert(customer.id(), customer);
    }
}

impl CustomerDirectory for InMemoryCustomerDirectory {
    fn find_by_id(&self, id: CustomerId) -> Option<Customer> {
        let customers = self
            .customers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        customers.get(&id).cloned()
    }
}
