//! Customer directory port.

use orderflow_core::CustomerId;

use crate::customer::Customer;

/// Read-only lookup into the external customer directory.
///
/// Implementations return an owned snapshot; the fulfillment core never
/// mutates customer records.
pub trait CustomerDirectory: Send + Sync {
    fn find_by_id(&self, id: CustomerId) -> Option<Customer>;
}

impl<T: CustomerDirectory + ?Sized> CustomerDirectory for std::sync::Arc<T> {
    fn find_by_id(&self, id: CustomerId) -> Option<Customer> {
        (**self).find_by_id(id)
    }
}
