//! Order persistence port.

use thiserror::Error;

use crate::order::{Order, OrderNumber};

/// Failure committing an order.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderStoreError {
    /// The uniqueness constraint on the order number fired. The caller
    /// should regenerate the number and retry.
    #[error("duplicate order number: {0}")]
    DuplicateOrderNumber(OrderNumber),

    /// Infrastructure-level failure (I/O, lock timeout). Retryable.
    #[error("transient order store failure: {0}")]
    Transient(String),
}

/// Durable store for committed orders.
///
/// `save` must be all-or-nothing: a failed save leaves no partial rows, and
/// an order is visible to `find_by_order_number` only after a successful
/// save.
pub trait OrderStore: Send + Sync {
    fn save(&self, order: Order) -> Result<Order, OrderStoreError>;

    fn find_by_order_number(&self, order_number: &OrderNumber) -> Option<Order>;
}

impl<T: OrderStore + ?Sized> OrderStore for std::sync::Arc<T> {
    fn save(&self, order: Order) -> Result<Order, OrderStoreError> {
        (**self).save(order)
    }

    fn find_by_order_number(&self, order_number: &OrderNumber) -> Option<Order> {
        (**self).find_by_order_number(order_number)
    }
}
