//! Fulfillment error taxonomy.
//!
//! Every failure path in the core returns one of these values; nothing is
//! silently swallowed and nothing is retried internally. Retry decisions
//! belong to the caller, guided by [`OrderError::is_retryable`].

use thiserror::Error;

use orderflow_core::{CustomerId, DomainError, ProductId};
use orderflow_products::StockError;

use crate::order::OrderNumber;
use crate::store::OrderStoreError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("customer not found: {0}")]
    CustomerNotFound(CustomerId),

    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// Carries the stock observed at decision time for diagnostics.
    #[error("insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// Malformed request that slipped past the outer validation layer.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The order number kept colliding with stored orders even after
    /// regeneration. Retryable: fresh randomness will almost surely resolve
    /// it.
    #[error("duplicate order number: {0}")]
    DuplicateOrderNumber(OrderNumber),

    /// Infrastructure-level transient failure (lock timeout, deadlock
    /// victim, I/O). Retryable by the caller.
    #[error("transient store failure: {0}")]
    Transient(String),
}

impl OrderError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether the caller may meaningfully retry the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            OrderError::Transient(_) | OrderError::DuplicateOrderNumber(_)
        )
    }
}

impl From<DomainError> for OrderError {
    fn from(err: DomainError) -> Self {
        OrderError::Validation(err.to_string())
    }
}

impl From<StockError> for OrderError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::NotFound(product_id) => OrderError::ProductNotFound(product_id),
            StockError::Insufficient {
                product_id,
                requested,
                available,
            } => OrderError::InsufficientStock {
                product_id,
                requested,
                available,
            },
            StockError::Transient(msg) => OrderError::Transient(msg),
        }
    }
}

impl From<OrderStoreError> for OrderError {
    fn from(err: OrderStoreError) -> Self {
        match err {
            OrderStoreError::DuplicateOrderNumber(n) => OrderError::DuplicateOrderNumber(n),
            OrderStoreError::Transient(msg) => OrderError::Transient(msg),
        }
    }
}
