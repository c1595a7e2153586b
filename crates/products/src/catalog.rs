//! Product catalog port with per-product exclusive locking.
//!
//! The catalog owns every product record (arena-style); no other component
//! holds a mutable reference outside a lock scope. Stock is read and written
//! only through [`StockTransaction`], whose lifetime is the lock-hold window.

use thiserror::Error;

use orderflow_core::{Money, ProductId};

/// Stock-level failure raised inside a stock transaction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StockError {
    /// The product id does not resolve in the catalog.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// Not enough stock to grant the decrement. Carries the current stock
    /// for diagnostics; the counter is unchanged.
    #[error("insufficient stock for product {product_id}: requested {requested}, available {available}")]
    Insufficient {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// Infrastructure-level failure (e.g. a poisoned lock). Retryable by the
    /// caller; never retried here.
    #[error("transient stock store failure: {0}")]
    Transient(String),
}

/// Immutable view of a locked product, taken while its lock is held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Money,
}

/// Handle over the set of products locked by a [`ProductCatalog::transact`]
/// call.
///
/// Decrements are staged against the locked records; if the enclosing
/// transaction aborts they are rolled back before the locks release.
pub trait StockTransaction {
    /// Snapshot a locked product (id, name, unit price).
    fn product(&self, id: ProductId) -> Result<ProductSnapshot, StockError>;

    /// Atomic decrement-if-sufficient for one locked product.
    ///
    /// The second of two concurrent calls for the same product observes the
    /// effect of the first before deciding sufficiency; that serialization is
    /// provided by the lock the catalog acquired before handing out `self`.
    fn decrement_if_available(&mut self, id: ProductId, quantity: u32) -> Result<(), StockError>;
}

/// Port: keyed stock store with one exclusive lock per product.
pub trait ProductCatalog: Send + Sync {
    /// Run `body` as one atomic unit over the listed products.
    ///
    /// Locks are acquired in ascending product-id order regardless of the
    /// order supplied by the caller (canonical order, so multi-product
    /// transactions cannot deadlock each other) and held until `body`
    /// returns. On `Ok` the staged decrements commit; on `Err` they are
    /// rolled back. Unknown ids are not an error at lock time; they surface
    /// as [`StockError::NotFound`] when touched inside `body`.
    ///
    /// Transactions over disjoint product sets do not block each other.
    fn transact<R, E, F>(&self, product_ids: &[ProductId], body: F) -> Result<R, E>
    where
        E: From<StockError>,
        F: FnOnce(&mut dyn StockTransaction) -> Result<R, E>;
}

impl<T: ProductCatalog + ?Sized> ProductCatalog for std::sync::Arc<T> {
    fn transact<R, E, F>(&self, product_ids: &[ProductId], body: F) -> Result<R, E>
    where
        E: From<StockError>,
        F: FnOnce(&mut dyn StockTransaction) -> Result<R, E>,
    {
        (**self).transact(product_ids, body)
    }
}
