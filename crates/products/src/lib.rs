//! `orderflow-products` — product entity and the locked stock-access port.
//!
//! The product's stock counter is the single piece of mutable shared state in
//! the fulfillment core. Every mutation happens inside a per-product exclusive
//! lock held for the lifetime of the enclosing transaction (see
//! [`catalog::ProductCatalog`]).

pub mod catalog;
pub mod product;

pub use catalog::{ProductCatalog, ProductSnapshot, StockError, StockTransaction};
pub use product::Product;
