//! `orderflow-orders` — the order-fulfillment transaction and its satellites.
//!
//! This crate carries the core protocol: given a customer and a list of
//! (product, quantity) requests, atomically verify and decrement stock,
//! compute tier-adjusted line pricing, and commit an immutable order record —
//! all-or-nothing, under concurrent load.

pub mod batch;
pub mod error;
pub mod fulfillment;
pub mod number;
pub mod order;
pub mod pricing;
pub mod store;

pub use error::OrderError;
pub use fulfillment::{LineRequest, OrderFulfillment, OrderRequest};
pub use number::{Clock, OrderNumberGenerator, OrderNumberSource, SuffixSource, SystemClock, UuidSuffix};
pub use order::{Order, OrderLine, OrderNumber};
pub use store::{OrderStore, OrderStoreError};
