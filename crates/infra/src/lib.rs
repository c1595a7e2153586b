//! `orderflow-infra` — in-memory adapters for the fulfillment ports.
//!
//! These back tests, development and benchmarks; a production deployment
//! would swap in database-backed implementations with the same contracts
//! (the product catalog's per-row lock maps onto `SELECT ... FOR UPDATE`).

pub mod customer_directory;
pub mod order_store;
pub mod product_catalog;


pub use customer_directory::InMemoryCustomerDirectory;
pub use order_store::InMemoryOrderStore;
pub use product_catalog::InMemoryProductCatalog;
