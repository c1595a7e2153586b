//! `orderflow-customers` — customer entity and directory port.
//!
//! Customers are owned by an external provisioning flow; the fulfillment core
//! only reads them (by id) to resolve name, address and pricing tier.

pub mod customer;
pub mod directory;

pub use customer::{Customer, CustomerTier};
pub use directory::CustomerDirectory;
