use serde::{Deserialize, Serialize};

use orderflow_core::{Money, ProductId};

use crate::catalog::StockError;

/// Product entity.
///
/// Owns the stock counter. Callers must only mutate a product through a
/// [`crate::catalog::StockTransaction`] so that the per-product lock is held
/// for the read-check-write sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    unit_price: Money,
    stock_quantity: u32,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        unit_price: Money,
        stock_quantity: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            stock_quantity,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn stock_quantity(&self) -> u32 {
        self.stock_quantity
    }

    /// Subtract `quantity` from stock if sufficient.
    ///
    /// On insufficient stock the counter is untouched and the error carries
    /// the current stock for diagnostics.
    pub fn decrement_stock(&mut self, quantity: u32) -> Result<(), StockError> {
        if self.stock_quantity < quantity {
            return Err(StockError::Insufficient {
                product_id: self.id,
                requested: quantity,
                available: self.stock_quantity,
            });
        }
        self.stock_quantity -= quantity;
        Ok(())
    }

    /// Add `quantity` back to stock (restock, or rollback of a staged
    /// decrement when the enclosing transaction aborts).
    pub fn increment_stock(&mut self, quantity: u32) {
        self.stock_quantity = self.stock_quantity.saturating_add(quantity);
    }
}
