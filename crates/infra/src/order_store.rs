use std::collections::HashMap;
use std::sync::RwLock;

use orderflow_orders::{Order, OrderNumber, OrderStore, OrderStoreError};

/// In-memory order store with a uniqueness constraint on the order number.
///
/// The constraint is the hard uniqueness guarantee backing the generator's
/// probabilistic one: a colliding save fails with `DuplicateOrderNumber` and
/// leaves the store untouched.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<OrderNumber, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed orders (diagnostics and tests).
    pub fn len(&self) -> usize {
        self.orders
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OrderStore for InMemoryOrderStore {
    fn save(&self, order: Order) -> Result<Order, OrderStoreError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|_| OrderStoreError::Transient("order store lock poisoned".into()))?;
        if orders.contains_key(order.order_number()) {
            return Err(OrderStoreError::DuplicateOrderNumber(
                order.order_number().clone(),
            ));
        }
        orders.insert(order.order_number().clone(), order.clone());
        Ok(order)
    }

    fn find_by_order_number(&self, order_number: &OrderNumber) -> Option<Order> {
        let orders = self
            .orders
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        orders.get(order_number).cloned()
    }
}
