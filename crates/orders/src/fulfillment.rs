//! The order-fulfillment transaction.
//!
//! One `fulfill` call is one atomic unit of work: resolve the customer, lock
//! every referenced product (canonical ascending-id order), decrement stock
//! and price each line, persist the assembled order while the locks are still
//! held, and only then let the stock changes commit. Any failure rolls the
//! whole thing back; there is no partial commit and no internal retry beyond
//! the bounded order-number regeneration on a storage collision.

use tracing::{debug, info, warn};

use orderflow_core::{CustomerId, ProductId};
use orderflow_customers::CustomerDirectory;
use orderflow_products::ProductCatalog;

use crate::error::OrderError;
use crate::number::{OrderNumberGenerator, OrderNumberSource};
use crate::order::{Order, OrderLine};
use crate::pricing;
use crate::store::{OrderStore, OrderStoreError};

/// How many fresh order numbers to try when the store keeps reporting
/// collisions. With a 2^48 suffix space one regeneration already makes a
/// repeat collision astronomically unlikely.
const MAX_NUMBER_RETRIES: usize = 3;

/// One requested line: a product and a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A structured order request, as handed over by the outer request layer
/// (HTTP body or a decoded spreadsheet row).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub customer_id: CustomerId,
    pub lines: Vec<LineRequest>,
}

/// Fulfillment service, generic over its collaborator ports.
pub struct OrderFulfillment<D, P, S, G = OrderNumberGenerator> {
    directory: D,
    catalog: P,
    store: S,
    numbers: G,
}

impl<D, P, S> OrderFulfillment<D, P, S> {
    pub fn new(directory: D, catalog: P, store: S) -> Self {
        Self {
            directory,
            catalog,
            store,
            numbers: OrderNumberGenerator::new(),
        }
    }
}

impl<D, P, S, G> OrderFulfillment<D, P, S, G>
where
    D: CustomerDirectory,
    P: ProductCatalog,
    S: OrderStore,
    G: OrderNumberSource,
{
    /// Swap in a custom order-number source (deterministic tests).
    pub fn with_number_source<G2: OrderNumberSource>(
        self,
        numbers: G2,
    ) -> OrderFulfillment<D, P, S, G2> {
        OrderFulfillment {
            directory: self.directory,
            catalog: self.catalog,
            store: self.store,
            numbers,
        }
    }

    /// Fulfill one order, all-or-nothing.
    pub fn fulfill(&self, request: &OrderRequest) -> Result<Order, OrderError> {
        // Input shape is the outer layer's job; these two guards only defend
        // the committed-order invariants (non-empty lines, quantity >= 1).
        if request.lines.is_empty() {
            return Err(OrderError::validation("order must contain at least one line"));
        }
        if let Some(line) = request.lines.iter().find(|l| l.quantity == 0) {
            return Err(OrderError::validation(format!(
                "quantity must be at least 1 for product {}",
                line.product_id
            )));
        }

        let customer = self
            .directory
            .find_by_id(request.customer_id)
            .ok_or(OrderError::CustomerNotFound(request.customer_id))?;

        let product_ids: Vec<ProductId> =
            request.lines.iter().map(|l| l.product_id).collect();

        let order = self.catalog.transact(&product_ids, |stock| {
            let mut order = Order::new(self.numbers.next(), customer.clone());

            for line in &request.lines {
                stock.decrement_if_available(line.product_id, line.quantity)?;
                let snapshot = stock.product(line.product_id)?;
                let line_total =
                    pricing::line_total(snapshot.unit_price, line.quantity, customer.tier());
                debug!(
                    product = %snapshot.name,
                    quantity = line.quantity,
                    line_total = %line_total,
                    "line priced"
                );
                order.push_line(OrderLine::new(line.product_id, line.quantity, line_total));
            }

            // Persist while the stock locks are still held so the decrements
            // and the order record commit as one unit.
            self.save_with_fresh_numbers(order)
        })?;

        info!(
            order_number = %order.order_number(),
            customer_id = %order.customer().id(),
            lines = order.lines().len(),
            total = %order.total(),
            "order fulfilled"
        );
        Ok(order)
    }

    /// Save the order, regenerating the order number on a uniqueness
    /// constraint violation (bounded).
    fn save_with_fresh_numbers(&self, mut order: Order) -> Result<Order, OrderError> {
        let mut attempts = 0;
        loop {
            match self.store.save(order.clone()) {
                Ok(saved) => return Ok(saved),
                Err(OrderStoreError::DuplicateOrderNumber(colliding))
                    if attempts < MAX_NUMBER_RETRIES =>
                {
                    attempts += 1;
                    warn!(
                        order_number = %colliding,
                        attempt = attempts,
                        "order number collision, regenerating"
                    );
                    order = order.with_order_number(self.numbers.next());
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use orderflow_customers::{Customer, CustomerTier};
    use orderflow_products::{StockError, StockTransaction};

    use crate::order::OrderNumber;

    struct MapDirectory(HashMap<CustomerId, Customer>);

    impl CustomerDirectory for MapDirectory {
        fn find_by_id(&self, id: CustomerId) -> Option<Customer> {
            self.0.get(&id).cloned()
        }
    }

    /// Catalog fake that knows no products at all.
    struct EmptyCatalog;

    struct EmptyStock;

    impl StockTransaction for EmptyStock {
        fn product(
            &self,
            id: ProductId,
        ) -> Result<orderflow_products::ProductSnapshot, StockError> {
            Err(StockError::NotFound(id))
        }

        fn decrement_if_available(
            &mut self,
            id: ProductId,
            _quantity: u32,
        ) -> Result<(), StockError> {
            Err(StockError::NotFound(id))
        }
    }

    impl ProductCatalog for EmptyCatalog {
        fn transact<R, E, F>(&self, _product_ids: &[ProductId], body: F) -> Result<R, E>
        where
            E: From<StockError>,
            F: FnOnce(&mut dyn StockTransaction) -> Result<R, E>,
        {
            body(&mut EmptyStock)
        }
    }

    struct NullStore;

    impl OrderStore for NullStore {
        fn save(&self, order: Order) -> Result<Order, OrderStoreError> {
            Ok(order)
        }

        fn find_by_order_number(&self, _order_number: &OrderNumber) -> Option<Order> {
            None
        }
    }

    fn service_with_customer(
        customer: Customer,
    ) -> OrderFulfillment<MapDirectory, EmptyCatalog, NullStore> {
        let directory = MapDirectory(HashMap::from([(customer.id(), customer)]));
        OrderFulfillment::new(directory, EmptyCatalog, NullStore)
    }

    fn test_customer() -> Customer {
        Customer::new(
            CustomerId::new(),
            "Sam Rivera",
            "5 Dockside Rd",
            CustomerTier::Standard,
        )
    }

    #[test]
    fn empty_request_is_rejected_before_any_lock() {
        let customer = test_customer();
        let service = service_with_customer(customer.clone());
        let err = service
            .fulfill(&OrderRequest {
                customer_id: customer.id(),
                lines: vec![],
            })
            .unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let customer = test_customer();
        let service = service_with_customer(customer.clone());
        let err = service
            .fulfill(&OrderRequest {
                customer_id: customer.id(),
                lines: vec![LineRequest {
                    product_id: ProductId::new(),
                    quantity: 0,
                }],
            })
            .unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
    }

    #[test]
    fn unknown_customer_fails_without_touching_stock() {
        let service = service_with_customer(test_customer());
        let stranger = CustomerId::new();
        let err = service
            .fulfill(&OrderRequest {
                customer_id: stranger,
                lines: vec![LineRequest {
                    product_id: ProductId::new(),
                    quantity: 1,
                }],
            })
            .unwrap_err();
        assert_eq!(err, OrderError::CustomerNotFound(stranger));
    }

    #[test]
    fn unknown_product_maps_to_product_not_found() {
        let customer = test_customer();
        let service = service_with_customer(customer.clone());
        let ghost = ProductId::new();
        let err = service
            .fulfill(&OrderRequest {
                customer_id: customer.id(),
                lines: vec![LineRequest {
                    product_id: ghost,
                    quantity: 1,
                }],
            })
            .unwrap_err();
        assert_eq!(err, OrderError::ProductNotFound(ghost));
    }
}
