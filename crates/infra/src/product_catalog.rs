//! In-memory product catalog with one exclusive lock per product.
//!
//! The concurrency contract of the fulfillment core lives here: concurrent
//! decrements for the same product are strictly serialized (the second
//! caller observes the first one's effect before deciding sufficiency),
//! while transactions over disjoint product sets run in parallel. The
//! database equivalent is a `SELECT ... FOR UPDATE` row lock held to the end
//! of the transaction.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use tracing::debug;

use orderflow_core::ProductId;
use orderflow_products::{Product, ProductCatalog, ProductSnapshot, StockError, StockTransaction};

/// In-memory keyed stock store.
///
/// The catalog owns every product record; the only way to read or mutate
/// stock is through [`ProductCatalog::transact`], which hands out a view
/// valid exactly as long as the per-product locks are held.
#[derive(Debug, Default)]
pub struct InMemoryProductCatalog {
    products: RwLock<HashMap<ProductId, Arc<Mutex<Product>>>>,
}

impl InMemoryProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed or replace a product record (provisioning flow).
    pub fn insert(&self, product: Product) {
        let mut products = self
            .products
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        products.insert(product.id(), Arc::new(Mutex::new(product)));
    }

    /// Current stock of a product, for diagnostics and tests.
    pub fn stock_of(&self, id: ProductId) -> Option<u32> {
        let handle = {
            let products = self
                .products
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            Arc::clone(products.get(&id)?)
        };
        let product = handle.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Some(product.stock_quantity())
    }
}

impl ProductCatalog for InMemoryProductCatalog {
    fn transact<R, E, F>(&self, product_ids: &[ProductId], body: F) -> Result<R, E>
    where
        E: From<StockError>,
        F: FnOnce(&mut dyn StockTransaction) -> Result<R, E>,
    {
        // Canonical ascending-id lock order; duplicate references collapse
        // onto one lock. This is what keeps two multi-product transactions
        // from deadlocking each other.
        let wanted: BTreeSet<ProductId> = product_ids.iter().copied().collect();

        // Clone the handles out under a short registry read lock; unknown ids
        // are left out and surface as NotFound when touched in `body`.
        let handles: Vec<(ProductId, Arc<Mutex<Product>>)> = {
            let products = self.products.read().map_err(|_| {
                E::from(StockError::Transient("product registry lock poisoned".into()))
            })?;
            wanted
                .iter()
                .filter_map(|id| products.get(id).map(|h| (*id, Arc::clone(h))))
                .collect()
        };

        let mut guards: HashMap<ProductId, MutexGuard<'_, Product>> =
            HashMap::with_capacity(handles.len());
        for (id, handle) in &handles {
            let guard = handle.lock().map_err(|_| {
                E::from(StockError::Transient(format!("lock poisoned for product {id}")))
            })?;
            guards.insert(*id, guard);
        }
        debug!(products = guards.len(), "stock locks acquired");

        let mut tx = LockedStock {
            guards,
            journal: Vec::new(),
        };
        match body(&mut tx) {
            Ok(value) => Ok(value),
            Err(err) => {
                tx.roll_back();
                Err(err)
            }
        }
        // Guards drop here: decrements that survived are now visible to the
        // next lock holder.
    }
}

/// The set of products locked by one `transact` call, plus the undo journal
/// for its staged decrements.
struct LockedStock<'a> {
    guards: HashMap<ProductId, MutexGuard<'a, Product>>,
    journal: Vec<(ProductId, u32)>,
}

impl LockedStock<'_> {
    fn roll_back(&mut self) {
        while let Some((id, quantity)) = self.journal.pop() {
            if let Some(product) = self.guards.get_mut(&id) {
                product.increment_stock(quantity);
            }
        }
    }
}

impl StockTransaction for LockedStock<'_> {
    fn product(&self, id: ProductId) -> Result<ProductSnapshot, StockError> {
        let product = self.guards.get(&id).ok_or(StockError::NotFound(id))?;
        Ok(ProductSnapshot {
            id,
            name: product.name().to_string(),
            unit_price: product.unit_price(),
        })
    }

    fn decrement_if_available(&mut self, id: ProductId, quantity: u32) -> Result<(), StockError> {
        let product = self.guards.get_mut(&id).ok_or(StockError::NotFound(id))?;
        product.decrement_stock(quantity)?;
        self.journal.push((id, quantity));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderflow_core::Money;

    fn seed(catalog: &InMemoryProductCatalog, stock: u32) -> ProductId {
        let id = ProductId::new();
        catalog.insert(Product::new(id, "Crate of pears", Money::from_major(9), stock));
        id
    }

    #[test]
    fn committed_decrements_are_visible_after_the_transaction() {
        let catalog = InMemoryProductCatalog::new();
        let id = seed(&catalog, 10);

        catalog
            .transact::<_, StockError, _>(&[id], |stock| stock.decrement_if_available(id, 4))
            .unwrap();

        assert_eq!(catalog.stock_of(id), Some(6));
    }

    #[test]
    fn aborted_transactions_roll_every_decrement_back() {
        let catalog = InMemoryProductCatalog::new();
        let a = seed(&catalog, 10);
        let b = seed(&catalog, 1);

        let err = catalog
            .transact::<(), StockError, _>(&[a, b], |stock| {
                stock.decrement_if_available(a, 4)?;
                stock.decrement_if_available(b, 3)?; // insufficient, aborts
                Ok(())
            })
            .unwrap_err();

        assert!(matches!(err, StockError::Insufficient { available: 1, .. }));
        assert_eq!(catalog.stock_of(a), Some(10));
        assert_eq!(catalog.stock_of(b), Some(1));
    }

    #[test]
    fn unknown_product_surfaces_as_not_found_inside_the_transaction() {
        let catalog = InMemoryProductCatalog::new();
        let ghost = ProductId::new();

        let err = catalog
            .transact::<(), StockError, _>(&[ghost], |stock| {
                stock.decrement_if_available(ghost, 1)
            })
            .unwrap_err();

        assert_eq!(err, StockError::NotFound(ghost));
    }

    #[test]
    fn duplicate_ids_collapse_onto_one_lock() {
        let catalog = InMemoryProductCatalog::new();
        let id = seed(&catalog, 10);

        // Would self-deadlock if the same product were locked twice.
        catalog
            .transact::<_, StockError, _>(&[id, id], |stock| {
                stock.decrement_if_available(id, 1)?;
                stock.decrement_if_available(id, 2)
            })
            .unwrap();

        assert_eq!(catalog.stock_of(id), Some(7));
    }

    #[test]
    fn opposing_lock_orders_do_not_deadlock() {
        let catalog = Arc::new(InMemoryProductCatalog::new());
        let a = seed(&catalog, 1_000);
        let b = seed(&catalog, 1_000);

        let spawn = |ids: [ProductId; 2]| {
            let catalog = Arc::clone(&catalog);
            std::thread::spawn(move || {
                for _ in 0..200 {
                    catalog
                        .transact::<_, StockError, _>(&ids, |stock| {
                            stock.decrement_if_available(ids[0], 1)?;
                            stock.decrement_if_available(ids[1], 1)
                        })
                        .unwrap();
                }
            })
        };

        // Caller-supplied order differs; canonical ordering makes it safe.
        let forward = spawn([a, b]);
        let reverse = spawn([b, a]);
        forward.join().unwrap();
        reverse.join().unwrap();

        assert_eq!(catalog.stock_of(a), Some(600));
        assert_eq!(catalog.stock_of(b), Some(600));
    }
}
