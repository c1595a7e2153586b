//! Batch ingestion: fan a sequence of order requests through the
//! fulfillment transaction one at a time.
//!
//! Each row runs in its own transaction. A row failure is recorded against
//! that row and never aborts sibling rows, so an upload with one bad row
//! still lands every good one and the bad row stays available for retry.
//! Decoding raw spreadsheets into [`OrderRequest`] values is the outer
//! layer's job; this pipeline is pure fan-out plus result collection.

use tracing::warn;

use orderflow_customers::CustomerDirectory;
use orderflow_products::ProductCatalog;

use crate::error::OrderError;
use crate::fulfillment::{OrderFulfillment, OrderRequest};
use crate::number::OrderNumberSource;
use crate::order::Order;
use crate::store::OrderStore;

impl<D, P, S, G> OrderFulfillment<D, P, S, G>
where
    D: CustomerDirectory,
    P: ProductCatalog,
    S: OrderStore,
    G: OrderNumberSource,
{
    /// Fulfill every request independently, preserving input order in the
    /// output (one result per row, same length).
    pub fn fulfill_batch(&self, requests: &[OrderRequest]) -> Vec<Result<Order, OrderError>> {
        requests
            .iter()
            .enumerate()
            .map(|(row, request)| {
                let result = self.fulfill(request);
                if let Err(err) = &result {
                    warn!(
                        row,
                        customer_id = %request.customer_id,
                        error = %err,
                        "batch row failed"
                    );
                }
                result
            })
            .collect()
    }
}
