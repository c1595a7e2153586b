use serde::{Deserialize, Serialize};

use orderflow_core::{Money, ProductId};
use orderflow_customers::Customer;

/// Globally unique order identifier.
///
/// Minted by [`crate::number::OrderNumberGenerator`]; lexicographically
/// time-ordered thanks to its leading timestamp. Uniqueness is probabilistic
/// at generation time and enforced for real by the order store's uniqueness
/// constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// One priced line of an order.
///
/// A line is owned by exactly one order; it is moved into the order and can
/// never be re-attached (what the order model treats as a programming error
/// is simply unrepresentable here).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    product_id: ProductId,
    quantity: u32,
    line_total: Money,
}

impl OrderLine {
    pub fn new(product_id: ProductId, quantity: u32, line_total: Money) -> Self {
        Self {
            product_id,
            quantity,
            line_total,
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn line_total(&self) -> Money {
        self.line_total
    }
}

/// Order aggregate.
///
/// Assembled line by line inside one fulfillment transaction and committed as
/// a whole; once committed it is immutable and its line sequence is
/// non-empty (the fulfillment service rejects empty requests up front).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    order_number: OrderNumber,
    customer: Customer,
    lines: Vec<OrderLine>,
}

impl Order {
    /// Create an empty order shell bound to a customer.
    pub fn new(order_number: OrderNumber, customer: Customer) -> Self {
        Self {
            order_number,
            customer,
            lines: Vec::new(),
        }
    }

    pub fn order_number(&self) -> &OrderNumber {
        &self.order_number
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Append a line, taking ownership of it.
    pub fn push_line(&mut self, line: OrderLine) {
        self.lines.push(line);
    }

    /// Sum of the (already rounded) line totals.
    pub fn total(&self) -> Money {
        self.lines.iter().map(OrderLine::line_total).sum()
    }

    /// Swap in a freshly generated order number.
    ///
    /// Only meaningful before the order is committed; the fulfillment
    /// service uses this when the store reports an order-number collision.
    pub(crate) fn with_order_number(mut self, order_number: OrderNumber) -> Self {
        self.order_number = order_number;
        self
    }
}
