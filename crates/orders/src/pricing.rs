//! Tier-based line pricing.
//!
//! Pricing behavior varies over a closed, small set of tiers, so the strategy
//! is a plain enum dispatch rather than a registry. Pure and deterministic;
//! the caller enforces `quantity >= 1` before calling.

use rust_decimal::Decimal;

use orderflow_core::Money;
use orderflow_customers::CustomerTier;

/// Compute the total for one order line.
///
/// STANDARD pays `unit_price * quantity`; VIP gets a 10% discount. Rounding
/// is half-up at two decimals, applied once to the final product (never per
/// unit).
pub fn line_total(unit_price: Money, quantity: u32, tier: CustomerTier) -> Money {
    let gross = unit_price.mul_quantity(quantity);
    match tier {
        CustomerTier::Standard => gross.rounded(),
        // 10% discount: multiply by 0.9, then round the final product.
        CustomerTier::Vip => gross.apply_rate(Decimal::new(9, 1)).rounded(),
    }
}
