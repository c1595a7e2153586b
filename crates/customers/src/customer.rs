use serde::{Deserialize, Serialize};

use orderflow_core::CustomerId;

/// Pricing tier of a customer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CustomerTier {
    #[default]
    Standard,
    Vip,
}

impl CustomerTier {
    /// Map a raw tier label to a tier.
    ///
    /// Unrecognized labels fall back to `Standard`. This is a deliberate
    /// default, not an error: an unknown tier must never block an order.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "VIP" => CustomerTier::Vip,
            _ => CustomerTier::Standard,
        }
    }
}

/// Customer entity.
///
/// Immutable in the fulfillment flow; referenced by id and read for its
/// display data and tier only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    address: String,
    tier: CustomerTier,
}

impl Customer {
    pub fn new(
        id: CustomerId,
        name: impl Into<String>,
        address: impl Into<String>,
        tier: CustomerTier,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            address: address.into(),
            tier,
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn tier(&self) -> CustomerTier {
        self.tier
    }
}
