use std::fmt;
use std::str::FromStr;

use anyhow::{Error, anyhow};
use serde::{Deserialize, Serialize};

/// Pack sizes a product is sold in. Prices are quoted for `Large`
/// and scaled down for the smaller packs.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub enum WeightTier {
    #[serde(rename = "250g")]
    Small,
    #[serde(rename = "500g")]
    Medium,
    #[serde(rename = "1kg")]
    Large,
}

impl WeightTier {
    pub const ALL: [WeightTier; 3] = [WeightTier::Small, WeightTier::Medium, WeightTier::Large];

    pub fn label(&self) -> &'static str {
        match self {
            WeightTier::Small => "250g",
            WeightTier::Medium => "500g",
            WeightTier::Large => "1kg",
        }
    }

    /// Multiplier against the 1kg base price, in percent
    pub fn multiplier_pct(&self) -> u64 {
        match self {
            WeightTier::Small => 30,
            WeightTier::Medium => 55,
            WeightTier::Large => 100,
        }
    }

    /// Price of this pack for a 1kg `base_price`, rounded half-up to
    /// the nearest rupee. Integer math so that exact halves always
    /// round up. Widened to `u128` so any `u64` base price fits.
    pub fn price_for(&self, base_price: u64) -> u64 {
        let scaled = (u128::from(base_price) * u128::from(self.multiplier_pct()) + 50) / 100;
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }
}

impl fmt::Display for WeightTier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WeightTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "250g" | "small" => Ok(WeightTier::Small),
            "500g" | "medium" => Ok(WeightTier::Medium),
            "1kg" | "1000g" | "large" => Ok(WeightTier::Large),
            _ => Err(anyhow!("Unknown weight: {} (expected 250g, 500g or 1kg)", s)),
        }
    }
}

/// Identity of a cart line. Two adds with the same key merge into
/// one line.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CartKey {
    pub product_id: String,
    pub tier: WeightTier,
}

impl CartKey {
    pub fn new(product_id: &str, tier: WeightTier) -> Self {
        Self {
            product_id: product_id.to_string(),
            tier,
        }
    }
}

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub tier: WeightTier,
    pub quantity: u32,
    // Captured when the line was created so later catalog changes
    // don't reprice what the customer already picked
    pub unit_price: u64,
    #[serde(skip)]
    pub(crate) seq: u64,
}

impl CartLine {
    /// Saturates instead of overflowing
    pub fn subtotal(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

/// Events for whoever is presenting the cart
#[derive(Clone, Debug, PartialEq)]
pub enum CartEvent {
    /// An item was added and the cart should be shown
    Presented,
}
