use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tokio::sync::mpsc;

use super::models::{CartEvent, CartKey, CartLine, WeightTier};
use crate::catalog::Product;

/// The shopping cart for one session.
///
/// Lines are stored by `(product id, tier)` so merging, updating and
/// removing never scan the cart and there can't be two lines for the
/// same key. Each line remembers when it was first added so `lines()`
/// can return them in insertion order for display.
///
/// All mutations are synchronous and take `&mut self`, there is only
/// ever one writer.
#[derive(Default)]
pub struct Cart {
    lines: HashMap<CartKey, CartLine>,
    next_seq: u64,
    events: Option<mpsc::UnboundedSender<CartEvent>>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cart that notifies `transmitter` whenever the cart
    /// should be presented to the customer.
    pub fn with_events(transmitter: mpsc::UnboundedSender<CartEvent>) -> Self {
        Self {
            events: Some(transmitter),
            ..Self::default()
        }
    }

    /// Add one pack of `product` in `tier`. Repeated adds of the same
    /// product and tier bump the quantity and keep the unit price
    /// captured on the first add.
    pub fn add(&mut self, product: &Product, tier: WeightTier) -> &CartLine {
        let key = CartKey::new(&product.id, tier);
        let line = match self.lines.entry(key) {
            Entry::Occupied(entry) => {
                let line = entry.into_mut();
                line.quantity = line.quantity.saturating_add(1);
                tracing::debug!(
                    "Cart: {} ({}) quantity now {}",
                    line.product_id,
                    tier,
                    line.quantity
                );
                line
            }
            Entry::Vacant(entry) => {
                let seq = self.next_seq;
                self.next_seq += 1;
                let unit_price = tier.price_for(product.price);
                tracing::debug!(
                    "Cart: new line {} ({}) at {}",
                    product.id,
                    tier,
                    unit_price
                );
                entry.insert(CartLine {
                    product_id: product.id.clone(),
                    name: product.name.clone(),
                    tier,
                    quantity: 1,
                    unit_price,
                    seq,
                })
            }
        };

        // The result is ignored, nobody listening is fine
        if let Some(tx) = &self.events {
            let _ = tx.send(CartEvent::Presented);
        }

        line
    }

    /// Change the quantity of a line by `delta`. The quantity never
    /// goes below 1, use `remove` to drop a line. Unknown keys are
    /// ignored.
    pub fn update_quantity(&mut self, product_id: &str, tier: WeightTier, delta: i64) {
        let key = CartKey::new(product_id, tier);
        if let Some(line) = self.lines.get_mut(&key) {
            let next = (i64::from(line.quantity)).saturating_add(delta).max(1);
            line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
            tracing::debug!(
                "Cart: {} ({}) quantity now {}",
                product_id,
                tier,
                line.quantity
            );
        } else {
            tracing::debug!("Cart: ignoring update for missing line {} ({})", product_id, tier);
        }
    }

    /// Drop a line. Unknown keys are ignored.
    pub fn remove(&mut self, product_id: &str, tier: WeightTier) {
        let key = CartKey::new(product_id, tier);
        if self.lines.remove(&key).is_some() {
            tracing::debug!("Cart: removed {} ({})", product_id, tier);
        }
    }

    pub fn get(&self, product_id: &str, tier: WeightTier) -> Option<&CartLine> {
        self.lines.get(&CartKey::new(product_id, tier))
    }

    /// Lines in the order they were first added
    pub fn lines(&self) -> Vec<&CartLine> {
        let mut lines: Vec<&CartLine> = self.lines.values().collect();
        lines.sort_by_key(|l| l.seq);
        lines
    }

    /// Sum of all line subtotals, saturating at `u64::MAX`
    pub fn total(&self) -> u64 {
        self.lines
            .values()
            .map(CartLine::subtotal)
            .fold(0, u64::saturating_add)
    }

    /// Number of packs across all lines
    pub fn item_count(&self) -> u64 {
        self.lines.values().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
