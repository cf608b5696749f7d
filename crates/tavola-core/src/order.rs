//! Cart aggregation.
//!
//! A cart holds at most one line per distinct item id; repeated orders
//! of the same item raise the line's quantity. The total is never
//! adjusted incrementally - every mutation recomputes it in full from
//! the lines, rounded to cents, so repeated merges cannot drift.

use serde::{Deserialize, Serialize};

/// Rounds a money amount to cents.
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// A single line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Stable item identity; the merge key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Normalized unit price.
    pub price: f64,
    /// Positive line quantity.
    pub quantity: u32,
    /// Opaque image reference carried through for display.
    #[serde(default)]
    pub image: Option<String>,
}

impl OrderItem {
    /// Creates a single-quantity line.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity: 1,
            image: None,
        }
    }
}

/// The running, de-duplicated order for a chat session.
///
/// Invariants:
/// - at most one line per distinct `id`;
/// - `total` equals the cent-rounded sum of `price * quantity` over all
///   lines, recomputed on every mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Order lines, in first-seen order.
    pub items: Vec<OrderItem>,
    /// Cent-rounded sum of `price * quantity` over `items`.
    pub total: f64,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds incoming lines into the cart.
    ///
    /// Lines with an id already in the cart have their quantity added to
    /// the existing line (the existing name/price/image win); new ids
    /// append a fresh line. Merging is additive by design: confirming
    /// the same order twice doubles quantities, it does not de-duplicate.
    pub fn merge(&mut self, incoming: Vec<OrderItem>) {
        for line in incoming {
            match self.items.iter_mut().find(|existing| existing.id == line.id) {
                Some(existing) => existing.quantity += line.quantity,
                None => self.items.push(line),
            }
        }
        self.recompute_total();
    }

    /// Removes the line with the given id entirely (no decrement).
    pub fn delete_item(&mut self, id: &str) {
        self.items.retain(|line| line.id != id);
        self.recompute_total();
    }

    /// The quantity of the line with the given id (0 when absent).
    pub fn quantity_of(&self, id: &str) -> u32 {
        self.items
            .iter()
            .find(|line| line.id == id)
            .map_or(0, |line| line.quantity)
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn recompute_total(&mut self) {
        let sum: f64 = self
            .items
            .iter()
            .map(|line| line.price * f64::from(line.quantity))
            .sum();
        self.total = round_to_cents(sum);
    }
}
