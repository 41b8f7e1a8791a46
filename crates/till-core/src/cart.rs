//! # Cart Module
//!
//! The in-progress order: a mapping of menu-item id to cart line.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Cart State Machine                             │
//! │                                                                     │
//! │  UI Event                 Operation              State Change       │
//! │  ────────                 ─────────              ────────────       │
//! │  Tap item button ───────► add_item() ──────────► qty += 1 (insert)  │
//! │  Edit qty field ────────► set_quantity() ──────► qty = n (0 drops)  │
//! │  Tap remove (×) ────────► remove_item() ───────► line deleted       │
//! │  Tap clear ─────────────► clear() ─────────────► empty cart         │
//! │  Render / payload ──────► snapshot() ──────────► (read only)        │
//! │                                                                     │
//! │  INVARIANTS                                                         │
//! │  • every line has qty ≥ 1 (a qty-0 line does not exist)             │
//! │  • the map key always equals the line's own id                      │
//! │  • name/price are frozen at add time (first-seen wins)              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This type is pure state — persistence lives in `till-engine`, which
//! serializes the whole cart after every mutation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::ItemId;

// =============================================================================
// Cart Line
// =============================================================================

/// One distinct orderable item with an aggregated quantity.
///
/// ## Price Freezing
/// `name` and `unit_price_minor` are captured when the item is first added.
/// A renamed or re-priced catalog item does not retroactively change lines
/// already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    /// Menu item id (equals the map key it is stored under).
    pub id: ItemId,

    /// Display label at add time (frozen).
    pub name: String,

    /// Unit price in minor units at add time (frozen).
    pub unit_price_minor: i64,

    /// Aggregated quantity, always ≥ 1 while the line exists.
    pub qty: i64,
}

impl CartLine {
    /// Unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_minor(self.unit_price_minor)
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.qty)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The in-progress order.
///
/// Backed by a `BTreeMap` so iteration (and therefore the snapshot and the
/// checkout payload) is deterministic: ascending item id. Summation is
/// order-independent by construction, but a stable order keeps rendering and
/// payload construction reproducible.
///
/// Serializes transparently as the `id → line` mapping, which is exactly the
/// persisted shape the engine writes to durable storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: BTreeMap<ItemId, CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds one unit of an item to the cart.
    ///
    /// ## Behavior
    /// - Item absent: a new line is inserted at qty 0, then incremented to 1
    /// - Item present: quantity increments by 1; the existing line's name
    ///   and price are NOT updated (first-seen values win for the session)
    pub fn add_item(&mut self, id: ItemId, name: &str, unit_price_minor: i64) {
        let line = self.lines.entry(id).or_insert_with(|| CartLine {
            id,
            name: name.to_string(),
            unit_price_minor,
            qty: 0,
        });
        line.qty += 1;
    }

    /// Sets the quantity of an existing line.
    ///
    /// ## Behavior
    /// - Negative input clamps to 0
    /// - Quantity 0 removes the line entirely (never kept at zero)
    /// - Item absent: no-op (cannot set quantity on a non-existent line)
    pub fn set_quantity(&mut self, id: ItemId, qty: i64) {
        let qty = qty.max(0);
        if !self.lines.contains_key(&id) {
            return;
        }
        if qty == 0 {
            self.lines.remove(&id);
        } else if let Some(line) = self.lines.get_mut(&id) {
            line.qty = qty;
        }
    }

    /// Removes a line if present; no-op otherwise.
    pub fn remove_item(&mut self, id: ItemId) {
        self.lines.remove(&id);
    }

    /// Empties the cart unconditionally. Idempotent.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Current lines as an ordered sequence (ascending item id).
    ///
    /// Read-only: used for rendering and payload construction.
    pub fn snapshot(&self) -> Vec<CartLine> {
        self.lines.values().cloned().collect()
    }

    /// Iterates the lines in deterministic order without cloning.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    /// Looks up a single line.
    pub fn line(&self, id: ItemId) -> Option<&CartLine> {
        self.lines.get(&id)
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.values().map(|l| l.qty).sum()
    }

    /// Sum of `unit_price × quantity` over current lines.
    pub fn subtotal(&self) -> Money {
        self.lines
            .values()
            .fold(Money::zero(), |acc, l| acc + l.line_total())
    }
}

// =============================================================================
// Quantity Input Normalization
// =============================================================================

/// Parses a raw quantity field into a usable quantity.
///
/// Non-numeric or malformed entry normalizes to 0 (treated as a removal by
/// [`Cart::set_quantity`]) and never raises; negative input clamps to 0.
pub fn parse_quantity_input(raw: &str) -> i64 {
    raw.trim().parse::<i64>().map(|q| q.max(0)).unwrap_or(0)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_item_inserts_then_increments() {
        let mut cart = Cart::new();
        cart.add_item(1, "Burger", 500);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.line(1).unwrap().qty, 1);

        cart.add_item(1, "Burger", 500);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.line(1).unwrap().qty, 2);
    }

    #[test]
    fn test_add_item_first_seen_name_and_price_win() {
        let mut cart = Cart::new();
        cart.add_item(1, "Burger", 500);
        // Catalog renamed/re-priced mid-session; existing line is frozen.
        cart.add_item(1, "Royale", 700);

        let line = cart.line(1).unwrap();
        assert_eq!(line.name, "Burger");
        assert_eq!(line.unit_price_minor, 500);
        assert_eq!(line.qty, 2);
    }

    #[test]
    fn test_subtotal_tracks_all_mutations() {
        let mut cart = Cart::new();
        cart.add_item(1, "Burger", 500);
        cart.add_item(1, "Burger", 500);
        cart.add_item(2, "Fries", 200);
        assert_eq!(cart.subtotal().minor(), 1200);

        cart.set_quantity(1, 3);
        assert_eq!(cart.subtotal().minor(), 1700);

        cart.remove_item(2);
        assert_eq!(cart.subtotal().minor(), 1500);

        cart.set_quantity(1, 0);
        assert_eq!(cart.subtotal(), Money::zero());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let mut a = Cart::new();
        let mut b = Cart::new();
        for cart in [&mut a, &mut b] {
            cart.add_item(1, "Burger", 500);
            cart.add_item(2, "Fries", 200);
        }

        a.set_quantity(1, 0);
        b.remove_item(1);
        assert_eq!(a, b);
    }

    #[test]
    fn test_set_quantity_clamps_negative_to_removal() {
        let mut cart = Cart::new();
        cart.add_item(1, "Burger", 500);
        cart.set_quantity(1, -5);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_on_missing_line_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(1, "Burger", 500);
        cart.set_quantity(99, 4);

        assert_eq!(cart.line_count(), 1);
        assert!(cart.line(99).is_none());
    }

    #[test]
    fn test_remove_missing_line_is_noop() {
        let mut cart = Cart::new();
        cart.remove_item(42);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_item(1, "Burger", 500);

        cart.clear();
        assert!(cart.is_empty());
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_snapshot_is_ordered_by_id() {
        let mut cart = Cart::new();
        cart.add_item(9, "Tea", 150);
        cart.add_item(3, "Fries", 200);
        cart.add_item(5, "Burger", 500);

        let ids: Vec<_> = cart.snapshot().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![3, 5, 9]);
    }

    #[test]
    fn test_serde_round_trip_preserves_mapping() {
        let mut cart = Cart::new();
        cart.add_item(1, "Burger", 500);
        cart.add_item(1, "Burger", 500);
        cart.add_item(2, "Fries", 200);

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_persisted_shape_is_id_to_line_mapping() {
        let mut cart = Cart::new();
        cart.add_item(7, "Burger", 500);

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json["7"]["id"], 7);
        assert_eq!(json["7"]["name"], "Burger");
        assert_eq!(json["7"]["unit_price_minor"], 500);
        assert_eq!(json["7"]["qty"], 1);
    }

    #[test]
    fn test_parse_quantity_input() {
        assert_eq!(parse_quantity_input("3"), 3);
        assert_eq!(parse_quantity_input(" 12 "), 12);
        assert_eq!(parse_quantity_input("-2"), 0);
        assert_eq!(parse_quantity_input(""), 0);
        assert_eq!(parse_quantity_input("abc"), 0);
        assert_eq!(parse_quantity_input("1.5"), 0);
    }
}
