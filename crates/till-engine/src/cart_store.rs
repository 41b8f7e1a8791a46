//! # Cart Store Module
//!
//! The persistent cart: every mutation is written through to durable
//! storage so a terminal reload mid-order does not lose the order.
//!
//! ## Persistence Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Cart Persistence                              │
//! │                                                                     │
//! │  open()                                                             │
//! │    read "till.cart" ──► parse ──► Cart                              │
//! │         │                  │                                        │
//! │         │ missing          │ corrupt / malformed shape              │
//! │         ▼                  ▼                                        │
//! │    empty cart         empty cart (warn!, never surfaced)            │
//! │                                                                     │
//! │  add_item / set_quantity / remove_item / clear                      │
//! │    mutate ──► serialize whole cart ──► write "till.cart"            │
//! │                                    └──► write failure: warn! only   │
//! │                                                                     │
//! │  Persistence is best-effort; the in-memory cart is authoritative    │
//! │  for the running session. Concurrent tabs race last-writer-wins.    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, warn};

use till_core::{Cart, CartLine, ItemId};

use crate::storage::StorageBackend;

/// Fixed durable key holding the JSON-serialized cart mapping.
pub const CART_KEY: &str = "till.cart";

/// The cart plus its write-through persistence.
///
/// All mutation goes through this type so the persisted copy can never miss
/// a change. Reads expose the inner [`Cart`] directly.
pub struct CartStore {
    cart: Cart,
    storage: Box<dyn StorageBackend>,
}

impl CartStore {
    /// Opens the store, restoring any persisted cart.
    ///
    /// A missing key, unreadable value, parse failure, or malformed shape
    /// all silently fall back to an empty cart — indistinguishable from a
    /// first run, logged at warn level, never propagated.
    pub fn open(storage: Box<dyn StorageBackend>) -> Self {
        let cart = Self::restore(storage.as_ref());
        CartStore { cart, storage }
    }

    fn restore(storage: &dyn StorageBackend) -> Cart {
        let raw = match storage.read(CART_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no persisted cart, starting empty");
                return Cart::new();
            }
            Err(e) => {
                warn!(error = %e, "persisted cart unreadable, starting empty");
                return Cart::new();
            }
        };

        match serde_json::from_str::<Cart>(&raw) {
            Ok(cart) => {
                debug!(lines = cart.line_count(), "restored persisted cart");
                cart
            }
            Err(e) => {
                warn!(error = %e, "persisted cart corrupt, starting empty");
                Cart::new()
            }
        }
    }

    /// The current cart (read-only).
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current lines as an ordered sequence.
    pub fn snapshot(&self) -> Vec<CartLine> {
        self.cart.snapshot()
    }

    /// Adds one unit of an item; persists.
    pub fn add_item(&mut self, id: ItemId, name: &str, unit_price_minor: i64) {
        debug!(id, name, unit_price_minor, "add_item");
        self.cart.add_item(id, name, unit_price_minor);
        self.persist();
    }

    /// Sets a line's quantity (0 removes it); persists.
    pub fn set_quantity(&mut self, id: ItemId, qty: i64) {
        debug!(id, qty, "set_quantity");
        self.cart.set_quantity(id, qty);
        self.persist();
    }

    /// Removes a line if present; persists.
    pub fn remove_item(&mut self, id: ItemId) {
        debug!(id, "remove_item");
        self.cart.remove_item(id);
        self.persist();
    }

    /// Empties the cart; persists.
    pub fn clear(&mut self) {
        debug!("clear");
        self.cart.clear();
        self.persist();
    }

    /// Writes the whole cart under [`CART_KEY`].
    ///
    /// Write failures are logged and swallowed: the in-memory cart stays
    /// authoritative and a later mutation retries the write.
    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.cart) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "cart serialization failed, skipping persist");
                return;
            }
        };
        if let Err(e) = self.storage.write(CART_KEY, &json) {
            warn!(error = %e, "cart persist failed");
        }
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore").field("cart", &self.cart).finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
