//! # Order Session
//!
//! Wires the persistent cart store to the checkout calculator. This is the
//! surface the terminal UI's event handlers call — thin adapters over these
//! public operations, no cart state of their own.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Order Session                                │
//! │                                                                     │
//! │  UI event ──► CartStore mutation (persisted) ──► recompute()        │
//! │                                                      │              │
//! │                              totals / change due ◄───┘              │
//! │                                                                     │
//! │  checkout trigger ──► finalize(note)                                │
//! │      validate ──► payload ──► clear cart (persisted) ──► recompute  │
//! │                                                                     │
//! │  Single-threaded, synchronous, run-to-completion: a mutation and    │
//! │  its recomputation are always observed atomically — there is no     │
//! │  window where totals reflect a stale cart.                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Payment state is session-local: a reload restores the cart from storage
//! but starts payment back at the configured default method with an
//! untouched cash field.

use tracing::{debug, info};

use till_core::{
    parse_quantity_input, CartLine, CashTender, Checkout, CheckoutPayload, CheckoutResult,
    ItemId, Money, PaymentMethod, Totals,
};
use till_core::types::CatalogItem;

use crate::cart_store::CartStore;
use crate::config::EngineConfig;
use crate::storage::StorageBackend;

/// One terminal's in-progress order: persistent cart + checkout calculator.
pub struct OrderSession {
    cart: CartStore,
    checkout: Checkout,
}

impl OrderSession {
    /// Opens a session: restores the persisted cart (silently empty on any
    /// read problem) and recomputes so totals are current immediately.
    pub fn open(config: &EngineConfig, storage: Box<dyn StorageBackend>) -> Self {
        let cart = CartStore::open(storage);
        let mut checkout = Checkout::new(config.tax_rate(), config.default_method);
        checkout.recompute(cart.cart());

        info!(
            lines = cart.cart().line_count(),
            tax_bps = config.tax_rate_bps,
            "order session opened"
        );
        OrderSession { cart, checkout }
    }

    // -------------------------------------------------------------------------
    // Cart mutations (each persists, then recomputes)
    // -------------------------------------------------------------------------

    /// Adds one unit of an item to the order.
    pub fn add_item(&mut self, id: ItemId, name: &str, unit_price_minor: i64) {
        self.cart.add_item(id, name, unit_price_minor);
        self.checkout.recompute(self.cart.cart());
    }

    /// Adds one unit of a catalog item (convenience for item buttons).
    pub fn add_catalog_item(&mut self, item: &CatalogItem) {
        self.add_item(item.id, &item.name, item.unit_price_minor);
    }

    /// Sets a line's quantity; 0 removes the line, absent ids are a no-op.
    pub fn set_quantity(&mut self, id: ItemId, qty: i64) {
        self.cart.set_quantity(id, qty);
        self.checkout.recompute(self.cart.cart());
    }

    /// Sets a line's quantity from the raw text of the quantity field.
    ///
    /// Malformed or negative input normalizes to 0 — i.e. a removal.
    pub fn set_quantity_input(&mut self, id: ItemId, raw: &str) {
        self.set_quantity(id, parse_quantity_input(raw));
    }

    /// Removes a line from the order.
    pub fn remove_item(&mut self, id: ItemId) {
        self.cart.remove_item(id);
        self.checkout.recompute(self.cart.cart());
    }

    /// Abandons the order: empties the cart.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.checkout.recompute(self.cart.cart());
    }

    // -------------------------------------------------------------------------
    // Payment state
    // -------------------------------------------------------------------------

    /// Switches the payment method.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        debug!(method = method.as_str(), "set_payment_method");
        self.checkout.set_payment_method(method, self.cart.cart());
    }

    /// Applies an edit of the cash-received field.
    pub fn edit_cash_input(&mut self, raw: &str) {
        self.checkout.edit_cash_input(raw);
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Current cart lines in deterministic order, for rendering.
    pub fn snapshot(&self) -> Vec<CartLine> {
        self.cart.snapshot()
    }

    /// Derived totals from the last recompute (never stale: every mutation
    /// path recomputes before returning).
    pub fn totals(&self) -> Totals {
        self.checkout.totals()
    }

    /// Change owed to the customer; `None` unless paying cash.
    pub fn change_due(&self) -> Option<Money> {
        self.checkout.change_due()
    }

    /// The selected payment method.
    pub fn payment_method(&self) -> PaymentMethod {
        self.checkout.payment_method()
    }

    /// The cash tender field state (for rendering the input).
    pub fn tender(&self) -> CashTender {
        self.checkout.tender()
    }

    /// Checks whether checkout would succeed right now.
    pub fn validate_for_checkout(&self) -> CheckoutResult<()> {
        self.checkout.validate_for_checkout(self.cart.cart())
    }

    // -------------------------------------------------------------------------
    // Finalization
    // -------------------------------------------------------------------------

    /// Finalizes the order.
    ///
    /// On validation failure, returns the error and changes nothing — the
    /// persisted cart is untouched. On success, returns the payload for the
    /// order-submission collaborator and empties (and persists) the cart in
    /// the same synchronous call.
    pub fn finalize(&mut self, note: &str) -> CheckoutResult<CheckoutPayload> {
        self.checkout.validate_for_checkout(self.cart.cart())?;
        let payload = self.checkout.build_payload(self.cart.cart(), note);

        self.cart.clear();
        self.checkout.recompute(self.cart.cart());

        info!(
            lines = payload.lines.len(),
            method = payload.payment_method.as_str(),
            cash_received = payload.cash_received,
            "order finalized"
        );
        Ok(payload)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::cart_store::CART_KEY;
    use crate::storage::{FileStore, MemoryStore};
    use till_core::CheckoutError;

    fn cash_config(tax_rate_bps: u32) -> EngineConfig {
        EngineConfig {
            tax_rate_bps,
            ..EngineConfig::default()
        }
    }

    fn burger_fries_session(backend: Rc<MemoryStore>) -> OrderSession {
        let mut session = OrderSession::open(&cash_config(1000), Box::new(backend));
        session.add_item(1, "Burger", 500);
        session.add_item(1, "Burger", 500);
        session.add_item(2, "Fries", 200);
        session
    }

    #[test]
    fn test_totals_follow_every_mutation() {
        let mut session = burger_fries_session(Rc::new(MemoryStore::new()));
        assert_eq!(session.totals().subtotal.minor(), 1200);
        assert_eq!(session.totals().tax.minor(), 120);
        assert_eq!(session.totals().total.minor(), 1320);

        session.set_quantity(1, 1);
        assert_eq!(session.totals().total.minor(), 770);

        session.remove_item(2);
        assert_eq!(session.totals().total.minor(), 550);

        session.clear();
        assert_eq!(session.totals().total, Money::zero());
    }

    #[test]
    fn test_untouched_cash_flow_checks_out_with_zero_change() {
        let mut session = burger_fries_session(Rc::new(MemoryStore::new()));

        // Operator never edits the cash field
        assert_eq!(session.tender().amount().minor(), 1320);
        assert_eq!(session.change_due(), Some(Money::zero()));
        assert_eq!(session.validate_for_checkout(), Ok(()));

        let payload = session.finalize("").unwrap();
        assert_eq!(payload.cash_received, 1320);
    }

    #[test]
    fn test_under_tendered_cash_blocks_finalize() {
        let mut session = burger_fries_session(Rc::new(MemoryStore::new()));
        session.edit_cash_input("10.00");

        assert_eq!(
            session.finalize(""),
            Err(CheckoutError::InsufficientCash {
                tendered: Money::from_minor(1000),
                due: Money::from_minor(1320),
            })
        );
        // Failed finalize leaves the order alone
        assert_eq!(session.snapshot().len(), 2);
    }

    #[test]
    fn test_finalize_empty_cart_leaves_storage_untouched() {
        let backend = Rc::new(MemoryStore::new());
        let mut session = OrderSession::open(&cash_config(1000), Box::new(backend.clone()));

        assert_eq!(session.finalize(""), Err(CheckoutError::EmptyCart));
        assert!(backend.read(CART_KEY).unwrap().is_none());
    }

    #[test]
    fn test_successful_finalize_clears_cart_and_storage() {
        let backend = Rc::new(MemoryStore::new());
        let mut session = burger_fries_session(backend.clone());

        let payload = session.finalize("table 4").unwrap();
        assert_eq!(payload.lines.len(), 2);
        assert_eq!(payload.note, "table 4");

        // Immediate snapshot is empty and the persisted cart reflects it
        assert!(session.snapshot().is_empty());
        let persisted: till_core::Cart =
            serde_json::from_str(&backend.read(CART_KEY).unwrap().unwrap()).unwrap();
        assert!(persisted.is_empty());
    }

    #[test]
    fn test_reload_restores_cart_but_resets_payment_state() {
        let backend = Rc::new(MemoryStore::new());
        let mut session = burger_fries_session(backend.clone());
        session.edit_cash_input("50.00");
        session.set_payment_method(PaymentMethod::Card);
        drop(session);

        let reloaded = OrderSession::open(&cash_config(1000), Box::new(backend));
        assert_eq!(reloaded.totals().total.minor(), 1320);
        // Payment state is session-local: back to cash default, fresh suggestion
        assert_eq!(reloaded.payment_method(), PaymentMethod::Cash);
        assert_eq!(
            reloaded.tender(),
            CashTender::Suggested(Money::from_minor(1320))
        );
    }

    #[test]
    fn test_session_survives_reload_on_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = cash_config(1000);

        {
            let storage = FileStore::open(dir.path()).unwrap();
            let mut session = OrderSession::open(&config, Box::new(storage));
            session.add_item(1, "Burger", 500);
            session.add_item(2, "Fries", 200);
        }

        let storage = FileStore::open(dir.path()).unwrap();
        let session = OrderSession::open(&config, Box::new(storage));
        assert_eq!(session.snapshot().len(), 2);
        assert_eq!(session.totals().subtotal.minor(), 700);
    }

    #[test]
    fn test_quantity_field_text_is_normalized() {
        let mut session = burger_fries_session(Rc::new(MemoryStore::new()));

        session.set_quantity_input(1, "4");
        assert_eq!(session.snapshot()[0].qty, 4);

        // Garbage normalizes to 0, which removes the line
        session.set_quantity_input(1, "oops");
        assert!(session.snapshot().iter().all(|l| l.id != 1));
    }

    #[test]
    fn test_add_catalog_item_freezes_button_data() {
        let mut session = OrderSession::open(
            &cash_config(1000),
            Box::new(MemoryStore::new()),
        );
        let item = CatalogItem {
            id: 9,
            name: "Espresso".into(),
            unit_price_minor: 300,
            category: "Drinks".into(),
        };
        session.add_catalog_item(&item);
        session.add_catalog_item(&item);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].qty, 2);
        assert_eq!(snapshot[0].unit_price_minor, 300);
    }
}
