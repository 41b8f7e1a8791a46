//! # Checkout Module
//!
//! Derives totals from the cart, manages the cash-payment sub-flow, and
//! builds the finalized order payload.
//!
//! ## Computation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Pipeline                                │
//! │                                                                     │
//! │  Cart mutation / method change                                      │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  recompute()                                                        │
//! │    subtotal = Σ unit_price × qty                                    │
//! │    tax      = round_half_up(subtotal × rate)                        │
//! │    total    = subtotal + tax                                        │
//! │       │                                                             │
//! │       ▼  (cash method only)                                         │
//! │  auto-suggest rule:                                                 │
//! │    tender zero OR system-owned ──► Suggested(total)                 │
//! │    user-entered nonzero        ──► left untouched                   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  change_due = max(0, tendered − total)                              │
//! │                                                                     │
//! │  finalize() = validate ──► build payload ──► clear cart (atomic)    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Cash Tender Ownership
//! The tendered-cash field is tri-state rather than a value plus a
//! was-auto-filled boolean. `Untouched` and `Suggested` are system-owned and
//! may be overwritten by the auto-suggest rule; `Entered` is user-owned and
//! survives recomputation — even when the typed value happens to equal the
//! suggestion, and even across a toggle away from cash and back.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CheckoutError, CheckoutResult};
use crate::money::Money;
use crate::types::{CheckoutPayload, PayloadLine, PaymentMethod, TaxRate};

// =============================================================================
// Totals
// =============================================================================

/// Derived pricing totals, recomputed on every mutation and never stored
/// independently of the cart they were derived from.
///
/// Advisory/display-only: the server re-derives all figures at commit time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Totals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl Totals {
    /// Computes totals for a cart at a given tax rate.
    pub fn compute(cart: &Cart, rate: TaxRate) -> Self {
        let subtotal = cart.subtotal();
        let tax = subtotal.calculate_tax(rate);
        Totals {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

// =============================================================================
// Cash Tender
// =============================================================================

/// Tendered-cash field state: never-set, system-set, or user-set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "state", content = "amount", rename_all = "snake_case")]
pub enum CashTender {
    /// The field has never held a value this session.
    Untouched,

    /// The system filled the field with the total due.
    Suggested(Money),

    /// The operator typed the value; the system must not overwrite it.
    Entered(Money),
}

impl CashTender {
    /// The tendered amount, zero when untouched.
    pub fn amount(&self) -> Money {
        match self {
            CashTender::Untouched => Money::zero(),
            CashTender::Suggested(v) | CashTender::Entered(v) => *v,
        }
    }

    /// True when the auto-suggest rule may overwrite this value.
    pub fn is_system_owned(&self) -> bool {
        matches!(self, CashTender::Untouched | CashTender::Suggested(_))
    }
}

impl Default for CashTender {
    fn default() -> Self {
        CashTender::Untouched
    }
}

// =============================================================================
// Checkout
// =============================================================================

/// The checkout calculator.
///
/// Owns session-local payment state (method, tendered cash) and the cached
/// totals. The tax rate is injected at construction and immutable thereafter.
/// Payment state is NOT persisted: each terminal load starts from the default
/// method with an untouched tender.
#[derive(Debug, Clone)]
pub struct Checkout {
    tax_rate: TaxRate,
    method: PaymentMethod,
    tender: CashTender,
    totals: Totals,
}

impl Checkout {
    /// Creates a checkout calculator for a fresh session.
    pub fn new(tax_rate: TaxRate, default_method: PaymentMethod) -> Self {
        Checkout {
            tax_rate,
            method: default_method,
            tender: CashTender::Untouched,
            totals: Totals::default(),
        }
    }

    /// The configured tax rate.
    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// The currently selected payment method.
    pub fn payment_method(&self) -> PaymentMethod {
        self.method
    }

    /// The tendered-cash field state.
    pub fn tender(&self) -> CashTender {
        self.tender
    }

    /// The totals from the last `recompute`.
    pub fn totals(&self) -> Totals {
        self.totals
    }

    /// Recomputes totals from the cart, then applies the auto-suggest rule.
    ///
    /// Must be invoked after any cart mutation or payment-state change.
    ///
    /// ## Auto-Suggest Rule (cash method only)
    /// If the tendered amount is zero OR the tender is still system-owned,
    /// the field is (re)filled with the total due and stays system-owned.
    /// A nonzero user-entered value is left untouched.
    pub fn recompute(&mut self, cart: &Cart) {
        self.totals = Totals::compute(cart, self.tax_rate);

        if self.method.is_cash()
            && (self.tender.amount().is_zero() || self.tender.is_system_owned())
        {
            self.tender = CashTender::Suggested(self.totals.total);
        }
    }

    /// Handles the operator editing the cash-received field.
    ///
    /// Invalid or empty input parses to 0. The tender becomes user-owned
    /// unconditionally — even if the typed value equals the suggestion —
    /// so later recomputes will not overwrite it (unless it is zero, which
    /// the auto-suggest rule treats as an empty field again).
    ///
    /// Does not re-run the auto-suggest rule: that only fires on
    /// [`Checkout::recompute`], triggered by cart or payment-method changes.
    pub fn edit_cash_input(&mut self, raw: &str) {
        let amount = Money::parse_decimal(raw).unwrap_or_else(Money::zero);
        self.tender = CashTender::Entered(amount);
    }

    /// Switches the payment method.
    ///
    /// Switching to cash re-applies the auto-suggest rule via `recompute`.
    /// Switching away suppresses the change-due display but retains the
    /// stored tender, so toggling back does not lose a manually entered
    /// figure — the rule only overwrites it if it is still system-owned.
    pub fn set_payment_method(&mut self, method: PaymentMethod, cart: &Cart) {
        self.method = method;
        self.recompute(cart);
    }

    /// Change owed to the customer; exposed only for the cash method.
    pub fn change_due(&self) -> Option<Money> {
        self.method
            .is_cash()
            .then(|| self.tender.amount().change_against(self.totals.total))
    }

    /// Validates that the order may be finalized.
    ///
    /// Fails with [`CheckoutError::EmptyCart`] when the cart has no lines and
    /// [`CheckoutError::InsufficientCash`] when paying cash with less than
    /// the total due. Never panics: these are expected, user-correctable
    /// outcomes.
    pub fn validate_for_checkout(&self, cart: &Cart) -> CheckoutResult<()> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        if self.method.is_cash() && self.tender.amount() < self.totals.total {
            return Err(CheckoutError::InsufficientCash {
                tendered: self.tender.amount(),
                due: self.totals.total,
            });
        }

        Ok(())
    }

    /// Builds the finalized order payload from the current cart snapshot.
    ///
    /// Lines follow snapshot order (ascending item id — stable within the
    /// call). `cash_received` is 0 for non-cash methods.
    pub fn build_payload(&self, cart: &Cart, note: &str) -> CheckoutPayload {
        CheckoutPayload {
            lines: cart
                .lines()
                .map(|l| PayloadLine {
                    item_id: l.id,
                    qty: l.qty,
                })
                .collect(),
            payment_method: self.method,
            cash_received: if self.method.is_cash() {
                self.tender.amount().minor()
            } else {
                0
            },
            note: note.to_string(),
        }
    }

    /// Validates, emits the payload, and empties the cart — atomically.
    ///
    /// On failure the error is returned and nothing changes. On success this
    /// is the sole path that both produces a payload and clears the cart;
    /// the call is synchronous, so no intermediate state is observable.
    pub fn finalize(&mut self, cart: &mut Cart, note: &str) -> CheckoutResult<CheckoutPayload> {
        self.validate_for_checkout(cart)?;
        let payload = self.build_payload(cart, note);
        cart.clear();
        self.recompute(cart);
        Ok(payload)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn burger_fries_cart() -> Cart {
        // Burger ×2 @ 500, Fries ×1 @ 200 → subtotal 1200
        let mut cart = Cart::new();
        cart.add_item(1, "Burger", 500);
        cart.add_item(1, "Burger", 500);
        cart.add_item(2, "Fries", 200);
        cart
    }

    fn cash_checkout(rate_bps: u32) -> Checkout {
        Checkout::new(TaxRate::from_bps(rate_bps), PaymentMethod::Cash)
    }

    #[test]
    fn test_totals_burger_fries_at_ten_percent() {
        let cart = burger_fries_cart();
        let mut checkout = cash_checkout(1000);
        checkout.recompute(&cart);

        let totals = checkout.totals();
        assert_eq!(totals.subtotal.minor(), 1200);
        assert_eq!(totals.tax.minor(), 120);
        assert_eq!(totals.total.minor(), 1320);
    }

    #[test]
    fn test_auto_suggest_fills_total_and_change_is_zero() {
        let cart = burger_fries_cart();
        let mut checkout = cash_checkout(1000);
        checkout.recompute(&cart);

        assert_eq!(checkout.tender(), CashTender::Suggested(Money::from_minor(1320)));
        assert_eq!(checkout.change_due(), Some(Money::zero()));
        assert_eq!(checkout.validate_for_checkout(&cart), Ok(()));
    }

    #[test]
    fn test_suggestion_tracks_cart_while_system_owned() {
        let mut cart = burger_fries_cart();
        let mut checkout = cash_checkout(1000);
        checkout.recompute(&cart);
        assert_eq!(checkout.tender().amount().minor(), 1320);

        cart.add_item(3, "Cola", 100);
        checkout.recompute(&cart);
        assert_eq!(checkout.tender().amount().minor(), 1430);
        assert!(checkout.tender().is_system_owned());
    }

    #[test]
    fn test_edited_cash_survives_recompute() {
        let mut cart = burger_fries_cart();
        let mut checkout = cash_checkout(1000);
        checkout.recompute(&cart);

        checkout.edit_cash_input("20.00");
        cart.add_item(3, "Cola", 100);
        checkout.recompute(&cart);

        // User value untouched; change reflects the new total
        assert_eq!(checkout.tender(), CashTender::Entered(Money::from_minor(2000)));
        assert_eq!(checkout.change_due(), Some(Money::from_minor(570)));
    }

    #[test]
    fn test_editing_to_the_suggested_value_still_marks_user_owned() {
        let cart = burger_fries_cart();
        let mut checkout = cash_checkout(1000);
        checkout.recompute(&cart);

        checkout.edit_cash_input("13.20");
        assert_eq!(checkout.tender(), CashTender::Entered(Money::from_minor(1320)));
        assert!(!checkout.tender().is_system_owned());
    }

    #[test]
    fn test_entered_zero_is_resuggested_on_next_recompute() {
        let cart = burger_fries_cart();
        let mut checkout = cash_checkout(1000);
        checkout.recompute(&cart);

        // Clearing the field hands it back to the system
        checkout.edit_cash_input("");
        assert_eq!(checkout.tender(), CashTender::Entered(Money::zero()));

        checkout.recompute(&cart);
        assert_eq!(checkout.tender(), CashTender::Suggested(Money::from_minor(1320)));
    }

    #[test]
    fn test_insufficient_cash_blocks_checkout() {
        let cart = burger_fries_cart();
        let mut checkout = cash_checkout(1000);
        checkout.recompute(&cart);

        checkout.edit_cash_input("10.00");
        assert_eq!(
            checkout.validate_for_checkout(&cart),
            Err(CheckoutError::InsufficientCash {
                tendered: Money::from_minor(1000),
                due: Money::from_minor(1320),
            })
        );
    }

    #[test]
    fn test_change_due_for_overpayment() {
        let cart = burger_fries_cart();
        let mut checkout = cash_checkout(1000);
        checkout.recompute(&cart);

        checkout.edit_cash_input("15.00");
        assert_eq!(checkout.change_due(), Some(Money::from_minor(180)));
    }

    #[test]
    fn test_change_due_suppressed_for_non_cash() {
        let cart = burger_fries_cart();
        let mut checkout = cash_checkout(1000);
        checkout.recompute(&cart);

        checkout.set_payment_method(PaymentMethod::Card, &cart);
        assert_eq!(checkout.change_due(), None);
    }

    #[test]
    fn test_method_toggle_retains_entered_cash() {
        let cart = burger_fries_cart();
        let mut checkout = cash_checkout(1000);
        checkout.recompute(&cart);

        checkout.edit_cash_input("20.00");
        checkout.set_payment_method(PaymentMethod::Card, &cart);
        checkout.set_payment_method(PaymentMethod::Cash, &cart);

        assert_eq!(checkout.tender(), CashTender::Entered(Money::from_minor(2000)));
    }

    #[test]
    fn test_switching_to_cash_applies_suggestion_when_untouched() {
        let cart = burger_fries_cart();
        let mut checkout = Checkout::new(TaxRate::from_bps(1000), PaymentMethod::Card);
        checkout.recompute(&cart);
        assert_eq!(checkout.tender(), CashTender::Untouched);

        checkout.set_payment_method(PaymentMethod::Cash, &cart);
        assert_eq!(checkout.tender(), CashTender::Suggested(Money::from_minor(1320)));
    }

    #[test]
    fn test_non_cash_validation_ignores_tender() {
        let cart = burger_fries_cart();
        let mut checkout = Checkout::new(TaxRate::from_bps(1000), PaymentMethod::Card);
        checkout.recompute(&cart);

        assert_eq!(checkout.validate_for_checkout(&cart), Ok(()));
    }

    #[test]
    fn test_finalize_on_empty_cart_fails_without_side_effects() {
        let mut cart = Cart::new();
        let mut checkout = cash_checkout(1000);
        checkout.recompute(&cart);

        assert_eq!(
            checkout.finalize(&mut cart, ""),
            Err(CheckoutError::EmptyCart)
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_finalize_builds_payload_and_clears_cart() {
        let mut cart = burger_fries_cart();
        let mut checkout = cash_checkout(1000);
        checkout.recompute(&cart);

        let payload = checkout.finalize(&mut cart, "no onions").unwrap();

        assert_eq!(
            payload.lines,
            vec![
                PayloadLine { item_id: 1, qty: 2 },
                PayloadLine { item_id: 2, qty: 1 },
            ]
        );
        assert_eq!(payload.payment_method, PaymentMethod::Cash);
        assert_eq!(payload.cash_received, 1320);
        assert_eq!(payload.note, "no onions");

        assert!(cart.is_empty());
        assert!(cart.snapshot().is_empty());
        assert_eq!(checkout.totals().total, Money::zero());
    }

    #[test]
    fn test_payload_cash_received_is_zero_for_non_cash() {
        let cart = burger_fries_cart();
        let mut checkout = cash_checkout(1000);
        checkout.recompute(&cart);

        checkout.edit_cash_input("50.00");
        checkout.set_payment_method(PaymentMethod::Other, &cart);

        let payload = checkout.build_payload(&cart, "");
        assert_eq!(payload.payment_method, PaymentMethod::Other);
        assert_eq!(payload.cash_received, 0);
    }

    #[test]
    fn test_half_up_tax_scenario() {
        // subtotal 150 at 2.5% → raw 3.75 → tax 4, total 154
        let mut cart = Cart::new();
        cart.add_item(1, "Toffee", 150);
        let mut checkout = cash_checkout(250);
        checkout.recompute(&cart);

        assert_eq!(checkout.totals().tax.minor(), 4);
        assert_eq!(checkout.totals().total.minor(), 154);
    }
}
