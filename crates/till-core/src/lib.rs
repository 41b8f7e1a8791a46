//! # till-core: Pure Business Logic for Till
//!
//! This crate is the **heart** of the Till order-entry engine. It contains
//! the cart state machine and checkout computation pipeline as pure code
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Till Architecture                             │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                 Terminal UI (web view)                        │  │
//! │  │   Item buttons ──► Cart panel ──► Tender ──► Checkout         │  │
//! │  └──────────────────────────────┬────────────────────────────────┘  │
//! │                                 │ thin adapters                     │
//! │  ┌──────────────────────────────▼────────────────────────────────┐  │
//! │  │                till-engine (OrderSession)                     │  │
//! │  │     durable cart storage • session wiring • tracing           │  │
//! │  └──────────────────────────────┬────────────────────────────────┘  │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐  │
//! │  │              ★ till-core (THIS CRATE) ★                       │  │
//! │  │                                                               │  │
//! │  │  ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌────────┐  │  │
//! │  │  │  money  │ │  cart   │ │ checkout │ │ catalog │ │ error  │  │  │
//! │  │  │  Money  │ │  Cart   │ │ Checkout │ │ Catalog │ │ typed  │  │  │
//! │  │  │ TaxCalc │ │CartLine │ │  Totals  │ │ filter  │ │ errors │  │  │
//! │  │  └─────────┘ └─────────┘ └──────────┘ └─────────┘ └────────┘  │  │
//! │  │                                                               │  │
//! │  │  NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Domain types (TaxRate, PaymentMethod, CheckoutPayload, ...)
//! - [`cart`] - The cart state machine
//! - [`checkout`] - Totals, cash tender, validation, payload construction
//! - [`catalog`] - Read-only menu projection (tabs, search)
//! - [`error`] - Typed checkout errors
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: deterministic - same input = same output
//! 2. **No I/O**: storage, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are minor units (i64)
//! 4. **Explicit Errors**: expected failures are typed results, never panics
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::cart::Cart;
//! use till_core::checkout::Checkout;
//! use till_core::types::{PaymentMethod, TaxRate};
//!
//! let mut cart = Cart::new();
//! cart.add_item(1, "Burger", 500);
//! cart.add_item(1, "Burger", 500);
//! cart.add_item(2, "Fries", 200);
//!
//! let mut checkout = Checkout::new(TaxRate::from_bps(1000), PaymentMethod::Cash);
//! checkout.recompute(&cart);
//!
//! // 1200 subtotal + 120 tax; cash auto-suggests the total due
//! assert_eq!(checkout.totals().total.minor(), 1320);
//! let payload = checkout.finalize(&mut cart, "").unwrap();
//! assert_eq!(payload.cash_received, 1320);
//! assert!(cart.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use till_core::Money` instead of
// `use till_core::money::Money`

pub use cart::{parse_quantity_input, Cart, CartLine};
pub use catalog::Catalog;
pub use checkout::{CashTender, Checkout, Totals};
pub use error::{CheckoutError, CheckoutResult};
pub use money::Money;
pub use types::{CatalogItem, CheckoutPayload, ItemId, PayloadLine, PaymentMethod, TaxRate};
