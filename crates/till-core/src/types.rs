//! # Domain Types
//!
//! Core domain types used throughout Till.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌────────────────┐  ┌────────────────┐  ┌───────────────────────┐  │
//! │  │  CatalogItem   │  │    TaxRate     │  │    PaymentMethod      │  │
//! │  │  ────────────  │  │  ────────────  │  │  ──────────────────   │  │
//! │  │  id (ItemId)   │  │  bps (u32)     │  │  Cash                 │  │
//! │  │  name          │  │  825 = 8.25%   │  │  Card                 │  │
//! │  │  price (minor) │  └────────────────┘  │  Other                │  │
//! │  │  category      │                      └───────────────────────┘  │
//! │  └────────────────┘                                                 │
//! │                                                                     │
//! │  ┌──────────────────────────────────────────────────────────────┐   │
//! │  │  CheckoutPayload - the finalized order handed to the server  │   │
//! │  │  lines: [{item_id, qty}]  (no prices! server re-prices)      │   │
//! │  │  payment_method, cash_received, note                         │   │
//! │  └──────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Item Identity
// =============================================================================

/// Opaque positive integer identifying a distinct menu item.
///
/// Assigned by the catalog collaborator; the core never interprets it.
pub type ItemId = u64;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 250 bps = 2.5%; integer storage keeps tax math float-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (configuration convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer pays.
///
/// Only [`PaymentMethod::Cash`] drives the tendered-cash sub-flow (suggested
/// cash, change due). Card and Other settle externally and need no change
/// computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on an external terminal.
    Card,
    /// Any other non-cash settlement (digital wallet, voucher).
    Other,
}

impl PaymentMethod {
    /// True exactly when the tendered-cash sub-flow applies.
    #[inline]
    pub const fn is_cash(&self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }

    /// Wire string used in the order-submission contract.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Other => "other",
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "other" => Ok(PaymentMethod::Other),
            _ => Err(()),
        }
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// An orderable item as provided by the catalog collaborator.
///
/// The core treats these as opaque add-item arguments and does not validate
/// them against any catalog of record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogItem {
    /// Catalog-assigned identifier.
    pub id: ItemId,

    /// Display name shown on the item button and captured into cart lines.
    pub name: String,

    /// Unit price in minor units.
    pub unit_price_minor: i64,

    /// Category tab this item appears under.
    pub category: String,
}

// =============================================================================
// Checkout Payload
// =============================================================================

/// One ordered line in the finalized payload.
///
/// Name and price are intentionally omitted: the server is the source of
/// truth for pricing at commit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PayloadLine {
    pub item_id: ItemId,
    pub qty: i64,
}

/// The finalized order handed to the order-submission collaborator.
///
/// Ephemeral: constructed only at finalization, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutPayload {
    /// Ordered `{item_id, qty}` pairs, in cart snapshot order.
    pub lines: Vec<PayloadLine>,

    /// Wire enum: `cash` / `card` / `other`.
    pub payment_method: PaymentMethod,

    /// Tendered cash in minor units; 0 for non-cash methods.
    pub cash_received: i64,

    /// Free-text note, empty string by default.
    pub note: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(825);
        assert_eq!(rate.bps(), 825);
        assert!((rate.percentage() - 8.25).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        assert_eq!(TaxRate::from_percentage(8.25).bps(), 825);
        assert_eq!(TaxRate::from_percentage(2.5).bps(), 250);
    }

    #[test]
    fn test_payment_method_wire_strings() {
        assert_eq!(PaymentMethod::Cash.as_str(), "cash");
        assert_eq!(PaymentMethod::Card.as_str(), "card");
        assert_eq!(PaymentMethod::Other.as_str(), "other");
        assert_eq!("card".parse::<PaymentMethod>(), Ok(PaymentMethod::Card));
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_payment_method_is_cash() {
        assert!(PaymentMethod::Cash.is_cash());
        assert!(!PaymentMethod::Card.is_cash());
        assert!(!PaymentMethod::Other.is_cash());
    }

    #[test]
    fn test_payload_serializes_to_wire_contract() {
        let payload = CheckoutPayload {
            lines: vec![PayloadLine { item_id: 7, qty: 2 }],
            payment_method: PaymentMethod::Cash,
            cash_received: 1320,
            note: String::new(),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["lines"][0]["item_id"], 7);
        assert_eq!(json["lines"][0]["qty"], 2);
        assert_eq!(json["payment_method"], "cash");
        assert_eq!(json["cash_received"], 1320);
        assert_eq!(json["note"], "");
    }
}
