//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In JavaScript/floating point:                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                        │
//! │                                                                     │
//! │  OUR SOLUTION: Integer Minor Units                                  │
//! │    Every amount is an i64 count of the smallest currency unit       │
//! │    (cents, paisa). Decimal strings exist only at the two human      │
//! │    boundaries: parsing operator input and formatting for display.  │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::money::Money;
//!
//! // Create from minor units (preferred)
//! let price = Money::from_minor(1099); // 10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;
//! let total = price + Money::from_minor(500);
//!
//! // Operator input comes in as a decimal string
//! assert_eq!(Money::parse_decimal("10.99"), Some(price));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (minor units).
///
/// ## Design Decisions
/// - **i64 (signed)**: change-due math can momentarily go below zero
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for the persisted cart and payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let price = Money::from_minor(1099); // 10.99
    /// assert_eq!(price.minor(), 1099);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (e.g. rupees, dollars).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99, absolute).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Calculates tax using round-half-up.
    ///
    /// ## Rounding Policy
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────┐
    /// │  ROUND HALF UP (commercial rounding)                            │
    /// │                                                                 │
    /// │  tax = floor(subtotal × rate + 0.5) for non-negative amounts    │
    /// │                                                                 │
    /// │  150 minor units at 2.5%  → raw 3.75 → tax 4                    │
    /// │  1000 minor units at 8.25% → raw 82.5 → tax 83                  │
    /// │                                                                 │
    /// │  Bankers' rounding (half to even) is NOT used: the server       │
    /// │  re-derives tax at commit time with the same policy, and the    │
    /// │  two must agree on the displayed figure.                        │
    /// └─────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Implementation
    /// Integer math: `(minor × bps + 5000) / 10000`. The +5000 provides the
    /// half-up rounding (5000/10000 = 0.5). i128 intermediate prevents
    /// overflow on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    /// use till_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_minor(150);
    /// let rate = TaxRate::from_bps(250); // 2.5%
    /// assert_eq!(subtotal.calculate_tax(rate).minor(), 4);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax_minor = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_minor(tax_minor as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let unit_price = Money::from_minor(500);
    /// assert_eq!(unit_price.multiply_quantity(3).minor(), 1500);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Amount owed back when this value was tendered against `due`.
    ///
    /// Never negative: tendering less than the total due yields zero change
    /// (and is rejected separately by checkout validation).
    #[inline]
    pub fn change_against(&self, due: Money) -> Money {
        if self.0 > due.0 {
            Money(self.0 - due.0)
        } else {
            Money::zero()
        }
    }

    /// Parses a decimal string (operator input) into minor units.
    ///
    /// Accepts `"10"`, `"10.5"`, `"10.99"`, surrounding whitespace, and an
    /// optional sign. A third fractional digit rounds half-up; anything
    /// beyond it is ignored. Returns `None` for empty or malformed input so
    /// the caller decides the fallback (the checkout boundary maps it to 0).
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("10.00"), Some(Money::from_minor(1000)));
    /// assert_eq!(Money::parse_decimal("10.5"), Some(Money::from_minor(1050)));
    /// assert_eq!(Money::parse_decimal("abc"), None);
    /// ```
    pub fn parse_decimal(raw: &str) -> Option<Money> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }

        let (negative, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };

        // ".5" and "5." are fine; a bare "." or "" is not.
        if whole.is_empty() && frac.is_empty() {
            return None;
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().ok()?
        };

        let mut frac_digits = frac.bytes().map(|b| (b - b'0') as i64);
        let tens = frac_digits.next().unwrap_or(0);
        let ones = frac_digits.next().unwrap_or(0);

        let mut minor = whole.checked_mul(100)?.checked_add(tens * 10 + ones)?;
        // Round half-up on the third fractional digit.
        if frac_digits.next().is_some_and(|d| d >= 5) {
            minor = minor.checked_add(1)?;
        }

        Some(if negative { Money(-minor) } else { Money(minor) })
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the plain decimal form (`"12.34"`).
///
/// Currency symbols are a configuration concern; the engine's config layer
/// prepends them for actual UI display.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
