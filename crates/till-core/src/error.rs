//! # Error Types
//!
//! Domain error types for till-core.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Errors are enum variants with context, never bare strings
//! 3. Expected validation failures are returned, never panicked
//!
//! Two failure modes deliberately never appear here:
//! a corrupt persisted cart is silently treated as empty by the engine, and
//! malformed quantity input is normalized to 0 by
//! [`crate::cart::parse_quantity_input`].

use thiserror::Error;

use crate::money::Money;

/// Checkout validation failures.
///
/// Both variants are recoverable and user-correctable; the UI layer displays
/// them and blocks submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Checkout attempted with no lines in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Cash tendered is below the total due.
    ///
    /// The caller should prompt for more cash or a different method.
    #[error("insufficient cash: tendered {tendered}, due {due}")]
    InsufficientCash { tendered: Money, due: Money },
}

/// Convenience alias for checkout results.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CheckoutError::EmptyCart.to_string(), "cart is empty");

        let err = CheckoutError::InsufficientCash {
            tendered: Money::from_minor(1000),
            due: Money::from_minor(1320),
        };
        assert_eq!(
            err.to_string(),
            "insufficient cash: tendered 10.00, due 13.20"
        );
    }
}
