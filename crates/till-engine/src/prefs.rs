//! # Terminal Preferences
//!
//! Small UI-affinity values sharing the cart's storage substrate: the last
//! selected catalog tab (restored on load so the cashier lands where they
//! left off) and the last completed order reference (written by the external
//! order-confirmation flow, read by the reprint affordance).
//!
//! Both are best-effort: a failed read means "no preference", a failed
//! write is logged and forgotten.

use tracing::warn;

use crate::storage::StorageBackend;

/// Durable key for the last selected catalog category tab.
pub const LAST_CATEGORY_KEY: &str = "till.last_category";

/// Durable key for the last completed order's reference number.
pub const LAST_ORDER_REF_KEY: &str = "till.last_order_ref";

/// Preference accessors over a storage backend.
pub struct TerminalPrefs {
    storage: Box<dyn StorageBackend>,
}

impl TerminalPrefs {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        TerminalPrefs { storage }
    }

    /// Last selected catalog tab, if any.
    pub fn last_category(&self) -> Option<String> {
        self.read(LAST_CATEGORY_KEY)
    }

    /// Remembers the selected catalog tab.
    pub fn set_last_category(&self, category: &str) {
        self.write(LAST_CATEGORY_KEY, category);
    }

    /// Reference of the last completed order, for reprint.
    pub fn last_order_ref(&self) -> Option<String> {
        self.read(LAST_ORDER_REF_KEY)
    }

    /// Records a completed order's reference (called by the confirmation
    /// flow after the server accepts the order).
    pub fn set_last_order_ref(&self, reference: &str) {
        self.write(LAST_ORDER_REF_KEY, reference);
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.read(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "preference read failed");
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.write(key, value) {
            warn!(key, error = %e, "preference write failed");
        }
    }
}
