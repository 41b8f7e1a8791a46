//! # Storage Error Types
//!
//! Failures from the durable key-value substrate.
//!
//! Note what is deliberately NOT here: an unreadable or malformed persisted
//! cart is not an error the caller ever sees. The cart store logs it and
//! falls back to an empty cart, indistinguishable from a first run.

use thiserror::Error;

/// Durable storage failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying file operation failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing a value for storage failed.
    #[error("storage serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Convenience alias for storage results.
pub type StorageResult<T> = Result<T, StorageError>;
