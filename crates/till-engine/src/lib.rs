//! # till-engine: Storage + Session Layer for Till
//!
//! Everything the pure core is forbidden to do: durable cart persistence,
//! terminal preferences, configuration, logging setup, and the
//! [`OrderSession`] facade the terminal UI talks to.
//!
//! ## Module Organization
//! ```text
//! till_engine/
//! ├── lib.rs         ◄─── You are here (exports, tracing setup)
//! ├── storage.rs     ◄─── Key-value substrate (FileStore, MemoryStore)
//! ├── cart_store.rs  ◄─── Write-through persistent cart
//! ├── session.rs     ◄─── OrderSession: cart + checkout wiring
//! ├── prefs.rs       ◄─── Last category / last order ref
//! ├── config.rs      ◄─── EngineConfig (env vars over defaults)
//! └── error.rs       ◄─── StorageError
//! ```
//!
//! ## Execution Model
//! Single-threaded, event-driven, cooperative: every operation is
//! synchronous and runs to completion before the next event. No operation
//! blocks, suspends, or is cancellable. The durable store is the only
//! resource shared across processes; last-writer-wins, by policy.
//!
//! ## Example
//! ```rust,no_run
//! use till_engine::config::EngineConfig;
//! use till_engine::session::OrderSession;
//! use till_engine::storage::FileStore;
//!
//! till_engine::init_tracing();
//!
//! let config = EngineConfig::from_env();
//! let storage = FileStore::open(&config.data_dir).expect("data dir");
//! let mut session = OrderSession::open(&config, Box::new(storage));
//!
//! session.add_item(1, "Burger", 500);
//! println!("{}", config.format_currency(session.totals().total));
//! ```

pub mod cart_store;
pub mod config;
pub mod error;
pub mod prefs;
pub mod session;
pub mod storage;

pub use cart_store::{CartStore, CART_KEY};
pub use config::EngineConfig;
pub use error::{StorageError, StorageResult};
pub use prefs::{TerminalPrefs, LAST_CATEGORY_KEY, LAST_ORDER_REF_KEY};
pub use session::OrderSession;
pub use storage::{FileStore, MemoryStore, StorageBackend};

use tracing_subscriber::EnvFilter;

/// Initializes structured logging for the terminal process.
///
/// Honors `RUST_LOG`; defaults to `info`. Call once at startup, before the
/// session opens, so restore-time warnings are not lost.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
