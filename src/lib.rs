//! legacy-admin — record search, filtering and sorting for the real-estate
//! admin screens (users, brokers, suppliers, properties).
//!
//! # Architecture
//!
//! ```text
//! payload file ─┐
//!               ├──► RecordSource ──► QueryEngine / MemoizedView ──► console
//! LocalStore ───┘         ▲
//!      └── watcher ───────┘  (fresh snapshots)
//! ```
//!
//! The engine is pure and synchronous. Only the store watcher runs on tokio
//! tasks; the console polls its feed between frames.

pub use admin_core as core;
pub use admin_store as store;
pub use admin_tui as tui;

pub use admin_core::{evaluate, EntityKind, Query, QueryEngine, Record};
pub use admin_store::{FileSource, LocalStore, RecordSource, StoreSource};
