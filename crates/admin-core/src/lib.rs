//! admin-core — Legacy Admin core library.
//!
//! Every management screen (users, brokers, suppliers, properties) shows a
//! searchable, filterable, sortable list. This crate holds the one query
//! engine behind all of them, configured per entity by a declarative
//! [`EntityDescriptor`], plus the shared record types.
//!
//! # Architecture
//!
//! ```text
//! Store ──► Vec<Record> ──► QueryEngine::evaluate(records, query) ──► UI
//!                                 ▲
//!               EntityDescriptor ─┘   MemoizedView caches the last result
//! ```
//!
//! The engine is synchronous, allocation-only and side-effect free.

pub mod aggregate;
pub mod config;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod memo;
pub mod query;
pub mod types;
pub mod validate;

pub use aggregate::{count_where, distinct_values};
pub use descriptor::{EntityDescriptor, FilterOptions, FilterSpec, SortKind, SortStrategy};
pub use engine::{evaluate, QueryEngine};
pub use error::CoreError;
pub use memo::MemoizedView;
pub use query::{FilterValue, Query, SortKey};
pub use types::{EntityKind, Record};
