//! admin-store — record sources for legacy-admin.
//!
//! The screens read their collections either from the local store (a
//! directory of JSON documents standing in for browser local storage) or from
//! a payload exported by the admin backend. Both implement [`RecordSource`] so
//! callers do not care where a collection came from. The [`watch`] module
//! turns store changes into a stream of fresh snapshots.

pub mod error;
pub mod local;
pub mod payload;
pub mod watch;

pub use error::StoreError;
pub use local::{key_for, LocalStore};
pub use payload::{parse_payload, read_payload};
pub use watch::{watch_all, StoreUpdate, WatchHandle};

use admin_core::{EntityKind, Record};
use std::path::PathBuf;

/// Trait implemented by each place a record collection can be loaded from.
pub trait RecordSource: Send + Sync {
    /// The collection this source provides.
    fn kind(&self) -> EntityKind;

    /// Load the full collection, in its stored order.
    fn load(&self) -> Result<Vec<Record>, StoreError>;
}

/// One entity collection inside a [`LocalStore`].
#[derive(Debug, Clone)]
pub struct StoreSource {
    store: LocalStore,
    kind: EntityKind,
}

impl StoreSource {
    pub fn new(store: LocalStore, kind: EntityKind) -> Self {
        Self { store, kind }
    }
}

impl RecordSource for StoreSource {
    fn kind(&self) -> EntityKind {
        self.kind
    }

    fn load(&self) -> Result<Vec<Record>, StoreError> {
        self.store.load_records(self.kind)
    }
}

/// A backend payload file (see [`payload`] for the accepted shapes).
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    kind: EntityKind,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>, kind: EntityKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

impl RecordSource for FileSource {
    fn kind(&self) -> EntityKind {
        self.kind
    }

    fn load(&self) -> Result<Vec<Record>, StoreError> {
        read_payload(&self.path, self.kind)
    }
}
