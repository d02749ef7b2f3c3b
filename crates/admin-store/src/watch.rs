//! Change watcher — pushes fresh record snapshots when a collection changes
//! on disk, e.g. because another console instance saved it.
//!
//! Two triggers feed the same check: filesystem events from `notify`, and a
//! fixed polling interval that catches anything the event backend misses
//! (network filesystems, editors that replace files in unusual ways). Either
//! way the stored text is compared with the last text seen and a snapshot is
//! only emitted when it differs, so identical rewrites are never re-sent.

use crate::error::StoreError;
use crate::local::{key_for, records_from_array, LocalStore};
use admin_core::{EntityKind, Record};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// A new snapshot of one entity collection.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreUpdate {
    pub kind: EntityKind,
    pub records: Vec<Record>,
}

/// Keeps a watcher alive. Dropping it stops the polling task and the
/// filesystem subscription.
pub struct WatchHandle {
    _watcher: Option<RecommendedWatcher>,
    task: JoinHandle<()>,
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Watch one collection, sending each changed snapshot to `tx`.
///
/// The collection's current content is the baseline; nothing is sent until it
/// changes. A deleted collection is reported as an empty snapshot. Must be
/// called from within a tokio runtime.
pub fn watch(
    store: LocalStore,
    kind: EntityKind,
    interval: Duration,
    tx: mpsc::UnboundedSender<StoreUpdate>,
) -> Result<WatchHandle, StoreError> {
    let key = key_for(kind);
    let path = store.path_for(&key)?;
    let mut last = store.get_raw(&key)?;

    let (poke_tx, mut poke_rx) = mpsc::unbounded_channel::<()>();
    let watcher = match fs_watcher(store.dir(), path, poke_tx) {
        Ok(w) => Some(w),
        Err(e) => {
            tracing::warn!(error = %e, %kind, "watch: filesystem events unavailable, polling only");
            None
        }
    };

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the baseline is already read.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                Some(()) = poke_rx.recv() => {}
            }

            match poll_once(&store, &key, &mut last) {
                Ok(Some(records)) => {
                    tracing::debug!(%kind, count = records.len(), "watch: collection changed");
                    if tx.send(StoreUpdate { kind, records }).is_err() {
                        tracing::debug!(%kind, "watch: receiver dropped, stopping");
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, %kind, "watch: unreadable snapshot skipped"),
            }
        }
    });

    Ok(WatchHandle {
        _watcher: watcher,
        task,
    })
}

/// Watch every collection in `kinds`, fanning snapshots into one channel.
pub fn watch_all(
    store: &LocalStore,
    kinds: &[EntityKind],
    interval: Duration,
) -> Result<(mpsc::UnboundedReceiver<StoreUpdate>, Vec<WatchHandle>), StoreError> {
    let (tx, rx) = mpsc::unbounded_channel();
    let handles = kinds
        .iter()
        .map(|&kind| watch(store.clone(), kind, interval, tx.clone()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((rx, handles))
}

/// Re-read `key` and return a snapshot if its text differs from `last`.
///
/// `last` is advanced even when the new text fails to parse, so a corrupt
/// document is reported once rather than on every tick.
fn poll_once(
    store: &LocalStore,
    key: &str,
    last: &mut Option<String>,
) -> Result<Option<Vec<Record>>, StoreError> {
    let current = store.get_raw(key)?;
    if !advance(last, current) {
        return Ok(None);
    }
    match last.as_deref() {
        None => Ok(Some(Vec::new())),
        Some(text) => {
            let value = serde_json::from_str(text)
                .map_err(|e| StoreError::json(store.path_for(key).unwrap_or_default(), e))?;
            records_from_array(value, key).map(Some)
        }
    }
}

/// Replace `last` with `current`, returning whether they differed.
fn advance(last: &mut Option<String>, current: Option<String>) -> bool {
    if *last == current {
        return false;
    }
    *last = current;
    true
}

fn fs_watcher(
    dir: &Path,
    file: PathBuf,
    poke: mpsc::UnboundedSender<()>,
) -> notify::Result<RecommendedWatcher> {
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            if event.paths.iter().any(|p| p.file_name() == file.file_name()) {
                let _ = poke.send(());
            }
        }
    })?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn advance_detects_changes_only() {
        let mut last = Some("[]".to_string());
        assert!(!advance(&mut last, Some("[]".to_string())));
        assert!(advance(&mut last, Some("[{}]".to_string())));
        assert_eq!(last.as_deref(), Some("[{}]"));
        assert!(advance(&mut last, None));
        assert!(!advance(&mut last, None));
    }

    #[test]
    fn poll_once_reports_deletion_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        let key = key_for(EntityKind::Brokers);
        store.set(&key, &json!([{"id": 1}])).unwrap();
        let mut last = store.get_raw(&key).unwrap();

        assert_eq!(poll_once(&store, &key, &mut last).unwrap(), None);
        store.remove(&key).unwrap();
        assert_eq!(poll_once(&store, &key, &mut last).unwrap(), Some(Vec::new()));
    }

    #[test]
    fn corrupt_snapshot_is_reported_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        let key = key_for(EntityKind::Users);
        let mut last = None;
        std::fs::write(store.path_for(&key).unwrap(), "{oops").unwrap();
        assert!(poll_once(&store, &key, &mut last).is_err());
        assert_eq!(poll_once(&store, &key, &mut last).unwrap(), None);
    }
}
