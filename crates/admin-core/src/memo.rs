//! Memoized derived view over a record collection.
//!
//! Screens re-render on every keystroke, but most renders change neither the
//! records nor the query. [`MemoizedView`] keeps the last `(records, query)`
//! pair and its result and only re-runs the engine when either input differs.

use crate::engine::QueryEngine;
use crate::query::Query;
use crate::types::Record;
use std::sync::Arc;

#[derive(Debug)]
struct Cached {
    records: Arc<[Record]>,
    query: Query,
    result: Arc<[Record]>,
}

#[derive(Debug)]
pub struct MemoizedView {
    engine: QueryEngine,
    cached: Option<Cached>,
    hits: u64,
    misses: u64,
}

impl MemoizedView {
    pub fn new(engine: QueryEngine) -> Self {
        Self {
            engine,
            cached: None,
            hits: 0,
            misses: 0,
        }
    }

    pub fn engine(&self) -> &QueryEngine {
        &self.engine
    }

    /// The evaluated view of `records` under `query`.
    ///
    /// Records are considered unchanged when they are the same allocation or
    /// compare equal; the query must compare equal.
    pub fn view(&mut self, records: &Arc<[Record]>, query: &Query) -> Arc<[Record]> {
        if let Some(cached) = &self.cached {
            let same_records =
                Arc::ptr_eq(&cached.records, records) || cached.records[..] == records[..];
            if same_records && cached.query == *query {
                self.hits += 1;
                tracing::trace!(hits = self.hits, "memo: hit");
                return Arc::clone(&cached.result);
            }
        }

        self.misses += 1;
        let result: Arc<[Record]> = self.engine.evaluate(records, query).into();
        tracing::trace!(
            misses = self.misses,
            total = records.len(),
            shown = result.len(),
            "memo: recomputed"
        );
        self.cached = Some(Cached {
            records: Arc::clone(records),
            query: query.clone(),
            result: Arc::clone(&result),
        });
        result
    }

    /// Drop the cached result so the next [`view`](Self::view) recomputes.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
