#![allow(unused)]
//! Memoized view harness.
//!
//! # What this covers
//!
//! - A view is recomputed only when the records or the query change; equal
//!   inputs (same allocation or equal contents) return the cached result.
//! - Cached results are always identical to a fresh `evaluate`.
//! - Replacing the collection (as a store snapshot does) invalidates the
//!   cache even when the query is unchanged.
//!
//! # What this does NOT cover
//!
//! - Query semantics themselves (see query_harness)
//!
//! # Running
//!
//! ```sh
//! cargo test --test memo_harness
//! ```

mod common;

use admin_core::{evaluate, EntityKind, MemoizedView, Query, QueryEngine, Record};
use common::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn view() -> MemoizedView {
    MemoizedView::new(QueryEngine::for_kind(EntityKind::Brokers))
}

#[test]
fn same_inputs_hit_the_cache() {
    let mut memo = view();
    let records: Arc<[Record]> = brokers().into();
    let q = Query::new().filter("status", "Active");

    let first = memo.view(&records, &q);
    let second = memo.view(&records, &q);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!((memo.misses(), memo.hits()), (1, 1));
}

#[test]
fn equal_but_distinct_collections_still_hit() {
    let mut memo = view();
    let a: Arc<[Record]> = brokers().into();
    let b: Arc<[Record]> = brokers().into();
    memo.view(&a, &Query::new());
    memo.view(&b, &Query::new());
    assert_eq!(memo.hits(), 1);
}

#[test]
fn changed_query_recomputes() {
    let mut memo = view();
    let records: Arc<[Record]> = brokers().into();
    memo.view(&records, &Query::new().search("rohit"));
    let out = memo.view(&records, &Query::new().search("kavita"));
    assert_names!(out, ["Kavita Desai"]);
    assert_eq!(memo.misses(), 2);
}

#[test]
fn replaced_records_recompute() {
    let mut memo = view();
    let q = Query::new().sort("most-deals");
    let before: Arc<[Record]> = brokers().into();
    memo.view(&before, &q);

    let mut changed = brokers();
    changed.push(
        RecordBuilder::new(6)
            .field("name", "Meera Iyer")
            .field("status", "Active")
            .field("successfulDeals", 40)
            .build(),
    );
    let after: Arc<[Record]> = changed.into();
    let out = memo.view(&after, &q);
    assert_eq!(names(&out)[0], "Meera Iyer");
    assert_eq!(memo.misses(), 2);
}

#[test]
fn cached_result_matches_fresh_evaluation() {
    let mut memo = view();
    let records: Arc<[Record]> = brokers().into();
    let queries = [
        Query::new(),
        Query::new().search("a").sort("most-clients"),
        Query::new().filter("performance", "Excellent"),
        Query::new().search("a").sort("most-clients"),
    ];
    for q in &queries {
        let cached = memo.view(&records, q);
        assert_eq!(cached.to_vec(), evaluate(EntityKind::Brokers, &records, q));
    }
}

#[test]
fn invalidate_forces_recompute() {
    let mut memo = view();
    let records: Arc<[Record]> = brokers().into();
    memo.view(&records, &Query::new());
    memo.invalidate();
    memo.view(&records, &Query::new());
    assert_eq!((memo.misses(), memo.hits()), (2, 0));
}
