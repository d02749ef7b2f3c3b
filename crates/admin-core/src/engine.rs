//! Query engine — filters and orders a record collection for display.
//!
//! [`QueryEngine::evaluate`] is a pure function of `(records, query)`: a
//! linear scan that keeps records matching the search term and every active
//! field filter, followed by an optional stable descending sort. It never
//! mutates its inputs and never fails; absent or malformed data is treated as
//! "does not match" for filtering and as a fallback key for sorting.

use crate::descriptor::{EntityDescriptor, SortKind, SortStrategy};
use crate::query::{Query, SortKey};
use crate::types::{scalar_text, EntityKind, Record};
use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use std::cmp::Ordering;

/// Date layouts accepted for date sort fields, tried in order. The first is
/// what the screens write when a record is created (`Jan 10, 2024`).
const DATE_FORMATS: &[&str] = &["%b %d, %Y", "%B %d, %Y", "%Y-%m-%d", "%d %b %Y", "%m/%d/%Y"];

/// A descriptor-configured evaluator for one entity type.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    descriptor: EntityDescriptor,
}

impl QueryEngine {
    pub fn new(descriptor: EntityDescriptor) -> Self {
        Self { descriptor }
    }

    pub fn for_kind(kind: EntityKind) -> Self {
        Self::new(EntityDescriptor::for_kind(kind))
    }

    pub fn descriptor(&self) -> &EntityDescriptor {
        &self.descriptor
    }

    /// Return the records matching `query`, in query order.
    ///
    /// Filtering preserves the input's relative order. When the query names a
    /// sort strategy the survivors are then stably sorted descending by that
    /// strategy's field; a name the descriptor does not know leaves the
    /// filtered order untouched.
    pub fn evaluate(&self, records: &[Record], query: &Query) -> Vec<Record> {
        let term = query.normalized_search();
        let filters: Vec<(&str, &str)> = query.active_filters().collect();

        let matched = records
            .iter()
            .filter(|r| self.matches_search(r, term.as_deref()))
            .filter(|r| filters.iter().all(|(f, v)| matches_filter(r, f, v)));

        let strategy = match &query.sort {
            SortKey::Unsorted => None,
            SortKey::Strategy(name) => self.descriptor.sort_strategy(name),
        };

        let Some(strategy) = strategy else {
            return matched.cloned().collect();
        };

        let mut keyed: Vec<(SortValue, &Record)> =
            matched.map(|r| (sort_value(r, strategy), r)).collect();
        // `sort_by` is stable, so equal keys keep their filtered order.
        keyed.sort_by(|a, b| b.0.cmp(&a.0));
        keyed.into_iter().map(|(_, r)| r.clone()).collect()
    }

    /// Whether a single record passes the query's search term and filters.
    /// Sorting is not considered.
    pub fn matches(&self, record: &Record, query: &Query) -> bool {
        let term = query.normalized_search();
        self.matches_search(record, term.as_deref())
            && query
                .active_filters()
                .all(|(field, value)| matches_filter(record, field, value))
    }

    fn matches_search(&self, record: &Record, term: Option<&str>) -> bool {
        let Some(term) = term else {
            return true;
        };
        self.descriptor.searchable.iter().any(|path| {
            record
                .resolve(path)
                .into_iter()
                .filter_map(scalar_text)
                .any(|text| text.to_lowercase().contains(term))
        })
    }
}

/// Evaluate `query` against `records` with the built-in descriptor for `kind`.
pub fn evaluate(kind: EntityKind, records: &[Record], query: &Query) -> Vec<Record> {
    QueryEngine::for_kind(kind).evaluate(records, query)
}

/// Exact, case-sensitive comparison of a field against a filter value.
/// Controlled-vocabulary fields are compared verbatim; a missing field never
/// matches.
fn matches_filter(record: &Record, field: &str, expected: &str) -> bool {
    record
        .resolve(field)
        .into_iter()
        .filter_map(scalar_text)
        .any(|actual| actual == expected)
}

/// A sort key. Integers compare exactly among themselves; anything involving
/// a float compares as `f64`.
#[derive(Debug, Clone, Copy)]
enum SortValue {
    Int(i128),
    Float(f64),
}

impl SortValue {
    fn as_f64(self) -> f64 {
        match self {
            SortValue::Int(n) => n as f64,
            SortValue::Float(f) => f,
        }
    }
}

impl Ord for SortValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Int(a), SortValue::Int(b)) => a.cmp(b),
            _ => self.as_f64().total_cmp(&other.as_f64()),
        }
    }
}

impl PartialOrd for SortValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortValue {}

fn sort_value(record: &Record, strategy: &SortStrategy) -> SortValue {
    let value = record.resolve(&strategy.field).into_iter().next();
    match strategy.kind {
        SortKind::Numeric => value.and_then(numeric_value).unwrap_or(SortValue::Int(0)),
        SortKind::Date => SortValue::Float(value.and_then(date_value).unwrap_or(f64::NEG_INFINITY)),
    }
}

fn numeric_value(value: &Value) -> Option<SortValue> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
            .map(SortValue::Int)
            .or_else(|| n.as_f64().map(SortValue::Float)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i128>().map(SortValue::Int).ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .map(SortValue::Float)
            })
        }
        _ => None,
    }
}

/// Seconds since the Unix epoch. Numbers are taken as epoch milliseconds, the
/// way ids and timestamps are minted on record creation.
fn date_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().map(|ms| ms / 1000.0),
        Value::String(s) => parse_date(s.trim()),
        _ => None,
    }
}

fn parse_date(s: &str) -> Option<f64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp() as f64);
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp() as f64)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
