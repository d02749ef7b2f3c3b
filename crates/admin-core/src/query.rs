//! The transient search / filter / sort intent built by a UI caller.

use crate::descriptor::FilterSpec;
use std::collections::BTreeMap;

/// A single field filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FilterValue {
    /// The sentinel: do not filter on this field.
    #[default]
    Any,
    /// Keep only records whose field equals this value exactly.
    Exact(String),
}

impl FilterValue {
    pub fn is_any(&self) -> bool {
        matches!(self, FilterValue::Any)
    }
}

/// Which ordering to apply after filtering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Keep the collection's original order.
    #[default]
    Unsorted,
    /// A sort strategy named by its key (or label) in the entity descriptor.
    Strategy(String),
}

/// Search term, field filters and sort directive.
///
/// `Query` is a plain value: cheap to clone, comparable, and never mutated by
/// the engine. The default value matches every record and keeps their order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Query {
    pub search: String,
    pub filters: BTreeMap<String, FilterValue>,
    pub sort: SortKey,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// The state after "Clear Filters".
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters
            .insert(field.into(), FilterValue::Exact(value.into()));
        self
    }

    pub fn any(mut self, field: impl Into<String>) -> Self {
        self.filters.insert(field.into(), FilterValue::Any);
        self
    }

    pub fn sort(mut self, strategy: impl Into<String>) -> Self {
        self.sort = SortKey::Strategy(strategy.into());
        self
    }

    pub fn unsorted(mut self) -> Self {
        self.sort = SortKey::Unsorted;
        self
    }

    /// Apply a dropdown selection: the filter's sentinel label clears the
    /// field's filter, any other label filters on it.
    pub fn select(mut self, spec: &FilterSpec, label: &str) -> Self {
        self.filters.insert(spec.field.clone(), spec.selection(label));
        self
    }

    /// The trimmed, lower-cased search term, or `None` when it is blank.
    pub fn normalized_search(&self) -> Option<String> {
        let term = self.search.trim();
        if term.is_empty() {
            None
        } else {
            Some(term.to_lowercase())
        }
    }

    /// Filters that actually restrict the result.
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters.iter().filter_map(|(field, value)| match value {
            FilterValue::Any => None,
            FilterValue::Exact(v) => Some((field.as_str(), v.as_str())),
        })
    }

    /// True when the query neither filters nor sorts.
    pub fn is_identity(&self) -> bool {
        self.normalized_search().is_none()
            && self.active_filters().next().is_none()
            && self.sort == SortKey::Unsorted
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_identity() {
        assert!(Query::new().is_identity());
        assert!(Query::new().search("   ").any("status").is_identity());
    }

    #[test]
    fn normalized_search_trims_and_lowers() {
        let q = Query::new().search("  Mehta ");
        assert_eq!(q.normalized_search().as_deref(), Some("mehta"));
    }

    #[test]
    fn select_sentinel_clears_filter() {
        let spec = FilterSpec::fixed("status", "All Status", ["Active", "Inactive"]);
        let q = Query::new().select(&spec, "Active").select(&spec, "All Status");
        assert_eq!(q.filters.get("status"), Some(&FilterValue::Any));
        assert_eq!(q.active_filters().count(), 0);
    }

    #[test]
    fn cleared_resets_everything() {
        let q = Query::new().search("x").filter("status", "Active").sort("most-deals");
        assert!(!q.is_identity());
        assert_eq!(Query::cleared(), Query::default());
    }
}
