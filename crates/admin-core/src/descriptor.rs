//! Entity descriptors — the declarative per-entity configuration of the
//! query engine.
//!
//! Each management screen searches a different list of fields, offers a
//! different set of dropdown filters and (for brokers) a set of sort orders.
//! Rather than encoding that in four copies of the filtering logic, an
//! [`EntityDescriptor`] lists it once and the engine in [`crate::engine`]
//! interprets it.

use crate::aggregate::distinct_values;
use crate::error::CoreError;
use crate::query::{FilterValue, SortKey};
use crate::types::{EntityKind, Record};

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Where a filter's selectable options come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOptions {
    /// A controlled vocabulary known up front (status, verification, …).
    Fixed(Vec<String>),
    /// The distinct non-empty values currently present in the collection
    /// (project names, for instance).
    Distinct,
}

/// One dropdown filter on a management screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    /// Record field (or path) compared against the selected value.
    pub field: String,
    /// The label of the "match anything" entry, e.g. `All Status`.
    pub sentinel: String,
    pub options: FilterOptions,
}

impl FilterSpec {
    pub fn fixed<I, S>(field: &str, sentinel: &str, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field: field.to_string(),
            sentinel: sentinel.to_string(),
            options: FilterOptions::Fixed(options.into_iter().map(Into::into).collect()),
        }
    }

    pub fn distinct(field: &str, sentinel: &str) -> Self {
        Self {
            field: field.to_string(),
            sentinel: sentinel.to_string(),
            options: FilterOptions::Distinct,
        }
    }

    /// Selectable values for this filter, excluding the sentinel.
    pub fn options(&self, records: &[Record]) -> Vec<String> {
        match &self.options {
            FilterOptions::Fixed(values) => values.clone(),
            FilterOptions::Distinct => distinct_values(records, &self.field),
        }
    }

    /// Translate a dropdown label into a filter value. The sentinel label
    /// (and the empty string) mean "do not filter on this field".
    pub fn selection(&self, label: &str) -> FilterValue {
        if label.is_empty() || label == self.sentinel {
            FilterValue::Any
        } else {
            FilterValue::Exact(label.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Sorts
// ---------------------------------------------------------------------------

/// How a sort strategy reads its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
    /// A count or amount. Non-numeric and missing values sort as `0`.
    Numeric,
    /// A calendar date. Unparseable and missing values sort last.
    Date,
}

/// A named descending ordering over one numeric or date field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortStrategy {
    /// Machine name, e.g. `most-deals`.
    pub key: String,
    /// Dropdown label, e.g. `Most Deals`.
    pub label: String,
    pub field: String,
    pub kind: SortKind,
}

impl SortStrategy {
    pub fn new(key: &str, label: &str, field: &str, kind: SortKind) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            field: field.to_string(),
            kind,
        }
    }
}

/// Label of the "no sort" dropdown entry.
pub const SORT_SENTINEL: &str = "Sort By";

// ---------------------------------------------------------------------------
// Descriptor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDescriptor {
    pub kind: EntityKind,
    /// Fields included in free-text matching. Paths are accepted, see
    /// [`Record::resolve`].
    pub searchable: Vec<String>,
    pub filters: Vec<FilterSpec>,
    pub sorts: Vec<SortStrategy>,
}

impl EntityDescriptor {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            searchable: Vec::new(),
            filters: Vec::new(),
            sorts: Vec::new(),
        }
    }

    pub fn searchable<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.searchable.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn filter(mut self, spec: FilterSpec) -> Self {
        self.filters.push(spec);
        self
    }

    pub fn sort(mut self, strategy: SortStrategy) -> Self {
        self.sorts.push(strategy);
        self
    }

    /// The built-in descriptor for one of the four management screens.
    pub fn for_kind(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Users => Self::new(kind)
                .searchable(["name", "email", "phone", "project", "property"])
                .filter(FilterSpec::distinct("project", "All Projects"))
                .filter(FilterSpec::fixed("status", "All Status", ["Active", "Inactive"]))
                .filter(FilterSpec::fixed(
                    "paymentStatus",
                    "Payment Status",
                    ["Up to Date", "Pending", "Overdue"],
                ))
                .sort(SortStrategy::new("newest-first", "Newest First", "joinDate", SortKind::Date)),

            EntityKind::Brokers => Self::new(kind)
                .searchable(["name", "email", "phone"])
                .filter(FilterSpec::fixed("status", "All Status", ["Active", "Inactive"]))
                .filter(FilterSpec::fixed(
                    "performance",
                    "Performance",
                    ["Outstanding", "Excellent", "Good", "Average"],
                ))
                .sort(SortStrategy::new("most-deals", "Most Deals", "successfulDeals", SortKind::Numeric))
                .sort(SortStrategy::new("most-clients", "Most Clients", "clientsManaged", SortKind::Numeric))
                .sort(SortStrategy::new("newest-first", "Newest First", "joinDate", SortKind::Date)),

            EntityKind::Suppliers => Self::new(kind)
                .searchable(["companyName", "email", "phone", "gstNumber", "contactPerson", "location"])
                .filter(FilterSpec::fixed("category", "All Categories", DEFAULT_SUPPLIER_CATEGORIES))
                .filter(FilterSpec::fixed("status", "All Status", ["Active", "Inactive"]))
                .filter(FilterSpec::fixed(
                    "verificationStatus",
                    "Verification Status",
                    ["Approved", "Pending"],
                ))
                .sort(SortStrategy::new("newest-first", "Newest First", "joinDate", SortKind::Date)),

            EntityKind::Properties => Self::new(kind)
                .searchable([
                    "flatNo",
                    "projectName",
                    "users[].name",
                    "users[].email",
                    "user.name",
                    "user.email",
                    "location",
                ])
                .filter(FilterSpec::distinct("projectName", "All Projects"))
                .filter(FilterSpec::fixed(
                    "status",
                    "All Status",
                    ["active", "completed", "cancelled"],
                )),
        }
    }

    pub fn filter_spec(&self, field: &str) -> Option<&FilterSpec> {
        self.filters.iter().find(|f| f.field == field)
    }

    /// Look up a sort strategy by key or label. Case and word separators are
    /// ignored, so `most-deals`, `mostDeals`, `most_deals` and `Most Deals`
    /// all name the same strategy.
    pub fn sort_strategy(&self, name: &str) -> Option<&SortStrategy> {
        let wanted = sort_name_key(name);
        if wanted.is_empty() {
            return None;
        }
        self.sorts
            .iter()
            .find(|s| sort_name_key(&s.key) == wanted || sort_name_key(&s.label) == wanted)
    }

    /// Parse a `field=value` expression typed by a user. The value may be the
    /// field's sentinel label or `any`, both of which clear the filter.
    pub fn parse_filter(&self, expr: &str) -> Result<(String, FilterValue), CoreError> {
        let (field, value) = expr
            .split_once('=')
            .map(|(f, v)| (f.trim(), v.trim()))
            .filter(|(f, _)| !f.is_empty())
            .ok_or_else(|| CoreError::MalformedFilter(expr.to_string()))?;

        let spec = self.filter_spec(field).ok_or_else(|| CoreError::UnknownFilterField {
            entity: self.kind.to_string(),
            field: field.to_string(),
        })?;

        let value = if value.eq_ignore_ascii_case("any") {
            FilterValue::Any
        } else {
            spec.selection(value)
        };
        Ok((field.to_string(), value))
    }

    /// Parse a sort name typed by a user. `none` and the `Sort By` sentinel
    /// select the original order.
    pub fn parse_sort(&self, name: &str) -> Result<SortKey, CoreError> {
        let name = name.trim();
        if name.is_empty() || name.eq_ignore_ascii_case("none") || name == SORT_SENTINEL {
            return Ok(SortKey::Unsorted);
        }
        self.sort_strategy(name)
            .map(|s| SortKey::Strategy(s.key.clone()))
            .ok_or_else(|| CoreError::UnknownSort {
                entity: self.kind.to_string(),
                name: name.to_string(),
            })
    }
}

fn sort_name_key(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_') && !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Supplier categories offered before any have been customised.
pub const DEFAULT_SUPPLIER_CATEGORIES: [&str; 7] = [
    "Building Materials",
    "Cement & Concrete",
    "Steel & Metal",
    "Electrical",
    "Plumbing",
    "Paint & Coating",
    "Hardware",
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_kind_has_a_descriptor() {
        for kind in EntityKind::ALL {
            let d = EntityDescriptor::for_kind(kind);
            assert_eq!(d.kind, kind);
            assert!(!d.searchable.is_empty());
            assert!(!d.filters.is_empty());
        }
    }

    #[test]
    fn sort_lookup_by_key_or_label() {
        let d = EntityDescriptor::for_kind(EntityKind::Brokers);
        assert_eq!(d.sort_strategy("most-deals").unwrap().field, "successfulDeals");
        assert_eq!(d.sort_strategy("most clients").unwrap().field, "clientsManaged");
        assert!(d.sort_strategy("best-performance").is_none());
        assert!(d.sort_strategy("").is_none());
    }

    #[test]
    fn sort_names_ignore_case_and_separators() {
        let d = EntityDescriptor::for_kind(EntityKind::Brokers);
        for name in ["mostDeals", "most-deals", "most_deals", "Most Deals", "MOSTDEALS"] {
            assert_eq!(d.sort_strategy(name).unwrap().key, "most-deals", "{name}");
        }
        assert_eq!(d.sort_strategy("newestFirst").unwrap().field, "joinDate");
    }

    #[test]
    fn sentinel_selection_is_any() {
        let d = EntityDescriptor::for_kind(EntityKind::Users);
        let status = d.filter_spec("status").unwrap();
        assert_eq!(status.selection("All Status"), FilterValue::Any);
        assert_eq!(status.selection("Active"), FilterValue::Exact("Active".into()));
    }

    #[test]
    fn parse_filter_expressions() {
        let d = EntityDescriptor::for_kind(EntityKind::Suppliers);
        assert_eq!(
            d.parse_filter("status=Active").unwrap(),
            ("status".to_string(), FilterValue::Exact("Active".into()))
        );
        assert_eq!(
            d.parse_filter("category = All Categories").unwrap(),
            ("category".to_string(), FilterValue::Any)
        );
        assert_eq!(
            d.parse_filter("status=any").unwrap(),
            ("status".to_string(), FilterValue::Any)
        );
        assert!(matches!(d.parse_filter("status"), Err(CoreError::MalformedFilter(_))));
        assert!(matches!(
            d.parse_filter("rating=5"),
            Err(CoreError::UnknownFilterField { .. })
        ));
    }

    #[test]
    fn parse_sort_names() {
        let d = EntityDescriptor::for_kind(EntityKind::Brokers);
        assert_eq!(d.parse_sort("none").unwrap(), SortKey::Unsorted);
        assert_eq!(d.parse_sort("Sort By").unwrap(), SortKey::Unsorted);
        assert_eq!(
            d.parse_sort("Newest First").unwrap(),
            SortKey::Strategy("newest-first".into())
        );
        assert!(d.parse_sort("performance").is_err());
    }

    #[test]
    fn distinct_options_come_from_records() {
        let d = EntityDescriptor::for_kind(EntityKind::Properties);
        let records: Vec<Record> = [
            json!({"projectName": "Skyline"}),
            json!({"projectName": "Aurora"}),
            json!({"projectName": "Skyline"}),
            json!({"projectName": ""}),
        ]
        .into_iter()
        .map(|v| Record::try_from(v).unwrap())
        .collect();
        let spec = d.filter_spec("projectName").unwrap();
        assert_eq!(spec.options(&records), vec!["Aurora", "Skyline"]);
    }
}
