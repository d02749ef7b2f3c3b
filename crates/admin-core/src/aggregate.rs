//! Collection-level helpers used to populate filter dropdowns and stat cards.

use crate::types::{scalar_text, Record};
use std::collections::BTreeSet;

/// Sorted, de-duplicated, non-empty scalar values of `field` across `records`.
pub fn distinct_values(records: &[Record], field: &str) -> Vec<String> {
    records
        .iter()
        .flat_map(|r| r.resolve(field))
        .filter_map(scalar_text)
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.into_owned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Number of records whose `field` equals `value` exactly.
pub fn count_where(records: &[Record], field: &str, value: &str) -> usize {
    records
        .iter()
        .filter(|r| {
            r.resolve(field)
                .into_iter()
                .filter_map(scalar_text)
                .any(|v| v == value)
        })
        .count()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records() -> Vec<Record> {
        [
            json!({"status": "Active", "project": "Skyline"}),
            json!({"status": "Inactive", "project": "Aurora"}),
            json!({"status": "Active"}),
            json!({"status": null, "project": "  "}),
        ]
        .into_iter()
        .map(|v| Record::try_from(v).unwrap())
        .collect()
    }

    #[test]
    fn distinct_is_sorted_and_skips_blanks() {
        assert_eq!(distinct_values(&records(), "project"), vec!["Aurora", "Skyline"]);
        assert_eq!(distinct_values(&records(), "status"), vec!["Active", "Inactive"]);
        assert!(distinct_values(&[], "status").is_empty());
    }

    #[test]
    fn count_where_exact() {
        assert_eq!(count_where(&records(), "status", "Active"), 2);
        assert_eq!(count_where(&records(), "status", "active"), 0);
        assert_eq!(count_where(&records(), "missing", "x"), 0);
    }
}
