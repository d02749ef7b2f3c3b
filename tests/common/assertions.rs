//! Domain-specific assertion macros for legacy-admin harnesses.
//!
//! These wrap `pretty_assertions` and say *which* query invariant broke.

// ---------------------------------------------------------------------------
// View assertions
// ---------------------------------------------------------------------------

/// Assert the `name` fields of a view, in order.
///
/// ```rust
/// assert_names!(view, ["Kavita Desai", "Sandeep Rao"]);
/// ```
#[macro_export]
macro_rules! assert_names {
    ($view:expr, [$($name:expr),* $(,)?]) => {{
        let actual: Vec<String> = $crate::common::builders::names(&$view);
        let expected: Vec<String> = vec![$($name.to_string()),*];
        pretty_assertions::assert_eq!(actual, expected, "assert_names! failed: view order differs");
    }};
}

/// Assert that `view` preserves the relative order of `source`: every record
/// of the view appears in the source, and in the same order.
#[macro_export]
macro_rules! assert_subsequence {
    ($view:expr, $source:expr) => {{
        let view: &[admin_core::Record] = &$view;
        let source: &[admin_core::Record] = &$source;
        let mut rest = source.iter();
        for (i, record) in view.iter().enumerate() {
            if !rest.any(|s| s == record) {
                panic!(
                    "assert_subsequence! failed: view[{}] is not in the source after its predecessor\n  record: {:?}",
                    i, record
                );
            }
        }
    }};
}

/// Assert that a numeric field never increases along the view.
#[macro_export]
macro_rules! assert_descending {
    ($view:expr, $field:expr) => {{
        let view: &[admin_core::Record] = &$view;
        let values: Vec<f64> = view
            .iter()
            .map(|r| r.get($field).and_then(serde_json::Value::as_f64).unwrap_or(0.0))
            .collect();
        if let Some(w) = values.windows(2).find(|w| w[0] < w[1]) {
            panic!(
                "assert_descending! failed on `{}`: {} before {}\n  values: {:?}",
                $field, w[0], w[1], values
            );
        }
    }};
}
