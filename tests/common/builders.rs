//! Test builders — ergonomic constructors for records and queries.
//!
//! Designed for readability in assertions, not production use. They panic on
//! invalid input rather than returning `Result`.

use admin_core::Record;
use serde_json::Value;

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Record`] fixtures.
///
/// ```rust
/// let broker = RecordBuilder::new(7)
///     .field("name", "Rohit Mehta")
///     .field("successfulDeals", 5)
///     .build();
/// ```
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    pub fn new(id: i64) -> Self {
        let mut record = Record::new();
        record.insert("id", id);
        Self { record }
    }

    pub fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.record.insert(name, value);
        self
    }

    /// Set a field to JSON `null`.
    pub fn null(mut self, name: &str) -> Self {
        self.record.insert(name, Value::Null);
        self
    }

    pub fn build(self) -> Record {
        self.record
    }
}

/// Build records from `json!` literals.
pub fn records(values: impl IntoIterator<Item = Value>) -> Vec<Record> {
    values
        .into_iter()
        .map(|v| Record::try_from(v).expect("fixture must be a JSON object"))
        .collect()
}

/// `n` records with ids `1..=n` and a `name` of `r<id>`.
pub fn numbered(n: i64) -> Vec<Record> {
    (1..=n)
        .map(|i| RecordBuilder::new(i).field("name", format!("r{i}")).build())
        .collect()
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

/// The `name` field of each record, in order.
pub fn names(records: &[Record]) -> Vec<String> {
    string_field(records, "name")
}

/// A string field of each record, in order. Missing values are skipped.
pub fn string_field(records: &[Record], field: &str) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.get(field).and_then(Value::as_str).map(str::to_string))
        .collect()
}

/// The numeric `id` of each record, in order.
pub fn ids(records: &[Record]) -> Vec<i64> {
    records
        .iter()
        .filter_map(|r| r.id().and_then(Value::as_i64))
        .collect()
}
