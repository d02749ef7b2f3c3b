//! Core types for admin-core.
//!
//! This module defines the data structures shared by every layer: the
//! schemaless [`Record`] and the [`EntityKind`] discriminant naming which
//! management screen a collection belongs to.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// One entity instance (user, broker, supplier or property).
///
/// Records are plain JSON objects as fetched from the backend or read from the
/// local store. The only identity invariant is a unique `id` field; every other
/// field is optional and may be absent, `null`, or of an unexpected type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// The record's `id` field, if present.
    pub fn id(&self) -> Option<&Value> {
        self.0.get("id")
    }

    /// Top-level field lookup. Returns `None` for absent keys; `null` values
    /// are returned as-is so callers can decide how to treat them.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Resolve a field path against this record.
    ///
    /// Paths are dot-separated (`user.name`). A segment suffixed with `[]`
    /// fans out over an array (`users[].email`), so one path can resolve to
    /// several values. Absent segments, `null`s and type mismatches simply
    /// contribute nothing.
    pub fn resolve(&self, path: &str) -> Vec<&Value> {
        let mut out = Vec::new();
        let mut segments = path.split('.');
        let Some(first) = segments.next() else {
            return out;
        };
        let rest: Vec<&str> = segments.collect();
        let (name, fan_out) = split_segment(first);
        if let Some(value) = self.0.get(name) {
            descend(value, fan_out, &rest, &mut out);
        }
        out
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl TryFrom<Value> for Record {
    type Error = CoreError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Record(map)),
            other => Err(CoreError::NotAnObject(json_type_name(&other))),
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Record(map)
    }
}

fn split_segment(segment: &str) -> (&str, bool) {
    match segment.strip_suffix("[]") {
        Some(name) => (name, true),
        None => (segment, false),
    }
}

fn descend<'a>(value: &'a Value, fan_out: bool, rest: &[&str], out: &mut Vec<&'a Value>) {
    if fan_out {
        if let Value::Array(items) = value {
            for item in items {
                descend(item, false, rest, out);
            }
        }
        return;
    }

    let Some((head, tail)) = rest.split_first() else {
        if !value.is_null() {
            out.push(value);
        }
        return;
    };

    let (name, next_fan_out) = split_segment(head);
    if let Some(child) = value.as_object().and_then(|obj| obj.get(name)) {
        descend(child, next_fan_out, tail, out);
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Render a scalar JSON value the way it is compared and searched.
///
/// Strings render verbatim, numbers and booleans use their canonical JSON
/// text. Arrays, objects and `null` have no scalar rendering.
pub fn scalar_text(value: &Value) -> Option<std::borrow::Cow<'_, str>> {
    use std::borrow::Cow;
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        _ => None,
    }
}

/// Which management screen a record collection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Users,
    Brokers,
    Suppliers,
    Properties,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Users,
        EntityKind::Brokers,
        EntityKind::Suppliers,
        EntityKind::Properties,
    ];

    /// Lower-case collection name, as used in store keys and on the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Users => "users",
            EntityKind::Brokers => "brokers",
            EntityKind::Suppliers => "suppliers",
            EntityKind::Properties => "properties",
        }
    }

    /// Human-readable screen title.
    pub fn title(&self) -> &'static str {
        match self {
            EntityKind::Users => "Users",
            EntityKind::Brokers => "Brokers",
            EntityKind::Suppliers => "Suppliers",
            EntityKind::Properties => "Properties",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "users" | "user" | "buyers" => Ok(EntityKind::Users),
            "brokers" | "broker" => Ok(EntityKind::Brokers),
            "suppliers" | "supplier" => Ok(EntityKind::Suppliers),
            "properties" | "property" => Ok(EntityKind::Properties),
            other => Err(CoreError::UnknownEntity(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
