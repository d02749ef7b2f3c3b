//! Readers for record payloads exported from the admin backend.
//!
//! The backend wraps collections inconsistently, so three shapes are accepted:
//!
//! ```text
//! [ {...}, {...} ]                                   bare array
//! { "success": true, "data": [ {...} ] }             enveloped array
//! { "success": true, "data": { "properties": [...] } }  keyed by collection
//! ```
//!
//! An envelope with `"success": false` is reported as
//! [`StoreError::Rejected`] carrying the backend's `error` message.

use crate::error::StoreError;
use crate::local::records_from_array;
use admin_core::{EntityKind, Record};
use serde_json::Value;
use std::path::Path;

/// Read and unwrap a payload file for `kind`.
pub fn read_payload(path: &Path, kind: EntityKind) -> Result<Vec<Record>, StoreError> {
    let text = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let value: Value = serde_json::from_str(&text).map_err(|e| StoreError::json(path, e))?;
    parse_payload(value, kind)
}

/// Unwrap an already-parsed payload for `kind`.
pub fn parse_payload(value: Value, kind: EntityKind) -> Result<Vec<Record>, StoreError> {
    let mut envelope = match value {
        Value::Array(_) => return records_from_array(value, kind.as_str()),
        Value::Object(map) => map,
        _ => {
            return Err(StoreError::UnexpectedShape(
                "payload must be an array or an object envelope".to_string(),
            ))
        }
    };

    if envelope.get("success").and_then(Value::as_bool) == Some(false) {
        let message = envelope
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("no error message")
            .to_string();
        return Err(StoreError::Rejected(message));
    }

    match envelope.remove("data") {
        Some(data @ Value::Array(_)) => records_from_array(data, kind.as_str()),
        Some(Value::Object(mut keyed)) => match keyed.remove(kind.as_str()) {
            Some(list) => records_from_array(list, kind.as_str()),
            None => Err(StoreError::UnexpectedShape(format!(
                "`data` has no `{}` collection",
                kind.as_str()
            ))),
        },
        Some(Value::Null) | None => Err(StoreError::UnexpectedShape(
            "envelope has no `data`".to_string(),
        )),
        Some(_) => Err(StoreError::UnexpectedShape(
            "`data` must be an array or an object".to_string(),
        )),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_array() {
        let rs = parse_payload(json!([{"id": 1}, {"id": 2}]), EntityKind::Users).unwrap();
        assert_eq!(rs.len(), 2);
    }

    #[test]
    fn enveloped_array() {
        let rs = parse_payload(json!({"success": true, "data": [{"id": 1}]}), EntityKind::Users)
            .unwrap();
        assert_eq!(rs[0].id(), Some(&json!(1)));
    }

    #[test]
    fn keyed_collection() {
        let payload = json!({"success": true, "data": {"properties": [{"flatNo": "A-1"}], "total": 1}});
        let rs = parse_payload(payload, EntityKind::Properties).unwrap();
        assert_eq!(rs.len(), 1);
    }

    #[test]
    fn failure_envelope_is_rejected() {
        let err = parse_payload(
            json!({"success": false, "error": "Failed to fetch properties"}),
            EntityKind::Properties,
        )
        .unwrap_err();
        assert!(matches!(err, StoreError::Rejected(ref m) if m == "Failed to fetch properties"));
    }

    #[test]
    fn wrong_collection_key() {
        let payload = json!({"data": {"users": []}});
        assert!(matches!(
            parse_payload(payload, EntityKind::Brokers),
            Err(StoreError::UnexpectedShape(_))
        ));
    }

    #[test]
    fn non_object_records_are_rejected() {
        assert!(matches!(
            parse_payload(json!([1, 2]), EntityKind::Users),
            Err(StoreError::Record(_))
        ));
    }
}
