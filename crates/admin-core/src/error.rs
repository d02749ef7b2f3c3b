//! Error types for admin-core.
//!
//! [`crate::engine::QueryEngine::evaluate`] is total and never produces one of
//! these. They surface only where user input or external data is turned into
//! core types: entity names, filter expressions, sort names, raw JSON.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown entity `{0}` (expected users, brokers, suppliers or properties)")]
    UnknownEntity(String),

    #[error("record must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("malformed filter `{0}` (expected field=value)")]
    MalformedFilter(String),

    #[error("`{field}` is not a filterable field for {entity}")]
    UnknownFilterField { entity: String, field: String },

    #[error("unknown sort `{name}` for {entity}")]
    UnknownSort { entity: String, name: String },
}
