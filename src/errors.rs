use thiserror::Error;

use crate::types::Namespace;

/// A raw identifier that does not match its namespace's grammar.
///
/// Kept separate from [`LexMapError`] so parse outcomes can be memoized
/// (this type is `Clone`, the umbrella error is not).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("parse error: {reason} (raw: {raw:?}, namespace: {namespace})")]
pub struct ParseError {
    pub raw: String,
    pub namespace: Namespace,
    pub reason: String,
}

impl ParseError {
    pub fn new(raw: &str, namespace: Namespace, reason: impl Into<String>) -> Self {
        Self {
            raw: raw.to_string(),
            namespace,
            reason: reason.into(),
        }
    }
}

/// Errors that can occur during extraction, indexing and resolution.
#[derive(Error, Debug)]
pub enum LexMapError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("unknown namespace: {name:?}")]
    UnknownNamespace { name: String },

    #[error("invalid threshold: {value} (expected a value within [0, 1])")]
    InvalidThreshold { value: f64 },

    #[error("invalid confidence: {value} (expected a value within [0, 1])")]
    InvalidConfidence { value: f64 },

    #[error("index error: only direct edges can be stored (got {kind})")]
    NonDirectEdge { kind: String },

    #[error("extraction cancelled after {records} records")]
    Cancelled { records: usize },

    #[error("cache error: {message} (path: {path})")]
    Cache { message: String, path: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results using `LexMapError`.
pub type Result<T> = std::result::Result<T, LexMapError>;

/// Rejects thresholds and confidences outside `[0, 1]` (NaN included).
pub(crate) fn check_unit_interval(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}
