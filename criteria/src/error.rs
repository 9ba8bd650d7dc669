//! Error types for criteria configuration and grammar decoding.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid config file {path}: {message}")]
    ConfigFile { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a single criterion segment could not be decoded.
///
/// Never surfaced by `complete`: the segment is dropped and the reason is
/// logged at debug level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("segment has no tail")]
    EmptyTail,

    #[error("malformed number in `{0}`")]
    MalformedNumber(String),

    #[error("unknown operator `{0}`")]
    UnknownOperator(String),

    #[error("expected `values` marker, found `{0}`")]
    MissingValuesMarker(String),

    #[error("value list is empty")]
    EmptyValues,

    #[error("unknown suggestion property `{0}`")]
    UnknownProperty(String),

    #[error("unknown sort entity `{0}`")]
    UnknownEntity(String),

    #[error("unknown sort order `{0}`")]
    UnknownOrder(String),
}
