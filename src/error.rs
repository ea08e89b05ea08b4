//! Error types for format operations
//!
//! Only wire input that cannot be read at all produces an error. Constructs
//! the rich-text model cannot express are reported as diagnostics instead,
//! see [`crate::diagnostics`].

use thiserror::Error;

/// Errors that can occur while reading, writing or looking up formats
#[derive(Debug, Error)]
pub enum FormatError {
    /// No format registered under the requested name
    #[error("format '{0}' not found")]
    FormatNotFound(String),

    /// The format does not support the requested direction
    #[error("{0}")]
    NotSupported(String),

    /// The source is not valid JSON, or JSON that does not describe blocks
    #[error("invalid block JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level JSON value is not an array of blocks
    #[error("expected an array of blocks, found {0}")]
    NotAnArray(&'static str),

    /// A block `type` the codec does not know
    #[error("unknown block type '{0}'")]
    UnknownBlockType(String),

    /// A media block without the attributes that describe the media
    #[error("{block} block is missing '{field}'")]
    MissingField { block: String, field: &'static str },
}
