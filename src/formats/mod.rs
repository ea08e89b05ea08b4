//! Format implementations
//!
//! Two spellings of the same block list:
//!
//! - [`NestedFormat`] (`nested`): text and spans under `content`, media
//!   attributes under `data` (the Import API shape)
//! - [`FlattenedFormat`] (`flattened`): the same fields inlined on each block
//!   (the Migration API shape), produced by [`wire`]

pub mod flattened;
pub mod nested;
pub mod wire;

pub use flattened::FlattenedFormat;
pub use nested::NestedFormat;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FormatError;
use crate::ir::blocks::Block;

/// Which wire shape a host reads and writes by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WireShape {
    #[default]
    Nested,
    Flattened,
}

impl WireShape {
    /// Registry name of the format for this shape
    pub fn format_name(self) -> &'static str {
        match self {
            WireShape::Nested => "nested",
            WireShape::Flattened => "flattened",
        }
    }
}

/// Deserialize a nested-shape JSON array into blocks
pub(crate) fn read_blocks(value: Value) -> Result<Vec<Block>, FormatError> {
    match value {
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        other => Err(FormatError::NotAnArray(json_kind(&other))),
    }
}

pub(crate) fn write_json<T: Serialize + ?Sized>(
    value: &T,
    pretty: bool,
) -> Result<String, FormatError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_non_array_documents() {
        let err = read_blocks(json!({ "type": "paragraph" })).unwrap_err();
        assert_eq!(err.to_string(), "expected an array of blocks, found an object");
    }

    #[test]
    fn unknown_block_types_are_errors() {
        let err = read_blocks(json!([{ "type": "table" }])).unwrap_err();
        assert!(err.to_string().contains("unknown block type 'table'"), "{}", err);
    }

    #[test]
    fn wire_shape_names() {
        assert_eq!(WireShape::default().format_name(), "nested");
        assert_eq!(WireShape::Flattened.format_name(), "flattened");
    }
}
