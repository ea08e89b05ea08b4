//! Nested (Import API) block JSON
//!
//! ## Format
//!
//! A JSON array of blocks. Text blocks keep their text and spans under
//! `content`; image and embed blocks keep their attributes under `data`.
//!
//! ## Example
//!
//! ```text
//! [
//!   { "type": "heading2",
//!     "content": { "text": "This is a document title",
//!                  "spans": [{ "type": "em", "start": 0, "end": 4 }] } },
//!   { "type": "image",
//!     "content": { "text": "", "spans": [] },
//!     "data": { "origin": { "url": "/img.png" }, "alt": "alt" } }
//! ]
//! ```

use serde_json::Value;

use crate::diagnostics::Conversion;
use crate::error::FormatError;
use crate::format::Format;
use crate::formats::{read_blocks, write_json};
use crate::ir::blocks::Block;
use crate::ir::nodes::Document;
use crate::mappings::flat_to_nested::decode;
use crate::mappings::nested_to_flat::to_blocks;
use crate::options::CodecOptions;

/// Format implementation for the nested block shape
#[derive(Debug, Clone, Default)]
pub struct NestedFormat {
    options: CodecOptions,
}

impl NestedFormat {
    pub fn new(options: CodecOptions) -> Self {
        NestedFormat { options }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Encode a document into blocks without serializing them
    pub fn to_blocks(&self, doc: &Document) -> Conversion<Vec<Block>> {
        to_blocks(doc.clone(), &self.options)
    }

    /// Encode a document into a nested-shape JSON value
    pub fn to_value(&self, doc: &Document) -> Result<Conversion<Value>, FormatError> {
        let Conversion { value, diagnostics } = self.to_blocks(doc);
        Ok(Conversion {
            value: serde_json::to_value(value)?,
            diagnostics,
        })
    }

    /// Decode a nested-shape JSON value
    pub fn from_value(&self, value: Value) -> Result<Document, FormatError> {
        let blocks = read_blocks(value)?;
        Ok(decode(&blocks))
    }
}

impl Format for NestedFormat {
    fn name(&self) -> &str {
        "nested"
    }

    fn description(&self) -> &str {
        "Prismic StructuredText, Import API shape"
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Conversion<Document>, FormatError> {
        let value: Value = serde_json::from_str(source)?;
        Ok(Conversion::clean(self.from_value(value)?))
    }

    fn serialize(&self, doc: &Document) -> Result<Conversion<String>, FormatError> {
        let Conversion { value, diagnostics } = self.to_blocks(doc);
        Ok(Conversion {
            value: write_json(&value, self.options.pretty)?,
            diagnostics,
        })
    }
}
