//! Flattened (Migration API) block JSON
//!
//! Same blocks as the nested shape with every `content` and `data` field
//! inlined on the block, image dimensions grouped, embed attributes under
//! `oembed` and hyperlinks tagged with a `link_type`. See [`super::wire`]
//! for the exact field moves.
//!
//! ## Example
//!
//! ```text
//! [
//!   { "type": "paragraph", "text": "See docs",
//!     "spans": [{ "type": "hyperlink", "start": 4, "end": 8,
//!                 "data": { "wioUrl": "wio://documents/W1", "link_type": "Document" } }] },
//!   { "type": "image", "url": "/img.png", "alt": "alt" }
//! ]
//! ```

use serde_json::Value;

use crate::diagnostics::Conversion;
use crate::error::FormatError;
use crate::format::Format;
use crate::formats::nested::NestedFormat;
use crate::formats::wire::{flatten, nest};
use crate::formats::write_json;
use crate::ir::nodes::Document;
use crate::options::CodecOptions;

/// Format implementation for the flattened block shape
#[derive(Debug, Clone, Default)]
pub struct FlattenedFormat {
    nested: NestedFormat,
}

impl FlattenedFormat {
    pub fn new(options: CodecOptions) -> Self {
        FlattenedFormat {
            nested: NestedFormat::new(options),
        }
    }

    pub fn options(&self) -> &CodecOptions {
        self.nested.options()
    }

    /// Encode a document into a flattened-shape JSON value
    pub fn to_value(&self, doc: &Document) -> Result<Conversion<Value>, FormatError> {
        Ok(self.nested.to_value(doc)?.map(flatten))
    }

    /// Decode a flattened-shape JSON value
    pub fn from_value(&self, value: Value) -> Result<Document, FormatError> {
        self.nested.from_value(nest(value))
    }
}

impl Format for FlattenedFormat {
    fn name(&self) -> &str {
        "flattened"
    }

    fn description(&self) -> &str {
        "Prismic StructuredText, Migration API shape"
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
        let Conversion { value, diagnostics } = self.to_value(doc)?;
        Ok(Conversion {
            value: write_json(&value, self.options().pretty)?,
            diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::nodes::{ListKind, Node};
    use serde_json::json;

    #[test]
    fn image_fields_are_inlined() {
        let doc = Document::new(vec![Node::image("/img.png", "alt")]);

        let output = FlattenedFormat::default().to_value(&doc).unwrap();
        assert_eq!(
            output.value,
            json!([{ "type": "image", "url": "/img.png", "alt": "alt" }])
        );
    }

    #[test]
    fn parses_document_links() {
        let source = r#"[
            { "type": "paragraph", "text": "See docs", "spans": [
                { "type": "hyperlink", "start": 4, "end": 8,
                  "data": { "wioUrl": "wio://documents/W1", "link_type": "Document" } }
            ] }
        ]"#;

        let parsed = FlattenedFormat::default().parse(source).unwrap();
        assert_eq!(
            parsed.value,
            Document::new(vec![Node::paragraph(vec![
                Node::text("See "),
                Node::link("wio://documents/W1", vec![Node::text("docs")]),
            ])])
        );
    }

    #[test]
    fn image_without_url_reports_the_missing_origin() {
        let err = FlattenedFormat::default()
            .parse(r#"[{ "type": "image", "alt": "cover" }]"#)
            .unwrap_err();

        assert!(err.to_string().contains("image block is missing 'origin'"), "{}", err);
    }

    #[test]
    fn parses_embeds_from_oembed() {
        let source = r#"[{ "type": "embed", "oembed": { "embed_url": "https://youtu.be/x", "type": "link" } }]"#;

        let parsed = FlattenedFormat::default().parse(source).unwrap();
        assert_eq!(
            parsed.value.children,
            vec![Node::html("iframe", &[("src", "https://youtu.be/x")], vec![])]
        );
    }

    #[test]
    fn serialization_round_trips() {
        let doc = Document::new(vec![
            Node::heading(1, vec![Node::strong(vec![Node::text("Title")])]),
            Node::list(
                ListKind::Ordered,
                vec![Node::list_item(vec![Node::link(
                    "wio://medias/M1",
                    vec![Node::text("file")],
                )])],
            ),
        ]);
        let format = FlattenedFormat::default();

        let json = format.serialize(&doc).unwrap().value;
        assert!(json.contains(r#""link_type":"Media""#), "{}", json);
        assert_eq!(format.parse(&json).unwrap().value, doc);
    }

    #[test]
    fn rejects_non_array_documents() {
        let err = FlattenedFormat::default().parse("{}").unwrap_err();
        assert!(matches!(err, FormatError::NotAnArray(_)));
    }
}
