//! The flat, offset-addressed block model
//!
//! A document is an ordered list of [`Block`]s. Each block carries its plain
//! text and a list of [`Span`]s whose offsets point into that text. The serde
//! representation of these types *is* the nested wire shape:
//!
//! ```text
//! { "type": "paragraph",
//!   "content": { "text": "This is a paragraph",
//!                "spans": [{ "type": "em", "start": 0, "end": 4 }] } }
//! { "type": "image",
//!   "content": { "text": "", "spans": [] },
//!   "data": { "origin": { "url": "/img.png" }, "alt": "alt" } }
//! ```
//!
//! Offsets count `char`s (Unicode scalar values), never bytes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FormatError;
use crate::ir::nodes::ListKind;

/// The kind of a top-level block, spelled as on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BlockKind {
    Heading(u8),
    Paragraph,
    Preformatted,
    /// An item of an unordered list (`list-item`)
    ListItem,
    /// An item of an ordered list (`o-list-item`)
    OListItem,
    Image,
    Embed,
}

/// Highest heading level the wire format can spell
pub const MAX_HEADING_LEVEL: u8 = 6;

impl BlockKind {
    pub fn list_item(kind: ListKind) -> Self {
        match kind {
            ListKind::Ordered => BlockKind::OListItem,
            ListKind::Unordered => BlockKind::ListItem,
        }
    }

    /// The list kind for list-item blocks
    pub fn list_kind(self) -> Option<ListKind> {
        match self {
            BlockKind::ListItem => Some(ListKind::Unordered),
            BlockKind::OListItem => Some(ListKind::Ordered),
            _ => None,
        }
    }

    /// Media blocks carry `data` and no text
    pub fn is_media(self) -> bool {
        matches!(self, BlockKind::Image | BlockKind::Embed)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Heading(level) => write!(f, "heading{}", level),
            BlockKind::Paragraph => f.write_str("paragraph"),
            BlockKind::Preformatted => f.write_str("preformatted"),
            BlockKind::ListItem => f.write_str("list-item"),
            BlockKind::OListItem => f.write_str("o-list-item"),
            BlockKind::Image => f.write_str("image"),
            BlockKind::Embed => f.write_str("embed"),
        }
    }
}

impl FromStr for BlockKind {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "paragraph" => BlockKind::Paragraph,
            "preformatted" => BlockKind::Preformatted,
            "list-item" => BlockKind::ListItem,
            "o-list-item" => BlockKind::OListItem,
            "image" => BlockKind::Image,
            "embed" => BlockKind::Embed,
            other => match other.strip_prefix("heading").map(str::parse::<u8>) {
                Some(Ok(level)) if (1..=MAX_HEADING_LEVEL).contains(&level) => {
                    BlockKind::Heading(level)
                }
                _ => return Err(FormatError::UnknownBlockType(other.to_string())),
            },
        };
        Ok(kind)
    }
}

impl TryFrom<String> for BlockKind {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BlockKind> for String {
    fn from(kind: BlockKind) -> Self {
        kind.to_string()
    }
}

/// Inline mark kinds; the declaration order is the wire sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    Em,
    Hyperlink,
    Strong,
}

/// Hyperlink attributes carried by a `hyperlink` span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkData {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// An inline annotation over `[start, end)` of the block text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    #[serde(rename = "type")]
    pub kind: SpanKind,
    pub start: usize,
    pub end: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<LinkData>,
}

impl Span {
    pub fn new(kind: SpanKind, start: usize, end: usize) -> Self {
        Span {
            kind,
            start,
            end,
            data: None,
        }
    }

    pub fn hyperlink(start: usize, end: usize, url: impl Into<String>) -> Self {
        Span {
            kind: SpanKind::Hyperlink,
            start,
            end,
            data: Some(LinkData {
                url: url.into(),
                target: None,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Text plus the spans annotating it
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub spans: Vec<Span>,
}

impl Content {
    pub fn new(text: impl Into<String>, spans: Vec<Span>) -> Self {
        Content {
            text: text.into(),
            spans,
        }
    }

    /// Length of the text in offset units
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageOrigin {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTo {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageData {
    pub origin: ImageOrigin,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(rename = "linkTo", default, skip_serializing_if = "Option::is_none")]
    pub link_to: Option<LinkTo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedData {
    pub embed_url: String,
    #[serde(rename = "type", default = "default_embed_type")]
    pub kind: String,
}

fn default_embed_type() -> String {
    "link".to_string()
}

/// Attributes of a media block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Media {
    Image(ImageData),
    Embed(EmbedData),
}

/// A single top-level block of a flat document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireBlock")]
pub struct Block {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub content: Content,
    #[serde(rename = "data", skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
}

impl Block {
    pub fn new(kind: BlockKind, content: Content) -> Self {
        Block {
            kind,
            content,
            media: None,
        }
    }

    pub fn image(url: impl Into<String>, alt: impl Into<String>, link_to: Option<String>) -> Self {
        Block {
            kind: BlockKind::Image,
            content: Content::default(),
            media: Some(Media::Image(ImageData {
                origin: ImageOrigin {
                    url: url.into(),
                    id: None,
                },
                alt: Some(alt.into()),
                link_to: link_to.map(|url| LinkTo { url }),
            })),
        }
    }

    pub fn embed(embed_url: impl Into<String>, kind: impl Into<String>) -> Self {
        Block {
            kind: BlockKind::Embed,
            content: Content::default(),
            media: Some(Media::Embed(EmbedData {
                embed_url: embed_url.into(),
                kind: kind.into(),
            })),
        }
    }
}

/// Deserialization shape; `data` is only interpreted for media blocks
#[derive(Deserialize)]
struct WireBlock {
    #[serde(rename = "type")]
    kind: BlockKind,
    #[serde(default)]
    content: Content,
    #[serde(default)]
    data: Option<Value>,
}

impl TryFrom<WireBlock> for Block {
    type Error = FormatError;

    fn try_from(wire: WireBlock) -> Result<Self, Self::Error> {
        let media = match wire.kind {
            BlockKind::Image => Some(Media::Image(serde_json::from_value(
                media_data(&wire.kind, wire.data, "origin")?,
            )?)),
            BlockKind::Embed => Some(Media::Embed(serde_json::from_value(
                media_data(&wire.kind, wire.data, "embed_url")?,
            )?)),
            _ => None,
        };

        Ok(Block {
            kind: wire.kind,
            content: wire.content,
            media,
        })
    }
}

/// The `data` object of a media block, which must carry `required`
fn media_data(
    kind: &BlockKind,
    data: Option<Value>,
    required: &'static str,
) -> Result<Value, FormatError> {
    let missing = |field| FormatError::MissingField {
        block: kind.to_string(),
        field,
    };
    let data = data.ok_or_else(|| missing("data"))?;
    if data.get(required).is_none() {
        return Err(missing(required));
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn block_kind_wire_names() {
        assert_eq!(BlockKind::Heading(3).to_string(), "heading3");
        assert_eq!(BlockKind::OListItem.to_string(), "o-list-item");
        assert_eq!("list-item".parse::<BlockKind>().unwrap(), BlockKind::ListItem);
        assert_eq!("heading6".parse::<BlockKind>().unwrap(), BlockKind::Heading(6));
    }

    #[test]
    fn block_kind_rejects_unknown_names() {
        assert!("heading7".parse::<BlockKind>().is_err());
        assert!("heading0".parse::<BlockKind>().is_err());
        assert!("table".parse::<BlockKind>().is_err());
    }

    #[test]
    fn span_kinds_sort_by_wire_name() {
        let mut kinds = vec![SpanKind::Strong, SpanKind::Hyperlink, SpanKind::Em];
        kinds.sort();
        assert_eq!(kinds, vec![SpanKind::Em, SpanKind::Hyperlink, SpanKind::Strong]);
    }

    #[test]
    fn serializes_text_block_in_nested_shape() {
        let block = Block::new(
            BlockKind::Heading(2),
            Content::new("Title", vec![Span::new(SpanKind::Em, 0, 5)]),
        );
        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({
                "type": "heading2",
                "content": {
                    "text": "Title",
                    "spans": [{ "type": "em", "start": 0, "end": 5 }]
                }
            })
        );
    }

    #[test]
    fn serializes_linked_image() {
        let block = Block::image("/img.png", "alt", Some("https://example.net/".into()));
        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({
                "type": "image",
                "content": { "text": "", "spans": [] },
                "data": {
                    "origin": { "url": "/img.png" },
                    "alt": "alt",
                    "linkTo": { "url": "https://example.net/" }
                }
            })
        );
    }

    #[test]
    fn deserializes_media_by_block_kind() {
        let block: Block = serde_json::from_value(json!({
            "type": "embed",
            "content": { "text": "", "spans": [] },
            "data": { "embed_url": "https://youtu.be/x", "type": "video" }
        }))
        .unwrap();
        assert_eq!(block, Block::embed("https://youtu.be/x", "video"));
    }

    #[test]
    fn ignores_data_on_text_blocks() {
        let block: Block = serde_json::from_value(json!({
            "type": "paragraph",
            "content": { "text": "Hi", "spans": [] },
            "data": { "anything": true }
        }))
        .unwrap();
        assert_eq!(block.media, None);
    }

    #[test]
    fn image_without_data_is_an_error() {
        let result = serde_json::from_value::<Block>(json!({ "type": "image" }));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("image block is missing 'data'"), "{}", message);
    }

    #[test]
    fn media_without_its_key_field_is_an_error() {
        let image = serde_json::from_value::<Block>(json!({ "type": "image", "data": { "alt": "x" } }));
        let message = image.unwrap_err().to_string();
        assert!(message.contains("image block is missing 'origin'"), "{}", message);

        let embed = serde_json::from_value::<Block>(json!({ "type": "embed", "data": {} }));
        let message = embed.unwrap_err().to_string();
        assert!(message.contains("embed block is missing 'embed_url'"), "{}", message);
    }
}
