//! Knobs that shape encoder output
//!
//! Defaults reproduce the reference behaviour; `prismic-config` layers user
//! files on top of them.

use serde::Deserialize;

use crate::ir::blocks::MAX_HEADING_LEVEL;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    /// Headings deeper than this are clamped (never above 6)
    pub max_heading_level: u8,
    /// Raw HTML tags that encode as `embed` blocks
    pub embed_tags: Vec<String>,
    /// Value of the embed `type` attribute
    pub embed_type: String,
    /// Sort spans by `(type, start)` after extraction
    pub sort_spans: bool,
    /// Pretty-print serialized JSON
    pub pretty: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        CodecOptions {
            max_heading_level: MAX_HEADING_LEVEL,
            embed_tags: vec!["iframe".to_string()],
            embed_type: "link".to_string(),
            sort_spans: true,
            pretty: false,
        }
    }
}

impl CodecOptions {
    /// The clamp ceiling actually applied
    pub fn heading_ceiling(&self) -> u8 {
        self.max_heading_level.clamp(1, MAX_HEADING_LEVEL)
    }

    pub fn is_embed_tag(&self, tag: &str) -> bool {
        self.embed_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}
