//! Literal text for entities, typographic symbols and smart quotes
//!
//! Flat blocks only carry plain text, so every symbolic node in the tree is
//! resolved to the characters it stands for.

use crate::ir::nodes::{SmartQuote, TypographicSymbol};

impl TypographicSymbol {
    pub fn as_str(self) -> &'static str {
        match self {
            TypographicSymbol::Mdash => "\u{2014}",
            TypographicSymbol::Ndash => "\u{2013}",
            TypographicSymbol::Hellip => "\u{2026}",
            TypographicSymbol::Laquo => "\u{00ab}",
            TypographicSymbol::Raquo => "\u{00bb}",
            TypographicSymbol::LaquoSpace => "\u{00ab}\u{00a0}",
            TypographicSymbol::RaquoSpace => "\u{00a0}\u{00bb}",
        }
    }
}

impl SmartQuote {
    pub fn as_char(self) -> char {
        match self {
            SmartQuote::Lsquo => '\u{2018}',
            SmartQuote::Rsquo => '\u{2019}',
            SmartQuote::Ldquo => '\u{201c}',
            SmartQuote::Rdquo => '\u{201d}',
        }
    }
}

/// Resolve an entity name (`nbsp`, `#8212`, `#x2014`) to its characters.
///
/// Names the decoder does not know are kept literally, `&name;` included.
pub fn resolve_entity(name: &str) -> String {
    let literal = format!("&{};", name);
    html_escape::decode_html_entities(&literal).into_owned()
}
