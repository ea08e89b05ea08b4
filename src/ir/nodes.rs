//! The nested document tree
//!
//! This is the representation supplied by (and handed back to) whatever
//! parses or renders markdown/HTML. Block and inline kinds share one closed
//! enum so that structural passes (normalization in particular) can walk
//! mixed content without special cases, and so that adding a kind forces
//! every `match` in the codec to handle it.

use std::collections::BTreeMap;

/// Root of a document tree
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Document { children }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Ordered,
    Unordered,
}

/// An image reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub src: String,
    pub alt: String,
}

/// A hyperlink around inline content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub target: Option<String>,
    pub children: Vec<Node>,
}

/// A raw HTML element, at block or inline level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlElement {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub children: Vec<Node>,
}

impl HtmlElement {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// Typographic replacements produced by smart-punctuation parsers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypographicSymbol {
    Mdash,
    Ndash,
    Hellip,
    Laquo,
    Raquo,
    LaquoSpace,
    RaquoSpace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartQuote {
    Lsquo,
    Rsquo,
    Ldquo,
    Rdquo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    // Block kinds
    Heading { level: u8, children: Vec<Node> },
    Paragraph { children: Vec<Node> },
    List { kind: ListKind, items: Vec<Node> },
    ListItem { children: Vec<Node> },
    Blockquote { children: Vec<Node> },
    CodeBlock { code: String },
    Image(Image),
    Html(HtmlElement),
    HorizontalRule,
    Blank,
    Table,
    DefinitionList,
    Math { source: String },
    Comment { text: String },
    XmlComment { text: String },
    Raw { text: String },

    // Inline kinds
    Text(String),
    Strong { children: Vec<Node> },
    Emphasis { children: Vec<Node> },
    Link(Link),
    LineBreak,
    InlineCode { code: String },
    /// A named or numeric HTML entity, without the `&` and `;`
    Entity { name: String },
    Typographic(TypographicSymbol),
    SmartQuote(SmartQuote),
    Footnote { name: String },
    Abbreviation { text: String },
}

impl Node {
    pub fn text(value: impl Into<String>) -> Node {
        Node::Text(value.into())
    }

    pub fn paragraph(children: Vec<Node>) -> Node {
        Node::Paragraph { children }
    }

    pub fn heading(level: u8, children: Vec<Node>) -> Node {
        Node::Heading { level, children }
    }

    pub fn strong(children: Vec<Node>) -> Node {
        Node::Strong { children }
    }

    pub fn emphasis(children: Vec<Node>) -> Node {
        Node::Emphasis { children }
    }

    pub fn link(href: impl Into<String>, children: Vec<Node>) -> Node {
        Node::Link(Link {
            href: href.into(),
            target: None,
            children,
        })
    }

    pub fn image(src: impl Into<String>, alt: impl Into<String>) -> Node {
        Node::Image(Image {
            src: src.into(),
            alt: alt.into(),
        })
    }

    pub fn list(kind: ListKind, items: Vec<Node>) -> Node {
        Node::List { kind, items }
    }

    pub fn list_item(children: Vec<Node>) -> Node {
        Node::ListItem { children }
    }

    pub fn html(tag: impl Into<String>, attrs: &[(&str, &str)], children: Vec<Node>) -> Node {
        Node::Html(HtmlElement {
            tag: tag.into(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            children,
        })
    }

    /// Mutable access to the ordered children of container nodes
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Heading { children, .. }
            | Node::Paragraph { children }
            | Node::ListItem { children }
            | Node::Blockquote { children }
            | Node::Strong { children }
            | Node::Emphasis { children } => Some(children),
            Node::List { items, .. } => Some(items),
            Node::Link(link) => Some(&mut link.children),
            Node::Html(element) => Some(&mut element.children),
            Node::CodeBlock { .. }
            | Node::Image(_)
            | Node::HorizontalRule
            | Node::Blank
            | Node::Table
            | Node::DefinitionList
            | Node::Math { .. }
            | Node::Comment { .. }
            | Node::XmlComment { .. }
            | Node::Raw { .. }
            | Node::Text(_)
            | Node::LineBreak
            | Node::InlineCode { .. }
            | Node::Entity { .. }
            | Node::Typographic(_)
            | Node::SmartQuote(_)
            | Node::Footnote { .. }
            | Node::Abbreviation { .. } => None,
        }
    }

    /// A bare image, or a link whose only child is an image
    pub fn is_media(&self) -> bool {
        match self {
            Node::Image(_) => true,
            Node::Link(link) => matches!(link.children.as_slice(), [Node::Image(_)]),
            _ => false,
        }
    }
}
