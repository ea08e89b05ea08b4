//! Converts normalized tree nodes into flat blocks.
//!
//! # The High-Level Concept
//!
//! A flat block stores its inline formatting as offset ranges over a single
//! text string. Walking a block's inline subtree in order and appending every
//! leaf to that string gives us the text; recording the length before and
//! after each mark gives us the span. Nesting in the tree becomes containment
//! of ranges, so same-kind spans can never cross.
//!
//! # The Algorithm
//!
//! 1. **Top-level dispatch:** each node of a normalized forest becomes zero
//!    or more blocks (a list yields one block per item, unsupported
//!    constructs yield none and a diagnostic).
//!
//! 2. **Inline extraction:** an [`Extractor`] walks children left to right:
//!    - text-like leaves are appended (entities and symbols resolved first)
//!    - marks record `start = len`, recurse, then push `[start, len)`
//!    - block containers left inside an item are transparent
//!
//! 3. **Completion:** spans are sorted by `(type, start)` unless disabled
//!    in [`CodecOptions`].
//!
//! Lengths are counted in `char`s so offsets agree with the decoder.

use crate::diagnostics::{Construct, Conversion, Diagnostic, Diagnostics};
use crate::ir::blocks::{Block, BlockKind, Content, LinkData, Span, SpanKind};
use crate::ir::nodes::{Document, HtmlElement, ListKind, Node};
use crate::ir::symbols::resolve_entity;
use crate::mappings::normalize::normalize_nodes;
use crate::options::CodecOptions;

/// Normalize and encode a whole document.
pub fn to_blocks(document: Document, options: &CodecOptions) -> Conversion<Vec<Block>> {
    let mut diagnostics = Diagnostics::new();
    let nodes = normalize_nodes(document.children, &mut diagnostics);
    let blocks = encode(&nodes, options, &mut diagnostics);
    log::debug!(
        "encoded {} top-level nodes into {} blocks ({} diagnostics)",
        nodes.len(),
        blocks.len(),
        diagnostics.len()
    );
    diagnostics.finish(blocks)
}

/// Encode an already normalized forest.
pub fn encode(nodes: &[Node], options: &CodecOptions, diagnostics: &mut Diagnostics) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(nodes.len());
    for node in nodes {
        encode_node(node, options, diagnostics, &mut blocks);
    }
    blocks
}

fn encode_node(
    node: &Node,
    options: &CodecOptions,
    diagnostics: &mut Diagnostics,
    blocks: &mut Vec<Block>,
) {
    match node {
        Node::Heading { level, children } => {
            let clamped = (*level).clamp(1, options.heading_ceiling());
            if clamped != *level {
                diagnostics.push(Diagnostic::HeadingLevelClamped {
                    from: *level,
                    to: clamped,
                });
            }
            let content = extract(children, options, diagnostics);
            blocks.push(Block::new(BlockKind::Heading(clamped), content));
        }
        Node::Paragraph { children } => {
            let content = extract(children, options, diagnostics);
            push_paragraph(blocks, content);
        }
        Node::List { kind, items } => {
            for item in items {
                blocks.push(encode_item(item, *kind, options, diagnostics));
            }
        }
        Node::ListItem { .. } => {
            blocks.push(encode_item(node, ListKind::Unordered, options, diagnostics));
        }
        Node::Blockquote { children } => {
            let content = extract(children, options, diagnostics);
            blocks.push(Block::new(BlockKind::Preformatted, content));
        }
        Node::CodeBlock { code } => {
            blocks.push(Block::new(
                BlockKind::Preformatted,
                Content::new(code.clone(), Vec::new()),
            ));
        }
        Node::Image(image) => {
            blocks.push(Block::image(image.src.clone(), image.alt.clone(), None));
        }
        Node::Link(link) => match link.children.as_slice() {
            [Node::Image(image)] => blocks.push(Block::image(
                image.src.clone(),
                image.alt.clone(),
                Some(link.href.clone()),
            )),
            _ => push_paragraph(blocks, extract_one(node, options, diagnostics)),
        },
        Node::Html(element) => {
            if options.is_embed_tag(&element.tag) {
                let url = element.attr("src").unwrap_or_default();
                blocks.push(Block::embed(url, options.embed_type.clone()));
            } else {
                diagnostics.push(Diagnostic::Unsupported(Construct::HtmlElements));
            }
        }
        Node::Table => diagnostics.push(Diagnostic::Unsupported(Construct::Table)),
        Node::DefinitionList => {
            diagnostics.push(Diagnostic::Unsupported(Construct::DefinitionList))
        }
        Node::Math { .. } => diagnostics.push(Diagnostic::Unsupported(Construct::Math)),
        Node::Comment { .. } => diagnostics.push(Diagnostic::Unsupported(Construct::Comment)),
        Node::XmlComment { .. } => {
            diagnostics.push(Diagnostic::Unsupported(Construct::XmlComment))
        }
        Node::Raw { .. } => diagnostics.push(Diagnostic::Unsupported(Construct::Raw)),
        Node::HorizontalRule | Node::Blank | Node::LineBreak => {}
        Node::Text(_)
        | Node::Strong { .. }
        | Node::Emphasis { .. }
        | Node::InlineCode { .. }
        | Node::Entity { .. }
        | Node::Typographic(_)
        | Node::SmartQuote(_)
        | Node::Footnote { .. }
        | Node::Abbreviation { .. } => {
            // A stray top-level inline node becomes a paragraph of its own
            push_paragraph(blocks, extract_one(node, options, diagnostics));
        }
    }
}

fn encode_item(
    item: &Node,
    kind: ListKind,
    options: &CodecOptions,
    diagnostics: &mut Diagnostics,
) -> Block {
    let content = match item {
        Node::ListItem { children } => extract(children, options, diagnostics),
        other => extract_one(other, options, diagnostics),
    };
    Block::new(BlockKind::list_item(kind), content)
}

/// Paragraphs without text carry nothing and are not emitted
fn push_paragraph(blocks: &mut Vec<Block>, content: Content) {
    if !content.text.is_empty() {
        blocks.push(Block::new(BlockKind::Paragraph, content));
    }
}

fn extract_one(node: &Node, options: &CodecOptions, diagnostics: &mut Diagnostics) -> Content {
    extract(std::slice::from_ref(node), options, diagnostics)
}

fn extract(children: &[Node], options: &CodecOptions, diagnostics: &mut Diagnostics) -> Content {
    let mut extractor = Extractor::new(diagnostics);
    extractor.walk(children);
    extractor.finish(options.sort_spans)
}

/// Accumulates the text and spans of one block
struct Extractor<'a> {
    diagnostics: &'a mut Diagnostics,
    text: String,
    /// Length of `text` in chars
    len: usize,
    spans: Vec<Span>,
}

impl<'a> Extractor<'a> {
    fn new(diagnostics: &'a mut Diagnostics) -> Self {
        Extractor {
            diagnostics,
            text: String::new(),
            len: 0,
            spans: Vec::new(),
        }
    }

    fn walk(&mut self, nodes: &[Node]) {
        for node in nodes {
            self.node(node);
        }
    }

    fn push_str(&mut self, value: &str) {
        self.text.push_str(value);
        self.len += value.chars().count();
    }

    fn mark(&mut self, kind: SpanKind, data: Option<LinkData>, children: &[Node]) {
        let start = self.len;
        self.walk(children);
        // Marks left without text (their content was lifted or dropped) vanish
        if self.len > start {
            self.spans.push(Span {
                kind,
                start,
                end: self.len,
                data,
            });
        }
    }

    fn node(&mut self, node: &Node) {
        match node {
            Node::Text(value) => self.push_str(value),
            Node::LineBreak => self.push_str("\n"),
            Node::Strong { children } => self.mark(SpanKind::Strong, None, children),
            Node::Emphasis { children } => self.mark(SpanKind::Em, None, children),
            Node::Link(link) => {
                let data = LinkData {
                    url: link.href.clone(),
                    target: link.target.clone(),
                };
                self.mark(SpanKind::Hyperlink, Some(data), &link.children);
            }
            Node::Entity { name } => self.push_str(&resolve_entity(name)),
            Node::Typographic(symbol) => self.push_str(symbol.as_str()),
            Node::SmartQuote(quote) => {
                self.text.push(quote.as_char());
                self.len += 1;
            }
            Node::InlineCode { code } => {
                self.diagnostics
                    .push(Diagnostic::Unsupported(Construct::InlineCode));
                self.push_str(code);
            }
            Node::Abbreviation { text } => {
                self.diagnostics
                    .push(Diagnostic::Unsupported(Construct::Abbreviation));
                self.push_str(text);
            }
            Node::CodeBlock { code } => {
                self.diagnostics
                    .push(Diagnostic::Unsupported(Construct::NestedCodeBlock));
                self.push_str(code);
            }
            Node::Footnote { .. } => self
                .diagnostics
                .push(Diagnostic::Unsupported(Construct::Footnote)),
            Node::XmlComment { .. } => self
                .diagnostics
                .push(Diagnostic::Unsupported(Construct::XmlComment)),
            Node::Comment { .. } => self
                .diagnostics
                .push(Diagnostic::Unsupported(Construct::Comment)),
            Node::Table => self.diagnostics.push(Diagnostic::Unsupported(Construct::Table)),
            Node::DefinitionList => self
                .diagnostics
                .push(Diagnostic::Unsupported(Construct::DefinitionList)),
            Node::Math { .. } => self.diagnostics.push(Diagnostic::Unsupported(Construct::Math)),
            Node::Raw { .. } => self.diagnostics.push(Diagnostic::Unsupported(Construct::Raw)),
            Node::Html(element) => self.html(element),
            Node::Paragraph { children }
            | Node::ListItem { children }
            | Node::Blockquote { children }
            | Node::Heading { children, .. } => self.walk(children),
            Node::List { items, .. } => self.walk(items),
            // Media never survives normalization below the top level
            Node::Image(_) | Node::HorizontalRule | Node::Blank => {}
        }
    }

    fn html(&mut self, element: &HtmlElement) {
        match element.tag.to_ascii_lowercase().as_str() {
            "a" => {
                let data = LinkData {
                    url: element.attr("href").unwrap_or_default().to_string(),
                    target: element.attr("target").map(str::to_string),
                };
                self.mark(SpanKind::Hyperlink, Some(data), &element.children);
            }
            "strong" => self.mark(SpanKind::Strong, None, &element.children),
            "em" => self.mark(SpanKind::Em, None, &element.children),
            "br" => self.push_str("\n"),
            "p" => self.walk(&element.children),
            _ => self
                .diagnostics
                .push(Diagnostic::UnsupportedHtmlElement(element.tag.clone())),
        }
    }

    fn finish(mut self, sort_spans: bool) -> Content {
        if sort_spans {
            self.spans.sort_by_key(|span| (span.kind, span.start));
        }
        Content::new(self.text, self.spans)
    }
}
