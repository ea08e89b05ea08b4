//! Converts flat blocks back to a nested tree.
//!
//! # The High-Level Concept
//!
//! Block structure is easy: every block maps to one top-level node, except
//! list items, which are regrouped into lists by looking at the node most
//! recently appended.
//!
//! The inline structure is the real work. A block's spans are unordered
//! `[start, end)` ranges over its text, and we need a tree of marks. The
//! algorithm uses a stack of open frames, one per span currently covering
//! the cursor. Characters go into the frame on top of the stack; when a span
//! ends its frame is popped and attached to whatever is below it.
//!
//! # The Algorithm
//!
//! 1. **Sanitize:** clamp ends to the text length, drop empty ranges, and
//!    order spans by `start`, then by descending `end` so that the span
//!    closing last is opened first (it is the outer one). Ties keep their
//!    original order.
//!
//! 2. **Sweep** `i` over `0..=len`:
//!    - close every frame ending at `i`, innermost first
//!    - open every span starting at `i`
//!    - append the char at `i` to the top frame, merging into the previous
//!      text leaf when there is one
//!
//! 3. **Crossing spans:** when a frame below the top ends first, the frames
//!    above it are closed, the ending frame is closed, and the others are
//!    reopened with the same mark. The crossing span ends up split in two.
//!
//! Decoding never fails; the worst a bad span list can do is lose marks.

use std::cmp::Reverse;

use crate::ir::blocks::{Block, BlockKind, Content, LinkData, Media, Span, SpanKind};
use crate::ir::nodes::{Document, Link, Node};

/// Converts a list of flat blocks into a document tree.
pub fn decode(blocks: &[Block]) -> Document {
    let mut children: Vec<Node> = Vec::with_capacity(blocks.len());

    for block in blocks {
        match block.kind {
            BlockKind::Heading(level) => {
                children.push(Node::heading(level, inlines(&block.content)));
            }
            BlockKind::Paragraph => children.push(Node::paragraph(inlines(&block.content))),
            BlockKind::Preformatted => children.push(Node::Blockquote {
                children: inlines(&block.content),
            }),
            BlockKind::ListItem | BlockKind::OListItem => {
                let kind = match block.kind.list_kind() {
                    Some(kind) => kind,
                    None => continue,
                };
                let item = Node::list_item(inlines(&block.content));
                match children.last_mut() {
                    Some(Node::List { kind: last, items }) if *last == kind => items.push(item),
                    _ => children.push(Node::list(kind, vec![item])),
                }
            }
            BlockKind::Image | BlockKind::Embed => match &block.media {
                Some(media) => children.push(media_node(media)),
                None => log::debug!("skipping {} block without data", block.kind),
            },
        }
    }

    log::debug!(
        "decoded {} blocks into {} top-level nodes",
        blocks.len(),
        children.len()
    );
    Document::new(children)
}

fn media_node(media: &Media) -> Node {
    match media {
        Media::Image(data) => {
            let image = Node::image(
                data.origin.url.clone(),
                data.alt.clone().unwrap_or_default(),
            );
            let inner = match &data.link_to {
                Some(link_to) => Node::link(link_to.url.clone(), vec![image]),
                None => image,
            };
            Node::paragraph(vec![inner])
        }
        Media::Embed(data) => Node::html("iframe", &[("src", data.embed_url.as_str())], vec![]),
    }
}

/// An open span on the stack
struct Frame {
    kind: SpanKind,
    data: Option<LinkData>,
    end: usize,
    children: Vec<Node>,
}

impl Frame {
    fn open(span: &Span) -> Self {
        Frame {
            kind: span.kind,
            data: span.data.clone(),
            end: span.end,
            children: Vec::new(),
        }
    }

    /// An empty frame carrying the same mark
    fn reopened(&self) -> Self {
        Frame {
            kind: self.kind,
            data: self.data.clone(),
            end: self.end,
            children: Vec::new(),
        }
    }

    fn into_node(self) -> Node {
        match self.kind {
            SpanKind::Em => Node::Emphasis {
                children: self.children,
            },
            SpanKind::Strong => Node::Strong {
                children: self.children,
            },
            SpanKind::Hyperlink => {
                let (href, target) = match self.data {
                    Some(data) => (data.url, data.target),
                    None => (String::new(), None),
                };
                Node::Link(Link {
                    href,
                    target,
                    children: self.children,
                })
            }
        }
    }
}

/// Rebuild the inline tree of one block
pub fn inlines(content: &Content) -> Vec<Node> {
    let chars: Vec<char> = content.text.chars().collect();
    let spans = sanitize(&content.spans, chars.len());

    let mut root = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut pending = spans.iter().peekable();

    for i in 0..=chars.len() {
        close_at(i, &mut stack, &mut root);

        while let Some(span) = pending.next_if(|span| span.start == i) {
            stack.push(Frame::open(span));
        }

        if let Some(&c) = chars.get(i) {
            let target = match stack.last_mut() {
                Some(frame) => &mut frame.children,
                None => &mut root,
            };
            push_char(target, c);
        }
    }

    // Ends are clamped to the length, so the final sweep closed everything
    while let Some(frame) = stack.pop() {
        attach(frame.into_node(), &mut stack, &mut root);
    }

    root
}

fn sanitize(spans: &[Span], len: usize) -> Vec<Span> {
    let mut kept: Vec<Span> = spans
        .iter()
        .filter_map(|span| {
            let end = span.end.min(len);
            (span.start < end).then(|| Span {
                end,
                ..span.clone()
            })
        })
        .collect();

    if kept.len() < spans.len() {
        log::debug!("dropped {} empty or out-of-range spans", spans.len() - kept.len());
    }

    kept.sort_by_key(|span| (span.start, Reverse(span.end)));
    kept
}

fn close_at(i: usize, stack: &mut Vec<Frame>, root: &mut Vec<Node>) {
    while let Some(position) = stack.iter().rposition(|frame| frame.end == i) {
        let mut reopen = Vec::new();
        while stack.len() > position + 1 {
            if let Some(inner) = stack.pop() {
                reopen.push(inner.reopened());
                attach(inner.into_node(), stack, root);
            }
        }
        if let Some(ending) = stack.pop() {
            attach(ending.into_node(), stack, root);
        }
        stack.extend(reopen.into_iter().rev());
    }
}

fn attach(node: Node, stack: &mut [Frame], root: &mut Vec<Node>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => root.push(node),
    }
}

fn push_char(target: &mut Vec<Node>, c: char) {
    if let Some(Node::Text(text)) = target.last_mut() {
        text.push(c);
    } else {
        target.push(Node::Text(c.to_string()));
    }
}
