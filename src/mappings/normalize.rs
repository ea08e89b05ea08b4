//! Lifts elements the flat model cannot nest up to the top level.
//!
//! # The Problem
//!
//! Every top-level node must encode as (at most) a run of flat blocks, and a
//! flat block cannot contain another block. Trees coming from markdown or
//! HTML happily nest images inside paragraphs, lists inside list items and
//! headings inside quotes.
//!
//! # The Algorithm
//!
//! First, `Blank` nodes are removed from the whole tree, so that a link
//! holding a blank and an image is still seen as a linked image.
//!
//! Then, for each top-level node, walk its subtree depth-first and rebuild
//! every container's child list:
//!
//! 1. Media (an image, or a link whose only child is an image) is detached
//!    and queued. If it shared its container with anything else, a
//!    [`Diagnostic::MediaMoved`] is raised.
//! 2. Lists and headings are detached and queued with a diagnostic. The walk
//!    continues inside the detached node, so anything nested deeper is queued
//!    right after it.
//! 3. Everything else is kept and walked.
//!
//! The queue is emitted right after the top-level node it came from, in the
//! order nodes were found. Media is never walked into, which keeps the pass
//! idempotent: a second run finds nothing left to lift.

use crate::diagnostics::{Conversion, Diagnostic, Diagnostics};
use crate::ir::nodes::{Document, Node};

/// Normalize a document into top-level nodes that each encode on their own.
pub fn normalize(document: Document) -> Conversion<Vec<Node>> {
    let mut diagnostics = Diagnostics::new();
    let nodes = normalize_nodes(document.children, &mut diagnostics);
    diagnostics.finish(nodes)
}

/// Normalize a list of top-level nodes, recording into `diagnostics`.
pub fn normalize_nodes(children: Vec<Node>, diagnostics: &mut Diagnostics) -> Vec<Node> {
    let children = remove_blanks(children);
    let mut top = Vec::with_capacity(children.len());

    for child in children {
        if child.is_media() {
            top.push(child);
            continue;
        }

        let mut lifted = Vec::new();
        top.push(walk(child, &mut lifted, diagnostics));
        top.extend(lifted);
    }

    top
}

fn remove_blanks(children: Vec<Node>) -> Vec<Node> {
    children
        .into_iter()
        .filter(|child| !matches!(child, Node::Blank))
        .map(|mut child| {
            if let Some(inner) = child.children_mut() {
                let taken = std::mem::take(inner);
                *inner = remove_blanks(taken);
            }
            child
        })
        .collect()
}

fn walk(mut node: Node, lifted: &mut Vec<Node>, diagnostics: &mut Diagnostics) -> Node {
    if let Some(children) = node.children_mut() {
        let original = std::mem::take(children);
        *children = walk_children(original, lifted, diagnostics);
    }
    node
}

fn walk_children(
    children: Vec<Node>,
    lifted: &mut Vec<Node>,
    diagnostics: &mut Diagnostics,
) -> Vec<Node> {
    let crowded = children.len() > 1;
    let mut kept = Vec::with_capacity(children.len());

    for child in children {
        match child {
            media if media.is_media() => {
                if crowded {
                    diagnostics.push(Diagnostic::MediaMoved);
                }
                lifted.push(media);
            }
            Node::List { .. } | Node::Heading { .. } => {
                diagnostics.push(if matches!(child, Node::List { .. }) {
                    Diagnostic::ListMoved
                } else {
                    Diagnostic::HeadingMoved
                });
                // Whatever is nested inside goes after the detached node
                let mut deeper = Vec::new();
                let detached = walk(child, &mut deeper, diagnostics);
                lifted.push(detached);
                lifted.extend(deeper);
            }
            other => kept.push(walk(other, lifted, diagnostics)),
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::nodes::ListKind;

    fn item(text: &str, nested: Option<Node>) -> Node {
        let mut children = vec![Node::paragraph(vec![Node::text(text)])];
        children.extend(nested);
        Node::list_item(children)
    }

    fn ul(items: Vec<Node>) -> Node {
        Node::list(ListKind::Unordered, items)
    }

    #[test]
    fn drops_blank_nodes_everywhere() {
        let doc = Document::new(vec![
            Node::Blank,
            Node::paragraph(vec![Node::text("a"), Node::Blank]),
            Node::Blank,
        ]);

        let result = normalize(doc);
        assert_eq!(result.value, vec![Node::paragraph(vec![Node::text("a")])]);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn lone_image_is_lifted_silently() {
        let doc = Document::new(vec![Node::paragraph(vec![Node::image("/img.png", "alt")])]);

        let result = normalize(doc);
        assert_eq!(
            result.value,
            vec![Node::paragraph(vec![]), Node::image("/img.png", "alt")]
        );
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn linked_image_is_lifted_as_a_unit() {
        let linked = Node::link("https://example.net/", vec![Node::image("/img.png", "alt")]);
        let doc = Document::new(vec![Node::paragraph(vec![linked.clone()])]);

        let result = normalize(doc);
        assert_eq!(result.value, vec![Node::paragraph(vec![]), linked]);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn blank_inside_linked_image_keeps_the_link() {
        let doc = Document::new(vec![Node::paragraph(vec![Node::link(
            "https://example.net/",
            vec![Node::Blank, Node::image("/img.png", "alt")],
        )])]);

        let result = normalize(doc);
        assert_eq!(
            result.value,
            vec![
                Node::paragraph(vec![]),
                Node::link("https://example.net/", vec![Node::image("/img.png", "alt")]),
            ]
        );
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn crowded_images_raise_one_diagnostic_each() {
        let doc = Document::new(vec![Node::paragraph(vec![
            Node::image("/img.png", ""),
            Node::image("/img2.png", ""),
        ])]);

        let result = normalize(doc);
        assert_eq!(result.value.len(), 3);
        assert_eq!(
            result.diagnostics,
            vec![Diagnostic::MediaMoved, Diagnostic::MediaMoved]
        );
    }

    #[test]
    fn nested_list_is_lifted_after_its_parent() {
        let doc = Document::new(vec![ul(vec![item("item1", Some(ul(vec![item("item2", None)])))])]);

        let result = normalize(doc);
        assert_eq!(
            result.value,
            vec![
                ul(vec![item("item1", None)]),
                ul(vec![item("item2", None)]),
            ]
        );
        assert_eq!(result.diagnostics, vec![Diagnostic::ListMoved]);
    }

    #[test]
    fn three_levels_lift_once_per_level() {
        let deepest = ul(vec![item("item3", None)]);
        let middle = ul(vec![item("item2", Some(deepest))]);
        let doc = Document::new(vec![ul(vec![item("item1", Some(middle))])]);

        let result = normalize(doc);
        assert_eq!(
            result.value,
            vec![
                ul(vec![item("item1", None)]),
                ul(vec![item("item2", None)]),
                ul(vec![item("item3", None)]),
            ]
        );
        assert_eq!(
            result.diagnostics,
            vec![Diagnostic::ListMoved, Diagnostic::ListMoved]
        );
    }

    #[test]
    fn heading_inside_list_item_follows_the_list() {
        let heading = Node::heading(2, vec![Node::text("Title")]);
        let doc = Document::new(vec![ul(vec![item("entry", Some(heading.clone()))])]);

        let result = normalize(doc);
        assert_eq!(result.value, vec![ul(vec![item("entry", None)]), heading]);
        assert_eq!(result.diagnostics, vec![Diagnostic::HeadingMoved]);
    }

    #[test]
    fn top_level_structure_is_untouched() {
        let doc = Document::new(vec![
            Node::heading(1, vec![Node::text("Title")]),
            ul(vec![item("a", None)]),
            Node::image("/img.png", "alt"),
        ]);

        let result = normalize(doc.clone());
        assert_eq!(result.value, doc.children);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn normalizing_twice_changes_nothing() {
        let doc = Document::new(vec![
            ul(vec![item(
                "one",
                Some(ul(vec![item("two", Some(Node::image("/a.png", "a")))])),
            )]),
            Node::Blockquote {
                children: vec![
                    Node::heading(3, vec![Node::text("quoted")]),
                    Node::paragraph(vec![
                        Node::text("see"),
                        Node::link("/x", vec![Node::image("/b.png", "b")]),
                    ]),
                ],
            },
        ]);

        let once = normalize(doc).value;
        let twice = normalize(Document::new(once.clone()));
        assert_eq!(twice.value, once);
        assert!(twice.diagnostics.is_empty());
    }
}
