//! The equivalence test deciding which node pairs may combine.
//!
//! Contract:
//! - Symmetric and total; consults the two nodes' tag, attributes and
//!   immediate text only, never deeper structure.
//! - Attribute comparison is order-independent (keys are unique, so equal
//!   length plus one-way containment suffices).
//! - Text and comment nodes need identical, non-blank content; two blank
//!   text nodes are unrelated, not equal.
//! - Elements additionally compare their own direct text (trimmed), so two
//!   `<div>NOTE A</div>` / `<div>NOTE B</div>` leaves stay distinct while
//!   structurally identical wrappers still pair up.

use html::Node;
use std::sync::Arc;

pub fn can_merge(a: &Node, b: &Node) -> bool {
    match (a, b) {
        // one document root per tree; the two roots always merge
        (Node::Document { .. }, Node::Document { .. }) => true,
        (
            Node::Element {
                name: name_a,
                attributes: attrs_a,
                ..
            },
            Node::Element {
                name: name_b,
                attributes: attrs_b,
                ..
            },
        ) => {
            name_a == name_b
                && attrs_set_equal(attrs_a, attrs_b)
                && own_text(a).trim() == own_text(b).trim()
        }
        (Node::Text { text: text_a }, Node::Text { text: text_b })
        | (Node::Comment { text: text_a }, Node::Comment { text: text_b }) => {
            text_a == text_b && !text_a.trim().is_empty()
        }
        _ => false,
    }
}

/// Order-independent attribute equality.
pub(crate) fn attrs_set_equal(
    a: &[(Arc<str>, Option<String>)],
    b: &[(Arc<str>, Option<String>)],
) -> bool {
    a.len() == b.len()
        && a.iter()
            .all(|(key, value)| b.iter().any(|(other_key, other_value)| {
                key == other_key && value == other_value
            }))
}

/// Concatenated content of the node's direct text children.
fn own_text(node: &Node) -> String {
    let mut out = String::new();
    for child in node.children() {
        if let Node::Text { text } = child {
            out.push_str(text);
        }
    }
    out
}
