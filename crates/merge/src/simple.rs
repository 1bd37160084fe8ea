//! The cheap, one-level merge strategy.
//!
//! Contract:
//! - Items are the children of the second document's content root (its
//!   `<body>` when present, else the document root).
//! - An element item is placed by identity: the first node in the first
//!   document with the same tag name and equal `id` and `class` attributes
//!   receives clones of the item's children. No group partitioning, no
//!   recursion into the placed content.
//! - Anything without an identity match (and every non-element item) is
//!   appended under the first document's container root: its `<body>`,
//!   created under `<html>` when that wrapper exists, else the document
//!   root itself.
//! - Works on private clones; the caller's trees are never touched.

use html::Node;
use std::sync::Arc;

pub(crate) fn merge_simple_docs(first: &Node, second: &Node) -> Node {
    let mut out = first.clone();
    let items: Vec<Node> = content_root(second).children().to_vec();

    for item in items {
        if matches!(item, Node::Element { .. }) {
            if let Some(path) = find_path(&out, &|node| identity_match(node, &item)) {
                let target = node_at_path_mut(&mut out, &path);
                if let Some(children) = target.children_mut() {
                    children.extend(item.children().iter().cloned());
                }
                continue;
            }
            log::debug!(
                target: "merge.simple",
                "no identity match for <{}>; appending at container root",
                item.tag_name()
            );
        }
        attach_to_container(&mut out, item);
    }
    out
}

fn content_root(doc: &Node) -> &Node {
    fn find_body(node: &Node) -> Option<&Node> {
        if node.is_element_named("body") {
            return Some(node);
        }
        node.children().iter().find_map(find_body)
    }
    find_body(doc).unwrap_or(doc)
}

/// Tag name plus `id` and `class` equality; the identity the strategy
/// matches elements by.
fn identity_match(candidate: &Node, item: &Node) -> bool {
    matches!(candidate, Node::Element { .. })
        && candidate.tag_name() == item.tag_name()
        && candidate.attr("id") == item.attr("id")
        && candidate.attr("class") == item.attr("class")
}

/// Depth-first path (child indices) to the first node satisfying the
/// predicate.
fn find_path(root: &Node, matches: &impl Fn(&Node) -> bool) -> Option<Vec<usize>> {
    fn walk(node: &Node, matches: &impl Fn(&Node) -> bool, path: &mut Vec<usize>) -> bool {
        if matches(node) {
            return true;
        }
        for (index, child) in node.children().iter().enumerate() {
            path.push(index);
            if walk(child, matches, path) {
                return true;
            }
            path.pop();
        }
        false
    }
    let mut path = Vec::new();
    walk(root, matches, &mut path).then_some(path)
}

fn node_at_path_mut<'a>(root: &'a mut Node, path: &[usize]) -> &'a mut Node {
    let mut node = root;
    for &index in path {
        let Some(children) = node.children_mut() else {
            unreachable!("paths only lead through child-bearing nodes");
        };
        node = &mut children[index];
    }
    node
}

fn attach_to_container(doc: &mut Node, item: Node) {
    let path = container_path(doc);
    let container = node_at_path_mut(doc, &path);
    if let Some(children) = container.children_mut() {
        children.push(item);
    }
}

fn container_path(doc: &mut Node) -> Vec<usize> {
    if let Some(path) = find_path(doc, &|node| node.is_element_named("body")) {
        return path;
    }
    if let Some(mut path) = find_path(doc, &|node| node.is_element_named("html")) {
        let html = node_at_path_mut(doc, &path);
        if let Some(children) = html.children_mut() {
            children.push(Node::Element {
                name: Arc::from("body"),
                attributes: Vec::new(),
                children: Vec::new(),
            });
            path.push(children.len() - 1);
            return path;
        }
    }
    Vec::new()
}
