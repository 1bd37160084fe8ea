//! Recursive descent over two trees.
//!
//! Contract:
//! - Inputs are never mutated; passthrough output is a clone of the input
//!   subtree, merged output is freshly constructed.
//! - A non-mergeable pair is emitted as-is, in input order, with no
//!   recursion into either side.
//! - A mergeable pair becomes one node shaped after the first input, its
//!   children produced group-by-group by the matcher in `groups`.
//! - Deterministic: same inputs, same output, every call.

use crate::equivalence::can_merge;
use crate::groups::{group_by_tag, merge_child_groups};
use html::Node;

/// Merge two optional siblings into an output sequence.
pub fn merge_nodes(first: Option<&Node>, second: Option<&Node>) -> Vec<Node> {
    match (first, second) {
        (None, None) => Vec::new(),
        (Some(only), None) | (None, Some(only)) => vec![only.clone()],
        (Some(first), Some(second)) => {
            if can_merge(first, second) {
                vec![merge_pair(first, second)]
            } else {
                vec![first.clone(), second.clone()]
            }
        }
    }
}

/// Merge two whole trees. Roots produced by `html::parse` are always
/// documents, and two documents always merge into one.
pub fn merge_trees(first: &Node, second: &Node) -> Node {
    debug_assert!(
        matches!(first, Node::Document { .. }) && matches!(second, Node::Document { .. }),
        "merge_trees expects two document roots"
    );
    merge_pair(first, second)
}

fn merge_pair(first: &Node, second: &Node) -> Node {
    let mut merged = first.clone_shell();

    // a missing doctype on the first side is filled from the second
    if let (Node::Document { doctype, .. }, Node::Document { doctype: Some(other), .. }) =
        (&mut merged, second)
    {
        if doctype.is_none() {
            *doctype = Some(other.clone());
        }
    }

    let groups1 = group_by_tag(first.children());
    let groups2 = group_by_tag(second.children());
    log::trace!(
        target: "merge.engine",
        "merge <{}>: {} + {} child groups",
        first.tag_name(),
        groups1.len(),
        groups2.len()
    );

    let mut children: Vec<Node> = Vec::new();
    for (tag, group1) in &groups1 {
        let group2 = groups2
            .iter()
            .find(|(other_tag, _)| other_tag == tag)
            .map(|(_, nodes)| nodes.as_slice())
            .unwrap_or(&[]);
        children.extend(merge_child_groups(group1, group2));
    }
    for (tag, group2) in &groups2 {
        if groups1.iter().any(|(seen_tag, _)| seen_tag == tag) {
            continue;
        }
        children.extend(merge_child_groups(&[], group2));
    }

    // merged text/comment pairs carry no children
    if let Some(slot) = merged.children_mut() {
        *slot = children;
    }
    merged
}
