//! Sibling grouping and the greedy first-fit matcher.
//!
//! Contract:
//! - Children partition into tag-name groups that keep each group's original
//!   relative order; group iteration order is first-seen in the first input,
//!   then names found only in the second input.
//! - Within a group, matching is greedy, first-fit, single-pass: each
//!   first-input node commits to the first unconsumed second-input node it
//!   can merge with and never reconsiders. An earlier commitment can starve
//!   a later, better match; that is the documented policy, not a defect.
//! - Group output order: merged pairs (first-input order), then unmatched
//!   first-input nodes, then unmatched second-input nodes.

use crate::engine::merge_nodes;
use crate::equivalence::can_merge;
use html::Node;
use std::collections::HashMap;

/// Partition siblings into tag-name groups, preserving first-seen group
/// order and in-group order. Deliberately not a plain HashMap: enumeration
/// order is part of the merge contract.
pub(crate) fn group_by_tag(children: &[Node]) -> Vec<(&str, Vec<&Node>)> {
    let mut groups: Vec<(&str, Vec<&Node>)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();
    for child in children {
        let tag = child.tag_name();
        match slots.get(tag) {
            Some(&slot) => groups[slot].1.push(child),
            None => {
                slots.insert(tag, groups.len());
                groups.push((tag, vec![child]));
            }
        }
    }
    groups
}

/// Merge one tag-name group from each side.
pub(crate) fn merge_child_groups(group1: &[&Node], group2: &[&Node]) -> Vec<Node> {
    let mut consumed = vec![false; group2.len()];
    let mut out: Vec<Node> = Vec::new();
    let mut pending: Vec<&Node> = Vec::new();

    for &candidate in group1 {
        let matched = group2
            .iter()
            .enumerate()
            .find(|&(slot, &other)| !consumed[slot] && can_merge(candidate, other));
        match matched {
            Some((slot, &other)) => {
                consumed[slot] = true;
                out.extend(merge_nodes(Some(candidate), Some(other)));
            }
            None => pending.push(candidate),
        }
    }

    out.extend(pending.into_iter().cloned());
    for (slot, &leftover) in group2.iter().enumerate() {
        if !consumed[slot] {
            out.push(leftover.clone());
        }
    }
    out
}
