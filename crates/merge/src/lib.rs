//! Structural merging of two parsed markup trees.
//!
//! Contract:
//! - Substructure the two inputs share appears once in the output; content
//!   present on only one side is preserved; inputs are never mutated.
//! - Matching is greedy, first-fit, order-sensitive, and deliberately not
//!   globally optimal; see `groups` for the exact policy.
//! - String entry points short-circuit blank and identical inputs before
//!   parsing anything.
//!
//! [`merge_html`] is the full recursive strategy; [`merge_html_simple`] is a
//! cheaper one-level placement documented in `simple`.

mod engine;
mod equivalence;
mod groups;
mod simple;

pub use crate::engine::{merge_nodes, merge_trees};
pub use crate::equivalence::can_merge;

use html::ParseError;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum MergeError {
    /// The first input failed to parse.
    ParseFirst(ParseError),
    /// The second input failed to parse.
    ParseSecond(ParseError),
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeError::ParseFirst(err) => write!(f, "first input: {err}"),
            MergeError::ParseSecond(err) => write!(f, "second input: {err}"),
        }
    }
}

impl std::error::Error for MergeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MergeError::ParseFirst(err) | MergeError::ParseSecond(err) => Some(err),
        }
    }
}

/// Merge two markup strings with the recursive strategy and serialize the
/// result.
pub fn merge_html(first: &str, second: &str) -> Result<String, MergeError> {
    if let Some(short) = trivial_merge(first, second) {
        return Ok(short);
    }
    let (first_doc, second_doc) = parse_both(first, second)?;
    Ok(html::outer_html(&merge_trees(&first_doc, &second_doc)))
}

/// Merge two markup strings with the one-level strategy and serialize the
/// result. Same signature and edge contract as [`merge_html`], lower
/// fidelity.
pub fn merge_html_simple(first: &str, second: &str) -> Result<String, MergeError> {
    if let Some(short) = trivial_merge(first, second) {
        return Ok(short);
    }
    let (first_doc, second_doc) = parse_both(first, second)?;
    Ok(html::outer_html(&simple::merge_simple_docs(
        &first_doc,
        &second_doc,
    )))
}

fn parse_both(first: &str, second: &str) -> Result<(html::Node, html::Node), MergeError> {
    let first_doc = html::parse(first).map_err(MergeError::ParseFirst)?;
    let second_doc = html::parse(second).map_err(MergeError::ParseSecond)?;
    Ok((first_doc, second_doc))
}

/// The shared edge contract: blank sides and raw-identical inputs resolve
/// without parsing or merging anything.
fn trivial_merge(first: &str, second: &str) -> Option<String> {
    let first_blank = first.trim().is_empty();
    let second_blank = second.trim().is_empty();
    match (first_blank, second_blank) {
        (true, true) => Some(String::new()),
        (true, false) => Some(second.to_string()),
        (false, true) => Some(first.to_string()),
        (false, false) => (first == second).then(|| first.to_string()),
    }
}
