#[cfg(any(test, feature = "dom-snapshot"))]
pub mod dom_snapshot;
pub mod dom_utils;

mod dom_builder;
mod entities;
mod serializer;
mod tokenizer;
mod types;

pub use crate::dom_builder::{ParseError, build_dom};
pub use crate::serializer::outer_html;
pub use crate::tokenizer::tokenize;
pub use crate::types::{COMMENT_NAME, DOCUMENT_NAME, Node, TEXT_NAME, Token};

/// Parse markup into a Document tree, rejecting structurally broken input.
pub fn parse(input: &str) -> Result<Node, ParseError> {
    build_dom(tokenize(input))
}
