//! Arena-based tree construction from the token stream.
//!
//! Contract:
//! - The root is always a Document node; a doctype token sets its doctype.
//! - Start tags nest; void and self-closed elements never open.
//! - Adjacent text tokens coalesce into one text node.
//! - Structural recovery is an error, not a silent fix: an end tag with no
//!   matching open element, or an element still open when its parent closes
//!   or input ends, fails the whole parse.

use crate::types::{Node, Token};
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub enum ParseError {
    /// An element was still open when its parent closed or input ended.
    UnclosedElement { name: Arc<str> },
    /// An end tag arrived with no matching open element.
    StrayEndTag { name: Arc<str> },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnclosedElement { name } => {
                write!(f, "element <{name}> is never closed")
            }
            ParseError::StrayEndTag { name } => {
                write!(f, "end tag </{name}> matches no open element")
            }
        }
    }
}

impl std::error::Error for ParseError {}

pub fn build_dom(tokens: Vec<Token>) -> Result<Node, ParseError> {
    let mut arena = Arena::new();
    let root = arena.push(ArenaNode::Document {
        doctype: None,
        children: Vec::new(),
    });
    let mut open_elements: Vec<usize> = Vec::new();

    for token in tokens {
        match token {
            Token::Doctype(payload) => arena.set_doctype(root, payload),
            Token::Comment(text) => {
                let parent = open_elements.last().copied().unwrap_or(root);
                arena.add_child(parent, ArenaNode::Comment { text });
            }
            Token::Text(text) => {
                let parent = open_elements.last().copied().unwrap_or(root);
                arena.add_text(parent, text);
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let parent = open_elements.last().copied().unwrap_or(root);
                let index = arena.add_child(
                    parent,
                    ArenaNode::Element {
                        name,
                        attributes,
                        children: Vec::new(),
                    },
                );
                if !self_closing {
                    open_elements.push(index);
                }
            }
            Token::EndTag(name) => {
                let Some(matched) = open_elements
                    .iter()
                    .rposition(|&index| arena.element_name(index).eq_ignore_ascii_case(&name))
                else {
                    log::debug!(target: "html.builder", "stray end tag </{name}>");
                    return Err(ParseError::StrayEndTag { name });
                };
                if matched + 1 != open_elements.len() {
                    let innermost = open_elements[open_elements.len() - 1];
                    return Err(ParseError::UnclosedElement {
                        name: arena.element_name_arc(innermost),
                    });
                }
                open_elements.truncate(matched);
            }
        }
    }

    if let Some(&index) = open_elements.last() {
        return Err(ParseError::UnclosedElement {
            name: arena.element_name_arc(index),
        });
    }

    Ok(arena.into_tree(root))
}

#[derive(Debug)]
enum ArenaNode {
    Document {
        doctype: Option<String>,
        children: Vec<usize>,
    },
    Element {
        name: Arc<str>,
        attributes: Vec<(Arc<str>, Option<String>)>,
        children: Vec<usize>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

impl ArenaNode {
    fn children(&self) -> Option<&[usize]> {
        match self {
            ArenaNode::Document { children, .. } | ArenaNode::Element { children, .. } => {
                Some(children)
            }
            ArenaNode::Text { .. } | ArenaNode::Comment { .. } => None,
        }
    }
}

#[derive(Debug)]
struct Arena {
    nodes: Vec<ArenaNode>,
}

impl Arena {
    fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    fn push(&mut self, node: ArenaNode) -> usize {
        let index = self.nodes.len();
        self.nodes.push(node);
        index
    }

    fn add_child(&mut self, parent: usize, child: ArenaNode) -> usize {
        let child_index = self.push(child);
        match &mut self.nodes[parent] {
            ArenaNode::Document { children, .. } | ArenaNode::Element { children, .. } => {
                children.push(child_index);
            }
            _ => unreachable!("builder parent cannot have children"),
        }
        child_index
    }

    fn add_text(&mut self, parent: usize, text: String) {
        // coalesce with a trailing text sibling
        let last_child = match &self.nodes[parent] {
            ArenaNode::Document { children, .. } | ArenaNode::Element { children, .. } => {
                children.last().copied()
            }
            _ => unreachable!("builder parent cannot have children"),
        };
        if let Some(index) = last_child {
            if let ArenaNode::Text { text: existing } = &mut self.nodes[index] {
                existing.push_str(&text);
                return;
            }
        }
        self.add_child(parent, ArenaNode::Text { text });
    }

    fn set_doctype(&mut self, root: usize, payload: String) {
        let ArenaNode::Document { doctype, .. } = &mut self.nodes[root] else {
            unreachable!("builder root is always a document node");
        };
        *doctype = Some(payload);
    }

    fn element_name(&self, index: usize) -> &str {
        match &self.nodes[index] {
            ArenaNode::Element { name, .. } => name,
            _ => "",
        }
    }

    fn element_name_arc(&self, index: usize) -> Arc<str> {
        match &self.nodes[index] {
            ArenaNode::Element { name, .. } => Arc::clone(name),
            _ => Arc::from(""),
        }
    }

    fn into_tree(self, root: usize) -> Node {
        let mut nodes = self.nodes;
        let mut built: Vec<Node> = Vec::with_capacity(nodes.len());

        fn take_children(count: usize, built: &mut Vec<Node>) -> Vec<Node> {
            let mut children = Vec::with_capacity(count);
            for _ in 0..count {
                children.push(built.pop().expect("child already built"));
            }
            children.reverse();
            children
        }

        // Iterative post-order walk: the first visit schedules the node and
        // descends; on the second visit its direct children are the last
        // `count` entries on `built`, in original order.
        let mut stack: Vec<(usize, bool)> = vec![(root, false)];
        while let Some((index, visited)) = stack.pop() {
            if !visited {
                stack.push((index, true));
                if let Some(children) = nodes[index].children() {
                    for &child in children.iter().rev() {
                        stack.push((child, false));
                    }
                }
                continue;
            }

            let node = match &mut nodes[index] {
                ArenaNode::Document { doctype, children } => {
                    let count = children.len();
                    children.clear();
                    Node::Document {
                        doctype: doctype.take(),
                        children: take_children(count, &mut built),
                    }
                }
                ArenaNode::Element {
                    name,
                    attributes,
                    children,
                } => {
                    let count = children.len();
                    children.clear();
                    Node::Element {
                        name: Arc::clone(name),
                        attributes: std::mem::take(attributes),
                        children: take_children(count, &mut built),
                    }
                }
                ArenaNode::Text { text } => Node::Text {
                    text: std::mem::take(text),
                },
                ArenaNode::Comment { text } => Node::Comment {
                    text: std::mem::take(text),
                },
            };
            built.push(node);
        }

        debug_assert_eq!(built.len(), 1, "builder produces exactly one root");
        built.pop().expect("root node built")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn build(input: &str) -> Node {
        build_dom(tokenize(input)).expect("parse failed")
    }

    #[test]
    fn builds_nested_elements_in_order() {
        let doc = build("<div><ul><li>a</li><li>b</li></ul></div>");
        let div = &doc.children()[0];
        assert_eq!(div.tag_name(), "div");
        let ul = &div.children()[0];
        assert_eq!(ul.tag_name(), "ul");
        let items: Vec<&str> = ul.children().iter().map(Node::tag_name).collect();
        assert_eq!(items, ["li", "li"]);
        assert_eq!(
            ul.children()[0].children()[0],
            Node::Text {
                text: "a".to_string()
            }
        );
    }

    #[test]
    fn empty_input_builds_empty_document() {
        let doc = build("");
        assert!(matches!(&doc, Node::Document { doctype: None, children } if children.is_empty()));
    }

    #[test]
    fn doctype_lands_on_document() {
        let doc = build("<!DOCTYPE html><html><body></body></html>");
        assert!(matches!(&doc, Node::Document { doctype: Some(dt), .. } if dt == "html"));
    }

    #[test]
    fn void_elements_do_not_nest() {
        let doc = build("<div><br>after</div>");
        let div = &doc.children()[0];
        assert_eq!(div.children().len(), 2);
        assert_eq!(div.children()[0].tag_name(), "br");
        assert_eq!(
            div.children()[1],
            Node::Text {
                text: "after".to_string()
            }
        );
    }

    #[test]
    fn comments_keep_their_position() {
        let doc = build("<div><!-- note -->x</div>");
        let div = &doc.children()[0];
        assert_eq!(
            div.children()[0],
            Node::Comment {
                text: " note ".to_string()
            }
        );
    }

    #[test]
    fn adjacent_text_tokens_coalesce() {
        // the stray bracket splits the text into two tokens
        let doc = build("<p>a < b</p>");
        let p = &doc.children()[0];
        assert_eq!(
            p.children(),
            &[Node::Text {
                text: "a < b".to_string()
            }]
        );
    }

    #[test]
    fn stray_end_tag_is_an_error() {
        let err = build_dom(tokenize("</p>")).expect_err("expected parse error");
        assert!(matches!(err, ParseError::StrayEndTag { name } if name.as_ref() == "p"));
    }

    #[test]
    fn unclosed_element_is_an_error() {
        let err = build_dom(tokenize("<div>")).expect_err("expected parse error");
        assert!(matches!(err, ParseError::UnclosedElement { name } if name.as_ref() == "div"));
    }

    #[test]
    fn crossed_nesting_reports_the_inner_element() {
        let err = build_dom(tokenize("<b><i>x</b></i>")).expect_err("expected parse error");
        assert!(matches!(err, ParseError::UnclosedElement { name } if name.as_ref() == "i"));
    }

    #[test]
    fn self_closed_element_needs_no_end_tag() {
        let doc = build("<div><svg:rect/></div>");
        let div = &doc.children()[0];
        assert_eq!(div.children()[0].tag_name(), "svg:rect");
    }

    #[test]
    fn whitespace_text_nodes_are_preserved() {
        let doc = build("<div> <p>x</p> </div>");
        let div = &doc.children()[0];
        let tags: Vec<&str> = div.children().iter().map(Node::tag_name).collect();
        assert_eq!(tags, ["#text", "p", "#text"]);
    }
}
