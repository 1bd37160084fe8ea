//! Deterministic DOM serialization and equality for tests.
//! Not a public stable format; intended for internal comparisons.
//!
//! Equivalence rules:
//! - Node kinds must match.
//! - Element names must match.
//! - Attribute list order is significant; names and values must match.
//! - Text, comments and doctypes must match exactly.

use crate::types::Node;
use std::fmt::{self, Write};
use std::sync::OnceLock;

#[derive(Debug)]
pub struct DomSnapshot {
    lines: Vec<String>,
}

impl DomSnapshot {
    pub fn new(root: &Node) -> Self {
        let mut lines = Vec::new();
        walk_snapshot(root, 0, &mut lines);
        Self { lines }
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for DomSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i != 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct DomMismatch<'a> {
    path: String,
    detail: String,
    expected: String,
    actual: String,
    expected_node: &'a Node,
    actual_node: &'a Node,
    expected_subtree: OnceLock<String>,
    actual_subtree: OnceLock<String>,
}

impl fmt::Display for DomMismatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expected_subtree = self
            .expected_subtree
            .get_or_init(|| DomSnapshot::new(self.expected_node).render());
        let actual_subtree = self
            .actual_subtree
            .get_or_init(|| DomSnapshot::new(self.actual_node).render());
        writeln!(f, "DOM mismatch at {}: {}", self.path, self.detail)?;
        writeln!(f, "expected: {}", self.expected)?;
        writeln!(f, "actual:   {}", self.actual)?;
        writeln!(f, "expected subtree:\n{expected_subtree}")?;
        writeln!(f, "actual subtree:\n{actual_subtree}")?;
        Ok(())
    }
}

impl std::error::Error for DomMismatch<'_> {}

pub fn assert_dom_eq(expected: &Node, actual: &Node) {
    if let Err(mismatch) = compare_dom(expected, actual) {
        panic!("{mismatch}");
    }
}

pub fn compare_dom<'a>(expected: &'a Node, actual: &'a Node) -> Result<(), Box<DomMismatch<'a>>> {
    let mut path = vec![node_label(expected)];
    compare_nodes(expected, actual, &mut path)
}

fn compare_nodes<'a>(
    expected: &'a Node,
    actual: &'a Node,
    path: &mut Vec<String>,
) -> Result<(), Box<DomMismatch<'a>>> {
    match (expected, actual) {
        (
            Node::Document {
                doctype: expected_doctype,
                children: expected_children,
            },
            Node::Document {
                doctype: actual_doctype,
                children: actual_children,
            },
        ) => {
            if expected_doctype != actual_doctype {
                return Err(Box::new(mismatch(path, "doctype", expected, actual)));
            }
            compare_children(expected, actual, expected_children, actual_children, path)
        }
        (
            Node::Element {
                name: expected_name,
                attributes: expected_attrs,
                children: expected_children,
            },
            Node::Element {
                name: actual_name,
                attributes: actual_attrs,
                children: actual_children,
            },
        ) => {
            if expected_name != actual_name {
                return Err(Box::new(mismatch(path, "element name", expected, actual)));
            }
            if expected_attrs.len() != actual_attrs.len() {
                return Err(Box::new(mismatch(path, "attribute count", expected, actual)));
            }
            for (i, (exp, act)) in expected_attrs.iter().zip(actual_attrs.iter()).enumerate() {
                if exp != act {
                    return Err(Box::new(mismatch(
                        path,
                        &format!("attribute at index {i}"),
                        expected,
                        actual,
                    )));
                }
            }
            compare_children(expected, actual, expected_children, actual_children, path)
        }
        (Node::Text { text: expected_text }, Node::Text { text: actual_text }) => {
            if expected_text != actual_text {
                return Err(Box::new(mismatch(path, "text", expected, actual)));
            }
            Ok(())
        }
        (
            Node::Comment {
                text: expected_text,
            },
            Node::Comment { text: actual_text },
        ) => {
            if expected_text != actual_text {
                return Err(Box::new(mismatch(path, "comment", expected, actual)));
            }
            Ok(())
        }
        _ => Err(Box::new(mismatch(path, "node kind", expected, actual))),
    }
}

fn compare_children<'a>(
    expected_parent: &'a Node,
    actual_parent: &'a Node,
    expected: &'a [Node],
    actual: &'a [Node],
    path: &mut Vec<String>,
) -> Result<(), Box<DomMismatch<'a>>> {
    if expected.len() != actual.len() {
        return Err(Box::new(mismatch(
            path,
            &format!(
                "child count (expected {}, actual {})",
                expected.len(),
                actual.len()
            ),
            expected_parent,
            actual_parent,
        )));
    }
    for (index, (exp, act)) in expected.iter().zip(actual.iter()).enumerate() {
        path.push(format!("{}[{}]", node_label(exp), index));
        let result = compare_nodes(exp, act, path);
        path.pop();
        result?;
    }
    Ok(())
}

fn mismatch<'a>(path: &[String], detail: &str, expected: &'a Node, actual: &'a Node) -> DomMismatch<'a> {
    let path = format!("/{}", path.join("/"));
    DomMismatch {
        path,
        detail: detail.to_string(),
        expected: truncate_line(format_node_line(expected), 160),
        actual: truncate_line(format_node_line(actual), 160),
        expected_node: expected,
        actual_node: actual,
        expected_subtree: OnceLock::new(),
        actual_subtree: OnceLock::new(),
    }
}

fn node_label(node: &Node) -> String {
    match node {
        Node::Document { .. } => "#document".to_string(),
        Node::Element {
            name, attributes, ..
        } => {
            let mut label = String::from(name.as_ref());
            let id_attr = attributes
                .iter()
                .find(|(key, _)| key.as_ref() == "id")
                .and_then(|(_, value)| value.as_deref())
                .filter(|value| !value.is_empty());
            if let Some(id_value) = id_attr {
                label.push('#');
                write_escaped(&mut label, id_value);
            }
            label
        }
        Node::Text { .. } => "#text".to_string(),
        Node::Comment { .. } => "#comment".to_string(),
    }
}

fn truncate_line(mut line: String, max_len: usize) -> String {
    if line.len() > max_len {
        line.truncate(max_len.saturating_sub(3));
        line.push_str("...");
    }
    line
}

fn walk_snapshot(node: &Node, indent_level: usize, out: &mut Vec<String>) {
    const INDENT_STEP: usize = 2;
    let mut line = " ".repeat(indent_level * INDENT_STEP);
    write_node_line(&mut line, node);
    out.push(line);
    for child in node.children() {
        walk_snapshot(child, indent_level + 1, out);
    }
}

fn format_node_line(node: &Node) -> String {
    let mut line = String::new();
    write_node_line(&mut line, node);
    line
}

fn write_node_line(out: &mut String, node: &Node) {
    match node {
        Node::Document { doctype, .. } => {
            out.push_str("#document");
            if let Some(doctype) = doctype {
                out.push_str(" doctype=\"");
                write_escaped(out, doctype);
                out.push('"');
            }
        }
        Node::Element {
            name, attributes, ..
        } => {
            out.push('<');
            out.push_str(name);
            for (attr, value) in attributes {
                out.push(' ');
                out.push_str(attr);
                if let Some(value) = value {
                    out.push_str("=\"");
                    write_escaped(out, value);
                    out.push('"');
                }
            }
            out.push('>');
        }
        Node::Text { text } => {
            out.push('"');
            write_escaped(out, text);
            out.push('"');
        }
        Node::Comment { text } => {
            out.push_str("<!-- ");
            write_escaped(out, text);
            out.push_str(" -->");
        }
    }
}

fn write_escaped(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ if ch.is_ascii() => out.push(ch),
            _ => {
                let _ = write!(out, "\\u{{{:X}}}", ch as u32);
            }
        }
    }
}
