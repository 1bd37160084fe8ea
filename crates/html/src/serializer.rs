//! Outer-markup serialization.
//!
//! Canonical form, not source-preserving: names are the lowercased parsed
//! names, attribute values are double-quoted, text re-encodes `&`, `<`, `>`.
//! Rawtext elements (`script`/`style`) emit their text verbatim.

use crate::entities::{encode_attr, encode_text};
use crate::tokenizer::is_void_element;
use crate::types::Node;

pub fn outer_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Document { doctype, children } => {
            if let Some(doctype) = doctype {
                out.push_str("<!DOCTYPE ");
                out.push_str(doctype);
                out.push('>');
            }
            for child in children {
                write_node(out, child);
            }
        }
        Node::Element {
            name,
            attributes,
            children,
        } => {
            out.push('<');
            out.push_str(name);
            for (attr, value) in attributes {
                out.push(' ');
                out.push_str(attr);
                if let Some(value) = value {
                    out.push_str("=\"");
                    encode_attr(value, out);
                    out.push('"');
                }
            }
            out.push('>');
            if is_void_element(name) {
                return;
            }
            let rawtext = name.as_ref() == "script" || name.as_ref() == "style";
            for child in children {
                match child {
                    Node::Text { text } if rawtext => out.push_str(text),
                    _ => write_node(out, child),
                }
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        Node::Text { text } => encode_text(text, out),
        Node::Comment { text } => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
    }
}
