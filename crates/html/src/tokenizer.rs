//! Simplified HTML tokenizer with a constrained, practical tag-name character
//! set.
//!
//! Supported tag-name characters (ASCII only): `[A-Za-z0-9:_-]`. Attribute
//! names use the same class. Tag and attribute names are ASCII-lowercased.
//! Duplicate attributes keep the first occurrence, so downstream consumers
//! see unique keys.
//!
//! This is not an HTML5 state machine; recovery beyond the cases below is the
//! tree builder's problem. Known limitations (intentional):
//! - Rawtext close-tag scanning for `<script>`/`<style>` accepts only ASCII
//!   whitespace before `>`.
//! - Declarations other than doctype and comments are skipped wholesale.

use crate::entities::decode_entities;
use crate::types::Token;
use memchr::memchr;
use std::sync::Arc;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";
const DOCTYPE_START: &[u8] = b"<!doctype";

pub(crate) fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

fn starts_with_ignore_case_at(haystack: &[u8], at: usize, needle: &[u8]) -> bool {
    haystack.len() >= at + needle.len()
        && haystack[at..at + needle.len()].eq_ignore_ascii_case(needle)
}

/// Find the close tag of a rawtext element (`</script>`/`</style>`), allowing
/// whitespace before `>`. Returns (content_end, resume_at) relative to
/// `haystack`.
fn find_rawtext_close(haystack: &str, name: &str) -> Option<(usize, usize)> {
    let bytes = haystack.as_bytes();
    let mut i = 0;
    while let Some(rel) = memchr(b'<', &bytes[i..]) {
        let at = i + rel;
        if starts_with_ignore_case_at(bytes, at, b"</")
            && starts_with_ignore_case_at(bytes, at + 2, name.as_bytes())
        {
            let mut k = at + 2 + name.len();
            while k < bytes.len() && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < bytes.len() && bytes[k] == b'>' {
                return Some((at, k + 1));
            }
        }
        i = at + 1;
    }
    None
}

pub fn tokenize(input: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0;

    // Slices are only cut at ASCII structural bytes, so every endpoint stays
    // a UTF-8 char boundary.
    while i < bytes.len() {
        if bytes[i] != b'<' {
            let end = memchr(b'<', &bytes[i..]).map_or(bytes.len(), |rel| i + rel);
            let decoded = decode_entities(&input[i..end]);
            if !decoded.is_empty() {
                out.push(Token::Text(decoded));
            }
            i = end;
            continue;
        }

        if input[i..].starts_with(COMMENT_START) {
            let body_start = i + COMMENT_START.len();
            match input[body_start..].find(COMMENT_END) {
                Some(rel) => {
                    out.push(Token::Comment(input[body_start..body_start + rel].to_string()));
                    i = body_start + rel + COMMENT_END.len();
                }
                None => {
                    out.push(Token::Comment(input[body_start..].to_string()));
                    i = bytes.len();
                }
            }
            continue;
        }

        if starts_with_ignore_case_at(bytes, i, DOCTYPE_START) {
            let payload_start = i + DOCTYPE_START.len();
            let Some(rel) = input[payload_start..].find('>') else {
                break;
            };
            let payload = input[payload_start..payload_start + rel].trim();
            out.push(Token::Doctype(payload.to_string()));
            i = payload_start + rel + 1;
            continue;
        }

        // end tag
        if bytes.get(i + 1) == Some(&b'/') {
            let name_start = i + 2;
            let mut j = name_start;
            while j < bytes.len() && is_name_byte(bytes[j]) {
                j += 1;
            }
            let name: Arc<str> = Arc::from(input[name_start..j].to_ascii_lowercase());
            while j < bytes.len() && bytes[j] != b'>' {
                j += 1;
            }
            if j < bytes.len() {
                j += 1;
            }
            if !name.is_empty() {
                out.push(Token::EndTag(name));
            }
            i = j;
            continue;
        }

        // start tag
        let name_start = i + 1;
        let mut j = name_start;
        while j < bytes.len() && is_name_byte(bytes[j]) {
            j += 1;
        }
        if j == name_start {
            // `<` followed by something that is not a tag name: literal text
            // up to the next bracket.
            let end = memchr(b'<', &bytes[i + 1..]).map_or(bytes.len(), |rel| i + 1 + rel);
            out.push(Token::Text(decode_entities(&input[i..end])));
            i = end;
            continue;
        }
        let name: Arc<str> = Arc::from(input[name_start..j].to_ascii_lowercase());

        let mut attributes: Vec<(Arc<str>, Option<String>)> = Vec::new();
        let mut self_closing = false;
        let mut k = j;
        loop {
            while k < bytes.len() && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k >= bytes.len() {
                break;
            }
            if bytes[k] == b'>' {
                k += 1;
                break;
            }
            if bytes[k] == b'/' {
                if bytes.get(k + 1) == Some(&b'>') {
                    self_closing = true;
                    k += 2;
                    break;
                }
                k += 1;
                continue;
            }

            let attr_start = k;
            while k < bytes.len() && is_name_byte(bytes[k]) {
                k += 1;
            }
            if attr_start == k {
                k += 1;
                continue;
            }
            let attr_name: Arc<str> = Arc::from(input[attr_start..k].to_ascii_lowercase());

            while k < bytes.len() && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            let value: Option<String> = if bytes.get(k) == Some(&b'=') {
                k += 1;
                while k < bytes.len() && bytes[k].is_ascii_whitespace() {
                    k += 1;
                }
                if matches!(bytes.get(k), Some(b'"') | Some(b'\'')) {
                    let quote = bytes[k];
                    k += 1;
                    let value_start = k;
                    while k < bytes.len() && bytes[k] != quote {
                        k += 1;
                    }
                    let raw = &input[value_start..k];
                    if k < bytes.len() {
                        k += 1;
                    }
                    Some(decode_entities(raw))
                } else {
                    let value_start = k;
                    while k < bytes.len() && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                        if bytes[k] == b'/' && bytes.get(k + 1) == Some(&b'>') {
                            break;
                        }
                        k += 1;
                    }
                    Some(input[value_start..k].to_string())
                }
            } else {
                None
            };

            // first occurrence wins
            if !attributes.iter().any(|(existing, _)| *existing == attr_name) {
                attributes.push((attr_name, value));
            }
        }

        if is_void_element(&name) {
            self_closing = true;
        }

        let rawtext = !self_closing && (name.as_ref() == "script" || name.as_ref() == "style");
        out.push(Token::StartTag {
            name: Arc::clone(&name),
            attributes,
            self_closing,
        });
        i = k;

        if rawtext {
            match find_rawtext_close(&input[i..], &name) {
                Some((content_end, resume_at)) => {
                    if content_end > 0 {
                        out.push(Token::Text(input[i..i + content_end].to_string()));
                    }
                    out.push(Token::EndTag(name));
                    i += resume_at;
                }
                None => {
                    // missing close tag: the remainder is rawtext content
                    if i < bytes.len() {
                        out.push(Token::Text(input[i..].to_string()));
                    }
                    out.push(Token::EndTag(name));
                    break;
                }
            }
        }
    }

    log::trace!(target: "html.tokenizer", "tokenized {} bytes into {} tokens", input.len(), out.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(tokens: &[Token]) -> Vec<String> {
        tokens
            .iter()
            .filter_map(|t| match t {
                Token::StartTag { name, .. } => Some(format!("<{name}>")),
                Token::EndTag(name) => Some(format!("</{name}>")),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn tokenizes_simple_markup() {
        let tokens = tokenize("<div class=\"a\"><p>hi</p></div>");
        assert_eq!(names(&tokens), ["<div>", "<p>", "</p>", "</div>"]);
        assert!(
            tokens
                .iter()
                .any(|t| matches!(t, Token::Text(s) if s == "hi"))
        );
    }

    #[test]
    fn lowercases_tag_and_attribute_names() {
        let tokens = tokenize("<DiV ID=one></DIV>");
        assert!(matches!(
            &tokens[0],
            Token::StartTag { name, attributes, .. }
                if name.as_ref() == "div"
                    && attributes.len() == 1
                    && attributes[0].0.as_ref() == "id"
                    && attributes[0].1.as_deref() == Some("one")
        ));
        assert!(matches!(&tokens[1], Token::EndTag(name) if name.as_ref() == "div"));
    }

    #[test]
    fn duplicate_attributes_keep_first_occurrence() {
        let tokens = tokenize("<div id=a id=b>");
        let Token::StartTag { attributes, .. } = &tokens[0] else {
            panic!("expected start tag, got {tokens:?}");
        };
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes[0].1.as_deref(), Some("a"));
    }

    #[test]
    fn decodes_entities_in_text_and_quoted_values() {
        let tokens = tokenize("<p title=\"a &amp; b\">x &lt; y</p>");
        assert!(tokens.iter().any(|t| matches!(
            t,
            Token::StartTag { attributes, .. }
                if attributes[0].1.as_deref() == Some("a & b")
        )));
        assert!(
            tokens
                .iter()
                .any(|t| matches!(t, Token::Text(s) if s == "x < y"))
        );
    }

    #[test]
    fn preserves_utf8_text() {
        let tokens = tokenize("¡Hola <b>café</b> 😊");
        assert!(
            tokens
                .iter()
                .any(|t| matches!(t, Token::Text(s) if s == "¡Hola "))
        );
        assert!(
            tokens
                .iter()
                .any(|t| matches!(t, Token::Text(s) if s == "café"))
        );
        assert!(
            tokens
                .iter()
                .any(|t| matches!(t, Token::Text(s) if s == " 😊"))
        );
    }

    #[test]
    fn doctype_keeps_payload_only() {
        let tokens = tokenize("<!DOCTYPE html><html></html>");
        assert!(matches!(&tokens[0], Token::Doctype(s) if s == "html"));
        let tokens = tokenize("<!DoCtYpE html>");
        assert!(matches!(&tokens[0], Token::Doctype(s) if s == "html"));
    }

    #[test]
    fn comments_are_captured_verbatim() {
        let tokens = tokenize("<!-- a < b -->");
        assert!(matches!(&tokens[0], Token::Comment(s) if s == " a < b "));
    }

    #[test]
    fn void_elements_are_self_closing() {
        let tokens = tokenize("<div><br><img src=x></div>");
        let self_closing: Vec<bool> = tokens
            .iter()
            .filter_map(|t| match t {
                Token::StartTag { self_closing, .. } => Some(*self_closing),
                _ => None,
            })
            .collect();
        assert_eq!(self_closing, [false, true, true]);
    }

    #[test]
    fn script_rawtext_is_verbatim_and_case_insensitive() {
        let tokens = tokenize("<script>let x = 1 < 2;</ScRiPt >");
        assert!(matches!(
            &tokens[..],
            [
                Token::StartTag { name, .. },
                Token::Text(body),
                Token::EndTag(end)
            ] if name.as_ref() == "script" && body == "let x = 1 < 2;" && end.as_ref() == "script"
        ));
    }

    #[test]
    fn rawtext_near_match_stays_text() {
        let tokens = tokenize("<script>ok</scriptx>no</script>");
        assert!(matches!(
            &tokens[..],
            [
                Token::StartTag { .. },
                Token::Text(body),
                Token::EndTag(_)
            ] if body == "ok</scriptx>no"
        ));
    }

    #[test]
    fn rawtext_without_close_tag_consumes_remainder() {
        let tokens = tokenize("<style>body {}");
        assert!(matches!(
            &tokens[..],
            [
                Token::StartTag { .. },
                Token::Text(body),
                Token::EndTag(_)
            ] if body == "body {}"
        ));
    }

    #[test]
    fn stray_angle_bracket_is_skipped() {
        let tokens = tokenize("a < b <p>c</p>");
        assert!(
            tokens
                .iter()
                .any(|t| matches!(t, Token::Text(s) if s == "a "))
        );
        assert!(
            tokens
                .iter()
                .any(|t| matches!(t, Token::StartTag { name, .. } if name.as_ref() == "p"))
        );
    }

    #[test]
    fn custom_and_namespaced_tags_are_recognized() {
        let tokens = tokenize("<my-component></my-component><svg:rect/>");
        assert_eq!(
            names(&tokens),
            ["<my-component>", "</my-component>", "<svg:rect>"]
        );
    }

    #[test]
    fn valueless_and_unquoted_attributes() {
        let tokens = tokenize("<input disabled name=q>");
        let Token::StartTag { attributes, .. } = &tokens[0] else {
            panic!("expected start tag, got {tokens:?}");
        };
        assert_eq!(attributes[0].0.as_ref(), "disabled");
        assert_eq!(attributes[0].1, None);
        assert_eq!(attributes[1].1.as_deref(), Some("q"));
    }
}
