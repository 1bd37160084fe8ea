use crate::types::Node;
use regex::Regex;
use std::sync::OnceLock;

/// True if any text node below `node` has non-whitespace content.
/// `<script>` and `<style>` bodies do not count as visible text.
pub fn contains_visible_text(node: &Node) -> bool {
    match node {
        Node::Text { text } => !text.trim().is_empty(),
        Node::Element { name, children, .. } => {
            if name.eq_ignore_ascii_case("script") || name.eq_ignore_ascii_case("style") {
                return false;
            }
            children.iter().any(contains_visible_text)
        }
        Node::Document { children, .. } => children.iter().any(contains_visible_text),
        Node::Comment { .. } => false,
    }
}

/// Cheap textual heuristic over raw markup, no parse: matches non-markup
/// characters sitting between a `>` and the next `<`.
///
/// Misses text outside any tag and can be fooled by rawtext bodies; callers
/// that need the real answer parse and use [`contains_visible_text`].
pub fn has_text_between_tags(html: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern =
        PATTERN.get_or_init(|| Regex::new(r">\s*[^<>\s][^<>]*\s*<").expect("pattern is valid"));
    pattern.is_match(html)
}
