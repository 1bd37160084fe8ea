use std::sync::Arc;

/// Sentinel names for the non-element node kinds, so every node can be
/// addressed through one tag-name discriminator.
pub const DOCUMENT_NAME: &str = "#document";
pub const TEXT_NAME: &str = "#text";
pub const COMMENT_NAME: &str = "#comment";

#[derive(Debug)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: Arc<str>,
        attributes: Vec<(Arc<str>, Option<String>)>,
        self_closing: bool,
    },
    EndTag(Arc<str>),
    Comment(String),
    Text(String),
}

/// A parsed markup tree. Element names are ASCII-lowercased at parse time;
/// attribute keys are unique (first occurrence wins) and keep source order.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Document {
        doctype: Option<String>,
        children: Vec<Node>,
    },
    Element {
        name: Arc<str>,
        attributes: Vec<(Arc<str>, Option<String>)>,
        children: Vec<Node>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

impl Node {
    pub fn tag_name(&self) -> &str {
        match self {
            Node::Document { .. } => DOCUMENT_NAME,
            Node::Element { name, .. } => name,
            Node::Text { .. } => TEXT_NAME,
            Node::Comment { .. } => COMMENT_NAME,
        }
    }

    pub fn attributes(&self) -> &[(Arc<str>, Option<String>)] {
        match self {
            Node::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Attribute lookup: `None` when the attribute is absent, `Some("")` when
    /// it is present without a value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes()
            .iter()
            .find(|(key, _)| key.as_ref() == name)
            .map(|(_, value)| value.as_deref().unwrap_or(""))
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document { children, .. } | Node::Element { children, .. } => children,
            Node::Text { .. } | Node::Comment { .. } => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Document { children, .. } | Node::Element { children, .. } => Some(children),
            Node::Text { .. } | Node::Comment { .. } => None,
        }
    }

    pub fn is_element_named(&self, target: &str) -> bool {
        match self {
            Node::Element { name, .. } => name.eq_ignore_ascii_case(target),
            _ => false,
        }
    }

    /// Copy kind, name, doctype and attributes, but start with an empty
    /// children list. Callers repopulate the children themselves.
    pub fn clone_shell(&self) -> Node {
        match self {
            Node::Document { doctype, .. } => Node::Document {
                doctype: doctype.clone(),
                children: Vec::new(),
            },
            Node::Element {
                name, attributes, ..
            } => Node::Element {
                name: Arc::clone(name),
                attributes: attributes.clone(),
                children: Vec::new(),
            },
            Node::Text { text } => Node::Text { text: text.clone() },
            Node::Comment { text } => Node::Comment { text: text.clone() },
        }
    }
}
