//! Document tree
//!
//! This module defines the nodes an external parser hands to the converter.
//! The tree is built once, before conversion, and never mutated by it.

use std::fmt;

/// A node of the document tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Root document container
    Document(Vec<Node>),

    /// Paragraph containing inline content
    Paragraph(Vec<Node>),

    /// Heading with level (1-6) and inline content
    Heading { level: u8, children: Vec<Node> },

    /// Block quote containing nested blocks
    BlockQuote(Vec<Node>),

    /// Bulleted list of `ListItem` nodes
    UnorderedList(Vec<Node>),

    /// Numbered list of `ListItem` nodes
    OrderedList { start: u32, items: Vec<Node> },

    /// List entry; may hold inline content, blocks and nested lists
    ListItem {
        checked: Option<bool>,
        children: Vec<Node>,
    },

    /// Image with source, alt text, and optional title
    Image {
        source: String,
        alt_text: String,
        title: Option<String>,
    },

    /// Fenced or indented code block
    CodeBlock {
        language: Option<String>,
        raw_text: String,
    },

    /// Thematic break (horizontal rule)
    ThematicBreak,

    /// Inline span expressed as embedded native markup, e.g. `<b>`
    RawMarkup { tag_name: String, children: Vec<Node> },

    /// Plain text
    Text(String),

    /// Emphasis (italic)
    Emphasis(Vec<Node>),

    /// Strong emphasis (bold)
    Strong(Vec<Node>),

    /// Inline code
    CodeSpan(String),

    /// Link with content, URL, and optional title
    Link {
        url: String,
        title: Option<String>,
        children: Vec<Node>,
    },

    /// Hard line break
    LineBreak,

    /// A parser construct with no AsciiDoc mapping (tables, footnotes, ...)
    Extension { name: String, children: Vec<Node> },
}

/// The kind of a [`Node`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Paragraph,
    Heading,
    BlockQuote,
    UnorderedList,
    OrderedList,
    ListItem,
    Image,
    CodeBlock,
    ThematicBreak,
    RawMarkup,
    Text,
    Emphasis,
    Strong,
    CodeSpan,
    Link,
    LineBreak,
    Extension,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading => "heading",
            NodeKind::BlockQuote => "block quote",
            NodeKind::UnorderedList => "unordered list",
            NodeKind::OrderedList => "ordered list",
            NodeKind::ListItem => "list item",
            NodeKind::Image => "image",
            NodeKind::CodeBlock => "code block",
            NodeKind::ThematicBreak => "thematic break",
            NodeKind::RawMarkup => "raw markup element",
            NodeKind::Text => "text",
            NodeKind::Emphasis => "emphasis",
            NodeKind::Strong => "strong",
            NodeKind::CodeSpan => "code span",
            NodeKind::Link => "link",
            NodeKind::LineBreak => "line break",
            NodeKind::Extension => "extension",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Node {
    /// Create a text node
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    /// Create a list item without a task checkbox
    pub fn item(children: Vec<Node>) -> Self {
        Node::ListItem {
            checked: None,
            children,
        }
    }

    /// Create an image node without a title
    pub fn image(source: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Node::Image {
            source: source.into(),
            alt_text: alt_text.into(),
            title: None,
        }
    }

    /// Create a raw markup span
    pub fn raw(tag_name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::RawMarkup {
            tag_name: tag_name.into(),
            children,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Document(_) => NodeKind::Document,
            Node::Paragraph(_) => NodeKind::Paragraph,
            Node::Heading { .. } => NodeKind::Heading,
            Node::BlockQuote(_) => NodeKind::BlockQuote,
            Node::UnorderedList(_) => NodeKind::UnorderedList,
            Node::OrderedList { .. } => NodeKind::OrderedList,
            Node::ListItem { .. } => NodeKind::ListItem,
            Node::Image { .. } => NodeKind::Image,
            Node::CodeBlock { .. } => NodeKind::CodeBlock,
            Node::ThematicBreak => NodeKind::ThematicBreak,
            Node::RawMarkup { .. } => NodeKind::RawMarkup,
            Node::Text(_) => NodeKind::Text,
            Node::Emphasis(_) => NodeKind::Emphasis,
            Node::Strong(_) => NodeKind::Strong,
            Node::CodeSpan(_) => NodeKind::CodeSpan,
            Node::Link { .. } => NodeKind::Link,
            Node::LineBreak => NodeKind::LineBreak,
            Node::Extension { .. } => NodeKind::Extension,
        }
    }

    /// Child nodes in document order (empty for leaves)
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document(children)
            | Node::Paragraph(children)
            | Node::BlockQuote(children)
            | Node::UnorderedList(children)
            | Node::Emphasis(children)
            | Node::Strong(children) => children,
            Node::OrderedList { items, .. } => items,
            Node::Heading { children, .. }
            | Node::ListItem { children, .. }
            | Node::RawMarkup { children, .. }
            | Node::Link { children, .. }
            | Node::Extension { children, .. } => children,
            Node::Image { .. }
            | Node::CodeBlock { .. }
            | Node::ThematicBreak
            | Node::Text(_)
            | Node::CodeSpan(_)
            | Node::LineBreak => &[],
        }
    }

    /// Check if this node is a list (ordered or unordered)
    pub fn is_list(&self) -> bool {
        matches!(self, Node::UnorderedList(_) | Node::OrderedList { .. })
    }

    /// Check if this node belongs in running text
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            Node::Text(_)
                | Node::Emphasis(_)
                | Node::Strong(_)
                | Node::RawMarkup { .. }
                | Node::CodeSpan(_)
                | Node::Link { .. }
                | Node::Image { .. }
                | Node::LineBreak
        )
    }

    /// Get the plain text content of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) | Node::CodeSpan(text) => text.clone(),
            Node::CodeBlock { raw_text, .. } => raw_text.clone(),
            Node::Image { alt_text, .. } => alt_text.clone(),
            Node::LineBreak => "\n".to_string(),
            other => other.children().iter().map(Node::text_content).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(Node::ThematicBreak.kind().to_string(), "thematic break");
        assert_eq!(Node::raw("b", vec![]).kind(), NodeKind::RawMarkup);
    }

    #[test]
    fn test_children_of_leaf_is_empty() {
        assert!(Node::image("a.png", "A").children().is_empty());
        assert!(Node::text("x").children().is_empty());
    }

    #[test]
    fn test_text_content() {
        let node = Node::Paragraph(vec![
            Node::text("See "),
            Node::Strong(vec![Node::text("this")]),
            Node::image("a.png", " image"),
        ]);
        assert_eq!(node.text_content(), "See this image");
    }

    #[test]
    fn test_is_list() {
        assert!(Node::UnorderedList(vec![]).is_list());
        assert!(Node::OrderedList {
            start: 1,
            items: vec![]
        }
        .is_list());
        assert!(!Node::item(vec![]).is_list());
    }
}
