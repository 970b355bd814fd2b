//! asciidown-core - document tree and AsciiDoc conversion
//!
//! This crate provides the node model handed over by a parser and the
//! converter that renders it as AsciiDoc. It is used by `asciidown`, which
//! builds trees from Markdown and embedded HTML.
//!
//! # Architecture
//!
//! ```text
//! Markdown ──pulldown-cmark──▶ ┌───────────────┐
//!                              │               │
//!                              │ Document tree │ ──convert──▶ AsciiDoc String
//! Embedded HTML ──scraper────▶ │               │
//!                              └───────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use asciidown_core::{convert, Node, ParserOptions};
//!
//! let tree = Node::Document(vec![
//!     Node::Paragraph(vec![
//!         Node::text("Note: this is "),
//!         Node::Strong(vec![Node::text("important")]),
//!     ]),
//!     Node::ThematicBreak,
//! ]);
//!
//! let asciidoc = convert(&tree, &ParserOptions::default()).unwrap();
//! assert_eq!(asciidoc, "NOTE: this is *important*\n\n'''");
//! ```

mod admonition;
mod ast;
mod convert;
mod format;
mod options;

pub use admonition::{detect as detect_admonition, Admonition};
pub use ast::{Node, NodeKind};
pub use convert::{
    convert, convert_block_quote, convert_code_block, convert_heading, convert_image,
    convert_link, convert_node, convert_ordered_list, convert_paragraph, convert_raw_markup,
    convert_thematic_break, convert_unordered_list, Context,
};
pub use format::InlineFormat;
pub use options::ParserOptions;

/// Error type for conversion
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("Unsupported node kind: {kind}")]
    UnsupportedNodeKind { kind: String },

    #[error("Invalid attribute `{attribute}` on {kind} node")]
    InvalidNodeAttribute {
        kind: NodeKind,
        attribute: &'static str,
    },

    #[error("Expected {expected} node, found {found}")]
    UnexpectedNodeKind { expected: NodeKind, found: NodeKind },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
