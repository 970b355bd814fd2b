//! # asciidown
//!
//! Convert Markdown documents to AsciiDoc.
//!
//! Markdown is parsed by [pulldown-cmark](https://github.com/pulldown-cmark/pulldown-cmark)
//! and folded into the document tree from `asciidown-core`, which renders it
//! as AsciiDoc. Raw HTML embedded in the Markdown is translated to native
//! nodes with scraper, so `<b>`, `<em>` and `<code>` spans become AsciiDoc
//! formatting.
//!
//! ## Design
//!
//! - **Tree in, text out**: any parser can build a [`Node`] tree and hand it
//!   to [`AsciidownService::convert`]
//! - **Options as values**: [`ParserOptions`] is passed into each service, so
//!   conversions with different options can run side by side
//! - **Fail loudly**: constructs without an AsciiDoc mapping are errors, never
//!   silently dropped
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use asciidown::{AsciidownService, Node};
//!
//! let service = AsciidownService::new();
//! let tree = Node::Document(vec![Node::Paragraph(vec![Node::text("Hello World")])]);
//!
//! let asciidoc = service.convert(&tree).unwrap();
//! assert_eq!(asciidoc, "Hello World");
//! ```
//!
//! ## Example (Markdown string)
//!
//! ```rust
//! use asciidown::AsciidownService;
//!
//! let service = AsciidownService::new();
//! let asciidoc = service.convert_markdown("**Warning:** hot surface").unwrap();
//! assert_eq!(asciidoc, "WARNING: hot surface");
//! ```

#[cfg(feature = "html")]
pub mod html;
#[cfg(feature = "markdown")]
pub mod markdown;
mod service;
mod utilities;

pub use asciidown_core::{
    convert, convert_node, Context, ConvertError, InlineFormat, Node, NodeKind, ParserOptions,
};
#[cfg(feature = "html")]
pub use html::parse_html;
#[cfg(feature = "markdown")]
pub use markdown::parse_markdown;
pub use service::AsciidownService;
pub use utilities::*;

/// Error type for asciidown operations
#[derive(Debug, thiserror::Error)]
pub enum AsciidownError {
    #[error("Conversion error: {0}")]
    Conversion(#[from] ConvertError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, AsciidownError>;
