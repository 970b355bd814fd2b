//! AsciidownService - the main entry point for conversion to AsciiDoc.

use asciidown_core::{Node, ParserOptions};
use tracing::debug;

use crate::Result;
#[cfg(feature = "html")]
use crate::AsciidownError;

/// The main service for converting documents to AsciiDoc
pub struct AsciidownService {
    options: ParserOptions,
}

impl AsciidownService {
    /// Create a new AsciidownService with default options
    pub fn new() -> Self {
        Self {
            options: ParserOptions::default(),
        }
    }

    /// Create an AsciidownService with custom options
    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Convert a document tree to AsciiDoc
    pub fn convert(&self, node: &Node) -> Result<String> {
        Ok(asciidown_core::convert(node, &self.options)?)
    }

    /// Convert Markdown to AsciiDoc
    #[cfg(feature = "markdown")]
    pub fn convert_markdown(&self, markdown: &str) -> Result<String> {
        let tree = crate::markdown::parse_markdown(markdown, &self.options);
        debug!(blocks = tree.children().len(), "parsed markdown");
        self.convert(&tree)
    }

    /// Convert an HTML fragment to AsciiDoc
    #[cfg(feature = "html")]
    pub fn convert_html(&self, html: &str) -> Result<String> {
        if !self.options.html_to_native {
            return Err(AsciidownError::InvalidInput(
                "HTML input requires `html_to_native`".to_string(),
            ));
        }
        let tree = Node::Document(crate::html::parse_html(html));
        debug!(blocks = tree.children().len(), "parsed html");
        self.convert(&tree)
    }

    /// Get the current options
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut ParserOptions {
        &mut self.options
    }
}

impl Default for AsciidownService {
    fn default() -> Self {
        Self::new()
    }
}
