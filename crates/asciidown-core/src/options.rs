//! Parser feature toggles
//!
//! These options describe how the external parser built the tree. The
//! converter carries them through its [`Context`](crate::Context) without
//! reading them.

/// Options handed to the parser adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Enable GitHub-flavored extensions (tables, strikethrough, task lists, footnotes)
    pub gfm: bool,

    /// Translate embedded HTML into native nodes
    pub html_to_native: bool,

    /// Treat soft line breaks as hard breaks
    pub hard_wrap: bool,

    /// Convert straight quotes and dashes to typographic ones
    pub smart_punctuation: bool,
}

impl ParserOptions {
    pub const DEFAULT: ParserOptions = ParserOptions {
        gfm: true,
        html_to_native: true,
        hard_wrap: false,
        smart_punctuation: false,
    };
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParserOptions::default();
        assert!(options.gfm);
        assert!(options.html_to_native);
        assert!(!options.hard_wrap);
        assert!(!options.smart_punctuation);
    }
}
