//! Inline formatting markers

/// Inline formatting expressible as an AsciiDoc constrained-quote pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineFormat {
    Bold,
    Italic,
    Monospace,
}

impl InlineFormat {
    /// Map an embedded markup tag name (case-insensitive) to a format
    pub fn from_tag_name(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "b" | "strong" | "bold" => Some(InlineFormat::Bold),
            "i" | "em" | "italic" => Some(InlineFormat::Italic),
            "code" | "tt" | "samp" | "monospace" => Some(InlineFormat::Monospace),
            _ => None,
        }
    }

    pub fn marker(self) -> char {
        match self {
            InlineFormat::Bold => '*',
            InlineFormat::Italic => '_',
            InlineFormat::Monospace => '`',
        }
    }

    /// Surround rendered content with this format's markers.
    ///
    /// Blank content is returned unchanged; an empty quote pair is not valid
    /// AsciiDoc formatting.
    pub fn wrap(self, content: &str) -> String {
        if content.trim().is_empty() {
            return content.to_string();
        }
        let marker = self.marker();
        let mut out = String::with_capacity(content.len() + 2);
        out.push(marker);
        out.push_str(content);
        out.push(marker);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_name() {
        assert_eq!(InlineFormat::from_tag_name("B"), Some(InlineFormat::Bold));
        assert_eq!(InlineFormat::from_tag_name("em"), Some(InlineFormat::Italic));
        assert_eq!(
            InlineFormat::from_tag_name("code"),
            Some(InlineFormat::Monospace)
        );
        assert_eq!(InlineFormat::from_tag_name("span"), None);
    }

    #[test]
    fn test_wrap() {
        assert_eq!(InlineFormat::Bold.wrap("bold"), "*bold*");
        assert_eq!(InlineFormat::Italic.wrap("italic"), "_italic_");
        assert_eq!(InlineFormat::Monospace.wrap("mono"), "`mono`");
        assert_eq!(InlineFormat::Bold.wrap(" "), " ");
    }
}
