//! Utility functions and constants for the parser adapters.

/// Block-level HTML elements
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "center", "dd", "details",
    "dialog", "dir", "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer",
    "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hgroup", "hr", "html",
    "li", "main", "menu", "nav", "ol", "p", "pre", "section", "summary", "table",
    "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

/// Elements whose content never reaches the output
pub const DROPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Block elements without an AsciiDoc mapping
pub const UNMAPPED_BLOCK_ELEMENTS: &[&str] = &[
    "table", "tbody", "td", "tfoot", "th", "thead", "tr", "dl", "dd", "dt",
];

/// Check if a tag is a block-level element
pub fn is_block(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Check if a tag's content should be discarded
pub fn is_dropped(tag: &str) -> bool {
    DROPPED_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Check if a block tag has no AsciiDoc counterpart in the tree model
pub fn is_unmapped_block(tag: &str) -> bool {
    UNMAPPED_BLOCK_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Collapse runs of whitespace into a single space
pub fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_whitespace = false;

    for c in s.chars() {
        if c.is_whitespace() {
            if !prev_was_whitespace {
                result.push(' ');
                prev_was_whitespace = true;
            }
        } else {
            result.push(c);
            prev_was_whitespace = false;
        }
    }

    result
}

/// Clean an attribute value (trim and handle empty)
pub fn clean_attribute(value: Option<&str>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_default()
}

/// Language of a fenced code block from its info string (`rust,ignore` -> `rust`)
pub fn language_from_info(info: &str) -> Option<String> {
    info.split(|c: char| c.is_whitespace() || c == ',')
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Language of an HTML code element from its `language-*` class
pub fn language_from_class(class: &str) -> Option<String> {
    class
        .split_whitespace()
        .find_map(|c| c.strip_prefix("language-").or_else(|| c.strip_prefix("lang-")))
        .filter(|lang| !lang.is_empty())
        .map(str::to_string)
}
