//! AsciiDoc conversion
//!
//! Walks a document tree depth-first and renders each node to AsciiDoc text.
//! Every block renderer terminates its output with a blank line, except
//! lists, which end with a single line break.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::admonition;
use crate::ast::{Node, NodeKind};
use crate::format::InlineFormat;
use crate::options::ParserOptions;
use crate::{ConvertError, Result};

/// Separator appended after every non-list block
const BLOCK_END: &str = "\n\n";

/// Listing block delimiter
const LISTING_DELIMITER: &str = "----";

/// Quote block delimiter
const QUOTE_DELIMITER: &str = "____";

/// URL schemes AsciiDoc turns into links without the `link:` macro
static AUTOLINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:https?|ftp|irc)://|mailto:)").expect("autolink pattern is valid")
});

static DEFAULT_OPTIONS: ParserOptions = ParserOptions::DEFAULT;

/// Per-call conversion state threaded through the recursion
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    parent: Option<&'a Node>,
    list_depth: Option<usize>,
    options: &'a ParserOptions,
}

impl<'a> Context<'a> {
    /// Create a root context (no parent, outside any list)
    pub fn new(options: &'a ParserOptions) -> Self {
        Self {
            parent: None,
            list_depth: None,
            options,
        }
    }

    /// Derive a context whose immediate parent is `parent`
    pub fn with_parent(self, parent: &'a Node) -> Self {
        Self {
            parent: Some(parent),
            ..self
        }
    }

    /// Derive a context at the given list nesting depth (outermost list = 1)
    pub fn with_list_depth(self, depth: usize) -> Self {
        Self {
            list_depth: Some(depth.max(1)),
            ..self
        }
    }

    fn outside_list(self) -> Self {
        Self {
            list_depth: None,
            ..self
        }
    }

    pub fn parent(&self) -> Option<&'a Node> {
        self.parent
    }

    pub fn list_depth(&self) -> Option<usize> {
        self.list_depth
    }

    /// Parser options carried through unread
    pub fn options(&self) -> &'a ParserOptions {
        self.options
    }
}

impl Default for Context<'static> {
    fn default() -> Self {
        Context::new(&DEFAULT_OPTIONS)
    }
}

/// Convert a whole document tree to AsciiDoc
pub fn convert(root: &Node, options: &ParserOptions) -> Result<String> {
    let mut output = convert_node(root, Context::new(options))?;

    let trimmed_len = output.trim_end_matches('\n').len();
    output.truncate(trimmed_len);
    Ok(output)
}

/// Dispatch a node to the renderer for its kind
pub fn convert_node(node: &Node, ctx: Context<'_>) -> Result<String> {
    trace!(kind = %node.kind(), "converting node");

    match node {
        Node::Document(children) => convert_blocks(children, ctx.with_parent(node)),
        Node::Paragraph(_) => convert_paragraph(node, ctx),
        Node::Heading { .. } => convert_heading(node, ctx),
        Node::BlockQuote(_) => convert_block_quote(node, ctx),
        Node::UnorderedList(_) => convert_unordered_list(node, ctx),
        Node::OrderedList { .. } => convert_ordered_list(node, ctx),
        Node::ListItem { .. } => {
            let depth = ctx.list_depth().unwrap_or(1);
            convert_list_item(node, &list_marker('*', depth), ctx.with_list_depth(depth))
        }
        Node::Image { .. } => convert_image(node, ctx),
        Node::CodeBlock { .. } => convert_code_block(node, ctx),
        Node::ThematicBreak => convert_thematic_break(node, ctx),
        Node::RawMarkup { .. } => convert_raw_markup(node, ctx),
        Node::Text(text) => Ok(text.clone()),
        Node::Emphasis(children) => {
            let content = convert_inlines(children, ctx.with_parent(node))?;
            Ok(InlineFormat::Italic.wrap(&content))
        }
        Node::Strong(children) => {
            let content = convert_inlines(children, ctx.with_parent(node))?;
            Ok(InlineFormat::Bold.wrap(&content))
        }
        Node::CodeSpan(code) => Ok(InlineFormat::Monospace.wrap(code)),
        Node::Link { .. } => convert_link(node, ctx),
        Node::LineBreak => Ok(" +\n".to_string()),
        Node::Extension { name, .. } => Err(ConvertError::UnsupportedNodeKind { kind: name.clone() }),
    }
}

/// Convert a paragraph, promoting a leading admonition label
pub fn convert_paragraph(node: &Node, ctx: Context<'_>) -> Result<String> {
    let Node::Paragraph(children) = node else {
        return Err(unexpected(NodeKind::Paragraph, node));
    };

    let mut text = convert_inlines(children, ctx.with_parent(node))?;
    let trimmed_len = text.trim_end_matches('\n').len();
    text.truncate(trimmed_len);

    let mut out = match admonition::promote(&text) {
        Some(promoted) => {
            debug!(paragraph = %promoted, "promoted paragraph to admonition");
            promoted
        }
        None => text,
    };
    out.push_str(BLOCK_END);
    Ok(out)
}

/// Convert a heading to a `=`-prefixed section title
pub fn convert_heading(node: &Node, ctx: Context<'_>) -> Result<String> {
    let Node::Heading { level, children } = node else {
        return Err(unexpected(NodeKind::Heading, node));
    };

    if !(1..=6).contains(level) {
        return Err(ConvertError::InvalidNodeAttribute {
            kind: NodeKind::Heading,
            attribute: "level",
        });
    }

    let text = convert_inlines(children, ctx.with_parent(node))?;
    Ok(format!(
        "{} {}{}",
        "=".repeat(usize::from(*level)),
        text.trim(),
        BLOCK_END
    ))
}

/// Convert a block quote to a delimited quote block
pub fn convert_block_quote(node: &Node, ctx: Context<'_>) -> Result<String> {
    let Node::BlockQuote(children) = node else {
        return Err(unexpected(NodeKind::BlockQuote, node));
    };

    let body = convert_blocks(children, ctx.with_parent(node).outside_list())?;

    let mut out = String::with_capacity(body.len() + 16);
    out.push_str(QUOTE_DELIMITER);
    out.push('\n');
    out.push_str(body.trim_end_matches('\n'));
    out.push('\n');
    out.push_str(QUOTE_DELIMITER);
    out.push_str(BLOCK_END);
    Ok(out)
}

/// Convert a bulleted list; markers grow with nesting depth
pub fn convert_unordered_list(node: &Node, ctx: Context<'_>) -> Result<String> {
    let Node::UnorderedList(items) = node else {
        return Err(unexpected(NodeKind::UnorderedList, node));
    };

    convert_list(node, items, '*', ctx)
}

/// Convert a numbered list; AsciiDoc numbers `.` markers itself
pub fn convert_ordered_list(node: &Node, ctx: Context<'_>) -> Result<String> {
    let Node::OrderedList { start, items } = node else {
        return Err(unexpected(NodeKind::OrderedList, node));
    };

    let mut out = String::new();
    if *start != 1 {
        out.push_str(&format!("[start={start}]\n"));
    }
    out.push_str(&convert_list(node, items, '.', ctx)?);
    Ok(out)
}

fn convert_list(list: &Node, items: &[Node], marker: char, ctx: Context<'_>) -> Result<String> {
    if items.is_empty() {
        return Err(ConvertError::InvalidNodeAttribute {
            kind: list.kind(),
            attribute: "items",
        });
    }

    let depth = ctx.list_depth().unwrap_or(1);
    debug!(depth, items = items.len(), "converting list");

    let marker = list_marker(marker, depth);
    let item_ctx = ctx.with_parent(list).with_list_depth(depth);

    let mut out = String::new();
    for item in items {
        if !matches!(item, Node::ListItem { .. }) {
            return Err(unexpected(NodeKind::ListItem, item));
        }
        out.push_str(&convert_list_item(item, &marker, item_ctx)?);
    }
    Ok(out)
}

/// Marker for an item at `depth`: (depth - 1) spaces, then `depth` marker chars
fn list_marker(marker: char, depth: usize) -> String {
    let depth = depth.max(1);
    let mut out = " ".repeat(depth - 1);
    for _ in 0..depth {
        out.push(marker);
    }
    out.push(' ');
    out
}

fn convert_list_item(item: &Node, marker: &str, ctx: Context<'_>) -> Result<String> {
    let Node::ListItem { checked, children } = item else {
        return Err(unexpected(NodeKind::ListItem, item));
    };

    let depth = ctx.list_depth().unwrap_or(1);
    let item_ctx = ctx.with_parent(item);

    // Principal text goes on the marker line; everything after it follows
    let mut text = String::new();
    let mut tail = String::new();
    let mut has_text = false;

    for child in children {
        match child {
            inline if inline.is_inline() && tail.is_empty() => {
                text.push_str(&convert_node(inline, item_ctx)?);
                has_text = true;
            }
            // Parent stays the item so images on the marker line render inline
            Node::Paragraph(inlines) if !has_text => {
                text.push_str(&convert_inlines(inlines, item_ctx)?);
                has_text = true;
            }
            nested if nested.is_list() => {
                tail.push_str(&convert_node(nested, item_ctx.with_list_depth(depth + 1))?);
            }
            block => {
                let rendered = convert_node(block, item_ctx)?;
                tail.push_str("+\n");
                tail.push_str(rendered.trim_end_matches('\n'));
                tail.push('\n');
            }
        }
    }

    let mut out = String::with_capacity(marker.len() + text.len() + tail.len() + 8);
    out.push_str(marker);
    match checked {
        Some(true) => out.push_str("[x] "),
        Some(false) => out.push_str("[ ] "),
        None => {}
    }
    out.push_str(text.trim_end_matches('\n'));
    out.push('\n');
    out.push_str(&tail);
    Ok(out)
}

/// Convert an image; a paragraph's sole child becomes a block image
pub fn convert_image(node: &Node, ctx: Context<'_>) -> Result<String> {
    let Node::Image {
        source,
        alt_text,
        title,
    } = node
    else {
        return Err(unexpected(NodeKind::Image, node));
    };

    if source.is_empty() {
        return Err(ConvertError::InvalidNodeAttribute {
            kind: NodeKind::Image,
            attribute: "source",
        });
    }

    let is_block = matches!(ctx.parent(), Some(Node::Paragraph(siblings)) if siblings.len() == 1);
    debug!(source = %source, is_block, "converting image");

    if is_block {
        let mut out = String::new();
        if let Some(title) = title {
            out.push('.');
            out.push_str(title);
            out.push('\n');
        }
        out.push_str(&format!("image::{source}[{}]", escape_bracket(alt_text)));
        Ok(out)
    } else {
        Ok(match title {
            Some(title) => format!(
                "image:{source}[{},title={}]",
                quote_attribute(alt_text),
                quote_attribute(title)
            ),
            None => format!("image:{source}[{}]", escape_bracket(alt_text)),
        })
    }
}

/// Convert a code block to a listing or source block
pub fn convert_code_block(node: &Node, _ctx: Context<'_>) -> Result<String> {
    let Node::CodeBlock { language, raw_text } = node else {
        return Err(unexpected(NodeKind::CodeBlock, node));
    };

    let mut out = String::with_capacity(raw_text.len() + 32);
    if let Some(language) = language.as_deref().filter(|l| !l.is_empty()) {
        out.push_str("[source,");
        out.push_str(language);
        out.push_str("]\n");
    }
    out.push_str(LISTING_DELIMITER);
    out.push('\n');
    out.push_str(raw_text);
    if !raw_text.is_empty() && !raw_text.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(LISTING_DELIMITER);
    out.push_str(BLOCK_END);
    Ok(out)
}

/// Convert a thematic break; the source rule style is not preserved
pub fn convert_thematic_break(node: &Node, _ctx: Context<'_>) -> Result<String> {
    if !matches!(node, Node::ThematicBreak) {
        return Err(unexpected(NodeKind::ThematicBreak, node));
    }
    Ok(format!("'''{BLOCK_END}"))
}

/// Translate an embedded markup span into AsciiDoc formatting markers
pub fn convert_raw_markup(node: &Node, ctx: Context<'_>) -> Result<String> {
    let Node::RawMarkup { tag_name, children } = node else {
        return Err(unexpected(NodeKind::RawMarkup, node));
    };

    let Some(format) = InlineFormat::from_tag_name(tag_name) else {
        return Err(ConvertError::UnsupportedNodeKind {
            kind: format!("{} <{}>", NodeKind::RawMarkup, tag_name),
        });
    };

    let content = convert_inlines(children, ctx.with_parent(node))?;
    Ok(format.wrap(&content))
}

/// Convert a link to a bare URL, a URL macro, or a `link:` macro
pub fn convert_link(node: &Node, ctx: Context<'_>) -> Result<String> {
    let Node::Link {
        url,
        title,
        children,
    } = node
    else {
        return Err(unexpected(NodeKind::Link, node));
    };

    if url.is_empty() {
        return Err(ConvertError::InvalidNodeAttribute {
            kind: NodeKind::Link,
            attribute: "url",
        });
    }

    let text = convert_inlines(children, ctx.with_parent(node))?;
    let autolinks = AUTOLINK_RE.is_match(url);

    if autolinks && title.is_none() && (text.is_empty() || text == *url) {
        return Ok(url.clone());
    }

    let target = if autolinks {
        url.clone()
    } else {
        format!("link:{url}")
    };

    Ok(match title {
        Some(title) => format!(
            "{target}[{},title={}]",
            quote_attribute(&text),
            quote_attribute(title)
        ),
        None => format!("{target}[{}]", escape_bracket(&text)),
    })
}

/// Concatenate rendered inline children in document order
fn convert_inlines(children: &[Node], ctx: Context<'_>) -> Result<String> {
    let mut out = String::new();
    for child in children {
        out.push_str(&convert_node(child, ctx)?);
    }
    Ok(out)
}

/// Render a sequence of blocks, keeping a blank line between them
fn convert_blocks(blocks: &[Node], ctx: Context<'_>) -> Result<String> {
    let mut out = String::new();
    for block in blocks {
        if !out.is_empty() && !out.ends_with(BLOCK_END) {
            // Lists and stray inline nodes end short of a blank line
            if out.ends_with('\n') {
                out.push('\n');
            } else {
                out.push_str(BLOCK_END);
            }
        }
        out.push_str(&convert_node(block, ctx)?);
    }
    Ok(out)
}

/// Escape `]` so text cannot close a macro's attribute list
fn escape_bracket(text: &str) -> String {
    text.replace(']', "\\]")
}

/// Double-quoted attribute value with `"` and `]` escaped
fn quote_attribute(value: &str) -> String {
    format!("\"{}\"", escape_bracket(value).replace('"', "\\\""))
}

fn unexpected(expected: NodeKind, found: &Node) -> ConvertError {
    ConvertError::UnexpectedNodeKind {
        expected,
        found: found.kind(),
    }
}
