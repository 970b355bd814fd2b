//! HTML translation support.
//!
//! This module parses embedded HTML with scraper and converts it to the
//! document tree, so formatting written as raw HTML reaches AsciiDoc as
//! native markup instead of being passed through.

use scraper::{ElementRef, Html, Node as ScraperNode};
use tracing::debug;

use asciidown_core::{InlineFormat, Node};

use crate::utilities::{
    clean_attribute, collapse_whitespace, is_block, is_dropped, is_unmapped_block,
    language_from_class,
};

/// Parse an HTML fragment into block nodes.
///
/// # Example
///
/// ```rust
/// use asciidown::{parse_html, Node};
///
/// let blocks = parse_html("<p>Hello <b>World</b></p>");
/// assert_eq!(
///     blocks,
///     vec![Node::Paragraph(vec![
///         Node::text("Hello "),
///         Node::raw("b", vec![Node::text("World")]),
///     ])]
/// );
/// ```
pub fn parse_html(html: &str) -> Vec<Node> {
    let document = Html::parse_fragment(html);
    block_children(document.root_element())
}

/// Parse an HTML snippet that sits inside running text into inline nodes
pub fn parse_inline_html(html: &str) -> Vec<Node> {
    let document = Html::parse_fragment(html);
    inline_children(document.root_element())
}

/// Convert children at block level, wrapping loose inline content in paragraphs
fn block_children(element: ElementRef) -> Vec<Node> {
    let mut blocks = Vec::new();
    let mut pending = Vec::new();

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                pending.push(Node::Text(collapse_whitespace(&text.text)));
            }
            ScraperNode::Element(_) => {
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };
                if is_block(child_element.value().name()) {
                    flush_paragraph(&mut pending, &mut blocks);
                    blocks.extend(block_element(child_element));
                } else {
                    pending.extend(inline_element(child_element));
                }
            }
            _ => {}
        }
    }

    flush_paragraph(&mut pending, &mut blocks);
    blocks
}

fn flush_paragraph(pending: &mut Vec<Node>, blocks: &mut Vec<Node>) {
    let inlines = trim_inlines(std::mem::take(pending));
    if !inlines.is_empty() {
        blocks.push(Node::Paragraph(inlines));
    }
}

/// Convert a block-level element
fn block_element(element: ElementRef) -> Vec<Node> {
    let tag = element.value().name().to_lowercase();

    match tag.as_str() {
        "p" => {
            let inlines = trim_inlines(inline_children(element));
            if inlines.is_empty() {
                Vec::new()
            } else {
                vec![Node::Paragraph(inlines)]
            }
        }

        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = tag[1..].parse().unwrap_or(1);
            vec![Node::Heading {
                level,
                children: trim_inlines(inline_children(element)),
            }]
        }

        "blockquote" => vec![Node::BlockQuote(block_children(element))],

        "ul" | "ol" => {
            let items = list_items(element);
            if items.is_empty() {
                debug!(tag = %tag, "skipping HTML list without items");
                return Vec::new();
            }
            if tag == "ul" {
                return vec![Node::UnorderedList(items)];
            }
            let start = element
                .value()
                .attr("start")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(1);
            vec![Node::OrderedList { start, items }]
        }

        "pre" => {
            let code = element
                .children()
                .filter_map(ElementRef::wrap)
                .find(|c| c.value().name() == "code");
            let language = code
                .and_then(|c| c.value().attr("class"))
                .and_then(language_from_class);
            let raw_text: String = element.text().collect();
            vec![Node::CodeBlock {
                language,
                raw_text: raw_text.strip_suffix('\n').unwrap_or(&raw_text).to_string(),
            }]
        }

        "hr" => vec![Node::ThematicBreak],

        unmapped if is_unmapped_block(unmapped) => {
            debug!(tag = %unmapped, "HTML block element has no AsciiDoc mapping");
            vec![Node::Extension {
                name: format!("html <{unmapped}>"),
                children: Vec::new(),
            }]
        }

        // Containers (div, section, li outside a list, ...) - just process children
        _ => block_children(element),
    }
}

fn list_items(element: ElementRef) -> Vec<Node> {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|c| c.value().name() == "li")
        .map(|li| Node::item(block_children(li)))
        .collect()
}

/// Convert children in running text
fn inline_children(element: ElementRef) -> Vec<Node> {
    let mut inlines = Vec::new();

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                let collapsed = collapse_whitespace(&text.text);
                if !collapsed.is_empty() {
                    inlines.push(Node::Text(collapsed));
                }
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    inlines.extend(inline_element(child_element));
                }
            }
            _ => {}
        }
    }

    inlines
}

/// Convert an inline element
fn inline_element(element: ElementRef) -> Vec<Node> {
    let tag = element.value().name().to_lowercase();

    if InlineFormat::from_tag_name(&tag).is_some() {
        return vec![Node::RawMarkup {
            tag_name: tag,
            children: inline_children(element),
        }];
    }

    match tag.as_str() {
        "img" => {
            let source = clean_attribute(element.value().attr("src"));
            let alt_text = element.value().attr("alt").unwrap_or("").to_string();
            let title = element.value().attr("title").map(str::to_string);
            vec![Node::Image {
                source,
                alt_text,
                title,
            }]
        }

        "a" => {
            let url = clean_attribute(element.value().attr("href"));
            let children = inline_children(element);
            if url.is_empty() {
                children
            } else {
                vec![Node::Link {
                    url,
                    title: element.value().attr("title").map(str::to_string),
                    children,
                }]
            }
        }

        "br" => vec![Node::LineBreak],

        dropped if is_dropped(dropped) => Vec::new(),

        // Pass-through inline containers (span, mark, abbr, ...)
        _ => {
            debug!(tag = %tag, "unwrapping HTML element without a formatting mapping");
            inline_children(element)
        }
    }
}

/// Trim outer whitespace of a run of inlines and drop empty text nodes
fn trim_inlines(mut inlines: Vec<Node>) -> Vec<Node> {
    if let Some(Node::Text(text)) = inlines.first_mut() {
        *text = text.trim_start().to_string();
    }
    if let Some(Node::Text(text)) = inlines.last_mut() {
        *text = text.trim_end().to_string();
    }
    inlines.retain(|node| !matches!(node, Node::Text(text) if text.is_empty()));
    inlines
}
