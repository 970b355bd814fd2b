//! Markdown parsing support.
//!
//! Markdown itself is parsed by pulldown-cmark; this module folds its event
//! stream into the document tree consumed by the converter.

use once_cell::sync::Lazy;
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag};
use regex::Regex;
use tracing::{debug, warn};

use asciidown_core::{InlineFormat, Node, ParserOptions};

use crate::utilities::language_from_info;

/// A single opening or closing HTML tag, e.g. `<b>` or `</em>`
static HTML_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<(?P<close>/)?(?P<name>[A-Za-z][A-Za-z0-9]*)\b[^>]*>$")
        .expect("HTML tag pattern is valid")
});

/// Parse Markdown into a `Node::Document`.
///
/// # Example
///
/// ```rust
/// use asciidown::{parse_markdown, Node, ParserOptions};
///
/// let tree = parse_markdown("Hello *World*", &ParserOptions::default());
/// assert_eq!(
///     tree,
///     Node::Document(vec![Node::Paragraph(vec![
///         Node::text("Hello "),
///         Node::Emphasis(vec![Node::text("World")]),
///     ])])
/// );
/// ```
pub fn parse_markdown(markdown: &str, options: &ParserOptions) -> Node {
    let parser = Parser::new_ext(markdown, parser_options(options));
    let mut builder = TreeBuilder::new(*options);

    for event in parser {
        builder.process(event);
    }

    builder.finish()
}

fn parser_options(options: &ParserOptions) -> Options {
    let mut flags = Options::empty();
    if options.gfm {
        flags.insert(Options::ENABLE_TABLES);
        flags.insert(Options::ENABLE_STRIKETHROUGH);
        flags.insert(Options::ENABLE_TASKLISTS);
        flags.insert(Options::ENABLE_FOOTNOTES);
    }
    if options.smart_punctuation {
        flags.insert(Options::ENABLE_SMART_PUNCTUATION);
    }
    flags
}

/// An open container waiting for its end event
enum FrameKind {
    Document,
    Paragraph,
    Heading(u8),
    BlockQuote,
    List(Option<u64>),
    Item(Option<bool>),
    CodeBlock(Option<String>),
    HtmlBlock,
    Emphasis,
    Strong,
    Link { url: String, title: Option<String> },
    Image { source: String, title: Option<String> },
    RawMarkup(String),
    Extension(String),
}

struct Frame {
    kind: FrameKind,
    children: Vec<Node>,
}

struct TreeBuilder {
    options: ParserOptions,
    stack: Vec<Frame>,
    // Literal content of the open code or HTML block
    literal: String,
}

impl TreeBuilder {
    fn new(options: ParserOptions) -> Self {
        Self {
            options,
            stack: vec![Frame {
                kind: FrameKind::Document,
                children: Vec::new(),
            }],
            literal: String::new(),
        }
    }

    fn process(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(_) => self.end(),

            Event::Text(text) => match self.top_kind() {
                FrameKind::CodeBlock(_) | FrameKind::HtmlBlock => self.literal.push_str(&text),
                _ => self.push_text(&text),
            },

            Event::Code(code) => self.push(Node::CodeSpan(code.into_string())),

            Event::Html(html) => match self.top_kind() {
                FrameKind::HtmlBlock => self.literal.push_str(&html),
                _ => self.inline_html(html),
            },
            Event::InlineHtml(html) => self.inline_html(html),

            Event::SoftBreak => {
                if self.options.hard_wrap {
                    self.push(Node::LineBreak);
                } else {
                    self.push_text("\n");
                }
            }
            Event::HardBreak => self.push(Node::LineBreak),

            Event::Rule => self.push(Node::ThematicBreak),

            Event::TaskListMarker(checked) => {
                let item = self
                    .stack
                    .iter_mut()
                    .rev()
                    .find_map(|frame| match &mut frame.kind {
                        FrameKind::Item(state) => Some(state),
                        _ => None,
                    });
                if let Some(state) = item {
                    *state = Some(checked);
                }
            }

            Event::FootnoteReference(label) => {
                debug!(label = %label, "footnote reference has no tree mapping");
                self.push(extension("footnote reference"));
            }

            Event::InlineMath(_) | Event::DisplayMath(_) => self.push(extension("math")),
        }
    }

    fn start(&mut self, tag: Tag) {
        let kind = match tag {
            Tag::Paragraph => FrameKind::Paragraph,
            Tag::Heading { level, .. } => FrameKind::Heading(level as u8),
            Tag::BlockQuote(_) => FrameKind::BlockQuote,
            Tag::CodeBlock(kind) => {
                self.literal.clear();
                FrameKind::CodeBlock(match kind {
                    CodeBlockKind::Fenced(info) => language_from_info(&info),
                    CodeBlockKind::Indented => None,
                })
            }
            Tag::HtmlBlock => {
                self.literal.clear();
                FrameKind::HtmlBlock
            }
            Tag::List(start) => FrameKind::List(start),
            Tag::Item => FrameKind::Item(None),
            Tag::Emphasis => FrameKind::Emphasis,
            Tag::Strong => FrameKind::Strong,
            Tag::Link {
                dest_url, title, ..
            } => FrameKind::Link {
                url: dest_url.into_string(),
                title: non_empty(title),
            },
            Tag::Image {
                dest_url, title, ..
            } => FrameKind::Image {
                source: dest_url.into_string(),
                title: non_empty(title),
            },
            Tag::Table(_) => FrameKind::Extension("table".to_string()),
            Tag::FootnoteDefinition(_) => FrameKind::Extension("footnote definition".to_string()),
            Tag::Strikethrough => FrameKind::Extension("strikethrough".to_string()),
            Tag::MetadataBlock(_) => FrameKind::Extension("metadata block".to_string()),
            other => FrameKind::Extension(format!("{other:?}").to_lowercase()),
        };

        self.stack.push(Frame {
            kind,
            children: Vec::new(),
        });
    }

    fn end(&mut self) {
        // Raw spans left open by unbalanced inline HTML close with their container
        while matches!(self.top_kind(), FrameKind::RawMarkup(_)) {
            self.close_top();
        }
        self.close_top();
    }

    fn close_top(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        let Some(frame) = self.stack.pop() else {
            return;
        };

        let nodes = self.build(frame);
        for node in nodes {
            self.push(node);
        }
    }

    fn build(&mut self, frame: Frame) -> Vec<Node> {
        let children = frame.children;

        let node = match frame.kind {
            FrameKind::Document => Node::Document(children),
            FrameKind::Paragraph => Node::Paragraph(children),
            FrameKind::Heading(level) => Node::Heading { level, children },
            FrameKind::BlockQuote => Node::BlockQuote(children),
            FrameKind::List(Some(start)) => Node::OrderedList {
                start: u32::try_from(start).unwrap_or(u32::MAX),
                items: children,
            },
            FrameKind::List(None) => Node::UnorderedList(children),
            FrameKind::Item(checked) => Node::ListItem { checked, children },
            FrameKind::CodeBlock(language) => {
                let mut raw_text = std::mem::take(&mut self.literal);
                if raw_text.ends_with('\n') {
                    raw_text.pop();
                }
                Node::CodeBlock { language, raw_text }
            }
            FrameKind::HtmlBlock => {
                let html = std::mem::take(&mut self.literal);
                return self.html_block(&html);
            }
            FrameKind::Emphasis => Node::Emphasis(children),
            FrameKind::Strong => Node::Strong(children),
            FrameKind::Link { url, title } => Node::Link {
                url,
                title,
                children,
            },
            FrameKind::Image { source, title } => Node::Image {
                source,
                alt_text: children.iter().map(Node::text_content).collect(),
                title,
            },
            FrameKind::RawMarkup(tag_name) => Node::RawMarkup { tag_name, children },
            FrameKind::Extension(name) => {
                debug!(name = %name, "markdown construct has no tree mapping");
                Node::Extension { name, children }
            }
        };

        vec![node]
    }

    #[cfg(feature = "html")]
    fn html_block(&self, html: &str) -> Vec<Node> {
        if self.options.html_to_native {
            crate::html::parse_html(html)
        } else {
            vec![extension("html")]
        }
    }

    #[cfg(not(feature = "html"))]
    fn html_block(&self, _html: &str) -> Vec<Node> {
        if self.options.html_to_native {
            warn!("HTML block found but the `html` feature is disabled");
        }
        vec![extension("html")]
    }

    fn inline_html(&mut self, html: CowStr) {
        if !self.options.html_to_native {
            self.push(extension("html"));
            return;
        }

        let Some(captures) = HTML_TAG_RE.captures(html.trim()) else {
            self.inline_html_fragment(&html);
            return;
        };
        let name = captures["name"].to_lowercase();
        let closing = captures.name("close").is_some();

        if InlineFormat::from_tag_name(&name).is_some() {
            if !closing {
                self.stack.push(Frame {
                    kind: FrameKind::RawMarkup(name),
                    children: Vec::new(),
                });
            } else if matches!(self.top_kind(), FrameKind::RawMarkup(open) if *open == name) {
                self.close_top();
            } else {
                warn!(tag = %name, "ignoring unmatched closing tag");
            }
            return;
        }

        if name == "br" {
            self.push(Node::LineBreak);
            return;
        }

        self.inline_html_fragment(&html);
    }

    #[cfg(feature = "html")]
    fn inline_html_fragment(&mut self, html: &str) {
        let nodes = crate::html::parse_inline_html(html);
        if nodes.is_empty() {
            debug!(html = %html, "dropping inline HTML without content");
        }
        for node in nodes {
            self.push(node);
        }
    }

    #[cfg(not(feature = "html"))]
    fn inline_html_fragment(&mut self, html: &str) {
        debug!(html = %html, "dropping inline HTML");
    }

    fn top_kind(&self) -> &FrameKind {
        // The document frame is never popped
        &self.stack[self.stack.len() - 1].kind
    }

    fn push(&mut self, node: Node) {
        if let Some(frame) = self.stack.last_mut() {
            frame.children.push(node);
        }
    }

    /// Append text, merging with a preceding text node
    fn push_text(&mut self, text: &str) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        match frame.children.last_mut() {
            Some(Node::Text(existing)) => existing.push_str(text),
            _ => frame.children.push(Node::text(text)),
        }
    }

    fn finish(mut self) -> Node {
        while self.stack.len() > 1 {
            self.close_top();
        }
        match self.stack.pop() {
            Some(frame) => Node::Document(frame.children),
            None => Node::Document(Vec::new()),
        }
    }
}

fn extension(name: &str) -> Node {
    Node::Extension {
        name: name.to_string(),
        children: Vec::new(),
    }
}

fn non_empty(value: CowStr) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.into_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(markdown: &str) -> Vec<Node> {
        match parse_markdown(markdown, &ParserOptions::default()) {
            Node::Document(children) => children,
            other => panic!("expected document, got {other:?}"),
        }
    }

    #[test]
    fn test_emphasized_label() {
        assert_eq!(
            parse("*Note*: Remember the milk!"),
            vec![Node::Paragraph(vec![
                Node::Emphasis(vec![Node::text("Note")]),
                Node::text(": Remember the milk!"),
            ])]
        );
    }

    #[test]
    fn test_tight_nested_list() {
        assert_eq!(
            parse("* bread\n  * white\n* milk"),
            vec![Node::UnorderedList(vec![
                Node::item(vec![
                    Node::text("bread"),
                    Node::UnorderedList(vec![Node::item(vec![Node::text("white")])]),
                ]),
                Node::item(vec![Node::text("milk")]),
            ])]
        );
    }

    #[test]
    fn test_ordered_list_start() {
        assert!(matches!(
            parse("3. three\n4. four").as_slice(),
            [Node::OrderedList { start: 3, items }] if items.len() == 2
        ));
    }

    #[test]
    fn test_task_list() {
        assert_eq!(
            parse("- [x] done\n- [ ] todo"),
            vec![Node::UnorderedList(vec![
                Node::ListItem {
                    checked: Some(true),
                    children: vec![Node::text("done")],
                },
                Node::ListItem {
                    checked: Some(false),
                    children: vec![Node::text("todo")],
                },
            ])]
        );
    }

    #[test]
    fn test_image_alt_text() {
        assert_eq!(
            parse("![Rate of Growth](rate-of-growth.png \"Growth\")"),
            vec![Node::Paragraph(vec![Node::Image {
                source: "rate-of-growth.png".to_string(),
                alt_text: "Rate of Growth".to_string(),
                title: Some("Growth".to_string()),
            }])]
        );
    }

    #[test]
    fn test_fenced_code_block() {
        assert_eq!(
            parse("```rust,ignore\nlet x = 1;\n\nlet y = 2;\n```"),
            vec![Node::CodeBlock {
                language: Some("rust".to_string()),
                raw_text: "let x = 1;\n\nlet y = 2;".to_string(),
            }]
        );
    }

    #[test]
    fn test_inline_html_spans() {
        assert_eq!(
            parse("See <b>bold <i>and</i> italic</b> text"),
            vec![Node::Paragraph(vec![
                Node::text("See "),
                Node::raw(
                    "b",
                    vec![
                        Node::text("bold "),
                        Node::raw("i", vec![Node::text("and")]),
                        Node::text(" italic"),
                    ]
                ),
                Node::text(" text"),
            ])]
        );
    }

    #[test]
    fn test_unclosed_inline_html_closes_with_paragraph() {
        assert_eq!(
            parse("open <b>bold"),
            vec![Node::Paragraph(vec![
                Node::text("open "),
                Node::raw("b", vec![Node::text("bold")]),
            ])]
        );
    }

    #[test]
    fn test_inline_br() {
        assert_eq!(
            parse("one<br>two"),
            vec![Node::Paragraph(vec![
                Node::text("one"),
                Node::LineBreak,
                Node::text("two"),
            ])]
        );
    }

    #[test]
    fn test_html_block_without_translation() {
        let options = ParserOptions {
            html_to_native: false,
            ..ParserOptions::default()
        };
        let tree = parse_markdown("<div>raw</div>", &options);
        assert!(matches!(
            tree.children(),
            [Node::Extension { name, .. }] if name == "html"
        ));
    }

    #[test]
    fn test_hard_wrap() {
        let options = ParserOptions {
            hard_wrap: true,
            ..ParserOptions::default()
        };
        assert_eq!(
            parse_markdown("one\ntwo", &options),
            Node::Document(vec![Node::Paragraph(vec![
                Node::text("one"),
                Node::LineBreak,
                Node::text("two"),
            ])])
        );
        assert_eq!(
            parse("one\ntwo"),
            vec![Node::Paragraph(vec![Node::text("one\ntwo")])]
        );
    }

    #[test]
    fn test_table_is_extension() {
        assert!(matches!(
            parse("| a |\n|---|\n| 1 |").as_slice(),
            [Node::Extension { name, .. }] if name == "table"
        ));
    }
}
