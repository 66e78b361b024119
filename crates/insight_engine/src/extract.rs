use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

/// Content roots tried in order; the first match wins.
const CONTENT_SELECTORS: &[&str] = &["#maincontent", ".ARTICLE", ".article-body", "article", "body"];

/// Overlays that hide the article rather than belong to it.
const OVERLAY_CLASSES: &[&str] = &["paywall", "overlay", "modal", "subscribe-banner"];

pub trait HtmlTextExtractor: Send + Sync {
    /// Plain text of the page's article content.
    fn extract(&self, html: &str) -> String;
}

/// Lightweight "readability-like" extractor:
/// - renders the first matching content root as plain text, one block per line
/// - skips scripts, styles and paywall overlays
#[derive(Debug, Default)]
pub struct ReadabilityLikeExtractor;

impl HtmlTextExtractor for ReadabilityLikeExtractor {
    fn extract(&self, html: &str) -> String {
        let doc = Html::parse_document(html);

        let root = CONTENT_SELECTORS
            .iter()
            .filter_map(|css| Selector::parse(css).ok())
            .find_map(|sel| doc.select(&sel).next())
            .unwrap_or_else(|| doc.root_element());

        let mut out = TextBuilder::default();
        visit_children(root, &mut out);

        out.finish()
    }
}

fn visit_node(node: NodeRef<'_, Node>, out: &mut TextBuilder) {
    match node.value() {
        Node::Text(text) => out.append_text(text),
        Node::Element(_) => {
            if let Some(element) = ElementRef::wrap(node) {
                visit_element(element, out);
            }
        }
        _ => {
            for child in node.children() {
                visit_node(child, out);
            }
        }
    }
}

fn visit_element(element: ElementRef<'_>, out: &mut TextBuilder) {
    if is_overlay(element) {
        return;
    }
    let tag = element.value().name().to_ascii_lowercase();
    match tag.as_str() {
        "script" | "style" | "noscript" | "iframe" | "template" | "svg" => {}
        "br" => out.ensure_newline(),
        "li" => {
            out.ensure_newline();
            out.append_text("- ");
            visit_children(element, out);
            out.ensure_newline();
        }
        "p" | "div" | "section" | "article" | "header" | "footer" | "nav" | "figure"
        | "figcaption" | "table" | "tr" | "blockquote" | "address" | "ul" | "ol" | "h1"
        | "h2" | "h3" | "h4" | "h5" | "h6" | "main" | "aside" | "pre" => {
            out.ensure_newline();
            visit_children(element, out);
            out.ensure_newline();
        }
        "td" | "th" => {
            visit_children(element, out);
            out.append_text(" ");
        }
        _ => visit_children(element, out),
    }
}

fn visit_children(element: ElementRef<'_>, out: &mut TextBuilder) {
    for child in element.children() {
        visit_node(child, out);
    }
}

fn is_overlay(element: ElementRef<'_>) -> bool {
    element
        .value()
        .classes()
        .any(|class| OVERLAY_CLASSES.iter().any(|o| class.eq_ignore_ascii_case(o)))
}

/// Collapses whitespace runs and keeps at most one newline between blocks.
#[derive(Default)]
struct TextBuilder {
    buf: String,
    last_char: Option<char>,
}

impl TextBuilder {
    fn append_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch.is_whitespace() {
                if self.last_char.is_none() || matches!(self.last_char, Some(' ' | '\n')) {
                    continue;
                }
                self.push_char(' ');
            } else {
                self.push_char(ch);
            }
        }
    }

    fn ensure_newline(&mut self) {
        if self.buf.is_empty() || self.last_char == Some('\n') {
            return;
        }
        if self.last_char == Some(' ') {
            self.buf.pop();
        }
        self.push_char('\n');
    }

    fn push_char(&mut self, ch: char) {
        self.buf.push(ch);
        self.last_char = Some(ch);
    }

    fn finish(self) -> String {
        self.buf.trim().to_string()
    }
}
