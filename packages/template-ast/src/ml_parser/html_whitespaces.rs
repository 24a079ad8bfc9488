//! HTML Whitespace Processing
//!
//! Corresponds to packages/compiler/src/ml_parser/html_whitespaces.ts
//!
//! Walks the parse tree and removes / trims text nodes:
//! - spaces, tabs and new lines are whitespace characters;
//! - text nodes consisting of whitespace characters only are dropped;
//! - consecutive whitespace characters in other text nodes collapse to one space;
//! - the &ngsp; pseudo-entity becomes a single space.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ml_parser::ast::{Attribute, Element, Node, Text};
use crate::ml_parser::entities::NGSP_UNICODE;

pub const PRESERVE_WS_ATTR_NAME: &str = "ngPreserveWhitespaces";

const SKIP_WS_TRIM_TAGS: [&str; 5] = ["pre", "template", "textarea", "script", "style"];

// Equivalent to \s with \u00a0 (non-breaking space) excluded.
const WS_CHARS: &str = " \u{000C}\n\r\t\u{000B}\u{1680}\u{180E}\u{2000}\u{2001}\u{2002}\u{2003}\u{2004}\u{2005}\u{2006}\u{2007}\u{2008}\u{2009}\u{200A}\u{2028}\u{2029}\u{202F}\u{205F}\u{3000}\u{FEFF}";

static NO_WS_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("[^{}]", regex::escape(WS_CHARS))).unwrap());

static WS_REPLACE_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("[{}]{{2,}}", regex::escape(WS_CHARS))).unwrap());

fn has_preserve_whitespaces_attr(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| attr.name == PRESERVE_WS_ATTR_NAME)
}

/// The lexer decodes `&ngsp;` to a private-use character; it renders as a space.
pub fn replace_ngsp(value: &str) -> String {
    value.replace(NGSP_UNICODE, " ")
}

pub fn remove_whitespaces(nodes: Vec<Node>) -> Vec<Node> {
    nodes.into_iter().filter_map(visit_node).collect()
}

fn visit_node(node: Node) -> Option<Node> {
    match node {
        Node::Element(element) => Some(Node::Element(visit_element(element))),
        Node::Text(text) => visit_text(text).map(Node::Text),
        Node::Comment(comment) => Some(Node::Comment(comment)),
    }
}

fn visit_element(mut element: Element) -> Element {
    if SKIP_WS_TRIM_TAGS.contains(&element.name.as_str()) || has_preserve_whitespaces_attr(&element.attrs) {
        // Children keep their whitespace; only the marker attribute goes.
        element.attrs.retain(|attr| attr.name != PRESERVE_WS_ATTR_NAME);
        return element;
    }
    element.children = remove_whitespaces(std::mem::take(&mut element.children));
    element
}

fn visit_text(text: Text) -> Option<Text> {
    if !NO_WS_REGEXP.is_match(&text.value) {
        return None;
    }
    let value = WS_REPLACE_REGEXP
        .replace_all(&replace_ngsp(&text.value), " ")
        .into_owned();
    Some(Text::new(value, text.source_span))
}
