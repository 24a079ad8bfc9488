//! HTML Parser
//!
//! Corresponds to packages/compiler/src/ml_parser/html_parser.ts

use super::html_tags::get_html_tag_definition;
use super::lexer::TokenizeOptions;
use super::parser::{ParseTreeResult, Parser};

/// [`Parser`] wired to the HTML tag definitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl HtmlParser {
    pub fn new() -> Self {
        HtmlParser
    }

    /// Parse HTML template source; `url` only labels diagnostics.
    pub fn parse(&self, source: &str, url: &str, options: &TokenizeOptions) -> ParseTreeResult {
        Parser::new(get_html_tag_definition).parse(source, url, options)
    }
}
