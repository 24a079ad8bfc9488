//! ML Parser Tokens
//!
//! Corresponds to packages/compiler/src/ml_parser/tokens.ts

use smallvec::SmallVec;

use crate::parse_util::ParseSourceSpan;

/// At most `[prefix, name]`; kept inline.
pub type TokenParts = SmallVec<[String; 2]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    /// parts: `[prefix, name]`
    TagOpenStart,
    TagOpenEnd,
    TagOpenEndVoid,
    /// parts: `[prefix, name]`
    TagClose,
    /// parts: `[prefix, name]`; the tag ran into EOF or another tag
    IncompleteTagOpen,
    /// parts: `[decoded text]`
    Text,
    EscapableRawText,
    RawText,
    /// parts: `[content]`
    Comment,
    /// parts: `[content]`
    Cdata,
    /// parts: `[content]`
    DocType,
    /// parts: `[prefix, name]`
    AttrName,
    /// parts: `[quote]`
    AttrQuote,
    /// parts: `[decoded value]`
    AttrValue,
    Eof,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub token_type: TokenType,
    pub parts: TokenParts,
    pub source_span: ParseSourceSpan,
}

impl Token {
    pub fn new(token_type: TokenType, parts: Vec<String>, source_span: ParseSourceSpan) -> Self {
        Token {
            token_type,
            parts: SmallVec::from_vec(parts),
            source_span,
        }
    }

    /// The `i`th part, or `""` when absent.
    pub fn part(&self, i: usize) -> &str {
        self.parts.get(i).map(String::as_str).unwrap_or("")
    }
}
