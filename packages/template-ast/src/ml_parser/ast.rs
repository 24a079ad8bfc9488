//! ML Parser AST
//!
//! Corresponds to packages/compiler/src/ml_parser/ast.ts
//! The generic markup tree handed to the template transform.

use crate::parse_util::ParseSourceSpan;

/// Node type union
#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(Text),
    Comment(Comment),
}

impl Node {
    pub fn source_span(&self) -> &ParseSourceSpan {
        match self {
            Node::Element(el) => &el.source_span,
            Node::Text(text) => &text.source_span,
            Node::Comment(comment) => &comment.source_span,
        }
    }
}

/// Text node, character references already decoded
#[derive(Debug, Clone)]
pub struct Text {
    pub value: String,
    pub source_span: ParseSourceSpan,
}

impl Text {
    pub fn new(value: String, source_span: ParseSourceSpan) -> Self {
        Text { value, source_span }
    }
}

/// Attribute node
#[derive(Debug, Clone)]
pub struct Attribute {
    /// Namespace-qualified (`:xlink:href`) when written with a prefix.
    pub name: String,
    pub value: String,
    pub source_span: ParseSourceSpan,
    pub key_span: ParseSourceSpan,
    pub value_span: Option<ParseSourceSpan>,
}

impl Attribute {
    pub fn new(
        name: String,
        value: String,
        source_span: ParseSourceSpan,
        key_span: ParseSourceSpan,
        value_span: Option<ParseSourceSpan>,
    ) -> Self {
        Attribute {
            name,
            value,
            source_span,
            key_span,
            value_span,
        }
    }
}

/// Element node
#[derive(Debug, Clone)]
pub struct Element {
    /// Namespace-qualified (`:svg:rect`) when the element lives in a namespace.
    pub name: String,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Node>,
    pub is_self_closing: bool,
    pub source_span: ParseSourceSpan,
    pub start_source_span: ParseSourceSpan,
    pub end_source_span: Option<ParseSourceSpan>,
    pub is_void: bool,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&Attribute> {
        self.attrs.iter().find(|attr| attr.name == name)
    }
}

/// Comment node
#[derive(Debug, Clone)]
pub struct Comment {
    pub value: Option<String>,
    pub source_span: ParseSourceSpan,
}

impl Comment {
    pub fn new(value: Option<String>, source_span: ParseSourceSpan) -> Self {
        Comment { value, source_span }
    }
}
