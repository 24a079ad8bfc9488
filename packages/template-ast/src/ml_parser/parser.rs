//! ML Parser
//!
//! Corresponds to packages/compiler/src/ml_parser/parser.ts
//! Builds the element tree from the token stream, applying the implicit
//! closing and namespace rules of the tag definitions.

use std::sync::Arc;

use super::ast::{Attribute, Comment, Element, Node, Text};
use super::html_tags::HtmlTagDefinition;
use super::lexer::{tokenize, TokenizeOptions};
use super::tags::{get_ns_prefix, merge_ns_and_name, split_ns_name};
use super::tokens::{Token, TokenType};
use crate::parse_util::{ParseError, ParseSourceFile, ParseSourceSpan};

/// Tree parsing error
#[derive(Debug, Clone)]
pub struct TreeError {
    pub element_name: Option<String>,
    pub span: ParseSourceSpan,
    pub msg: String,
}

impl TreeError {
    pub fn create(element_name: Option<String>, span: ParseSourceSpan, msg: String) -> Self {
        TreeError {
            element_name,
            span,
            msg,
        }
    }
}

/// Parse tree result
#[derive(Debug, Clone)]
pub struct ParseTreeResult {
    pub root_nodes: Vec<Node>,
    pub errors: Vec<ParseError>,
}

impl ParseTreeResult {
    pub fn new(root_nodes: Vec<Node>, errors: Vec<ParseError>) -> Self {
        ParseTreeResult { root_nodes, errors }
    }
}

pub type TagDefinitionLookup = fn(&str) -> &'static HtmlTagDefinition;

pub struct Parser {
    pub get_tag_definition: TagDefinitionLookup,
}

impl Parser {
    pub fn new(get_tag_definition: TagDefinitionLookup) -> Self {
        Parser { get_tag_definition }
    }

    pub fn parse(&self, source: &str, url: &str, options: &TokenizeOptions) -> ParseTreeResult {
        let file = Arc::new(ParseSourceFile::new(source.to_string(), url.to_string()));
        let tokenize_result = tokenize(file, options);

        let mut tree_builder = TreeBuilder::new(tokenize_result.tokens, self.get_tag_definition);
        tree_builder.build();

        let mut errors = tokenize_result.errors;
        errors.extend(
            tree_builder
                .errors
                .into_iter()
                .map(|e| ParseError::new(e.span, e.msg)),
        );
        ParseTreeResult::new(tree_builder.root_nodes, errors)
    }
}

struct TreeBuilder {
    tokens: Vec<Token>,
    index: usize,
    get_tag_definition: TagDefinitionLookup,
    container_stack: Vec<Element>,
    root_nodes: Vec<Node>,
    errors: Vec<TreeError>,
}

impl TreeBuilder {
    fn new(tokens: Vec<Token>, get_tag_definition: TagDefinitionLookup) -> Self {
        TreeBuilder {
            tokens,
            index: 0,
            get_tag_definition,
            container_stack: Vec::new(),
            root_nodes: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn build(&mut self) {
        while let Some(token) = self.advance() {
            match token.token_type {
                TokenType::TagOpenStart | TokenType::IncompleteTagOpen => self.consume_start_tag(token),
                TokenType::TagClose => self.consume_end_tag(token),
                TokenType::Text | TokenType::RawText | TokenType::EscapableRawText => {
                    self.consume_text(token)
                }
                TokenType::Cdata => {
                    let text = Text::new(token.part(0).to_string(), token.source_span);
                    self.add_to_parent(Node::Text(text));
                }
                TokenType::Comment => {
                    let comment = Comment::new(Some(token.part(0).trim().to_string()), token.source_span);
                    self.add_to_parent(Node::Comment(comment));
                }
                TokenType::Eof => break,
                _ => {}
            }
        }

        // Unclosed elements end where the input does.
        while let Some(el) = self.container_stack.pop() {
            self.add_to_parent(Node::Element(el));
        }
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned();
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    fn peek_type(&self) -> Option<TokenType> {
        self.tokens.get(self.index).map(|t| t.token_type)
    }

    fn advance_if(&mut self, token_type: TokenType) -> Option<Token> {
        if self.peek_type() == Some(token_type) {
            return self.advance();
        }
        None
    }

    fn consume_text(&mut self, token: Token) {
        let mut text = token.part(0).to_string();
        if text.starts_with('\n') {
            if let Some(parent) = self.container_stack.last() {
                if parent.children.is_empty() && (self.get_tag_definition)(&parent.name).ignore_first_lf {
                    text.remove(0);
                }
            }
        }
        if !text.is_empty() {
            self.add_to_parent(Node::Text(Text::new(text, token.source_span)));
        }
    }

    fn consume_start_tag(&mut self, start_token: Token) {
        let prefix = start_token.part(0).to_string();
        let name = start_token.part(1).to_string();

        let mut attrs = Vec::new();
        while let Some(attr_name) = self.advance_if(TokenType::AttrName) {
            attrs.push(self.consume_attr(attr_name));
        }

        let full_name = self.get_element_full_name(&prefix, &name);
        let tag_def = (self.get_tag_definition)(&full_name);
        let mut start_end = match attrs.last() {
            Some(attr) => attr.source_span.end.clone(),
            None => start_token.source_span.end.clone(),
        };

        let mut self_closing = false;
        if let Some(end) = self.advance_if(TokenType::TagOpenEndVoid) {
            self_closing = true;
            start_end = end.source_span.end;
            if !(tag_def.is_void || get_ns_prefix(&full_name).is_some() || name.contains('-')) {
                self.errors.push(TreeError::create(
                    Some(full_name.clone()),
                    start_token.source_span.clone(),
                    format!("Only void, custom and foreign elements can be self closed \"{}\"", name),
                ));
            }
        } else if let Some(end) = self.advance_if(TokenType::TagOpenEnd) {
            start_end = end.source_span.end;
        }

        let start_span = ParseSourceSpan::new(start_token.source_span.start.clone(), start_end);
        let el = Element {
            name: full_name.clone(),
            attrs,
            children: Vec::new(),
            is_self_closing: self_closing,
            source_span: start_span.clone(),
            start_source_span: start_span.clone(),
            end_source_span: None,
            is_void: tag_def.is_void,
        };
        self.push_container(el);

        if self_closing {
            self.pop_container(&full_name, Some(start_span));
        } else if start_token.token_type == TokenType::IncompleteTagOpen {
            self.pop_container(&full_name, None);
            self.errors.push(TreeError::create(
                Some(full_name.clone()),
                start_span,
                format!("Opening tag \"{}\" not terminated.", full_name),
            ));
        } else if tag_def.is_void {
            self.pop_container(&full_name, None);
        }
    }

    fn consume_attr(&mut self, attr_name: Token) -> Attribute {
        let full_name = merge_ns_and_name(Some(attr_name.part(0)), attr_name.part(1));
        let mut end = attr_name.source_span.end.clone();
        let mut value = String::new();
        let mut value_span = None;

        if let Some(quote) = self.advance_if(TokenType::AttrQuote) {
            end = quote.source_span.end;
        }
        if let Some(value_token) = self.advance_if(TokenType::AttrValue) {
            value = value_token.part(0).to_string();
            end = value_token.source_span.end.clone();
            value_span = Some(value_token.source_span);
        }
        if let Some(quote) = self.advance_if(TokenType::AttrQuote) {
            end = quote.source_span.end;
        }

        let source_span = ParseSourceSpan::new(attr_name.source_span.start.clone(), end);
        Attribute::new(full_name, value, source_span, attr_name.source_span, value_span)
    }

    fn consume_end_tag(&mut self, token: Token) {
        let full_name = self.get_element_full_name(token.part(0), token.part(1));

        if (self.get_tag_definition)(&full_name).is_void {
            self.errors.push(TreeError::create(
                Some(full_name.clone()),
                token.source_span.clone(),
                format!("Void elements do not have end tags \"{}\"", token.part(1)),
            ));
            return;
        }

        if !self.pop_container(&full_name, Some(token.source_span.clone())) {
            self.errors.push(TreeError::create(
                Some(full_name.clone()),
                token.source_span,
                format!(
                    "Unexpected closing tag \"{}\". It may happen when the tag has already been closed by another tag. For more info see https://www.w3.org/TR/html5/syntax.html#closing-elements-that-have-implied-end-tags",
                    full_name
                ),
            ));
        }
    }

    fn push_container(&mut self, el: Element) {
        let parent_closed = self
            .container_stack
            .last()
            .map(|parent| (self.get_tag_definition)(&parent.name).is_closed_by_child(&el.name))
            .unwrap_or(false);
        if parent_closed {
            if let Some(parent) = self.container_stack.pop() {
                self.add_to_parent(Node::Element(parent));
            }
        }
        self.container_stack.push(el);
    }

    /// Closes the innermost open element named `expected_name` together with
    /// everything opened inside it. Returns false when no such element is open
    /// or when an element that needs an explicit end tag was closed implicitly.
    fn pop_container(&mut self, expected_name: &str, end_span: Option<ParseSourceSpan>) -> bool {
        let mut unexpected_close_tag_detected = false;
        for stack_index in (0..self.container_stack.len()).rev() {
            let node = &self.container_stack[stack_index];
            if node.name == expected_name {
                while self.container_stack.len() > stack_index + 1 {
                    if let Some(child) = self.container_stack.pop() {
                        self.add_to_parent(Node::Element(child));
                    }
                }
                if let Some(mut el) = self.container_stack.pop() {
                    if let Some(end) = end_span {
                        el.source_span.end = end.end.clone();
                        el.end_source_span = Some(end);
                    }
                    self.add_to_parent(Node::Element(el));
                }
                return !unexpected_close_tag_detected;
            }
            if !(self.get_tag_definition)(&node.name).closed_by_parent {
                unexpected_close_tag_detected = true;
            }
        }
        false
    }

    fn add_to_parent(&mut self, node: Node) {
        let siblings = match self.container_stack.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.root_nodes,
        };
        if let (Node::Text(text), Some(Node::Text(prev))) = (&node, siblings.last_mut()) {
            prev.value.push_str(&text.value);
            prev.source_span.end = text.source_span.end.clone();
            return;
        }
        siblings.push(node);
    }

    fn get_element_full_name(&self, prefix: &str, local_name: &str) -> String {
        let mut prefix = prefix.to_string();
        if prefix.is_empty() {
            prefix = (self.get_tag_definition)(local_name)
                .implicit_namespace_prefix
                .unwrap_or("")
                .to_string();
            if prefix.is_empty() {
                if let Some(parent) = self.container_stack.last() {
                    let parent_tag_name = split_ns_name(&parent.name).1;
                    if !(self.get_tag_definition)(parent_tag_name).prevent_namespace_inheritance {
                        prefix = get_ns_prefix(&parent.name).unwrap_or("").to_string();
                    }
                }
            }
        }
        merge_ns_and_name(Some(&prefix), local_name)
    }
}
