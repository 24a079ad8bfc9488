/**
 * Angular Expression Parser - Rust Implementation
 *
 * Recursive descent parser for Angular template expressions
 * Mirrors packages/compiler/src/expression_parser/parser.ts
 */
use thiserror::Error;

use super::ast::*;
use super::lexer::{Lexer, Token, TokenType};
use crate::ml_parser::defaults::InterpolationConfig;

/// Error raised while parsing one expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parser Error: {message} {err_location} [{input}] in {ctx_location}")]
pub struct ParserError {
    pub message: String,
    pub input: String,
    /// `at column <n> in` or `at the end of the expression`
    pub err_location: String,
    /// Where the expression sits in the template, `url@line:col`.
    pub ctx_location: String,
}

impl ParserError {
    pub fn new(message: String, input: &str, err_location: String, ctx_location: &str) -> Self {
        ParserError {
            message,
            input: input.to_string(),
            err_location,
            ctx_location: ctx_location.to_string(),
        }
    }
}

pub(crate) type ParseResult<T> = std::result::Result<T, ParserError>;

/// Interpolation piece (part of interpolation)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpolationPiece {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Split interpolation result; offsets point at the first character of each expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitInterpolation {
    pub strings: Vec<InterpolationPiece>,
    pub expressions: Vec<InterpolationPiece>,
    pub offsets: Vec<usize>,
}

/// Parser for Angular expressions
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    lexer: Lexer,
}

impl Parser {
    pub fn new() -> Self {
        Parser { lexer: Lexer::new() }
    }

    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    /// Event handler expression: assignments and `;` chains allowed, pipes rejected.
    pub fn parse_action(&self, input: &str, location: &str, absolute_offset: usize) -> ASTWithSource {
        self.parse_with_flags(input, location, absolute_offset, true, None)
    }

    /// Property binding expression.
    pub fn parse_binding(
        &self,
        input: &str,
        location: &str,
        absolute_offset: usize,
        interpolation: &InterpolationConfig,
    ) -> ASTWithSource {
        self.parse_with_flags(input, location, absolute_offset, false, Some(interpolation))
    }

    fn parse_with_flags(
        &self,
        input: &str,
        location: &str,
        absolute_offset: usize,
        action: bool,
        interpolation: Option<&InterpolationConfig>,
    ) -> ASTWithSource {
        let mut errors = Vec::new();
        if let Some(config) = interpolation {
            if let Some(error) = self.check_no_interpolation(input, location, config) {
                errors.push(error);
            }
        }
        let ast = if errors.is_empty() {
            let tokens = self.lexer.tokenize(input);
            let mut parse_ast = ParseAST::new(input, location, absolute_offset, tokens, action);
            match parse_ast.parse_chain() {
                Ok(ast) => ast,
                Err(error) => {
                    errors.push(error);
                    empty_expr(input, absolute_offset)
                }
            }
        } else {
            empty_expr(input, absolute_offset)
        };
        ASTWithSource::new(ast, Some(input.to_string()), location.to_string(), absolute_offset, errors)
    }

    /// Parses `a {{ b }} c` into one [`Interpolation`]; `None` when the text holds no interpolation.
    pub fn parse_interpolation(
        &self,
        input: &str,
        location: &str,
        absolute_offset: usize,
        interpolation: &InterpolationConfig,
    ) -> Option<ASTWithSource> {
        let mut errors = Vec::new();
        let split = match self.split_interpolation(input, location, interpolation) {
            Ok(split) => split,
            Err(error) => {
                errors.push(error);
                let ast = empty_expr(input, absolute_offset);
                return Some(ASTWithSource::new(ast, Some(input.to_string()), location.to_string(), absolute_offset, errors));
            }
        };
        if split.expressions.is_empty() {
            return None;
        }

        let mut expressions = Vec::with_capacity(split.expressions.len());
        for (piece, offset) in split.expressions.iter().zip(split.offsets.iter()) {
            let tokens = self.lexer.tokenize(&piece.text);
            let mut parse_ast = ParseAST::new(&piece.text, location, absolute_offset + offset, tokens, false);
            match parse_ast.parse_chain() {
                Ok(ast) => expressions.push(ast),
                Err(error) => {
                    errors.push(error);
                    expressions.push(empty_expr(&piece.text, absolute_offset + offset));
                }
            }
        }

        let span = ParseSpan::new(0, input.len());
        let ast = AST::Interpolation(Interpolation {
            span,
            source_span: span.to_absolute(absolute_offset),
            strings: split.strings.into_iter().map(|piece| piece.text).collect(),
            expressions,
        });
        Some(ASTWithSource::new(ast, Some(input.to_string()), location.to_string(), absolute_offset, errors))
    }

    /// Splits text into literal strings and interpolated expression sources.
    ///
    /// An unterminated interpolation is kept as part of the last literal string.
    pub fn split_interpolation(
        &self,
        input: &str,
        location: &str,
        interpolation: &InterpolationConfig,
    ) -> ParseResult<SplitInterpolation> {
        let start_marker = interpolation.start.as_str();
        let end_marker = interpolation.end.as_str();
        let mut strings: Vec<InterpolationPiece> = Vec::new();
        let mut expressions = Vec::new();
        let mut offsets = Vec::new();
        let mut i = 0;
        let mut at_interpolation = false;
        let mut extend_last_string = false;

        while i < input.len() {
            if !at_interpolation {
                let start = i;
                i = match input[i..].find(start_marker) {
                    Some(found) => i + found,
                    None => input.len(),
                };
                strings.push(InterpolationPiece {
                    text: input[start..i].to_string(),
                    start,
                    end: i,
                });
                at_interpolation = true;
            } else {
                let full_start = i;
                let expr_start = full_start + start_marker.len();
                let expr_end = match interpolation_end_index(input, end_marker, expr_start) {
                    Some(end) => end,
                    None => {
                        at_interpolation = false;
                        extend_last_string = true;
                        break;
                    }
                };
                let full_end = expr_end + end_marker.len();
                let text = &input[expr_start..expr_end];
                if text.trim().is_empty() {
                    return Err(ParserError::new(
                        "Blank expressions are not allowed in interpolated strings".to_string(),
                        input,
                        format!("at column {} in", full_start),
                        location,
                    ));
                }
                expressions.push(InterpolationPiece {
                    text: text.to_string(),
                    start: full_start,
                    end: full_end,
                });
                offsets.push(expr_start);
                i = full_end;
                at_interpolation = false;
            }
        }

        if !at_interpolation {
            if extend_last_string {
                if let Some(last) = strings.last_mut() {
                    last.text.push_str(&input[i..]);
                    last.end = input.len();
                }
            } else {
                strings.push(InterpolationPiece {
                    text: input[i..].to_string(),
                    start: i,
                    end: input.len(),
                });
            }
        }

        Ok(SplitInterpolation {
            strings,
            expressions,
            offsets,
        })
    }

    fn check_no_interpolation(
        &self,
        input: &str,
        location: &str,
        interpolation: &InterpolationConfig,
    ) -> Option<ParserError> {
        let split = self.split_interpolation(input, location, interpolation).ok()?;
        let first = split.expressions.first()?;
        Some(ParserError::new(
            format!(
                "Got interpolation ({}{}) where expression was expected",
                interpolation.start, interpolation.end
            ),
            input,
            format!("at column {} in", first.start),
            location,
        ))
    }
}

fn empty_expr(input: &str, absolute_offset: usize) -> AST {
    let span = ParseSpan::new(0, input.len());
    AST::EmptyExpr(EmptyExpr {
        span,
        source_span: span.to_absolute(absolute_offset),
    })
}

/// Position of `end_marker` at or after `start`, skipping quoted strings.
fn interpolation_end_index(input: &str, end_marker: &str, start: usize) -> Option<usize> {
    let mut current_quote: Option<char> = None;
    let mut escaped = false;
    for (offset, ch) in input[start..].char_indices() {
        let index = start + offset;
        match current_quote {
            None => {
                if input[index..].starts_with(end_marker) {
                    return Some(index);
                }
                if ch == '\'' || ch == '"' || ch == '`' {
                    current_quote = Some(ch);
                }
            }
            Some(quote) => {
                if escaped {
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if ch == quote {
                    current_quote = None;
                }
            }
        }
    }
    None
}

/// Recursive-descent parser over the tokens of one expression.
pub(crate) struct ParseAST<'a> {
    pub(crate) input: &'a str,
    pub(crate) location: &'a str,
    pub(crate) absolute_offset: usize,
    tokens: Vec<Token>,
    index: usize,
    action: bool,
}

impl<'a> ParseAST<'a> {
    pub(crate) fn new(
        input: &'a str,
        location: &'a str,
        absolute_offset: usize,
        tokens: Vec<Token>,
        action: bool,
    ) -> Self {
        ParseAST {
            input,
            location,
            absolute_offset,
            tokens,
            index: 0,
            action,
        }
    }

    pub(crate) fn error(&self, message: String) -> ParserError {
        let err_location = match self.tokens.get(self.index) {
            Some(token) => format!("at column {} in", token.index + 1),
            None => "at the end of the expression".to_string(),
        };
        ParserError::new(message, self.input, err_location, self.location)
    }

    pub(crate) fn current(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    pub(crate) fn advance(&mut self) {
        self.index += 1;
    }

    pub(crate) fn input_index(&self) -> usize {
        self.current().map(|t| t.index).unwrap_or(self.input.len())
    }

    /// End of the last consumed token.
    pub(crate) fn current_end_index(&self) -> usize {
        match self.index.checked_sub(1).and_then(|last| self.tokens.get(last)) {
            Some(token) => token.end,
            None => self.input_index(),
        }
    }

    fn span(&self, start: usize) -> ParseSpan {
        ParseSpan::new(start, self.current_end_index().max(start))
    }

    fn source_span(&self, start: usize) -> AbsoluteSourceSpan {
        self.span(start).to_absolute(self.absolute_offset)
    }

    pub(crate) fn next_is_character(&self, code: char) -> bool {
        self.current().map(|t| t.is_character(code)).unwrap_or(false)
    }

    pub(crate) fn next_is_operator(&self, op: &str) -> bool {
        self.current().map(|t| t.is_operator(op)).unwrap_or(false)
    }

    pub(crate) fn consume_optional_character(&mut self, code: char) -> bool {
        if self.next_is_character(code) {
            self.advance();
            return true;
        }
        false
    }

    pub(crate) fn consume_optional_operator(&mut self, op: &str) -> bool {
        if self.next_is_operator(op) {
            self.advance();
            return true;
        }
        false
    }

    fn expect_character(&mut self, code: char) -> ParseResult<()> {
        if self.consume_optional_character(code) {
            return Ok(());
        }
        Err(self.error(format!("Missing expected {}", code)))
    }

    fn expect_identifier_or_keyword(&mut self) -> ParseResult<(String, usize, usize)> {
        match self.current() {
            Some(token) if token.is_identifier() || token.is_keyword() => {
                let result = (token.str_value.clone(), token.index, token.end);
                self.advance();
                Ok(result)
            }
            Some(token) => {
                let message = format!("Unexpected token {}, expected identifier or keyword", token_text(token));
                Err(self.error(message))
            }
            None => Err(self.error("Unexpected end of input, expected identifier or keyword".to_string())),
        }
    }

    /// The first lexer error, reported at the offending token.
    pub(crate) fn check_lexer_errors(&mut self) -> ParseResult<()> {
        if let Some(lexer_error) = self.tokens.iter().position(Token::is_error) {
            self.index = lexer_error;
            return Err(self.error(self.tokens[lexer_error].str_value.clone()));
        }
        Ok(())
    }

    fn parse_chain(&mut self) -> ParseResult<AST> {
        self.check_lexer_errors()?;

        let mut expressions = Vec::new();
        let start = self.input_index();
        while self.index < self.tokens.len() {
            expressions.push(self.parse_pipe()?);

            if self.consume_optional_character(';') {
                if !self.action {
                    return Err(self.error("Binding expression cannot contain chained expression".to_string()));
                }
                while self.consume_optional_character(';') {}
            } else if let Some(token) = self.current() {
                let message = format!("Unexpected token '{}'", token_text(token));
                return Err(self.error(message));
            }
        }

        match expressions.len() {
            0 => Ok(empty_expr(self.input, self.absolute_offset)),
            1 => Ok(expressions.remove(0)),
            _ => Ok(AST::Chain(Chain {
                span: self.span(start),
                source_span: self.source_span(start),
                expressions,
            })),
        }
    }

    pub(crate) fn parse_pipe(&mut self) -> ParseResult<AST> {
        let start = self.input_index();
        let mut result = self.parse_expression()?;
        if self.next_is_operator("|") {
            if self.action {
                return Err(self.error("Cannot have a pipe in an action expression".to_string()));
            }
            while self.consume_optional_operator("|") {
                let (name, name_start, name_end) = self.expect_identifier_or_keyword()?;
                let mut args = Vec::new();
                while self.consume_optional_character(':') {
                    args.push(self.parse_expression()?);
                }
                result = AST::BindingPipe(BindingPipe {
                    span: self.span(start),
                    source_span: self.source_span(start),
                    name_span: ParseSpan::new(name_start, name_end).to_absolute(self.absolute_offset),
                    exp: Box::new(result),
                    name,
                    args,
                });
            }
        }
        Ok(result)
    }

    fn parse_expression(&mut self) -> ParseResult<AST> {
        self.parse_conditional()
    }

    fn parse_conditional(&mut self) -> ParseResult<AST> {
        let start = self.input_index();
        let result = self.parse_logical_or()?;

        if self.consume_optional_operator("?") {
            let yes = self.parse_pipe()?;
            if !self.consume_optional_character(':') {
                let expression = &self.input[start..self.input_index()];
                return Err(self.error(format!("Conditional expression {} requires all 3 expressions", expression)));
            }
            let no = self.parse_pipe()?;
            return Ok(AST::Conditional(Conditional {
                span: self.span(start),
                source_span: self.source_span(start),
                condition: Box::new(result),
                true_exp: Box::new(yes),
                false_exp: Box::new(no),
            }));
        }
        Ok(result)
    }

    /// Left-associative binary level: `operand (op operand)*`.
    fn parse_binary_level(
        &mut self,
        operators: &[&str],
        operand: fn(&mut Self) -> ParseResult<AST>,
    ) -> ParseResult<AST> {
        let start = self.input_index();
        let mut result = operand(self)?;
        while let Some(op) = operators.iter().find(|op| self.next_is_operator(op)) {
            let operation = op.to_string();
            self.advance();
            let right = operand(self)?;
            result = AST::Binary(Binary {
                span: self.span(start),
                source_span: self.source_span(start),
                operation,
                left: Box::new(result),
                right: Box::new(right),
            });
        }
        Ok(result)
    }

    fn parse_logical_or(&mut self) -> ParseResult<AST> {
        self.parse_binary_level(&["||"], Self::parse_logical_and)
    }

    fn parse_logical_and(&mut self) -> ParseResult<AST> {
        self.parse_binary_level(&["&&"], Self::parse_nullish_coalescing)
    }

    fn parse_nullish_coalescing(&mut self) -> ParseResult<AST> {
        self.parse_binary_level(&["??"], Self::parse_equality)
    }

    fn parse_equality(&mut self) -> ParseResult<AST> {
        self.parse_binary_level(&["===", "!==", "==", "!="], Self::parse_relational)
    }

    fn parse_relational(&mut self) -> ParseResult<AST> {
        self.parse_binary_level(&["<=", ">=", "<", ">"], Self::parse_additive)
    }

    fn parse_additive(&mut self) -> ParseResult<AST> {
        self.parse_binary_level(&["+", "-"], Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<AST> {
        self.parse_binary_level(&["*", "%", "/"], Self::parse_exponentiation)
    }

    /// `**` is right-associative.
    fn parse_exponentiation(&mut self) -> ParseResult<AST> {
        let start = self.input_index();
        let result = self.parse_prefix()?;
        if self.consume_optional_operator("**") {
            let right = self.parse_exponentiation()?;
            return Ok(AST::Binary(Binary {
                span: self.span(start),
                source_span: self.source_span(start),
                operation: "**".to_string(),
                left: Box::new(result),
                right: Box::new(right),
            }));
        }
        Ok(result)
    }

    fn parse_prefix(&mut self) -> ParseResult<AST> {
        let start = self.input_index();
        let Some(token) = self.current() else {
            return self.parse_call_chain();
        };

        if token.is_operator("+") || token.is_operator("-") {
            let operator = token.str_value.clone();
            self.advance();
            let expr = self.parse_prefix()?;
            return Ok(AST::Unary(Unary {
                span: self.span(start),
                source_span: self.source_span(start),
                operator,
                expr: Box::new(expr),
            }));
        }
        if token.is_operator("!") {
            self.advance();
            let expression = self.parse_prefix()?;
            return Ok(AST::PrefixNot(PrefixNot {
                span: self.span(start),
                source_span: self.source_span(start),
                expression: Box::new(expression),
            }));
        }
        if token.is_keyword_named("typeof") {
            self.advance();
            let expression = self.parse_prefix()?;
            return Ok(AST::TypeofExpression(PrefixNot {
                span: self.span(start),
                source_span: self.source_span(start),
                expression: Box::new(expression),
            }));
        }
        self.parse_call_chain()
    }

    fn parse_call_chain(&mut self) -> ParseResult<AST> {
        let start = self.input_index();
        let mut result = self.parse_primary()?;
        loop {
            if self.consume_optional_character('.') {
                result = self.parse_access_member(result, start, false)?;
            } else if self.consume_optional_operator("?.") {
                if self.consume_optional_character('(') {
                    result = self.parse_call(result, start, true)?;
                } else if self.consume_optional_character('[') {
                    result = self.parse_keyed(result, start, true)?;
                } else {
                    result = self.parse_access_member(result, start, true)?;
                }
            } else if self.consume_optional_character('[') {
                result = self.parse_keyed(result, start, false)?;
            } else if self.consume_optional_character('(') {
                result = self.parse_call(result, start, false)?;
            } else if self.consume_optional_operator("!") {
                result = AST::NonNullAssert(NonNullAssert {
                    span: self.span(start),
                    source_span: self.source_span(start),
                    expression: Box::new(result),
                });
            } else {
                return Ok(result);
            }
        }
    }

    fn parse_primary(&mut self) -> ParseResult<AST> {
        let start = self.input_index();
        let Some(token) = self.current().cloned() else {
            return Err(self.error(format!("Unexpected end of expression: {}", self.input)));
        };

        if token.is_character('(') {
            self.advance();
            let result = self.parse_pipe()?;
            self.expect_character(')')?;
            return Ok(result);
        }
        if token.is_character('[') {
            self.advance();
            let mut expressions = Vec::new();
            if !self.next_is_character(']') {
                loop {
                    expressions.push(self.parse_pipe()?);
                    if !self.consume_optional_character(',') {
                        break;
                    }
                }
            }
            self.expect_character(']')?;
            return Ok(AST::LiteralArray(LiteralArray {
                span: self.span(start),
                source_span: self.source_span(start),
                expressions,
            }));
        }
        if token.is_character('{') {
            self.advance();
            return self.parse_literal_map(start);
        }

        let literal = match token.token_type {
            TokenType::Keyword => match token.str_value.as_str() {
                "null" => Some(LiteralValue::Null),
                "undefined" => Some(LiteralValue::Undefined),
                "true" => Some(LiteralValue::Boolean(true)),
                "false" => Some(LiteralValue::Boolean(false)),
                "this" => {
                    self.advance();
                    return Ok(AST::ThisReceiver(ImplicitReceiver {
                        span: self.span(start),
                        source_span: self.source_span(start),
                    }));
                }
                _ => None,
            },
            TokenType::Number => Some(LiteralValue::Number(token.num_value)),
            TokenType::String => Some(LiteralValue::String(token.str_value.clone())),
            TokenType::Identifier => {
                let receiver = AST::ImplicitReceiver(ImplicitReceiver {
                    span: ParseSpan::new(start, start),
                    source_span: ParseSpan::new(start, start).to_absolute(self.absolute_offset),
                });
                return self.parse_access_member(receiver, start, false);
            }
            _ => None,
        };

        match literal {
            Some(value) => {
                self.advance();
                Ok(AST::LiteralPrimitive(LiteralPrimitive {
                    span: self.span(start),
                    source_span: self.source_span(start),
                    value,
                }))
            }
            None => Err(self.error(format!("Unexpected token {}", token_text(&token)))),
        }
    }

    fn parse_literal_map(&mut self, start: usize) -> ParseResult<AST> {
        let mut keys = Vec::new();
        let mut values = Vec::new();
        if !self.consume_optional_character('}') {
            loop {
                let key_start = self.input_index();
                let quoted = self.current().map(Token::is_string).unwrap_or(false);
                let key = if quoted {
                    let key = self.current().map(|t| t.str_value.clone()).unwrap_or_default();
                    self.advance();
                    key
                } else {
                    self.expect_identifier_or_keyword()?.0
                };

                if quoted || self.next_is_character(':') {
                    self.expect_character(':')?;
                    values.push(self.parse_pipe()?);
                } else {
                    // Shorthand `{a}` reads the property of the same name.
                    let span = self.span(key_start);
                    values.push(AST::PropertyRead(PropertyRead {
                        span,
                        source_span: span.to_absolute(self.absolute_offset),
                        name_span: span.to_absolute(self.absolute_offset),
                        receiver: Box::new(AST::ImplicitReceiver(ImplicitReceiver {
                            span: ParseSpan::new(key_start, key_start),
                            source_span: ParseSpan::new(key_start, key_start).to_absolute(self.absolute_offset),
                        })),
                        name: key.clone(),
                    }));
                }
                keys.push(LiteralMapKey { key, quoted });

                if !self.consume_optional_character(',') || self.next_is_character('}') {
                    break;
                }
            }
            self.expect_character('}')?;
        }
        Ok(AST::LiteralMap(LiteralMap {
            span: self.span(start),
            source_span: self.source_span(start),
            keys,
            values,
        }))
    }

    fn parse_access_member(&mut self, receiver: AST, start: usize, is_safe: bool) -> ParseResult<AST> {
        let (name, name_start, name_end) = self.expect_identifier_or_keyword()?;
        let name_span = ParseSpan::new(name_start, name_end).to_absolute(self.absolute_offset);

        if self.next_is_operator("=") {
            if is_safe {
                return Err(self.error("The '?.' operator cannot be used in the assignment".to_string()));
            }
            if !self.action {
                return Err(self.error("Bindings cannot contain assignments".to_string()));
            }
            self.advance();
            let value = self.parse_conditional()?;
            return Ok(AST::PropertyWrite(PropertyWrite {
                span: self.span(start),
                source_span: self.source_span(start),
                name_span,
                receiver: Box::new(receiver),
                name,
                value: Box::new(value),
            }));
        }

        let read = PropertyRead {
            span: self.span(start),
            source_span: self.source_span(start),
            name_span,
            receiver: Box::new(receiver),
            name,
        };
        Ok(if is_safe {
            AST::SafePropertyRead(read)
        } else {
            AST::PropertyRead(read)
        })
    }

    fn parse_keyed(&mut self, receiver: AST, start: usize, is_safe: bool) -> ParseResult<AST> {
        let key = self.parse_pipe()?;
        self.expect_character(']')?;

        if self.next_is_operator("=") {
            if is_safe {
                return Err(self.error("The '?.' operator cannot be used in the assignment".to_string()));
            }
            if !self.action {
                return Err(self.error("Bindings cannot contain assignments".to_string()));
            }
            self.advance();
            let value = self.parse_conditional()?;
            return Ok(AST::KeyedWrite(KeyedWrite {
                span: self.span(start),
                source_span: self.source_span(start),
                receiver: Box::new(receiver),
                key: Box::new(key),
                value: Box::new(value),
            }));
        }

        let read = KeyedRead {
            span: self.span(start),
            source_span: self.source_span(start),
            receiver: Box::new(receiver),
            key: Box::new(key),
        };
        Ok(if is_safe {
            AST::SafeKeyedRead(read)
        } else {
            AST::KeyedRead(read)
        })
    }

    fn parse_call(&mut self, receiver: AST, start: usize, is_safe: bool) -> ParseResult<AST> {
        let argument_start = self.input_index();
        let mut args = Vec::new();
        if !self.next_is_character(')') {
            loop {
                args.push(self.parse_pipe()?);
                if !self.consume_optional_character(',') {
                    break;
                }
            }
        }
        let argument_span = ParseSpan::new(argument_start, self.input_index()).to_absolute(self.absolute_offset);
        self.expect_character(')')?;

        let call = Call {
            span: self.span(start),
            source_span: self.source_span(start),
            receiver: Box::new(receiver),
            args,
            argument_span,
        };
        Ok(if is_safe { AST::SafeCall(call) } else { AST::Call(call) })
    }
}

fn token_text(token: &Token) -> String {
    match token.token_type {
        TokenType::Number => token.num_value.to_string(),
        _ => token.str_value.clone(),
    }
}
