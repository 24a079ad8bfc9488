//! Structural Directive Microsyntax
//!
//! Corresponds to `parseTemplateBindings` in
//! packages/compiler/src/expression_parser/parser.ts
//!
//! Grammar of a `*directive="..."` value, statements separated by `;` or `,`:
//!
//! ```text
//! bindings   := directive-binding (statement)*
//! directive  := [':'] [expression] ['as' key]
//! statement  := 'let' key ['=' key]
//!             | key 'as' key
//!             | key [':'] [expression] ['as' key]
//! key        := (identifier | keyword | string) ('-' ...)*
//! ```
//!
//! Keys of secondary expression bindings are derived from a prefix (the
//! directive name unless configured otherwise) plus the capitalized key:
//! `of` under `ngFor` becomes `ngForOf`.

use crate::expression_parser::ast::{
    ASTWithSource, AbsoluteSourceSpan, ExpressionBinding, TemplateBinding, TemplateBindingIdentifier,
    VariableBinding,
};
use crate::expression_parser::parser::{ParseAST, ParseResult, Parser, ParserError};
use crate::util::capitalize;

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateBindingParseResult {
    pub bindings: Vec<TemplateBinding>,
    pub errors: Vec<ParserError>,
}

/// Where a microsyntax value sits in the template.
#[derive(Debug, Clone, Copy)]
pub struct TemplateBindingSource<'a> {
    pub location: &'a str,
    /// Offset of the directive name, after the `*`.
    pub absolute_key_offset: usize,
    /// Offset of the first character of the value.
    pub absolute_value_offset: usize,
}

/// Parses the microsyntax of `*<template_key>="<template_value>"`.
///
/// Parsing stops at the first error; bindings read up to that point are
/// still returned.
pub fn parse_template_bindings(
    parser: &Parser,
    template_key: &str,
    key_prefix: &str,
    template_value: &str,
    source: TemplateBindingSource<'_>,
) -> TemplateBindingParseResult {
    let tokens = parser.lexer().tokenize(template_value);
    let mut microsyntax = MicrosyntaxParser {
        ast: ParseAST::new(
            template_value,
            source.location,
            source.absolute_value_offset,
            tokens,
            false,
        ),
        key_prefix,
        bindings: Vec::new(),
    };

    let directive_key = TemplateBindingIdentifier {
        source: template_key.to_string(),
        span: AbsoluteSourceSpan::new(
            source.absolute_key_offset,
            source.absolute_key_offset + template_key.len(),
        ),
    };
    let errors = match microsyntax.parse(directive_key) {
        Ok(()) => Vec::new(),
        Err(error) => vec![error],
    };
    TemplateBindingParseResult {
        bindings: microsyntax.bindings,
        errors,
    }
}

struct MicrosyntaxParser<'a> {
    ast: ParseAST<'a>,
    key_prefix: &'a str,
    bindings: Vec<TemplateBinding>,
}

impl<'a> MicrosyntaxParser<'a> {
    fn parse(&mut self, directive_key: TemplateBindingIdentifier) -> ParseResult<()> {
        self.ast.check_lexer_errors()?;
        self.parse_directive_keyword_bindings(directive_key)?;

        while self.ast.current().is_some() {
            if !self.parse_let_binding()? {
                let mut key = self.expect_template_binding_key()?;
                if !self.parse_as_binding(&key)? {
                    key.source = format!("{}{}", self.key_prefix, capitalize(&key.source));
                    self.parse_directive_keyword_bindings(key)?;
                }
            }
            self.consume_statement_terminator();
        }
        Ok(())
    }

    fn current_absolute_offset(&self) -> usize {
        self.ast.absolute_offset + self.ast.input_index()
    }

    fn peek_keyword(&self, name: &str) -> bool {
        self.ast
            .current()
            .map(|token| token.is_keyword_named(name))
            .unwrap_or(false)
    }

    fn consume_statement_terminator(&mut self) {
        if !self.ast.consume_optional_character(';') {
            self.ast.consume_optional_character(',');
        }
    }

    /// `key [':'] [expression] ['as' alias]`
    fn parse_directive_keyword_bindings(&mut self, key: TemplateBindingIdentifier) -> ParseResult<()> {
        self.ast.consume_optional_character(':');
        let value = self.directive_bound_target()?;
        let mut span_end = self.current_absolute_offset();

        let alias = self.as_binding(&key)?;
        if alias.is_none() {
            self.consume_statement_terminator();
            span_end = self.current_absolute_offset();
        }

        let span = AbsoluteSourceSpan::new(key.span.start, span_end);
        self.bindings
            .push(TemplateBinding::Expression(ExpressionBinding { span, key, value }));
        if let Some(alias) = alias {
            self.bindings.push(TemplateBinding::Variable(alias));
        }
        Ok(())
    }

    fn directive_bound_target(&mut self) -> ParseResult<Option<ASTWithSource>> {
        if self.ast.current().is_none() || self.peek_keyword("as") || self.peek_keyword("let") {
            return Ok(None);
        }
        let ast = self.ast.parse_pipe()?;
        let span = ast.span();
        let source = self.ast.input[span.start..span.end].to_string();
        Ok(Some(ASTWithSource::new(
            ast,
            Some(source),
            self.ast.location.to_string(),
            self.ast.absolute_offset + span.start,
            Vec::new(),
        )))
    }

    fn parse_as_binding(&mut self, value: &TemplateBindingIdentifier) -> ParseResult<bool> {
        match self.as_binding(value)? {
            Some(binding) => {
                self.bindings.push(TemplateBinding::Variable(binding));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// `value as key`, declaring `key` bound to the context property `value`.
    fn as_binding(&mut self, value: &TemplateBindingIdentifier) -> ParseResult<Option<VariableBinding>> {
        if !self.peek_keyword("as") {
            return Ok(None);
        }
        self.ast.advance();
        let key = self.expect_template_binding_key()?;
        self.consume_statement_terminator();
        let span = AbsoluteSourceSpan::new(value.span.start, self.current_absolute_offset());
        Ok(Some(VariableBinding {
            span,
            key,
            value: Some(value.clone()),
        }))
    }

    /// `let key [= value]`
    fn parse_let_binding(&mut self) -> ParseResult<bool> {
        if !self.peek_keyword("let") {
            return Ok(false);
        }
        let span_start = self.current_absolute_offset();
        self.ast.advance();
        let key = self.expect_template_binding_key()?;
        let value = if self.ast.consume_optional_operator("=") {
            Some(self.expect_template_binding_key()?)
        } else {
            None
        };
        self.consume_statement_terminator();
        let span = AbsoluteSourceSpan::new(span_start, self.current_absolute_offset());
        self.bindings
            .push(TemplateBinding::Variable(VariableBinding { span, key, value }));
        Ok(true)
    }

    /// Identifiers, keywords and strings joined by `-`, e.g. `data-id`.
    fn expect_template_binding_key(&mut self) -> ParseResult<TemplateBindingIdentifier> {
        let start = self.current_absolute_offset();
        let mut result = String::new();
        loop {
            result.push_str(&self.expect_identifier_or_keyword_or_string()?);
            if !self.ast.consume_optional_operator("-") {
                break;
            }
            result.push('-');
        }
        let end = self.ast.absolute_offset + self.ast.current_end_index();
        Ok(TemplateBindingIdentifier {
            source: result,
            span: AbsoluteSourceSpan::new(start, end),
        })
    }

    fn expect_identifier_or_keyword_or_string(&mut self) -> ParseResult<String> {
        let token = match self.ast.current() {
            Some(token) if token.is_identifier() || token.is_keyword() || token.is_string() => {
                token.str_value.clone()
            }
            Some(token) => {
                let message = format!(
                    "Unexpected token {}, expected identifier, keyword, or string",
                    token.str_value
                );
                return Err(self.ast.error(message));
            }
            None => {
                return Err(self
                    .ast
                    .error("Unexpected end of input, expected identifier, keyword, or string".to_string()))
            }
        };
        self.ast.advance();
        Ok(token)
    }
}
