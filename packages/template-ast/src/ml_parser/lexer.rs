//! ML Parser Lexer
//!
//! Corresponds to packages/compiler/src/ml_parser/lexer.ts
//! HTML tokenizer - converts source text into tokens

use std::sync::Arc;

use smallvec::smallvec;

use crate::chars;
use crate::parse_util::{ParseError, ParseLocation, ParseSourceFile, ParseSourceSpan};

use super::defaults::InterpolationConfig;
use super::entities::NAMED_ENTITIES;
use super::html_tags::get_html_tag_definition;
use super::tags::TagContentType;
use super::tokens::{Token, TokenType};

/// Tokenization result
#[derive(Debug, Clone)]
pub struct TokenizeResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<ParseError>,
}

/// Tokenization options
#[derive(Debug, Clone, Default)]
pub struct TokenizeOptions {
    /// Entities inside interpolations are left encoded.
    pub interpolation: InterpolationConfig,
}

/// Main tokenization function
pub fn tokenize(file: Arc<ParseSourceFile>, options: &TokenizeOptions) -> TokenizeResult {
    let mut tokenizer = Tokenizer::new(file, &options.interpolation);
    tokenizer.tokenize();

    TokenizeResult {
        tokens: merge_text_tokens(tokenizer.tokens),
        errors: tokenizer.errors,
    }
}

#[derive(Debug, Clone)]
struct Cursor {
    file: Arc<ParseSourceFile>,
    offset: usize,
    line: usize,
    col: usize,
}

impl Cursor {
    fn new(file: Arc<ParseSourceFile>) -> Self {
        Cursor { file, offset: 0, line: 0, col: 0 }
    }

    fn rest(&self) -> &str {
        &self.file.content[self.offset..]
    }

    fn at_end(&self) -> bool {
        self.offset >= self.file.content.len()
    }

    fn peek(&self) -> char {
        self.rest().chars().next().unwrap_or(chars::EOF)
    }

    fn peek_at(&self, n: usize) -> char {
        self.rest().chars().nth(n).unwrap_or(chars::EOF)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.rest().chars().next() {
            self.offset += ch.len_utf8();
            if ch == chars::LF {
                self.line += 1;
                self.col = 0;
            } else {
                self.col += 1;
            }
        }
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn location(&self) -> ParseLocation {
        ParseLocation::new(self.file.clone(), self.offset, self.line, self.col)
    }

    fn span_from(&self, start: &Cursor) -> ParseSourceSpan {
        ParseSourceSpan::new(start.location(), self.location())
    }

    fn chars_from(&self, start: &Cursor) -> String {
        self.file.content[start.offset..self.offset].to_string()
    }
}

struct Tokenizer<'a> {
    cursor: Cursor,
    interpolation: &'a InterpolationConfig,
    tokens: Vec<Token>,
    errors: Vec<ParseError>,
}

impl<'a> Tokenizer<'a> {
    fn new(file: Arc<ParseSourceFile>, interpolation: &'a InterpolationConfig) -> Self {
        Tokenizer {
            cursor: Cursor::new(file),
            interpolation,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn tokenize(&mut self) {
        while !self.cursor.at_end() {
            let start = self.cursor.clone();
            if self.is_tag_start() {
                self.cursor.advance();
                if self.attempt_char(chars::BANG) {
                    if self.attempt_str("[CDATA[") {
                        self.consume_cdata(&start);
                    } else if self.attempt_str("--") {
                        self.consume_comment(&start);
                    } else {
                        self.consume_doc_type(&start);
                    }
                } else if self.attempt_char(chars::SLASH) {
                    self.consume_tag_close(&start);
                } else {
                    self.consume_tag_open(&start);
                }
            } else {
                self.consume_text();
            }
        }

        let eof = self.cursor.span_from(&self.cursor);
        self.tokens.push(Token::new(TokenType::Eof, vec![], eof));
    }

    fn push_token(&mut self, token_type: TokenType, parts: Vec<String>, start: &Cursor) -> usize {
        let span = self.cursor.span_from(start);
        self.tokens.push(Token::new(token_type, parts, span));
        self.tokens.len() - 1
    }

    fn error(&mut self, msg: String, start: &Cursor) {
        let span = self.cursor.span_from(start);
        self.errors.push(ParseError::new(span, msg));
    }

    fn attempt_char(&mut self, ch: char) -> bool {
        if self.cursor.peek() == ch && !self.cursor.at_end() {
            self.cursor.advance();
            return true;
        }
        false
    }

    fn attempt_str(&mut self, s: &str) -> bool {
        if self.cursor.rest().starts_with(s) {
            self.cursor.advance_by(s.chars().count());
            return true;
        }
        false
    }

    fn skip_whitespace(&mut self) {
        while !self.cursor.at_end() && chars::is_whitespace(self.cursor.peek()) {
            self.cursor.advance();
        }
    }

    fn is_tag_start(&self) -> bool {
        if self.cursor.peek() != chars::LT {
            return false;
        }
        let next = self.cursor.peek_at(1);
        chars::is_ascii_letter(next) || next == chars::SLASH || next == chars::BANG
    }

    /// Reads until `terminator`, returning the content without it.
    fn consume_until(&mut self, terminator: &str, start: &Cursor) -> Option<String> {
        let content_start = self.cursor.clone();
        while !self.cursor.rest().starts_with(terminator) {
            if self.cursor.at_end() {
                self.error(unexpected_character_error_msg(chars::EOF), start);
                return None;
            }
            self.cursor.advance();
        }
        let content = self.cursor.chars_from(&content_start);
        self.cursor.advance_by(terminator.chars().count());
        Some(content)
    }

    fn consume_cdata(&mut self, start: &Cursor) {
        if let Some(content) = self.consume_until("]]>", start) {
            self.push_token(TokenType::Cdata, vec![normalize_line_endings(&content)], start);
        }
    }

    fn consume_comment(&mut self, start: &Cursor) {
        if let Some(content) = self.consume_until("-->", start) {
            self.push_token(TokenType::Comment, vec![normalize_line_endings(&content)], start);
        }
    }

    fn consume_doc_type(&mut self, start: &Cursor) {
        if let Some(content) = self.consume_until(">", start) {
            self.push_token(TokenType::DocType, vec![content], start);
        }
    }

    /// An alphanumeric run directly followed by `:`; the cursor is left untouched otherwise.
    fn consume_prefix(&mut self) -> String {
        let start = self.cursor.clone();
        while self.cursor.peek().is_ascii_alphanumeric() {
            self.cursor.advance();
        }
        if self.cursor.peek() == chars::COLON && self.cursor.offset > start.offset {
            let prefix = self.cursor.chars_from(&start);
            self.cursor.advance();
            return prefix;
        }
        self.cursor = start;
        String::new()
    }

    fn consume_tag_name(&mut self) -> Option<(String, String)> {
        let prefix = self.consume_prefix();
        let name_start = self.cursor.clone();
        while !chars::is_name_end(self.cursor.peek()) {
            self.cursor.advance();
        }
        if self.cursor.offset == name_start.offset {
            return None;
        }
        Some((prefix, self.cursor.chars_from(&name_start)))
    }

    fn consume_tag_open(&mut self, start: &Cursor) {
        let (prefix, name) = match self.consume_tag_name() {
            Some(prefix_and_name) => prefix_and_name,
            None => {
                self.push_token(TokenType::Text, vec!["<".to_string()], start);
                return;
            }
        };
        let open_token = self.push_token(TokenType::TagOpenStart, vec![prefix.clone(), name.clone()], start);

        self.skip_whitespace();
        while !self.cursor.at_end()
            && !matches!(self.cursor.peek(), chars::GT | chars::SLASH | chars::LT)
        {
            if !self.consume_attribute() {
                self.tokens[open_token].token_type = TokenType::IncompleteTagOpen;
                return;
            }
            self.skip_whitespace();
        }

        let end_start = self.cursor.clone();
        if self.attempt_str("/>") {
            self.push_token(TokenType::TagOpenEndVoid, vec![], &end_start);
            return;
        }
        if !self.attempt_char(chars::GT) {
            self.tokens[open_token].token_type = TokenType::IncompleteTagOpen;
            return;
        }
        self.push_token(TokenType::TagOpenEnd, vec![], &end_start);

        let prefix_ref = if prefix.is_empty() { None } else { Some(prefix.as_str()) };
        match get_html_tag_definition(&name).get_content_type(prefix_ref) {
            TagContentType::RawText => self.consume_raw_text_with_tag_close(false, &prefix, &name),
            TagContentType::EscapableRawText => self.consume_raw_text_with_tag_close(true, &prefix, &name),
            TagContentType::ParsableData => {}
        }
    }

    fn consume_attribute(&mut self) -> bool {
        if chars::is_quote(self.cursor.peek()) {
            return false;
        }
        let start = self.cursor.clone();
        let prefix = self.consume_prefix();
        let name_start = self.cursor.clone();
        if self.cursor.peek() == chars::LBRACKET {
            let mut open_brackets = 0i32;
            loop {
                let ch = self.cursor.peek();
                if ch == chars::LBRACKET {
                    open_brackets += 1;
                } else if ch == chars::RBRACKET {
                    open_brackets -= 1;
                }
                let at_end = if open_brackets <= 0 {
                    chars::is_name_end(ch)
                } else {
                    chars::is_new_line(ch) || self.cursor.at_end()
                };
                if at_end {
                    break;
                }
                self.cursor.advance();
            }
        } else {
            while !chars::is_name_end(self.cursor.peek()) {
                self.cursor.advance();
            }
        }
        if self.cursor.offset == name_start.offset {
            return false;
        }
        let name = self.cursor.chars_from(&name_start);
        self.push_token(TokenType::AttrName, vec![prefix, name], &start);

        self.skip_whitespace();
        if self.attempt_char(chars::EQ) {
            self.skip_whitespace();
            return self.consume_attribute_value();
        }
        true
    }

    fn consume_attribute_value(&mut self) -> bool {
        let quote = self.cursor.peek();
        if quote == chars::SQ || quote == chars::DQ {
            let quote_start = self.cursor.clone();
            self.cursor.advance();
            self.push_token(TokenType::AttrQuote, vec![quote.to_string()], &quote_start);

            let value_start = self.cursor.clone();
            let value = self.consume_decoded(|cursor| cursor.peek() == quote);
            self.push_token(TokenType::AttrValue, vec![value], &value_start);

            let close_start = self.cursor.clone();
            if !self.attempt_char(quote) {
                return false;
            }
            self.push_token(TokenType::AttrQuote, vec![quote.to_string()], &close_start);
        } else {
            let value_start = self.cursor.clone();
            let value = self.consume_decoded(|cursor| chars::is_name_end(cursor.peek()));
            self.push_token(TokenType::AttrValue, vec![value], &value_start);
        }
        true
    }

    fn consume_tag_close(&mut self, start: &Cursor) {
        self.skip_whitespace();
        let (prefix, name) = match self.consume_tag_name() {
            Some(prefix_and_name) => prefix_and_name,
            None => {
                self.error(unexpected_character_error_msg(self.cursor.peek()), start);
                return;
            }
        };
        self.skip_whitespace();
        if !self.attempt_char(chars::GT) {
            self.error(unexpected_character_error_msg(self.cursor.peek()), start);
            return;
        }
        self.push_token(TokenType::TagClose, vec![prefix, name], start);
    }

    fn consume_text(&mut self) {
        let start = self.cursor.clone();
        let value = self.consume_decoded(|cursor| {
            cursor.peek() == chars::LT && {
                let next = cursor.peek_at(1);
                chars::is_ascii_letter(next) || next == chars::SLASH || next == chars::BANG
            }
        });
        self.push_token(TokenType::Text, vec![value], &start);
    }

    /// Reads text up to `is_end` or EOF, decoding character references outside of
    /// interpolations and normalizing line endings.
    fn consume_decoded(&mut self, is_end: impl Fn(&Cursor) -> bool) -> String {
        let mut value = String::new();
        let mut in_interpolation = false;
        while !self.cursor.at_end() && !is_end(&self.cursor) {
            if !in_interpolation && self.cursor.rest().starts_with(self.interpolation.start.as_str()) {
                in_interpolation = true;
                value.push_str(&self.interpolation.start);
                self.cursor.advance_by(self.interpolation.start.chars().count());
            } else if in_interpolation && self.cursor.rest().starts_with(self.interpolation.end.as_str()) {
                in_interpolation = false;
                value.push_str(&self.interpolation.end);
                self.cursor.advance_by(self.interpolation.end.chars().count());
            } else if !in_interpolation && self.cursor.peek() == chars::AMPERSAND {
                self.consume_entity(&mut value);
            } else {
                self.push_normalized_char(&mut value);
            }
        }
        value
    }

    fn push_normalized_char(&mut self, value: &mut String) {
        let ch = self.cursor.peek();
        self.cursor.advance();
        if ch == chars::CR {
            if self.cursor.peek() == chars::LF {
                self.cursor.advance();
            }
            value.push(chars::LF);
        } else {
            value.push(ch);
        }
    }

    fn consume_raw_text_with_tag_close(&mut self, consume_entities: bool, prefix: &str, tag_name: &str) {
        let start = self.cursor.clone();
        let mut value = String::new();
        while !self.cursor.at_end() && !self.is_closing_tag_match(tag_name) {
            if consume_entities && self.cursor.peek() == chars::AMPERSAND {
                self.consume_entity(&mut value);
            } else {
                self.push_normalized_char(&mut value);
            }
        }
        let token_type = if consume_entities {
            TokenType::EscapableRawText
        } else {
            TokenType::RawText
        };
        self.push_token(token_type, vec![value], &start);

        if self.cursor.at_end() {
            return;
        }
        let close_start = self.cursor.clone();
        while self.cursor.peek() != chars::GT {
            self.cursor.advance();
        }
        self.cursor.advance();
        self.push_token(TokenType::TagClose, vec![prefix.to_string(), tag_name.to_string()], &close_start);
    }

    /// `</name>` with optional whitespace, compared case-insensitively.
    fn is_closing_tag_match(&self, tag_name: &str) -> bool {
        let mut probe = self.cursor.clone();
        if probe.peek() != chars::LT || probe.peek_at(1) != chars::SLASH {
            return false;
        }
        probe.advance_by(2);
        while chars::is_whitespace(probe.peek()) && !probe.at_end() {
            probe.advance();
        }
        for expected in tag_name.chars() {
            if !probe.peek().eq_ignore_ascii_case(&expected) {
                return false;
            }
            probe.advance();
        }
        while chars::is_whitespace(probe.peek()) && !probe.at_end() {
            probe.advance();
        }
        probe.peek() == chars::GT
    }

    fn consume_entity(&mut self, value: &mut String) {
        let start = self.cursor.clone();
        self.cursor.advance();

        if self.attempt_char(chars::HASH) {
            let is_hex = self.attempt_char('x') || self.attempt_char('X');
            let code_start = self.cursor.clone();
            while chars::is_ascii_hex_digit(self.cursor.peek()) {
                self.cursor.advance();
            }
            if self.cursor.peek() != chars::SEMICOLON {
                self.cursor.advance();
                let source = self.cursor.chars_from(&start);
                self.error(unparsable_entity_error_msg(is_hex, &source), &start);
                value.push_str(&source);
                return;
            }
            let digits = self.cursor.chars_from(&code_start);
            self.cursor.advance();
            let radix = if is_hex { 16 } else { 10 };
            match u32::from_str_radix(&digits, radix).ok().and_then(char::from_u32) {
                Some(ch) => value.push(ch),
                None => {
                    let source = self.cursor.chars_from(&start);
                    self.error(unknown_entity_error_msg(&source), &start);
                    value.push_str(&source);
                }
            }
            return;
        }

        let name_start = self.cursor.clone();
        while self.cursor.peek().is_ascii_alphanumeric() {
            self.cursor.advance();
        }
        if self.cursor.peek() != chars::SEMICOLON {
            // Not a character reference: a literal `&`.
            self.cursor = name_start;
            value.push(chars::AMPERSAND);
            return;
        }
        let name = self.cursor.chars_from(&name_start);
        self.cursor.advance();
        match NAMED_ENTITIES.get(name.as_str()) {
            Some(decoded) => value.push_str(decoded),
            None => {
                self.error(unknown_entity_error_msg(&name), &start);
                value.push_str(&self.cursor.chars_from(&start));
            }
        }
    }
}

/// Merge consecutive text tokens
fn merge_text_tokens(src_tokens: Vec<Token>) -> Vec<Token> {
    let mut merged: Vec<Token> = Vec::with_capacity(src_tokens.len());
    for token in src_tokens {
        if token.token_type == TokenType::Text {
            if let Some(last) = merged.last_mut() {
                if last.token_type == TokenType::Text {
                    let text = format!("{}{}", last.part(0), token.part(0));
                    last.parts = smallvec![text];
                    last.source_span.end = token.source_span.end;
                    continue;
                }
            }
            if token.part(0).is_empty() {
                continue;
            }
        }
        merged.push(token);
    }
    merged
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn unexpected_character_error_msg(char_code: char) -> String {
    let ch = if char_code == chars::EOF {
        "EOF".to_string()
    } else {
        char_code.to_string()
    };
    format!("Unexpected character \"{}\"", ch)
}

fn unknown_entity_error_msg(entity_src: &str) -> String {
    format!(
        "Unknown entity \"{}\" - use the \"&#<decimal>;\" or  \"&#x<hex>;\" syntax",
        entity_src
    )
}

fn unparsable_entity_error_msg(is_hex: bool, entity_str: &str) -> String {
    let type_str = if is_hex { "hexadecimal" } else { "decimal" };
    format!(
        "Unable to parse entity \"{}\" - {} character reference entities must end with \";\"",
        entity_str, type_str
    )
}
