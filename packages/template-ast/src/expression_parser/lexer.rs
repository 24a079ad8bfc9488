/**
 * Angular Expression Lexer - Rust Implementation
 *
 * Tokenizes Angular template expressions into tokens for parsing
 */

use crate::chars;

/// Token types in Angular expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Character,
    Identifier,
    Keyword,
    String,
    Operator,
    Number,
    Error,
}

const KEYWORDS: [&str; 12] = [
    "var", "let", "as", "null", "undefined", "true", "false", "if", "else", "this", "typeof", "in",
];

/// Token representation. `index` and `end` are byte offsets into the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub index: usize,
    pub end: usize,
    pub token_type: TokenType,
    pub num_value: f64,
    pub str_value: String,
}

impl Token {
    pub fn new(index: usize, end: usize, token_type: TokenType, num_value: f64, str_value: String) -> Self {
        Token {
            index,
            end,
            token_type,
            num_value,
            str_value,
        }
    }

    pub fn is_character(&self, code: char) -> bool {
        self.token_type == TokenType::Character && self.str_value.starts_with(code)
    }

    pub fn is_number(&self) -> bool {
        self.token_type == TokenType::Number
    }

    pub fn is_string(&self) -> bool {
        self.token_type == TokenType::String
    }

    pub fn is_identifier(&self) -> bool {
        self.token_type == TokenType::Identifier
    }

    pub fn is_keyword(&self) -> bool {
        self.token_type == TokenType::Keyword
    }

    pub fn is_operator(&self, operator: &str) -> bool {
        self.token_type == TokenType::Operator && self.str_value == operator
    }

    pub fn is_keyword_let(&self) -> bool {
        self.is_keyword_named("let")
    }

    pub fn is_keyword_as(&self) -> bool {
        self.is_keyword_named("as")
    }

    pub fn is_keyword_named(&self, name: &str) -> bool {
        self.token_type == TokenType::Keyword && self.str_value == name
    }

    pub fn is_error(&self) -> bool {
        self.token_type == TokenType::Error
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Lexer;

impl Lexer {
    pub fn new() -> Self {
        Lexer
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        Scanner::new(text).scan()
    }
}

struct Scanner<'a> {
    input: &'a str,
    index: usize,
    peek: char,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        let mut scanner = Scanner {
            input,
            index: 0,
            peek: chars::EOF,
        };
        scanner.update_peek();
        scanner
    }

    fn scan(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.scan_token() {
            let is_error = token.is_error();
            tokens.push(token);
            if is_error {
                break;
            }
        }
        tokens
    }

    fn update_peek(&mut self) {
        self.peek = self.input[self.index..].chars().next().unwrap_or(chars::EOF);
    }

    fn peek_next(&self) -> char {
        let mut rest = self.input[self.index..].chars();
        rest.next();
        rest.next().unwrap_or(chars::EOF)
    }

    fn at_end(&self) -> bool {
        self.index >= self.input.len()
    }

    fn advance(&mut self) {
        if !self.at_end() {
            self.index += self.peek.len_utf8();
        }
        self.update_peek();
    }

    fn scan_token(&mut self) -> Option<Token> {
        while !self.at_end() && chars::is_whitespace(self.peek) {
            self.advance();
        }
        if self.at_end() {
            return None;
        }

        let start = self.index;
        let ch = self.peek;
        if chars::is_identifier_start(ch) {
            return Some(self.scan_identifier());
        }
        if chars::is_digit(ch) {
            return Some(self.scan_number(start));
        }

        match ch {
            chars::PERIOD => {
                if chars::is_digit(self.peek_next()) {
                    Some(self.scan_number(start))
                } else {
                    Some(self.scan_character(start, ch))
                }
            }
            chars::LPAREN | chars::RPAREN | chars::LBRACE | chars::RBRACE | chars::LBRACKET
            | chars::RBRACKET | chars::COMMA | chars::COLON | chars::SEMICOLON => {
                Some(self.scan_character(start, ch))
            }
            chars::SQ | chars::DQ => Some(self.scan_string(ch)),
            chars::PLUS | chars::MINUS | chars::SLASH | chars::PERCENT | '^' => {
                Some(self.scan_operator(start, ch.to_string()))
            }
            chars::STAR => {
                self.advance();
                if self.peek == chars::STAR {
                    self.advance();
                    return Some(Token::new(start, self.index, TokenType::Operator, 0.0, "**".to_string()));
                }
                Some(Token::new(start, self.index, TokenType::Operator, 0.0, "*".to_string()))
            }
            chars::QUESTION => {
                self.advance();
                let op = match self.peek {
                    chars::PERIOD => "?.",
                    chars::QUESTION => "??",
                    _ => "?",
                };
                if op.len() > 1 {
                    self.advance();
                }
                Some(Token::new(start, self.index, TokenType::Operator, 0.0, op.to_string()))
            }
            chars::LT | chars::GT => Some(self.scan_complex_operator(start, ch, '=', None)),
            chars::BANG | chars::EQ => Some(self.scan_complex_operator(start, ch, '=', Some('='))),
            chars::AMPERSAND => Some(self.scan_complex_operator(start, ch, '&', None)),
            chars::BAR => Some(self.scan_complex_operator(start, ch, '|', None)),
            _ => {
                self.advance();
                Some(self.error(format!("Unexpected character [{}]", ch), 0))
            }
        }
    }

    fn scan_character(&mut self, start: usize, ch: char) -> Token {
        self.advance();
        Token::new(start, self.index, TokenType::Character, ch as u32 as f64, ch.to_string())
    }

    fn scan_operator(&mut self, start: usize, op: String) -> Token {
        self.advance();
        Token::new(start, self.index, TokenType::Operator, 0.0, op)
    }

    /// `one`, `one two` or `one two three`, e.g. `!`, `!=`, `!==`.
    fn scan_complex_operator(&mut self, start: usize, one: char, two: char, three: Option<char>) -> Token {
        self.advance();
        let mut op = one.to_string();
        if self.peek == two {
            self.advance();
            op.push(two);
            if let Some(three) = three {
                if self.peek == three {
                    self.advance();
                    op.push(three);
                }
            }
        }
        Token::new(start, self.index, TokenType::Operator, 0.0, op)
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.index;
        self.advance();
        while chars::is_identifier_part(self.peek) && !self.at_end() {
            self.advance();
        }
        let text = &self.input[start..self.index];
        let token_type = if KEYWORDS.contains(&text) {
            TokenType::Keyword
        } else {
            TokenType::Identifier
        };
        Token::new(start, self.index, token_type, 0.0, text.to_string())
    }

    fn scan_number(&mut self, start: usize) -> Token {
        let mut simple = self.index == start && self.peek != chars::PERIOD;
        self.advance();
        loop {
            if chars::is_digit(self.peek) || self.peek == chars::UNDERSCORE {
                // digits and numeric separators
            } else if self.peek == chars::PERIOD {
                simple = false;
            } else if self.peek == 'e' || self.peek == 'E' {
                self.advance();
                if self.peek == chars::PLUS || self.peek == chars::MINUS {
                    self.advance();
                }
                if !chars::is_digit(self.peek) {
                    return self.error("Invalid exponent".to_string(), -1);
                }
                simple = false;
            } else {
                break;
            }
            self.advance();
        }
        let text: String = self.input[start..self.index].chars().filter(|c| *c != '_').collect();
        let value = if simple {
            text.parse::<u64>().map(|v| v as f64).unwrap_or(f64::NAN)
        } else {
            text.parse::<f64>().unwrap_or(f64::NAN)
        };
        Token::new(start, self.index, TokenType::Number, value, String::new())
    }

    fn scan_string(&mut self, quote: char) -> Token {
        let start = self.index;
        self.advance();
        let mut buffer = String::new();
        loop {
            if self.at_end() {
                return self.error("Unterminated quote".to_string(), 0);
            }
            let ch = self.peek;
            if ch == quote {
                break;
            }
            if ch == chars::BACKSLASH {
                self.advance();
                let unescaped = match self.peek {
                    'n' => '\n',
                    'f' => '\x0C',
                    'r' => '\r',
                    't' => '\t',
                    'v' => '\x0B',
                    'u' => {
                        let hex_start = self.index + 1;
                        let hex = self.input.get(hex_start..hex_start + 4).unwrap_or("");
                        match u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
                            Some(decoded) if hex.len() == 4 => {
                                for _ in 0..4 {
                                    self.advance();
                                }
                                decoded
                            }
                            _ => return self.error(format!("Invalid unicode escape [\\u{}]", hex), 0),
                        }
                    }
                    other => other,
                };
                buffer.push(unescaped);
                self.advance();
            } else {
                buffer.push(ch);
                self.advance();
            }
        }
        self.advance();
        Token::new(start, self.index, TokenType::String, 0.0, buffer)
    }

    fn error(&self, message: String, offset: i64) -> Token {
        let position = (self.index as i64 + offset).max(0) as usize;
        Token::new(
            position,
            self.index,
            TokenType::Error,
            0.0,
            format!(
                "Lexer Error: {} at column {} in expression [{}]",
                message, position, self.input
            ),
        )
    }
}
