//! Parse Utilities
//!
//! Corresponds to packages/compiler/src/parse_util.ts
//! Source files, locations and spans shared by the markup parser, the
//! expression binder and the template transform.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::chars;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ParseSourceFile {
    pub content: String,
    pub url: String,
}

impl ParseSourceFile {
    pub fn new(content: String, url: String) -> Self {
        ParseSourceFile { content, url }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ParseLocation {
    #[serde(skip)]
    pub file: Arc<ParseSourceFile>,
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl ParseLocation {
    pub fn new(file: Arc<ParseSourceFile>, offset: usize, line: usize, col: usize) -> Self {
        ParseLocation { file, offset, line, col }
    }

    /// Returns a location `delta` bytes away, keeping line/column in sync.
    pub fn move_by(&self, delta: i32) -> ParseLocation {
        let source = self.file.content.as_bytes();
        let len = source.len();
        let mut offset = self.offset.min(len);
        let mut line = self.line;
        let mut col = self.col;
        let mut delta = delta;

        while offset > 0 && delta < 0 {
            offset -= 1;
            delta += 1;
            if source[offset] == chars::NEWLINE as u8 {
                line = line.saturating_sub(1);
                col = match self.file.content[..offset].rfind('\n') {
                    Some(prior_line) => offset - prior_line - 1,
                    None => offset,
                };
            } else {
                col = col.saturating_sub(1);
            }
        }

        while offset < len && delta > 0 {
            let ch = source[offset];
            offset += 1;
            delta -= 1;
            if ch == chars::NEWLINE as u8 {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }

        ParseLocation::new(self.file.clone(), offset, line, col)
    }

    /// Source text around the location, bounded by `max_chars` and `max_lines` on each side.
    pub fn get_context(&self, max_chars: usize, max_lines: usize) -> Option<(String, String)> {
        let content = &self.file.content;
        if content.is_empty() {
            return None;
        }
        let offset = floor_char_boundary(content, self.offset.min(content.len()));

        let mut start_offset = offset;
        let mut ctx_chars = 0;
        let mut ctx_lines = 0;
        for (idx, ch) in content[..offset].char_indices().rev() {
            if ctx_chars >= max_chars {
                break;
            }
            start_offset = idx;
            ctx_chars += 1;
            if ch == '\n' {
                ctx_lines += 1;
                if ctx_lines >= max_lines {
                    break;
                }
            }
        }

        let mut end_offset = offset;
        ctx_chars = 0;
        ctx_lines = 0;
        for (idx, ch) in content[offset..].char_indices() {
            if ctx_chars >= max_chars {
                break;
            }
            end_offset = offset + idx + ch.len_utf8();
            ctx_chars += 1;
            if ch == '\n' {
                ctx_lines += 1;
                if ctx_lines >= max_lines {
                    break;
                }
            }
        }

        Some((
            content[start_offset..offset].to_string(),
            content[offset..end_offset].to_string(),
        ))
    }
}

impl fmt::Display for ParseLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.file.url, self.line, self.col)
    }
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ParseSourceSpan {
    pub start: ParseLocation,
    pub end: ParseLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ParseSourceSpan {
    pub fn new(start: ParseLocation, end: ParseLocation) -> Self {
        ParseSourceSpan { start, end, details: None }
    }

    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }

    /// The source text covered by this span.
    pub fn text(&self) -> &str {
        let content = &self.start.file.content;
        let start = self.start.offset.min(content.len());
        let end = self.end.offset.clamp(start, content.len());
        content.get(start..end).unwrap_or("")
    }

    /// A sub-span `[start, end)` relative to the start of this span.
    pub fn sub_span(&self, start: usize, end: usize) -> ParseSourceSpan {
        let start_loc = self.start.move_by(start as i32);
        let end_loc = self.start.move_by(end as i32);
        ParseSourceSpan::new(start_loc, end_loc)
    }
}

impl fmt::Display for ParseSourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseErrorLevel {
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParseError {
    pub span: ParseSourceSpan,
    pub msg: String,
    pub level: ParseErrorLevel,
}

impl ParseError {
    pub fn new(span: ParseSourceSpan, msg: String) -> Self {
        ParseError {
            span,
            msg,
            level: ParseErrorLevel::Error,
        }
    }

    pub fn warning(span: ParseSourceSpan, msg: String) -> Self {
        ParseError {
            span,
            msg,
            level: ParseErrorLevel::Warning,
        }
    }

    pub fn contextual_message(&self) -> String {
        match self.span.start.get_context(100, 3) {
            Some((before, after)) => {
                let level_str = match self.level {
                    ParseErrorLevel::Warning => "WARNING",
                    ParseErrorLevel::Error => "ERROR",
                };
                format!("{} (\"{}[{} ->]{}\")", self.msg, before, level_str, after)
            }
            None => self.msg.clone(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let details = self
            .span
            .details
            .as_ref()
            .map(|d| format!(", {}", d))
            .unwrap_or_default();
        write!(f, "{}: {}{}", self.contextual_message(), self.span.start, details)
    }
}
