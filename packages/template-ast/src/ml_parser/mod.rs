//! ML (Markup Language) Parser Module
//!
//! Corresponds to packages/compiler/src/ml_parser/
//! Handles HTML parsing

pub mod ast;
pub mod defaults;
pub mod entities;
pub mod html_parser;
pub mod html_tags;
pub mod html_whitespaces;
pub mod lexer;
pub mod parser;
pub mod tags;
pub mod tokens;

pub use ast::*;
pub use defaults::InterpolationConfig;
pub use html_parser::HtmlParser;
pub use html_tags::{get_html_tag_definition, HtmlTagDefinition};
pub use html_whitespaces::{remove_whitespaces, replace_ngsp, PRESERVE_WS_ATTR_NAME};
pub use lexer::{tokenize, TokenizeOptions, TokenizeResult};
pub use parser::{ParseTreeResult, Parser, TreeError};
pub use tags::*;
