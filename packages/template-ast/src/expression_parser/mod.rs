/**
 * Expression Parser Module
 *
 * Corresponds to packages/compiler/src/expression_parser/
 */
pub mod ast;
pub mod lexer;
pub mod parser;
pub mod serializer;

pub use ast::*;
pub use lexer::Lexer;
pub use parser::{InterpolationPiece, Parser, ParserError, SplitInterpolation};
pub use serializer::serialize;
