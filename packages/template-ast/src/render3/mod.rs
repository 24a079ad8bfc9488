//! Render3 Module
//!
//! Corresponds to packages/compiler/src/render3/
//! The R3 template AST and the transform producing it.

pub mod r3_ast;
pub mod r3_ng_content_indexer;
pub mod r3_template_transform;
pub mod view;

pub use r3_ng_content_indexer::NgContentIndexer;
pub use r3_template_transform::{html_ast_to_render3_ast, Render3ParseResult};
