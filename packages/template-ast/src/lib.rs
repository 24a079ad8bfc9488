//! Angular template AST construction.
//!
//! Parses an Angular component template and turns it into the typed R3
//! AST: elements, templates, projection slots, text, and the property,
//! attribute, class, style, animation and event bindings attached to them.
//!
//! ```ignore
//! use angular_template_ast::{parse_template, TransformOptions};
//!
//! let parsed = parse_template("<div [title]=\"t\"></div>", "app.html", &TransformOptions::default())?;
//! ```

#![deny(clippy::all)]

// Core modules (root level - mirrors packages/compiler/src/*.ts)
mod assertions;
pub mod chars;
pub mod config;
pub mod error;
pub mod parse_util;
pub mod style_url_resolver;
pub mod util;

// Parser modules (mirrors Angular structure)
pub mod expression_parser;
pub mod ml_parser;
pub mod template_parser;

// Compilation modules
pub mod render3;
pub mod schema;

// Re-exports
pub use config::{ProjectionScope, TransformOptions};
pub use error::{ConfigError, Result, TemplateError, TemplateErrors};
pub use expression_parser::{serialize, ParsedEventType, AST};
pub use ml_parser::InterpolationConfig;
pub use parse_util::{ParseError, ParseErrorLevel, ParseLocation, ParseSourceSpan};
pub use render3::r3_ast::{
    visit_all, BindingType, BoundAttribute, BoundEvent, BoundText, Content, Element, R3Node, Reference,
    Template, Text, TextAttribute, Variable, Visitor,
};
pub use render3::view::template::{
    parse_template, parse_template_with_schema, parse_templates, ParsedTemplate, TemplateSource,
};
pub use schema::{DomElementSchemaRegistry, ElementSchemaRegistry, ValidationResult};
