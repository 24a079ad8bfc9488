//! Template Parser Module
//!
//! Corresponds to packages/compiler/src/template_parser/
//! Attribute classification, binding parsing and element pre-parsing.

pub mod attribute_classifier;
pub mod binding_parser;
pub mod template_bindings;
pub mod template_preparser;

pub use attribute_classifier::{classify_attribute, normalize_attribute_name, AttributeKind, ClassifiedAttribute};
pub use binding_parser::{BindingParser, BindingSpans, InlineTemplateBindings};
pub use template_bindings::{parse_template_bindings, TemplateBindingParseResult, TemplateBindingSource};
pub use template_preparser::{preparse_element, PreparsedElement, PreparsedElementType};
