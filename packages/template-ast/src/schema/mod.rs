//! Schema Module
//!
//! Corresponds to packages/compiler/src/schema/
//! Element schemas and binding validation

pub mod dom_element_schema_registry;
pub mod element_schema_registry;

pub use dom_element_schema_registry::DomElementSchemaRegistry;
pub use element_schema_registry::{ElementSchemaRegistry, ValidationResult};
