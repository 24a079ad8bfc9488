//! Element Schema Registry
//!
//! Corresponds to packages/compiler/src/schema/element_schema_registry.ts
//!
//! The capability the template transform consults for property renaming and
//! for schema diagnostics. It never changes how an attribute is classified.

/// Validation outcome for a bound property name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub error: bool,
    pub msg: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        ValidationResult { error: false, msg: None }
    }

    pub fn error(msg: String) -> Self {
        ValidationResult {
            error: true,
            msg: Some(msg),
        }
    }
}

/// Knowledge about DOM elements, their properties and events.
///
/// Implementations are shared across threads by the batch entry point.
pub trait ElementSchemaRegistry: Send + Sync {
    /// Check if a property exists on an element
    fn has_property(&self, tag_name: &str, prop_name: &str) -> bool;

    /// Check if an element exists
    fn has_element(&self, tag_name: &str) -> bool;

    /// Property name an attribute name maps to, e.g. `for` -> `htmlFor`.
    fn get_mapped_prop_name(&self, attr_name: &str) -> Option<String>;

    fn has_event(&self, tag_name: &str, event_name: &str) -> bool;

    /// Rejects property names that are never safe to bind.
    fn validate_property(&self, name: &str) -> ValidationResult;
}
