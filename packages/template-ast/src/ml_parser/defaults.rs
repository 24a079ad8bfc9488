//! Default Configuration
//!
//! Corresponds to packages/compiler/src/ml_parser/defaults.ts

use serde::{Deserialize, Serialize};

use crate::assertions::assert_interpolation_symbols;
use crate::error::ConfigError;

/// Interpolation markers, `{{` / `}}` unless configured otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpolationConfig {
    pub start: String,
    pub end: String,
}

impl InterpolationConfig {
    pub fn new(start: String, end: String) -> Self {
        InterpolationConfig { start, end }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        assert_interpolation_symbols(&self.start, &self.end)
    }
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        InterpolationConfig::new("{{".to_string(), "}}".to_string())
    }
}
