//! Transform Configuration
//!
//! Options for one template transform. Loadable from JSON; every field is
//! optional and falls back to its default.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::ml_parser::defaults::InterpolationConfig;

/// How far one content-projection indexer reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectionScope {
    /// A fresh indexer for every children list.
    #[default]
    SiblingList,
    /// One indexer for the whole template, so slot numbers index the
    /// distinct-selector list.
    Template,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransformOptions {
    pub interpolation: InterpolationConfig,
    pub preserve_whitespaces: bool,
    pub projection_scope: ProjectionScope,
    /// Prefix used to derive secondary microsyntax keys for a directive,
    /// e.g. `{"ngFor": "ngFor"}` turns `of` into `ngForOf`. Directives not
    /// listed use their own name.
    pub microsyntax_key_prefixes: IndexMap<String, String>,
    pub validate_schema: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        TransformOptions {
            interpolation: InterpolationConfig::default(),
            preserve_whitespaces: true,
            projection_scope: ProjectionScope::default(),
            microsyntax_key_prefixes: IndexMap::new(),
            validate_schema: false,
        }
    }
}

impl TransformOptions {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: TransformOptions =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Rejects interpolation markers the markup lexer cannot tell apart.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.interpolation.validate()
    }

    /// Prefix for the secondary keys of `directive`.
    pub fn key_prefix<'a>(&'a self, directive: &'a str) -> &'a str {
        self.microsyntax_key_prefixes
            .get(directive)
            .map(String::as_str)
            .unwrap_or(directive)
    }
}
