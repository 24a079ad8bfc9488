//! Template compilation errors.

use std::fmt;

use thiserror::Error;

use crate::parse_util::{ParseError, ParseSourceSpan};

/// A fatal diagnostic raised while turning a template into its AST.
#[derive(Debug, Clone, Error)]
pub enum TemplateError {
    #[error("Empty expressions are not allowed in binding \"{binding}\"")]
    EmptyExpression {
        binding: String,
        span: ParseSourceSpan,
    },

    /// Raised by the expression parser, message kept verbatim.
    #[error("{message}")]
    ExpressionSyntax {
        message: String,
        span: ParseSourceSpan,
    },

    /// Raised by the markup parser before any AST is built.
    #[error("{message}")]
    MarkupSyntax {
        message: String,
        span: ParseSourceSpan,
    },

    #[error("{message}")]
    InvalidBinding {
        message: String,
        span: ParseSourceSpan,
    },

    /// Options rejected before the template is read; the span is the empty
    /// span at the start of the template.
    #[error("{source}")]
    InvalidOptions {
        source: ConfigError,
        span: ParseSourceSpan,
    },
}

impl TemplateError {
    pub fn span(&self) -> &ParseSourceSpan {
        match self {
            TemplateError::EmptyExpression { span, .. }
            | TemplateError::ExpressionSyntax { span, .. }
            | TemplateError::MarkupSyntax { span, .. }
            | TemplateError::InvalidBinding { span, .. }
            | TemplateError::InvalidOptions { span, .. } => span,
        }
    }

    pub fn to_parse_error(&self) -> ParseError {
        ParseError::new(self.span().clone(), self.to_string())
    }
}

/// Every fatal diagnostic collected during one invocation.
#[derive(Debug, Clone, Error)]
pub struct TemplateErrors(pub Vec<TemplateError>);

impl TemplateErrors {
    pub fn iter(&self) -> std::slice::Iter<'_, TemplateError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TemplateErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Template parse errors:")?;
        for error in &self.0 {
            write!(f, "\n{}", error.to_parse_error())?;
        }
        Ok(())
    }
}

impl IntoIterator for TemplateErrors {
    type Item = TemplateError;
    type IntoIter = std::vec::IntoIter<TemplateError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("['{start}', '{end}'] contains unusable interpolation symbol.")]
    UnusableInterpolation { start: String, end: String },

    #[error("invalid transform options: {0}")]
    Json(String),
}

pub type Result<T, E = TemplateErrors> = std::result::Result<T, E>;
