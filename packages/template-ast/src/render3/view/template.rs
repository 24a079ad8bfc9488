//! Render3 Template Parser
//!
//! Corresponds to packages/compiler/src/render3/view/template.ts
//! Entry point: markup text in, R3 AST plus extracted metadata out.

use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, debug_span};

use crate::config::TransformOptions;
use crate::error::{Result, TemplateError, TemplateErrors};
use crate::ml_parser::html_parser::HtmlParser;
use crate::ml_parser::html_whitespaces::remove_whitespaces;
use crate::ml_parser::lexer::TokenizeOptions;
use crate::parse_util::{ParseError, ParseLocation, ParseSourceFile, ParseSourceSpan};
use crate::render3::r3_ast as t;
use crate::render3::r3_template_transform::html_ast_to_render3_ast;
use crate::schema::dom_element_schema_registry::DomElementSchemaRegistry;
use crate::schema::element_schema_registry::ElementSchemaRegistry;
use crate::template_parser::binding_parser::BindingParser;

/// Information about the template which was extracted during parsing.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedTemplate {
    /// The template AST, parsed from the template.
    pub nodes: Vec<t::R3Node>,
    /// Whether the template holds any `<ng-content>`.
    pub has_ng_content: bool,
    /// Any ng-content selectors extracted from the template, wildcard excluded.
    pub ng_content_selectors: Vec<String>,
    /// Any inline styles extracted from the template.
    pub styles: Vec<String>,
    /// Any styleUrls extracted from stylesheet links.
    pub style_urls: Vec<String>,
    /// Schema findings; only produced with `validate_schema`.
    #[serde(skip)]
    pub warnings: Vec<ParseError>,
}

/// One template of a batch.
#[derive(Debug, Clone, Copy)]
pub struct TemplateSource<'a> {
    pub template: &'a str,
    pub template_url: &'a str,
}

/// Parse a template into render3 `Node`s and additional metadata, checking
/// bindings against the DOM schema.
pub fn parse_template(template: &str, template_url: &str, options: &TransformOptions) -> Result<ParsedTemplate> {
    parse_template_with_schema(template, template_url, options, &DomElementSchemaRegistry::new())
}

/// Like [`parse_template`], with a caller-supplied element schema.
///
/// Unusable interpolation markers and markup errors stop the transform
/// before any node is built. Binding errors are collected across the whole
/// template and returned together.
pub fn parse_template_with_schema(
    template: &str,
    template_url: &str,
    options: &TransformOptions,
    schema_registry: &dyn ElementSchemaRegistry,
) -> Result<ParsedTemplate> {
    let span = debug_span!("parse_template", url = template_url);
    let _enter = span.enter();

    if let Err(source) = options.validate() {
        let file = Arc::new(ParseSourceFile::new(template.to_string(), template_url.to_string()));
        let start = ParseLocation::new(file, 0, 0, 0);
        return Err(TemplateErrors(vec![TemplateError::InvalidOptions {
            source,
            span: ParseSourceSpan::new(start.clone(), start),
        }]));
    }

    let tokenize_options = TokenizeOptions {
        interpolation: options.interpolation.clone(),
    };
    let parse_result = HtmlParser::new().parse(template, template_url, &tokenize_options);
    if !parse_result.errors.is_empty() {
        debug!(errors = parse_result.errors.len(), "markup errors");
        return Err(TemplateErrors(
            parse_result
                .errors
                .into_iter()
                .map(|error| TemplateError::MarkupSyntax {
                    message: error.msg,
                    span: error.span,
                })
                .collect(),
        ));
    }

    let html_nodes = if options.preserve_whitespaces {
        parse_result.root_nodes
    } else {
        remove_whitespaces(parse_result.root_nodes)
    };

    let binding_parser = BindingParser::new(&options.interpolation, schema_registry, options.validate_schema);
    let result = html_ast_to_render3_ast(&html_nodes, binding_parser, options);
    if !result.errors.is_empty() {
        return Err(TemplateErrors(result.errors));
    }

    Ok(ParsedTemplate {
        nodes: result.nodes,
        has_ng_content: result.has_ng_content,
        ng_content_selectors: result.ng_content_selectors,
        styles: result.styles,
        style_urls: result.style_urls,
        warnings: result.warnings,
    })
}

/// Parses independent templates in parallel. Results keep input order.
pub fn parse_templates(
    sources: &[TemplateSource<'_>],
    options: &TransformOptions,
    schema_registry: &dyn ElementSchemaRegistry,
) -> Vec<Result<ParsedTemplate>> {
    sources
        .par_iter()
        .map(|source| parse_template_with_schema(source.template, source.template_url, options, schema_registry))
        .collect()
}
