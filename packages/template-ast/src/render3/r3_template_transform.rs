//! Render3 Template Transform
//!
//! Corresponds to packages/compiler/src/render3/r3_template_transform.ts
//! Turns the markup tree into the R3 AST: classifies binding attributes,
//! desugars `*directive` templates, numbers `<ng-content>` slots and drops
//! script, style and inlinable stylesheet elements.

use indexmap::IndexSet;
use tracing::{debug, trace};

use crate::config::{ProjectionScope, TransformOptions};
use crate::error::TemplateError;
use crate::ml_parser::ast as html;
use crate::ml_parser::html_whitespaces::replace_ngsp;
use crate::ml_parser::tags::{is_ng_container, is_ng_template};
use crate::parse_util::{ParseError, ParseSourceSpan};
use crate::template_parser::attribute_classifier::{classify_attribute, AttributeKind, ClassifiedAttribute};
use crate::template_parser::binding_parser::{BindingParser, BindingSpans, InlineTemplateBindings};
use crate::template_parser::template_preparser::{preparse_element, PreparsedElement, PreparsedElementType};

use super::r3_ast as t;
use super::r3_ng_content_indexer::{is_wildcard_selector, NgContentIndexer};

const IMPLICIT_VARIABLE_VALUE: &str = "$implicit";

/// Result of the markup tree to R3 AST transformation
#[derive(Debug)]
pub struct Render3ParseResult {
    pub nodes: Vec<t::R3Node>,
    pub errors: Vec<TemplateError>,
    pub warnings: Vec<ParseError>,
    /// Text of every dropped `<style>` element.
    pub styles: Vec<String>,
    /// `href` of every dropped stylesheet link.
    pub style_urls: Vec<String>,
    /// Distinct non-wildcard `<ng-content>` selectors in first-seen order.
    pub ng_content_selectors: Vec<String>,
    pub has_ng_content: bool,
}

pub fn html_ast_to_render3_ast(
    html_nodes: &[html::Node],
    binding_parser: BindingParser<'_>,
    options: &TransformOptions,
) -> Render3ParseResult {
    debug!(root_nodes = html_nodes.len(), "converting markup to render3 ast");
    let mut transformer = HtmlAstToIvyAst::new(binding_parser, options);
    let nodes = transformer.visit_all(html_nodes);

    debug!(
        nodes = nodes.len(),
        errors = transformer.binding_parser.errors.len(),
        ng_content = transformer.has_ng_content,
        "converted markup"
    );

    Render3ParseResult {
        nodes,
        errors: transformer.binding_parser.errors,
        warnings: transformer.binding_parser.warnings,
        styles: transformer.styles,
        style_urls: transformer.style_urls,
        ng_content_selectors: transformer.ng_content_selectors.into_iter().collect(),
        has_ng_content: transformer.has_ng_content,
    }
}

/// Attribute-derived parts of one element.
#[derive(Default)]
struct PreparedAttributes {
    attributes: Vec<t::TextAttribute>,
    inputs: Vec<t::BoundAttribute>,
    outputs: Vec<t::BoundEvent>,
    references: Vec<t::Reference>,
    variables: Vec<t::Variable>,
    inline_template: Option<InlineTemplateBindings>,
}

struct HtmlAstToIvyAst<'a> {
    binding_parser: BindingParser<'a>,
    options: &'a TransformOptions,
    /// Used when projection slots are numbered template-wide.
    template_indexer: NgContentIndexer,
    styles: Vec<String>,
    style_urls: Vec<String>,
    ng_content_selectors: IndexSet<String>,
    has_ng_content: bool,
}

impl<'a> HtmlAstToIvyAst<'a> {
    fn new(binding_parser: BindingParser<'a>, options: &'a TransformOptions) -> Self {
        HtmlAstToIvyAst {
            binding_parser,
            options,
            template_indexer: NgContentIndexer::new(),
            styles: vec![],
            style_urls: vec![],
            ng_content_selectors: IndexSet::new(),
            has_ng_content: false,
        }
    }

    /// One children list. Slot numbering restarts here unless it is template-wide.
    fn visit_all(&mut self, nodes: &[html::Node]) -> Vec<t::R3Node> {
        let mut sibling_indexer = NgContentIndexer::new();
        nodes
            .iter()
            .filter_map(|node| self.visit_node(node, &mut sibling_indexer))
            .collect()
    }

    fn visit_node(&mut self, node: &html::Node, sibling_indexer: &mut NgContentIndexer) -> Option<t::R3Node> {
        match node {
            html::Node::Element(element) => self.visit_element(element, sibling_indexer),
            html::Node::Text(text) => Some(self.visit_text(text)),
            html::Node::Comment(_) => None,
        }
    }

    fn visit_element(&mut self, element: &html::Element, sibling_indexer: &mut NgContentIndexer) -> Option<t::R3Node> {
        let preparsed = preparse_element(element);
        if self.elide(element, &preparsed) {
            return None;
        }

        let is_template_element = is_ng_template(&element.name);
        let schema_element = if is_template_element { None } else { Some(element.name.as_str()) };
        let prepared = self.prepare_attributes(element, schema_element, is_template_element);

        let parsed_element = if preparsed.element_type == PreparsedElementType::NgContent {
            let selector = preparsed.select_attr.clone();
            let selector_index = self.ng_content_index(&selector, sibling_indexer);
            t::R3Node::Content(t::Content {
                selector_index,
                selector,
                attributes: element
                    .attrs
                    .iter()
                    .filter(|attr| classify_attribute(&attr.name).kind != AttributeKind::Template)
                    .map(visit_attribute)
                    .collect(),
                source_span: element.source_span.clone(),
            })
        } else {
            let children = if preparsed.non_bindable {
                self.visit_all_non_bindable(&element.children)
            } else {
                self.visit_all(&element.children)
            };

            if is_template_element {
                t::R3Node::Template(t::Template {
                    attributes: prepared.attributes,
                    inputs: prepared.inputs,
                    outputs: prepared.outputs,
                    references: prepared.references,
                    variables: prepared.variables,
                    children,
                    source_span: element.source_span.clone(),
                    start_source_span: element.start_source_span.clone(),
                    end_source_span: element.end_source_span.clone(),
                })
            } else {
                if is_ng_container(&element.name) {
                    for input in prepared.inputs.iter().filter(|i| i.type_ == t::BindingType::Attribute) {
                        self.binding_parser.report_error(
                            "Attribute bindings are not supported on ng-container. Use property bindings instead.",
                            &input.source_span,
                        );
                    }
                }
                t::R3Node::Element(t::Element {
                    name: element.name.clone(),
                    attributes: prepared.attributes,
                    inputs: prepared.inputs,
                    outputs: prepared.outputs,
                    references: prepared.references,
                    children,
                    is_self_closing: element.is_self_closing,
                    source_span: element.source_span.clone(),
                    start_source_span: element.start_source_span.clone(),
                    end_source_span: element.end_source_span.clone(),
                })
            }
        };

        Some(match prepared.inline_template {
            Some(bindings) => wrap_in_template(parsed_element, bindings, element),
            None => parsed_element,
        })
    }

    /// Records dropped style content; true when the element produces no node.
    fn elide(&mut self, element: &html::Element, preparsed: &PreparsedElement) -> bool {
        if !preparsed.is_elided() {
            return false;
        }
        match preparsed.element_type {
            PreparsedElementType::Style => {
                if let Some(contents) = text_contents(element) {
                    self.styles.push(contents);
                }
            }
            PreparsedElementType::Stylesheet => {
                if let Some(href) = &preparsed.href_attr {
                    self.style_urls.push(href.clone());
                }
            }
            _ => {}
        }
        trace!(element = %element.name, "dropped element");
        true
    }

    fn ng_content_index(&mut self, selector: &str, sibling_indexer: &mut NgContentIndexer) -> usize {
        self.has_ng_content = true;
        if !is_wildcard_selector(selector) {
            self.ng_content_selectors.insert(selector.to_string());
        }
        let index = match self.options.projection_scope {
            ProjectionScope::SiblingList => sibling_indexer.index_of(selector),
            ProjectionScope::Template => self.template_indexer.index_of(selector),
        };
        trace!(selector, index, "assigned projection slot");
        index
    }

    fn prepare_attributes(
        &mut self,
        element: &html::Element,
        schema_element: Option<&str>,
        is_template_element: bool,
    ) -> PreparedAttributes {
        let mut prepared = PreparedAttributes::default();

        for attribute in &element.attrs {
            let classified = classify_attribute(&attribute.name);
            let spans = binding_spans(attribute, &classified);

            if classified.kind == AttributeKind::Template {
                if prepared.inline_template.is_some() {
                    self.binding_parser.report_error(
                        "Can't have multiple template bindings on one element. Use only one attribute prefixed with *",
                        &attribute.source_span,
                    );
                    continue;
                }
                let options = self.options;
                let key_prefix = options.key_prefix(classified.identifier);
                trace!(directive = classified.identifier, key_prefix, "desugaring inline template");
                prepared.inline_template = Some(self.binding_parser.parse_inline_template_binding(
                    classified.identifier,
                    key_prefix,
                    &attribute.value,
                    &spans,
                ));
                continue;
            }

            let has_binding =
                self.parse_attribute(schema_element, is_template_element, attribute, &classified, &spans, &mut prepared);
            if !has_binding {
                prepared.attributes.push(visit_attribute(attribute));
            }
        }

        prepared
    }

    fn parse_attribute(
        &mut self,
        schema_element: Option<&str>,
        is_template_element: bool,
        attribute: &html::Attribute,
        classified: &ClassifiedAttribute<'_>,
        spans: &BindingSpans,
        prepared: &mut PreparedAttributes,
    ) -> bool {
        let binding = attribute.name.as_str();
        let identifier = classified.identifier;
        let value = attribute.value.as_str();
        let parser = &mut self.binding_parser;

        match classified.kind {
            AttributeKind::Property => {
                prepared
                    .inputs
                    .extend(parser.parse_property_binding(schema_element, binding, identifier, value, spans));
            }
            AttributeKind::Event => {
                prepared.outputs.extend(parser.parse_event(schema_element, binding, identifier, value, spans));
            }
            AttributeKind::TwoWay => {
                let (input, output) = parser.parse_two_way_binding(schema_element, binding, identifier, value, spans);
                prepared.inputs.extend(input);
                prepared.outputs.extend(output);
            }
            AttributeKind::Variable => {
                if is_template_element {
                    self.parse_variable(identifier, value, spans, &mut prepared.variables);
                } else {
                    parser.report_error(
                        "\"let-\" is only supported on ng-template elements.",
                        &spans.source_span,
                    );
                }
            }
            AttributeKind::Reference => {
                self.parse_reference(identifier, value, spans, &mut prepared.references);
            }
            AttributeKind::Animation => {
                prepared
                    .inputs
                    .extend(parser.parse_literal_animation(identifier, value, spans));
            }
            AttributeKind::Plain => {
                return match parser.parse_property_interpolation(schema_element, identifier, value, spans) {
                    Some(input) => {
                        prepared.inputs.push(input);
                        true
                    }
                    None => false,
                };
            }
            AttributeKind::Template => return false,
        }
        true
    }

    fn parse_variable(&mut self, identifier: &str, value: &str, spans: &BindingSpans, variables: &mut Vec<t::Variable>) {
        if identifier.contains('-') {
            self.binding_parser
                .report_error("\"-\" is not allowed in variable names", &spans.source_span);
        } else if identifier.is_empty() {
            self.binding_parser
                .report_error("Variable does not have a name", &spans.source_span);
        }
        let value = if value.is_empty() { IMPLICIT_VARIABLE_VALUE } else { value };
        variables.push(t::Variable {
            name: identifier.to_string(),
            value: value.to_string(),
            source_span: spans.source_span.clone(),
            key_span: spans.key_span.clone(),
            value_span: spans.value_span.clone(),
        });
    }

    fn parse_reference(&mut self, identifier: &str, value: &str, spans: &BindingSpans, references: &mut Vec<t::Reference>) {
        if identifier.contains('-') {
            self.binding_parser
                .report_error("\"-\" is not allowed in reference names", &spans.source_span);
        } else if identifier.is_empty() {
            self.binding_parser
                .report_error("Reference does not have a name", &spans.source_span);
        } else if references.iter().any(|reference| reference.name == identifier) {
            let message = format!("Reference \"#{}\" is defined more than once", identifier);
            self.binding_parser.report_error(&message, &spans.source_span);
        }
        references.push(t::Reference {
            name: identifier.to_string(),
            value: value.to_string(),
            source_span: spans.source_span.clone(),
            key_span: spans.key_span.clone(),
            value_span: spans.value_span.clone(),
        });
    }

    fn visit_text(&mut self, text: &html::Text) -> t::R3Node {
        let value = replace_ngsp(&text.value);
        match self.binding_parser.parse_interpolation(&value, &text.source_span) {
            Some(expression) => t::R3Node::BoundText(t::BoundText {
                value: expression,
                source_span: text.source_span.clone(),
            }),
            None => t::R3Node::Text(t::Text {
                value,
                source_span: text.source_span.clone(),
            }),
        }
    }

    /// Children of an `ngNonBindable` element: markup is kept as written.
    fn visit_all_non_bindable(&mut self, nodes: &[html::Node]) -> Vec<t::R3Node> {
        nodes
            .iter()
            .filter_map(|node| self.visit_non_bindable_node(node))
            .collect()
    }

    fn visit_non_bindable_node(&mut self, node: &html::Node) -> Option<t::R3Node> {
        match node {
            html::Node::Element(element) => {
                let preparsed = preparse_element(element);
                if self.elide(element, &preparsed) {
                    return None;
                }
                Some(t::R3Node::Element(t::Element {
                    name: element.name.clone(),
                    attributes: element.attrs.iter().map(visit_attribute).collect(),
                    inputs: vec![],
                    outputs: vec![],
                    references: vec![],
                    children: self.visit_all_non_bindable(&element.children),
                    is_self_closing: element.is_self_closing,
                    source_span: element.source_span.clone(),
                    start_source_span: element.start_source_span.clone(),
                    end_source_span: element.end_source_span.clone(),
                }))
            }
            html::Node::Text(text) => Some(t::R3Node::Text(t::Text {
                value: text.value.clone(),
                source_span: text.source_span.clone(),
            })),
            html::Node::Comment(_) => None,
        }
    }
}

fn visit_attribute(attribute: &html::Attribute) -> t::TextAttribute {
    t::TextAttribute {
        name: attribute.name.clone(),
        value: attribute.value.clone(),
        source_span: attribute.source_span.clone(),
        key_span: Some(attribute.key_span.clone()),
        value_span: attribute.value_span.clone(),
    }
}

/// The implicit `<ng-template>` of a `*directive` attribute. It takes the
/// element's spans and holds the element as its only child.
fn wrap_in_template(node: t::R3Node, bindings: InlineTemplateBindings, element: &html::Element) -> t::R3Node {
    t::R3Node::Template(t::Template {
        attributes: bindings.attributes,
        inputs: bindings.inputs,
        outputs: vec![],
        references: vec![],
        variables: bindings.variables,
        children: vec![node],
        source_span: element.source_span.clone(),
        start_source_span: element.start_source_span.clone(),
        end_source_span: element.end_source_span.clone(),
    })
}

fn binding_spans(attribute: &html::Attribute, classified: &ClassifiedAttribute<'_>) -> BindingSpans {
    BindingSpans {
        source_span: attribute.source_span.clone(),
        key_span: create_key_span(&attribute.key_span, classified),
        value_span: attribute.value_span.clone(),
    }
}

fn create_key_span(name_span: &ParseSourceSpan, classified: &ClassifiedAttribute<'_>) -> ParseSourceSpan {
    let start = name_span.start.move_by(classified.identifier_offset as i32);
    let end = start.move_by(classified.identifier.len() as i32);
    ParseSourceSpan::new(start, end)
}

fn text_contents(element: &html::Element) -> Option<String> {
    match element.children.as_slice() {
        [html::Node::Text(text)] => Some(text.value.clone()),
        _ => None,
    }
}
