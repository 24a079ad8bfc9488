//! Binding Parser
//!
//! Corresponds to packages/compiler/src/template_parser/binding_parser.ts
//!
//! Turns the name/value of a binding attribute into typed R3 binding nodes:
//! property, attribute, class, style and animation inputs, event outputs,
//! two-way pairs and the bindings of an inline `*directive` template.
//! Fatal problems are collected in `errors`, schema findings in `warnings`.

use tracing::warn;

use crate::error::TemplateError;
use crate::expression_parser::ast::{
    ASTWithSource, AbsoluteSourceSpan, ParsedEventType, TemplateBinding, AST as ExprAST,
};
use crate::expression_parser::parser::{Parser, ParserError};
use crate::ml_parser::defaults::InterpolationConfig;
use crate::ml_parser::tags::{is_ng_container, merge_ns_and_name};
use crate::parse_util::{ParseError, ParseSourceSpan};
use crate::render3::r3_ast::{BindingType, BoundAttribute, BoundEvent, TextAttribute, Variable};
use crate::schema::element_schema_registry::ElementSchemaRegistry;
use crate::template_parser::template_bindings::{parse_template_bindings, TemplateBindingSource};
use crate::util::{split_at_colon, split_at_period};

const PROPERTY_PARTS_SEPARATOR: char = '.';
const ATTRIBUTE_PREFIX: &str = "attr";
const CLASS_PREFIX: &str = "class";
const STYLE_PREFIX: &str = "style";
const ANIMATE_PREFIX: &str = "animate";
const ANIMATE_PROP_PREFIX: &str = "animate-";
const ANIMATION_LABEL: char = '@';
const IMPLICIT_VARIABLE_VALUE: &str = "$implicit";

/// Source locations shared by every node produced from one attribute.
#[derive(Debug, Clone)]
pub struct BindingSpans {
    /// The whole attribute, name and value.
    pub source_span: ParseSourceSpan,
    /// The binding identifier, without prefix or delimiters.
    pub key_span: ParseSourceSpan,
    pub value_span: Option<ParseSourceSpan>,
}

impl BindingSpans {
    fn value_or_source(&self) -> &ParseSourceSpan {
        self.value_span.as_ref().unwrap_or(&self.source_span)
    }

    /// Offset in the template file of the first value character.
    pub fn absolute_value_offset(&self) -> usize {
        self.value_or_source().start.offset
    }

    fn location(&self) -> String {
        self.value_or_source().start.to_string()
    }
}

/// Attributes, inputs and variables declared by `*directive="..."`.
#[derive(Debug, Clone, Default)]
pub struct InlineTemplateBindings {
    pub attributes: Vec<TextAttribute>,
    pub inputs: Vec<BoundAttribute>,
    pub variables: Vec<Variable>,
}

pub struct BindingParser<'a> {
    expr_parser: Parser,
    interpolation: &'a InterpolationConfig,
    schema_registry: &'a dyn ElementSchemaRegistry,
    validate_schema: bool,
    pub errors: Vec<TemplateError>,
    pub warnings: Vec<ParseError>,
}

impl<'a> BindingParser<'a> {
    pub fn new(
        interpolation: &'a InterpolationConfig,
        schema_registry: &'a dyn ElementSchemaRegistry,
        validate_schema: bool,
    ) -> Self {
        BindingParser {
            expr_parser: Parser::new(),
            interpolation,
            schema_registry,
            validate_schema,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Parses `text` as interpolated text, `None` when it holds no interpolation.
    pub fn parse_interpolation(&mut self, text: &str, source_span: &ParseSourceSpan) -> Option<ASTWithSource> {
        let ast = self.expr_parser.parse_interpolation(
            text,
            &source_span.start.to_string(),
            source_span.start.offset,
            self.interpolation,
        )?;
        self.report_expression_parser_errors(&ast.errors, source_span);
        Some(ast)
    }

    /// Property-side expression of `binding`. Blank values are rejected.
    pub fn parse_binding(&mut self, binding: &str, value: &str, spans: &BindingSpans) -> Option<ASTWithSource> {
        if value.trim().is_empty() {
            self.report_empty_expression(binding, &spans.source_span);
            return None;
        }
        let ast = self.expr_parser.parse_binding(
            value,
            &spans.location(),
            spans.absolute_value_offset(),
            self.interpolation,
        );
        self.report_expression_parser_errors(&ast.errors, spans.value_or_source());
        Some(ast)
    }

    /// Handler expression of `binding`. Blank values are rejected.
    pub fn parse_action(&mut self, binding: &str, value: &str, spans: &BindingSpans) -> Option<ASTWithSource> {
        if value.trim().is_empty() {
            self.report_empty_expression(binding, &spans.source_span);
            return None;
        }
        let ast = self
            .expr_parser
            .parse_action(value, &spans.location(), spans.absolute_value_offset());
        self.report_expression_parser_errors(&ast.errors, spans.value_or_source());
        Some(ast)
    }

    /// `[name]="value"` and `bind-name="value"`.
    ///
    /// `element_name` is `None` on templates, where names are never mapped
    /// or validated against the schema.
    pub fn parse_property_binding(
        &mut self,
        element_name: Option<&str>,
        binding: &str,
        name: &str,
        value: &str,
        spans: &BindingSpans,
    ) -> Option<BoundAttribute> {
        if name.is_empty() {
            self.report_error("Property name is missing in binding", &spans.source_span);
            return None;
        }

        if let Some(trigger) = name.strip_prefix(ANIMATE_PROP_PREFIX) {
            return self.parse_animation(trigger, value, spans, ANIMATE_PROP_PREFIX.len());
        }
        if let Some(trigger) = name.strip_prefix(ANIMATION_LABEL) {
            return self.parse_animation(trigger, value, spans, 1);
        }

        let ast = self.parse_binding(binding, value, spans)?;
        self.create_bound_element_property(element_name, name, ast, spans)
    }

    /// A plain attribute whose value interpolates, e.g. `title="{{ a }}"`.
    pub fn parse_property_interpolation(
        &mut self,
        element_name: Option<&str>,
        name: &str,
        value: &str,
        spans: &BindingSpans,
    ) -> Option<BoundAttribute> {
        let ast = self.parse_interpolation(value, spans.value_or_source())?;
        self.create_bound_element_property(element_name, name, ast, spans)
    }

    /// A valueless `@trigger` attribute.
    pub fn parse_literal_animation(&mut self, trigger: &str, value: &str, spans: &BindingSpans) -> Option<BoundAttribute> {
        if !value.is_empty() {
            self.report_error(
                "Assigning animation triggers via @prop=\"exp\" attributes with an expression is invalid. \
                 Use property bindings (e.g. [@prop]=\"exp\") or use an attribute without a value \
                 (e.g. @prop) instead.",
                &spans.source_span,
            );
            return None;
        }
        self.parse_animation(trigger, value, spans, 0)
    }

    fn parse_animation(
        &mut self,
        trigger: &str,
        value: &str,
        spans: &BindingSpans,
        key_offset: usize,
    ) -> Option<BoundAttribute> {
        if trigger.is_empty() {
            self.report_error("Animation trigger is missing", &spans.source_span);
            return None;
        }
        // An absent state expression means "no state", not an empty binding.
        let expression = if value.trim().is_empty() { "undefined" } else { value };
        let ast = self.expr_parser.parse_binding(
            expression,
            &spans.location(),
            spans.absolute_value_offset(),
            self.interpolation,
        );
        self.report_expression_parser_errors(&ast.errors, spans.value_or_source());
        Some(BoundAttribute {
            name: trigger.to_string(),
            type_: BindingType::Animation,
            value: ast,
            unit: None,
            source_span: spans.source_span.clone(),
            key_span: shift_start(&spans.key_span, key_offset),
            value_span: spans.value_span.clone(),
        })
    }

    /// Classifies `name` into attribute, class, style or property bindings.
    ///
    /// A prefix with nothing after it, e.g. `class.`, is an invalid binding.
    pub fn create_bound_element_property(
        &mut self,
        element_name: Option<&str>,
        name: &str,
        value: ASTWithSource,
        spans: &BindingSpans,
    ) -> Option<BoundAttribute> {
        let parts: Vec<&str> = name.split(PROPERTY_PARTS_SEPARATOR).collect();
        let mut unit = None;

        let (binding_type, bound_property_name) = match parts.as_slice() {
            [ATTRIBUTE_PREFIX, rest @ ..] if !rest.is_empty() => {
                let name_part = rest.join(&PROPERTY_PARTS_SEPARATOR.to_string());
                let merged_name = match name_part.split_once(':') {
                    Some((ns, local_name)) => merge_ns_and_name(Some(ns), local_name),
                    None => name_part,
                };
                (BindingType::Attribute, merged_name)
            }
            [CLASS_PREFIX, class_name, ..] => (BindingType::Class, class_name.to_string()),
            [STYLE_PREFIX, style_name, rest @ ..] => {
                unit = rest.first().map(|unit| unit.to_string());
                (BindingType::Style, style_name.to_string())
            }
            [ANIMATE_PREFIX, trigger, ..] => (BindingType::Animation, trigger.to_string()),
            _ => {
                let bound_property_name = match element_name {
                    Some(element_name) => {
                        let mapped = self
                            .schema_registry
                            .get_mapped_prop_name(name)
                            .unwrap_or_else(|| name.to_string());
                        self.validate_property_name(element_name, &mapped, &spans.source_span);
                        mapped
                    }
                    None => name.to_string(),
                };
                (BindingType::Property, bound_property_name)
            }
        };

        if bound_property_name.is_empty() {
            let message = format!("{:?} binding name is missing in \"{}\"", binding_type, name);
            self.report_error(&message, &spans.source_span);
            return None;
        }

        Some(BoundAttribute {
            name: bound_property_name,
            type_: binding_type,
            value,
            unit,
            source_span: spans.source_span.clone(),
            key_span: spans.key_span.clone(),
            value_span: spans.value_span.clone(),
        })
    }

    fn validate_property_name(&mut self, element_name: &str, prop_name: &str, span: &ParseSourceSpan) {
        if !self.validate_schema {
            return;
        }
        let report = self.schema_registry.validate_property(prop_name);
        if report.error {
            self.report_warning(report.msg.unwrap_or_default(), span);
            return;
        }
        if !is_ng_container(element_name) && !self.schema_registry.has_property(element_name, prop_name) {
            let message = format!(
                "Can't bind to '{}' since it isn't a known property of '{}'.",
                prop_name, element_name
            );
            self.report_warning(message, span);
        }
    }

    /// Warns about events the element is not known to emit. Targeted events
    /// and elements missing from the schema are left alone.
    fn validate_event_name(
        &mut self,
        element_name: Option<&str>,
        target: Option<&str>,
        event_name: &str,
        span: &ParseSourceSpan,
    ) {
        let Some(element_name) = element_name else {
            return;
        };
        if !self.validate_schema || target.is_some() || is_ng_container(element_name) {
            return;
        }
        if self.schema_registry.has_element(element_name) && !self.schema_registry.has_event(element_name, event_name) {
            let message = format!("'{}' is not a known event of '{}'.", event_name, element_name);
            self.report_warning(message, span);
        }
    }

    /// `(name)="handler"`, `on-name="handler"`, `(target:name)` and `(@trigger.phase)`.
    ///
    /// `element_name` is `None` on templates, whose events are never checked
    /// against the schema.
    pub fn parse_event(
        &mut self,
        element_name: Option<&str>,
        binding: &str,
        name: &str,
        value: &str,
        spans: &BindingSpans,
    ) -> Option<BoundEvent> {
        if name.is_empty() {
            self.report_error("Event name is missing in binding", &spans.source_span);
            return None;
        }
        match name.strip_prefix(ANIMATION_LABEL) {
            Some(trigger) => self.parse_animation_event(binding, trigger, value, spans),
            None => self.parse_regular_event(element_name, binding, name, value, spans),
        }
    }

    fn parse_regular_event(
        &mut self,
        element_name: Option<&str>,
        binding: &str,
        name: &str,
        value: &str,
        spans: &BindingSpans,
    ) -> Option<BoundEvent> {
        let [target, event_name] = split_at_colon(name, [None, Some(name)]);
        let event_name = event_name.unwrap_or(name);
        if event_name.is_empty() {
            self.report_error(&format!("Event name is missing in \"{}\"", name), &spans.source_span);
            return None;
        }
        if target == Some("") {
            self.report_error(&format!("Event target is missing in \"{}\"", name), &spans.source_span);
            return None;
        }
        self.validate_event_name(element_name, target, event_name, &spans.source_span);
        let handler = self.parse_action(binding, value, spans)?;
        Some(BoundEvent {
            name: event_name.to_string(),
            type_: ParsedEventType::Regular,
            handler,
            target: target.map(str::to_string),
            phase: None,
            source_span: spans.source_span.clone(),
            handler_span: spans.value_or_source().clone(),
            key_span: spans.key_span.clone(),
        })
    }

    fn parse_animation_event(
        &mut self,
        binding: &str,
        name: &str,
        value: &str,
        spans: &BindingSpans,
    ) -> Option<BoundEvent> {
        let [trigger, phase] = split_at_period(name, [Some(name), None]);
        let trigger = trigger.unwrap_or(name);
        let phase = phase.map(str::to_lowercase);

        if trigger.is_empty() {
            self.report_error("Animation event name is missing in binding", &spans.source_span);
            return None;
        }
        match phase.as_deref() {
            Some("start") | Some("done") => {}
            Some(other) => {
                let message = format!(
                    "The provided animation output phase value \"{}\" for \"@{}\" is not supported (use start or done)",
                    other, trigger
                );
                self.report_error(&message, &spans.source_span);
                return None;
            }
            None => {
                let message = format!(
                    "The animation trigger output event (@{}) is missing its phase value name \
                     (start or done are currently supported)",
                    trigger
                );
                self.report_error(&message, &spans.source_span);
                return None;
            }
        }

        let handler = self.parse_action(binding, value, spans)?;
        Some(BoundEvent {
            name: trigger.to_string(),
            type_: ParsedEventType::Animation,
            handler,
            target: None,
            phase,
            source_span: spans.source_span.clone(),
            handler_span: spans.value_or_source().clone(),
            key_span: shift_start(&spans.key_span, 1),
        })
    }

    /// `[(name)]="target"` is a property binding plus a `nameChange` event
    /// assigning `$event` back to `target`.
    pub fn parse_two_way_binding(
        &mut self,
        element_name: Option<&str>,
        binding: &str,
        name: &str,
        value: &str,
        spans: &BindingSpans,
    ) -> (Option<BoundAttribute>, Option<BoundEvent>) {
        if name.is_empty() {
            self.report_error("Property name is missing in binding", &spans.source_span);
            return (None, None);
        }
        let ast = match self.parse_binding(binding, value, spans) {
            Some(ast) => ast,
            None => return (None, None),
        };
        let is_valid = ast.errors.is_empty();
        if is_valid && !is_allowed_assignment_event(&ast.ast) {
            self.report_error("Unsupported expression in a two-way binding", &spans.source_span);
            return (None, None);
        }
        let property = match self.create_bound_element_property(element_name, name, ast, spans) {
            Some(property) => property,
            None => return (None, None),
        };
        if !is_valid {
            return (Some(property), None);
        }

        let handler = self.expr_parser.parse_action(
            &format!("{} = $event", value),
            &spans.location(),
            spans.absolute_value_offset(),
        );
        self.report_expression_parser_errors(&handler.errors, spans.value_or_source());
        let event = BoundEvent {
            name: format!("{}Change", name),
            type_: ParsedEventType::TwoWay,
            handler,
            target: None,
            phase: None,
            source_span: spans.source_span.clone(),
            handler_span: spans.value_or_source().clone(),
            key_span: spans.key_span.clone(),
        };
        (Some(property), Some(event))
    }

    /// Desugars `*template_key="template_value"`.
    pub fn parse_inline_template_binding(
        &mut self,
        template_key: &str,
        key_prefix: &str,
        template_value: &str,
        spans: &BindingSpans,
    ) -> InlineTemplateBindings {
        let location = spans.location();
        let source = TemplateBindingSource {
            location: &location,
            absolute_key_offset: spans.key_span.start.offset,
            absolute_value_offset: spans.absolute_value_offset(),
        };
        let result = parse_template_bindings(&self.expr_parser, template_key, key_prefix, template_value, source);
        self.report_expression_parser_errors(&result.errors, &spans.source_span);

        let base = &spans.source_span;
        let mut bindings = InlineTemplateBindings::default();
        for binding in result.bindings {
            match binding {
                TemplateBinding::Variable(variable) => {
                    let value = variable
                        .value
                        .as_ref()
                        .map(|value| value.source.clone())
                        .unwrap_or_else(|| IMPLICIT_VARIABLE_VALUE.to_string());
                    bindings.variables.push(Variable {
                        name: variable.key.source.clone(),
                        value,
                        source_span: move_parse_source_span(base, variable.span),
                        key_span: move_parse_source_span(base, variable.key.span),
                        value_span: variable.value.as_ref().map(|value| move_parse_source_span(base, value.span)),
                    });
                }
                TemplateBinding::Expression(expression) => {
                    let source_span = move_parse_source_span(base, expression.span);
                    let key_span = move_parse_source_span(base, expression.key.span);
                    match expression.value {
                        Some(value) => {
                            let value_span = move_parse_source_span(base, value.ast.source_span());
                            bindings.inputs.push(BoundAttribute {
                                name: expression.key.source,
                                type_: BindingType::Property,
                                value,
                                unit: None,
                                source_span,
                                key_span,
                                value_span: Some(value_span),
                            });
                        }
                        None => bindings.attributes.push(TextAttribute {
                            name: expression.key.source,
                            value: String::new(),
                            source_span,
                            key_span: Some(key_span),
                            value_span: None,
                        }),
                    }
                }
            }
        }
        bindings
    }

    pub fn report_error(&mut self, message: &str, span: &ParseSourceSpan) {
        self.errors.push(TemplateError::InvalidBinding {
            message: message.to_string(),
            span: span.clone(),
        });
    }

    fn report_empty_expression(&mut self, binding: &str, span: &ParseSourceSpan) {
        self.errors.push(TemplateError::EmptyExpression {
            binding: binding.to_string(),
            span: span.clone(),
        });
    }

    fn report_expression_parser_errors(&mut self, errors: &[ParserError], span: &ParseSourceSpan) {
        for error in errors {
            self.errors.push(TemplateError::ExpressionSyntax {
                message: error.to_string(),
                span: span.clone(),
            });
        }
    }

    fn report_warning(&mut self, message: String, span: &ParseSourceSpan) {
        warn!(location = %span.start, "{}", message);
        self.warnings.push(ParseError::warning(span.clone(), message));
    }
}

/// Only plain reads can be assigned to by a two-way binding.
fn is_allowed_assignment_event(ast: &ExprAST) -> bool {
    match ast {
        ExprAST::NonNullAssert(n) => is_allowed_assignment_event(&n.expression),
        ExprAST::PropertyRead(p) => !has_recursive_safe_receiver(&p.receiver),
        ExprAST::KeyedRead(k) => !has_recursive_safe_receiver(&k.receiver),
        _ => false,
    }
}

fn has_recursive_safe_receiver(ast: &ExprAST) -> bool {
    match ast {
        ExprAST::SafePropertyRead(_) | ExprAST::SafeKeyedRead(_) | ExprAST::SafeCall(_) => true,
        ExprAST::PropertyRead(p) => has_recursive_safe_receiver(&p.receiver),
        ExprAST::KeyedRead(k) => has_recursive_safe_receiver(&k.receiver),
        ExprAST::Call(c) => has_recursive_safe_receiver(&c.receiver),
        ExprAST::NonNullAssert(n) => has_recursive_safe_receiver(&n.expression),
        _ => false,
    }
}

fn shift_start(span: &ParseSourceSpan, by: usize) -> ParseSourceSpan {
    ParseSourceSpan::new(span.start.move_by(by as i32), span.end.clone())
}

/// Rebases a file-absolute span onto the locations of `source_span`.
pub fn move_parse_source_span(source_span: &ParseSourceSpan, absolute_span: AbsoluteSourceSpan) -> ParseSourceSpan {
    let start_diff = absolute_span.start as i64 - source_span.start.offset as i64;
    let end_diff = absolute_span.end as i64 - source_span.end.offset as i64;
    ParseSourceSpan::new(
        source_span.start.move_by(start_diff as i32),
        source_span.end.move_by(end_diff as i32),
    )
}
