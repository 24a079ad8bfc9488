//! Render3 AST
//!
//! Corresponds to packages/compiler/src/render3/r3_ast.ts
//! The typed template AST produced by the template transform.
//!
//! Nodes are plain owned data: built once by the transform and never
//! mutated afterwards. Diagnostics point at source spans, never at nodes.

use serde::Serialize;

use crate::expression_parser::ast::{ASTWithSource, ParsedEventType};
use crate::parse_util::ParseSourceSpan;

/// Closed set of template AST nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum R3Node {
    Element(Element),
    Template(Template),
    Content(Content),
    Text(Text),
    BoundText(BoundText),
    TextAttribute(TextAttribute),
    BoundAttribute(BoundAttribute),
    BoundEvent(BoundEvent),
    Variable(Variable),
    Reference(Reference),
}

impl R3Node {
    pub fn source_span(&self) -> &ParseSourceSpan {
        match self {
            R3Node::Element(n) => &n.source_span,
            R3Node::Template(n) => &n.source_span,
            R3Node::Content(n) => &n.source_span,
            R3Node::Text(n) => &n.source_span,
            R3Node::BoundText(n) => &n.source_span,
            R3Node::TextAttribute(n) => &n.source_span,
            R3Node::BoundAttribute(n) => &n.source_span,
            R3Node::BoundEvent(n) => &n.source_span,
            R3Node::Variable(n) => &n.source_span,
            R3Node::Reference(n) => &n.source_span,
        }
    }

    pub fn visit<V: Visitor>(&self, visitor: &mut V) -> V::Result {
        match self {
            R3Node::Element(n) => visitor.visit_element(n),
            R3Node::Template(n) => visitor.visit_template(n),
            R3Node::Content(n) => visitor.visit_content(n),
            R3Node::Text(n) => visitor.visit_text(n),
            R3Node::BoundText(n) => visitor.visit_bound_text(n),
            R3Node::TextAttribute(n) => visitor.visit_text_attribute(n),
            R3Node::BoundAttribute(n) => visitor.visit_bound_attribute(n),
            R3Node::BoundEvent(n) => visitor.visit_bound_event(n),
            R3Node::Variable(n) => visitor.visit_variable(n),
            R3Node::Reference(n) => visitor.visit_reference(n),
        }
    }
}

/// Static text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub value: String,
    pub source_span: ParseSourceSpan,
}

/// A whole text node containing interpolations, as one expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundText {
    pub value: ASTWithSource,
    pub source_span: ParseSourceSpan,
}

/// Text attribute in the template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextAttribute {
    pub name: String,
    pub value: String,
    pub source_span: ParseSourceSpan,
    pub key_span: Option<ParseSourceSpan>,
    pub value_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BindingType {
    /// `[prop]`, also interpolated plain attributes
    Property,
    /// `[attr.name]`
    Attribute,
    /// `[class.name]`
    Class,
    /// `[style.name]`, `[style.name.unit]`
    Style,
    /// `[@trigger]`
    Animation,
}

/// Bound attribute node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundAttribute {
    pub name: String,
    pub type_: BindingType,
    pub value: ASTWithSource,
    pub unit: Option<String>,
    pub source_span: ParseSourceSpan,
    pub key_span: ParseSourceSpan,
    pub value_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundEvent {
    pub name: String,
    pub type_: ParsedEventType,
    pub handler: ASTWithSource,
    /// Event source such as `window` or `document`.
    pub target: Option<String>,
    /// Animation phase, `start` or `done`.
    pub phase: Option<String>,
    pub source_span: ParseSourceSpan,
    pub handler_span: ParseSourceSpan,
    pub key_span: ParseSourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    /// Namespace-qualified, e.g. `:svg:circle`.
    pub name: String,
    pub attributes: Vec<TextAttribute>,
    pub inputs: Vec<BoundAttribute>,
    pub outputs: Vec<BoundEvent>,
    pub references: Vec<Reference>,
    pub children: Vec<R3Node>,
    pub is_self_closing: bool,
    pub source_span: ParseSourceSpan,
    pub start_source_span: ParseSourceSpan,
    pub end_source_span: Option<ParseSourceSpan>,
}

/// `<ng-template>` or the implicit template of a structural directive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    pub attributes: Vec<TextAttribute>,
    pub inputs: Vec<BoundAttribute>,
    pub outputs: Vec<BoundEvent>,
    pub references: Vec<Reference>,
    pub variables: Vec<Variable>,
    pub children: Vec<R3Node>,
    pub source_span: ParseSourceSpan,
    pub start_source_span: ParseSourceSpan,
    pub end_source_span: Option<ParseSourceSpan>,
}

/// Content-projection slot (`<ng-content>`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    /// 0 for the wildcard slot.
    pub selector_index: usize,
    pub selector: String,
    pub attributes: Vec<TextAttribute>,
    pub source_span: ParseSourceSpan,
}

impl Content {
    pub fn name(&self) -> &str {
        "ng-content"
    }
}

/// Template-local variable: `let-x="y"` or microsyntax `let x = y` / `y as x`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    pub name: String,
    pub value: String,
    pub source_span: ParseSourceSpan,
    pub key_span: ParseSourceSpan,
    pub value_span: Option<ParseSourceSpan>,
}

/// `#x` / `ref-x`, value is the export name or empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reference {
    pub name: String,
    pub value: String,
    pub source_span: ParseSourceSpan,
    pub key_span: ParseSourceSpan,
    pub value_span: Option<ParseSourceSpan>,
}

pub trait Visitor {
    type Result;

    fn visit_element(&mut self, element: &Element) -> Self::Result;
    fn visit_template(&mut self, template: &Template) -> Self::Result;
    fn visit_content(&mut self, content: &Content) -> Self::Result;
    fn visit_variable(&mut self, variable: &Variable) -> Self::Result;
    fn visit_reference(&mut self, reference: &Reference) -> Self::Result;
    fn visit_text_attribute(&mut self, attribute: &TextAttribute) -> Self::Result;
    fn visit_bound_attribute(&mut self, attribute: &BoundAttribute) -> Self::Result;
    fn visit_bound_event(&mut self, event: &BoundEvent) -> Self::Result;
    fn visit_text(&mut self, text: &Text) -> Self::Result;
    fn visit_bound_text(&mut self, text: &BoundText) -> Self::Result;
}

/// Visit all nodes in a list
pub fn visit_all<V: Visitor>(visitor: &mut V, nodes: &[R3Node]) -> Vec<V::Result> {
    nodes.iter().map(|node| node.visit(visitor)).collect()
}
