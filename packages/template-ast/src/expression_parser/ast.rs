/**
 * Angular Expression AST
 *
 * Defines the AST node types for Angular template expressions
 * Mirrors packages/compiler/src/expression_parser/ast.ts
 */

use serde::Serialize;

use super::parser::ParserError;

/// Span relative to the start of the expression source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParseSpan {
    pub start: usize,
    pub end: usize,
}

impl ParseSpan {
    pub fn new(start: usize, end: usize) -> Self {
        ParseSpan { start, end }
    }

    pub fn to_absolute(&self, absolute_offset: usize) -> AbsoluteSourceSpan {
        AbsoluteSourceSpan::new(absolute_offset + self.start, absolute_offset + self.end)
    }
}

/// Span relative to the start of the template file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AbsoluteSourceSpan {
    pub start: usize,
    pub end: usize,
}

impl AbsoluteSourceSpan {
    pub fn new(start: usize, end: usize) -> Self {
        AbsoluteSourceSpan { start, end }
    }
}

/// Main AST enum containing all node types
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum AST {
    EmptyExpr(EmptyExpr),
    ImplicitReceiver(ImplicitReceiver),
    ThisReceiver(ImplicitReceiver),
    Chain(Chain),
    Conditional(Conditional),
    PropertyRead(PropertyRead),
    SafePropertyRead(PropertyRead),
    PropertyWrite(PropertyWrite),
    KeyedRead(KeyedRead),
    SafeKeyedRead(KeyedRead),
    KeyedWrite(KeyedWrite),
    BindingPipe(BindingPipe),
    LiteralPrimitive(LiteralPrimitive),
    LiteralArray(LiteralArray),
    LiteralMap(LiteralMap),
    Interpolation(Interpolation),
    Binary(Binary),
    PrefixNot(PrefixNot),
    Unary(Unary),
    TypeofExpression(PrefixNot),
    NonNullAssert(NonNullAssert),
    Call(Call),
    SafeCall(Call),
}

impl AST {
    pub fn span(&self) -> ParseSpan {
        match self {
            AST::EmptyExpr(e) => e.span,
            AST::ImplicitReceiver(e) | AST::ThisReceiver(e) => e.span,
            AST::Chain(e) => e.span,
            AST::Conditional(e) => e.span,
            AST::PropertyRead(e) | AST::SafePropertyRead(e) => e.span,
            AST::PropertyWrite(e) => e.span,
            AST::KeyedRead(e) | AST::SafeKeyedRead(e) => e.span,
            AST::KeyedWrite(e) => e.span,
            AST::BindingPipe(e) => e.span,
            AST::LiteralPrimitive(e) => e.span,
            AST::LiteralArray(e) => e.span,
            AST::LiteralMap(e) => e.span,
            AST::Interpolation(e) => e.span,
            AST::Binary(e) => e.span,
            AST::PrefixNot(e) | AST::TypeofExpression(e) => e.span,
            AST::Unary(e) => e.span,
            AST::NonNullAssert(e) => e.span,
            AST::Call(e) | AST::SafeCall(e) => e.span,
        }
    }

    pub fn source_span(&self) -> AbsoluteSourceSpan {
        match self {
            AST::EmptyExpr(e) => e.source_span,
            AST::ImplicitReceiver(e) | AST::ThisReceiver(e) => e.source_span,
            AST::Chain(e) => e.source_span,
            AST::Conditional(e) => e.source_span,
            AST::PropertyRead(e) | AST::SafePropertyRead(e) => e.source_span,
            AST::PropertyWrite(e) => e.source_span,
            AST::KeyedRead(e) | AST::SafeKeyedRead(e) => e.source_span,
            AST::KeyedWrite(e) => e.source_span,
            AST::BindingPipe(e) => e.source_span,
            AST::LiteralPrimitive(e) => e.source_span,
            AST::LiteralArray(e) => e.source_span,
            AST::LiteralMap(e) => e.source_span,
            AST::Interpolation(e) => e.source_span,
            AST::Binary(e) => e.source_span,
            AST::PrefixNot(e) | AST::TypeofExpression(e) => e.source_span,
            AST::Unary(e) => e.source_span,
            AST::NonNullAssert(e) => e.source_span,
            AST::Call(e) | AST::SafeCall(e) => e.source_span,
        }
    }

    pub fn is_implicit_receiver(&self) -> bool {
        matches!(self, AST::ImplicitReceiver(_))
    }
}

/// Empty expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmptyExpr {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
}

/// Implicit receiver (the component instance), also used for explicit `this`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImplicitReceiver {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
}

/// Chain of expressions (e.g., `a; b; c`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chain {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub expressions: Vec<AST>,
}

/// Ternary conditional (e.g., `condition ? true : false`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conditional {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub condition: Box<AST>,
    pub true_exp: Box<AST>,
    pub false_exp: Box<AST>,
}

/// Property read (e.g., `obj.property`, or `obj?.property` when safe)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyRead {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub name_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub name: String,
}

/// Property write (e.g., `obj.property = value`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyWrite {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub name_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub name: String,
    pub value: Box<AST>,
}

/// Keyed read (e.g., `obj[key]`, or `obj?.[key]` when safe)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyedRead {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub key: Box<AST>,
}

/// Keyed write (e.g., `obj[key] = value`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyedWrite {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub key: Box<AST>,
    pub value: Box<AST>,
}

/// Pipe binding (e.g., `value | pipeName:arg1:arg2`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BindingPipe {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub name_span: AbsoluteSourceSpan,
    pub exp: Box<AST>,
    pub name: String,
    pub args: Vec<AST>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    Undefined,
}

/// Literal primitive (string, number, boolean, null, undefined)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiteralPrimitive {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub value: LiteralValue,
}

/// Array literal (e.g., `[1, 2, 3]`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiteralArray {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub expressions: Vec<AST>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiteralMapKey {
    pub key: String,
    pub quoted: bool,
}

/// Object literal (e.g., `{a: 1, b: 2}`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiteralMap {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub keys: Vec<LiteralMapKey>,
    pub values: Vec<AST>,
}

/// Text with `{{ }}` holes; `strings.len() == expressions.len() + 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interpolation {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub strings: Vec<String>,
    pub expressions: Vec<AST>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Binary {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub operation: String,
    pub left: Box<AST>,
    pub right: Box<AST>,
}

/// `!expr`, and `typeof expr` under [`AST::TypeofExpression`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrefixNot {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub expression: Box<AST>,
}

/// `+expr`, `-expr`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unary {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub operator: String,
    pub expr: Box<AST>,
}

/// Function call (e.g., `fn(a, b)`, or `fn?.(a, b)` when safe)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Call {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub args: Vec<AST>,
    pub argument_span: AbsoluteSourceSpan,
}

/// Non-null assertion (e.g., `expr!`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NonNullAssert {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub expression: Box<AST>,
}

/// A parsed expression together with the source it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ASTWithSource {
    pub ast: AST,
    pub source: Option<String>,
    pub location: String,
    pub absolute_offset: usize,
    #[serde(skip)]
    pub errors: Vec<ParserError>,
}

impl ASTWithSource {
    pub fn new(
        ast: AST,
        source: Option<String>,
        location: String,
        absolute_offset: usize,
        errors: Vec<ParserError>,
    ) -> Self {
        ASTWithSource {
            ast,
            source,
            location,
            absolute_offset,
            errors,
        }
    }
}

/// Template binding identifier (`key` of a microsyntax binding)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateBindingIdentifier {
    pub source: String,
    pub span: AbsoluteSourceSpan,
}

/// `let x = y` / `y as x`: `value` is the referenced context name, `None` means `$implicit`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableBinding {
    pub span: AbsoluteSourceSpan,
    pub key: TemplateBindingIdentifier,
    pub value: Option<TemplateBindingIdentifier>,
}

/// `key expr`: `value` is `None` when only the key was written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionBinding {
    pub span: AbsoluteSourceSpan,
    pub key: TemplateBindingIdentifier,
    pub value: Option<ASTWithSource>,
}

/// One entry of a structural-directive microsyntax, in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum TemplateBinding {
    Variable(VariableBinding),
    Expression(ExpressionBinding),
}

impl TemplateBinding {
    pub fn key(&self) -> &TemplateBindingIdentifier {
        match self {
            TemplateBinding::Variable(binding) => &binding.key,
            TemplateBinding::Expression(binding) => &binding.key,
        }
    }

    pub fn span(&self) -> AbsoluteSourceSpan {
        match self {
            TemplateBinding::Variable(binding) => binding.span,
            TemplateBinding::Expression(binding) => binding.span,
        }
    }
}

/// Parsed event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParsedEventType {
    /// DOM or directive event
    Regular,
    /// Animation phase listener `(@trigger.done)`
    Animation,
    /// Change half of a `[(x)]` two-way binding
    TwoWay,
}
