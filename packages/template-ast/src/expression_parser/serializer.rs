/**
 * Angular Expression Serializer
 *
 * Serializes AST back to string format
 * Mirrors packages/compiler/src/expression_parser/serializer.ts
 */
use super::ast::*;

/// Serialize AST to string
pub fn serialize(ast: &AST) -> String {
    let mut visitor = SerializeExpressionVisitor;
    visit_ast(&mut visitor, ast)
}

struct SerializeExpressionVisitor;

fn visit_ast(visitor: &mut SerializeExpressionVisitor, ast: &AST) -> String {
    match ast {
        AST::Binary(b) => visitor.visit_binary(b),
        AST::PropertyRead(p) => visitor.visit_property_read(p, false),
        AST::SafePropertyRead(p) => visitor.visit_property_read(p, true),
        AST::PropertyWrite(p) => visitor.visit_property_write(p),
        AST::KeyedRead(k) => visitor.visit_keyed_read(k, false),
        AST::SafeKeyedRead(k) => visitor.visit_keyed_read(k, true),
        AST::KeyedWrite(k) => visitor.visit_keyed_write(k),
        AST::LiteralPrimitive(l) => visitor.visit_literal_primitive(l),
        AST::LiteralArray(a) => visitor.visit_literal_array(a),
        AST::LiteralMap(m) => visitor.visit_literal_map(m),
        AST::Interpolation(i) => visitor.visit_interpolation(i),
        AST::Conditional(c) => visitor.visit_conditional(c),
        AST::BindingPipe(p) => visitor.visit_pipe(p),
        AST::Call(c) => visitor.visit_call(c, false),
        AST::SafeCall(c) => visitor.visit_call(c, true),
        AST::Chain(c) => visitor.visit_chain(c),
        AST::PrefixNot(p) => format!("!{}", visit_ast(visitor, &p.expression)),
        AST::TypeofExpression(t) => format!("typeof {}", visit_ast(visitor, &t.expression)),
        AST::Unary(u) => format!("{}{}", u.operator, visit_ast(visitor, &u.expr)),
        AST::NonNullAssert(n) => format!("{}!", visit_ast(visitor, &n.expression)),
        AST::ThisReceiver(_) => "this".to_string(),
        AST::ImplicitReceiver(_) | AST::EmptyExpr(_) => String::new(),
    }
}

impl SerializeExpressionVisitor {
    fn visit_list(&mut self, asts: &[AST], separator: &str) -> String {
        asts.iter()
            .map(|e| visit_ast(self, e))
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn visit_binary(&mut self, ast: &Binary) -> String {
        format!(
            "{} {} {}",
            visit_ast(self, &ast.left),
            ast.operation,
            visit_ast(self, &ast.right)
        )
    }

    fn visit_chain(&mut self, ast: &Chain) -> String {
        self.visit_list(&ast.expressions, "; ")
    }

    fn visit_conditional(&mut self, ast: &Conditional) -> String {
        format!(
            "{} ? {} : {}",
            visit_ast(self, &ast.condition),
            visit_ast(self, &ast.true_exp),
            visit_ast(self, &ast.false_exp)
        )
    }

    fn visit_keyed_read(&mut self, ast: &KeyedRead, is_safe: bool) -> String {
        let access = if is_safe { "?.[" } else { "[" };
        format!("{}{}{}]", visit_ast(self, &ast.receiver), access, visit_ast(self, &ast.key))
    }

    fn visit_keyed_write(&mut self, ast: &KeyedWrite) -> String {
        format!(
            "{}[{}] = {}",
            visit_ast(self, &ast.receiver),
            visit_ast(self, &ast.key),
            visit_ast(self, &ast.value)
        )
    }

    fn visit_literal_array(&mut self, ast: &LiteralArray) -> String {
        format!("[{}]", self.visit_list(&ast.expressions, ", "))
    }

    fn visit_literal_map(&mut self, ast: &LiteralMap) -> String {
        let pairs: Vec<String> = ast
            .keys
            .iter()
            .zip(ast.values.iter())
            .map(|(key, value)| {
                let key_str = if key.quoted {
                    format!("\"{}\"", key.key)
                } else {
                    key.key.clone()
                };
                format!("{}: {}", key_str, visit_ast(self, value))
            })
            .collect();
        format!("{{{}}}", pairs.join(", "))
    }

    fn visit_literal_primitive(&mut self, ast: &LiteralPrimitive) -> String {
        match &ast.value {
            LiteralValue::String(value) => format!("'{}'", value.replace('\'', "\\'")),
            LiteralValue::Number(value) => value.to_string(),
            LiteralValue::Boolean(value) => value.to_string(),
            LiteralValue::Null => "null".to_string(),
            LiteralValue::Undefined => "undefined".to_string(),
        }
    }

    fn visit_pipe(&mut self, ast: &BindingPipe) -> String {
        let mut result = format!("{} | {}", visit_ast(self, &ast.exp), ast.name);
        for arg in &ast.args {
            result.push(':');
            result.push_str(&visit_ast(self, arg));
        }
        result
    }

    fn visit_property_read(&mut self, ast: &PropertyRead, is_safe: bool) -> String {
        let receiver = visit_ast(self, &ast.receiver);
        if is_safe {
            format!("{}?.{}", receiver, ast.name)
        } else if receiver.is_empty() {
            ast.name.clone()
        } else {
            format!("{}.{}", receiver, ast.name)
        }
    }

    fn visit_property_write(&mut self, ast: &PropertyWrite) -> String {
        let receiver = visit_ast(self, &ast.receiver);
        let value = visit_ast(self, &ast.value);
        if receiver.is_empty() {
            format!("{} = {}", ast.name, value)
        } else {
            format!("{}.{} = {}", receiver, ast.name, value)
        }
    }

    fn visit_call(&mut self, ast: &Call, is_safe: bool) -> String {
        let open = if is_safe { "?.(" } else { "(" };
        format!(
            "{}{}{})",
            visit_ast(self, &ast.receiver),
            open,
            self.visit_list(&ast.args, ", ")
        )
    }

    fn visit_interpolation(&mut self, ast: &Interpolation) -> String {
        let mut result = String::new();
        for (idx, s) in ast.strings.iter().enumerate() {
            result.push_str(s);
            if let Some(expression) = ast.expressions.get(idx) {
                result.push_str("{{ ");
                result.push_str(&visit_ast(self, expression));
                result.push_str(" }}");
            }
        }
        result
    }
}
