//! Parser Tests
//!
//! Mirrors angular/packages/compiler/test/expression_parser/parser_spec.ts

#[cfg(test)]
mod tests {
    use angular_template_ast::expression_parser::ast::{AbsoluteSourceSpan, AST};
    use angular_template_ast::expression_parser::{serialize, Parser};
    use angular_template_ast::InterpolationConfig;

    const LOCATION: &str = "location";

    fn parse_action(text: &str) -> Result<AST, String> {
        let result = Parser::new().parse_action(text, LOCATION, 0);
        match result.errors.first() {
            Some(error) => Err(error.message.clone()),
            None => Ok(result.ast),
        }
    }

    fn parse_binding(text: &str) -> Result<AST, String> {
        let result = Parser::new().parse_binding(text, LOCATION, 0, &InterpolationConfig::default());
        match result.errors.first() {
            Some(error) => Err(error.message.clone()),
            None => Ok(result.ast),
        }
    }

    fn check_action(exp: &str, expected: Option<&str>) {
        let ast = parse_action(exp).unwrap_or_else(|e| panic!("{}: {}", exp, e));
        pretty_assertions::assert_eq!(serialize(&ast), expected.unwrap_or(exp));
    }

    fn check_binding(exp: &str, expected: Option<&str>) {
        let ast = parse_binding(exp).unwrap_or_else(|e| panic!("{}: {}", exp, e));
        pretty_assertions::assert_eq!(serialize(&ast), expected.unwrap_or(exp));
    }

    fn expect_action_error(text: &str, message: &str) {
        let error = parse_action(text).expect_err(text);
        assert!(error.contains(message), "{:?} does not contain {:?}", error, message);
    }

    fn expect_binding_error(text: &str, message: &str) {
        let error = parse_binding(text).expect_err(text);
        assert!(error.contains(message), "{:?} does not contain {:?}", error, message);
    }

    mod parse_action {
        use super::*;

        #[test]
        fn should_parse_numbers_and_strings() {
            check_action("1", None);
            check_action("'a'", None);
            check_action("\"a\"", Some("'a'"));
        }

        #[test]
        fn should_parse_unary_and_binary_expressions() {
            check_action("-1", None);
            check_action("!a", None);
            check_action("a + b * c", None);
            check_action("a && b || c", None);
            check_action("a ?? b", None);
        }

        #[test]
        fn should_parse_conditionals() {
            check_action("a ? b : c", None);
        }

        #[test]
        fn should_parse_property_access_and_calls() {
            check_action("a.b.c", None);
            check_action("a?.b", None);
            check_action("a[b]", None);
            check_action("fn(a, b)", None);
            check_action("a.fn()", None);
            check_action("a!.b", None);
        }

        #[test]
        fn should_parse_assignments_and_chains() {
            check_action("a = 1", None);
            check_action("a.b = $event", None);
            check_action("a[0] = b", None);
            check_action("a(); b()", None);
            check_action("a();; b()", Some("a(); b()"));
        }

        #[test]
        fn should_parse_literals() {
            check_action("[1, 2]", None);
            check_action("{a: 1, \"b\": c}", None);
            check_action("null", None);
            check_action("true", None);
        }

        #[test]
        fn should_reject_pipes() {
            expect_action_error("a | b", "Cannot have a pipe in an action expression");
        }

        #[test]
        fn should_reject_safe_navigation_assignments() {
            expect_action_error("a?.b = 1", "The '?.' operator cannot be used in the assignment");
        }
    }

    mod parse_binding {
        use super::*;

        #[test]
        fn should_parse_pipes() {
            check_binding("a | b", None);
            check_binding("a | b:c:d", None);
            check_binding("(a | b) + 1", Some("a | b + 1"));
        }

        #[test]
        fn should_reject_assignments_and_chains() {
            expect_binding_error("a = 1", "Bindings cannot contain assignments");
            expect_binding_error("a; b", "Binding expression cannot contain chained expression");
        }

        #[test]
        fn should_reject_interpolation() {
            expect_binding_error("{{a}}", "Got interpolation ({{}}) where expression was expected");
        }

        #[test]
        fn should_report_unexpected_tokens() {
            expect_binding_error("a b", "Unexpected token 'b'");
        }

        #[test]
        fn should_return_empty_expression_for_blank_input() {
            let ast = parse_binding("  ").expect("blank input parses");
            assert!(matches!(ast, AST::EmptyExpr(_)));
        }

        #[test]
        fn should_record_absolute_spans() {
            let result = Parser::new().parse_binding("a.b", LOCATION, 10, &InterpolationConfig::default());
            pretty_assertions::assert_eq!(result.ast.source_span(), AbsoluteSourceSpan::new(10, 13));
            pretty_assertions::assert_eq!(result.source.as_deref(), Some("a.b"));
        }

        #[test]
        fn should_describe_error_locations() {
            let result = Parser::new().parse_binding("a b", "app.html@1:2", 0, &InterpolationConfig::default());
            pretty_assertions::assert_eq!(
                result.errors[0].to_string(),
                "Parser Error: Unexpected token 'b' at column 3 in [a b] in app.html@1:2"
            );
        }
    }

    mod parse_interpolation {
        use super::*;

        fn interpolation(text: &str) -> Option<String> {
            Parser::new()
                .parse_interpolation(text, LOCATION, 0, &InterpolationConfig::default())
                .map(|result| serialize(&result.ast))
        }

        #[test]
        fn should_return_none_without_interpolation() {
            pretty_assertions::assert_eq!(interpolation("abc"), None);
        }

        #[test]
        fn should_parse_multiple_expressions() {
            pretty_assertions::assert_eq!(interpolation("a{{b}}c{{ d | e }}"), Some("a{{ b }}c{{ d | e }}".to_string()));
        }

        #[test]
        fn should_ignore_end_markers_in_strings() {
            pretty_assertions::assert_eq!(interpolation("{{ '}}' }}"), Some("{{ '}}' }}".to_string()));
        }

        #[test]
        fn should_use_custom_markers() {
            let config = InterpolationConfig::new("[[".to_string(), "]]".to_string());
            let result = Parser::new()
                .parse_interpolation("x[[a]]", LOCATION, 0, &config)
                .expect("has interpolation");
            assert!(result.errors.is_empty());
            pretty_assertions::assert_eq!(serialize(&result.ast), "x{{ a }}");
        }

        #[test]
        fn should_report_errors_per_expression() {
            let result = Parser::new()
                .parse_interpolation("{{a b}}", LOCATION, 0, &InterpolationConfig::default())
                .expect("has interpolation");
            pretty_assertions::assert_eq!(result.errors.len(), 1);
            assert!(result.errors[0].message.contains("Unexpected token 'b'"));
        }
    }
}
