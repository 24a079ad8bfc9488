//! Parse Template Tests
//!
//! Entry points, options and schema diagnostics of the template parser.

use angular_template_ast::{
    parse_template, parse_template_with_schema, parse_templates, ConfigError, DomElementSchemaRegistry,
    ElementSchemaRegistry, InterpolationConfig, ParseErrorLevel, ProjectionScope, TemplateError, TemplateSource,
    TransformOptions, ValidationResult,
};

#[path = "util.rs"]
mod util;
use util::{expect_from_r3_nodes, rows, TEMPLATE_URL};

/// Schema that knows a single `title` property and renames `tabindex`.
struct TitleOnlySchema;

impl ElementSchemaRegistry for TitleOnlySchema {
    fn has_property(&self, _tag_name: &str, prop_name: &str) -> bool {
        prop_name == "title" || prop_name == "tabIndex"
    }

    fn has_element(&self, _tag_name: &str) -> bool {
        true
    }

    fn get_mapped_prop_name(&self, attr_name: &str) -> Option<String> {
        (attr_name == "tabindex").then(|| "tabIndex".to_string())
    }

    fn has_event(&self, _tag_name: &str, _event_name: &str) -> bool {
        true
    }

    fn validate_property(&self, _name: &str) -> ValidationResult {
        ValidationResult::ok()
    }
}

fn schema_options() -> TransformOptions {
    TransformOptions {
        validate_schema: true,
        ..TransformOptions::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod options {
        use super::*;

        #[test]
        fn should_load_options_from_json() {
            let options = TransformOptions::from_json(
                r#"{"preserveWhitespaces": false, "projectionScope": "template", "validateSchema": true}"#,
            )
            .expect("valid options");
            assert!(!options.preserve_whitespaces);
            pretty_assertions::assert_eq!(options.projection_scope, ProjectionScope::Template);
            assert!(options.validate_schema);
            pretty_assertions::assert_eq!(options.interpolation.start, "{{");
        }

        #[test]
        fn should_reject_malformed_json() {
            assert!(matches!(
                TransformOptions::from_json("{\"preserveWhitespaces\": 1}"),
                Err(ConfigError::Json(_))
            ));
        }

        #[test]
        fn should_reject_unusable_interpolation() {
            assert!(matches!(
                TransformOptions::from_json(r#"{"interpolation": {"start": "<%", "end": "%>"}}"#),
                Err(ConfigError::UnusableInterpolation { .. })
            ));
        }

        #[test]
        fn should_reject_empty_markers_built_in_code() {
            for (start, end) in [("", ""), ("", "}}"), ("{{", "")] {
                let options = TransformOptions {
                    interpolation: InterpolationConfig::new(start.to_string(), end.to_string()),
                    ..TransformOptions::default()
                };
                let errors = parse_template("<div>a</div>", TEMPLATE_URL, &options).expect_err("unusable markers");
                pretty_assertions::assert_eq!(errors.len(), 1);
                assert!(matches!(
                    &errors.0[0],
                    TemplateError::InvalidOptions {
                        source: ConfigError::UnusableInterpolation { .. },
                        ..
                    }
                ));
                pretty_assertions::assert_eq!(errors.0[0].span().start.offset, 0);
            }
        }
    }

    mod schema {
        use super::*;

        #[test]
        fn should_not_warn_without_schema_validation() {
            let parsed = parse_template("<div [foo]=\"x\"></div>", TEMPLATE_URL, &TransformOptions::default())
                .expect("parses");
            assert!(parsed.warnings.is_empty());
        }

        #[test]
        fn should_warn_about_unknown_properties() {
            let parsed = parse_template("<div [foo]=\"x\" [title]=\"t\"></div>", TEMPLATE_URL, &schema_options())
                .expect("warnings are not fatal");
            pretty_assertions::assert_eq!(parsed.warnings.len(), 1);
            pretty_assertions::assert_eq!(parsed.warnings[0].level, ParseErrorLevel::Warning);
            pretty_assertions::assert_eq!(
                parsed.warnings[0].msg,
                "Can't bind to 'foo' since it isn't a known property of 'div'."
            );
        }

        #[test]
        fn should_skip_ng_container() {
            let parsed = parse_template("<ng-container [foo]=\"x\"></ng-container>", TEMPLATE_URL, &schema_options())
                .expect("parses");
            assert!(parsed.warnings.is_empty());
        }

        #[test]
        fn should_warn_about_event_properties() {
            let parsed = parse_template("<div [onclick]=\"x\"></div>", TEMPLATE_URL, &schema_options())
                .expect("warnings are not fatal");
            pretty_assertions::assert_eq!(parsed.warnings.len(), 1);
            assert!(parsed.warnings[0].msg.contains("onclick"));
        }

        #[test]
        fn should_warn_about_unknown_events() {
            let parsed = parse_template(
                "<div (click)=\"a()\" (popstate)=\"b()\" (window:popstate)=\"c()\"></div><x-a (custom)=\"d()\"></x-a>",
                TEMPLATE_URL,
                &schema_options(),
            )
            .expect("warnings are not fatal");
            pretty_assertions::assert_eq!(parsed.warnings.len(), 1);
            pretty_assertions::assert_eq!(parsed.warnings[0].msg, "'popstate' is not a known event of 'div'.");
        }

        #[test]
        fn should_consult_a_custom_schema() {
            let parsed = parse_template_with_schema(
                "<x-a [tabindex]=\"t\" [foo]=\"f\"></x-a>",
                TEMPLATE_URL,
                &schema_options(),
                &TitleOnlySchema,
            )
            .expect("parses");
            pretty_assertions::assert_eq!(
                expect_from_r3_nodes(&parsed.nodes),
                rows(&[
                    &["Element", "x-a"],
                    &["BoundAttribute", "Property", "tabIndex", "t"],
                    &["BoundAttribute", "Property", "foo", "f"],
                ])
            );
            pretty_assertions::assert_eq!(parsed.warnings.len(), 1);
            assert!(parsed.warnings[0].msg.starts_with("Can't bind to 'foo'"));
        }
    }

    mod batch {
        use super::*;

        #[test]
        fn should_parse_templates_in_input_order() {
            let sources = [
                TemplateSource { template: "<a></a>", template_url: "a.html" },
                TemplateSource { template: "<b (x)=\"\"></b>", template_url: "b.html" },
                TemplateSource { template: "{{c}}", template_url: "c.html" },
            ];
            let results = parse_templates(&sources, &TransformOptions::default(), &DomElementSchemaRegistry::new());
            pretty_assertions::assert_eq!(results.len(), 3);

            let first = results[0].as_ref().expect("first parses");
            pretty_assertions::assert_eq!(expect_from_r3_nodes(&first.nodes), rows(&[&["Element", "a"]]));

            let errors = results[1].as_ref().err().expect("second fails");
            assert!(matches!(&errors.0[0], TemplateError::EmptyExpression { .. }));
            pretty_assertions::assert_eq!(errors.0[0].span().start.file.url, "b.html");

            let third = results[2].as_ref().expect("third parses");
            pretty_assertions::assert_eq!(expect_from_r3_nodes(&third.nodes), rows(&[&["BoundText", "{{ c }}"]]));
        }

        #[test]
        fn should_match_single_template_parsing() {
            let html = "<div *ngIf=\"a\"><ng-content select=\"b\"></ng-content></div>";
            let sources = [TemplateSource { template: html, template_url: TEMPLATE_URL }];
            let batch = parse_templates(&sources, &TransformOptions::default(), &DomElementSchemaRegistry::new());
            let single = parse_template(html, TEMPLATE_URL, &TransformOptions::default()).expect("parses");
            let batched = batch[0].as_ref().expect("parses");
            pretty_assertions::assert_eq!(batched.nodes, single.nodes);
            pretty_assertions::assert_eq!(batched.ng_content_selectors, single.ng_content_selectors);
        }
    }
}
