//! R3 Template Transform Tests
//!
//! Mirrors angular/packages/compiler/test/render3/r3_template_transform_spec.ts

use angular_template_ast::{ProjectionScope, R3Node, TemplateError, TransformOptions};

#[path = "view/util.rs"]
mod view_util;
use view_util::{
    error_messages, expect_from_html, expect_from_html_with_options, expect_from_r3_nodes, parse_r3,
    parse_r3_errors, parse_r3_with_options, rows,
};

#[cfg(test)]
mod tests {
    use super::*;

    mod nodes_without_binding {
        use super::*;

        #[test]
        fn should_parse_text_nodes() {
            pretty_assertions::assert_eq!(expect_from_html("a"), rows(&[&["Text", "a"]]));
        }

        #[test]
        fn should_parse_elements_with_attributes() {
            pretty_assertions::assert_eq!(
                expect_from_html("<div a=b></div>"),
                rows(&[&["Element", "div"], &["TextAttribute", "a", "b"]])
            );
        }

        #[test]
        fn should_parse_ng_content() {
            let parsed = parse_r3("<ng-content select=\"a\"></ng-content>");
            pretty_assertions::assert_eq!(
                expect_from_r3_nodes(&parsed.nodes),
                rows(&[&["Content", "1"], &["TextAttribute", "select", "a"]])
            );
            assert!(parsed.has_ng_content);
            pretty_assertions::assert_eq!(parsed.ng_content_selectors, vec!["a"]);
        }

        #[test]
        fn should_drop_comments() {
            pretty_assertions::assert_eq!(expect_from_html("<!-- x --><div></div>"), rows(&[&["Element", "div"]]));
        }

        #[test]
        fn should_keep_data_prefixed_plain_attributes() {
            pretty_assertions::assert_eq!(
                expect_from_html("<div data-id=\"x\"></div>"),
                rows(&[&["Element", "div"], &["TextAttribute", "data-id", "x"]])
            );
        }

        #[test]
        fn should_replace_ngsp_with_a_space() {
            pretty_assertions::assert_eq!(
                expect_from_html("<div>a&ngsp;b</div>"),
                rows(&[&["Element", "div"], &["Text", "a b"]])
            );
        }

        #[test]
        fn should_qualify_svg_names() {
            pretty_assertions::assert_eq!(
                expect_from_html("<svg><circle [attr.xlink:href]=\"u\"></circle></svg>"),
                rows(&[
                    &["Element", ":svg:svg"],
                    &["Element", ":svg:circle"],
                    &["BoundAttribute", "Attribute", ":xlink:href", "u"],
                ])
            );
        }
    }

    mod bound_text_nodes {
        use super::*;

        #[test]
        fn should_parse_bound_text_nodes() {
            pretty_assertions::assert_eq!(expect_from_html("{{a}}"), rows(&[&["BoundText", "{{ a }}"]]));
        }

        #[test]
        fn should_keep_the_whole_text_as_one_expression() {
            pretty_assertions::assert_eq!(
                expect_from_html("<div>a {{ b }} c</div>"),
                rows(&[&["Element", "div"], &["BoundText", "a {{ b }} c"]])
            );
        }

        #[test]
        fn should_use_configured_interpolation_markers() {
            let options = TransformOptions::from_json(r#"{"interpolation": {"start": "[[", "end": "]]"}}"#)
                .expect("valid options");
            pretty_assertions::assert_eq!(
                expect_from_html_with_options("<div>[[ a ]] {{b}}</div>", &options),
                rows(&[&["Element", "div"], &["BoundText", "{{ a }} {{b}}"]])
            );
        }
    }

    mod bound_attributes {
        use super::*;

        #[test]
        fn should_parse_mixed_case_bound_properties() {
            pretty_assertions::assert_eq!(
                expect_from_html("<div [someProp]=\"v\"></div>"),
                rows(&[&["Element", "div"], &["BoundAttribute", "Property", "someProp", "v"]])
            );
        }

        #[test]
        fn should_parse_bound_properties_via_bind_prefixes() {
            pretty_assertions::assert_eq!(
                expect_from_html("<div bind-prop=\"v\" data-bind-title=\"t\"></div>"),
                rows(&[
                    &["Element", "div"],
                    &["BoundAttribute", "Property", "prop", "v"],
                    &["BoundAttribute", "Property", "title", "t"],
                ])
            );
        }

        #[test]
        fn should_parse_bound_properties_via_interpolation() {
            pretty_assertions::assert_eq!(
                expect_from_html("<div title=\"a{{b}}\"></div>"),
                rows(&[&["Element", "div"], &["BoundAttribute", "Property", "title", "a{{ b }}"]])
            );
        }

        #[test]
        fn should_parse_attribute_class_and_style_bindings() {
            pretty_assertions::assert_eq!(
                expect_from_html("<div [attr.aria-label]=\"l\" [class.active]=\"a\" [style.width.px]=\"w\"></div>"),
                rows(&[
                    &["Element", "div"],
                    &["BoundAttribute", "Attribute", "aria-label", "l"],
                    &["BoundAttribute", "Class", "active", "a"],
                    &["BoundAttribute", "Style", "width", "w"],
                ])
            );
        }

        #[test]
        fn should_keep_the_style_unit() {
            let parsed = parse_r3("<div [style.width.px]=\"w\"></div>");
            let R3Node::Element(element) = &parsed.nodes[0] else {
                panic!("expected an element");
            };
            pretty_assertions::assert_eq!(element.inputs[0].unit.as_deref(), Some("px"));
        }

        #[test]
        fn should_map_properties_only_on_elements() {
            pretty_assertions::assert_eq!(
                expect_from_html("<label [for]=\"id\"></label>"),
                rows(&[&["Element", "label"], &["BoundAttribute", "Property", "htmlFor", "id"]])
            );
            pretty_assertions::assert_eq!(
                expect_from_html("<ng-template [for]=\"id\"></ng-template>"),
                rows(&[&["Template"], &["BoundAttribute", "Property", "for", "id"]])
            );
        }

        #[test]
        fn should_parse_two_way_bindings() {
            pretty_assertions::assert_eq!(
                expect_from_html("<input [(ngModel)]=\"name\">"),
                rows(&[
                    &["Element", "input"],
                    &["BoundAttribute", "Property", "ngModel", "name"],
                    &["BoundEvent", "TwoWay", "ngModelChange", "null", "name = $event"],
                ])
            );
            pretty_assertions::assert_eq!(
                expect_from_html("<input bindon-value=\"model.value\">"),
                rows(&[
                    &["Element", "input"],
                    &["BoundAttribute", "Property", "value", "model.value"],
                    &["BoundEvent", "TwoWay", "valueChange", "null", "model.value = $event"],
                ])
            );
        }

        #[test]
        fn should_parse_animation_bindings() {
            pretty_assertions::assert_eq!(
                expect_from_html("<div [@fade]=\"s\" @slide (@fade.done)=\"d()\"></div>"),
                rows(&[
                    &["Element", "div"],
                    &["BoundAttribute", "Animation", "fade", "s"],
                    &["BoundAttribute", "Animation", "slide", "undefined"],
                    &["BoundEvent", "Animation", "fade", "null", "d()"],
                ])
            );
        }

        #[test]
        fn should_report_attribute_bindings_on_ng_container() {
            pretty_assertions::assert_eq!(
                error_messages("<ng-container [attr.role]=\"r\"></ng-container>"),
                vec!["Attribute bindings are not supported on ng-container. Use property bindings instead."]
            );
        }
    }

    mod templates {
        use super::*;

        #[test]
        fn should_support_ng_template_with_variables() {
            pretty_assertions::assert_eq!(
                expect_from_html("<ng-template let-item let-i=\"index\"><span></span></ng-template>"),
                rows(&[
                    &["Template"],
                    &["Variable", "item", "$implicit"],
                    &["Variable", "i", "index"],
                    &["Element", "span"],
                ])
            );
        }

        #[test]
        fn should_support_references_on_templates() {
            pretty_assertions::assert_eq!(
                expect_from_html("<ng-template #tpl></ng-template>"),
                rows(&[&["Template"], &["Reference", "tpl", ""]])
            );
        }

        #[test]
        fn should_reject_let_outside_templates() {
            pretty_assertions::assert_eq!(
                error_messages("<div let-a=\"b\"></div>"),
                vec!["\"let-\" is only supported on ng-template elements."]
            );
        }

        #[test]
        fn should_reject_invalid_variable_names() {
            pretty_assertions::assert_eq!(
                error_messages("<ng-template let-a-b=\"c\"></ng-template>"),
                vec!["\"-\" is not allowed in variable names"]
            );
        }
    }

    mod inline_templates {
        use super::*;

        #[test]
        fn should_desugar_let_bindings() {
            pretty_assertions::assert_eq!(
                expect_from_html("<div *ngIf=\"let a=b\"></div>"),
                rows(&[
                    &["Template"],
                    &["TextAttribute", "ngIf", ""],
                    &["Variable", "a", "b"],
                    &["Element", "div"],
                ])
            );
        }

        #[test]
        fn should_desugar_a_plain_expression() {
            pretty_assertions::assert_eq!(
                expect_from_html("<div *ngIf=\"cond\"></div>"),
                rows(&[&["Template"], &["BoundAttribute", "Property", "ngIf", "cond"], &["Element", "div"]])
            );
        }

        #[test]
        fn should_desugar_ng_for() {
            pretty_assertions::assert_eq!(
                expect_from_html("<li *ngFor=\"let item of items; index as i\"></li>"),
                rows(&[
                    &["Template"],
                    &["TextAttribute", "ngFor", ""],
                    &["BoundAttribute", "Property", "ngForOf", "items"],
                    &["Variable", "item", "$implicit"],
                    &["Variable", "i", "index"],
                    &["Element", "li"],
                ])
            );
        }

        #[test]
        fn should_bind_as_variables_to_the_directive_key() {
            pretty_assertions::assert_eq!(
                expect_from_html("<div *ngIf=\"user$ | async as user\"></div>"),
                rows(&[
                    &["Template"],
                    &["BoundAttribute", "Property", "ngIf", "user$ | async"],
                    &["Variable", "user", "ngIf"],
                    &["Element", "div"],
                ])
            );
        }

        #[test]
        fn should_keep_bindings_of_the_host_element() {
            pretty_assertions::assert_eq!(
                expect_from_html("<div *ngIf=\"c\" [title]=\"t\" class=\"x\"></div>"),
                rows(&[
                    &["Template"],
                    &["BoundAttribute", "Property", "ngIf", "c"],
                    &["Element", "div"],
                    &["TextAttribute", "class", "x"],
                    &["BoundAttribute", "Property", "title", "t"],
                ])
            );
        }

        #[test]
        fn should_use_configured_key_prefixes() {
            let options = TransformOptions::from_json(r#"{"microsyntaxKeyPrefixes": {"appRepeat": "repeat"}}"#)
                .expect("valid options");
            pretty_assertions::assert_eq!(
                expect_from_html_with_options("<p *appRepeat=\"let x of xs\"></p>", &options),
                rows(&[
                    &["Template"],
                    &["TextAttribute", "appRepeat", ""],
                    &["BoundAttribute", "Property", "repeatOf", "xs"],
                    &["Variable", "x", "$implicit"],
                    &["Element", "p"],
                ])
            );
        }

        #[test]
        fn should_reject_multiple_template_bindings() {
            pretty_assertions::assert_eq!(
                error_messages("<div *ngIf=\"a\" *ngFor=\"let b of c\"></div>"),
                vec!["Can't have multiple template bindings on one element. Use only one attribute prefixed with *"]
            );
        }
    }

    mod events {
        use super::*;

        #[test]
        fn should_parse_bound_events_with_a_target() {
            pretty_assertions::assert_eq!(
                expect_from_html("<div (window:resize)=\"r()\"></div>"),
                rows(&[&["Element", "div"], &["BoundEvent", "Regular", "resize", "window", "r()"]])
            );
        }

        #[test]
        fn should_parse_bound_events_via_on_prefix() {
            pretty_assertions::assert_eq!(
                expect_from_html("<div on-click=\"c($event)\"></div>"),
                rows(&[&["Element", "div"], &["BoundEvent", "Regular", "click", "null", "c($event)"]])
            );
        }

        #[test]
        fn should_allow_assignments_and_chains() {
            pretty_assertions::assert_eq!(
                expect_from_html("<div (click)=\"a = 1; b()\"></div>"),
                rows(&[&["Element", "div"], &["BoundEvent", "Regular", "click", "null", "a = 1; b()"]])
            );
        }

        #[test]
        fn should_report_missing_event_names() {
            pretty_assertions::assert_eq!(error_messages("<div on-=\"a()\"></div>"), vec!["Event name is missing in binding"]);
        }

        #[test]
        fn should_report_non_assignable_two_way_targets() {
            pretty_assertions::assert_eq!(
                error_messages("<div [(x)]=\"a()\"></div>"),
                vec!["Unsupported expression in a two-way binding"]
            );
        }
    }

    mod references {
        use super::*;

        #[test]
        fn should_parse_references() {
            pretty_assertions::assert_eq!(
                expect_from_html("<div #a ref-b=\"c\"></div>"),
                rows(&[&["Element", "div"], &["Reference", "a", ""], &["Reference", "b", "c"]])
            );
        }

        #[test]
        fn should_reject_dashes_in_reference_names() {
            pretty_assertions::assert_eq!(
                error_messages("<div #a-b></div>"),
                vec!["\"-\" is not allowed in reference names"]
            );
        }

        #[test]
        fn should_reject_duplicate_references() {
            pretty_assertions::assert_eq!(
                error_messages("<div #a #a></div>"),
                vec!["Reference \"#a\" is defined more than once"]
            );
        }
    }

    mod ng_content {
        use super::*;

        const THREE_SLOTS: &str =
            "<ng-content select=\"a\"></ng-content><ng-content></ng-content><ng-content select=\"b\"></ng-content>";

        #[test]
        fn should_number_selectors_with_the_wildcard_at_zero() {
            let parsed = parse_r3(THREE_SLOTS);
            pretty_assertions::assert_eq!(
                expect_from_r3_nodes(&parsed.nodes),
                rows(&[
                    &["Content", "1"],
                    &["TextAttribute", "select", "a"],
                    &["Content", "0"],
                    &["Content", "2"],
                    &["TextAttribute", "select", "b"],
                ])
            );
            pretty_assertions::assert_eq!(parsed.ng_content_selectors, vec!["a", "b"]);
        }

        #[test]
        fn should_treat_star_and_blank_selectors_as_wildcard() {
            let parsed = parse_r3("<ng-content select=\"*\"></ng-content><ng-content select=\" \"></ng-content>");
            let indices: Vec<usize> = parsed
                .nodes
                .iter()
                .map(|node| match node {
                    R3Node::Content(content) => content.selector_index,
                    other => panic!("unexpected node {:?}", other),
                })
                .collect();
            pretty_assertions::assert_eq!(indices, vec![0, 0]);
            assert!(parsed.ng_content_selectors.is_empty());
            assert!(parsed.has_ng_content);
        }

        #[test]
        fn should_not_report_ng_content_when_absent() {
            assert!(!parse_r3("<div></div>").has_ng_content);
        }

        #[test]
        fn should_restart_numbering_per_sibling_list() {
            let html = "<div><ng-content select=\"a\"></ng-content></div>\
                        <ng-content select=\"b\"></ng-content><ng-content select=\"a\"></ng-content>";
            let parsed = parse_r3(html);
            pretty_assertions::assert_eq!(
                expect_from_r3_nodes(&parsed.nodes),
                rows(&[
                    &["Element", "div"],
                    &["Content", "1"],
                    &["TextAttribute", "select", "a"],
                    &["Content", "1"],
                    &["TextAttribute", "select", "b"],
                    &["Content", "2"],
                    &["TextAttribute", "select", "a"],
                ])
            );
            pretty_assertions::assert_eq!(parsed.ng_content_selectors, vec!["a", "b"]);
        }

        #[test]
        fn should_number_across_the_template_when_configured() {
            let html = "<div><ng-content select=\"a\"></ng-content></div>\
                        <ng-content select=\"b\"></ng-content><ng-content select=\"a\"></ng-content>";
            let options = TransformOptions {
                projection_scope: ProjectionScope::Template,
                ..TransformOptions::default()
            };
            pretty_assertions::assert_eq!(
                expect_from_html_with_options(html, &options),
                rows(&[
                    &["Element", "div"],
                    &["Content", "1"],
                    &["TextAttribute", "select", "a"],
                    &["Content", "2"],
                    &["TextAttribute", "select", "b"],
                    &["Content", "1"],
                    &["TextAttribute", "select", "a"],
                ])
            );
        }

        #[test]
        fn should_wrap_ng_content_in_inline_templates() {
            pretty_assertions::assert_eq!(
                expect_from_html("<ng-content *ngIf=\"c\" select=\"a\"></ng-content>"),
                rows(&[
                    &["Template"],
                    &["BoundAttribute", "Property", "ngIf", "c"],
                    &["Content", "1"],
                    &["TextAttribute", "select", "a"],
                ])
            );
        }
    }

    mod elided_elements {
        use super::*;

        #[test]
        fn should_drop_script_and_style_elements() {
            let parsed = parse_r3("<script>var a;</script><div></div><style>.a{}</style>");
            pretty_assertions::assert_eq!(expect_from_r3_nodes(&parsed.nodes), rows(&[&["Element", "div"]]));
            pretty_assertions::assert_eq!(parsed.styles, vec![".a{}"]);
        }

        #[test]
        fn should_drop_nested_script_and_style_elements() {
            let parsed = parse_r3("<div><p><script>x</script><style>y</style>t</p></div>");
            pretty_assertions::assert_eq!(
                expect_from_r3_nodes(&parsed.nodes),
                rows(&[&["Element", "div"], &["Element", "p"], &["Text", "t"]])
            );
            pretty_assertions::assert_eq!(parsed.styles, vec!["y"]);
        }

        #[test]
        fn should_drop_resolvable_stylesheet_links() {
            let parsed = parse_r3("<link rel=\"stylesheet\" href=\"a.css\"><link rel=\"STYLESHEET\" href=\"package:b.css\">");
            assert!(parsed.nodes.is_empty());
            pretty_assertions::assert_eq!(parsed.style_urls, vec!["a.css", "package:b.css"]);
        }

        #[test]
        fn should_keep_absolute_stylesheet_links() {
            let parsed = parse_r3("<link rel=\"stylesheet\" href=\"http://a/b.css\">");
            pretty_assertions::assert_eq!(
                expect_from_r3_nodes(&parsed.nodes),
                rows(&[
                    &["Element", "link"],
                    &["TextAttribute", "rel", "stylesheet"],
                    &["TextAttribute", "href", "http://a/b.css"],
                ])
            );
            assert!(parsed.style_urls.is_empty());
        }
    }

    mod non_bindable {
        use super::*;

        #[test]
        fn should_keep_content_as_written() {
            pretty_assertions::assert_eq!(
                expect_from_html("<div ngNonBindable>{{x}}<span [a]=\"b\"></span><!-- c --></div>"),
                rows(&[
                    &["Element", "div"],
                    &["TextAttribute", "ngNonBindable", ""],
                    &["Text", "{{x}}"],
                    &["Element", "span"],
                    &["TextAttribute", "[a]", "b"],
                ])
            );
        }

        #[test]
        fn should_still_drop_scripts() {
            pretty_assertions::assert_eq!(
                expect_from_html("<div ngNonBindable><script>x</script>a</div>"),
                rows(&[&["Element", "div"], &["TextAttribute", "ngNonBindable", ""], &["Text", "a"]])
            );
        }

        #[test]
        fn should_bind_the_element_itself() {
            pretty_assertions::assert_eq!(
                expect_from_html("<div ngNonBindable [a]=\"b\">{{c}}</div>"),
                rows(&[
                    &["Element", "div"],
                    &["TextAttribute", "ngNonBindable", ""],
                    &["BoundAttribute", "Property", "a", "b"],
                    &["Text", "{{c}}"],
                ])
            );
        }
    }

    mod whitespaces {
        use super::*;

        #[test]
        fn should_preserve_whitespace_by_default() {
            pretty_assertions::assert_eq!(
                expect_from_html("<div> <span></span> </div>"),
                rows(&[&["Element", "div"], &["Text", " "], &["Element", "span"], &["Text", " "]])
            );
        }

        #[test]
        fn should_remove_whitespace_when_configured() {
            let options = TransformOptions {
                preserve_whitespaces: false,
                ..TransformOptions::default()
            };
            pretty_assertions::assert_eq!(
                expect_from_html_with_options("<div>  <span></span>  </div>", &options),
                rows(&[&["Element", "div"], &["Element", "span"]])
            );
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn should_report_empty_bindings() {
            for html in ["<div (event)=\"\"></div>", "<div (event)=\"   \"></div>"] {
                let errors = parse_r3_errors(html);
                pretty_assertions::assert_eq!(errors.len(), 1, "{}", html);
                assert!(matches!(
                    &errors.0[0],
                    TemplateError::EmptyExpression { binding, .. } if binding == "(event)"
                ));
            }
        }

        #[test]
        fn should_report_empty_two_way_bindings_once() {
            let errors = parse_r3_errors("<div [(x)]=\"\"></div>");
            pretty_assertions::assert_eq!(errors.len(), 1);
            assert!(matches!(&errors.0[0], TemplateError::EmptyExpression { .. }));
        }

        #[test]
        fn should_report_missing_property_names() {
            pretty_assertions::assert_eq!(error_messages("<div bind-=\"a\"></div>"), vec!["Property name is missing in binding"]);
        }

        #[test]
        fn should_report_prefixes_without_names() {
            pretty_assertions::assert_eq!(
                error_messages("<div [class.]=\"a\" [attr.]=\"b\" [style.]=\"c\"></div>"),
                vec![
                    "Class binding name is missing in \"class.\"",
                    "Attribute binding name is missing in \"attr.\"",
                    "Style binding name is missing in \"style.\"",
                ]
            );
        }

        #[test]
        fn should_report_events_without_names() {
            pretty_assertions::assert_eq!(
                error_messages("<div (:)=\"a()\" (window:)=\"b()\"></div>"),
                vec!["Event name is missing in \":\"", "Event name is missing in \"window:\""]
            );
        }

        #[test]
        fn should_report_expression_syntax_errors() {
            let errors = parse_r3_errors("<div [a]=\"a b\"></div>");
            pretty_assertions::assert_eq!(errors.len(), 1);
            assert!(matches!(&errors.0[0], TemplateError::ExpressionSyntax { .. }));
            assert!(errors.0[0].to_string().contains("Unexpected token 'b'"));
        }

        #[test]
        fn should_fail_on_markup_errors_before_binding() {
            let errors = parse_r3_errors("<div [a]=\"\"></span>");
            assert!(errors.iter().all(|error| matches!(error, TemplateError::MarkupSyntax { .. })));
            assert!(errors.0[0].to_string().starts_with("Unexpected closing tag \"span\""));
        }

        #[test]
        fn should_collect_errors_across_the_template() {
            let errors = parse_r3_errors("<div (a)=\"\"></div><p #x-y></p>");
            pretty_assertions::assert_eq!(errors.len(), 2);
        }
    }

    mod output {
        use super::*;

        #[test]
        fn should_be_deterministic() {
            let html = "<div *ngFor=\"let a of b\" [x]=\"y\" (z)=\"w()\">{{a}}<ng-content select=\"q\"></ng-content></div>";
            let first = parse_r3(html);
            let second = parse_r3(html);
            pretty_assertions::assert_eq!(first.nodes, second.nodes);
            pretty_assertions::assert_eq!(
                serde_json::to_string(&first).expect("serializable"),
                serde_json::to_string(&second).expect("serializable")
            );
        }

        #[test]
        fn should_serialize_without_mutating_the_tree() {
            let parsed = parse_r3_with_options("<p [a]=\"b\">{{c}}</p>", &TransformOptions::default());
            let before = expect_from_r3_nodes(&parsed.nodes);
            let json = serde_json::to_value(&parsed.nodes).expect("serializable");
            pretty_assertions::assert_eq!(json[0]["kind"], "Element");
            pretty_assertions::assert_eq!(json[0]["name"], "p");
            pretty_assertions::assert_eq!(expect_from_r3_nodes(&parsed.nodes), before);
            pretty_assertions::assert_eq!(serde_json::to_value(&parsed.nodes).expect("serializable"), json);
        }
    }
}
