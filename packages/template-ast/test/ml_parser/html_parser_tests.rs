//! HTML Parser Tests
//!
//! Mirrors angular/packages/compiler/test/ml_parser/html_parser_spec.ts

#[path = "util/mod.rs"]
mod utils;

#[cfg(test)]
mod tests {
    use super::utils::{humanize_dom, humanize_errors, parse, rows};
    use angular_template_ast::ml_parser::ast::Node;

    mod text_nodes {
        use super::*;

        #[test]
        fn should_parse_root_level_text_nodes() {
            pretty_assertions::assert_eq!(humanize_dom(&parse("a")), rows(&[&["Text", "a", "0"]]));
        }

        #[test]
        fn should_parse_text_nodes_inside_regular_elements() {
            pretty_assertions::assert_eq!(
                humanize_dom(&parse("<div>a</div>")),
                rows(&[&["Element", "div", "0"], &["Text", "a", "1"]])
            );
        }

        #[test]
        fn should_decode_entities() {
            pretty_assertions::assert_eq!(humanize_dom(&parse("&amp;&lt;&#65;&#x42;")), rows(&[&["Text", "&<AB", "0"]]));
        }

        #[test]
        fn should_keep_raw_text_in_script_elements() {
            pretty_assertions::assert_eq!(
                humanize_dom(&parse("<script><a>&amp;</script>")),
                rows(&[&["Element", "script", "0"], &["Text", "<a>&amp;", "1"]])
            );
        }

        #[test]
        fn should_parse_cdata_as_text() {
            pretty_assertions::assert_eq!(humanize_dom(&parse("<![CDATA[a<b]]>")), rows(&[&["Text", "a<b", "0"]]));
        }
    }

    mod elements {
        use super::*;

        #[test]
        fn should_parse_nested_elements() {
            pretty_assertions::assert_eq!(
                humanize_dom(&parse("<div><span></span></div>")),
                rows(&[&["Element", "div", "0"], &["Element", "span", "1"]])
            );
        }

        #[test]
        fn should_parse_void_elements() {
            pretty_assertions::assert_eq!(
                humanize_dom(&parse("<input><div></div>")),
                rows(&[&["Element", "input", "0"], &["Element", "div", "0"]])
            );
        }

        #[test]
        fn should_allow_self_closing_custom_elements() {
            let result = parse("<my-cmp/><br/>");
            pretty_assertions::assert_eq!(
                humanize_dom(&result),
                rows(&[&["Element", "my-cmp", "0"], &["Element", "br", "0"]])
            );
            let Node::Element(element) = &result.root_nodes[0] else {
                panic!("expected an element");
            };
            assert!(element.is_self_closing);
        }

        #[test]
        fn should_close_p_elements_implicitly() {
            pretty_assertions::assert_eq!(
                humanize_dom(&parse("<p>a<p>b")),
                rows(&[
                    &["Element", "p", "0"],
                    &["Text", "a", "1"],
                    &["Element", "p", "0"],
                    &["Text", "b", "1"],
                ])
            );
        }

        #[test]
        fn should_add_namespaces_to_svg_elements() {
            pretty_assertions::assert_eq!(
                humanize_dom(&parse("<svg><circle></circle></svg>")),
                rows(&[&["Element", ":svg:svg", "0"], &["Element", ":svg:circle", "1"]])
            );
        }

        #[test]
        fn should_record_end_spans() {
            let result = parse("<div></div><input>");
            let Node::Element(div) = &result.root_nodes[0] else {
                panic!("expected an element");
            };
            pretty_assertions::assert_eq!(div.source_span.text(), "<div></div>");
            pretty_assertions::assert_eq!(div.end_source_span.as_ref().map(|s| s.text()), Some("</div>"));
            let Node::Element(input) = &result.root_nodes[1] else {
                panic!("expected an element");
            };
            assert!(input.is_void);
        }
    }

    mod attributes {
        use super::*;

        #[test]
        fn should_parse_attributes_with_and_without_values() {
            pretty_assertions::assert_eq!(
                humanize_dom(&parse("<div a=\"b\" c d='e'></div>")),
                rows(&[
                    &["Element", "div", "0"],
                    &["Attribute", "a", "b"],
                    &["Attribute", "c", ""],
                    &["Attribute", "d", "e"],
                ])
            );
        }

        #[test]
        fn should_keep_binding_syntax_in_names() {
            pretty_assertions::assert_eq!(
                humanize_dom(&parse("<div [a]=\"b\" (c)=\"d()\" *ngIf=\"e\" #f></div>")),
                rows(&[
                    &["Element", "div", "0"],
                    &["Attribute", "[a]", "b"],
                    &["Attribute", "(c)", "d()"],
                    &["Attribute", "*ngIf", "e"],
                    &["Attribute", "#f", ""],
                ])
            );
        }

        #[test]
        fn should_decode_entities_in_values() {
            pretty_assertions::assert_eq!(
                humanize_dom(&parse("<div a=\"&amp;b\"></div>")),
                rows(&[&["Element", "div", "0"], &["Attribute", "a", "&b"]])
            );
        }

        #[test]
        fn should_record_key_and_value_spans() {
            let result = parse("<div title=\"hello\"></div>");
            let Node::Element(div) = &result.root_nodes[0] else {
                panic!("expected an element");
            };
            let attr = &div.attrs[0];
            pretty_assertions::assert_eq!(attr.key_span.text(), "title");
            pretty_assertions::assert_eq!(attr.value_span.as_ref().map(|s| s.text()), Some("hello"));
            pretty_assertions::assert_eq!(attr.source_span.text(), "title=\"hello\"");
        }
    }

    mod comments {
        use super::*;

        #[test]
        fn should_trim_comment_values() {
            pretty_assertions::assert_eq!(
                humanize_dom(&parse("<!-- a --><div></div>")),
                rows(&[&["Comment", "a", "0"], &["Element", "div", "0"]])
            );
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn should_report_unexpected_closing_tags() {
            let result = parse("<div></span>");
            pretty_assertions::assert_eq!(result.errors.len(), 1);
            assert!(result.errors[0].msg.starts_with("Unexpected closing tag \"span\""));
            pretty_assertions::assert_eq!(humanize_errors(&result.errors)[0][1], "0:5");
        }

        #[test]
        fn should_report_closing_tags_of_void_elements() {
            let result = parse("<input></input>");
            pretty_assertions::assert_eq!(
                humanize_errors(&result.errors),
                rows(&[&["Void elements do not have end tags \"input\"", "0:7"]])
            );
        }

        #[test]
        fn should_report_self_closing_html_elements() {
            let result = parse("<div/>");
            pretty_assertions::assert_eq!(
                humanize_errors(&result.errors),
                rows(&[&["Only void, custom and foreign elements can be self closed \"div\"", "0:0"]])
            );
        }

        #[test]
        fn should_report_positions_on_later_lines() {
            let result = parse("<div>\n  </p>\n</div>");
            pretty_assertions::assert_eq!(humanize_errors(&result.errors)[0][1], "1:2");
        }
    }
}
