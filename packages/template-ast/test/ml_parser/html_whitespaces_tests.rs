//! HTML Whitespaces Tests
//!
//! Mirrors angular/packages/compiler/test/ml_parser/html_whitespaces_spec.ts

#[path = "util/mod.rs"]
mod utils;

#[cfg(test)]
mod tests {
    use super::utils::{humanize_nodes, parse, rows};
    use angular_template_ast::ml_parser::html_whitespaces::remove_whitespaces;

    fn parse_and_remove_ws(template: &str) -> Vec<Vec<String>> {
        let result = parse(template);
        assert!(result.errors.is_empty(), "unexpected errors for {:?}", template);
        humanize_nodes(&remove_whitespaces(result.root_nodes))
    }

    #[test]
    fn should_remove_blank_text_nodes() {
        assert!(parse_and_remove_ws(" ").is_empty());
        assert!(parse_and_remove_ws("\n").is_empty());
        assert!(parse_and_remove_ws("\t").is_empty());
        assert!(parse_and_remove_ws("    \t    \n ").is_empty());
    }

    #[test]
    fn should_remove_whitespaces_between_elements() {
        pretty_assertions::assert_eq!(
            parse_and_remove_ws("<br>  <br>\t<br>\n<br>"),
            rows(&[
                &["Element", "br", "0"],
                &["Element", "br", "0"],
                &["Element", "br", "0"],
                &["Element", "br", "0"],
            ])
        );
    }

    #[test]
    fn should_remove_whitespaces_from_child_text_nodes() {
        pretty_assertions::assert_eq!(
            parse_and_remove_ws("<div><span> </span></div>"),
            rows(&[&["Element", "div", "0"], &["Element", "span", "1"]])
        );
    }

    #[test]
    fn should_replace_consecutive_whitespaces_with_one_space() {
        pretty_assertions::assert_eq!(
            parse_and_remove_ws("<div>foo  \n\t  bar</div>"),
            rows(&[&["Element", "div", "0"], &["Text", "foo bar", "1"]])
        );
    }

    #[test]
    fn should_replace_ngsp_with_a_space() {
        pretty_assertions::assert_eq!(parse_and_remove_ws("&ngsp;foo"), rows(&[&["Text", " foo", "0"]]));
    }

    #[test]
    fn should_not_touch_pre_textarea_and_script_content() {
        pretty_assertions::assert_eq!(
            parse_and_remove_ws("<pre> a   b </pre>"),
            rows(&[&["Element", "pre", "0"], &["Text", " a   b ", "1"]])
        );
        pretty_assertions::assert_eq!(
            parse_and_remove_ws("<textarea>  </textarea>"),
            rows(&[&["Element", "textarea", "0"], &["Text", "  ", "1"]])
        );
        pretty_assertions::assert_eq!(
            parse_and_remove_ws("<script>  x  </script>"),
            rows(&[&["Element", "script", "0"], &["Text", "  x  ", "1"]])
        );
    }

    #[test]
    fn should_honor_ng_preserve_whitespaces_and_drop_the_marker() {
        pretty_assertions::assert_eq!(
            parse_and_remove_ws("<div ngPreserveWhitespaces><span> </span>  </div>"),
            rows(&[
                &["Element", "div", "0"],
                &["Element", "span", "1"],
                &["Text", " ", "2"],
                &["Text", "  ", "1"],
            ])
        );
    }

    #[test]
    fn should_keep_comments() {
        pretty_assertions::assert_eq!(
            parse_and_remove_ws("<!-- a -->  <div></div>"),
            rows(&[&["Comment", "a", "0"], &["Element", "div", "0"]])
        );
    }
}
