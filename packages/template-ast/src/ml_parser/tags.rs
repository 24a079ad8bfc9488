//! ML Parser Tags
//!
//! Corresponds to packages/compiler/src/ml_parser/tags.ts
//! Namespace-qualified element names are written `:namespace:name`.

/// How the markup lexer treats the content of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagContentType {
    RawText,
    EscapableRawText,
    ParsableData,
}

/// Splits `:ns:name` into `(Some("ns"), "name")`; plain names yield `(None, name)`.
///
/// A leading `:` without a second `:` is returned unsplit.
pub fn split_ns_name(element_name: &str) -> (Option<&str>, &str) {
    if !element_name.starts_with(':') {
        return (None, element_name);
    }
    match element_name[1..].find(':') {
        Some(idx) => (Some(&element_name[1..=idx]), &element_name[idx + 2..]),
        None => (None, element_name),
    }
}

/// `<ng-container>` in any namespace.
pub fn is_ng_container(tag_name: &str) -> bool {
    split_ns_name(tag_name).1 == "ng-container"
}

/// `<ng-content>` in any namespace.
pub fn is_ng_content(tag_name: &str) -> bool {
    split_ns_name(tag_name).1 == "ng-content"
}

/// `<ng-template>` in any namespace.
pub fn is_ng_template(tag_name: &str) -> bool {
    split_ns_name(tag_name).1 == "ng-template"
}

pub fn get_ns_prefix(full_name: &str) -> Option<&str> {
    split_ns_name(full_name).0
}

pub fn merge_ns_and_name(prefix: Option<&str>, local_name: &str) -> String {
    match prefix {
        Some(p) if !p.is_empty() => format!(":{}:{}", p, local_name),
        _ => local_name.to_string(),
    }
}
