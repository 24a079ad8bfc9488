//! HTML Tag Definitions
//!
//! Corresponds to packages/compiler/src/ml_parser/html_tags.ts

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use super::tags::TagContentType;

/// Parsing rules for one HTML tag.
#[derive(Debug, Clone)]
pub struct HtmlTagDefinition {
    closed_by_children: HashSet<&'static str>,
    content_type: TagContentType,
    /// Content type used when the tag lives in the `svg` namespace.
    svg_content_type: Option<TagContentType>,
    pub closed_by_parent: bool,
    pub implicit_namespace_prefix: Option<&'static str>,
    pub is_void: bool,
    pub ignore_first_lf: bool,
    pub prevent_namespace_inheritance: bool,
}

impl HtmlTagDefinition {
    fn new() -> Self {
        HtmlTagDefinition {
            closed_by_children: HashSet::new(),
            content_type: TagContentType::ParsableData,
            svg_content_type: None,
            closed_by_parent: false,
            implicit_namespace_prefix: None,
            is_void: false,
            ignore_first_lf: false,
            prevent_namespace_inheritance: false,
        }
    }

    fn void() -> Self {
        HtmlTagDefinition {
            is_void: true,
            closed_by_parent: true,
            ..Self::new()
        }
    }

    fn closed_by(mut self, children: &[&'static str]) -> Self {
        self.closed_by_children.extend(children.iter().copied());
        self
    }

    fn closed_by_parent(mut self) -> Self {
        self.closed_by_parent = true;
        self
    }

    fn namespace(mut self, prefix: &'static str) -> Self {
        self.implicit_namespace_prefix = Some(prefix);
        self
    }

    fn content(mut self, content_type: TagContentType) -> Self {
        self.content_type = content_type;
        self
    }

    fn ignore_first_lf(mut self) -> Self {
        self.ignore_first_lf = true;
        self
    }

    pub fn is_closed_by_child(&self, name: &str) -> bool {
        self.is_void || self.closed_by_children.contains(name.to_lowercase().as_str())
    }

    pub fn get_content_type(&self, prefix: Option<&str>) -> TagContentType {
        match (prefix, self.svg_content_type) {
            (Some("svg"), Some(content_type)) => content_type,
            _ => self.content_type,
        }
    }
}

static TAG_DEFINITIONS: Lazy<HashMap<&'static str, HtmlTagDefinition>> = Lazy::new(|| {
    let mut defs = HashMap::new();

    for void in [
        "base", "meta", "area", "embed", "link", "img", "input", "param", "hr", "br", "source",
        "track", "wbr", "col",
    ] {
        defs.insert(void, HtmlTagDefinition::void());
    }

    defs.insert(
        "p",
        HtmlTagDefinition::new()
            .closed_by(&[
                "address", "article", "aside", "blockquote", "div", "dl", "fieldset", "footer",
                "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hgroup", "hr", "main",
                "nav", "ol", "p", "pre", "section", "table", "ul",
            ])
            .closed_by_parent(),
    );

    defs.insert("thead", HtmlTagDefinition::new().closed_by(&["tbody", "tfoot"]));
    defs.insert(
        "tbody",
        HtmlTagDefinition::new().closed_by(&["tbody", "tfoot"]).closed_by_parent(),
    );
    defs.insert("tfoot", HtmlTagDefinition::new().closed_by(&["tbody"]).closed_by_parent());
    defs.insert("tr", HtmlTagDefinition::new().closed_by(&["tr"]).closed_by_parent());
    defs.insert("td", HtmlTagDefinition::new().closed_by(&["td", "th"]).closed_by_parent());
    defs.insert("th", HtmlTagDefinition::new().closed_by(&["td", "th"]).closed_by_parent());

    defs.insert("svg", HtmlTagDefinition::new().namespace("svg"));
    defs.insert("math", HtmlTagDefinition::new().namespace("math"));
    let mut foreign_object = HtmlTagDefinition::new().namespace("svg");
    foreign_object.prevent_namespace_inheritance = true;
    defs.insert("foreignObject", foreign_object);

    defs.insert("li", HtmlTagDefinition::new().closed_by(&["li"]).closed_by_parent());
    defs.insert("dt", HtmlTagDefinition::new().closed_by(&["dt", "dd"]));
    defs.insert("dd", HtmlTagDefinition::new().closed_by(&["dt", "dd"]).closed_by_parent());
    for ruby in ["rb", "rt", "rp"] {
        defs.insert(
            ruby,
            HtmlTagDefinition::new().closed_by(&["rb", "rt", "rtc", "rp"]).closed_by_parent(),
        );
    }
    defs.insert("rtc", HtmlTagDefinition::new().closed_by(&["rb", "rtc", "rp"]).closed_by_parent());
    defs.insert("optgroup", HtmlTagDefinition::new().closed_by(&["optgroup"]).closed_by_parent());
    defs.insert(
        "option",
        HtmlTagDefinition::new().closed_by(&["option", "optgroup"]).closed_by_parent(),
    );

    defs.insert("pre", HtmlTagDefinition::new().ignore_first_lf());
    defs.insert("listing", HtmlTagDefinition::new().ignore_first_lf());

    defs.insert("style", HtmlTagDefinition::new().content(TagContentType::RawText));
    defs.insert("script", HtmlTagDefinition::new().content(TagContentType::RawText));
    let mut title = HtmlTagDefinition::new().content(TagContentType::EscapableRawText);
    title.svg_content_type = Some(TagContentType::ParsableData);
    defs.insert("title", title);
    defs.insert(
        "textarea",
        HtmlTagDefinition::new()
            .content(TagContentType::EscapableRawText)
            .ignore_first_lf(),
    );

    defs
});

static DEFAULT_TAG_DEFINITION: Lazy<HtmlTagDefinition> = Lazy::new(HtmlTagDefinition::new);

pub fn get_html_tag_definition(tag_name: &str) -> &'static HtmlTagDefinition {
    // Case-sensitive first: some SVG tags (foreignObject) are case sensitive.
    TAG_DEFINITIONS
        .get(tag_name)
        .or_else(|| TAG_DEFINITIONS.get(tag_name.to_lowercase().as_str()))
        .unwrap_or(&DEFAULT_TAG_DEFINITION)
}
