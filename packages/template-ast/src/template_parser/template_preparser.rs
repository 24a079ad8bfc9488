//! Template Preparser
//!
//! Corresponds to packages/compiler/src/template_parser/template_preparser.ts
//! Pre-parses elements to identify the ones the transform treats specially
//! (ng-content, style, script, stylesheet links, non-bindable regions).

use crate::ml_parser::ast::Element;
use crate::ml_parser::tags::is_ng_content;
use crate::style_url_resolver::is_style_url_resolvable;

pub const NG_CONTENT_SELECT_ATTR: &str = "select";
pub const NG_NON_BINDABLE_ATTR: &str = "ngNonBindable";
pub const WILDCARD_SELECTOR: &str = "*";

const LINK_ELEMENT: &str = "link";
const LINK_STYLE_REL_ATTR: &str = "rel";
const LINK_STYLE_HREF_ATTR: &str = "href";
const LINK_STYLE_REL_VALUE: &str = "stylesheet";
const STYLE_ELEMENT: &str = "style";
const SCRIPT_ELEMENT: &str = "script";

/// Type of preparsed element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreparsedElementType {
    NgContent,
    Style,
    Stylesheet,
    Script,
    Other,
}

/// Pre-parsed element information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparsedElement {
    pub element_type: PreparsedElementType,
    /// `*` when the `select` attribute is absent or empty.
    pub select_attr: String,
    pub href_attr: Option<String>,
    pub non_bindable: bool,
}

impl PreparsedElement {
    /// Script and style elements, and stylesheet links the build can inline,
    /// produce no output at all.
    pub fn is_elided(&self) -> bool {
        match self.element_type {
            PreparsedElementType::Script | PreparsedElementType::Style => true,
            PreparsedElementType::Stylesheet => is_style_url_resolvable(self.href_attr.as_deref()),
            PreparsedElementType::NgContent | PreparsedElementType::Other => false,
        }
    }
}

/// Pre-parse an element to identify its type and extract special attributes
pub fn preparse_element(ast: &Element) -> PreparsedElement {
    let mut select_attr: Option<&str> = None;
    let mut href_attr: Option<&str> = None;
    let mut rel_attr: Option<&str> = None;
    let mut non_bindable = false;

    for attr in &ast.attrs {
        let lc_attr_name = attr.name.to_lowercase();

        if lc_attr_name == NG_CONTENT_SELECT_ATTR {
            select_attr = Some(&attr.value);
        } else if lc_attr_name == LINK_STYLE_HREF_ATTR {
            href_attr = Some(&attr.value);
        } else if lc_attr_name == LINK_STYLE_REL_ATTR {
            rel_attr = Some(&attr.value);
        } else if attr.name == NG_NON_BINDABLE_ATTR {
            non_bindable = true;
        }
    }

    let node_name = ast.name.to_lowercase();
    let is_stylesheet_rel = rel_attr
        .map(|rel| rel.eq_ignore_ascii_case(LINK_STYLE_REL_VALUE))
        .unwrap_or(false);

    let element_type = if is_ng_content(&node_name) {
        PreparsedElementType::NgContent
    } else if node_name == STYLE_ELEMENT {
        PreparsedElementType::Style
    } else if node_name == SCRIPT_ELEMENT {
        PreparsedElementType::Script
    } else if node_name == LINK_ELEMENT && is_stylesheet_rel {
        PreparsedElementType::Stylesheet
    } else {
        PreparsedElementType::Other
    };

    PreparsedElement {
        element_type,
        select_attr: normalize_ng_content_select(select_attr),
        href_attr: href_attr.map(str::to_string),
        non_bindable,
    }
}

fn normalize_ng_content_select(select_attr: Option<&str>) -> String {
    match select_attr {
        Some(select) if !select.is_empty() => select.to_string(),
        _ => WILDCARD_SELECTOR.to_string(),
    }
}
