//! Binding attribute syntax.
//!
//! Recognizes the binding forms of an attribute name: keyword prefixes
//! (`bind-`, `let-`, `ref-`, `on-`, `bindon-`), the `#` and `@` shorthands,
//! and the `[( )]`, `[ ]`, `( )` delimiters. Keyword prefixes win over
//! delimiters. Names are classified after the `data-` prefix is removed.

use lazy_static::lazy_static;
use regex::Regex;

const DATA_PREFIX: &str = "data-";
pub const TEMPLATE_ATTR_PREFIX: char = '*';

lazy_static! {
    static ref BIND_NAME_REGEXP: Regex =
        Regex::new(r"^(?:(bind-)|(let-)|(ref-|#)|(on-)|(bindon-)|(@))(.*)$").unwrap();
}

const KW_BIND_IDX: usize = 1;
const KW_LET_IDX: usize = 2;
const KW_REF_IDX: usize = 3;
const KW_ON_IDX: usize = 4;
const KW_BINDON_IDX: usize = 5;
const KW_AT_IDX: usize = 6;
const IDENT_KW_IDX: usize = 7;

struct Delimiters {
    start: &'static str,
    end: &'static str,
}

const BANANA_BOX: Delimiters = Delimiters { start: "[(", end: ")]" };
const PROPERTY: Delimiters = Delimiters { start: "[", end: "]" };
const EVENT: Delimiters = Delimiters { start: "(", end: ")" };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// `bind-x`, `[x]`
    Property,
    /// `on-x`, `(x)`
    Event,
    /// `bindon-x`, `[(x)]`
    TwoWay,
    /// `let-x`
    Variable,
    /// `ref-x`, `#x`
    Reference,
    /// `@x`
    Animation,
    /// `*x`
    Template,
    /// Anything else; may still interpolate.
    Plain,
}

/// The binding form of one attribute name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedAttribute<'a> {
    pub kind: AttributeKind,
    /// The name with `data-`, the binding prefix and delimiters removed.
    pub identifier: &'a str,
    /// Byte offset of `identifier` inside the raw attribute name.
    pub identifier_offset: usize,
}

/// Strips the `data-` prefix, so `data-bind-x` binds like `bind-x`.
pub fn normalize_attribute_name(attr_name: &str) -> &str {
    match attr_name.get(..DATA_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(DATA_PREFIX) => &attr_name[DATA_PREFIX.len()..],
        _ => attr_name,
    }
}

pub fn classify_attribute(attr_name: &str) -> ClassifiedAttribute<'_> {
    let name = normalize_attribute_name(attr_name);
    let normalization_offset = attr_name.len() - name.len();
    let classified = |kind, identifier, prefix_len: usize| ClassifiedAttribute {
        kind,
        identifier,
        identifier_offset: normalization_offset + prefix_len,
    };

    if let Some(identifier) = name.strip_prefix(TEMPLATE_ATTR_PREFIX) {
        return classified(AttributeKind::Template, identifier, 1);
    }

    if let Some(captures) = BIND_NAME_REGEXP.captures(name) {
        let identifier = captures.get(IDENT_KW_IDX).map_or("", |m| m.as_str());
        let prefix_len = name.len() - identifier.len();
        let kind = if captures.get(KW_BIND_IDX).is_some() {
            AttributeKind::Property
        } else if captures.get(KW_LET_IDX).is_some() {
            AttributeKind::Variable
        } else if captures.get(KW_REF_IDX).is_some() {
            AttributeKind::Reference
        } else if captures.get(KW_ON_IDX).is_some() {
            AttributeKind::Event
        } else if captures.get(KW_BINDON_IDX).is_some() {
            AttributeKind::TwoWay
        } else {
            debug_assert!(captures.get(KW_AT_IDX).is_some());
            AttributeKind::Animation
        };
        return classified(kind, identifier, prefix_len);
    }

    for (delimiters, kind) in [
        (&BANANA_BOX, AttributeKind::TwoWay),
        (&PROPERTY, AttributeKind::Property),
        (&EVENT, AttributeKind::Event),
    ] {
        if let Some(identifier) = strip_delimiters(name, delimiters) {
            return classified(kind, identifier, delimiters.start.len());
        }
    }

    classified(AttributeKind::Plain, name, 0)
}

fn strip_delimiters<'a>(name: &'a str, delimiters: &Delimiters) -> Option<&'a str> {
    if name.len() > delimiters.start.len() + delimiters.end.len() {
        name.strip_prefix(delimiters.start)?.strip_suffix(delimiters.end)
    } else {
        None
    }
}
