//! Named character references
//!
//! Corresponds to packages/compiler/src/ml_parser/entities.ts
//! Only the references that show up in real templates are listed; anything
//! else must use the numeric `&#<decimal>;` / `&#x<hex>;` forms.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Private-use code point the `&ngsp;` pseudo entity decodes to.
pub const NGSP_UNICODE: char = '\u{E500}';

pub static NAMED_ENTITIES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("AElig", "\u{00C6}"),
        ("Aacute", "\u{00C1}"),
        ("Agrave", "\u{00C0}"),
        ("Auml", "\u{00C4}"),
        ("Ccedil", "\u{00C7}"),
        ("Eacute", "\u{00C9}"),
        ("Ntilde", "\u{00D1}"),
        ("Ouml", "\u{00D6}"),
        ("Uuml", "\u{00DC}"),
        ("aacute", "\u{00E1}"),
        ("acute", "\u{00B4}"),
        ("aelig", "\u{00E6}"),
        ("agrave", "\u{00E0}"),
        ("amp", "&"),
        ("apos", "'"),
        ("auml", "\u{00E4}"),
        ("bull", "\u{2022}"),
        ("ccedil", "\u{00E7}"),
        ("cent", "\u{00A2}"),
        ("copy", "\u{00A9}"),
        ("darr", "\u{2193}"),
        ("deg", "\u{00B0}"),
        ("divide", "\u{00F7}"),
        ("eacute", "\u{00E9}"),
        ("egrave", "\u{00E8}"),
        ("emsp", "\u{2003}"),
        ("ensp", "\u{2002}"),
        ("euro", "\u{20AC}"),
        ("frac12", "\u{00BD}"),
        ("frac14", "\u{00BC}"),
        ("frac34", "\u{00BE}"),
        ("ge", "\u{2265}"),
        ("gt", ">"),
        ("hellip", "\u{2026}"),
        ("iexcl", "\u{00A1}"),
        ("infin", "\u{221E}"),
        ("iquest", "\u{00BF}"),
        ("laquo", "\u{00AB}"),
        ("larr", "\u{2190}"),
        ("ldquo", "\u{201C}"),
        ("le", "\u{2264}"),
        ("lsquo", "\u{2018}"),
        ("lt", "<"),
        ("mdash", "\u{2014}"),
        ("micro", "\u{00B5}"),
        ("middot", "\u{00B7}"),
        ("nbsp", "\u{00A0}"),
        ("ndash", "\u{2013}"),
        ("ne", "\u{2260}"),
        ("ngsp", "\u{E500}"),
        ("not", "\u{00AC}"),
        ("ntilde", "\u{00F1}"),
        ("oacute", "\u{00F3}"),
        ("ouml", "\u{00F6}"),
        ("para", "\u{00B6}"),
        ("plusmn", "\u{00B1}"),
        ("pound", "\u{00A3}"),
        ("quot", "\""),
        ("raquo", "\u{00BB}"),
        ("rarr", "\u{2192}"),
        ("rdquo", "\u{201D}"),
        ("reg", "\u{00AE}"),
        ("rsquo", "\u{2019}"),
        ("sect", "\u{00A7}"),
        ("shy", "\u{00AD}"),
        ("szlig", "\u{00DF}"),
        ("thinsp", "\u{2009}"),
        ("times", "\u{00D7}"),
        ("trade", "\u{2122}"),
        ("uarr", "\u{2191}"),
        ("uuml", "\u{00FC}"),
        ("yen", "\u{00A5}"),
        ("zwj", "\u{200D}"),
        ("zwnj", "\u{200C}"),
    ]
    .into_iter()
    .collect()
});
