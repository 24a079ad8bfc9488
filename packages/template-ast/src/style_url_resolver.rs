//! Style URL Resolver
//!
//! Corresponds to packages/compiler/src/style_url_resolver.ts
//!
//! Decides whether a stylesheet `<link href>` can be inlined by the build,
//! in which case the link element is removed from the template.

use once_cell::sync::Lazy;
use regex::Regex;

static URL_WITH_SCHEMA_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^:/?#]+):").unwrap());

/// Schemes the build knows how to load.
const RESOLVABLE_SCHEMES: [&str; 2] = ["package", "asset"];

/// Scheme of `url`, if it has one.
pub fn url_scheme(url: &str) -> Option<&str> {
    URL_WITH_SCHEMA_REGEXP
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// A relative URL, or one with a `package:` / `asset:` scheme. Empty and
/// root-relative URLs (`/x`, `//host/x`) are not resolvable.
pub fn is_style_url_resolvable(url: Option<&str>) -> bool {
    let Some(url) = url.filter(|u| !u.is_empty() && !u.starts_with('/')) else {
        return false;
    };
    match url_scheme(url) {
        Some(scheme) => RESOLVABLE_SCHEMES.contains(&scheme),
        None => true,
    }
}
