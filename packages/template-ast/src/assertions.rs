//! Assertions Module
//!
//! Corresponds to packages/compiler/src/assertions.ts

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ConfigError;

static UNUSABLE_INTERPOLATION_REGEXPS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"@").unwrap(),          // control flow reserved symbol
        Regex::new(r"^\s*$").unwrap(),      // empty
        Regex::new(r"[<>]").unwrap(),       // html tag
        Regex::new(r"^[{}]$").unwrap(),     // i18n expansion
        Regex::new(r"&(#|[a-z])").unwrap(), // character reference
        Regex::new(r"^//").unwrap(),        // comment
    ]
});

pub fn assert_interpolation_symbols(start: &str, end: &str) -> Result<(), ConfigError> {
    let unusable = UNUSABLE_INTERPOLATION_REGEXPS
        .iter()
        .any(|regexp| regexp.is_match(start) || regexp.is_match(end));
    if unusable {
        return Err(ConfigError::UnusableInterpolation {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}
