//! Utility Functions
//!
//! Corresponds to packages/compiler/src/util.ts

/// Splits `input` at the first `:` into trimmed halves, or returns `default_values`.
pub fn split_at_colon<'a>(input: &'a str, default_values: [Option<&'a str>; 2]) -> [Option<&'a str>; 2] {
    split_at(input, ':', default_values)
}

/// Splits `input` at the first `.` into trimmed halves, or returns `default_values`.
pub fn split_at_period<'a>(input: &'a str, default_values: [Option<&'a str>; 2]) -> [Option<&'a str>; 2] {
    split_at(input, '.', default_values)
}

fn split_at<'a>(
    input: &'a str,
    character: char,
    default_values: [Option<&'a str>; 2],
) -> [Option<&'a str>; 2] {
    match input.find(character) {
        Some(char_index) => [
            Some(input[..char_index].trim()),
            Some(input[char_index + character.len_utf8()..].trim()),
        ],
        None => default_values,
    }
}

/// Uppercases the first character: `of` -> `Of`.
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
