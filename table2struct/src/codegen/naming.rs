//! Naming utilities for code generation

use std::sync::OnceLock;

use heck::ToSnakeCase;
use regex::Regex;

/// Convert a snake_case name to an upper-camel identifier.
///
/// Splits on `_`, uppercases the first letter of every non-empty segment and
/// keeps the rest of the segment as written. Consecutive, leading and
/// trailing underscores contribute nothing.
pub fn to_upper_camel(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    for segment in snake.split('_') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new("[a-z0-9]+|[A-Z][a-z0-9]*").expect("static word pattern"))
}

/// Convert a mixed-case name to snake_case.
///
/// Tokens are maximal runs of lowercase letters/digits, or one uppercase
/// letter followed by lowercase letters/digits. An acronym therefore splits
/// per letter (`ID` -> `i_d`). Anything else acts as a separator.
pub fn to_snake(mixed: &str) -> String {
    word_pattern()
        .find_iter(mixed)
        .map(|m| m.as_str().to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Check if a name is a Rust reserved keyword
pub fn is_rust_keyword(name: &str) -> bool {
    matches!(
        name,
        "as" | "async"
            | "await"
            | "break"
            | "const"
            | "continue"
            | "crate"
            | "dyn"
            | "else"
            | "enum"
            | "extern"
            | "false"
            | "fn"
            | "for"
            | "if"
            | "impl"
            | "in"
            | "let"
            | "loop"
            | "match"
            | "mod"
            | "move"
            | "mut"
            | "pub"
            | "ref"
            | "return"
            | "self"
            | "Self"
            | "static"
            | "struct"
            | "super"
            | "trait"
            | "true"
            | "type"
            | "unsafe"
            | "use"
            | "where"
            | "while"
            | "abstract"
            | "become"
            | "box"
            | "do"
            | "final"
            | "macro"
            | "override"
            | "priv"
            | "try"
            | "typeof"
            | "unsized"
            | "virtual"
            | "yield"
    )
}

/// Rust field identifier for a column: snake_case, raw-escaped if it is a keyword.
///
/// `self`, `super` and `crate` cannot be raw identifiers and get a trailing
/// underscore instead; a leading digit gets a leading underscore.
pub fn escape_field_name(name: &str) -> String {
    let snake = name.to_snake_case();
    if snake.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", snake)
    } else if matches!(snake.as_str(), "self" | "super" | "crate") {
        format!("{}_", snake)
    } else if is_rust_keyword(&snake) {
        format!("r#{}", snake)
    } else {
        snake
    }
}
