//! Text repair for the legacy scene dialect.
//!
//! Legacy `.sc` files are JSON except for trailing commas before a closing
//! brace or bracket. Nothing else is repaired; anything still invalid after
//! this pass is left for the parser to reject.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

fn trailing_comma() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r",\s*([}\]])").expect("static pattern compiles"))
}

/// Remove every comma that is followed only by whitespace and then `}` or `]`.
///
/// Returns the input unchanged (borrowed) when there is nothing to strip.
pub fn strip_trailing_commas(text: &str) -> Cow<'_, str> {
    trailing_comma().replace_all(text, "$1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_before_brace_and_bracket() {
        let text = r#"{"a": [1, 2, 3,], "b": {"c": 1,},}"#;
        assert_eq!(strip_trailing_commas(text), r#"{"a": [1, 2, 3], "b": {"c": 1}}"#);
    }

    #[test]
    fn test_strips_across_newlines() {
        let text = "{\n  \"figures\": [\n    {\"type\": \"sphere\"},\n  ],\n}\n";
        let fixed = strip_trailing_commas(text);
        assert!(serde_json::from_str::<serde_json::Value>(&fixed).is_ok());
        assert_eq!(fixed, "{\n  \"figures\": [\n    {\"type\": \"sphere\"}]}\n");
    }

    #[test]
    fn test_clean_input_is_borrowed() {
        let text = r#"{"a": [1, 2]}"#;
        assert!(matches!(strip_trailing_commas(text), Cow::Borrowed(_)));
    }

    #[test]
    fn test_inner_commas_untouched() {
        let text = "[1, 2, 3]";
        assert_eq!(strip_trailing_commas(text), "[1, 2, 3]");
    }
}
