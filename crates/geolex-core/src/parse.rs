//! Lenient JSON parsing with a single trailing-comma repair pass.
//!
//! Generators routinely leave a dangling comma before a closing brace or
//! bracket. A strict parse is attempted first; on failure the trailing
//! commas are stripped and the parse is retried exactly once. Anything
//! still unparseable yields no value, never an error.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    /// A comma immediately before `}` or `]`, optionally separated by
    /// whitespace.
    static ref TRAILING_COMMA: Regex = Regex::new(r",(\s*[}\]])").unwrap();
}

/// Parse a candidate string as JSON, tolerating trailing commas.
///
/// Returns `None` when the candidate cannot be recovered after the single
/// repair pass. A literal `null` also counts as no value.
pub fn parse_lenient(candidate: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(candidate) {
        return non_null(value);
    }

    let repaired = TRAILING_COMMA.replace_all(candidate, "${1}");
    serde_json::from_str::<Value>(&repaired).ok().and_then(non_null)
}

fn non_null(value: Value) -> Option<Value> {
    if value.is_null() {
        None
    } else {
        Some(value)
    }
}
