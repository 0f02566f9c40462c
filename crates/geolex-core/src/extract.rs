//! Balanced-object extraction from raw generated text.
//!
//! Generation backends rarely return a clean JSON object: the object is
//! usually wrapped in prose ("Sure! Here is the answer: {...}") or cut off
//! mid-object when the token budget runs out. This module locates a
//! candidate object substring and repairs an unterminated one by appending
//! the missing closing braces.
//!
//! Known limitation: scanning only the first `{` and last `}` cannot
//! correctly isolate one object among several, or skip braces inside string
//! literals. The extractor is best-effort; downstream parsing decides
//! whether the candidate is usable.

/// Extract a candidate JSON-object substring from arbitrary text.
///
/// Returns `None` when no candidate can be found, which sends the resolver
/// down the heuristic path.
pub fn extract_object(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Fast path: already a braced object.
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return Some(trimmed.to_string());
    }

    let start = trimmed.find('{')?;
    let candidate = match trimmed.rfind('}') {
        Some(end) if end > start => &trimmed[start..=end],
        // Last `}` closes something before the object even opens.
        Some(_) => return None,
        // No closing brace at all: generation was cut off mid-object.
        None => &trimmed[start..],
    };

    Some(balance_braces(candidate))
}

/// Append closing braces for every unmatched `{` in the candidate.
fn balance_braces(candidate: &str) -> String {
    let opens = candidate.matches('{').count();
    let closes = candidate.matches('}').count();

    let mut balanced = candidate.to_string();
    if opens > closes {
        balanced.extend(std::iter::repeat('}').take(opens - closes));
    }
    balanced
}
