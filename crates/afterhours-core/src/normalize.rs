//! Normalization rules for raw tool-call argument values.
//!
//! Voice-AI tool calls arrive with loosely typed arguments: fields may be
//! absent, null, empty, padded with whitespace, or a non-string scalar.
//! Every outbound Airtable value passes through these helpers so the field
//! map never contains an empty cell.

use serde_json::Value;

/// Placeholder used when no callback number was captured on the call.
pub const NO_CALLBACK_NUMBER: &str = "No callback number";

/// Converts an argument value to its text form.
///
/// Strings pass through as-is, null becomes empty (treated as absent by the
/// callers), and any other JSON value is rendered as its JSON text.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Sanitizes a raw argument value for the Airtable field map.
///
/// Returns `default` when the value is absent, null, or empty after
/// trimming; otherwise returns the trimmed text form of the value.
pub fn sanitize_field(value: Option<&Value>, default: &str) -> String {
    let text = value.map(value_text).unwrap_or_default();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Returns the trimmed text of a required argument, or `None` if it
/// resolves empty.
///
/// Required fields never receive a default: an empty caller name or
/// emergency type rejects the whole request instead.
pub fn required_field(value: Option<&Value>) -> Option<String> {
    let text = value.map(value_text).unwrap_or_default();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Formats a callback number for display.
///
/// Strips non-digit characters and applies US formatting for 10-digit
/// numbers and 11-digit numbers with a leading country code of 1. Any
/// other digit count passes the original text through unformatted, and
/// an absent or empty value yields [`NO_CALLBACK_NUMBER`].
pub fn format_callback_number(value: Option<&Value>) -> String {
    let text = value.map(value_text).unwrap_or_default();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return NO_CALLBACK_NUMBER.to_string();
    }

    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        10 => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
        11 if digits.starts_with('1') => {
            let local = &digits[1..];
            format!("+1 ({}) {}-{}", &local[..3], &local[3..6], &local[6..])
        },
        // Digit count outside the US phone shapes: deliberate pass-through
        // rather than stricter validation.
        _ => trimmed.to_string(),
    }
}
