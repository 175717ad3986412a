//! Query normalization and tokenization.

use once_cell::sync::Lazy;
use regex::Regex;

#[expect(clippy::expect_used, reason = "Pattern is a compile-time constant")]
static DISALLOWED_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s]").expect("valid character filter"));

#[expect(clippy::expect_used, reason = "Pattern is a compile-time constant")]
static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid token pattern"));

/// Lower-case `text` and drop everything except ASCII letters, digits and whitespace.
///
/// Whitespace is kept as-is: no trimming or collapsing.
#[must_use]
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    DISALLOWED_CHARS.replace_all(&lower, "").into_owned()
}

/// Split a document into lower-cased terms of at least two word characters.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}
