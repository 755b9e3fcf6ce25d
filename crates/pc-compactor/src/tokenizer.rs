//! Whitespace tokenizer and lookup normalization.

/// Split on whitespace only. Attached punctuation stays on the token.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Lowercase and keep only word characters (alphanumerics and `_`).
///
/// Used for lexicon lookup only; the token itself is never rewritten.
pub fn normalize(token: &str) -> String {
    token
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Number of whitespace-delimited tokens.
pub fn count_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Rejoin tokens with single spaces.
pub fn rejoin(tokens: &[&str]) -> String {
    tokens.join(" ")
}
