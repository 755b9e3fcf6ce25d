//! Numeric answer extraction and comparison for GSM8K-style outputs.

use regex::Regex;
use std::sync::LazyLock;

static RE_MARKED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"####\s*(-?\d+\.?\d*)").unwrap());
static RE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-?\d+\.?\d*").unwrap());

/// The final numeric answer in `text`.
///
/// Prefers the number right after `####`; otherwise the last number after
/// the last `####` (or anywhere, when there is none). Thousands separators
/// are dropped first. `None` when there is no number.
pub fn extract_answer(text: &str) -> Option<String> {
    let text = text.replace(',', "");
    let found = match RE_MARKED.captures(&text) {
        Some(caps) => caps.get(1).map(|m| m.as_str()),
        None => {
            let tail = text.rsplit("####").next().unwrap_or(&text);
            RE_NUMBER.find_iter(tail).last().map(|m| m.as_str())
        }
    };
    found.map(|n| n.trim_end_matches('.').to_string())
}

fn parse_number(s: &str) -> Option<f64> {
    s.replace(',', "").trim().parse().ok()
}

/// True when both sides parse as numbers within 1e-4 of each other.
pub fn check_correctness(prediction: &str, gold: &str) -> bool {
    match (parse_number(prediction), parse_number(gold)) {
        (Some(p), Some(g)) => (p - g).abs() < 1e-4,
        _ => false,
    }
}
