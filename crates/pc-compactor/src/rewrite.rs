//! Legacy phrase-rewrite pre-pass.
//!
//! An ordered list of (pattern, replacement) rules applied to the raw text
//! before tokenization. This is the only stage that rewrites inside tokens.

use regex::Regex;
use std::sync::LazyLock;

#[derive(Debug, Clone)]
pub struct RewriteRule {
    pub pattern: Regex,
    pub replacement: String,
}

impl RewriteRule {
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self { pattern: Regex::new(pattern)?, replacement: replacement.into() })
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern.replace_all(text, self.replacement.as_str()).into_owned()
    }
}

/// Rules run in order; later rules see the output of earlier ones.
#[derive(Debug, Clone, Default)]
pub struct RewriteRules {
    rules: Vec<RewriteRule>,
}

/// (pattern, replacement) pairs of the legacy pass, in application order.
///
/// Math phrases are rewritten before anything that could eat the words they
/// anchor on. Articles are not handled here: every filter level drops them.
/// No replacement contains more whitespace than its pattern matches, so the
/// pass never raises the token count.
pub const LEGACY_RULES: &[(&str, &str)] = &[
    // courtesy
    (r"(?i)\b(please|kindly|could you|i would like to know)\b", ""),
    // introductions
    (r"(?i)\b(in order to|in addition)\b,?", ""),
    // math verbosity
    (r"(?i)\bis equal to\b", "="),
    (r"(?i)\bthe total of\b", "sum of"),
    // connectives; the replacement carries no whitespace so it never splits a token
    (r"(?i)\b(and then|subsequently|furthermore|moreover)\b", ","),
    // intensity
    (r"(?i)\b(very|mini|actually|basically|just|detailed)\b", ""),
    // punctuation
    (r#"[;:"'()]"#, ""),
];

static LEGACY: LazyLock<RewriteRules> = LazyLock::new(|| {
    let rules = LEGACY_RULES
        .iter()
        .map(|(p, r)| RewriteRule::new(p, *r).unwrap())
        .collect();
    RewriteRules { rules }
});

impl RewriteRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in legacy pass.
    pub fn legacy() -> &'static RewriteRules {
        &LEGACY
    }

    /// Build from custom pairs. Fails on the first invalid pattern.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let rules = pairs
            .into_iter()
            .map(|(p, r)| RewriteRule::new(p, r))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    pub fn push(&mut self, rule: RewriteRule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn apply(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let mut result = text.to_string();
        for rule in &self.rules {
            result = rule.apply(&result);
        }
        result
    }
}
