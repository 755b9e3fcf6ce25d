//! Compression pipeline: rewrite pass → tokenize → filter → rejoin.

use crate::policy::{removal_set, RemovalSet};
use crate::rewrite::RewriteRules;
use crate::tokenizer::{count_tokens, normalize, rejoin, tokenize};
use pc_core::{AggressivenessLevel, CompressionStats};
use std::sync::Arc;

/// Compression result with token counts.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionResult {
    pub original: String,
    pub compressed: String,
    pub original_tokens: usize,
    pub compressed_tokens: usize,
    pub level: AggressivenessLevel,
    pub rewrite_applied: bool,
}

impl CompressionResult {
    pub fn stats(&self) -> CompressionStats {
        CompressionStats::new(self.original_tokens, self.compressed_tokens)
    }

    /// `compressed / original` in tokens.
    pub fn rate(&self) -> f64 {
        self.stats().rate()
    }
}

/// Rule-based compressor for one aggressiveness level.
///
/// Stateless per call; cheap to clone and safe to share across threads.
#[derive(Debug, Clone)]
pub struct CompressionEngine {
    pub level: AggressivenessLevel,
    rewrite: Option<Arc<RewriteRules>>,
}

impl CompressionEngine {
    pub fn new(level: AggressivenessLevel) -> Self {
        Self { level, rewrite: None }
    }

    pub fn light() -> Self {
        Self::new(AggressivenessLevel::Light)
    }

    pub fn medium() -> Self {
        Self::new(AggressivenessLevel::Medium)
    }

    pub fn aggressive() -> Self {
        Self::new(AggressivenessLevel::Aggressive)
    }

    /// Run the built-in legacy rewrite pass before filtering.
    pub fn with_legacy_rewrite(self) -> Self {
        self.with_rewrite(RewriteRules::legacy().clone())
    }

    /// Run `rules` before filtering.
    ///
    /// Recompressing the output of an engine with a rewrite pass is not
    /// stable: removing `please` from "could please you go" exposes
    /// "could you", which the next pass removes.
    pub fn with_rewrite(mut self, rules: RewriteRules) -> Self {
        self.rewrite = Some(Arc::new(rules));
        self
    }

    pub fn has_rewrite(&self) -> bool {
        self.rewrite.is_some()
    }

    pub fn removal_set(&self) -> &'static RemovalSet {
        removal_set(self.level)
    }

    /// Compress text. Total over all strings.
    ///
    /// Without a rewrite pass this is idempotent: every surviving token is
    /// already outside the removal set, so a second call returns its input.
    /// With a rewrite pass it is not; see [`CompressionEngine::with_rewrite`].
    pub fn compress(&self, text: &str) -> String {
        match &self.rewrite {
            Some(rules) => filter_tokens(&rules.apply(text), self.removal_set()),
            None => filter_tokens(text, self.removal_set()),
        }
    }

    /// Compress and report token counts against the unmodified input.
    pub fn compress_with_stats(&self, text: &str) -> CompressionResult {
        let compressed = self.compress(text);
        CompressionResult {
            original_tokens: count_tokens(text),
            compressed_tokens: count_tokens(&compressed),
            original: text.to_string(),
            compressed,
            level: self.level,
            rewrite_applied: self.rewrite.is_some(),
        }
    }
}

impl Default for CompressionEngine {
    fn default() -> Self {
        Self::light()
    }
}

/// Keep tokens whose normalized form is empty or not in `remove`.
pub fn filter_tokens(text: &str, remove: &RemovalSet) -> String {
    let kept: Vec<&str> = tokenize(text)
        .into_iter()
        .filter(|token| {
            let word = normalize(token);
            word.is_empty() || !remove.contains(&word)
        })
        .collect();
    rejoin(&kept)
}

/// Compress `text` at `level` without a rewrite pass.
pub fn compress(text: &str, level: AggressivenessLevel) -> String {
    filter_tokens(text, removal_set(level))
}
