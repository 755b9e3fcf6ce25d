use crate::error::PcError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// How much of the lexicon is eligible for removal.
///
/// Removal sets escalate: everything removed at `Light` is removed at
/// `Medium`, and everything removed at `Medium` is removed at `Aggressive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggressivenessLevel {
    Light,
    Medium,
    Aggressive,
}

impl AggressivenessLevel {
    /// All levels, least aggressive first.
    pub const ALL: [AggressivenessLevel; 3] = [Self::Light, Self::Medium, Self::Aggressive];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for AggressivenessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggressivenessLevel {
    type Err = PcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "medium" => Ok(Self::Medium),
            "aggressive" => Ok(Self::Aggressive),
            _ => Err(PcError::InvalidLevel(s.to_string())),
        }
    }
}

/// A question/answer pair as produced by the dataset source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaRecord {
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

/// One row of a compressed batch.
///
/// Fields of the input record that the compressor does not consume are
/// carried through in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressedRecord {
    pub question_original: String,
    pub question_rulebased: String,
    #[serde(
        default,
        alias = "question_llmlingua2",
        skip_serializing_if = "Option::is_none"
    )]
    pub question_neural: Option<String>,
    /// Output of the POS-tag compressor, when one was configured.
    #[serde(default, alias = "question_cut", skip_serializing_if = "Option::is_none")]
    pub question_pos: Option<String>,
    pub original_tokens: usize,
    pub compressed_tokens: usize,
    #[serde(default)]
    pub answer: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CompressedRecord {
    pub fn stats(&self) -> CompressionStats {
        CompressionStats::new(self.original_tokens, self.compressed_tokens)
    }
}

/// Token counts before and after compression.
///
/// The compression *rate* is `compressed / original`; the *reduction* is
/// its complement. An empty original has rate 1.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionStats {
    pub original_tokens: usize,
    pub compressed_tokens: usize,
}

impl CompressionStats {
    pub fn new(original_tokens: usize, compressed_tokens: usize) -> Self {
        Self { original_tokens, compressed_tokens }
    }

    pub fn rate(&self) -> f64 {
        if self.original_tokens == 0 {
            return 1.0;
        }
        self.compressed_tokens as f64 / self.original_tokens as f64
    }

    pub fn reduction(&self) -> f64 {
        1.0 - self.rate()
    }

    pub fn reduction_pct(&self) -> f64 {
        self.reduction() * 100.0
    }

    pub fn tokens_saved(&self) -> usize {
        self.original_tokens.saturating_sub(self.compressed_tokens)
    }
}

impl std::ops::Add for CompressionStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            original_tokens: self.original_tokens + rhs.original_tokens,
            compressed_tokens: self.compressed_tokens + rhs.compressed_tokens,
        }
    }
}

impl std::iter::Sum for CompressionStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, s| acc + s)
    }
}
