//! Part-of-speech compression.
//!
//! An external tagger splits the text and assigns Universal POS tags; tokens
//! whose tag is in the level's removal table are dropped. Surviving tokens
//! keep the whitespace that followed them in the source.

use pc_core::error::{PcError, Result};
use pc_core::AggressivenessLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Universal POS tags, plus the `SPACE` tag some taggers emit for runs of
/// whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Upos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
    Space,
}

impl Upos {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adj => "ADJ",
            Self::Adp => "ADP",
            Self::Adv => "ADV",
            Self::Aux => "AUX",
            Self::Cconj => "CCONJ",
            Self::Det => "DET",
            Self::Intj => "INTJ",
            Self::Noun => "NOUN",
            Self::Num => "NUM",
            Self::Part => "PART",
            Self::Pron => "PRON",
            Self::Propn => "PROPN",
            Self::Punct => "PUNCT",
            Self::Sconj => "SCONJ",
            Self::Sym => "SYM",
            Self::Verb => "VERB",
            Self::X => "X",
            Self::Space => "SPACE",
        }
    }
}

impl fmt::Display for Upos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Upos {
    type Err = PcError;

    fn from_str(s: &str) -> Result<Self> {
        let tag = match s.trim().to_ascii_uppercase().as_str() {
            "ADJ" => Self::Adj,
            "ADP" => Self::Adp,
            "ADV" => Self::Adv,
            "AUX" => Self::Aux,
            "CCONJ" => Self::Cconj,
            "DET" => Self::Det,
            "INTJ" => Self::Intj,
            "NOUN" => Self::Noun,
            "NUM" => Self::Num,
            "PART" => Self::Part,
            "PRON" => Self::Pron,
            "PROPN" => Self::Propn,
            "PUNCT" => Self::Punct,
            "SCONJ" => Self::Sconj,
            "SYM" => Self::Sym,
            "VERB" => Self::Verb,
            "X" => Self::X,
            "SPACE" => Self::Space,
            _ => return Err(PcError::CollaboratorLoad(format!("unknown POS tag '{s}'"))),
        };
        Ok(tag)
    }
}

/// One tagger token: surface text, tag, and the whitespace that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub text: String,
    pub upos: Upos,
    #[serde(default)]
    pub whitespace: String,
}

impl TaggedToken {
    pub fn new(text: impl Into<String>, upos: Upos, whitespace: impl Into<String>) -> Self {
        Self { text: text.into(), upos, whitespace: whitespace.into() }
    }
}

/// A POS tagger backed by a statistical model.
///
/// Model loading and tagging failures are `PcError::CollaboratorLoad` and
/// end the run.
pub trait PosTagger: Send + Sync {
    fn name(&self) -> &str;

    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>>;
}

pub const LIGHT_REMOVE_POS: &[Upos] = &[Upos::Det];

pub const MEDIUM_REMOVE_POS: &[Upos] = &[Upos::Det, Upos::Adp, Upos::Cconj, Upos::Adv];

pub const AGGRESSIVE_REMOVE_POS: &[Upos] = &[
    Upos::Det,
    Upos::Adp,
    Upos::Cconj,
    Upos::Sconj,
    Upos::Adv,
    Upos::Pron,
    Upos::Aux,
    Upos::Part,
    Upos::Adj,
];

/// Tags dropped at `level`. Tables escalate like the lexicon levels.
pub fn pos_removal_set(level: AggressivenessLevel) -> &'static [Upos] {
    match level {
        AggressivenessLevel::Light => LIGHT_REMOVE_POS,
        AggressivenessLevel::Medium => MEDIUM_REMOVE_POS,
        AggressivenessLevel::Aggressive => AGGRESSIVE_REMOVE_POS,
    }
}

/// Concatenate surviving tokens with their trailing whitespace, then trim.
pub fn filter_tagged(tokens: &[TaggedToken], level: AggressivenessLevel) -> String {
    let remove = pos_removal_set(level);
    let mut out = String::new();
    for token in tokens.iter().filter(|t| !remove.contains(&t.upos)) {
        out.push_str(&token.text);
        out.push_str(&token.whitespace);
    }
    out.trim().to_string()
}

/// Tag `text` and filter it at `level`.
pub fn compress_tagged(tagger: &dyn PosTagger, text: &str, level: AggressivenessLevel) -> Result<String> {
    let tokens = tagger.tag(text).map_err(|e| match e {
        PcError::CollaboratorLoad(_) => e,
        other => PcError::CollaboratorLoad(format!("{}: {other}", tagger.name())),
    })?;
    Ok(filter_tagged(&tokens, level))
}
