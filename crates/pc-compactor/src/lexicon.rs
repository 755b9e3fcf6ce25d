//! Category lexicon: which function-word classes a normalized word belongs to.
//!
//! The tables are heuristic word lists, not a POS tagger. A word may appear in
//! more than one category (`yet` is both a conjunction and an adverb); removal
//! decisions only ever look at flattened unions of categories.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Bumped whenever a word table changes, so experiment outputs can be traced
/// back to the lexicon that produced them.
pub const LEXICON_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Article,
    Conjunction,
    Preposition,
    Adverb,
    Pronoun,
    FillerAdjective,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Self::Article,
        Self::Conjunction,
        Self::Preposition,
        Self::Adverb,
        Self::Pronoun,
        Self::FillerAdjective,
    ];

    /// Words of this category, lowercase.
    pub fn words(&self) -> &'static [&'static str] {
        match self {
            Self::Article => ARTICLES,
            Self::Conjunction => CONJUNCTIONS,
            Self::Preposition => PREPOSITIONS,
            Self::Adverb => ADVERBS,
            Self::Pronoun => PRONOUNS,
            Self::FillerAdjective => FILLER_ADJECTIVES,
        }
    }
}

pub const ARTICLES: &[&str] = &["a", "an", "the"];

pub const CONJUNCTIONS: &[&str] = &["and", "but", "or", "so", "yet", "for", "nor"];

pub const PREPOSITIONS: &[&str] = &[
    "in", "on", "at", "to", "from", "with", "by", "about", "as", "into",
    "like", "through", "after", "over", "between", "out", "against",
    "during", "without", "before", "under", "around", "among", "of",
    "per", "within", "upon", "beneath", "beside", "beyond", "off",
    "above", "below", "near", "behind", "across", "along", "toward",
    "towards", "throughout", "until", "since",
];

pub const ADVERBS: &[&str] = &[
    "very", "really", "quite", "just", "only", "also", "too", "much",
    "most", "more", "well", "even", "however", "then", "now", "every",
    "daily", "always", "never", "often", "sometimes", "usually", "rarely",
    "frequently", "seldom", "hardly", "barely", "nearly", "almost",
    "extremely", "completely", "totally", "absolutely", "rather",
    "fairly", "pretty", "enough", "still", "yet", "already",
];

pub const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her",
    "us", "them", "my", "your", "his", "its", "our", "their",
    "mine", "yours", "hers", "ours", "theirs", "myself", "yourself",
    "himself", "herself", "itself", "ourselves", "yourselves", "themselves",
];

/// Semantically light adjectives, only removed at the aggressive level.
pub const FILLER_ADJECTIVES: &[&str] = &[
    "good", "bad", "big", "small", "large", "little", "new", "old",
    "great", "high", "different", "important", "public", "poor", "major",
    "available", "popular", "likely", "natural", "similar", "common",
    "recent", "certain", "full", "simple", "sure", "clear", "whole",
    "better", "best", "worse", "worst", "nice", "beautiful", "ugly",
    "happy", "sad", "fresh", "lovely", "wonderful", "terrible",
];

/// Immutable word → categories map. Built once, shared read-only.
#[derive(Debug, Clone)]
pub struct CategoryLexicon {
    entries: HashMap<&'static str, Vec<Category>>,
}

impl CategoryLexicon {
    pub fn new() -> Self {
        let mut entries: HashMap<&'static str, Vec<Category>> = HashMap::new();
        for category in Category::ALL {
            for word in category.words() {
                let cats = entries.entry(*word).or_default();
                if !cats.contains(&category) {
                    cats.push(category);
                }
            }
        }
        Self { entries }
    }

    /// Categories of a normalized word; empty when the word is content.
    pub fn categories_of(&self, word: &str) -> &[Category] {
        self.entries.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_in(&self, word: &str, category: Category) -> bool {
        self.categories_of(word).contains(&category)
    }

    /// Every word of `category` known to the lexicon.
    pub fn words_in(&self, category: Category) -> impl Iterator<Item = &'static str> + '_ {
        self.entries
            .iter()
            .filter(move |(_, cats)| cats.contains(&category))
            .map(|(w, _)| *w)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CategoryLexicon {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide lexicon.
pub static LEXICON: LazyLock<CategoryLexicon> = LazyLock::new(CategoryLexicon::new);
