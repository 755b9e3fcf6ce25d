//! Filter policy: the removal set for each aggressiveness level.
//!
//! Each level is a flattened union of whole categories plus a few extra
//! words. The table is fixed, so the same level always yields the same set.

use crate::lexicon::{Category, LEXICON};
use pc_core::AggressivenessLevel;
use std::collections::HashSet;
use std::sync::LazyLock;

/// One row of the policy table.
#[derive(Debug, Clone, Copy)]
pub struct FilterPolicy {
    pub level: AggressivenessLevel,
    pub categories: &'static [Category],
    pub extra_words: &'static [&'static str],
}

pub const POLICY_TABLE: [FilterPolicy; 3] = [
    FilterPolicy {
        level: AggressivenessLevel::Light,
        categories: &[Category::Article],
        extra_words: &["very", "really", "quite", "just", "also", "too"],
    },
    FilterPolicy {
        level: AggressivenessLevel::Medium,
        categories: &[Category::Article, Category::Adverb, Category::Conjunction],
        extra_words: &["he", "she", "it", "they", "them", "him", "her"],
    },
    FilterPolicy {
        level: AggressivenessLevel::Aggressive,
        categories: &[
            Category::Article,
            Category::Adverb,
            Category::Conjunction,
            Category::Preposition,
            Category::Pronoun,
            Category::FillerAdjective,
        ],
        extra_words: &[],
    },
];

impl FilterPolicy {
    pub fn for_level(level: AggressivenessLevel) -> &'static FilterPolicy {
        match level {
            AggressivenessLevel::Light => &POLICY_TABLE[0],
            AggressivenessLevel::Medium => &POLICY_TABLE[1],
            AggressivenessLevel::Aggressive => &POLICY_TABLE[2],
        }
    }

    /// Flatten the categories and extra words into one set.
    pub fn build_removal_set(&self) -> RemovalSet {
        let mut words: HashSet<&'static str> = self.extra_words.iter().copied().collect();
        for category in self.categories {
            words.extend(LEXICON.words_in(*category));
        }
        RemovalSet { words }
    }
}

/// Normalized words dropped at one level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalSet {
    words: HashSet<&'static str>,
}

impl RemovalSet {
    pub fn contains(&self, normalized: &str) -> bool {
        self.words.contains(normalized)
    }

    pub fn is_subset(&self, other: &RemovalSet) -> bool {
        self.words.is_subset(&other.words)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.words.iter().copied()
    }
}

static REMOVAL_SETS: LazyLock<[RemovalSet; 3]> = LazyLock::new(|| {
    [
        POLICY_TABLE[0].build_removal_set(),
        POLICY_TABLE[1].build_removal_set(),
        POLICY_TABLE[2].build_removal_set(),
    ]
});

/// Cached removal set for a level.
pub fn removal_set(level: AggressivenessLevel) -> &'static RemovalSet {
    match level {
        AggressivenessLevel::Light => &REMOVAL_SETS[0],
        AggressivenessLevel::Medium => &REMOVAL_SETS[1],
        AggressivenessLevel::Aggressive => &REMOVAL_SETS[2],
    }
}
