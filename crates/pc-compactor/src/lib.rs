//! Rule-based prompt compactor.
//!
//! Stages:
//! 1. Rewrite: optional ordered regex pass (courtesy, math phrasing, punctuation)
//! 2. Tokenize: whitespace split, punctuation stays attached
//! 3. Filter: drop tokens whose normalized form is in the level's removal set
//! 4. Rejoin: single spaces
//!
//! Surviving tokens keep their original case and punctuation and their
//! relative order.

pub mod lexicon;
pub mod pipeline;
pub mod policy;
pub mod rewrite;
pub mod tokenizer;

pub use lexicon::{Category, CategoryLexicon, LEXICON, LEXICON_VERSION};
pub use pipeline::{compress, CompressionEngine, CompressionResult};
pub use policy::{removal_set, FilterPolicy, RemovalSet};
pub use rewrite::{RewriteRule, RewriteRules};
pub use tokenizer::{count_tokens, normalize, tokenize};
