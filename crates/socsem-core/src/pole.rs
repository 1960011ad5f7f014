// crates/socsem-core/src/pole.rs
//
// Curated pole-word tables and the excluded-lexicon blacklist.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Value of the `Include` column that marks a pole word as excluded.
pub const EXCLUDE_MARKER: &str = "f";

/// Blacklist category that marks a proper noun.
pub const PROPER_NOUN_CATEGORY: &str = "propNoun";

/// One row of a pole-word table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoleWord {
    pub word: String,
    /// Curator's inclusion flag; only `f` excludes the row.
    pub include: Option<String>,
    /// Similarity of the word to the seed word. Rows without a score never rank.
    pub sem_sim: Option<f64>,
}

impl PoleWord {
    pub fn is_included(&self) -> bool {
        self.include.as_deref() != Some(EXCLUDE_MARKER)
    }
}

/// Candidate pole words for one (model, seed word) pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoleWordTable {
    pub rows: Vec<PoleWord>,
}

impl PoleWordTable {
    pub fn new(rows: Vec<PoleWord>) -> Self {
        Self { rows }
    }

    /// The `k` included words with the highest `sem_sim`, best first.
    ///
    /// Equal scores keep table order; rows without a score are skipped.
    pub fn top_included(&self, k: usize) -> Vec<&str> {
        let mut ranked: Vec<(&str, f64)> = self
            .rows
            .iter()
            .filter(|row| row.is_included())
            .filter_map(|row| match row.sem_sim {
                Some(s) if !s.is_nan() => Some((row.word.as_str(), s)),
                _ => None,
            })
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked.into_iter().take(k).map(|(w, _)| w).collect()
    }
}

/// One row of the blacklist lexicon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlacklistEntry {
    pub lex: String,
    pub excl: bool,
    pub category: Option<String>,
}

/// Tokens to keep out of change-candidate rankings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Blacklist {
    pub entries: Vec<BlacklistEntry>,
}

impl Blacklist {
    pub fn new(entries: Vec<BlacklistEntry>) -> Self {
        Self { entries }
    }

    /// Build a blacklist that excludes exactly the given words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: words
                .into_iter()
                .map(|w| BlacklistEntry {
                    lex: w.into(),
                    excl: true,
                    category: None,
                })
                .collect(),
        }
    }

    /// Set of excluded tokens.
    ///
    /// With `prop_nouns == true` only rows flagged `Excl` are returned; with
    /// `false` proper nouns are returned as well.
    pub fn excluded(&self, prop_nouns: bool) -> HashSet<&str> {
        self.entries
            .iter()
            .filter(|e| {
                e.excl
                    || (!prop_nouns && e.category.as_deref() == Some(PROPER_NOUN_CATEGORY))
            })
            .map(|e| e.lex.as_str())
            .collect()
    }
}
