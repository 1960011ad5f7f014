// crates/socsem-core/src/corpus.rs
//
// Tokenized document collection consumed by embedding trainers.
//
// Documents arrive already cleaned from the upstream text pipeline, or are
// cleaned here from raw text with the same rules: lowercase, strip punctuation,
// split on whitespace, drop short documents.

use std::collections::HashMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default minimum token count; documents must have strictly more tokens to be kept.
pub const DEFAULT_MIN_DOC_TOKENS: usize = 10;

/// An ordered, re-iterable sequence of tokenized documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    docs: Vec<Vec<String>>,
}

impl Corpus {
    /// Wrap pre-cleaned token sequences.
    pub fn new(docs: Vec<Vec<String>>) -> Self {
        Self { docs }
    }

    /// Clean raw texts and keep documents with more than `min_tokens` tokens.
    pub fn from_texts<I, S>(texts: I, min_tokens: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tic = Instant::now();
        let lowered: Vec<String> = texts.into_iter().map(|t| t.as_ref().to_lowercase()).collect();
        debug!(docs = lowered.len(), elapsed = ?tic.elapsed(), "Lowercased documents");

        let tic = Instant::now();
        let stripped: Vec<String> = lowered.iter().map(|t| strip_punctuation(t)).collect();
        debug!(docs = stripped.len(), elapsed = ?tic.elapsed(), "Stripped punctuation");

        let tic = Instant::now();
        let tokenized: Vec<Vec<String>> = stripped.iter().map(|t| tokenize(t)).collect();
        debug!(docs = tokenized.len(), elapsed = ?tic.elapsed(), "Tokenized documents");

        let tic = Instant::now();
        let docs: Vec<Vec<String>> = tokenized
            .into_iter()
            .filter(|doc| doc.len() > min_tokens)
            .collect();
        debug!(docs = docs.len(), elapsed = ?tic.elapsed(), "Dropped short documents");

        Self { docs }
    }

    /// Iterate over documents. Can be called any number of times.
    pub fn iter(&self) -> impl Iterator<Item = &[String]> {
        self.docs.iter().map(|d| d.as_slice())
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Total number of tokens across all documents.
    pub fn token_total(&self) -> usize {
        self.docs.iter().map(|d| d.len()).sum()
    }

    /// Token frequencies with `count >= min_count`, ranked by descending count.
    ///
    /// Ties are ordered by first occurrence in the corpus.
    pub fn token_counts(&self, min_count: u64) -> Vec<(String, u64)> {
        let mut counts: HashMap<&str, (u64, usize)> = HashMap::new();
        let mut position = 0usize;
        for doc in &self.docs {
            for token in doc {
                let entry = counts.entry(token.as_str()).or_insert((0, position));
                entry.0 += 1;
                position += 1;
            }
        }

        let mut ranked: Vec<(&str, u64, usize)> = counts
            .into_iter()
            .filter(|(_, (count, _))| *count >= min_count)
            .map(|(token, (count, first))| (token, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        ranked
            .into_iter()
            .map(|(token, count, _)| (token.to_string(), count))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Vec<String>;
    type IntoIter = std::slice::Iter<'a, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.docs.iter()
    }
}

/// Replace every run of non-word, non-whitespace characters with a single space.
fn strip_punctuation(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push(' ');
            in_run = true;
        }
    }
    out
}

fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_texts_cleans_and_filters() {
        let texts = [
            "Hello, World! This is a rather long comment with many words in it.",
            "too short!",
        ];
        let corpus = Corpus::from_texts(texts, 5);
        assert_eq!(corpus.len(), 1);
        let doc = corpus.iter().next().unwrap();
        assert_eq!(doc[0], "hello");
        assert_eq!(doc[1], "world");
        assert!(doc.iter().all(|t| t.chars().all(|c| c.is_alphanumeric() || c == '_')));
    }

    #[test]
    fn short_document_threshold_is_strict() {
        let corpus = Corpus::from_texts(["a b c", "a b c d"], 3);
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.iter().next().unwrap().len(), 4);
    }

    #[test]
    fn punctuation_inside_words_splits_them() {
        assert_eq!(tokenize(&strip_punctuation("don't stop")), vec!["don", "t", "stop"]);
        assert_eq!(tokenize(&strip_punctuation("snake_case ok")), vec!["snake_case", "ok"]);
    }

    #[test]
    fn corpus_can_be_iterated_twice() {
        let corpus = Corpus::new(vec![vec!["a".into(), "b".into()], vec!["c".into()]]);
        assert_eq!(corpus.iter().count(), 2);
        assert_eq!(corpus.iter().count(), 2);
        assert_eq!(corpus.token_total(), 3);
    }

    #[test]
    fn token_counts_ranks_and_filters() {
        let corpus = Corpus::new(vec![
            vec!["b".into(), "a".into(), "a".into()],
            vec!["c".into(), "b".into(), "a".into()],
        ]);
        let counts = corpus.token_counts(2);
        assert_eq!(counts, vec![("a".to_string(), 3), ("b".to_string(), 2)]);
    }
}
