// crates/socsem-core/src/config.rs
//
// Analysis configuration: where models and curated tables live, plus the
// default parameters of each analysis step. Loaded from a TOML file or
// populated with defaults.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::corpus::{Corpus, DEFAULT_MIN_DOC_TOKENS};
use crate::error::SocsemError;
use crate::model::EmbeddingModel;
use crate::traits::EmbeddingTrainer;
use crate::training::{train_model, TrainingConfig};

/// Runtime configuration for an analysis session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Directory holding `{name}.model` files.
    #[serde(default = "default_models_dir")]
    pub models_dir: String,

    /// Directory holding `{model}_{seed}.csv` pole-word tables.
    #[serde(default = "default_pole_words_dir")]
    pub pole_words_dir: String,

    /// CSV file with `Lex, Excl, Category` columns.
    #[serde(default = "default_blacklist_path")]
    pub blacklist_path: String,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Minimum token frequency (exclusive) in change-candidate and neighbour queries.
    #[serde(default = "default_freq_min")]
    pub freq_min: u64,

    /// Number of change candidates to report.
    #[serde(default = "default_candidates_k")]
    pub candidates_k: usize,

    /// How many similar tokens to scan per model before frequency filtering.
    #[serde(default = "default_neighbours_topn")]
    pub neighbours_topn: usize,

    /// Neighbours reported per model.
    #[serde(default = "default_neighbours_k")]
    pub neighbours_k: usize,

    /// Pole words averaged into each pole of a semantic axis.
    #[serde(default = "default_pole_k")]
    pub pole_k: usize,

    /// Documents need strictly more tokens than this to enter a corpus.
    #[serde(default = "default_min_doc_tokens")]
    pub min_doc_tokens: usize,

    /// The (minuend, subtrahend) models of the `SimDiff` column.
    #[serde(default = "default_reference_models")]
    pub reference_models: (String, String),

    #[serde(default)]
    pub training: TrainingConfig,
}

fn default_models_dir() -> String {
    "models".to_string()
}

fn default_pole_words_dir() -> String {
    "pole-words".to_string()
}

fn default_blacklist_path() -> String {
    "blacklist_lex.csv".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_freq_min() -> u64 {
    100
}

fn default_candidates_k() -> usize {
    20
}

fn default_neighbours_topn() -> usize {
    100_000
}

fn default_neighbours_k() -> usize {
    10
}

fn default_pole_k() -> usize {
    10
}

fn default_min_doc_tokens() -> usize {
    DEFAULT_MIN_DOC_TOKENS
}

fn default_reference_models() -> (String, String) {
    ("Coronavirus".to_string(), "conspiracy".to_string())
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            models_dir: default_models_dir(),
            pole_words_dir: default_pole_words_dir(),
            blacklist_path: default_blacklist_path(),
            log_level: default_log_level(),
            freq_min: default_freq_min(),
            candidates_k: default_candidates_k(),
            neighbours_topn: default_neighbours_topn(),
            neighbours_k: default_neighbours_k(),
            pole_k: default_pole_k(),
            min_doc_tokens: default_min_doc_tokens(),
            reference_models: default_reference_models(),
            training: TrainingConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, SocsemError> {
        let contents = fs::read_to_string(expand_tilde(path))
            .map_err(|e| SocsemError::Config(format!("{}: {}", path, e)))?;
        let config: AnalysisConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), SocsemError> {
        if self.neighbours_topn == 0 {
            return Err(SocsemError::Config("neighbours_topn must be > 0".to_string()));
        }
        if self.reference_models.0 == self.reference_models.1 {
            return Err(SocsemError::Config(
                "reference_models must name two different models".to_string(),
            ));
        }
        self.training.validate()
    }

    pub fn models_path(&self) -> PathBuf {
        PathBuf::from(expand_tilde(&self.models_dir))
    }

    pub fn pole_words_path(&self) -> PathBuf {
        PathBuf::from(expand_tilde(&self.pole_words_dir))
    }

    pub fn blacklist_file(&self) -> PathBuf {
        PathBuf::from(expand_tilde(&self.blacklist_path))
    }

    /// Clean raw texts into a corpus, keeping documents longer than `min_doc_tokens`.
    pub fn build_corpus<I, S>(&self, texts: I) -> Corpus
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Corpus::from_texts(texts, self.min_doc_tokens)
    }

    /// Build a community's corpus from raw texts and train its model with the
    /// `[training]` options.
    pub fn train_community_model<T, I, S>(
        &self,
        trainer: &T,
        name: &str,
        texts: I,
    ) -> Result<EmbeddingModel, SocsemError>
    where
        T: EmbeddingTrainer + ?Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let corpus = self.build_corpus(texts);
        train_model(trainer, name, &corpus, &self.training)
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}/{}", home.display(), rest);
        }
    }
    path.to_string()
}
