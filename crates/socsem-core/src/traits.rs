// crates/socsem-core/src/traits.rs

use std::collections::HashMap;

use crate::corpus::Corpus;
use crate::error::SocsemError;
use crate::model::EmbeddingModel;
use crate::pole::PoleWordTable;
use crate::training::TrainingConfig;

/// Trait for an external word-embedding training algorithm.
///
/// Parallelism is the trainer's business; `config.workers` is a hint.
pub trait EmbeddingTrainer {
    /// Train a model over the corpus. The returned model's name is replaced
    /// by the caller.
    fn train(&self, corpus: &Corpus, config: &TrainingConfig) -> Result<EmbeddingModel, SocsemError>;
}

/// Trait for looking up curated pole-word tables.
///
/// Implemented by socsem-store (CSV files on disk).
pub trait PoleWordSource {
    /// The pole-word table for a seed word in a given community model.
    fn pole_words(&self, model_name: &str, seed_word: &str) -> Result<PoleWordTable, SocsemError>;
}

/// In-memory pole-word tables keyed by `(model_name, seed_word)`.
impl PoleWordSource for HashMap<(String, String), PoleWordTable> {
    fn pole_words(&self, model_name: &str, seed_word: &str) -> Result<PoleWordTable, SocsemError> {
        self.get(&(model_name.to_string(), seed_word.to_string()))
            .cloned()
            .ok_or_else(|| {
                SocsemError::MissingResource(format!(
                    "pole words for '{}' in model '{}'",
                    seed_word, model_name
                ))
            })
    }
}
