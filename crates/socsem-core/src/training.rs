// crates/socsem-core/src/training.rs
//
// Training adapter: configuration surface and the hand-off to an external
// embedding-training algorithm.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::corpus::Corpus;
use crate::error::SocsemError;
use crate::model::EmbeddingModel;
use crate::traits::EmbeddingTrainer;

/// Options recognised by embedding trainers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Ignore tokens with a lower total frequency.
    #[serde(default = "default_min_count")]
    pub min_count: u64,

    /// Dimensionality of the word vectors.
    #[serde(default = "default_vector_size")]
    pub vector_size: usize,

    /// Worker threads the trainer may use.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Maximum distance between the current and predicted word.
    #[serde(default = "default_window")]
    pub window: usize,

    /// Passes over the corpus.
    #[serde(default = "default_epochs")]
    pub epochs: usize,
}

fn default_min_count() -> u64 {
    5
}

fn default_vector_size() -> usize {
    300
}

fn default_workers() -> usize {
    8
}

fn default_window() -> usize {
    5
}

fn default_epochs() -> usize {
    5
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            min_count: default_min_count(),
            vector_size: default_vector_size(),
            workers: default_workers(),
            window: default_window(),
            epochs: default_epochs(),
        }
    }
}

impl TrainingConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), SocsemError> {
        if self.vector_size == 0 {
            return Err(SocsemError::Config("vector_size must be > 0".to_string()));
        }
        if self.workers == 0 {
            return Err(SocsemError::Config("workers must be > 0".to_string()));
        }
        if self.window == 0 {
            return Err(SocsemError::Config("window must be > 0".to_string()));
        }
        if self.epochs == 0 {
            return Err(SocsemError::Config("epochs must be > 0".to_string()));
        }
        Ok(())
    }
}

/// Train a community model through an external trainer.
///
/// The returned model is named `name` and is guaranteed to have
/// `config.vector_size` dimensions.
pub fn train_model<T: EmbeddingTrainer + ?Sized>(
    trainer: &T,
    name: &str,
    corpus: &Corpus,
    config: &TrainingConfig,
) -> Result<EmbeddingModel, SocsemError> {
    config.validate()?;
    if corpus.is_empty() {
        return Err(SocsemError::InvalidInput(format!(
            "cannot train model '{}' on an empty corpus",
            name
        )));
    }

    let mut model = trainer.train(corpus, config)?;
    if model.dim() != config.vector_size {
        return Err(SocsemError::DimensionMismatch {
            expected: config.vector_size,
            actual: model.dim(),
        });
    }
    model.set_name(name);

    info!(
        model = name,
        docs = corpus.len(),
        vocabulary = model.len(),
        dim = model.dim(),
        "Trained embedding model"
    );
    Ok(model)
}
