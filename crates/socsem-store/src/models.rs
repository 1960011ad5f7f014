// crates/socsem-store/src/models.rs
//
// Model Store: community name -> trained embedding model.
//
// Models are persisted one per file as `{models_dir}/{name}.model` (JSON).
// Batch loading tolerates missing files: each missing model is logged and
// skipped so the remaining communities can still be analysed.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use socsem_core::{EmbeddingModel, SocsemError};

/// File extension of persisted models.
pub const MODEL_EXTENSION: &str = "model";

/// Ordered collection of named embedding models.
///
/// Iteration follows insertion order, which for `load` is the order the
/// names were requested in.
#[derive(Debug, Clone, Default)]
pub struct ModelStore {
    models: Vec<EmbeddingModel>,
}

impl ModelStore {
    /// Create a new empty ModelStore.
    pub fn new() -> Self {
        Self { models: Vec::new() }
    }

    /// Load the named models from `models_dir`.
    ///
    /// A missing `{name}.model` file is logged and skipped. Unreadable or
    /// malformed files abort the load.
    pub fn load<P, S>(models_dir: P, names: &[S]) -> Result<Self, SocsemError>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        let models_dir = models_dir.as_ref();
        let mut store = Self::new();

        for name in names {
            let name = name.as_ref();
            match load_model(&model_path(models_dir, name)) {
                Ok(mut model) => {
                    model.set_name(name);
                    info!(
                        model = name,
                        vocabulary = model.len(),
                        dim = model.dim(),
                        "Loaded embedding model"
                    );
                    store.insert(model);
                }
                Err(SocsemError::MissingResource(_)) => {
                    warn!("Model '{}' not found in '{}'.", name, models_dir.display());
                }
                Err(e) => return Err(e),
            }
        }

        Ok(store)
    }

    /// Insert a model, replacing and returning any model of the same name.
    pub fn insert(&mut self, model: EmbeddingModel) -> Option<EmbeddingModel> {
        match self.models.iter().position(|m| m.name() == model.name()) {
            Some(i) => Some(std::mem::replace(&mut self.models[i], model)),
            None => {
                self.models.push(model);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&EmbeddingModel> {
        self.models.iter().find(|m| m.name() == name)
    }

    /// Like `get`, but a missing model is a `MissingResource` error.
    pub fn require(&self, name: &str) -> Result<&EmbeddingModel, SocsemError> {
        self.get(name)
            .ok_or_else(|| SocsemError::MissingResource(format!("model '{}'", name)))
    }

    /// Remove a model, handing ownership to the caller.
    pub fn remove(&mut self, name: &str) -> Option<EmbeddingModel> {
        let i = self.models.iter().position(|m| m.name() == name)?;
        Some(self.models.remove(i))
    }

    pub fn names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmbeddingModel> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn into_models(self) -> Vec<EmbeddingModel> {
        self.models
    }
}

/// Path of a named model inside a models directory.
pub fn model_path(models_dir: &Path, name: &str) -> PathBuf {
    models_dir.join(format!("{}.{}", name, MODEL_EXTENSION))
}

/// Read a single model file.
pub fn load_model(path: &Path) -> Result<EmbeddingModel, SocsemError> {
    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SocsemError::MissingResource(path.display().to_string()),
        _ => SocsemError::Io(format!("{}: {}", path.display(), e)),
    })?;
    serde_json::from_str(&contents)
        .map_err(|e| SocsemError::Serialization(format!("{}: {}", path.display(), e)))
}

/// Write a model to `{models_dir}/{name}.model`, creating the directory.
pub fn save_model(models_dir: &Path, model: &EmbeddingModel) -> Result<PathBuf, SocsemError> {
    fs::create_dir_all(models_dir)?;
    let path = model_path(models_dir, model.name());
    let json = serde_json::to_string(model)?;
    fs::write(&path, json)?;
    info!(model = model.name(), path = %path.display(), "Saved embedding model");
    Ok(path)
}
