// crates/socsem-core/src/error.rs

use thiserror::Error;

/// Error types shared by every socsem crate.
#[derive(Debug, Error)]
pub enum SocsemError {
    /// A model file, pole-word table or blacklist could not be found.
    #[error("Missing resource: {0}")]
    MissingResource(String),

    /// A token expected in a model's vocabulary is absent.
    #[error("Token '{token}' not in vocabulary of model '{model}'")]
    VocabularyMismatch { token: String, model: String },

    /// Procrustes alignment has too little shared data to produce a rotation.
    #[error("Degenerate alignment: {0}")]
    DegenerateAlignment(String),

    /// A CSV table is missing required columns or has unparseable values.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Vector dimensionality does not match.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Caller-supplied arguments are invalid.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Filesystem error.
    #[error("IO error: {0}")]
    Io(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SocsemError {
    /// Shorthand for a missing-token error.
    pub fn missing_token(token: &str, model: &str) -> Self {
        SocsemError::VocabularyMismatch {
            token: token.to_string(),
            model: model.to_string(),
        }
    }
}

impl From<std::io::Error> for SocsemError {
    fn from(e: std::io::Error) -> Self {
        SocsemError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for SocsemError {
    fn from(e: serde_json::Error) -> Self {
        SocsemError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for SocsemError {
    fn from(e: toml::de::Error) -> Self {
        SocsemError::Config(e.to_string())
    }
}
