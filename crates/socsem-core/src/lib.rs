// crates/socsem-core/src/lib.rs
//
// socsem-core: Core types, errors and collaborator traits for socsem.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines the embedding model entity, corpora and the training adapter,
// the analysis configuration, result-table rows, and the shared error type.

pub mod config;
pub mod corpus;
pub mod error;
pub mod model;
pub mod pole;
pub mod similarity;
pub mod table;
pub mod traits;
pub mod training;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use socsem_core::EmbeddingModel;`

pub use config::{expand_tilde, AnalysisConfig};
pub use corpus::{Corpus, DEFAULT_MIN_DOC_TOKENS};
pub use error::SocsemError;
pub use model::{EmbeddingModel, TokenRecord};
pub use pole::{Blacklist, BlacklistEntry, PoleWord, PoleWordTable, EXCLUDE_MARKER, PROPER_NOUN_CATEGORY};
pub use similarity::{cosine_distance, cosine_similarity, l2_norm, round2};
pub use table::{
    AxisSimRow, ChangeCandidate, DistanceRow, Neighbour, NeighbourKind, NeighbourVector,
    ProjSimRow, ProjSimTable,
};
pub use traits::{EmbeddingTrainer, PoleWordSource};
pub use training::{train_model, TrainingConfig};
