// crates/socsem-core/src/table.rs
//
// Row types of the result tables produced by the comparison and axis engines.
// Field names follow the published column names so serialized output can be
// joined with earlier analyses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Semantic distance of one shared token between two models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceRow {
    pub lex: String,
    /// Cosine distance in [0, 2].
    pub dist_sem: f64,
    pub freq_1: u64,
    pub freq_2: u64,
}

/// A token ranked as a candidate for semantic change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeCandidate {
    pub lex: String,
    /// Cosine distance rounded to two decimals.
    pub dist_sem: f64,
}

/// A nearest neighbour of a query token in one of two compared models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Neighbour {
    /// 1 for the first model, 2 for the second.
    pub model: u8,
    pub word: String,
    /// `1 - similarity`, rounded to two decimals.
    pub sem_dist: f64,
    pub freq: u64,
}

/// Whether a neighbour-vector row is the query token or one of its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeighbourKind {
    Center,
    Nb,
}

/// A token vector with its neighbourhood context, for downstream 2-D projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighbourVector {
    pub lex: String,
    #[serde(rename = "type")]
    pub kind: NeighbourKind,
    #[serde(rename = "subreddit")]
    pub community: String,
    pub sim: Option<f64>,
    pub freq: Option<u64>,
    #[serde(rename = "vec")]
    pub vector: Vec<f32>,
}

/// Similarity of a token to a semantic axis in one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSimRow {
    pub model: String,
    pub lex: String,
    pub sim: f64,
}

/// One token's axis similarities across models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjSimRow {
    pub lex: String,
    /// Similarity per model; `None` when the token was not scored in that model.
    pub sims: BTreeMap<String, Option<f64>>,
    #[serde(rename = "SimDiff")]
    pub sim_diff: Option<f64>,
}

/// Axis similarities pivoted to one row per token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjSimTable {
    /// Model columns, sorted by name.
    pub models: Vec<String>,
    pub rows: Vec<ProjSimRow>,
}
