// crates/socsem-core/src/model.rs
//
// In-memory word embedding model for a single community.
//
// A model is an ordered list of per-token records (token, count, vector) plus a
// token -> index map rebuilt from that order. Index i always refers to the
// i-th record, so reordering the records is how vocabularies are re-ranked.

use std::collections::{HashMap, HashSet};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::SocsemError;
use crate::similarity::{cosine_similarity, l2_norm};

/// A single vocabulary entry of an embedding model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// The vocabulary token.
    pub token: String,
    /// Number of occurrences of the token in the training corpus.
    pub count: u64,
    /// Dense embedding vector.
    pub vector: Vec<f32>,
}

impl TokenRecord {
    pub fn new(token: impl Into<String>, count: u64, vector: Vec<f32>) -> Self {
        Self {
            token: token.into(),
            count,
            vector,
        }
    }
}

/// On-disk shape of an embedding model.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModelFile {
    name: String,
    dim: usize,
    tokens: Vec<TokenRecord>,
}

/// A named word embedding model.
///
/// Invariants: every vector has `dim` components and tokens are unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ModelFile", into = "ModelFile")]
pub struct EmbeddingModel {
    name: String,
    dim: usize,
    records: Vec<TokenRecord>,
    key_to_index: HashMap<String, usize>,
}

impl TryFrom<ModelFile> for EmbeddingModel {
    type Error = SocsemError;

    fn try_from(file: ModelFile) -> Result<Self, Self::Error> {
        EmbeddingModel::from_ranked(file.name, file.dim, file.tokens)
    }
}

impl From<EmbeddingModel> for ModelFile {
    fn from(model: EmbeddingModel) -> Self {
        ModelFile {
            name: model.name,
            dim: model.dim,
            tokens: model.records,
        }
    }
}

impl EmbeddingModel {
    /// Build a model, ranking records by descending count.
    ///
    /// The sort is stable, so tokens with equal counts keep their input order.
    pub fn new(
        name: impl Into<String>,
        dim: usize,
        mut records: Vec<TokenRecord>,
    ) -> Result<Self, SocsemError> {
        records.sort_by(|a, b| b.count.cmp(&a.count));
        Self::from_ranked(name, dim, records)
    }

    /// Build a model keeping the records in the given order.
    pub fn from_ranked(
        name: impl Into<String>,
        dim: usize,
        records: Vec<TokenRecord>,
    ) -> Result<Self, SocsemError> {
        let name = name.into();
        let mut key_to_index = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if record.vector.len() != dim {
                return Err(SocsemError::DimensionMismatch {
                    expected: dim,
                    actual: record.vector.len(),
                });
            }
            if key_to_index.insert(record.token.clone(), index).is_some() {
                return Err(SocsemError::InvalidInput(format!(
                    "duplicate token '{}' in model '{}'",
                    record.token, name
                )));
            }
        }

        Ok(Self {
            name,
            dim,
            records,
            key_to_index,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Vector dimensionality.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Vocabulary size.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.key_to_index.contains_key(token)
    }

    /// Index of a token in the model's rank order.
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.key_to_index.get(token).copied()
    }

    /// Token at a given index.
    pub fn key_at(&self, index: usize) -> Option<&str> {
        self.records.get(index).map(|r| r.token.as_str())
    }

    /// Occurrence count of a token.
    pub fn count(&self, token: &str) -> Option<u64> {
        self.record(token).map(|r| r.count)
    }

    /// Full record of a token.
    pub fn record(&self, token: &str) -> Option<&TokenRecord> {
        self.index_of(token).map(|i| &self.records[i])
    }

    /// Vector of a token. Fails with `VocabularyMismatch` when absent.
    pub fn vector(&self, token: &str) -> Result<&[f32], SocsemError> {
        self.record(token)
            .map(|r| r.vector.as_slice())
            .ok_or_else(|| SocsemError::missing_token(token, &self.name))
    }

    /// Tokens in rank order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.token.as_str())
    }

    /// Records in rank order.
    pub fn records(&self) -> &[TokenRecord] {
        &self.records
    }

    /// Unit-length copy of a token's vector. Zero vectors stay zero.
    pub fn normed_vector(&self, token: &str) -> Result<Vec<f32>, SocsemError> {
        let v = self.vector(token)?;
        let norm = l2_norm(v);
        if norm == 0.0 {
            return Ok(v.to_vec());
        }
        Ok(v.iter().map(|x| (*x as f64 / norm) as f32).collect())
    }

    /// N x D matrix of unit-length vectors in rank order.
    pub fn normed_matrix(&self) -> Array2<f64> {
        let mut m = Array2::<f64>::zeros((self.records.len(), self.dim));
        for (i, record) in self.records.iter().enumerate() {
            let norm = l2_norm(&record.vector);
            if norm == 0.0 {
                continue;
            }
            for (j, x) in record.vector.iter().enumerate() {
                m[[i, j]] = *x as f64 / norm;
            }
        }
        m
    }

    /// Rebuild the vocabulary to exactly `order`, in that order.
    ///
    /// Counts and vectors move with their tokens; tokens not listed are dropped.
    /// Every listed token must already be in the model.
    pub fn retain_ranked<S: AsRef<str>>(&mut self, order: &[S]) -> Result<(), SocsemError> {
        let mut seen = HashSet::with_capacity(order.len());
        for token in order {
            let token = token.as_ref();
            if !self.key_to_index.contains_key(token) {
                return Err(SocsemError::missing_token(token, &self.name));
            }
            if !seen.insert(token) {
                return Err(SocsemError::InvalidInput(format!(
                    "token '{}' listed twice",
                    token
                )));
            }
        }

        let mut slots: Vec<Option<TokenRecord>> =
            std::mem::take(&mut self.records).into_iter().map(Some).collect();
        let mut records = Vec::with_capacity(order.len());
        let mut key_to_index = HashMap::with_capacity(order.len());
        for token in order {
            let old = self.key_to_index[token.as_ref()];
            if let Some(record) = slots[old].take() {
                key_to_index.insert(record.token.clone(), records.len());
                records.push(record);
            }
        }

        self.records = records;
        self.key_to_index = key_to_index;
        Ok(())
    }

    /// Multiply every vector (as a row) by a D x D matrix: `v <- v . m`.
    pub fn transform(&mut self, m: &Array2<f64>) -> Result<(), SocsemError> {
        let (rows, cols) = m.dim();
        if rows != self.dim || cols != self.dim {
            return Err(SocsemError::DimensionMismatch {
                expected: self.dim,
                actual: if rows != self.dim { rows } else { cols },
            });
        }

        let mut out = vec![0.0_f64; self.dim];
        for record in self.records.iter_mut() {
            out.iter_mut().for_each(|x| *x = 0.0);
            for (i, v) in record.vector.iter().enumerate() {
                let v = *v as f64;
                for (j, acc) in out.iter_mut().enumerate() {
                    *acc += v * m[[i, j]];
                }
            }
            for (dst, src) in record.vector.iter_mut().zip(out.iter()) {
                *dst = *src as f32;
            }
        }
        Ok(())
    }

    /// Up to `topn` tokens most similar to `token` by cosine similarity.
    ///
    /// The query token itself is excluded. Results are sorted by descending
    /// similarity; equal similarities keep rank order.
    pub fn most_similar(&self, token: &str, topn: usize) -> Result<Vec<(String, f64)>, SocsemError> {
        let query_index = self
            .index_of(token)
            .ok_or_else(|| SocsemError::missing_token(token, &self.name))?;
        let query = &self.records[query_index].vector;

        let mut scored: Vec<(usize, f64)> = self
            .records
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != query_index)
            .map(|(i, r)| (i, cosine_similarity(query, &r.vector)))
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(topn);

        Ok(scored
            .into_iter()
            .map(|(i, sim)| (self.records[i].token.clone(), sim))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_model() -> EmbeddingModel {
        EmbeddingModel::new(
            "toy",
            2,
            vec![
                TokenRecord::new("rare", 1, vec![0.0, 1.0]),
                TokenRecord::new("common", 10, vec![1.0, 0.0]),
                TokenRecord::new("middle", 5, vec![1.0, 1.0]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn new_ranks_by_descending_count() {
        let model = toy_model();
        let tokens: Vec<&str> = model.tokens().collect();
        assert_eq!(tokens, vec!["common", "middle", "rare"]);
        assert_eq!(model.index_of("rare"), Some(2));
        assert_eq!(model.count("middle"), Some(5));
    }

    #[test]
    fn rejects_wrong_dimension() {
        let err = EmbeddingModel::new("bad", 3, vec![TokenRecord::new("a", 1, vec![1.0])]);
        assert!(matches!(err, Err(SocsemError::DimensionMismatch { expected: 3, actual: 1 })));
    }

    #[test]
    fn rejects_duplicate_tokens() {
        let err = EmbeddingModel::new(
            "dup",
            1,
            vec![TokenRecord::new("a", 1, vec![1.0]), TokenRecord::new("a", 2, vec![2.0])],
        );
        assert!(matches!(err, Err(SocsemError::InvalidInput(_))));
    }

    #[test]
    fn missing_vector_is_vocabulary_mismatch() {
        let model = toy_model();
        match model.vector("absent") {
            Err(SocsemError::VocabularyMismatch { token, model }) => {
                assert_eq!(token, "absent");
                assert_eq!(model, "toy");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn retain_ranked_reorders_and_prunes() {
        let mut model = toy_model();
        model.retain_ranked(&["rare", "common"]).unwrap();
        assert_eq!(model.len(), 2);
        assert_eq!(model.index_of("rare"), Some(0));
        assert_eq!(model.index_of("common"), Some(1));
        assert!(!model.contains("middle"));
        assert_eq!(model.count("rare"), Some(1));
        assert_eq!(model.vector("common").unwrap(), &[1.0, 0.0]);
    }

    #[test]
    fn retain_ranked_failure_leaves_model_intact() {
        let mut model = toy_model();
        assert!(model.retain_ranked(&["common", "absent"]).is_err());
        let tokens: Vec<&str> = model.tokens().collect();
        assert_eq!(tokens, vec!["common", "middle", "rare"]);
        assert_eq!(model.vector("rare").unwrap(), &[0.0, 1.0]);
    }

    #[test]
    fn transform_applies_row_vector_product() {
        let mut model = toy_model();
        // Swap the two axes.
        let m = ndarray::array![[0.0, 1.0], [1.0, 0.0]];
        model.transform(&m).unwrap();
        assert_eq!(model.vector("common").unwrap(), &[0.0, 1.0]);
        assert_eq!(model.vector("rare").unwrap(), &[1.0, 0.0]);
    }

    #[test]
    fn transform_rejects_wrong_shape() {
        let mut model = toy_model();
        let m = Array2::<f64>::eye(3);
        assert!(matches!(
            model.transform(&m),
            Err(SocsemError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn most_similar_excludes_query_and_sorts() {
        let model = toy_model();
        let sims = model.most_similar("common", 10).unwrap();
        assert_eq!(sims.len(), 2);
        assert_eq!(sims[0].0, "middle");
        assert_eq!(sims[1].0, "rare");
        assert!(sims[0].1 > sims[1].1);
    }

    #[test]
    fn normed_matrix_rows_have_unit_length() {
        let model = toy_model();
        let m = model.normed_matrix();
        for row in m.rows() {
            let norm: f64 = row.iter().map(|x| x * x).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn json_roundtrip_preserves_order() {
        let mut model = toy_model();
        model.retain_ranked(&["rare", "middle", "common"]).unwrap();
        let json = serde_json::to_string(&model).unwrap();
        let decoded: EmbeddingModel = serde_json::from_str(&json).unwrap();
        let tokens: Vec<&str> = decoded.tokens().collect();
        assert_eq!(tokens, vec!["rare", "middle", "common"]);
        assert_eq!(decoded.dim(), 2);
    }

    #[test]
    fn deserialize_validates_dimensions() {
        let json = r#"{"name":"x","dim":2,"tokens":[{"token":"a","count":1,"vector":[1.0]}]}"#;
        assert!(serde_json::from_str::<EmbeddingModel>(json).is_err());
    }
}
