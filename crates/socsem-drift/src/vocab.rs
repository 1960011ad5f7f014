// crates/socsem-drift/src/vocab.rs
//
// Vocabulary intersection of two embedding models.
//
// Both models are cut down to their shared vocabulary and re-indexed into a
// single rank order (descending summed frequency), so index i refers to the
// same token in both. Values are never merged or averaged; this is pure
// re-indexing.

use std::collections::HashSet;

use tracing::debug;

use socsem_core::{EmbeddingModel, SocsemError};

/// Two models with identical vocabularies in identical index order.
#[derive(Debug, Clone)]
pub struct AlignedModelPair {
    base: EmbeddingModel,
    other: EmbeddingModel,
}

impl AlignedModelPair {
    pub fn base(&self) -> &EmbeddingModel {
        &self.base
    }

    pub fn other(&self) -> &EmbeddingModel {
        &self.other
    }

    /// Hand both models back to the caller.
    pub fn into_parts(self) -> (EmbeddingModel, EmbeddingModel) {
        (self.base, self.other)
    }

    /// Size of the shared vocabulary.
    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// Shared tokens in rank order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.base.tokens()
    }
}

/// Intersect the vocabularies of two models.
///
/// Consumes both models; clone beforehand to keep the originals. When `words`
/// is given the shared vocabulary is further restricted to it. Shared tokens
/// are ranked by `count_base + count_other` descending, ties by token.
///
/// A pair that is already aligned is returned unchanged. An empty
/// intersection yields two empty models.
pub fn intersection_align(
    mut base: EmbeddingModel,
    mut other: EmbeddingModel,
    words: Option<&HashSet<String>>,
) -> Result<AlignedModelPair, SocsemError> {
    let mut common: Vec<&str> = base
        .tokens()
        .filter(|t| other.contains(t))
        .filter(|t| words.map_or(true, |w| w.contains(*t)))
        .collect();

    if base.len() == common.len() && other.len() == common.len() && base.tokens().eq(other.tokens()) {
        debug!(shared = common.len(), "Vocabularies already aligned");
        return Ok(AlignedModelPair { base, other });
    }

    let summed = |t: &str| base.count(t).unwrap_or(0) + other.count(t).unwrap_or(0);
    common.sort_by(|a, b| summed(b).cmp(&summed(a)).then_with(|| a.cmp(b)));
    let order: Vec<String> = common.into_iter().map(str::to_string).collect();

    debug!(
        base = base.name(),
        other = other.name(),
        base_vocabulary = base.len(),
        other_vocabulary = other.len(),
        shared = order.len(),
        "Intersecting vocabularies"
    );

    base.retain_ranked(&order)?;
    other.retain_ranked(&order)?;

    Ok(AlignedModelPair { base, other })
}
