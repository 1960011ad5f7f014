// crates/socsem-drift/src/procrustes.rs
//
// Orthogonal Procrustes alignment of two embedding spaces.
//
// Separately trained models live in arbitrarily rotated coordinate systems.
// The best-fit orthogonal map R between the two spaces is learned over the
// shared vocabulary (R = U.Vᵀ from the SVD of otherᵀ.base) and then applied to
// every vector of the other model, so words can be compared across models.

use std::collections::HashSet;

use ndarray::Array2;
use tracing::info;

use socsem_core::{EmbeddingModel, SocsemError};

use crate::linalg::svd;
use crate::vocab::{intersection_align, AlignedModelPair};

/// Fewest shared tokens a rotation is fitted on.
pub const MIN_SHARED_VOCABULARY: usize = 2;

/// Result of aligning one model onto another.
#[derive(Debug, Clone)]
pub struct ProcrustesAlignment {
    /// The base model, pruned to the shared vocabulary. Vectors untouched.
    pub base: EmbeddingModel,
    /// The other model with all of its vectors rotated into the base frame.
    pub other: EmbeddingModel,
    /// The D x D orthogonal map applied to `other` (row vectors: v . R).
    pub rotation: Array2<f64>,
    /// Number of tokens the rotation was fitted on.
    pub shared_vocabulary: usize,
}

impl ProcrustesAlignment {
    /// Intersect the aligned models into an index-aligned pair for comparison.
    pub fn into_aligned_pair(self) -> Result<AlignedModelPair, SocsemError> {
        intersection_align(self.base, self.other, None)
    }
}

/// Rotate `other` into the coordinate frame of `base`.
///
/// Both models are consumed. `base` comes back pruned to the shared (and
/// optionally `words`-restricted) vocabulary; `other` keeps its full
/// vocabulary, every vector rotated.
pub fn procrustes_align(
    base: EmbeddingModel,
    other: EmbeddingModel,
    words: Option<&HashSet<String>>,
) -> Result<ProcrustesAlignment, SocsemError> {
    if base.dim() != other.dim() {
        return Err(SocsemError::DimensionMismatch {
            expected: base.dim(),
            actual: other.dim(),
        });
    }

    let pair = intersection_align(base, other.clone(), words)?;
    let shared_vocabulary = pair.len();
    if shared_vocabulary < MIN_SHARED_VOCABULARY {
        return Err(SocsemError::DegenerateAlignment(format!(
            "insufficient shared vocabulary between '{}' and '{}': {} token(s), need at least {}",
            pair.base().name(),
            pair.other().name(),
            shared_vocabulary,
            MIN_SHARED_VOCABULARY
        )));
    }

    let rotation = orthogonal_map(&pair.base().normed_matrix(), &pair.other().normed_matrix())?;
    let (base, _) = pair.into_parts();

    let mut other = other;
    other.transform(&rotation)?;

    info!(
        base = base.name(),
        other = other.name(),
        shared = shared_vocabulary,
        "Procrustes-aligned models"
    );

    Ok(ProcrustesAlignment {
        base,
        other,
        rotation,
        shared_vocabulary,
    })
}

/// Orthogonal R minimising ‖other . R − base‖ for row-aligned N x D matrices.
pub fn orthogonal_map(base: &Array2<f64>, other: &Array2<f64>) -> Result<Array2<f64>, SocsemError> {
    if base.dim() != other.dim() {
        return Err(SocsemError::DimensionMismatch {
            expected: base.ncols(),
            actual: other.ncols(),
        });
    }
    if base.nrows() == 0 {
        return Err(SocsemError::DegenerateAlignment(
            "insufficient shared vocabulary: no rows to fit".to_string(),
        ));
    }

    let m = other.t().dot(base);
    let decomposition = svd(&m)?;
    let rotation = decomposition.u.dot(&decomposition.vt);

    if rotation.iter().any(|x| !x.is_finite()) {
        return Err(SocsemError::DegenerateAlignment(
            "rotation contains non-finite values".to_string(),
        ));
    }
    Ok(rotation)
}
