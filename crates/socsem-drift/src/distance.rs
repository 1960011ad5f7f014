// crates/socsem-drift/src/distance.rs
//
// Per-token semantic distance between two (aligned) models.

use tracing::warn;

use socsem_core::{cosine_distance, DistanceRow, EmbeddingModel, SocsemError};

/// What to do with a token of the first model that the second model lacks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingTokenPolicy {
    /// Fail with `VocabularyMismatch`.
    #[default]
    Propagate,
    /// Log a warning and leave the token out of the table.
    Skip,
}

/// Cosine distance of every token of `model_1` to the same token in `model_2`.
///
/// Rows follow `model_1`'s rank order. A token missing from `model_2` is a
/// `VocabularyMismatch` error.
pub fn measure_distances(
    model_1: &EmbeddingModel,
    model_2: &EmbeddingModel,
) -> Result<Vec<DistanceRow>, SocsemError> {
    measure_distances_with(model_1, model_2, MissingTokenPolicy::Propagate)
}

/// `measure_distances` with an explicit policy for missing tokens.
pub fn measure_distances_with(
    model_1: &EmbeddingModel,
    model_2: &EmbeddingModel,
    policy: MissingTokenPolicy,
) -> Result<Vec<DistanceRow>, SocsemError> {
    if model_1.dim() != model_2.dim() {
        return Err(SocsemError::DimensionMismatch {
            expected: model_1.dim(),
            actual: model_2.dim(),
        });
    }

    let mut rows = Vec::with_capacity(model_1.len());
    let mut skipped = 0usize;

    for record in model_1.records() {
        let Some(other) = model_2.record(&record.token) else {
            match policy {
                MissingTokenPolicy::Propagate => {
                    return Err(SocsemError::missing_token(&record.token, model_2.name()));
                }
                MissingTokenPolicy::Skip => {
                    warn!(
                        token = %record.token,
                        model = model_2.name(),
                        "Token missing from second model, skipping"
                    );
                    skipped += 1;
                    continue;
                }
            }
        };

        rows.push(DistanceRow {
            lex: record.token.clone(),
            dist_sem: cosine_distance(&record.vector, &other.vector),
            freq_1: record.count,
            freq_2: other.count,
        });
    }

    if skipped > 0 {
        warn!(
            skipped,
            model_1 = model_1.name(),
            model_2 = model_2.name(),
            "Skipped tokens without a counterpart"
        );
    }
    Ok(rows)
}
