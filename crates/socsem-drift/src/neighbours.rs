// crates/socsem-drift/src/neighbours.rs
//
// Nearest-neighbour comparison of a token across two community models.

use std::cmp::Ordering;

use socsem_core::{round2, EmbeddingModel, Neighbour, NeighbourKind, NeighbourVector, SocsemError};

/// Nearest neighbours of `lex` in each of two models.
///
/// For each model, up to `topn` most similar tokens are scanned, tokens seen
/// `freq_min` times or fewer are dropped, and the `k` closest remain, with
/// distance `1 - similarity` rounded to two decimals. Returns the model-1 and
/// model-2 tables, tagged 1 and 2.
pub fn get_nearest_neighbours_models(
    lex: &str,
    freq_min: u64,
    model_1: &EmbeddingModel,
    model_2: &EmbeddingModel,
    topn: usize,
    k: usize,
) -> Result<(Vec<Neighbour>, Vec<Neighbour>), SocsemError> {
    let first = nearest_neighbours(lex, freq_min, model_1, 1, topn, k)?;
    let second = nearest_neighbours(lex, freq_min, model_2, 2, topn, k)?;
    Ok((first, second))
}

fn nearest_neighbours(
    lex: &str,
    freq_min: u64,
    model: &EmbeddingModel,
    tag: u8,
    topn: usize,
    k: usize,
) -> Result<Vec<Neighbour>, SocsemError> {
    let mut neighbours: Vec<Neighbour> = model
        .most_similar(lex, topn)?
        .into_iter()
        .filter_map(|(word, sim)| {
            let freq = model.count(&word)?;
            (freq > freq_min).then(|| Neighbour {
                model: tag,
                word,
                sem_dist: round2(1.0 - sim),
                freq,
            })
        })
        .collect();

    neighbours.sort_by(|a, b| a.sem_dist.partial_cmp(&b.sem_dist).unwrap_or(Ordering::Equal));
    neighbours.truncate(k);
    Ok(neighbours)
}

/// A token's vector followed by those of its `k` nearest neighbours.
///
/// Feeds 2-D projections of a community's neighbourhood around `lex`.
pub fn neighbour_vectors(
    lex: &str,
    community: &str,
    model: &EmbeddingModel,
    k: usize,
) -> Result<Vec<NeighbourVector>, SocsemError> {
    let mut rows = Vec::with_capacity(k + 1);
    rows.push(NeighbourVector {
        lex: lex.to_string(),
        kind: NeighbourKind::Center,
        community: community.to_string(),
        sim: None,
        freq: None,
        vector: model.vector(lex)?.to_vec(),
    });

    for (word, sim) in model.most_similar(lex, k)? {
        let Some(record) = model.record(&word) else {
            continue;
        };
        rows.push(NeighbourVector {
            lex: word,
            kind: NeighbourKind::Nb,
            community: community.to_string(),
            sim: Some(sim),
            freq: Some(record.count),
            vector: record.vector.clone(),
        });
    }
    Ok(rows)
}
