// crates/socsem-axis/src/axis.rs
//
// Semantic axes built from curated pole words.
//
// Each pole is the average of a seed word's vector and the vectors of its
// top-k curated pole words. The axis is the difference between the two pole
// averages; projecting a token onto it (cosine similarity) scores which pole
// the token leans towards in a given community model.

use tracing::debug;

use socsem_core::{
    cosine_similarity, AxisSimRow, EmbeddingModel, PoleWordSource, PoleWordTable, SocsemError,
};

/// Direction from one pole to another in a model's embedding space.
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticAxis {
    /// Seed word of the pole the axis points towards.
    pub positive_pole: String,
    /// Seed word of the pole the axis points away from.
    pub negative_pole: String,
    pub vector: Vec<f32>,
}

impl SemanticAxis {
    /// Cosine similarity of a vector with the axis, in [-1, 1].
    pub fn similarity(&self, v: &[f32]) -> f64 {
        cosine_similarity(v, &self.vector)
    }
}

/// Mean of the seed vector and the vectors of the top-k included pole words.
///
/// Pole words absent from the model are skipped; the seed word must be present.
pub fn get_pole_avg(
    model: &EmbeddingModel,
    seed_word: &str,
    table: &PoleWordTable,
    k: usize,
) -> Result<Vec<f32>, SocsemError> {
    let mut sum: Vec<f64> = model.vector(seed_word)?.iter().map(|x| *x as f64).collect();
    let mut n = 1usize;

    for word in table.top_included(k) {
        let Some(record) = model.record(word) else {
            continue;
        };
        for (acc, x) in sum.iter_mut().zip(record.vector.iter()) {
            *acc += *x as f64;
        }
        n += 1;
    }

    debug!(model = model.name(), seed = seed_word, vectors = n, "Averaged pole");
    Ok(sum.into_iter().map(|x| (x / n as f64) as f32).collect())
}

/// `get_pole_avg` with the table looked up for the model's community.
pub fn load_pole_avg(
    model: &EmbeddingModel,
    source: &dyn PoleWordSource,
    seed_word: &str,
    k: usize,
) -> Result<Vec<f32>, SocsemError> {
    let table = source.pole_words(model.name(), seed_word)?;
    get_pole_avg(model, seed_word, &table, k)
}

/// Axis pointing from the `pole_word_2` pole towards the `pole_word_1` pole.
pub fn make_sem_axis_avg(
    model: &EmbeddingModel,
    source: &dyn PoleWordSource,
    pole_word_1: &str,
    pole_word_2: &str,
    k: usize,
) -> Result<SemanticAxis, SocsemError> {
    let pole_1 = load_pole_avg(model, source, pole_word_1, k)?;
    let pole_2 = load_pole_avg(model, source, pole_word_2, k)?;

    Ok(SemanticAxis {
        positive_pole: pole_word_1.to_string(),
        negative_pole: pole_word_2.to_string(),
        vector: pole_1.iter().zip(pole_2.iter()).map(|(a, b)| a - b).collect(),
    })
}

/// Similarity of a token with the axis between two poles in one model.
pub fn get_axis_sim(
    lex: &str,
    pole_word_1: &str,
    pole_word_2: &str,
    model: &EmbeddingModel,
    source: &dyn PoleWordSource,
    k: usize,
) -> Result<f64, SocsemError> {
    let axis = make_sem_axis_avg(model, source, pole_word_1, pole_word_2, k)?;
    Ok(axis.similarity(model.vector(lex)?))
}

/// Axis similarity of every token in every model.
///
/// Rows are ordered token-major, model-minor. Each model's axis is built once.
pub fn get_axis_sims<'m, S, I>(
    lexs: &[S],
    models: I,
    pole_words: (&str, &str),
    source: &dyn PoleWordSource,
    k: usize,
) -> Result<Vec<AxisSimRow>, SocsemError>
where
    S: AsRef<str>,
    I: IntoIterator<Item = &'m EmbeddingModel>,
{
    let axes = models
        .into_iter()
        .map(|model| {
            make_sem_axis_avg(model, source, pole_words.0, pole_words.1, k).map(|axis| (model, axis))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::with_capacity(lexs.len() * axes.len());
    for lex in lexs {
        let lex = lex.as_ref();
        for (model, axis) in &axes {
            rows.push(AxisSimRow {
                model: model.name().to_string(),
                lex: lex.to_string(),
                sim: axis.similarity(model.vector(lex)?),
            });
        }
    }
    Ok(rows)
}
