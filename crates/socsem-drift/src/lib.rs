// crates/socsem-drift/src/lib.rs
//
// socsem-drift: Alignment and comparison of community embedding models.
//
// Separately trained models are first reduced to a shared, frequency-ranked
// vocabulary, then rotated into a common coordinate frame with orthogonal
// Procrustes alignment. Once aligned, per-token cosine distances expose words
// whose meaning differs between communities, and neighbour sets show how.

pub mod candidates;
pub mod distance;
pub mod linalg;
pub mod neighbours;
pub mod procrustes;
pub mod vocab;

pub use candidates::get_change_candidates;
pub use distance::{measure_distances, measure_distances_with, MissingTokenPolicy};
pub use neighbours::{get_nearest_neighbours_models, neighbour_vectors};
pub use procrustes::{orthogonal_map, procrustes_align, ProcrustesAlignment, MIN_SHARED_VOCABULARY};
pub use vocab::{intersection_align, AlignedModelPair};
