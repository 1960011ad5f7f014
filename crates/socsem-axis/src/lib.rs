// crates/socsem-axis/src/lib.rs
//
// socsem-axis: Semantic axes and token projections for socsem.
//
// A semantic axis runs between two pole words, each averaged with its curated
// pole-word list in a community model. Projecting tokens onto the same axis in
// several communities shows which side of a contrast each community takes.

pub mod aggregate;
pub mod axis;

pub use aggregate::aggregate_proj_sims;
pub use axis::{
    get_axis_sim, get_axis_sims, get_pole_avg, load_pole_avg, make_sem_axis_avg, SemanticAxis,
};
