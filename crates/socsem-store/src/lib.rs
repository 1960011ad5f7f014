// crates/socsem-store/src/lib.rs
//
// socsem-store: Persistence for socsem.
//
// Loads and saves per-community embedding models and reads the curated CSV
// tables (pole words, blacklist lexicon) used by the analysis engines.

mod csv_table;

pub mod blacklist;
pub mod models;
pub mod pole_words;

pub use blacklist::{load_blacklist, read_blacklist};
pub use models::{load_model, model_path, save_model, ModelStore, MODEL_EXTENSION};
pub use pole_words::{load_pole_words, read_pole_words, CsvPoleWordSource};
