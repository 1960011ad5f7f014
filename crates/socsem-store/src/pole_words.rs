// crates/socsem-store/src/pole_words.rs
//
// Curated pole-word tables stored as `{pole_words_dir}/{model}_{seed}.csv`
// with at least the columns `Word`, `Include` and `SemSim`.

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use socsem_core::{PoleWord, PoleWordSource, PoleWordTable, SocsemError};

use crate::csv_table::CsvTable;

const COLUMNS: [&str; 3] = ["Word", "Include", "SemSim"];

/// Read a pole-word table from a CSV file.
pub fn load_pole_words(path: &Path) -> Result<PoleWordTable, SocsemError> {
    parse_table(CsvTable::open(path, &COLUMNS)?)
}

/// Read a pole-word table from CSV data.
pub fn read_pole_words<R: Read>(reader: R) -> Result<PoleWordTable, SocsemError> {
    parse_table(CsvTable::from_reader(reader, &COLUMNS)?)
}

fn parse_table(table: CsvTable) -> Result<PoleWordTable, SocsemError> {
    let mut rows = Vec::with_capacity(table.records.len());
    for (line, record) in table.records.iter().enumerate() {
        let Some(word) = table.field(record, 0) else {
            continue;
        };
        let sem_sim = match table.field(record, 2) {
            Some(raw) => Some(raw.parse::<f64>().map_err(|_| {
                SocsemError::Schema(format!(
                    "row {}: SemSim '{}' is not a number",
                    line + 1,
                    raw
                ))
            })?),
            None => None,
        };
        rows.push(PoleWord {
            word: word.to_string(),
            include: table.field(record, 1).map(str::to_string),
            sem_sim,
        });
    }
    Ok(PoleWordTable::new(rows))
}

/// Pole-word tables read from a directory of CSV files.
#[derive(Debug, Clone)]
pub struct CsvPoleWordSource {
    dir: PathBuf,
}

impl CsvPoleWordSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the table for a seed word in a community model.
    pub fn table_path(&self, model_name: &str, seed_word: &str) -> PathBuf {
        self.dir.join(format!("{}_{}.csv", model_name, seed_word))
    }
}

impl PoleWordSource for CsvPoleWordSource {
    fn pole_words(&self, model_name: &str, seed_word: &str) -> Result<PoleWordTable, SocsemError> {
        let path = self.table_path(model_name, seed_word);
        let table = load_pole_words(&path)?;
        debug!(path = %path.display(), rows = table.rows.len(), "Loaded pole words");
        Ok(table)
    }
}
