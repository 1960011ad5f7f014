// crates/socsem-store/src/csv_table.rs
//
// Shared helpers for reading curated CSV tables with named columns.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use csv::StringRecord;

use socsem_core::SocsemError;

/// A CSV table with its header row resolved against required columns.
pub(crate) struct CsvTable {
    /// Position of each required column, in the order requested.
    pub columns: Vec<usize>,
    pub records: Vec<StringRecord>,
}

impl CsvTable {
    /// Read a CSV file, failing with `MissingResource` if it does not exist.
    pub fn open(path: &Path, required: &[&str]) -> Result<Self, SocsemError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SocsemError::MissingResource(path.display().to_string()),
            _ => SocsemError::Io(format!("{}: {}", path.display(), e)),
        })?;
        Self::from_reader(file, required)
            .map_err(|e| match e {
                SocsemError::Schema(msg) => SocsemError::Schema(format!("{}: {}", path.display(), msg)),
                other => other,
            })
    }

    /// Read CSV data from any reader.
    pub fn from_reader<R: Read>(reader: R, required: &[&str]) -> Result<Self, SocsemError> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = rdr
            .headers()
            .map_err(|e| SocsemError::Schema(e.to_string()))?
            .clone();

        let mut columns = Vec::with_capacity(required.len());
        let mut missing = Vec::new();
        for name in required {
            match headers.iter().position(|h| h.trim() == *name) {
                Some(i) => columns.push(i),
                None => missing.push(*name),
            }
        }
        if !missing.is_empty() {
            return Err(SocsemError::Schema(format!(
                "missing required column(s): {}",
                missing.join(", ")
            )));
        }

        let records = rdr
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SocsemError::Schema(e.to_string()))?;

        Ok(Self { columns, records })
    }

    /// Field of a required column in a record. Empty fields are `None`.
    pub fn field<'r>(&self, record: &'r StringRecord, column: usize) -> Option<&'r str> {
        record
            .get(self.columns[column])
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_columns_in_any_order() {
        let data = "SemSim,Extra,Word\n0.5,x,virus\n";
        let table = CsvTable::from_reader(data.as_bytes(), &["Word", "SemSim"]).unwrap();
        assert_eq!(table.columns, vec![2, 0]);
        let record = &table.records[0];
        assert_eq!(table.field(record, 0), Some("virus"));
        assert_eq!(table.field(record, 1), Some("0.5"));
    }

    #[test]
    fn reports_missing_columns() {
        let data = "Word\nvirus\n";
        match CsvTable::from_reader(data.as_bytes(), &["Word", "Include", "SemSim"]) {
            Err(SocsemError::Schema(msg)) => {
                assert!(msg.contains("Include"));
                assert!(msg.contains("SemSim"));
            }
            _ => panic!("expected schema error"),
        }
    }

    #[test]
    fn empty_field_is_none() {
        let data = "Word,Include\nvirus,\n";
        let table = CsvTable::from_reader(data.as_bytes(), &["Word", "Include"]).unwrap();
        assert_eq!(table.field(&table.records[0], 1), None);
    }

    #[test]
    fn missing_file_is_missing_resource() {
        let err = CsvTable::open(Path::new("/nonexistent/socsem/table.csv"), &["Word"]);
        assert!(matches!(err, Err(SocsemError::MissingResource(_))));
    }
}
