// crates/socsem-store/src/blacklist.rs
//
// Blacklist lexicon CSV with columns `Lex`, `Excl` and `Category`.

use std::io::Read;
use std::path::Path;

use socsem_core::{Blacklist, BlacklistEntry, SocsemError};

use crate::csv_table::CsvTable;

const COLUMNS: [&str; 3] = ["Lex", "Excl", "Category"];

/// Read the blacklist from a CSV file.
pub fn load_blacklist(path: &Path) -> Result<Blacklist, SocsemError> {
    parse_table(CsvTable::open(path, &COLUMNS)?)
}

/// Read the blacklist from CSV data.
pub fn read_blacklist<R: Read>(reader: R) -> Result<Blacklist, SocsemError> {
    parse_table(CsvTable::from_reader(reader, &COLUMNS)?)
}

fn parse_table(table: CsvTable) -> Result<Blacklist, SocsemError> {
    let mut entries = Vec::with_capacity(table.records.len());
    for (line, record) in table.records.iter().enumerate() {
        let Some(lex) = table.field(record, 0) else {
            continue;
        };
        let excl = parse_flag(table.field(record, 1)).ok_or_else(|| {
            SocsemError::Schema(format!(
                "row {}: Excl '{}' is not a boolean",
                line + 1,
                table.field(record, 1).unwrap_or_default()
            ))
        })?;
        entries.push(BlacklistEntry {
            lex: lex.to_string(),
            excl,
            category: table.field(record, 2).map(str::to_string),
        });
    }
    Ok(Blacklist::new(entries))
}

fn parse_flag(raw: Option<&str>) -> Option<bool> {
    match raw {
        None => Some(false),
        Some("True" | "true" | "TRUE" | "1") => Some(true),
        Some("False" | "false" | "FALSE" | "0") => Some(false),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_and_categories() {
        let data = "Lex,Excl,Category\nthe,True,\ntrump,False,propNoun\nmask,,noun\n";
        let blacklist = read_blacklist(data.as_bytes()).unwrap();
        assert_eq!(blacklist.entries.len(), 3);
        assert!(blacklist.entries[0].excl);
        assert!(!blacklist.entries[2].excl);

        let excluded = blacklist.excluded(false);
        assert!(excluded.contains("the"));
        assert!(excluded.contains("trump"));
        assert!(!excluded.contains("mask"));
    }

    #[test]
    fn rejects_unparseable_flag() {
        let data = "Lex,Excl,Category\nthe,sometimes,\n";
        assert!(matches!(read_blacklist(data.as_bytes()), Err(SocsemError::Schema(_))));
    }

    #[test]
    fn rejects_missing_category_column() {
        let data = "Lex,Excl\nthe,True\n";
        assert!(matches!(read_blacklist(data.as_bytes()), Err(SocsemError::Schema(_))));
    }
}
