// ============================================================
// Layer 4 — CSV Passage Loader
// ============================================================
// Reads the passage database from a CSV file with a header row.
// Only the `context` column is used; every other column is
// ignored. Rows keep their file order, which matters because
// the extractive answerer breaks score ties by position.
//
// Example file:
//   id,title,context
//   1,Origins,"The virus was first identified in ..."
//   2,Spread,"Transmission happens mainly through ..."
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{io::Read, path::PathBuf};

use crate::domain::traits::PassageSource;

/// Name of the column holding the passage text
pub const CONTEXT_COLUMN: &str = "context";

/// Loads passages from the `context` column of a CSV file.
/// Implements the PassageSource trait from Layer 3.
pub struct CsvPassageLoader {
    path: PathBuf,
}

impl CsvPassageLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PassageSource for CsvPassageLoader {
    fn load_all(&self) -> Result<Vec<String>> {
        let file = std::fs::File::open(&self.path)
            .with_context(|| format!("Cannot open database '{}'", self.path.display()))?;

        let passages = read_context_column(file)
            .with_context(|| format!("Cannot read database '{}'", self.path.display()))?;

        tracing::info!(
            "Loaded {} passages from '{}'",
            passages.len(),
            self.path.display()
        );
        Ok(passages)
    }
}

/// Pull every value of the `context` column out of CSV data.
/// Empty cells become empty passages rather than being skipped.
pub fn read_context_column<R: Read>(input: R) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let column = reader
        .headers()?
        .iter()
        .position(|h| h.trim() == CONTEXT_COLUMN)
        .ok_or_else(|| anyhow::anyhow!("missing '{CONTEXT_COLUMN}' column"))?;

    let mut passages = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Malformed CSV row {}", row + 1))?;
        passages.push(record.get(column).unwrap_or_default().to_string());
    }
    Ok(passages)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_context_column_in_order() {
        let data = "id,context,source\n\
                    1,first passage,a\n\
                    2,\"second, with comma\",b\n\
                    3,third,c\n";
        let passages = read_context_column(data.as_bytes()).unwrap();
        assert_eq!(passages, vec!["first passage", "second, with comma", "third"]);
    }

    #[test]
    fn test_missing_context_column_is_an_error() {
        let data = "id,text\n1,hello\n";
        let err  = read_context_column(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("context"));
    }

    #[test]
    fn test_empty_cells_are_kept() {
        let data = "context,id\n,1\nfilled,2\n";
        let passages = read_context_column(data.as_bytes()).unwrap();
        assert_eq!(passages, vec!["", "filled"]);
    }

    #[test]
    fn test_header_only_gives_empty_database() {
        let passages = read_context_column("context\n".as_bytes()).unwrap();
        assert!(passages.is_empty());
    }

    #[test]
    fn test_loads_from_file() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("database_small.csv");
        std::fs::write(&path, "context\nalpha\nbeta\n").unwrap();

        let passages = CsvPassageLoader::new(&path).load_all().unwrap();
        assert_eq!(passages, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let loader = CsvPassageLoader::new("does/not/exist.csv");
        assert!(loader.load_all().is_err());
    }
}
