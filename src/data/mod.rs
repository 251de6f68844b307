// ============================================================
// Layer 4 — Data
// ============================================================
// Turns files and token streams into the shapes the models need:
//
//   database.csv ──► CsvPassageLoader ──► Vec<String> passages
//
//   context tokens ──► TokenWindows ──► overlapping index ranges
//
// Reference: Rust Book §8 (Collections), §13 (Iterators)

/// Reads the `context` column of the passage CSV
pub mod csv_loader;

/// Sliding windows over long token sequences
pub mod windows;
