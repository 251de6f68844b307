// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The controller only ever talks to these traits, so the
// burn-backed models can be replaced by test doubles that
// record calls or return fixed scores.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::answer::ScoredSpan;

// ─── PassageSource ────────────────────────────────────────────────────────────
/// Any component that can load the passage database.
///
/// Implementations:
///   - CsvPassageLoader → reads the `context` column of a CSV file
pub trait PassageSource {
    /// Load all passages in their stored order.
    fn load_all(&self) -> Result<Vec<String>>;
}

// ─── GenerativeAnswerer ───────────────────────────────────────────────────────
/// Produces a free-text answer from the question alone.
pub trait GenerativeAnswerer {
    fn answer(&self, question: &str) -> Result<String>;
}

// ─── ExtractiveAnswerer ───────────────────────────────────────────────────────
/// Picks an answer span out of a set of candidate passages.
/// An empty passage set yields an empty string.
pub trait ExtractiveAnswerer {
    fn answer(&self, question: &str, passages: &[String]) -> Result<String>;
}

// ─── SpanExtractor ────────────────────────────────────────────────────────────
/// Scores the best answer span inside a single passage.
///
/// Implementations:
///   - BertExtractor → transformer encoder with a start/end head
pub trait SpanExtractor {
    fn extract(&self, question: &str, passage: &str) -> Result<ScoredSpan>;
}
