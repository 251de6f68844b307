// ============================================================
// Layer 3 — Passage Database
// ============================================================
// The ordered set of context passages the extractive model
// searches. Loaded once at startup and never mutated: there is
// no way to push into a Database after construction.

/// Ordered, read-only collection of passages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Database {
    passages: Vec<String>,
}

impl Database {
    pub fn new(passages: Vec<String>) -> Self {
        Self { passages }
    }

    pub fn passages(&self) -> &[String] {
        &self.passages
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }
}

impl From<Vec<String>> for Database {
    fn from(passages: Vec<String>) -> Self {
        Self::new(passages)
    }
}
