// ============================================================
// Layer 3 — Answers and Model Mode
// ============================================================
// ScoredSpan is what the span model returns for one passage.
// The score only matters while picking the best passage; once
// an answer is chosen it is dropped and only the text survives.
//
// ModelMode is the two-state toggle that decides which
// answerer handles a submitted question.

use serde::{Deserialize, Serialize};

/// One candidate answer extracted from a single passage.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSpan {
    /// The answer text, copied verbatim from the passage
    pub text: String,

    /// Model confidence: p(start) * p(end), in [0.0, 1.0]
    pub score: f32,
}

impl ScoredSpan {
    pub fn new(text: impl Into<String>, score: f32) -> Self {
        Self { text: text.into(), score }
    }

    /// The span reported for a passage that holds no tokens.
    pub fn empty() -> Self {
        Self::new("", 0.0)
    }
}

/// Which pretrained model answers the next question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelMode {
    /// FLAN-T5 style sequence-to-sequence generation
    #[default]
    Generative,

    /// BERT style span extraction over the passage database
    Extractive,
}

impl ModelMode {
    /// Label shown next to the toggle
    pub fn label(&self) -> &'static str {
        match self {
            ModelMode::Generative => "FLAN-T5",
            ModelMode::Extractive => "BERT",
        }
    }
}

impl std::str::FromStr for ModelMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flan" | "flan-t5" | "t5" | "generative" => Ok(ModelMode::Generative),
            "bert" | "extractive"                     => Ok(ModelMode::Extractive),
            other => Err(anyhow::anyhow!(
                "unknown model '{other}' (expected 'flan' or 'bert')"
            )),
        }
    }
}
