// ============================================================
// Layer 2 — QA Controller
// ============================================================
// The one piece of control logic in the system. It owns both
// answerers, the passage database and the model toggle:
//
//   submit(text)
//     │
//     ├─ empty or placeholder ──► Rejected(warning)   (no model call)
//     │
//     └─ valid question
//          ├─ mode == Generative ──► generative.answer(q)
//          └─ mode == Extractive ──► extractive.answer(q, database)
//                                          │
//                                          ▼
//                        "Question: q\nAnswer from our model: a"
//
// Model failures are not caught here; they propagate to the caller.

use anyhow::Result;

use crate::domain::{
    answer::ModelMode,
    database::Database,
    question::{Question, INPUT_ERROR_MESSAGE},
    traits::{ExtractiveAnswerer, GenerativeAnswerer},
};

/// Result of submitting the question box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The formatted question/answer block for the answer label
    Answered(String),
    /// Input was refused; carries the warning to show the user
    Rejected(&'static str),
}

pub struct QaController<G: GenerativeAnswerer, X: ExtractiveAnswerer> {
    generative: G,
    extractive: X,
    database:   Database,
    mode:       ModelMode,
}

impl<G: GenerativeAnswerer, X: ExtractiveAnswerer> QaController<G, X> {
    pub fn new(generative: G, extractive: X, database: Database, mode: ModelMode) -> Self {
        Self { generative, extractive, database, mode }
    }

    pub fn mode(&self) -> ModelMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ModelMode) {
        if mode != self.mode {
            tracing::info!("Switched model: {} → {}", self.mode.label(), mode.label());
        }
        self.mode = mode;
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Validate the raw input, dispatch to exactly one answerer, and
    /// format the answer for display.
    pub fn submit(&self, raw: &str) -> Result<Submission> {
        let Some(question) = Question::parse(raw) else {
            tracing::warn!("Rejected empty or placeholder question");
            return Ok(Submission::Rejected(INPUT_ERROR_MESSAGE));
        };

        tracing::info!("Answering with {}: {}", self.mode.label(), question);
        let answer = match self.mode {
            ModelMode::Generative => self.generative.answer(question.as_str())?,
            ModelMode::Extractive => {
                self.extractive.answer(question.as_str(), self.database.passages())?
            }
        };

        Ok(Submission::Answered(format_answer(&question, &answer)))
    }
}

/// Text written into the answer label.
pub fn format_answer(question: &Question, answer: &str) -> String {
    format!("Question: {question}\nAnswer from our model: {answer}")
}
