// ============================================================
// Layer 2 — Application Configuration
// ============================================================
// Where the two models and the passage database live, and which
// model answers first. Defaults are the locations the tool has
// always looked in, relative to the working directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::answer::ModelMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory of the generative (FLAN-T5 style) model
    pub flan_model_dir: PathBuf,
    /// Directory of the extractive (BERT style) model
    pub bert_model_dir: PathBuf,
    /// CSV file whose `context` column is the passage database
    pub database:       PathBuf,
    /// Model selected when the session starts
    pub mode:           ModelMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            flan_model_dir: PathBuf::from("./checkpoint"),
            bert_model_dir: PathBuf::from("./Bert/model/bert-COVID-QA"),
            database:       PathBuf::from("Bert/database_small.csv"),
            mode:           ModelMode::Generative,
        }
    }
}
