// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Global flags say where the models and database live; the
// subcommand picks between the interactive session (default)
// and a single question.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::config::AppConfig;
use crate::domain::answer::ModelMode;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive question session (the default)
    Interactive,

    /// Answer a single question and exit
    Ask(AskArgs),
}

/// Locations of the models and the passage database.
#[derive(Args, Debug)]
pub struct PathArgs {
    /// Directory of the generative (FLAN-T5 style) model
    #[arg(long, global = true, default_value = "./checkpoint")]
    pub flan_model_dir: PathBuf,

    /// Directory of the extractive (BERT style) model
    #[arg(long, global = true, default_value = "./Bert/model/bert-COVID-QA")]
    pub bert_model_dir: PathBuf,

    /// CSV file with a `context` column of passages
    #[arg(long, global = true, default_value = "Bert/database_small.csv")]
    pub database: PathBuf,

    /// Model selected at start-up: flan or bert
    #[arg(long, global = true, default_value = "flan")]
    pub model: ModelMode,
}

/// Convert CLI PathArgs into the application-layer AppConfig.
/// The application layer never sees clap types.
impl From<PathArgs> for AppConfig {
    fn from(a: PathArgs) -> Self {
        AppConfig {
            flan_model_dir: a.flan_model_dir,
            bert_model_dir: a.bert_model_dir,
            database:       a.database,
            mode:           a.model,
        }
    }
}

/// All arguments for the `ask` command
#[derive(Args, Debug)]
pub struct AskArgs {
    /// The natural language question to answer
    #[arg(long)]
    pub question: String,
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_flag_defaults_match_app_config() {
        let cli = Cli::try_parse_from(["dual-qa"]).unwrap();
        assert!(cli.command.is_none());

        let parsed: AppConfig = cli.paths.into();
        let default = AppConfig::default();
        assert_eq!(parsed.flan_model_dir, default.flan_model_dir);
        assert_eq!(parsed.bert_model_dir, default.bert_model_dir);
        assert_eq!(parsed.database,       default.database);
        assert_eq!(parsed.mode,           default.mode);
    }

    #[test]
    fn test_ask_with_overrides() {
        let cli = Cli::try_parse_from([
            "dual-qa", "ask", "--question", "What is COVID-19?",
            "--model", "bert", "--database", "data/passages.csv",
        ]).unwrap();

        match cli.command {
            Some(Commands::Ask(args)) => assert_eq!(args.question, "What is COVID-19?"),
            other => panic!("expected ask, got {other:?}"),
        }
        let cfg: AppConfig = cli.paths.into();
        assert_eq!(cfg.mode, ModelMode::Extractive);
        assert_eq!(cfg.database, PathBuf::from("data/passages.csv"));
    }

    #[test]
    fn test_unknown_model_is_rejected() {
        assert!(Cli::try_parse_from(["dual-qa", "--model", "gpt"]).is_err());
    }
}
