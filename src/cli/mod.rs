// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap, loads the models once, then hands
// control to either the interactive session or a single `ask`.
// All decisions about which model answers live in Layer 2.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

pub mod repl;

use anyhow::Result;
use clap::Parser;
use commands::{AskArgs, Commands, PathArgs};

use crate::application::{
    config::AppConfig,
    controller::Submission,
    startup::{load_default_controller, AppController},
};
use crate::domain::question::INPUT_ERROR_TITLE;

#[derive(Parser, Debug)]
#[command(
    name = "dual-qa",
    version = "0.1.0",
    about = "Answer questions with a generative model or by extracting spans from a passage database."
)]
pub struct Cli {
    #[command(flatten)]
    pub paths: PathArgs,

    /// Defaults to `interactive`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Load the models, then dispatch on the subcommand.
    pub fn run(self) -> Result<()> {
        let config: AppConfig = self.paths.into();
        let mut controller = load_default_controller(&config)?;
        tracing::info!(
            "Ready: {} passages, starting with {}",
            controller.database().len(),
            controller.mode().label()
        );

        match self.command.unwrap_or(Commands::Interactive) {
            Commands::Interactive => run_interactive(&mut controller),
            Commands::Ask(args)   => run_ask(&controller, args),
        }
    }
}

fn run_interactive(controller: &mut AppController) -> Result<()> {
    repl::run_session(controller)
}

fn run_ask(controller: &AppController, args: AskArgs) -> Result<()> {
    match controller.submit(&args.question)? {
        Submission::Answered(block) => println!("{block}"),
        Submission::Rejected(warning) => {
            anyhow::bail!("{INPUT_ERROR_TITLE}: {warning}");
        }
    }
    Ok(())
}
