// ============================================================
// Layer 1 — Interactive Session
// ============================================================
// Terminal stand-in for the question window:
//
//   ┌ Question Answering System ───────────────────────┐
//   │ Choose your model:  (•) FLAN-T5   ( ) BERT       │
//   │ > Please input your question...                  │
//   │ Question: ...                                    │
//   │ Answer from our model: ...                       │
//   └──────────────────────────────────────────────────┘
//
// rustyline reads the lines (editing, in-memory history, Ctrl-C
// clears the prompt, Ctrl-D leaves). Each line goes through
// handle_line(), which knows nothing about the terminal. The
// known ':' commands drive the model toggle; every other line is
// submitted as a question. Inference runs on this thread, so the
// prompt does not come back until the answer is ready.

use anyhow::Result;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::io::Write;

use crate::application::controller::{QaController, Submission};
use crate::domain::{
    answer::ModelMode,
    question::{INPUT_ERROR_TITLE, PLACEHOLDER},
    traits::{ExtractiveAnswerer, GenerativeAnswerer},
};

const TITLE: &str = "Question Answering System";
const PROMPT: &str = "> ";

const HELP: &str = "\
Commands:
  :model flan | :flan   answer with the generative model (FLAN-T5)
  :model bert | :bert   answer with the extractive model (BERT)
  :help                 show this help
  :quit | :q            leave the session (Ctrl-D works too)
Anything else is submitted as a question.";

/// One parsed line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    SetMode(ModelMode),
    Help,
    Quit,
    Submit(String),
    /// `:model` with a name that is not a known model
    UnknownModel(String),
}

impl SessionCommand {
    /// Only the listed `:` commands are commands. Any other text,
    /// including text that merely starts with ':', is a question.
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(cmd) = trimmed.strip_prefix(':') else {
            return SessionCommand::Submit(line.to_string());
        };

        let mut parts = cmd.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some("flan"), None, None) => SessionCommand::SetMode(ModelMode::Generative),
            (Some("bert"), None, None) => SessionCommand::SetMode(ModelMode::Extractive),
            (Some("model"), Some(name), None) => match name.parse::<ModelMode>() {
                Ok(mode) => SessionCommand::SetMode(mode),
                Err(_)   => SessionCommand::UnknownModel(name.to_string()),
            },
            (Some("help"), None, None) => SessionCommand::Help,
            (Some("quit") | Some("q"), None, None) => SessionCommand::Quit,
            _ => SessionCommand::Submit(line.to_string()),
        }
    }
}

/// Whether the session keeps reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Render the model toggle as radio buttons.
fn toggle_line(mode: ModelMode) -> String {
    let mark = |m: ModelMode| if m == mode { "(•)" } else { "( )" };
    format!(
        "Choose your model:  {} {}   {} {}",
        mark(ModelMode::Generative), ModelMode::Generative.label(),
        mark(ModelMode::Extractive), ModelMode::Extractive.label(),
    )
}

/// Title, current toggle and a hint.
pub fn print_banner(mode: ModelMode, output: &mut impl Write) -> Result<()> {
    writeln!(output, "{TITLE}")?;
    writeln!(output, "{}", toggle_line(mode))?;
    writeln!(output, "Type :help for commands.")?;
    Ok(())
}

/// Act on one line of input and write whatever the user should see.
pub fn handle_line<G, X>(
    controller: &mut QaController<G, X>,
    line:       &str,
    output:     &mut impl Write,
) -> Result<Flow>
where
    G: GenerativeAnswerer,
    X: ExtractiveAnswerer,
{
    match SessionCommand::parse(line) {
        SessionCommand::SetMode(mode) => {
            controller.set_mode(mode);
            writeln!(output, "{}", toggle_line(controller.mode()))?;
        }
        SessionCommand::Help => writeln!(output, "{HELP}")?,
        SessionCommand::Quit => return Ok(Flow::Quit),
        SessionCommand::UnknownModel(name) => {
            writeln!(output, "Unknown model '{name}' (expected flan or bert).")?;
        }
        SessionCommand::Submit(text) => match controller.submit(&text)? {
            Submission::Answered(block) => writeln!(output, "\n{block}")?,
            Submission::Rejected(warning) => {
                writeln!(output, "{INPUT_ERROR_TITLE}: {warning}")?;
            }
        },
    }
    Ok(Flow::Continue)
}

/// Run the session on the terminal until `:quit` or Ctrl-D.
pub fn run_session<G, X>(controller: &mut QaController<G, X>) -> Result<()>
where
    G: GenerativeAnswerer,
    X: ExtractiveAnswerer,
{
    let mut rl  = DefaultEditor::new()?;
    let mut out = std::io::stdout();

    print_banner(controller.mode(), &mut out)?;

    loop {
        writeln!(out, "\n{PLACEHOLDER}")?;
        match rl.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                if handle_line(controller, &line, &mut out)? == Flow::Quit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                writeln!(out, "^C")?;
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    tracing::debug!("Session ended");
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::controller::tests::controller;
    use crate::domain::question::INPUT_ERROR_MESSAGE;

    /// Feed lines through handle_line the way the terminal loop does.
    fn run(mode: ModelMode, lines: &[&str]) -> String {
        let mut c   = controller(mode);
        let mut out = Vec::new();
        print_banner(c.mode(), &mut out).unwrap();
        for line in lines {
            if handle_line(&mut c, line, &mut out).unwrap() == Flow::Quit {
                break;
            }
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(SessionCommand::parse(":bert"), SessionCommand::SetMode(ModelMode::Extractive));
        assert_eq!(SessionCommand::parse(" :model FLAN-T5 "), SessionCommand::SetMode(ModelMode::Generative));
        assert_eq!(SessionCommand::parse(":q"), SessionCommand::Quit);
        assert_eq!(SessionCommand::parse(":help"), SessionCommand::Help);
        assert_eq!(SessionCommand::parse(":model gpt"), SessionCommand::UnknownModel("gpt".into()));
        assert_eq!(SessionCommand::parse("what is R0?"), SessionCommand::Submit("what is R0?".into()));
    }

    #[test]
    fn test_colon_text_that_is_not_a_command_is_a_question() {
        assert_eq!(
            SessionCommand::parse(":) is covid airborne"),
            SessionCommand::Submit(":) is covid airborne".into())
        );
        assert_eq!(
            SessionCommand::parse(":bert is it a virus"),
            SessionCommand::Submit(":bert is it a virus".into())
        );

        let out = run(ModelMode::Generative, &[":) is covid airborne"]);
        assert!(out.contains("Answer from our model: generated for :) is covid airborne"));
    }

    #[test]
    fn test_session_answers_with_selected_model() {
        let out = run(ModelMode::Generative, &["what is covid", ":bert", "how does it spread", ":quit"]);
        assert!(out.contains("Answer from our model: generated for what is covid"));
        assert!(out.contains("(•) BERT"));
        assert!(out.contains("Answer from our model: extracted from 2 passages"));
    }

    #[test]
    fn test_session_warns_on_placeholder() {
        let out = run(ModelMode::Generative, &[PLACEHOLDER, ""]);
        let warning = format!("{INPUT_ERROR_TITLE}: {INPUT_ERROR_MESSAGE}");
        assert_eq!(out.matches(&warning).count(), 2);
        assert!(!out.contains("Answer from our model"));
    }

    #[test]
    fn test_session_stops_at_quit() {
        let out = run(ModelMode::Generative, &[":quit", "never asked"]);
        assert!(!out.contains("never asked"));
    }

    #[test]
    fn test_unknown_model_keeps_mode() {
        let mut c   = controller(ModelMode::Extractive);
        let mut out = Vec::new();
        assert_eq!(handle_line(&mut c, ":model gpt", &mut out).unwrap(), Flow::Continue);
        assert_eq!(c.mode(), ModelMode::Extractive);
        assert!(String::from_utf8(out).unwrap().contains("Unknown model 'gpt'"));
    }

    #[test]
    fn test_banner_shows_starting_mode() {
        let out = run(ModelMode::Extractive, &[]);
        assert!(out.starts_with(TITLE));
        assert!(out.contains("( ) FLAN-T5   (•) BERT"));
    }
}
