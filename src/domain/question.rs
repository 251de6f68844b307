// ============================================================
// Layer 3 — Question Domain Type
// ============================================================
// A question is whatever the user typed, trimmed. Two inputs are
// never sent to a model: the empty string and the untouched
// placeholder text that the input box starts with.

/// Text shown in the question box before the user types anything.
pub const PLACEHOLDER: &str = "Please input your question...";

/// Title and body of the warning shown for rejected input.
pub const INPUT_ERROR_TITLE: &str = "Input Error";
pub const INPUT_ERROR_MESSAGE: &str = "Please enter a valid question.";

/// A question that passed input validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

impl Question {
    /// Trim `raw` and accept it unless it is empty or the placeholder.
    ///
    /// Example:
    ///   Question::parse("  What is COVID-19?\n") → Some("What is COVID-19?")
    ///   Question::parse(PLACEHOLDER)             → None
    pub fn parse(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() || text == PLACEHOLDER {
            return None;
        }
        Some(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
