use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Setup cancelled by user")]
    Cancelled,
}

/// Narrow capability for interactive policy authoring
///
/// Rules that offer a setup hook ask their questions through this trait, so
/// the decision logic stays free of terminal concerns and tests can script
/// the answers.
pub trait ConfigPrompter {
    /// Ask a yes/no question
    fn confirm(&mut self, prompt: &str) -> Result<bool, SetupError>;
}

/// Prompter backed by stdin/stdout
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        TerminalPrompter
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigPrompter for TerminalPrompter {
    fn confirm(&mut self, prompt: &str) -> Result<bool, SetupError> {
        let stdin = io::stdin();
        let mut input = String::new();

        loop {
            print!("{} [y/n]: ", prompt);
            io::stdout().flush()?;

            input.clear();
            let read = stdin.lock().read_line(&mut input)?;
            if read == 0 {
                // EOF before an answer
                return Err(SetupError::Cancelled);
            }

            match parse_answer(&input) {
                Some(answer) => return Ok(answer),
                None => {
                    println!("Please answer 'y' or 'n'.");
                }
            }
        }
    }
}

fn parse_answer(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer_yes() {
        assert_eq!(parse_answer("y\n"), Some(true));
        assert_eq!(parse_answer("YES\n"), Some(true));
        assert_eq!(parse_answer("  yes  "), Some(true));
    }

    #[test]
    fn test_parse_answer_no() {
        assert_eq!(parse_answer("n\n"), Some(false));
        assert_eq!(parse_answer("No\n"), Some(false));
    }

    #[test]
    fn test_parse_answer_invalid() {
        assert_eq!(parse_answer(""), None);
        assert_eq!(parse_answer("maybe\n"), None);
        assert_eq!(parse_answer("1\n"), None);
    }
}
