//! Yes/no confirmation
//!
//! The pipeline asks exactly one question: whether to move the finished
//! bundle to the configured destination. Anything other than an affirmative
//! answer, including end of input, counts as "no".

use std::io::{self, BufRead, Stdout, Write};

use crate::error::{BackupError, BackupResult};

/// Something that can answer a yes/no question
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> BackupResult<bool>;
}

/// Whether a typed answer means "yes"
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Asks on a writer and reads the answer from a line-based reader
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LinePrompt<io::StdinLock<'static>, Stdout> {
    /// Prompt on the terminal
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for LinePrompt<R, W> {
    fn confirm(&mut self, question: &str) -> BackupResult<bool> {
        write!(self.output, "{} (y/n) ", question)
            .and_then(|_| self.output.flush())
            .map_err(|e| BackupError::Prompt(format!("Failed to write prompt: {}", e)))?;

        let mut answer = String::new();
        let read = self
            .input
            .read_line(&mut answer)
            .map_err(|e| BackupError::Prompt(format!("Failed to read answer: {}", e)))?;

        Ok(read > 0 && is_affirmative(&answer))
    }
}

/// A pre-decided answer, for `--yes`/`--no` and tests
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&mut self, question: &str) -> BackupResult<bool> {
        tracing::info!(answer = self.0, "{}", question);
        Ok(self.0)
    }
}
