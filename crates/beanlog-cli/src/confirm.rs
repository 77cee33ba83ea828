//! Yes/no prompts on the terminal.

use std::io::{self, BufRead, Write};

use beanlog_core::{Confirm, ConfirmPrompt};

/// Asks on stderr and reads the answer from stdin.
///
/// Anything other than `y`/`yes` declines, including end of input.
#[derive(Debug, Clone, Copy)]
pub struct TerminalConfirm {
    assume_yes: bool,
}

impl TerminalConfirm {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &ConfirmPrompt<'_>) -> bool {
        if self.assume_yes {
            tracing::debug!(prompt = %prompt.message(), "confirmed by --yes");
            return true;
        }
        ask(&prompt.message(), &mut io::stdin().lock(), &mut io::stderr())
    }
}

/// Put `question` to `output` and read one line of `input`.
pub fn ask(question: &str, input: &mut impl BufRead, output: &mut impl Write) -> bool {
    if write!(output, "{question} [y/N] ").and_then(|()| output.flush()).is_err() {
        return false;
    }
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => is_yes(&answer),
        Err(error) => {
            tracing::warn!(%error, "could not read confirmation");
            false
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
