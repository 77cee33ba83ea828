//! Confirmation gate for destructive actions.
//!
//! Deleting a bean, deleting a shot and overwriting the log from a backup
//! all ask first. The gate is a synchronous yes/no answered by whoever
//! drives the app (a terminal prompt, a `--yes` flag, a test).

use beanlog_model::{Bean, Shot};

/// What is about to be destroyed.
#[derive(Debug, Clone, Copy)]
pub enum ConfirmPrompt<'a> {
    DeleteBean { bean: &'a Bean, shot_count: usize },
    DeleteShot { shot: &'a Shot },
    ImportOverwrite { beans: usize, shots: usize },
}

impl ConfirmPrompt<'_> {
    /// Question to put to the user.
    pub fn message(&self) -> String {
        match self {
            Self::DeleteBean { bean, shot_count } => format!(
                "Archive {} by {}? All {} shot log(s) will be lost.",
                bean.name, bean.roaster, shot_count
            ),
            Self::DeleteShot { shot } => format!(
                "Remove this log entry ({}g in, {}g out, {}s, rated {})?",
                shot.dose, shot.yield_g, shot.time, shot.rating
            ),
            Self::ImportOverwrite { beans, shots } => format!(
                "Overwrite current logs with backup ({beans} bean(s), {shots} shot(s))?"
            ),
        }
    }
}

/// Answers confirmation prompts.
pub trait Confirm {
    fn confirm(&self, prompt: &ConfirmPrompt<'_>) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&ConfirmPrompt<'_>) -> bool,
{
    fn confirm(&self, prompt: &ConfirmPrompt<'_>) -> bool {
        self(prompt)
    }
}

/// Approves everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &ConfirmPrompt<'_>) -> bool {
        true
    }
}

/// Declines everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeNo;

impl Confirm for AssumeNo {
    fn confirm(&self, _prompt: &ConfirmPrompt<'_>) -> bool {
        false
    }
}
