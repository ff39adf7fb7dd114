//! User interaction for scaffold.
//! The generator never talks to the terminal directly: every question goes
//! through a [`Prompter`] handed to it by the caller.

use crate::error::{Error, Result};
use dialoguer::{Confirm, Input};

/// Source of answers for interactive questions.
pub trait Prompter {
    /// Asks a yes/no question. Returns `true` without asking when `skip` is set.
    fn confirm(&self, skip: bool, prompt: String) -> Result<bool>;

    /// Asks for a line of text, offering `default`.
    fn input(&self, prompt: String, default: String) -> Result<String>;
}

/// Terminal prompter backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, skip: bool, prompt: String) -> Result<bool> {
        if skip {
            return Ok(true);
        }
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))
    }

    fn input(&self, prompt: String, default: String) -> Result<String> {
        Input::new()
            .with_prompt(prompt)
            .default(default)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| Error::PromptError(e.to_string()))
    }
}

/// Prompter for unattended runs: inputs take their default and every
/// confirmation is refused unless skipped.
#[derive(Debug, Default)]
pub struct NoInputPrompter;

impl Prompter for NoInputPrompter {
    fn confirm(&self, skip: bool, _prompt: String) -> Result<bool> {
        Ok(skip)
    }

    fn input(&self, _prompt: String, default: String) -> Result<String> {
        Ok(default)
    }
}
