//! Terminal prompts backed by dialoguer.

use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use rcctl_core::{Prompter, SetupError};

/// Interactive [`Prompter`] for `rcctl init`.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, message: &str, default: &str) -> Result<String, SetupError> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .default(default.to_string())
            .interact_text()
            .map_err(|e| SetupError::Prompt(std::io::Error::other(e)))
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, SetupError> {
        confirm(message, default).map_err(SetupError::Prompt)
    }
}

/// Asks a yes/no question on the terminal.
pub fn confirm(message: &str, default: bool) -> std::io::Result<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(message)
        .default(default)
        .interact()
        .map_err(std::io::Error::other)
}
