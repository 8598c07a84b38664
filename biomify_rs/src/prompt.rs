//! Yes/no questions asked during a migration.

use std::io::{self, BufRead, IsTerminal, Write};

use crate::error::{MigrateError, Result};

pub trait Prompter {
    fn confirm(&self, question: &str, default: bool) -> Result<bool>;
}

/// Asks on the terminal: `question [Y/n] `, empty answer takes the default.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        eprint!("{} {} ", question, hint);
        io::stderr().flush().map_err(MigrateError::Prompt)?;

        let mut input = String::new();
        io::stdin()
            .lock()
            .read_line(&mut input)
            .map_err(MigrateError::Prompt)?;
        Ok(parse_answer(&input, default))
    }
}

/// Answers every question the same way, without any I/O.
#[derive(Debug, Clone, Copy)]
pub struct FixedPrompter(pub bool);

impl Prompter for FixedPrompter {
    fn confirm(&self, _question: &str, _default: bool) -> Result<bool> {
        Ok(self.0)
    }
}

/// Terminal prompter when stdin is interactive, otherwise accept defaults.
pub fn interactive_or_default() -> Box<dyn Prompter> {
    if io::stdin().is_terminal() {
        Box::new(StdinPrompter)
    } else {
        Box::new(DefaultPrompter)
    }
}

/// Takes each question's default answer.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPrompter;

impl Prompter for DefaultPrompter {
    fn confirm(&self, _question: &str, default: bool) -> Result<bool> {
        Ok(default)
    }
}

pub fn parse_answer(input: &str, default: bool) -> bool {
    match input.trim().to_lowercase().as_str() {
        "" => default,
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    }
}
