//! Validated input for the menu
//!
//! `Prompter` re-asks until a line satisfies its constraint. Rejections are
//! reported and never leave this module; the only error a caller sees is
//! `InputClosed` (or an editor failure), which ends the session.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::collections::VecDeque;

use crate::errors::{NetworkError, Result};
use crate::network::{validate_city_name, CityDirectory};
use crate::repl::display::DisplayManager;

/// Where operator lines come from
pub trait LineSource {
    /// Read one line after showing `prompt`. `Ok(None)` means input has ended.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Interactive line source backed by rustyline
///
/// Features:
/// - Command line editing (Emacs-style by default)
/// - In-session history for the menu and name prompts
/// - Ctrl-C / Ctrl-D end the session
pub struct InputHandler {
    editor: DefaultEditor,
}

impl InputHandler {
    /// Create new input handler
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| NetworkError::InputError(e.to_string()))?;
        Ok(InputHandler { editor })
    }
}

impl LineSource for InputHandler {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.trim());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(NetworkError::InputError(err.to_string())),
        }
    }
}

/// Pre-recorded lines, for tests and scripted runs
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Every prompt shown so far, in order
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Lines not yet consumed
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}

/// Re-prompting reader on top of a `LineSource`
pub struct Prompter<S> {
    source: S,
    display: DisplayManager,
}

impl<S: LineSource> Prompter<S> {
    pub fn new(source: S, display: DisplayManager) -> Self {
        Self { source, display }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn next_line(&mut self, prompt: &str) -> Result<String> {
        let line = self
            .source
            .read_line(prompt)?
            .ok_or(NetworkError::InputClosed)?;
        self.display.show_trace(&format!("read {:?}", line));
        Ok(line)
    }

    /// Integer within `[min, max]`
    pub fn read_int(&mut self, prompt: &str, min: i64, max: i64) -> Result<i64> {
        loop {
            let line = self.next_line(prompt)?;
            match line.trim().parse::<i64>() {
                Ok(value) if (min..=max).contains(&value) => return Ok(value),
                _ => self.display.show_error(&format!(
                    "Invalid input. Please enter a number between {} and {}.",
                    min, max
                )),
            }
        }
    }

    /// Finite real number `>= min`
    pub fn read_float(&mut self, prompt: &str, min: f64) -> Result<f64> {
        loop {
            let line = self.next_line(prompt)?;
            match line.trim().parse::<f64>() {
                Ok(value) if value.is_finite() && value >= min => return Ok(value),
                _ => self
                    .display
                    .show_error(&format!("Invalid input. Please enter a number >= {}.", min)),
            }
        }
    }

    /// Trimmed name that passes `validate_city_name`
    pub fn read_city_name(&mut self, prompt: &str, directory: &CityDirectory) -> Result<String> {
        loop {
            let line = self.next_line(prompt)?;
            match validate_city_name(&line, directory) {
                Ok(name) => return Ok(name),
                Err(NetworkError::InvalidCityName { reason, .. }) => self.display.show_error(&reason),
                Err(other) => return Err(other),
            }
        }
    }

    /// One trimmed free-text line (city name or index)
    pub fn read_token(&mut self, prompt: &str) -> Result<String> {
        Ok(self.next_line(prompt)?.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Verbosity;

    fn prompter(lines: &[&str]) -> Prompter<ScriptedInput> {
        Prompter::new(
            ScriptedInput::new(lines.iter().copied()),
            DisplayManager::new(Verbosity::Quiet),
        )
    }

    #[test]
    fn test_read_int_skips_invalid() {
        let mut p = prompter(&["abc", "0", "10", " 7 ", "3"]);
        assert_eq!(p.read_int("choice: ", 1, 9).unwrap(), 7);
        assert_eq!(p.source().prompts().len(), 4);
        assert_eq!(p.source().remaining(), 1);
    }

    #[test]
    fn test_read_int_rejects_trailing_garbage() {
        let mut p = prompter(&["3abc", "-2", "2"]);
        assert_eq!(p.read_int("n: ", -5, 5).unwrap(), -2);
    }

    #[test]
    fn test_read_int_input_closed() {
        let mut p = prompter(&["42"]);
        assert_eq!(p.read_int("n: ", 1, 9), Err(NetworkError::InputClosed));
    }

    #[test]
    fn test_read_float() {
        let mut p = prompter(&["-1", "NaN", "inf", "x", "5.50"]);
        assert_eq!(p.read_float("budget: ", 0.0).unwrap(), 5.5);
    }

    #[test]
    fn test_read_float_accepts_lower_bound() {
        let mut p = prompter(&["0"]);
        assert_eq!(p.read_float("budget: ", 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_read_city_name_reprompts() {
        let mut dir = CityDirectory::new();
        dir.add("Kigali").unwrap();

        let mut p = prompter(&["", "   ", "Huye2", "kigali", "  Huye  "]);
        assert_eq!(p.read_city_name("name: ", &dir).unwrap(), "Huye");
        assert_eq!(p.source().prompts().len(), 5);
    }

    #[test]
    fn test_read_token_trims() {
        let mut p = prompter(&["  Huye \t"]);
        assert_eq!(p.read_token("city: ").unwrap(), "Huye");
        assert_eq!(p.source().prompts(), ["city: ".to_string()]);
    }
}
