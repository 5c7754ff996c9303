//! Line-oriented prompts over any reader/writer pair.

use std::io::{BufRead, Write};

use crate::error::{Error, Result};
use crate::student::ValidationError;

/// Message shown when a required text field is left blank.
pub const EMPTY_INPUT_MESSAGE: &str = "Input cannot be empty. Try again.";

/// Reads answers from `input` and writes prompts and messages to `output`.
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter.
    #[must_use]
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Write a line.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Write an empty line.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn blank(&mut self) -> Result<()> {
        writeln!(self.output)?;
        Ok(())
    }

    /// Show `prompt` and read one line, trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputClosed`] at end of input, or an I/O error.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            // Terminate the dangling prompt so whatever follows starts clean.
            writeln!(self.output)?;
            return Err(Error::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    /// Ask until `parse` accepts the answer, printing `explain(err)` after
    /// every rejection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputClosed`] at end of input, or an I/O error.
    pub fn ask_until<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> std::result::Result<T, ValidationError>,
        explain: impl Fn(ValidationError) -> &'static str,
    ) -> Result<T> {
        loop {
            let answer = self.ask(prompt)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(err) => self.say(explain(err))?,
            }
        }
    }

    /// Ask until a non-blank answer is given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputClosed`] at end of input, or an I/O error.
    pub fn ask_nonempty(&mut self, prompt: &str) -> Result<String> {
        self.ask_until(prompt, crate::student::parse_nonempty, |_| {
            EMPTY_INPUT_MESSAGE
        })
    }
}
