//! Input adapters for the read-eval loop.

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::collections::VecDeque;

/// One-line-at-a-time input source for the interpreter loop.
///
/// `Ok(None)` means end of input: the stream is exhausted and the loop
/// should stop. Errors are reserved for real I/O failures.
pub trait LineReader {
    /// Display `prompt` and read the next line, without its trailing
    /// newline.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Interactive line source backed by [`rustyline`].
///
/// Line editing and in-session history come with the editor; the loop only
/// ever sees finished lines.
pub struct Readline {
    editor: DefaultEditor,
}

impl Readline {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineReader for Readline {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            // Ctrl-C drops the half-typed line; hand the loop a blank one
            // so it simply prompts again.
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Scripted line source for tests and embedding: yields the given lines in
/// order, then reports end of input.
pub struct MemLines {
    lines: VecDeque<String>,
}

impl MemLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineReader for MemLines {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::{LineReader, MemLines};

    #[test]
    fn mem_lines_yield_in_order_then_end() {
        let mut lines = MemLines::new(["one", "two"]);
        assert_eq!(lines.read_line("> ").unwrap(), Some("one".to_string()));
        assert_eq!(lines.read_line("> ").unwrap(), Some("two".to_string()));
        assert_eq!(lines.read_line("> ").unwrap(), None);
        assert_eq!(lines.read_line("> ").unwrap(), None);
    }

    #[test]
    fn empty_script_reports_end_of_input_immediately() {
        let mut lines = MemLines::new(Vec::<String>::new());
        assert_eq!(lines.read_line("> ").unwrap(), None);
    }
}
