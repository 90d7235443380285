//! Line-oriented console boundary.
//!
//! The session only talks to a [`Console`], so it can be driven by a real
//! terminal or by in-memory buffers.

use crate::error::Result;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Outcome of reading one line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    /// The line was read and understood.
    Value(T),
    /// The line was read but could not be parsed; carries the raw text.
    Malformed(String),
    /// Input ended before a line could be read.
    Closed,
}

/// Minimal terminal capability used by a session.
pub trait Console {
    /// Writes `text` followed by a newline.
    fn write_line(&mut self, text: &str) -> Result<()>;

    /// Writes `text` without a newline and flushes.
    fn prompt(&mut self, text: &str) -> Result<()>;

    /// Reads one line without its line terminator. `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>>;

    /// Prompts and reads a line as-is.
    fn read_text(&mut self, prompt: &str) -> Result<Reply<String>> {
        self.prompt(prompt)?;
        Ok(match self.read_line()? {
            Some(line) => Reply::Value(line),
            None => Reply::Closed,
        })
    }

    /// Prompts and parses the trimmed line as a `T`.
    fn read_number<T: FromStr>(&mut self, prompt: &str) -> Result<Reply<T>>
    where
        Self: Sized,
    {
        self.prompt(prompt)?;
        Ok(match self.read_line()? {
            Some(line) => match line.trim().parse::<T>() {
                Ok(value) => Reply::Value(value),
                Err(_) => Reply::Malformed(line),
            },
            None => Reply::Closed,
        })
    }
}

/// A [`Console`] over any buffered reader and writer.
pub struct LineConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        LineConsole { input, output }
    }

    /// Consumes the console and returns the writer.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn write_line(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }

        let mut line = String::from_utf8_lossy(&bytes).into_owned();
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}
