//! Line-oriented operator console.

use std::io::{self, BufRead, Write};

use crate::error::PromptError;

/// Where prompts are shown and answers are read from.
pub trait Console {
    /// Writes one line of output.
    fn write_line(&mut self, line: &str) -> Result<(), PromptError>;

    /// Shows `prompt` and reads one answer line without its line ending.
    /// Returns `Ok(None)` once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, PromptError>;
}

/// A [`Console`] over any buffered reader and writer.
pub struct LineConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl LineConsole<io::StdinLock<'static>, io::Stdout> {
    /// Console bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn write_line(&mut self, line: &str) -> Result<(), PromptError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, PromptError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        // undecodable bytes become U+FFFD and fail validation like any typo
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_lines_and_echoes_prompts() {
        let mut console = LineConsole::new("chicago\r\nyes\n".as_bytes(), Vec::new());

        assert_eq!(console.read_line("City? ").unwrap().as_deref(), Some("chicago"));
        console.write_line("ok").unwrap();
        assert_eq!(console.read_line("Sure? ").unwrap().as_deref(), Some("yes"));
        assert_eq!(console.read_line("More? ").unwrap(), None);

        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output, "City? ok\nSure? More? ");
    }

    #[test]
    fn test_invalid_utf8_is_read_lossily() {
        let mut console = LineConsole::new(&b"chic\xe1go\nchicago\n"[..], Vec::new());

        assert_eq!(
            console.read_line("City? ").unwrap().as_deref(),
            Some("chic\u{FFFD}go")
        );
        assert_eq!(console.read_line("City? ").unwrap().as_deref(), Some("chicago"));
    }
}
