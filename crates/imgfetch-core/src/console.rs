//! Operator console: the pipeline's only way to print and ask.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// Line-oriented operator I/O.
pub trait Console {
    /// Print one line for the operator.
    fn say(&mut self, line: &str) -> Result<()>;

    /// Print `prompt` (no newline) and read one line. EOF yields an empty string.
    fn read_line(&mut self, prompt: &str) -> Result<String>;
}

/// Only `y` (any case, surrounding whitespace ignored) counts as yes.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Ask a y/N question.
pub fn confirm<C: Console + ?Sized>(console: &mut C, question: &str) -> Result<bool> {
    let answer = console.read_line(&format!("{} (y/N): ", question))?;
    Ok(is_affirmative(&answer))
}

/// [`Console`] over any reader/writer pair.
pub struct StdConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StdConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl StdConsole<io::StdinLock<'static>, io::Stdout> {
    /// Console on the process's stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console for StdConsole<R, W> {
    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line).context("write to console")?;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt).context("write to console")?;
        self.output.flush().context("flush console")?;
        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .context("read from console")?;
        Ok(line.trim_end_matches(|c| c == '\r' || c == '\n').to_string())
    }
}
