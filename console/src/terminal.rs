use std::{
    fmt::Display,
    io::{BufRead, Write},
    str::FromStr,
};

use shared::error::{AppError, AppResult};

/// Line-oriented menu I/O. Production wires it to stdin/stdout, tests to
/// an in-memory script.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, line: impl Display) -> AppResult<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Reads one trimmed line. End of input is reported as `InputClosed`.
    pub fn prompt(&mut self, label: &str) -> AppResult<String> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AppError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    pub fn prompt_number<T: FromStr>(&mut self, label: &str) -> AppResult<T> {
        self.prompt(label)?
            .parse()
            .map_err(|_| AppError::InvalidInput("Invalid input! Please enter a number.".into()))
    }

    /// Asks for a 1-based position in a list of `count` items and returns
    /// the 0-based index.
    pub fn choose(&mut self, label: &str, count: usize) -> AppResult<usize> {
        let choice: usize = self.prompt_number(label)?;
        if choice == 0 || choice > count {
            return Err(AppError::InvalidInput(format!(
                "Invalid selection! Please choose 1-{count}."
            )));
        }
        Ok(choice - 1)
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
