//! Line-oriented prompting over any reader/writer pair.
//!
//! End of input surfaces as `io::ErrorKind::UnexpectedEof`, which the shell
//! treats as a request to quit.

use cinemadb::CinemaError;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor::MoveTo, execute};
use std::fmt::Display;
use std::io::{self, BufRead, Write};

pub struct Prompt<R: BufRead, W: Write> {
    input: R,
    output: W,
    styled: bool,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    /// Plain prompt: no colours, no screen clearing.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            styled: false,
        }
    }

    /// Enables colours and screen clearing.
    pub fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.output)
    }

    pub fn heading(&mut self, text: &str) -> io::Result<()> {
        let rule = "-".repeat(text.len());
        if self.styled {
            writeln!(self.output, "{}\n{}", text.bold().cyan(), rule)
        } else {
            writeln!(self.output, "{}\n{}", text, rule)
        }
    }

    pub fn success(&mut self, text: impl Display) -> io::Result<()> {
        let text = text.to_string();
        if self.styled {
            writeln!(self.output, "{}", text.green())
        } else {
            writeln!(self.output, "{}", text)
        }
    }

    pub fn error(&mut self, text: impl Display) -> io::Result<()> {
        let text = text.to_string();
        if self.styled {
            writeln!(self.output, "{}", text.red())
        } else {
            writeln!(self.output, "{}", text)
        }
    }

    /// Prints a library error the way operators expect to read it.
    pub fn report(&mut self, err: &CinemaError) -> io::Result<()> {
        match err {
            CinemaError::NoAvailability { date, start } => self.error(format!(
                "Unavailable time: no auditoriums are free on {} at {}. Try another date or time.",
                date, start
            )),
            CinemaError::StoreIo { .. } => {
                self.error(format!("{}. Nothing was saved.", err))
            }
            other => self.error(other),
        }
    }

    pub fn clear_screen(&mut self) -> io::Result<()> {
        if self.styled {
            execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    /// Reads one trimmed line after printing `label`.
    pub fn line(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(buf.trim().to_string())
    }

    /// Asks until `parse` accepts the answer. Format and input errors are shown
    /// and the question is repeated.
    pub fn ask<T>(
        &mut self,
        label: &str,
        mut parse: impl FnMut(&str) -> cinemadb::Result<T>,
    ) -> io::Result<T> {
        loop {
            let answer = self.line(label)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(err @ (CinemaError::Format(_) | CinemaError::InvalidInput(_))) => {
                    self.error(err)?
                }
                Err(err) => {
                    return Err(io::Error::other(err.to_string()));
                }
            }
        }
    }

    /// Non-empty free text.
    pub fn required(&mut self, label: &str) -> io::Result<String> {
        self.ask(label, |text| {
            if text.is_empty() {
                Err(CinemaError::InvalidInput("a value is required".into()))
            } else {
                Ok(text.to_string())
            }
        })
    }

    pub fn yes_no(&mut self, label: &str) -> io::Result<bool> {
        self.ask(label, |text| match text.to_ascii_uppercase().as_str() {
            "Y" => Ok(true),
            "N" => Ok(false),
            _ => Err(CinemaError::Format("please enter Y or N".into())),
        })
    }

    pub fn number<T: std::str::FromStr>(&mut self, label: &str) -> io::Result<T> {
        self.ask(label, |text| {
            text.parse()
                .map_err(|_| CinemaError::Format(format!("'{}' is not a valid number", text)))
        })
    }

    /// Shows numbered options and returns the chosen index.
    pub fn choose<D: Display>(&mut self, label: &str, options: &[D]) -> io::Result<usize> {
        for (index, option) in options.iter().enumerate() {
            writeln!(self.output, "[{}] {}", index + 1, option)?;
        }
        let count = options.len();
        self.ask(label, |text| match text.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => Ok(n - 1),
            _ => Err(CinemaError::InvalidInput(format!(
                "enter a number between 1 and {}",
                count
            ))),
        })
    }

    /// Uppercased id, required.
    pub fn id(&mut self, label: &str) -> io::Result<String> {
        Ok(self.required(label)?.to_uppercase())
    }
}
