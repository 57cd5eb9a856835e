//! Progress output for the command line.

use crossterm::style::{StyledContent, Stylize};
use std::io::{self, IsTerminal, Write};

/// Writes user-facing progress lines.
///
/// Progress goes to stdout, warnings and errors to stderr. Quiet mode
/// suppresses everything except errors. Success, warning and error lines are
/// colored when their stream is a terminal, so piped output stays plain.
#[derive(Debug, Clone, Default)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates a new output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Output manager that only reports errors.
    pub fn quiet() -> Self {
        Self::new(false, true)
    }

    /// Whether verbose lines are printed.
    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    fn stdout_line(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut out = io::stdout().lock();
        writeln!(out, "{message}")?;
        out.flush()
    }

    /// Print a progress message
    pub fn progress(&self, message: &str) -> io::Result<()> {
        self.stdout_line(message)
    }

    /// Print a section header preceded by a blank line
    pub fn section(&self, title: &str) -> io::Result<()> {
        self.stdout_line(&format!("\n{title}"))
    }

    /// Print indented text, used for echoed tool output
    pub fn indent(&self, message: &str) -> io::Result<()> {
        self.stdout_line(&format!("  {message}"))
    }

    /// Print a success message in green
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut out = io::stdout().lock();
        let colored = out.is_terminal();
        writeln!(out, "{}", paint(message, colored, |m| m.green().bold()))?;
        out.flush()
    }

    /// Print a message only in verbose mode
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if self.is_verbose() {
            self.stdout_line(message)
        } else {
            Ok(())
        }
    }

    /// Print a warning to stderr
    pub fn warn(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut err = io::stderr().lock();
        let colored = err.is_terminal();
        let line = format!("Warning: {message}");
        writeln!(err, "{}", paint(&line, colored, |m| m.yellow()))
    }

    /// Print an error to stderr, even in quiet mode
    pub fn error(&self, message: &str) -> io::Result<()> {
        let mut err = io::stderr().lock();
        let colored = err.is_terminal();
        writeln!(err, "{}", paint(message, colored, |m| m.red()))
    }
}

fn paint(message: &str, colored: bool, style: fn(&str) -> StyledContent<&str>) -> String {
    if colored {
        style(message).to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_when_not_a_terminal() {
        assert_eq!(paint("done", false, |m| m.green()), "done");
    }

    #[test]
    fn colored_lines_keep_their_text() {
        let line = paint("done", true, |m| m.green());
        assert!(line.starts_with("\u{1b}["));
        assert!(line.contains("done"));
    }
}
