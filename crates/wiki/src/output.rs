//! Startup and error messages on stderr.

use std::fmt::Display;

use console::{Style, Term};

/// Styled stderr writer.
///
/// Write failures are ignored: there is nowhere else to report them.
pub(crate) struct Output {
    term: Term,
    heading: Style,
    label: Style,
    failure: Style,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            heading: Style::new().cyan().bold(),
            label: Style::new().dim(),
            failure: Style::new().red(),
        }
    }

    /// Print the line announcing where the wiki listens.
    pub(crate) fn listening(&self, host: &str, port: u16) {
        let line = format!("Starting wiki on http://{host}:{port}");
        let _ = self.term.write_line(&self.heading.apply_to(line).to_string());
    }

    /// Print an indented `label: value` line.
    pub(crate) fn detail(&self, label: &str, value: impl Display) {
        let label = self.label.apply_to(format!("{label}:"));
        let _ = self.term.write_line(&format!("  {label} {value}"));
    }

    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.failure.apply_to(msg).to_string());
    }
}
