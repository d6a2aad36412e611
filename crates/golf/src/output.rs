//! Terminal reporting for the golf commands.
//!
//! Everything goes to stderr so that `golf case` can print JSON on stdout.

use std::path::Path;

use console::{Style, Term};

use crate::error::CliError;

pub(crate) struct Output {
    term: Term,
    label: Style,
    done: Style,
    warn: Style,
    fail: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().dim(),
            done: Style::new().green().bold(),
            warn: Style::new().yellow(),
            fail: Style::new().red(),
        }
    }

    fn line(&self, line: &str) {
        let _ = self.term.write_line(line);
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(msg);
    }

    /// `Content: ./src/content/docs`, with a dimmed label.
    pub(crate) fn path(&self, label: &str, path: &Path) {
        self.line(&format!("{} {}", self.label.apply_to(format!("{label}:")), path.display()));
    }

    /// Final status line of a command.
    pub(crate) fn done(&self, msg: &str) {
        self.line(&self.done.apply_to(msg).to_string());
    }

    /// Non-fatal problems collected during a build or check.
    pub(crate) fn warnings(&self, warnings: &[String]) {
        for warning in warnings {
            self.line(&self.warn.apply_to(format!("Warning: {warning}")).to_string());
        }
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.warnings(&[msg.to_owned()]);
    }

    /// The error that ended the command.
    pub(crate) fn error(&self, err: &CliError) {
        self.line(&self.fail.apply_to(format!("Error: {err}")).to_string());
    }
}
