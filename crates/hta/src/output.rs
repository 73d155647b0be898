//! Terminal reporting for CLI commands.

use console::{Term, style};

/// Status lines go to stderr; generated directives go to stdout so they can
/// be piped into a file.
pub(crate) struct Output {
    status: Term,
    directives: Term,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            status: Term::stderr(),
            directives: Term::stdout(),
        }
    }

    pub(crate) fn info(&self, msg: &str) {
        self.status_line(msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.status_line(&style(msg).green().to_string());
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.status_line(&style(msg).yellow().to_string());
    }

    pub(crate) fn error(&self, msg: &str) {
        self.status_line(&style(msg).red().to_string());
    }

    /// Write one directive to stdout, unstyled.
    pub(crate) fn directive(&self, line: &str) {
        // A closed pipe only loses output; the command itself succeeded.
        let _ = self.directives.write_line(line);
    }

    fn status_line(&self, line: &str) {
        let _ = self.status.write_line(line);
    }
}
