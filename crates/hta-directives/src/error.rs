//! Error types for directive synthesis and output.

use std::path::PathBuf;

/// Fatal condition that aborts a generation run.
///
/// When a conflict is reported no directives are written, not even the ones
/// accepted before it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Conflict {
    /// Two error pages claim the same HTTP status.
    #[error("duplicate error page for status {code}")]
    DuplicateErrorCode {
        /// The status claimed twice.
        code: u16,
    },

    /// A redirect pattern contains a line break and would corrupt the file.
    #[error("redirect to {url} has a match pattern containing a line break")]
    InvalidPattern {
        /// Target URL of the offending redirect rule.
        url: String,
        /// The pattern after translation.
        pattern: String,
    },
}

/// Error writing the generated file.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// I/O error on the target path.
    #[error("failed to write {}", path.display())]
    Io {
        /// File or directory being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
