//! CLI error types.

use std::path::PathBuf;

use hta_config::ConfigError;
use hta_directives::{Conflict, WriteError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Write(#[from] WriteError),

    #[error("{0}")]
    Conflict(#[from] Conflict),

    #[error("Failed to read route table {}: {source}", path.display())]
    RoutesRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid route table {}: {source}", path.display())]
    RoutesParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
