//! `hta check` command implementation.

use std::path::PathBuf;

use clap::Args;
use hta_config::Config;
use hta_directives::synthesize;

use super::routes_or_empty;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover hta.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Route table emitted by the site generator (JSON array).
    #[arg(short, long)]
    routes: Option<PathBuf>,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Directives go to stdout. Ignores the enable switch and output mode.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the route table cannot be
    /// loaded, or if the rules conflict.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;
        let routes = routes_or_empty(self.routes.as_deref())?;
        let directives = synthesize(&config.rule_set(), &routes)?;

        for line in directives.lines() {
            output.directive(line);
        }
        output.success(&format!("{} rule(s) OK", directives.len()));

        Ok(())
    }
}
