//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod check;

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;

use std::path::Path;

use hta_directives::GeneratorRoute;

use crate::error::CliError;
use crate::routes::load_routes;

/// Load the route table if one was given, otherwise an empty one.
fn routes_or_empty(path: Option<&Path>) -> Result<Vec<GeneratorRoute>, CliError> {
    match path {
        Some(path) => load_routes(path),
        None => {
            tracing::debug!("No route table given, skipping generator routes");
            Ok(Vec::new())
        }
    }
}
