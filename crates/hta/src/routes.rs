//! Route table loading.
//!
//! The site generator dumps its finalized routes as a JSON array:
//!
//! ```json
//! [
//!   {"type": "page", "route": "/404"},
//!   {"type": "redirect", "route": "/faq", "redirect": "/about"}
//! ]
//! ```

use std::path::Path;

use hta_directives::GeneratorRoute;

use crate::error::CliError;

/// Read the route table at `path`.
pub(crate) fn load_routes(path: &Path) -> Result<Vec<GeneratorRoute>, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::RoutesRead {
        path: path.to_path_buf(),
        source,
    })?;
    let routes: Vec<GeneratorRoute> =
        serde_json::from_str(&content).map_err(|source| CliError::RoutesParse {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(count = routes.len(), path = %path.display(), "Loaded route table");
    Ok(routes)
}

#[cfg(test)]
mod tests {
    use hta_directives::RouteKind;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_load_routes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("routes.json");
        std::fs::write(
            &path,
            r#"[
                {"type": "page", "route": "/404"},
                {"type": "redirect", "route": "/faq", "redirect": {"destination": "/about"}},
                {"type": "fallback", "route": "/_image"}
            ]"#,
        )
        .unwrap();

        let routes = load_routes(&path).unwrap();

        assert_eq!(routes.len(), 3);
        assert_eq!(routes[0], GeneratorRoute::page("/404"));
        assert_eq!(routes[1].destination(), Some("/about"));
        assert_eq!(routes[2].kind, RouteKind::Other);
    }

    #[test]
    fn test_load_routes_missing_file() {
        let err = load_routes(Path::new("/nonexistent/routes.json")).unwrap_err();
        assert!(matches!(err, CliError::RoutesRead { .. }));
        assert!(err.to_string().contains("routes.json"));
    }

    #[test]
    fn test_load_routes_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("routes.json");
        std::fs::write(&path, r#"{"type": "page"}"#).unwrap();

        let err = load_routes(&path).unwrap_err();

        assert!(matches!(err, CliError::RoutesParse { .. }));
    }
}
