//! Site path helpers for `ErrorDocument` targets.

/// Extension every error document is served with.
const HTML_EXTENSION: &str = ".html";

/// Normalize an error document to an absolute site path ending in `.html`.
///
/// Leading, trailing and repeated slashes are collapsed so the result always
/// has exactly one leading `/`. Normalizing an already normalized path is a
/// no-op.
///
/// # Examples
///
/// ```
/// use hta_directives::normalize_document;
///
/// assert_eq!(normalize_document("errors/404"), "/errors/404.html");
/// assert_eq!(normalize_document("//errors//404.html"), "/errors/404.html");
/// assert_eq!(normalize_document("/404.html"), "/404.html");
/// ```
pub fn normalize_document(document: &str) -> String {
    let segments: Vec<&str> = document.split('/').filter(|s| !s.is_empty()).collect();
    with_html_extension(&format!("/{}", segments.join("/")))
}

/// Append `.html` to `path` unless it already ends with it.
pub fn with_html_extension(path: &str) -> String {
    if path.ends_with(HTML_EXTENSION) {
        path.to_owned()
    } else {
        format!("{path}{HTML_EXTENSION}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_leading_slash() {
        assert_eq!(normalize_document("404"), "/404.html");
    }

    #[test]
    fn test_normalize_keeps_existing_extension() {
        assert_eq!(normalize_document("/errors/500.html"), "/errors/500.html");
    }

    #[test]
    fn test_normalize_collapses_repeated_slashes() {
        assert_eq!(normalize_document("///errors///404"), "/errors/404.html");
    }

    #[test]
    fn test_normalize_drops_trailing_slash() {
        assert_eq!(normalize_document("/errors/404/"), "/errors/404.html");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_document("/404");
        assert_eq!(once, "/404.html");
        assert_eq!(normalize_document(&once), once);

        let once = normalize_document("errors//not-found");
        assert_eq!(normalize_document(&once), once);
    }

    #[test]
    fn test_with_html_extension() {
        assert_eq!(with_html_extension("/404"), "/404.html");
        assert_eq!(with_html_extension("/404.html"), "/404.html");
    }
}
