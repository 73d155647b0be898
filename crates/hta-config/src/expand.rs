//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Supports:
/// - `${VAR}` - expands to the value of VAR, errors if unset
/// - `${VAR:-default}` - expands to VAR if set, otherwise uses default
///
/// Numeric names are never looked up, so back-references such as `/$1` in
/// redirect targets survive next to expanded variables.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        if var.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(None);
        }
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("HTA_TEST_SITE_DIR", "public");
        }
        let result = expand_env("${HTA_TEST_SITE_DIR}", "output_dir").unwrap();
        assert_eq!(result, "public");
        unsafe {
            std::env::remove_var("HTA_TEST_SITE_DIR");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("HTA_TEST_UNSET_HOST");
        }
        let result = expand_env(
            "https://${HTA_TEST_UNSET_HOST:-example.com}/docs",
            "redirects[0].url",
        )
        .unwrap();
        assert_eq!(result, "https://example.com/docs");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("HTA_TEST_MISSING");
        }
        let err = expand_env("${HTA_TEST_MISSING}", "output_dir").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("HTA_TEST_MISSING"));
        assert!(err.to_string().contains("output_dir"));
    }

    #[test]
    fn test_backreference_not_expanded() {
        let result = expand_env("https://example.com/$1", "redirects[0].url").unwrap();
        assert_eq!(result, "https://example.com/$1");
    }

    #[test]
    fn test_backreference_kept_next_to_expanded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("HTA_TEST_REDIRECT_HOST", "docs.example.com");
        }
        let result =
            expand_env("https://${HTA_TEST_REDIRECT_HOST}/$1", "redirects[0].url").unwrap();
        assert_eq!(result, "https://docs.example.com/$1");
        unsafe {
            std::env::remove_var("HTA_TEST_REDIRECT_HOST");
        }
    }
}
