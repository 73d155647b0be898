//! Output of the generated file.
//!
//! An existing `.htaccess` (for example one copied from the site's public
//! assets) is never replaced: new directives are appended after a blank line.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::WriteError;

/// Name of the generated file inside the output directory.
pub const HTACCESS_FILENAME: &str = ".htaccess";

/// How the file was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// No file existed; it was created.
    Created,
    /// Content was appended to an existing file.
    Appended,
}

/// Result of a successful [`write_htaccess`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    /// Path of the written file.
    pub path: PathBuf,
    /// Whether the file was created or appended to.
    pub mode: WriteMode,
}

/// Write `contents` to `{output_dir}/.htaccess`.
///
/// Creates `output_dir` if needed. If the file already exists, a blank line
/// separates its previous content from `contents`.
///
/// # Errors
///
/// Returns [`WriteError::Io`] if the directory or file cannot be written.
pub fn write_htaccess(output_dir: &Path, contents: &str) -> Result<WrittenFile, WriteError> {
    fs::create_dir_all(output_dir).map_err(|source| WriteError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let path = output_dir.join(HTACCESS_FILENAME);
    let mode = write_or_append(&path, contents).map_err(|source| WriteError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::debug!(path = %path.display(), ?mode, "Wrote htaccess");
    Ok(WrittenFile { path, mode })
}

fn write_or_append(path: &Path, contents: &str) -> io::Result<WriteMode> {
    // Existing content is opaque bytes; only its last byte matters.
    let existing = match fs::read(path) {
        Ok(existing) => existing,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::write(path, contents)?;
            return Ok(WriteMode::Created);
        }
        Err(e) => return Err(e),
    };

    let separator = if existing.is_empty() {
        ""
    } else if existing.ends_with(b"\n") {
        "\n"
    } else {
        "\n\n"
    };

    let mut file = OpenOptions::new().append(true).open(path)?;
    file.write_all(format!("{separator}{contents}").as_bytes())?;
    Ok(WriteMode::Appended)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_creates_file() {
        let temp = TempDir::new().unwrap();

        let written = write_htaccess(temp.path(), "ErrorDocument 404 /404.html").unwrap();

        assert_eq!(written.mode, WriteMode::Created);
        assert_eq!(written.path, temp.path().join(".htaccess"));
        assert_eq!(
            fs::read_to_string(&written.path).unwrap(),
            "ErrorDocument 404 /404.html"
        );
    }

    #[test]
    fn test_creates_missing_output_dir() {
        let temp = TempDir::new().unwrap();
        let output_dir = temp.path().join("dist/site");

        let written = write_htaccess(&output_dir, "Options -Indexes").unwrap();

        assert_eq!(written.mode, WriteMode::Created);
        assert!(output_dir.join(".htaccess").exists());
    }

    #[test]
    fn test_appends_after_blank_line() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".htaccess");
        fs::write(&path, "Options -Indexes\n").unwrap();

        let written = write_htaccess(temp.path(), "ErrorDocument 404 /404.html").unwrap();

        assert_eq!(written.mode, WriteMode::Appended);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Options -Indexes\n\nErrorDocument 404 /404.html"
        );
    }

    #[test]
    fn test_appends_after_unterminated_line() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".htaccess");
        fs::write(&path, "Options -Indexes").unwrap();

        write_htaccess(temp.path(), "ErrorDocument 404 /404.html").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Options -Indexes\n\nErrorDocument 404 /404.html"
        );
    }

    #[test]
    fn test_appends_to_empty_file_without_separator() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".htaccess");
        fs::write(&path, "").unwrap();

        let written = write_htaccess(temp.path(), "Options -Indexes").unwrap();

        assert_eq!(written.mode, WriteMode::Appended);
        assert_eq!(fs::read_to_string(&path).unwrap(), "Options -Indexes");
    }

    #[test]
    fn test_appends_to_non_utf8_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".htaccess");
        fs::write(&path, b"# caf\xe9\nOptions -Indexes\n").unwrap();

        let written = write_htaccess(temp.path(), "ErrorDocument 404 /404.html").unwrap();

        assert_eq!(written.mode, WriteMode::Appended);
        assert_eq!(
            fs::read(&path).unwrap(),
            b"# caf\xe9\nOptions -Indexes\n\nErrorDocument 404 /404.html"
        );
    }

    #[test]
    fn test_second_run_appends() {
        let temp = TempDir::new().unwrap();

        write_htaccess(temp.path(), "A").unwrap();
        write_htaccess(temp.path(), "B").unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join(".htaccess")).unwrap(),
            "A\n\nB"
        );
    }

    #[test]
    fn test_output_dir_is_a_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("dist");
        fs::write(&file, "").unwrap();

        let err = write_htaccess(&file, "A").unwrap_err();

        assert!(err.to_string().contains("dist"));
    }
}
