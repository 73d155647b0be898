//! `hta build` command implementation.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use hta_config::{CliSettings, Config};
use hta_directives::{BuildEnvironment, BuildOutcome, Integration, OutputMode, WriteMode};

use super::routes_or_empty;
use crate::error::CliError;
use crate::output::Output;

/// How the site was built.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Pre-rendered static files.
    Static,
    /// Rendered on request by a server.
    Server,
}

impl From<Mode> for OutputMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Static => Self::Static,
            Mode::Server => Self::Server,
        }
    }
}

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover hta.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Route table emitted by the site generator (JSON array).
    #[arg(short, long)]
    routes: Option<PathBuf>,

    /// Build output directory (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// How the site was built.
    #[arg(long, value_enum, default_value_t = Mode::Static)]
    output_mode: Mode,

    /// Skip generation regardless of config.
    #[arg(long)]
    disable: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the route table cannot be loaded,
    /// or if the file cannot be written. A rule conflict is reported but
    /// does not fail the command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            output_dir: self.output_dir,
            enabled: self.disable.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let integration = Integration::new(config.rule_set(), config.enable_switch());
        let env = BuildEnvironment {
            output_mode: self.output_mode.into(),
            output_dir: Some(config.output_dir_resolved.clone()),
        };

        // Only read the route table when generation will actually run
        let routes = if integration.setup(&env) {
            routes_or_empty(self.routes.as_deref())?
        } else {
            Vec::new()
        };

        match integration.build_done(&env, &routes)? {
            BuildOutcome::Disabled => output.info("htaccess generation disabled"),
            BuildOutcome::Unsupported(reason) => {
                output.warning(&format!("Skipped htaccess generation: {reason}"));
            }
            // Best-effort: the site build itself still succeeds
            BuildOutcome::Conflict(conflict) => {
                output.error(&format!("{conflict}; no .htaccess written"));
            }
            BuildOutcome::Empty => output.info("No htaccess rules to write"),
            BuildOutcome::Written { file, rules } => {
                let verb = match file.mode {
                    WriteMode::Created => "Wrote",
                    WriteMode::Appended => "Appended",
                };
                output.success(&format!(
                    "{verb} {rules} rule(s) to {}",
                    file.path.display()
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn args(dir: &Path) -> BuildArgs {
        BuildArgs {
            config: Some(dir.join("hta.toml")),
            routes: Some(dir.join("routes.json")),
            output_dir: None,
            output_mode: Mode::Static,
            disable: false,
        }
    }

    fn write_project(dir: &Path, config: &str) {
        fs::write(dir.join("hta.toml"), config).unwrap();
        fs::write(
            dir.join("routes.json"),
            r#"[
                {"type": "page", "route": "/404"},
                {"type": "redirect", "route": "/faq", "redirect": "/about"}
            ]"#,
        )
        .unwrap();
    }

    #[test]
    fn test_build_writes_htaccess() {
        let temp = TempDir::new().unwrap();
        write_project(temp.path(), "output_dir = \"out\"\n");

        args(temp.path()).execute().unwrap();

        let content = fs::read_to_string(temp.path().join("out/.htaccess")).unwrap();
        assert_eq!(
            content,
            "ErrorDocument 404 /404.html\nRedirectMatch 301 ^/faq(/(index.html)?)?$ /about"
        );
    }

    #[test]
    fn test_build_disabled_writes_nothing() {
        let temp = TempDir::new().unwrap();
        write_project(temp.path(), "output_dir = \"out\"\n");

        let mut args = args(temp.path());
        args.disable = true;
        args.execute().unwrap();

        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn test_build_server_mode_writes_nothing() {
        let temp = TempDir::new().unwrap();
        write_project(temp.path(), "output_dir = \"out\"\n");

        let mut args = args(temp.path());
        args.output_mode = Mode::Server;
        args.execute().unwrap();

        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn test_build_conflict_succeeds_without_writing() {
        let temp = TempDir::new().unwrap();
        write_project(
            temp.path(),
            r#"
output_dir = "out"

[[error_pages]]
code = 404
document = "a"

[[error_pages]]
code = 404
document = "b"
"#,
        );

        args(temp.path()).execute().unwrap();

        assert!(!temp.path().join("out/.htaccess").exists());
    }

    #[test]
    fn test_build_output_dir_override() {
        let temp = TempDir::new().unwrap();
        write_project(temp.path(), "output_dir = \"out\"\n");

        let mut args = args(temp.path());
        args.output_dir = Some(temp.path().join("public"));
        args.execute().unwrap();

        assert!(temp.path().join("public/.htaccess").exists());
        assert!(!temp.path().join("out").exists());
    }
}
