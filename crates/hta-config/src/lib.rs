//! Configuration management for hta.
//!
//! Parses `hta.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Example
//!
//! ```toml
//! output_dir = "dist"
//! enabled_if_env = "DEPLOY_TO_APACHE"
//! custom_rules = ["Options -Indexes"]
//!
//! [[error_pages]]
//! code = 404
//! document = "errors/404"
//!
//! [[redirects]]
//! match = { regex = '/^\/github\b/' }
//! url = "https://github.com/example"
//! code = "temp"
//! ```
//!
//! Leaving out `error_pages` entirely lets error pages be discovered from the
//! route table; `error_pages = []` turns discovery off.
//!
//! ## Environment Variable Expansion
//!
//! `${VAR}` and `${VAR:-default}` are expanded in:
//! - `output_dir`
//! - `redirects[].url`

mod expand;

use std::path::{Path, PathBuf};

use hta_directives::{EnableSwitch, ErrorPageRule, RedirectRule, RuleSet};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override enabled flag.
    pub enabled: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "hta.toml";

/// Output directory used when none is configured.
const DEFAULT_OUTPUT_DIR: &str = "dist";

/// Values of `enabled_if_env` that count as "off".
const FALSY_VALUES: [&str; 5] = ["", "0", "false", "no", "off"];

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Whether generation runs at all.
    pub enabled: bool,
    /// Only generate when this environment variable is set to a truthy value.
    pub enabled_if_env: Option<String>,
    /// Output directory as written in TOML.
    output_dir: Option<String>,
    /// Raw lines copied to the top of the file.
    pub custom_rules: Option<Vec<String>>,
    /// Explicit error pages.
    pub error_pages: Option<Vec<ErrorPageRule>>,
    /// Explicit redirects.
    pub redirects: Option<Vec<RedirectRule>>,

    /// Resolved output directory (set after loading).
    #[serde(skip)]
    pub output_dir_resolved: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`output_dir`").
        field: String,
        /// Error message (e.g., "${`SITE_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `hta.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Rule sources for the synthesizer.
    #[must_use]
    pub fn rule_set(&self) -> RuleSet {
        RuleSet {
            custom_rules: self.custom_rules.clone(),
            error_pages: self.error_pages.clone(),
            redirects: self.redirects.clone(),
        }
    }

    /// Enable switch honoring `enabled` and `enabled_if_env`.
    ///
    /// The environment variable is read lazily, when the switch is first
    /// evaluated.
    #[must_use]
    pub fn enable_switch(&self) -> EnableSwitch {
        match (&self.enabled_if_env, self.enabled) {
            (_, false) => EnableSwitch::Fixed(false),
            (None, true) => EnableSwitch::Fixed(true),
            (Some(var), true) => {
                let var = var.clone();
                EnableSwitch::Predicate(Box::new(move || env_flag(&var)))
            }
        }
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(output_dir) = &settings.output_dir {
            self.output_dir_resolved.clone_from(output_dir);
        }
        if let Some(enabled) = settings.enabled {
            self.enabled = enabled;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            enabled: true,
            enabled_if_env: None,
            output_dir: None,
            custom_rules: None,
            error_pages: None,
            redirects: None,
            output_dir_resolved: base.join(DEFAULT_OUTPUT_DIR),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(var) = &self.enabled_if_env {
            require_non_empty(var, "enabled_if_env")?;
        }
        self.validate_error_pages()?;
        self.validate_redirects()?;
        Ok(())
    }

    fn validate_error_pages(&self) -> Result<(), ConfigError> {
        for (i, page) in self.error_pages.iter().flatten().enumerate() {
            let field = format!("error_pages[{i}].document");
            if page.document.trim_matches('/').trim().is_empty() {
                return Err(ConfigError::Validation(format!("{field} cannot be empty")));
            }
            if page.document.contains(char::is_whitespace) {
                return Err(ConfigError::Validation(format!(
                    "{field} cannot contain whitespace"
                )));
            }
        }
        Ok(())
    }

    fn validate_redirects(&self) -> Result<(), ConfigError> {
        for (i, redirect) in self.redirects.iter().flatten().enumerate() {
            let field = format!("redirects[{i}].url");
            require_non_empty(&redirect.url, &field)?;
            // Apache splits directive arguments on whitespace
            if redirect.url.contains(char::is_whitespace) {
                return Err(ConfigError::Validation(format!(
                    "{field} cannot contain whitespace"
                )));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref output_dir) = self.output_dir {
            self.output_dir = Some(expand::expand_env(output_dir, "output_dir")?);
        }

        for (i, redirect) in self.redirects.iter_mut().flatten().enumerate() {
            redirect.url = expand::expand_env(&redirect.url, &format!("redirects[{i}].url"))?;
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.output_dir_resolved =
            config_dir.join(self.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR));
    }
}

/// Whether the environment variable `var` is set to a truthy value.
fn env_flag(var: &str) -> bool {
    std::env::var(var).is_ok_and(|value| {
        let value = value.trim().to_ascii_lowercase();
        !FALSY_VALUES.contains(&value.as_str())
    })
}
