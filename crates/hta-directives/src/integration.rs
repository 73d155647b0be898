//! Build lifecycle integration.
//!
//! A host site generator calls [`Integration::setup`] when the build starts
//! and [`Integration::build_done`] once its route table is final. Generation
//! is best-effort: conflicts and unsupported environments are reported in the
//! returned [`BuildOutcome`] and logged, never turned into a build failure.
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use hta_directives::{BuildEnvironment, EnableSwitch, GeneratorRoute, Integration, RuleSet};
//!
//! let integration = Integration::new(RuleSet::default(), EnableSwitch::Fixed(true));
//! let env = BuildEnvironment::static_output(PathBuf::from("dist"));
//!
//! integration.setup(&env);
//! let _outcome = integration.build_done(&env, &[GeneratorRoute::page("/404")])?;
//! # Ok::<(), hta_directives::WriteError>(())
//! ```

use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

use crate::error::{Conflict, WriteError};
use crate::route::GeneratorRoute;
use crate::synthesizer::{RuleSet, synthesize};
use crate::writer::{WrittenFile, write_htaccess};

/// Rendering mode of the host build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Fully pre-rendered site.
    #[default]
    Static,
    /// Server-rendered site; Apache does not serve it directly.
    Server,
}

/// What the host build tells the integration about itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildEnvironment {
    /// Rendering mode.
    pub output_mode: OutputMode,
    /// Directory the site is written to, if the host could resolve one.
    pub output_dir: Option<PathBuf>,
}

impl BuildEnvironment {
    /// Static build writing to `output_dir`.
    #[must_use]
    pub fn static_output(output_dir: PathBuf) -> Self {
        Self {
            output_mode: OutputMode::Static,
            output_dir: Some(output_dir),
        }
    }

    fn unsupported_reason(&self) -> Option<UnsupportedReason> {
        if self.output_mode == OutputMode::Server {
            Some(UnsupportedReason::ServerOutput)
        } else if self.output_dir.is_none() {
            Some(UnsupportedReason::NoOutputDirectory)
        } else {
            None
        }
    }
}

/// Whether generation runs at all.
///
/// Evaluated at most once per [`Integration`].
pub enum EnableSwitch {
    /// Constant answer.
    Fixed(bool),
    /// Computed on first use, e.g. from the environment.
    Predicate(Box<dyn Fn() -> bool + Send + Sync>),
}

impl EnableSwitch {
    fn evaluate(&self) -> bool {
        match self {
            Self::Fixed(enabled) => *enabled,
            Self::Predicate(predicate) => predicate(),
        }
    }
}

impl From<bool> for EnableSwitch {
    fn from(enabled: bool) -> Self {
        Self::Fixed(enabled)
    }
}

impl fmt::Debug for EnableSwitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(enabled) => f.debug_tuple("Fixed").field(enabled).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Environmental reason generation was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedReason {
    /// The build renders on the server.
    ServerOutput,
    /// No output directory could be resolved.
    NoOutputDirectory,
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServerOutput => f.write_str("server-rendered output is not supported"),
            Self::NoOutputDirectory => f.write_str("no output directory was resolved"),
        }
    }
}

/// Result of [`Integration::build_done`].
#[derive(Debug, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The enable switch was off; nothing was computed.
    Disabled,
    /// The environment cannot be served by an `.htaccess` file.
    Unsupported(UnsupportedReason),
    /// A conflict aborted generation; nothing was written.
    Conflict(Conflict),
    /// No rule produced a directive; nothing was written.
    Empty,
    /// The file was written.
    Written {
        /// Where and how.
        file: WrittenFile,
        /// Number of directives written.
        rules: usize,
    },
}

/// `.htaccess` generation hooked into a site build.
#[derive(Debug)]
pub struct Integration {
    rules: RuleSet,
    switch: EnableSwitch,
    enabled: OnceLock<bool>,
}

impl Integration {
    /// Create an integration for one build.
    #[must_use]
    pub fn new(rules: RuleSet, switch: EnableSwitch) -> Self {
        Self {
            rules,
            switch,
            enabled: OnceLock::new(),
        }
    }

    /// Whether generation is enabled, evaluating the switch on first call.
    pub fn is_enabled(&self) -> bool {
        *self.enabled.get_or_init(|| self.switch.evaluate())
    }

    /// Setup hook. Returns whether generation will run.
    pub fn setup(&self, env: &BuildEnvironment) -> bool {
        if !self.is_enabled() {
            tracing::debug!("htaccess generation disabled");
            return false;
        }
        if env.output_mode == OutputMode::Server {
            tracing::warn!("htaccess generation does not support server-rendered output, skipping");
            return false;
        }
        true
    }

    /// Build-done hook: synthesize directives and write them.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError`] only when the file cannot be written. Conflicts
    /// and skipped environments are reported through [`BuildOutcome`].
    pub fn build_done(
        &self,
        env: &BuildEnvironment,
        routes: &[GeneratorRoute],
    ) -> Result<BuildOutcome, WriteError> {
        if !self.is_enabled() {
            tracing::debug!("htaccess generation disabled, skipping");
            return Ok(BuildOutcome::Disabled);
        }

        let output_dir = match (env.unsupported_reason(), &env.output_dir) {
            (None, Some(output_dir)) => output_dir,
            (reason, _) => {
                let reason = reason.unwrap_or(UnsupportedReason::NoOutputDirectory);
                tracing::warn!(%reason, "Skipping htaccess generation");
                return Ok(BuildOutcome::Unsupported(reason));
            }
        };

        let directives = match synthesize(&self.rules, routes) {
            Ok(directives) => directives,
            Err(conflict) => {
                tracing::error!(%conflict, "htaccess generation aborted, no file written");
                return Ok(BuildOutcome::Conflict(conflict));
            }
        };

        if directives.is_empty() {
            tracing::debug!("No htaccess rules to write");
            return Ok(BuildOutcome::Empty);
        }

        let file = write_htaccess(output_dir, &directives.to_string())?;
        tracing::info!(
            rules = directives.len(),
            path = %file.path.display(),
            "Generated htaccess"
        );
        Ok(BuildOutcome::Written {
            file,
            rules: directives.len(),
        })
    }
}
