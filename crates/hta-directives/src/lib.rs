//! Apache `.htaccess` directive synthesis for static site builds.
//!
//! Turns a site generator's finalized route table plus a handful of
//! user-declared rules into the ordered list of directives an Apache server
//! reads at request time.
//!
//! # Rule Sources
//!
//! Directives are collected from four sources, always in this order:
//!
//! 1. **Custom rules**: raw passthrough lines, emitted verbatim.
//! 2. **User error pages**: [`ErrorPageRule`]s become `ErrorDocument` lines.
//! 3. **Generator routes**: redirect routes become `RedirectMatch 301` lines;
//!    pages named like an HTTP status (`/404`) become `ErrorDocument` lines
//!    when no user error pages were configured.
//! 4. **User redirects**: [`RedirectRule`]s become `RedirectMatch` lines.
//!
//! A status code may be claimed by at most one error page. A duplicate, or a
//! redirect pattern containing a line break, is a [`Conflict`]: the whole run
//! is aborted and nothing is written.
//!
//! # Example
//!
//! ```
//! use hta_directives::{ErrorPageRule, GeneratorRoute, HttpErrorCode, RuleSet, synthesize};
//!
//! let rules = RuleSet {
//!     error_pages: Some(vec![ErrorPageRule::new(HttpErrorCode::NotFound, "errors/404")]),
//!     ..RuleSet::default()
//! };
//! let routes = [GeneratorRoute::redirect("/faq", "/about")];
//!
//! let directives = synthesize(&rules, &routes).unwrap();
//! assert_eq!(
//!     directives.to_string(),
//!     "ErrorDocument 404 /errors/404.html\n\
//!      RedirectMatch 301 ^/faq(/(index.html)?)?$ /about"
//! );
//! ```
//!
//! # Lifecycle
//!
//! [`Integration`] wraps the synthesizer with the two build hooks a host
//! generator provides (setup and build-done), a memoized enable switch, and
//! the final [`write_htaccess`] step.

mod document;
mod error;
mod integration;
mod pattern;
mod route;
mod rule;
mod synthesizer;
mod writer;

pub use document::{normalize_document, with_html_extension};
pub use error::{Conflict, WriteError};
pub use integration::{
    BuildEnvironment, BuildOutcome, EnableSwitch, Integration, OutputMode, UnsupportedReason,
};
pub use pattern::to_apache_regex;
pub use route::{GeneratorRoute, RedirectDescriptor, RedirectTarget, RouteKind};
pub use rule::{ErrorPageRule, HttpErrorCode, MatchPattern, RedirectRule, RedirectStatus, RuleError};
pub use synthesizer::{Directives, HandledCodes, RuleSet, synthesize};
pub use writer::{HTACCESS_FILENAME, WriteMode, WrittenFile, write_htaccess};
