//! Directive synthesis.
//!
//! [`synthesize`] runs the four rule sources in their fixed order and threads
//! a single [`HandledCodes`] set through them. The first [`Conflict`]
//! short-circuits the run; the lines accepted so far are dropped with it.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::document::with_html_extension;
use crate::error::Conflict;
use crate::route::{GeneratorRoute, RouteKind};
use crate::rule::{ErrorPageRule, RedirectRule};

/// Route of a page named after an HTTP status, e.g. `/404`.
static STATUS_PAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/([345][0-9]{2})$").unwrap());

/// User-supplied rule sources.
///
/// `None` and an empty list differ for `error_pages`: only `None` lets error
/// pages be discovered from the route table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    /// Raw lines copied to the top of the file.
    pub custom_rules: Option<Vec<String>>,
    /// Explicit error pages.
    pub error_pages: Option<Vec<ErrorPageRule>>,
    /// Explicit redirects, emitted after generator redirects.
    pub redirects: Option<Vec<RedirectRule>>,
}

/// HTTP error statuses already claimed by an error page in the current run.
#[derive(Debug, Default)]
pub struct HandledCodes(HashSet<u16>);

impl HandledCodes {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `code`, failing if an earlier error page already did.
    pub fn claim(&mut self, code: u16) -> Result<(), Conflict> {
        if self.0.insert(code) {
            Ok(())
        } else {
            Err(Conflict::DuplicateErrorCode { code })
        }
    }
}

/// Ordered directive lines of a successful run.
///
/// Displays as the lines joined with `\n`, without a trailing newline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    lines: Vec<String>,
}

impl Directives {
    /// Directive lines in output order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of directives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether no directive was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for Directives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

/// Collect directives from every rule source.
///
/// Sources run in this order: custom rules, user error pages, generator
/// routes, user redirects. Within a source, input order is kept.
///
/// # Errors
///
/// Returns the first [`Conflict`] met: an error status claimed twice, or a
/// redirect pattern containing a line break. Later sources are not run.
pub fn synthesize(rules: &RuleSet, routes: &[GeneratorRoute]) -> Result<Directives, Conflict> {
    let mut synthesizer = Synthesizer::default();

    synthesizer.custom_rules(rules.custom_rules.as_deref().unwrap_or_default());
    synthesizer.user_error_pages(rules.error_pages.as_deref().unwrap_or_default())?;
    synthesizer.generator_routes(routes, rules.error_pages.is_none())?;
    synthesizer.user_redirects(rules.redirects.as_deref().unwrap_or_default())?;

    Ok(Directives {
        lines: synthesizer.lines,
    })
}

#[derive(Default)]
struct Synthesizer {
    handled: HandledCodes,
    lines: Vec<String>,
}

impl Synthesizer {
    fn custom_rules(&mut self, rules: &[String]) {
        self.lines.extend(rules.iter().cloned());
    }

    fn user_error_pages(&mut self, pages: &[ErrorPageRule]) -> Result<(), Conflict> {
        for page in pages {
            let code = page.code.as_u16();
            self.handled.claim(code)?;
            self.push_error_document(code, &page.normalized_document());
        }
        Ok(())
    }

    fn generator_routes(
        &mut self,
        routes: &[GeneratorRoute],
        discover_error_pages: bool,
    ) -> Result<(), Conflict> {
        for route in routes {
            match route.kind {
                RouteKind::Redirect => match route.destination() {
                    Some(destination) => self.lines.push(format!(
                        "RedirectMatch 301 ^{}(/(index.html)?)?$ {destination}",
                        route.route
                    )),
                    None => {
                        tracing::warn!(route = %route.route, "Redirect route has no destination, skipping");
                    }
                },
                RouteKind::Page if discover_error_pages => {
                    if let Some(code) = status_page_code(&route.route) {
                        self.handled.claim(code)?;
                        self.push_error_document(code, &with_html_extension(&route.route));
                    }
                }
                RouteKind::Page | RouteKind::Other => {}
            }
        }
        Ok(())
    }

    fn user_redirects(&mut self, redirects: &[RedirectRule]) -> Result<(), Conflict> {
        for redirect in redirects {
            let pattern = redirect.pattern.to_apache();
            if pattern.contains(['\n', '\r']) {
                return Err(Conflict::InvalidPattern {
                    url: redirect.url.clone(),
                    pattern,
                });
            }
            self.lines.push(format!(
                "RedirectMatch {} {pattern} {}",
                redirect.status(),
                redirect.url
            ));
        }
        Ok(())
    }

    fn push_error_document(&mut self, code: u16, document: &str) {
        self.lines.push(format!("ErrorDocument {code} {document}"));
    }
}

/// Status code of a route like `/404`.
fn status_page_code(route: &str) -> Option<u16> {
    STATUS_PAGE_RE.captures(route)?.get(1)?.as_str().parse().ok()
}
