//! User-declared rules: error pages and redirects.

use std::fmt;
use std::str::FromStr;

use crate::document::normalize_document;
use crate::pattern::to_apache_regex;

/// Error constructing a rule from raw values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// Status is not one of the supported `ErrorDocument` codes.
    #[error("{0} is not a supported error page status")]
    InvalidErrorCode(u16),
    /// Status is not one of the supported `RedirectMatch` codes.
    #[error("{0} is not a supported redirect status (expected 301, 302, 303 or 410)")]
    InvalidRedirectCode(u16),
    /// Redirect status given as an unknown alias.
    #[error("unknown redirect status `{0}` (expected permanent, temp, seeother or gone)")]
    UnknownRedirectAlias(String),
}

/// HTTP error status an error page can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(try_from = "u16")
)]
#[repr(u16)]
pub enum HttpErrorCode {
    BadRequest = 400,
    Unauthorized = 401,
    PaymentRequired = 402,
    Forbidden = 403,
    NotFound = 404,
    MethodNotAllowed = 405,
    NotAcceptable = 406,
    Gone = 410,
    PreconditionFailed = 412,
    UnsupportedMediaType = 415,
    ImATeapot = 418,
    EnhanceYourCalm = 420,
    UnprocessableEntity = 422,
    UpgradeRequired = 426,
    TooManyRequests = 429,
    UnavailableForLegalReasons = 451,
    InternalServerError = 500,
    NotImplemented = 501,
    BadGateway = 502,
    ServiceUnavailable = 503,
    GatewayTimeout = 504,
    HttpVersionNotSupported = 505,
}

impl HttpErrorCode {
    /// Every supported status, in ascending order.
    pub const ALL: [Self; 22] = [
        Self::BadRequest,
        Self::Unauthorized,
        Self::PaymentRequired,
        Self::Forbidden,
        Self::NotFound,
        Self::MethodNotAllowed,
        Self::NotAcceptable,
        Self::Gone,
        Self::PreconditionFailed,
        Self::UnsupportedMediaType,
        Self::ImATeapot,
        Self::EnhanceYourCalm,
        Self::UnprocessableEntity,
        Self::UpgradeRequired,
        Self::TooManyRequests,
        Self::UnavailableForLegalReasons,
        Self::InternalServerError,
        Self::NotImplemented,
        Self::BadGateway,
        Self::ServiceUnavailable,
        Self::GatewayTimeout,
        Self::HttpVersionNotSupported,
    ];

    /// Numeric status code.
    #[must_use]
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

impl TryFrom<u16> for HttpErrorCode {
    type Error = RuleError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_u16() == code)
            .ok_or(RuleError::InvalidErrorCode(code))
    }
}

impl fmt::Display for HttpErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

/// Status sent with a `RedirectMatch` directive.
///
/// Parsed from the numeric code or from one of the aliases `permanent`,
/// `temp`, `seeother` and `gone`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(try_from = "RedirectStatusRepr")
)]
pub enum RedirectStatus {
    /// 301.
    #[default]
    Permanent,
    /// 302.
    Temporary,
    /// 303.
    SeeOther,
    /// 410.
    Gone,
}

impl RedirectStatus {
    /// Numeric status code.
    #[must_use]
    pub fn as_u16(self) -> u16 {
        match self {
            Self::Permanent => 301,
            Self::Temporary => 302,
            Self::SeeOther => 303,
            Self::Gone => 410,
        }
    }
}

impl TryFrom<u16> for RedirectStatus {
    type Error = RuleError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            301 => Ok(Self::Permanent),
            302 => Ok(Self::Temporary),
            303 => Ok(Self::SeeOther),
            410 => Ok(Self::Gone),
            other => Err(RuleError::InvalidRedirectCode(other)),
        }
    }
}

impl FromStr for RedirectStatus {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(code) = s.parse::<u16>() {
            return Self::try_from(code);
        }
        match s.to_ascii_lowercase().as_str() {
            "permanent" => Ok(Self::Permanent),
            "temp" => Ok(Self::Temporary),
            "seeother" => Ok(Self::SeeOther),
            "gone" => Ok(Self::Gone),
            _ => Err(RuleError::UnknownRedirectAlias(s.to_owned())),
        }
    }
}

impl fmt::Display for RedirectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RedirectStatusRepr {
    Code(u16),
    Alias(String),
}

#[cfg(feature = "serde")]
impl TryFrom<RedirectStatusRepr> for RedirectStatus {
    type Error = RuleError;

    fn try_from(repr: RedirectStatusRepr) -> Result<Self, Self::Error> {
        match repr {
            RedirectStatusRepr::Code(code) => Self::try_from(code),
            RedirectStatusRepr::Alias(alias) => alias.parse(),
        }
    }
}

/// Maps an HTTP error status to the page served for it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct ErrorPageRule {
    /// Status the page is served for.
    pub code: HttpErrorCode,
    /// Site-relative page path, with or without leading `/` and `.html`.
    pub document: String,
}

impl ErrorPageRule {
    /// Create an error page rule.
    pub fn new(code: HttpErrorCode, document: impl Into<String>) -> Self {
        Self {
            code,
            document: document.into(),
        }
    }

    /// Document as an absolute site path ending in `.html`.
    #[must_use]
    pub fn normalized_document(&self) -> String {
        normalize_document(&self.document)
    }
}

/// Request path matcher of a [`RedirectRule`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(from = "MatchPatternRepr")
)]
pub enum MatchPattern {
    /// Used verbatim as the Apache regex.
    Literal(String),
    /// Regex literal in `/source/flags` form, translated with [`to_apache_regex`].
    Regex(String),
}

impl MatchPattern {
    /// Create a literal pattern.
    pub fn literal(pattern: impl Into<String>) -> Self {
        Self::Literal(pattern.into())
    }

    /// Create a pattern from a `/source/flags` regex literal.
    pub fn regex(literal: impl Into<String>) -> Self {
        Self::Regex(literal.into())
    }

    /// Pattern in `RedirectMatch` syntax.
    #[must_use]
    pub fn to_apache(&self) -> String {
        match self {
            Self::Literal(pattern) => pattern.clone(),
            Self::Regex(literal) => to_apache_regex(literal),
        }
    }
}

/// `match = "..."` is a literal, `match = { regex = "..." }` a regex literal.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum MatchPatternRepr {
    Literal(String),
    Regex { regex: String },
}

#[cfg(feature = "serde")]
impl From<MatchPatternRepr> for MatchPattern {
    fn from(repr: MatchPatternRepr) -> Self {
        match repr {
            MatchPatternRepr::Literal(pattern) => Self::Literal(pattern),
            MatchPatternRepr::Regex { regex } => Self::Regex(regex),
        }
    }
}

/// Redirects requests whose path matches `pattern` to `url`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct RedirectRule {
    /// Redirect status, 301 when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub code: Option<RedirectStatus>,
    /// Request path matcher.
    #[cfg_attr(feature = "serde", serde(rename = "match"))]
    pub pattern: MatchPattern,
    /// Redirect target.
    pub url: String,
}

impl RedirectRule {
    /// Create a redirect rule with the default status.
    pub fn new(pattern: MatchPattern, url: impl Into<String>) -> Self {
        Self {
            code: None,
            pattern,
            url: url.into(),
        }
    }

    /// Set an explicit redirect status.
    #[must_use]
    pub fn with_code(mut self, code: RedirectStatus) -> Self {
        self.code = Some(code);
        self
    }

    /// Effective redirect status.
    #[must_use]
    pub fn status(&self) -> RedirectStatus {
        self.code.unwrap_or_default()
    }
}
