//! Regex literal translation to `RedirectMatch` syntax.
//!
//! The translation is textual: it only rewrites the handful of constructs
//! that differ between a delimited regex literal and what Apache's redirect
//! matcher expects.
//!
//! ```text
//! /^\/github\b/      ->  ^/github\b
//! /^\/docs [a b]$/   ->  ^/docs%20(?:[ab]|%20)$
//! /^\/about/i        ->  (?i)^/about
//! ```

/// Escaped form of a literal space in a request path.
const SPACE: &str = "%20";

/// A space inside a negated class, spelled without whitespace.
const SPACE_ESCAPE: &str = r"\x20";

/// Flag characters allowed after the closing delimiter.
const FLAG_CHARS: &str = "dgimsuvy";

/// Convert a `/source/flags` regex literal into a `RedirectMatch` pattern.
///
/// - The enclosing delimiters are stripped; the `i` flag becomes an inline
///   `(?i)` prefix and other flags are dropped. A value that does not look
///   delimited is taken as bare source.
/// - `\/` is unescaped to `/`.
/// - A bracket expression containing a space becomes an alternation between
///   the expression without the space and `%20`, e.g. `[a b]` becomes
///   `(?:[ab]|%20)`. In a negated expression the space is written as `\x20`
///   so the directive keeps a single pattern argument.
/// - Any other space, escaped or not, becomes `%20`.
///
/// # Examples
///
/// ```
/// use hta_directives::to_apache_regex;
///
/// assert_eq!(to_apache_regex(r"/^\/github\b/"), r"^/github\b");
/// assert_eq!(to_apache_regex(r"/^\/a[b c]$/"), r"^/a(?:[bc]|%20)$");
/// assert_eq!(to_apache_regex(r"/^\/my page$/"), r"^/my%20page$");
/// ```
pub fn to_apache_regex(literal: &str) -> String {
    let (source, flags) = split_delimiters(literal);

    let mut out = String::with_capacity(source.len() + 8);
    if flags.contains('i') {
        out.push_str("(?i)");
    }

    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('/') => out.push('/'),
                Some(' ') => out.push_str(SPACE),
                Some(escaped) => {
                    out.push('\\');
                    out.push(escaped);
                }
                None => out.push('\\'),
            },
            '[' => push_bracket_expression(&mut chars, &mut out),
            ' ' => out.push_str(SPACE),
            _ => out.push(c),
        }
    }
    out
}

/// Split a regex literal into source and flags.
fn split_delimiters(literal: &str) -> (&str, &str) {
    let Some(rest) = literal.strip_prefix('/') else {
        return (literal, "");
    };
    match rest.rfind('/') {
        Some(end) if rest[end + 1..].chars().all(|c| FLAG_CHARS.contains(c)) => {
            (&rest[..end], &rest[end + 1..])
        }
        _ => (literal, ""),
    }
}

/// Consume a bracket expression (the opening `[` already read) and append
/// its translation to `out`.
fn push_bracket_expression(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    out: &mut String,
) {
    let negated = chars.next_if_eq(&'^').is_some();

    let mut members = String::new();
    // A `]` right after the opening bracket is a member, not the end.
    if chars.next_if_eq(&']').is_some() {
        members.push(']');
    }

    let mut closed = false;
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('/') => members.push('/'),
                Some(' ') => members.push(' '),
                Some(escaped) => {
                    members.push('\\');
                    members.push(escaped);
                }
                None => members.push('\\'),
            },
            ']' => {
                closed = true;
                break;
            }
            _ => members.push(c),
        }
    }

    let prefix = if negated { "[^" } else { "[" };

    if !closed {
        // Not a bracket expression after all; keep the text, escape spaces.
        out.push_str(prefix);
        out.push_str(&members.replace(' ', SPACE));
        return;
    }

    if negated || !members.contains(' ') {
        out.push_str(prefix);
        out.push_str(&members.replace(' ', SPACE_ESCAPE));
        out.push(']');
        return;
    }

    let without_space = members.replace(' ', "");
    if without_space.is_empty() {
        out.push_str(SPACE);
    } else {
        out.push_str("(?:[");
        out.push_str(&without_space);
        out.push_str("]|");
        out.push_str(SPACE);
        out.push(')');
    }
}
