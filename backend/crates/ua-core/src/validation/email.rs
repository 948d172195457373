//! Email normalization and RFC 5322 `addr-spec` validation.
//!
//! Validation accepts a bare mailbox only: display names (`Bob <bob@x.io>`),
//! angle brackets, comments and address lists are rejected, as is any input that
//! a mail parser would rewrite (for example a needlessly quoted local part).

use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

/// Trim surrounding whitespace and lower-case.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Validate an already-normalized email.
#[track_caller]
pub fn validate_email(email: &str) -> CoreErrorResult<()> {
    if email.is_empty() {
        return Err(invalid("email is required"));
    }

    if !is_addr_spec(email) {
        return Err(invalid("invalid email"));
    }

    Ok(())
}

/// Mask an email for log output: `alice@example.com` -> `a***@example.com`
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{first}***@{domain}")
        }
        _ => "***@***".to_string(),
    }
}

#[track_caller]
fn invalid(message: &str) -> CoreError {
    CoreError::Validation {
        field: "email",
        message: message.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

fn is_addr_spec(input: &str) -> bool {
    // The domain can never contain '@' (neither dot-atom nor literal allow it), so
    // the last '@' separates local part and domain even for quoted local parts.
    let Some((local, domain)) = input.rsplit_once('@') else {
        return false;
    };

    is_local_part(local) && is_domain(domain)
}

fn is_local_part(local: &str) -> bool {
    if local.starts_with('"') {
        return is_canonical_quoted_string(local);
    }
    is_dot_atom(local)
}

fn is_domain(domain: &str) -> bool {
    if let Some(inner) = domain
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        return inner.chars().all(is_dtext);
    }
    is_dot_atom(domain)
}

/// `atext+ ("." atext+)*`
fn is_dot_atom(s: &str) -> bool {
    !s.is_empty()
        && s
            .split('.')
            .all(|atom| !atom.is_empty() && atom.chars().all(is_atext))
}

/// A quoted local part is only kept verbatim by a parser when quoting is
/// actually required, i.e. the content is not itself a valid dot-atom.
fn is_canonical_quoted_string(s: &str) -> bool {
    let Some(inner) = s
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return false;
    };

    let mut content = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped @ ('"' | '\\')) => content.push(escaped),
                _ => return false,
            },
            '"' => return false,
            c if is_qtext(c) || c == ' ' || c == '\t' => content.push(c),
            _ => return false,
        }
    }

    !is_dot_atom(&content)
}

fn is_atext(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '!' | '#'
                | '$'
                | '%'
                | '&'
                | '\''
                | '*'
                | '+'
                | '-'
                | '/'
                | '='
                | '?'
                | '^'
                | '_'
                | '`'
                | '{'
                | '|'
                | '}'
                | '~'
        )
        || (!c.is_ascii() && !c.is_control() && !c.is_whitespace())
}

fn is_qtext(c: char) -> bool {
    matches!(c, '!' | '#'..='[' | ']'..='~') || (!c.is_ascii() && !c.is_control())
}

fn is_dtext(c: char) -> bool {
    matches!(c, '!'..='Z' | '^'..='~')
}
