//! Tokenizers for segments, tails and numeric literals.

use crate::error::DecodeError;

use super::{SEGMENT_SEPARATOR, TOKEN_SEPARATOR};

/// A single range bound token (`ge<num>` or `le<num>`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// Lower bound, inclusive
    Ge(f64),
    /// Upper bound, inclusive
    Le(f64),
}

/// Split raw criteria into non-empty segments.
pub fn segments(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(SEGMENT_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
}

/// Split a segment into tokens.
///
/// A range bound with an integer part (`le-0`) followed by an all-digit token
/// (`24`) is re-joined into one token (`le-0.24`). Empty tokens are dropped.
pub fn tokens(segment: &str) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    let mut start = 0;
    // Start offset of a bound still waiting for its decimal part
    let mut pending_bound: Option<usize> = None;

    for part in segment.split(TOKEN_SEPARATOR) {
        let end = start + part.len();

        if let Some(bound_start) = pending_bound.take() {
            if is_digits(part) {
                out.pop();
                out.push(&segment[bound_start..end]);
                start = end + 1;
                continue;
            }
        }

        if !part.is_empty() {
            if is_integer_bound(part) {
                pending_bound = Some(start);
            }
            out.push(part);
        }
        start = end + 1;
    }

    out
}

/// Parse a numeric literal: `-? digit+ ("." digit+)?`.
pub fn parse_number(text: &str) -> Result<f64, DecodeError> {
    let malformed = || DecodeError::MalformedNumber(text.to_string());

    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (int_part, frac_part) = match unsigned.split_once(TOKEN_SEPARATOR) {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    if !is_digits(int_part) || frac_part.is_some_and(|frac| !is_digits(frac)) {
        return Err(malformed());
    }

    // Digits beyond f64 range parse to infinity, which has no encoding
    text.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(malformed)
}

/// Recognize a range bound token.
///
/// Returns `None` when the token is an ordinary value (`gender`, `level`),
/// and `Some(Err(..))` when it starts like a bound but the number is
/// malformed (`ge3x`).
pub fn range_bound(token: &str) -> Option<Result<Bound, DecodeError>> {
    let (is_lower, rest) = if let Some(rest) = token.strip_prefix("ge") {
        (true, rest)
    } else if let Some(rest) = token.strip_prefix("le") {
        (false, rest)
    } else {
        return None;
    };

    if !starts_numeric(rest) {
        return None;
    }

    let bound = match parse_number(rest) {
        Ok(n) if is_lower => Ok(Bound::Ge(n)),
        Ok(n) => Ok(Bound::Le(n)),
        Err(_) => Err(DecodeError::MalformedNumber(token.to_string())),
    };
    Some(bound)
}

fn starts_numeric(text: &str) -> bool {
    matches!(text.as_bytes().first(), Some(b'-' | b'0'..=b'9'))
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// `ge<int>` or `le<int>`, possibly negative, with no decimal part yet.
fn is_integer_bound(token: &str) -> bool {
    let Some(rest) = token.strip_prefix("ge").or_else(|| token.strip_prefix("le")) else {
        return false;
    };
    is_digits(rest.strip_prefix('-').unwrap_or(rest))
}
