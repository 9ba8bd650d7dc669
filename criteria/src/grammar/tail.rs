//! Tail decoder: picks Range, operator-qualified values or Terms.

use crate::error::DecodeError;

use super::constraint::{Constraint, Operator, OperatorTerms, Range};
use super::tokens::{range_bound, Bound};

const OPERATOR: &str = "operator";
const VALUES: &str = "values";

/// Decode a segment tail.
///
/// Precedence:
/// 1. any `ge`/`le` bound token makes it a Range (other tokens are ignored)
/// 2. leading `operator` introduces `operator.<and|or>.values...`
/// 3. leading `values` is a value list with no operator
/// 4. anything else is a verbatim Terms list
pub fn decode_tail(tokens: &[&str]) -> Result<Constraint, DecodeError> {
    if tokens.is_empty() {
        return Err(DecodeError::EmptyTail);
    }

    if let Some(range) = decode_range(tokens)? {
        return Ok(Constraint::Range(range));
    }

    match tokens[0] {
        OPERATOR => decode_operator_terms(&tokens[1..]),
        VALUES => Ok(Constraint::Values(OperatorTerms {
            operator: None,
            values: collect_values(&tokens[1..])?,
        })),
        _ => Ok(Constraint::Terms(collect_values(tokens)?)),
    }
}

/// First `ge` and first `le` win; `None` if the tail has no bound token.
fn decode_range(tokens: &[&str]) -> Result<Option<Range>, DecodeError> {
    let mut range = Range::default();
    let mut found = false;

    for token in tokens {
        let Some(bound) = range_bound(token) else {
            continue;
        };
        found = true;
        match bound? {
            Bound::Ge(n) if range.ge.is_none() => range.ge = Some(n),
            Bound::Le(n) if range.le.is_none() => range.le = Some(n),
            _ => {}
        }
    }

    Ok(found.then_some(range))
}

fn decode_operator_terms(tokens: &[&str]) -> Result<Constraint, DecodeError> {
    let Some((op_token, rest)) = tokens.split_first() else {
        return Err(DecodeError::UnknownOperator(String::new()));
    };
    let operator =
        Operator::parse(op_token).ok_or_else(|| DecodeError::UnknownOperator(op_token.to_string()))?;

    match rest.split_first() {
        Some((&VALUES, values)) => Ok(Constraint::Values(OperatorTerms {
            operator: Some(operator),
            values: collect_values(values)?,
        })),
        Some((other, _)) => Err(DecodeError::MissingValuesMarker(other.to_string())),
        None => Err(DecodeError::MissingValuesMarker(String::new())),
    }
}

fn collect_values(tokens: &[&str]) -> Result<Vec<String>, DecodeError> {
    if tokens.is_empty() {
        return Err(DecodeError::EmptyValues);
    }
    Ok(tokens.iter().map(|t| t.to_string()).collect())
}
