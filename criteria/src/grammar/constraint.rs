//! Decoded constraint values and their canonical encoding.

use std::fmt;

use serde::Serialize;

/// Inclusive numeric bounds. At least one bound is set when decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Range {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ge: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub le: Option<f64>,
}

impl Range {
    pub fn between(ge: f64, le: f64) -> Self {
        Self {
            ge: Some(ge),
            le: Some(le),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.ge.is_none() && self.le.is_none()
    }
}

/// How the values of an operator-qualified list combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    And,
    Or,
}

impl Operator {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

/// A value list introduced by the `values` marker.
///
/// `operator` is omitted from the serialized form when absent, so consumers
/// see no `operator` key at all rather than a null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatorTerms {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
    pub values: Vec<String>,
}

/// The decoded tail of a criterion segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Constraint {
    /// `ge<num>.le<num>`
    Range(Range),
    /// `operator.<op>.values.<v>...` or `values.<v>...`
    Values(OperatorTerms),
    /// `<v>.<v>...`
    Terms(Vec<String>),
}

impl Constraint {
    pub fn as_range(&self) -> Option<&Range> {
        match self {
            Constraint::Range(range) => Some(range),
            _ => None,
        }
    }

    pub fn as_terms(&self) -> Option<&[String]> {
        match self {
            Constraint::Terms(terms) => Some(terms),
            _ => None,
        }
    }

    pub fn as_operator_terms(&self) -> Option<&OperatorTerms> {
        match self {
            Constraint::Values(terms) => Some(terms),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical tail encoding, the inverse of `decode_tail`.
impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Range(range) => match (range.ge, range.le) {
                (Some(ge), Some(le)) => write!(f, "ge{}.le{}", ge, le),
                (Some(ge), None) => write!(f, "ge{}", ge),
                (None, Some(le)) => write!(f, "le{}", le),
                (None, None) => Ok(()),
            },
            Constraint::Values(terms) => {
                if let Some(operator) = terms.operator {
                    write!(f, "operator.{}.", operator)?;
                }
                write!(f, "values.{}", terms.values.join("."))
            }
            Constraint::Terms(terms) => f.write_str(&terms.join(".")),
        }
    }
}
