//! Suggestion filters: `name.property.tail` segments grouped by name.

use std::fmt;

use serde::Serialize;

use crate::error::DecodeError;
use crate::grammar::{decode_tail, segments, tokens, Constraint, SEGMENT_SEPARATOR};

use super::{dropped, Criteria};

/// Which part of a suggestion a sub-filter constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionProperty {
    /// Model confidence
    Score,
    /// Suggested answer
    Value,
    /// Agent that produced the suggestion
    Agent,
}

impl SuggestionProperty {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "score" => Some(Self::Score),
            "value" => Some(Self::Value),
            "agent" => Some(Self::Agent),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Score => "score",
            Self::Value => "value",
            Self::Agent => "agent",
        }
    }
}

impl fmt::Display for SuggestionProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionSubFilter {
    pub name: SuggestionProperty,
    pub value: Constraint,
}

/// All sub-filters for one suggestion (question) name, in segment order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionFilter {
    pub name: String,
    pub value: Vec<SuggestionSubFilter>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionCriteria {
    value: Vec<SuggestionFilter>,
}

impl SuggestionCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, name: &str) -> Option<&SuggestionFilter> {
        self.value.iter().find(|s| s.name == name)
    }

    /// Append a sub-filter to the group for `name`, creating it if needed.
    ///
    /// Append-only: a second sub-filter on the same property is kept.
    pub fn push(&mut self, name: &str, sub_filter: SuggestionSubFilter) {
        match self.value.iter_mut().find(|s| s.name == name) {
            Some(group) => group.value.push(sub_filter),
            None => self.value.push(SuggestionFilter {
                name: name.to_string(),
                value: vec![sub_filter],
            }),
        }
    }

    /// Remove the whole group for `name`. Returns whether one was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.value.len();
        self.value.retain(|s| s.name != name);
        self.value.len() != before
    }

    fn decode_segment(segment: &str) -> Result<(&str, SuggestionSubFilter), DecodeError> {
        let tokens = tokens(segment);
        let [name, property, tail @ ..] = tokens.as_slice() else {
            return Err(DecodeError::EmptyTail);
        };
        let property = SuggestionProperty::parse(property)
            .ok_or_else(|| DecodeError::UnknownProperty(property.to_string()))?;

        Ok((
            *name,
            SuggestionSubFilter {
                name: property,
                value: decode_tail(tail)?,
            },
        ))
    }
}

impl Criteria for SuggestionCriteria {
    type Value = [SuggestionFilter];

    fn complete(&mut self, raw: &str) {
        self.value.clear();

        for segment in segments(raw) {
            match Self::decode_segment(segment) {
                Ok((name, sub_filter)) => self.push(name, sub_filter),
                Err(error) => dropped("suggestion", segment, error),
            }
        }

        tracing::trace!(kind = "suggestion", groups = self.value.len(), "criteria completed");
    }

    fn value(&self) -> &[SuggestionFilter] {
        &self.value
    }

    fn url_params(&self) -> String {
        self.to_string()
    }

    fn reset(&mut self) {
        self.value.clear();
    }

    fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Display for SuggestionCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for group in &self.value {
            for sub_filter in &group.value {
                if !first {
                    write!(f, "{}", SEGMENT_SEPARATOR)?;
                }
                first = false;
                write!(f, "{}.{}.{}", group.name, sub_filter.name, sub_filter.value)?;
            }
        }
        Ok(())
    }
}
