//! Metadata and response filters: flat `name.tail` constraint lists.

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;

use crate::error::DecodeError;
use crate::grammar::{decode_tail, segments, tokens, Constraint, SEGMENT_SEPARATOR};

use super::{dropped, Criteria};

/// One decoded `name.tail` segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedConstraint {
    pub name: String,
    pub value: Constraint,
}

/// Which record facet a [`NamedCriteria`] filters.
pub trait Scope {
    /// Used in log events.
    const KIND: &'static str;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metadata;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Response;

impl Scope for Metadata {
    const KIND: &'static str = "metadata";
}

impl Scope for Response {
    const KIND: &'static str = "response";
}

/// Filters on record metadata properties.
pub type MetadataCriteria = NamedCriteria<Metadata>;

/// Filters on annotator responses.
pub type ResponseCriteria = NamedCriteria<Response>;

/// Ordered list of named constraints, one per decoded segment.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedCriteria<S> {
    value: Vec<NamedConstraint>,
    scope: PhantomData<S>,
}

impl<S> Default for NamedCriteria<S> {
    fn default() -> Self {
        Self {
            value: Vec::new(),
            scope: PhantomData,
        }
    }
}

impl<S: Scope> NamedCriteria<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constraint for a name, if any.
    pub fn find(&self, name: &str) -> Option<&Constraint> {
        self.value.iter().find(|c| c.name == name).map(|c| &c.value)
    }

    /// Add a constraint, replacing an existing one with the same name.
    pub fn set(&mut self, name: impl Into<String>, value: Constraint) {
        let name = name.into();
        match self.value.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.value = value,
            None => self.value.push(NamedConstraint { name, value }),
        }
    }

    /// Remove the constraint for a name. Returns whether one was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.value.len();
        self.value.retain(|c| c.name != name);
        self.value.len() != before
    }

    fn decode_segment(segment: &str) -> Result<NamedConstraint, DecodeError> {
        let tokens = tokens(segment);
        let (name, tail) = tokens.split_first().ok_or(DecodeError::EmptyTail)?;
        Ok(NamedConstraint {
            name: name.to_string(),
            value: decode_tail(tail)?,
        })
    }
}

impl<S: Scope> Criteria for NamedCriteria<S> {
    type Value = [NamedConstraint];

    fn complete(&mut self, raw: &str) {
        self.value.clear();

        for segment in segments(raw) {
            match Self::decode_segment(segment) {
                Ok(constraint) => self.value.push(constraint),
                Err(error) => dropped(S::KIND, segment, error),
            }
        }

        tracing::trace!(kind = S::KIND, count = self.value.len(), "criteria completed");
    }

    fn value(&self) -> &[NamedConstraint] {
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

impl<S> fmt::Display for NamedCriteria<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, constraint) in self.value.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", SEGMENT_SEPARATOR)?;
            }
            write!(f, "{}.{}", constraint.name, constraint.value)?;
        }
        Ok(())
    }
}
