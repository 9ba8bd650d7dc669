//! Sort keys: `entity.name[.property].order` segments.

use std::fmt;

use serde::Serialize;

use crate::error::DecodeError;
use crate::grammar::{segments, SEGMENT_SEPARATOR, TOKEN_SEPARATOR};

use super::{dropped, Criteria, SuggestionProperty};

/// What a sort key refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortEntity {
    /// Built-in record fields (`inserted_at`, `updated_at`)
    Record,
    Metadata,
    Response,
    Suggestion,
}

impl SortEntity {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "record" => Some(Self::Record),
            "metadata" => Some(Self::Metadata),
            "response" => Some(Self::Response),
            "suggestion" => Some(Self::Suggestion),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Record => "record",
            Self::Metadata => "metadata",
            Self::Response => "response",
            Self::Suggestion => "suggestion",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortKey {
    pub entity: SortEntity,
    pub name: String,
    /// Only for suggestion keys (`suggestion.label.score.desc`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<SuggestionProperty>,
    pub order: SortOrder,
}

impl SortKey {
    fn same_field(&self, other: &SortKey) -> bool {
        self.entity == other.entity && self.name == other.name && self.property == other.property
    }

    fn decode(segment: &str) -> Result<SortKey, DecodeError> {
        let tokens: Vec<&str> = segment.split(TOKEN_SEPARATOR).collect();

        let (entity, name, property, order) = match tokens.as_slice() {
            [entity, name, order] => (*entity, *name, None, *order),
            [entity, name, property, order] => (*entity, *name, Some(*property), *order),
            _ => return Err(DecodeError::EmptyTail),
        };

        let entity =
            SortEntity::parse(entity).ok_or_else(|| DecodeError::UnknownEntity(entity.to_string()))?;
        let order = SortOrder::parse(order).ok_or_else(|| DecodeError::UnknownOrder(order.to_string()))?;
        let property = match property {
            None => None,
            Some(property) if entity == SortEntity::Suggestion => Some(
                SuggestionProperty::parse(property)
                    .ok_or_else(|| DecodeError::UnknownProperty(property.to_string()))?,
            ),
            Some(property) => return Err(DecodeError::UnknownProperty(property.to_string())),
        };
        if name.is_empty() {
            return Err(DecodeError::EmptyTail);
        }

        Ok(SortKey {
            entity,
            name: name.to_string(),
            property,
            order,
        })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.entity.as_str(), self.name)?;
        if let Some(property) = self.property {
            write!(f, ".{}", property)?;
        }
        write!(f, ".{}", self.order.as_str())
    }
}

/// Ordered sort keys; earlier keys take precedence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortCriteria {
    value: Vec<SortKey>,
}

impl SortCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key, or replace the order of an existing key on the same field.
    pub fn push(&mut self, key: SortKey) {
        match self.value.iter_mut().find(|k| k.same_field(&key)) {
            Some(existing) => existing.order = key.order,
            None => self.value.push(key),
        }
    }

    /// Flip asc/desc on a field, adding it ascending if absent.
    ///
    /// `property` selects the suggestion part (`score`, `value`, `agent`);
    /// it is `None` for every other entity.
    pub fn toggle(&mut self, entity: SortEntity, name: &str, property: Option<SuggestionProperty>) {
        let key = SortKey {
            entity,
            name: name.to_string(),
            property,
            order: SortOrder::Asc,
        };
        match self.value.iter_mut().find(|k| k.same_field(&key)) {
            Some(existing) => existing.order = existing.order.reversed(),
            None => self.value.push(key),
        }
    }

    /// Remove the key on a field. Returns whether one was removed.
    pub fn remove(
        &mut self,
        entity: SortEntity,
        name: &str,
        property: Option<SuggestionProperty>,
    ) -> bool {
        let before = self.value.len();
        self.value
            .retain(|k| !(k.entity == entity && k.name == name && k.property == property));
        self.value.len() != before
    }
}

impl Criteria for SortCriteria {
    type Value = [SortKey];

    fn complete(&mut self, raw: &str) {
        self.value.clear();

        for segment in segments(raw) {
            match SortKey::decode(segment) {
                Ok(key) => self.push(key),
                Err(error) => dropped("sort", segment, error),
            }
        }
    }

    fn value(&self) -> &[SortKey] {
        &self.value
    }

    fn url_params(&self) -> String {
        self.value
            .iter()
            .map(|key| key.to_string())
            .collect::<Vec<_>>()
            .join(SEGMENT_SEPARATOR.to_string().as_str())
    }

    fn reset(&mut self) {
        self.value.clear();
    }

    fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sort(raw: &str) -> SortCriteria {
        let mut criteria = SortCriteria::new();
        criteria.complete(raw);
        criteria
    }

    #[test]
    fn test_record_and_metadata_keys() {
        let criteria = sort("record.inserted_at.desc~metadata.length.asc");
        assert_eq!(
            criteria.value(),
            &[
                SortKey {
                    entity: SortEntity::Record,
                    name: "inserted_at".to_string(),
                    property: None,
                    order: SortOrder::Desc,
                },
                SortKey {
                    entity: SortEntity::Metadata,
                    name: "length".to_string(),
                    property: None,
                    order: SortOrder::Asc,
                },
            ]
        );
    }

    #[test]
    fn test_suggestion_property_key() {
        let criteria = sort("suggestion.label.score.desc");
        assert_eq!(criteria.value()[0].property, Some(SuggestionProperty::Score));
    }

    #[test]
    fn test_property_only_for_suggestions() {
        assert!(sort("metadata.length.score.desc").is_empty());
    }

    #[test]
    fn test_malformed_keys_dropped() {
        let criteria = sort("record.inserted_at.sideways~widget.x.asc~metadata.asc~metadata.length.desc");
        assert_eq!(criteria.url_params(), "metadata.length.desc");
    }

    #[test]
    fn test_duplicate_field_replaces_order() {
        let criteria = sort("metadata.length.asc~record.updated_at.asc~metadata.length.desc");
        assert_eq!(
            criteria.url_params(),
            "metadata.length.desc~record.updated_at.asc"
        );
    }

    #[test]
    fn test_toggle() {
        let mut criteria = sort("metadata.length.asc");
        criteria.toggle(SortEntity::Metadata, "length", None);
        criteria.toggle(SortEntity::Record, "inserted_at", None);
        assert_eq!(
            criteria.url_params(),
            "metadata.length.desc~record.inserted_at.asc"
        );
    }

    #[test]
    fn test_remove() {
        let mut criteria = sort("metadata.length.asc~record.inserted_at.desc");
        assert!(criteria.remove(SortEntity::Metadata, "length", None));
        assert_eq!(criteria.url_params(), "record.inserted_at.desc");
    }

    #[test]
    fn test_toggle_scoped_to_suggestion_property() {
        let mut criteria = sort("suggestion.label.score.asc~suggestion.label.value.desc");
        criteria.toggle(SortEntity::Suggestion, "label", Some(SuggestionProperty::Value));
        assert_eq!(
            criteria.url_params(),
            "suggestion.label.score.asc~suggestion.label.value.asc"
        );

        criteria.toggle(SortEntity::Suggestion, "label", Some(SuggestionProperty::Agent));
        assert_eq!(criteria.value().len(), 3);
    }

    #[test]
    fn test_remove_scoped_to_suggestion_property() {
        let mut criteria = sort("suggestion.label.score.asc~suggestion.label.value.desc");
        assert!(criteria.remove(SortEntity::Suggestion, "label", Some(SuggestionProperty::Score)));
        assert!(!criteria.remove(SortEntity::Suggestion, "label", None));
        assert_eq!(criteria.url_params(), "suggestion.label.value.desc");
    }

    #[test]
    fn test_round_trip() {
        let raw = "suggestion.label.score.desc~response.rating.asc~record.inserted_at.desc";
        let criteria = sort(raw);
        assert_eq!(criteria.url_params(), raw);
    }
}
