//! Similarity search: `record.<id>~vector.<name>~limit.<n>~order.<most|least>`.

use serde::Serialize;

use crate::config::SimilarityConfig;
use crate::grammar::{segments, SEGMENT_SEPARATOR, TOKEN_SEPARATOR};

use super::Criteria;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityOrder {
    /// Most similar first
    #[default]
    Most,
    /// Least similar first
    Least,
}

impl SimilarityOrder {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "most" => Some(Self::Most),
            "least" => Some(Self::Least),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Most => "most",
            Self::Least => "least",
        }
    }
}

/// Records similar to `record_id` according to the `vector_name` embedding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimilarityQuery {
    pub record_id: String,
    pub vector_name: String,
    pub limit: u32,
    pub order: SimilarityOrder,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityCriteria {
    value: Option<SimilarityQuery>,
    config: SimilarityConfig,
}

impl Default for SimilarityCriteria {
    fn default() -> Self {
        Self::new(SimilarityConfig::default())
    }
}

impl SimilarityCriteria {
    pub fn new(config: SimilarityConfig) -> Self {
        Self {
            value: None,
            config,
        }
    }

    pub fn limits(&self) -> &[u32] {
        &self.config.limits
    }

    /// Search around a record; limit and order take their defaults.
    pub fn set(&mut self, record_id: &str, vector_name: &str) {
        self.value = Some(SimilarityQuery {
            record_id: record_id.to_string(),
            vector_name: vector_name.to_string(),
            limit: self.config.default_limit,
            order: SimilarityOrder::default(),
        });
    }
}

impl Criteria for SimilarityCriteria {
    type Value = Option<SimilarityQuery>;

    fn complete(&mut self, raw: &str) {
        let mut record_id = None;
        let mut vector_name = None;
        let mut limit = None;
        let mut order = None;

        for segment in segments(raw) {
            match segment.split_once(TOKEN_SEPARATOR) {
                Some(("record", id)) if !id.is_empty() => record_id = Some(id),
                Some(("vector", name)) if !name.is_empty() => vector_name = Some(name),
                Some(("limit", n)) => limit = n.parse::<u32>().ok(),
                Some(("order", o)) => order = SimilarityOrder::parse(o),
                _ => tracing::debug!(segment, "dropping malformed similarity segment"),
            }
        }

        self.value = match (record_id, vector_name) {
            (Some(record_id), Some(vector_name)) => Some(SimilarityQuery {
                record_id: record_id.to_string(),
                vector_name: vector_name.to_string(),
                limit: self.config.resolve(limit),
                order: order.unwrap_or_default(),
            }),
            _ => None,
        };
    }

    fn value(&self) -> &Option<SimilarityQuery> {
        &self.value
    }

    fn url_params(&self) -> String {
        let Some(query) = &self.value else {
            return String::new();
        };
        [
            format!("record.{}", query.record_id),
            format!("vector.{}", query.vector_name),
            format!("limit.{}", query.limit),
            format!("order.{}", query.order.as_str()),
        ]
        .join(SEGMENT_SEPARATOR.to_string().as_str())
    }

    fn reset(&mut self) {
        self.value = None;
    }

    fn is_empty(&self) -> bool {
        self.value.is_none()
    }
}
