//! Response status of the records being browsed.

use std::fmt;

use serde::Serialize;

use super::Criteria;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    Pending,
    Draft,
    Submitted,
    Discarded,
}

impl RecordStatus {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "pending" => Some(Self::Pending),
            "draft" => Some(Self::Draft),
            "submitted" => Some(Self::Submitted),
            "discarded" => Some(Self::Discarded),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Discarded => "discarded",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusCriteria {
    status: RecordStatus,
}

impl StatusCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, status: RecordStatus) {
        self.status = status;
    }
}

impl Criteria for StatusCriteria {
    type Value = RecordStatus;

    fn complete(&mut self, raw: &str) {
        let raw = raw.trim();
        self.status = RecordStatus::parse(raw).unwrap_or_else(|| {
            if !raw.is_empty() {
                tracing::debug!(raw, "unknown record status, using pending");
            }
            RecordStatus::default()
        });
    }

    fn value(&self) -> &RecordStatus {
        &self.status
    }

    fn url_params(&self) -> String {
        self.status.to_string()
    }

    fn reset(&mut self) {
        self.status = RecordStatus::default();
    }

    fn is_empty(&self) -> bool {
        self.status == RecordStatus::default()
    }
}
