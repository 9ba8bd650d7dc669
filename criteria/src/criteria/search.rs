//! Free-text search, carried as-is: `text` or `field~text`.

use serde::Serialize;

use crate::grammar::SEGMENT_SEPARATOR;

use super::Criteria;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchText {
    /// Record field to search in; all text fields when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub text: String,
}

/// The text is opaque: no tokenizing, no query language.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchTextCriteria {
    value: SearchText,
}

impl SearchTextCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: Option<&str>, text: &str) {
        self.value = SearchText {
            field: field.filter(|f| !f.is_empty()).map(str::to_string),
            text: text.to_string(),
        };
    }
}

impl Criteria for SearchTextCriteria {
    type Value = SearchText;

    fn complete(&mut self, raw: &str) {
        match raw.split_once(SEGMENT_SEPARATOR) {
            Some((field, text)) => self.set(Some(field), text),
            None => self.set(None, raw),
        }
    }

    fn value(&self) -> &SearchText {
        &self.value
    }

    /// A field-less text containing `~` gets a leading `~` so the first
    /// separator is never mistaken for a field name.
    fn url_params(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        match &self.value.field {
            Some(field) => format!("{}{}{}", field, SEGMENT_SEPARATOR, self.value.text),
            None if self.value.text.contains(SEGMENT_SEPARATOR) => {
                format!("{}{}", SEGMENT_SEPARATOR, self.value.text)
            }
            None => self.value.text.clone(),
        }
    }

    fn reset(&mut self) {
        self.value = SearchText::default();
    }

    fn is_empty(&self) -> bool {
        self.value.text.trim().is_empty()
    }
}
