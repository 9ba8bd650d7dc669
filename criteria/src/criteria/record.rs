//! Record-level criteria: every child criteria behind its URL key, with a
//! committed snapshot the draft can be rolled back to.

use std::borrow::Cow;
use std::collections::HashMap;

use serde::Serialize;

use crate::config::Config;
use crate::Result;

use super::{
    ClientPage, Criteria, MetadataCriteria, NamedConstraint, PageCriteria, RecordStatus,
    ResponseCriteria, SearchText, SearchTextCriteria, SimilarityCriteria, SimilarityQuery,
    SortCriteria, SortKey, StatusCriteria, SuggestionCriteria, SuggestionFilter,
};

pub const PAGE_KEY: &str = "_page";
pub const STATUS_KEY: &str = "_status";
pub const SEARCH_KEY: &str = "_search";
pub const METADATA_KEY: &str = "_metadata";
pub const SORT_KEY: &str = "_sort";
pub const RESPONSE_KEY: &str = "_response";
pub const SUGGESTION_KEY: &str = "_suggestion";
pub const SIMILARITY_KEY: &str = "_similarity";

/// One full set of criteria.
#[derive(Debug, Clone, PartialEq)]
pub struct CriteriaSet {
    pub page: PageCriteria,
    pub status: StatusCriteria,
    pub search_text: SearchTextCriteria,
    pub metadata: MetadataCriteria,
    pub sort_by: SortCriteria,
    pub response: ResponseCriteria,
    pub suggestion: SuggestionCriteria,
    pub similarity: SimilarityCriteria,
}

impl Default for CriteriaSet {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl CriteriaSet {
    pub fn new(config: &Config) -> Self {
        Self {
            page: PageCriteria::new(config.pagination.clone()),
            status: StatusCriteria::new(),
            search_text: SearchTextCriteria::new(),
            metadata: MetadataCriteria::new(),
            sort_by: SortCriteria::new(),
            response: ResponseCriteria::new(),
            suggestion: SuggestionCriteria::new(),
            similarity: SimilarityCriteria::new(config.similarity.clone()),
        }
    }

    /// Fill every child from its URL key; absent keys complete from "".
    pub fn complete(&mut self, params: &HashMap<&str, &str>) {
        self.page.complete(param(params, PAGE_KEY));
        self.status.complete(param(params, STATUS_KEY));
        self.search_text.complete(param(params, SEARCH_KEY));
        self.metadata.complete(param(params, METADATA_KEY));
        self.sort_by.complete(param(params, SORT_KEY));
        self.response.complete(param(params, RESPONSE_KEY));
        self.suggestion.complete(param(params, SUGGESTION_KEY));
        self.similarity.complete(param(params, SIMILARITY_KEY));
    }

    /// Non-default children as `(key, value)` pairs, in a stable order.
    pub fn url_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_param(&mut params, PAGE_KEY, &self.page);
        push_param(&mut params, STATUS_KEY, &self.status);
        push_param(&mut params, SEARCH_KEY, &self.search_text);
        push_param(&mut params, METADATA_KEY, &self.metadata);
        push_param(&mut params, SORT_KEY, &self.sort_by);
        push_param(&mut params, RESPONSE_KEY, &self.response);
        push_param(&mut params, SUGGESTION_KEY, &self.suggestion);
        push_param(&mut params, SIMILARITY_KEY, &self.similarity);
        params
    }

    /// Restore every child to its default. Page mode is kept.
    pub fn reset(&mut self) {
        self.page.reset();
        self.status.reset();
        self.search_text.reset();
        self.metadata.reset();
        self.sort_by.reset();
        self.response.reset();
        self.suggestion.reset();
        self.similarity.reset();
    }

    /// Whether anything narrows or reorders the record list.
    pub fn is_filtered(&self) -> bool {
        !(self.search_text.is_empty()
            && self.metadata.is_empty()
            && self.sort_by.is_empty()
            && self.response.is_empty()
            && self.suggestion.is_empty()
            && self.similarity.is_empty())
    }

    /// Payload for the record search endpoint.
    pub fn search_request(&self) -> SearchRequest<'_> {
        let page = self.page.value();
        SearchRequest {
            from: self.page.client_from(),
            many: page.many,
            page: *page,
            status: *self.status.value(),
            query: (!self.search_text.is_empty()).then(|| self.search_text.value()),
            metadata: self.metadata.value(),
            response: self.response.value(),
            suggestion: self.suggestion.value(),
            sort: self.sort_by.value(),
            vector: self.similarity.value().as_ref(),
        }
    }
}

fn param<'a>(params: &HashMap<&str, &'a str>, key: &str) -> &'a str {
    params.get(key).copied().unwrap_or("")
}

fn push_param<C: Criteria>(params: &mut Vec<(&'static str, String)>, key: &'static str, child: &C) {
    if !child.is_empty() {
        params.push((key, child.url_params()));
    }
}

fn is_empty_slice<T>(slice: &&[T]) -> bool {
    slice.is_empty()
}

/// Search payload handed to the record-search collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest<'a> {
    /// 1-based offset of the first requested record
    pub from: u64,
    pub many: u32,
    pub page: ClientPage,
    pub status: RecordStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<&'a SearchText>,
    #[serde(skip_serializing_if = "is_empty_slice")]
    pub metadata: &'a [NamedConstraint],
    #[serde(skip_serializing_if = "is_empty_slice")]
    pub response: &'a [NamedConstraint],
    #[serde(skip_serializing_if = "is_empty_slice")]
    pub suggestion: &'a [SuggestionFilter],
    #[serde(skip_serializing_if = "is_empty_slice")]
    pub sort: &'a [SortKey],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector: Option<&'a SimilarityQuery>,
}

/// Draft criteria the user edits, plus the last committed snapshot.
///
/// The URL and the search request always reflect the committed state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordCriteria {
    committed: CriteriaSet,
    draft: CriteriaSet,
}

impl RecordCriteria {
    pub fn new(config: &Config) -> Self {
        let set = CriteriaSet::new(config);
        Self {
            committed: set.clone(),
            draft: set,
        }
    }

    pub fn committed(&self) -> &CriteriaSet {
        &self.committed
    }

    pub fn draft(&self) -> &CriteriaSet {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut CriteriaSet {
        &mut self.draft
    }

    /// Switch both snapshots to single-record paging.
    pub fn focus_mode(&mut self) {
        self.draft.page.focus_mode();
        self.committed.page.focus_mode();
    }

    /// Switch both snapshots to ranged paging.
    pub fn bulk_mode(&mut self) {
        self.draft.page.bulk_mode();
        self.committed.page.bulk_mode();
    }

    /// Complete from already-decoded `(key, value)` pairs and commit.
    ///
    /// A later pair with the same key wins; unknown keys are ignored.
    pub fn complete<'a, I>(&mut self, params: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let params: HashMap<&str, &str> = params.into_iter().collect();
        self.draft.complete(&params);
        self.commit();
    }

    /// Complete from a percent-encoded `key=value&key=value` query string.
    ///
    /// Pairs are split before decoding, so an encoded `&` or `=` stays
    /// inside its value.
    pub fn complete_query(&mut self, query: &str) {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<(String, String)> = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (percent_decode(key), percent_decode(value))
            })
            .collect();
        self.complete(pairs.iter().map(|(key, value)| (key.as_str(), value.as_str())));
    }

    pub fn commit(&mut self) {
        self.committed = self.draft.clone();
    }

    pub fn rollback(&mut self) {
        self.draft = self.committed.clone();
    }

    /// Whether the draft would produce a different URL than the committed state.
    pub fn has_pending_changes(&self) -> bool {
        self.draft.url_params() != self.committed.url_params()
    }

    /// Clear every filter in the draft (page mode is kept).
    pub fn reset(&mut self) {
        self.draft.reset();
    }

    pub fn is_filtered(&self) -> bool {
        self.committed.is_filtered()
    }

    pub fn url_params(&self) -> Vec<(&'static str, String)> {
        self.committed.url_params()
    }

    /// Percent-encoded `key=value&...` rendering of [`url_params`](Self::url_params).
    ///
    /// The grammar's `~` and `.` are unreserved and pass through unescaped.
    pub fn to_query(&self) -> String {
        self.url_params()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn search_request(&self) -> SearchRequest<'_> {
        self.committed.search_request()
    }

    pub fn search_request_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self.search_request())?)
    }
}

/// Decode one query component; `+` is a space. Invalid UTF-8 keeps the raw text.
fn percent_decode(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    match urlencoding::decode(&raw).map(Cow::into_owned) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::debug!(component = %raw, error = %e, "undecodable query component kept as-is");
            raw
        }
    }
}
