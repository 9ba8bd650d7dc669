//! Criteria types: URL-carried filter, sort and page state.
//!
//! Every type follows the same lifecycle: constructed empty, filled by
//! [`Criteria::complete`] on each navigation, read through
//! [`Criteria::value`] to build a search request and through
//! [`Criteria::url_params`] to rebuild the URL.

mod filters;
mod page;
mod record;
mod search;
mod similarity;
mod sort;
mod status;
mod suggestion;

pub use filters::{
    Metadata, MetadataCriteria, NamedConstraint, NamedCriteria, Response, ResponseCriteria, Scope,
};
pub use page::{ClientPage, PageCriteria, PageMode, ServerPage};
pub use record::{
    CriteriaSet, RecordCriteria, SearchRequest, PAGE_KEY, METADATA_KEY, RESPONSE_KEY, SEARCH_KEY,
    SIMILARITY_KEY, SORT_KEY, STATUS_KEY, SUGGESTION_KEY,
};
pub use search::{SearchText, SearchTextCriteria};
pub use similarity::{SimilarityCriteria, SimilarityOrder, SimilarityQuery};
pub use sort::{SortCriteria, SortEntity, SortKey, SortOrder};
pub use status::{RecordStatus, StatusCriteria};
pub use suggestion::{SuggestionCriteria, SuggestionFilter, SuggestionProperty, SuggestionSubFilter};

use crate::error::DecodeError;

/// Contract shared by all criteria types.
pub trait Criteria {
    /// Structured state read by the search request builder.
    type Value: ?Sized;

    /// Replace the current state with the one encoded in `raw`.
    ///
    /// Never fails: malformed segments are dropped and malformed scalars fall
    /// back to their defaults.
    fn complete(&mut self, raw: &str);

    /// Current structured state.
    fn value(&self) -> &Self::Value;

    /// Canonical encoding of the current state.
    fn url_params(&self) -> String;

    /// Restore the default state.
    fn reset(&mut self);

    /// Whether the state is the default (nothing to put in the URL).
    fn is_empty(&self) -> bool;
}

/// Log a segment that `complete` is dropping.
fn dropped(kind: &'static str, segment: &str, error: DecodeError) {
    tracing::debug!(kind, segment, %error, "dropping malformed criteria segment");
}
