//! Record criteria codec.
//!
//! Translates record filter, sort and page state to and from the compact
//! `~`/`.` delimited grammar carried in the URL query string.

pub mod config;
pub mod criteria;
pub mod error;
pub mod grammar;

pub use config::{Config, PageConfig, SimilarityConfig};
pub use criteria::{
    ClientPage, Criteria, CriteriaSet, MetadataCriteria, NamedConstraint, PageCriteria, PageMode,
    RecordCriteria, RecordStatus, ResponseCriteria, SearchRequest, SearchText, SearchTextCriteria,
    ServerPage, SimilarityCriteria, SimilarityOrder, SimilarityQuery, SortCriteria, SortEntity,
    SortKey, SortOrder, StatusCriteria, SuggestionCriteria, SuggestionFilter, SuggestionProperty,
    SuggestionSubFilter,
};
pub use error::{DecodeError, Error, Result};
pub use grammar::{Constraint, Operator, OperatorTerms, Range};
