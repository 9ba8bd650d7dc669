//! CLI command implementations.

use std::path::Path;

use criteria::{
    Config, Criteria, MetadataCriteria, PageCriteria, RecordCriteria, ResponseCriteria, Result,
    SearchRequest, SearchTextCriteria, SimilarityCriteria, SortCriteria, StatusCriteria,
    SuggestionCriteria,
};
use serde::Serialize;

use crate::Kind;

/// Load config from an explicit directory, or by the standard resolution.
pub fn load_config(dir: Option<&Path>) -> Result<Config> {
    match dir {
        Some(dir) => Config::load_from(dir),
        None => Config::load(),
    }
}

/// Decoded criteria of one kind: JSON value plus canonical encoding.
struct Decoded {
    value: serde_json::Value,
    url_params: String,
}

fn decode_kind(config: &Config, kind: Kind, raw: &str, bulk: bool) -> Result<Decoded> {
    tracing::debug!(?kind, raw, bulk, "decoding criteria");
    match kind {
        Kind::Metadata => complete(MetadataCriteria::new(), raw),
        Kind::Response => complete(ResponseCriteria::new(), raw),
        Kind::Suggestion => complete(SuggestionCriteria::new(), raw),
        Kind::Sort => complete(SortCriteria::new(), raw),
        Kind::Status => complete(StatusCriteria::new(), raw),
        Kind::Search => complete(SearchTextCriteria::new(), raw),
        Kind::Similarity => complete(SimilarityCriteria::new(config.similarity.clone()), raw),
        Kind::Page => {
            let mut page = PageCriteria::new(config.pagination.clone());
            if bulk {
                page.bulk_mode();
            }
            complete(page, raw)
        }
    }
}

fn complete<C>(mut criteria: C, raw: &str) -> Result<Decoded>
where
    C: Criteria,
    C::Value: Serialize,
{
    criteria.complete(raw);
    Ok(Decoded {
        value: serde_json::to_value(criteria.value())?,
        url_params: criteria.url_params(),
    })
}

pub fn decode(config: &Config, kind: Kind, raw: &str, bulk: bool) -> Result<()> {
    let decoded = decode_kind(config, kind, raw, bulk)?;
    println!("{}", serde_json::to_string_pretty(&decoded.value)?);
    Ok(())
}

pub fn normalize(config: &Config, kind: Kind, raw: &str, bulk: bool) -> Result<()> {
    let decoded = decode_kind(config, kind, raw, bulk)?;
    println!("{}", decoded.url_params);
    Ok(())
}

#[derive(Serialize)]
struct UrlOutput<'a> {
    query: String,
    params: Vec<(&'static str, String)>,
    filtered: bool,
    request: SearchRequest<'a>,
}

pub fn url(config: &Config, query: &str, bulk: bool) -> Result<()> {
    let mut criteria = RecordCriteria::new(config);
    if bulk {
        criteria.bulk_mode();
    }
    criteria.complete_query(query);
    tracing::debug!(params = criteria.url_params().len(), "query completed");

    let output = UrlOutput {
        query: criteria.to_query(),
        params: criteria.url_params(),
        filtered: criteria.is_filtered(),
        request: criteria.search_request(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn show_config(config: &Config) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
