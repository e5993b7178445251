//! Normalization of the content-search JSON payload.
//!
//! The API answers with
//!
//! ```json
//! {"response": {"results": [
//!     {"webTitle": "...", "sectionName": "...", "webUrl": "...",
//!      "fields": {"thumbnail": "..."}}
//! ]}}
//! ```
//!
//! Every key along that path is optional. A missing `response` or `results`
//! is an empty feed, and a missing leaf is replaced with its fallback string
//! from [`crate::models`]. A leaf that holds any other JSON value (number,
//! bool, object, array) is kept in its JSON text form. What is *not*
//! tolerated is a value of the wrong JSON type where the envelope expects an
//! object or array: that fails the whole payload as
//! [`FetchError::MalformedJson`].
//!
//! Two entry points:
//! - [`parse_feed`] keeps the outcomes apart (`Ok(vec![])`, `EmptyBody`,
//!   `MalformedJson`).
//! - [`parse`] collapses every failure into `None` after logging it, for
//!   consumers that only show an empty state.

use crate::error::FetchError;
use crate::models::{NO_IMAGE, NO_SECTION_NAME, NO_TITLE, NO_WEB_URL, NewsItem};
use crate::utils::{looks_truncated, truncate_for_log};
use serde::Deserialize;
use tracing::{debug, error, instrument};

#[derive(Debug, Deserialize)]
struct Envelope {
    response: Option<SearchResponse>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Option<Vec<SearchResult>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResult {
    web_title: Option<Scalar>,
    section_name: Option<Scalar>,
    web_url: Option<Scalar>,
    fields: Option<ResultFields>,
}

#[derive(Debug, Deserialize)]
struct ResultFields {
    thumbnail: Option<Scalar>,
}

/// A leaf value. Anything that is not a string is stringified.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Other(serde_json::Value),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Other(value) => value.to_string(),
        }
    }
}

fn or_fallback(value: Option<Scalar>, fallback: &str) -> String {
    value
        .map(Scalar::into_string)
        .unwrap_or_else(|| fallback.to_string())
}

impl SearchResult {
    fn into_item(self) -> NewsItem {
        // `fields` and `thumbnail` are both optional.
        let image_url = or_fallback(self.fields.and_then(|f| f.thumbnail), NO_IMAGE);
        NewsItem {
            title: or_fallback(self.web_title, NO_TITLE),
            section_name: or_fallback(self.section_name, NO_SECTION_NAME),
            image_url,
            web_url: or_fallback(self.web_url, NO_WEB_URL),
        }
    }
}

/// Parse a response body into items, in `results` order.
///
/// # Arguments
///
/// * `body` - The raw response body of a search request
///
/// # Returns
///
/// One [`NewsItem`] per entry of `response.results`, with fallbacks for
/// missing leaves. A payload without `response` or `results` yields an
/// empty vector.
///
/// # Errors
///
/// - [`FetchError::EmptyBody`] for an empty or whitespace-only body
/// - [`FetchError::MalformedJson`] for invalid JSON or a structural type
///   mismatch (e.g. `results` that is not an array)
pub fn parse_feed(body: &str) -> Result<Vec<NewsItem>, FetchError> {
    if body.trim().is_empty() {
        return Err(FetchError::EmptyBody);
    }

    let envelope: Envelope = serde_json::from_str(body)?;
    let results = envelope
        .response
        .and_then(|r| r.results)
        .unwrap_or_default();

    Ok(results.into_iter().map(SearchResult::into_item).collect())
}

/// Lenient variant of [`parse_feed`].
///
/// `None` for an absent, blank or malformed body; malformed input is logged
/// at error level. `Some(vec![])` means the JSON was valid but held no results.
#[instrument(level = "debug", skip_all)]
pub fn parse(body: Option<&str>) -> Option<Vec<NewsItem>> {
    let body = body?;
    match parse_feed(body) {
        Ok(items) => {
            debug!(count = items.len(), "Parsed feed");
            Some(items)
        }
        Err(FetchError::EmptyBody) => None,
        Err(FetchError::MalformedJson(e)) => {
            error!(
                error = %e,
                truncated = looks_truncated(&e),
                body_preview = %truncate_for_log(body, 200),
                "Problem parsing the feed JSON"
            );
            None
        }
        Err(e) => {
            error!(error = %e, "Problem parsing the feed JSON");
            None
        }
    }
}
