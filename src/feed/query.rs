//! Query URL construction for the content search endpoint.

use crate::error::FetchError;
use crate::models::{FetchRequest, OrderBy};
use url::Url;
use urlencoding::encode;

/// Build the search URL for one fetch cycle.
///
/// Appends `q`, `show-fields=thumbnail`, `order-by` and `api-key` (in that
/// order) after any query the base URL already carries. `subject` and
/// `api_key` are percent-encoded; spaces become `%20`.
///
/// # Arguments
///
/// * `base_url` - The search endpoint, e.g. `https://content.guardianapis.com/search`
/// * `subject` - Free-text search query
/// * `order_by` - Sort order of the results
/// * `api_key` - Content API key
///
/// # Returns
///
/// The complete request URL.
///
/// # Errors
///
/// [`FetchError::InvalidUrl`] if `base_url` does not parse, or is not an
/// `http`/`https` URL.
pub fn build(
    base_url: &str,
    subject: &str,
    order_by: OrderBy,
    api_key: &str,
) -> Result<Url, FetchError> {
    let mut url = Url::parse(base_url).map_err(|e| FetchError::InvalidUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(FetchError::InvalidUrl {
            url: base_url.to_string(),
            reason: format!("unsupported scheme {:?}", url.scheme()),
        });
    }

    let params = format!(
        "q={}&show-fields=thumbnail&order-by={}&api-key={}",
        encode(subject),
        order_by.as_str(),
        encode(api_key)
    );
    let query = match url.query() {
        Some(existing) if !existing.is_empty() => format!("{existing}&{params}"),
        _ => params,
    };
    url.set_query(Some(&query));
    Ok(url)
}

impl FetchRequest {
    /// The request URL for this cycle. See [`build`].
    pub fn url(&self) -> Result<Url, FetchError> {
        build(&self.base_url, &self.subject, self.order_by, &self.api_key)
    }
}
