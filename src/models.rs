//! Data models for the normalized feed.
//!
//! This module defines the core data structures used throughout the crate:
//! - [`NewsItem`]: One normalized search result, always fully populated
//! - [`OrderBy`]: The sort orders the content API accepts
//! - [`FetchRequest`]: Everything needed to run one fetch cycle
//! - [`Feed`]: A delivered list of items plus the query that produced it
//!
//! The wire format of the content API is handled privately by
//! [`crate::feed::parser`]; nothing here mirrors its camelCase keys.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Substituted when a result has no `webTitle`.
pub const NO_TITLE: &str = "No title found";
/// Substituted when a result has no `sectionName`.
pub const NO_SECTION_NAME: &str = "No section name found";
/// Substituted when a result has no `webUrl`.
pub const NO_WEB_URL: &str = "No website link found";
/// Substituted when a result has no `fields.thumbnail`.
pub const NO_IMAGE: &str = "No image found";

/// A single news result, as handed to the display layer.
///
/// All four fields are always set. When the API omits a value the
/// corresponding fallback string ([`NO_TITLE`], [`NO_SECTION_NAME`],
/// [`NO_IMAGE`], [`NO_WEB_URL`]) is stored instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NewsItem {
    /// The headline.
    pub title: String,
    /// The site section, e.g. "World news".
    pub section_name: String,
    /// Thumbnail URL.
    pub image_url: String,
    /// Link to the article page.
    pub web_url: String,
}

impl NewsItem {
    pub fn new(
        title: impl Into<String>,
        section_name: impl Into<String>,
        image_url: impl Into<String>,
        web_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            section_name: section_name.into(),
            image_url: image_url.into(),
            web_url: web_url.into(),
        }
    }

    /// Whether a real thumbnail was supplied.
    pub fn has_image(&self) -> bool {
        self.image_url != NO_IMAGE
    }
}

/// Sort order understood by the `order-by` query parameter.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    #[default]
    Newest,
    Oldest,
    Relevance,
}

impl OrderBy {
    /// The exact value sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::Newest => "newest",
            OrderBy::Oldest => "oldest",
            OrderBy::Relevance => "relevance",
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of one fetch cycle.
///
/// Built fresh from [`crate::config::FeedSettings`] every time a load is
/// started and dropped once the cycle finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Search endpoint, e.g. `https://content.guardianapis.com/search`.
    pub base_url: String,
    /// Free-text query sent as `q`.
    pub subject: String,
    pub order_by: OrderBy,
    pub api_key: String,
}

/// A delivered feed, as written by [`crate::outputs::json`].
#[derive(Debug, Deserialize, Serialize)]
pub struct Feed {
    /// When the feed was fetched, RFC 3339.
    pub fetched_at: String,
    /// The query that produced it.
    pub subject: String,
    pub order_by: OrderBy,
    /// Items in the order the API returned them.
    pub items: Vec<NewsItem>,
}

impl Feed {
    /// Stamp `items` with the current UTC time and the query that produced them.
    pub fn now(request: &FetchRequest, items: Vec<NewsItem>) -> Self {
        Self {
            fetched_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            subject: request.subject.clone(),
            order_by: request.order_by,
            items,
        }
    }
}
