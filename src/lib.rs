//! # newsup
//!
//! Fetches a news feed from the Guardian content search API and normalizes it
//! into a flat list of [`NewsItem`]s for a display layer.
//!
//! ## Architecture
//!
//! One fetch cycle is a short pipeline:
//! 1. **URL building**: subject, sort order and API key become a query URL
//! 2. **Fetching**: a single GET with fixed connect/read timeouts; only 200 counts
//! 3. **Parsing**: the JSON body becomes complete `NewsItem`s, with fallback
//!    strings for missing fields
//! 4. **Delivery**: a [`feed::FeedLoader`] runs cycles on background tasks and
//!    publishes the latest outcome to its subscriber
//!
//! ## Usage
//!
//! ```no_run
//! use newsup::config::FeedSettings;
//! use newsup::feed::FeedLoader;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let loader = FeedLoader::new()?;
//! let mut feed = loader.subscribe();
//! loader.start(FeedSettings::default().to_request());
//! if let Some(state) = feed.next_outcome().await {
//!     for item in state.items() {
//!         println!("{} ({})", item.title, item.section_name);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod outputs;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use error::FetchError;
pub use models::{Feed, FetchRequest, NewsItem, OrderBy};
