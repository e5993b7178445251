//! The fetch-and-normalize pipeline.
//!
//! One fetch cycle runs through these stages in order:
//!
//! | Stage | Module | Input → Output |
//! |-------|--------|----------------|
//! | URL building | [`query`] | [`FetchRequest`](crate::models::FetchRequest) → `Url` |
//! | HTTP GET | [`http`] | `Url` → response body |
//! | Normalization | [`parser`] | body → `Vec<NewsItem>` |
//! | Orchestration | [`loader`] | runs the above on a background task and publishes the outcome |
//!
//! Every stage fails with [`FetchError`](crate::error::FetchError). Nothing
//! is retried.

pub mod http;
pub mod loader;
pub mod parser;
pub mod query;

pub use http::{Fetch, HttpFetcher};
pub use loader::{FeedLoader, FeedSubscription, LoadState, fetch_news_data, run_cycle};
pub use parser::{parse, parse_feed};
pub use query::build;
