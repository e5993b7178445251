//! The HTTP leg of a fetch cycle.
//!
//! [`Fetch`] is the seam the loader depends on; [`HttpFetcher`] is the real
//! implementation over `reqwest`. Each call owns its response, so the
//! connection is handed back to the pool (or closed) on every exit path,
//! including a read that fails halfway through the body.

use crate::error::FetchError;
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Time allowed to establish the TCP/TLS connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(15_000);
/// Time allowed for each read once connected.
#[cfg(not(test))]
pub const READ_TIMEOUT: Duration = Duration::from_millis(10_000);
#[cfg(test)]
pub const READ_TIMEOUT: Duration = Duration::from_millis(500);

/// Something that can turn a URL into a response body.
///
/// Implementors return `Ok(String::new())` for an absent URL without doing
/// any I/O.
pub trait Fetch: Send + Sync {
    /// GET `url` and return the full body of a 200 response.
    fn fetch(&self, url: Option<&Url>) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// [`Fetch`] over a shared `reqwest` client with fixed timeouts.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher with [`CONNECT_TIMEOUT`] and [`READ_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// [`FetchError::ClientSetup`] if `reqwest` cannot build the client.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
    }

    fn with_user_agent(user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .read_timeout(READ_TIMEOUT)
            .user_agent(user_agent)
            .build()
            .map_err(FetchError::ClientSetup)?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: Option<&Url>) -> impl Future<Output = Result<String, FetchError>> + Send {
        async move {
            let Some(url) = url else {
                debug!("No URL to fetch; returning empty body");
                return Ok(String::new());
            };
            get_body(&self.client, url).await
        }
    }
}

// The query carries the API key, so only the host is recorded.
#[instrument(level = "info", skip_all, fields(host = url.host_str().unwrap_or_default()))]
async fn get_body(client: &Client, url: &Url) -> Result<String, FetchError> {
    let t0 = Instant::now();
    let response = client.get(url.clone()).send().await?;

    let status = response.status();
    if status != StatusCode::OK {
        warn!(status = status.as_u16(), "Error response code");
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let body = response.text().await?;
    info!(
        bytes = body.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "Fetched feed body"
    );
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{refused_url, serve_once, serve_silent, serve_truncated};
    use std::time::Duration;

    #[tokio::test]
    async fn test_fetch_returns_body_on_200() {
        let server = serve_once(200, r#"{"response":{}}"#).await;
        let url = Url::parse(&server.base_url).unwrap();

        let body = HttpFetcher::new().unwrap().fetch(Some(&url)).await.unwrap();
        assert_eq!(body, r#"{"response":{}}"#);

        let line = server.request_line.await.unwrap();
        assert!(line.starts_with("GET /search "));
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_200() {
        let server = serve_once(500, "oops").await;
        let url = Url::parse(&server.base_url).unwrap();

        let err = HttpFetcher::new().unwrap().fetch(Some(&url)).await.unwrap_err();
        assert!(matches!(err, FetchError::HttpStatus(500)));
    }

    #[tokio::test]
    async fn test_fetch_absent_url_is_empty_body() {
        let body = HttpFetcher::new().unwrap().fetch(None).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_network_error() {
        let url = Url::parse(&refused_url().await).unwrap();

        let err = HttpFetcher::new().unwrap().fetch(Some(&url)).await.unwrap_err();
        assert!(err.is_network(), "got {err:?}");
    }

    #[tokio::test]
    async fn test_fetch_short_body_is_network_error() {
        let server = serve_truncated(r#"{"response":{"results":["#).await;
        let url = Url::parse(&server.base_url).unwrap();

        let err = HttpFetcher::new().unwrap().fetch(Some(&url)).await.unwrap_err();
        assert!(err.is_network(), "got {err:?}");
    }

    #[tokio::test]
    async fn test_fetch_silent_server_times_out_as_network_error() {
        let url = Url::parse(&serve_silent().await).unwrap();
        let fetcher = HttpFetcher::new().unwrap();

        let t0 = Instant::now();
        let err = tokio::time::timeout(Duration::from_secs(5), fetcher.fetch(Some(&url)))
            .await
            .expect("read timeout never fired")
            .unwrap_err();

        assert!(err.is_network(), "got {err:?}");
        assert!(t0.elapsed() >= READ_TIMEOUT);
    }

    #[test]
    fn test_bad_client_config_is_not_a_network_error() {
        let err = HttpFetcher::with_user_agent("newsup\n").unwrap_err();
        assert!(matches!(err, FetchError::ClientSetup(_)), "got {err:?}");
        assert!(!err.is_network());
    }
}
