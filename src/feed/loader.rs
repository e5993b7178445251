//! Fetch cycles and their delivery to the display layer.
//!
//! [`run_cycle`] is one build-URL → GET → parse pass. [`FeedLoader`] runs
//! cycles on background tasks and publishes each outcome through a
//! [`FeedSubscription`].
//!
//! # Superseding loads
//!
//! Every [`FeedLoader::start`] or [`FeedLoader::reset`] bumps a generation
//! number. A finished cycle only publishes if its generation is still
//! current, so results of superseded loads are dropped on arrival. The
//! underlying request is left to run to completion.

use crate::error::FetchError;
use crate::feed::http::{Fetch, HttpFetcher};
use crate::feed::parser;
use crate::models::{FetchRequest, NewsItem};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, instrument};
use url::Url;

/// Where a loader is in its `Idle → Fetching → Delivered | Failed` cycle.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Fetching,
    Delivered(Vec<NewsItem>),
    /// Terminal until the next [`FeedLoader::start`].
    Failed(Arc<FetchError>),
}

impl LoadState {
    pub fn is_finished(&self) -> bool {
        matches!(self, LoadState::Delivered(_) | LoadState::Failed(_))
    }

    /// Delivered items; empty in every other state.
    pub fn items(&self) -> &[NewsItem] {
        match self {
            LoadState::Delivered(items) => items.as_slice(),
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            LoadState::Failed(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

/// Run one complete fetch cycle.
///
/// Failures are logged here and returned; nothing panics.
#[instrument(level = "info", skip_all, fields(subject = %request.subject, order_by = %request.order_by))]
pub async fn run_cycle<F: Fetch>(
    fetcher: &F,
    request: &FetchRequest,
) -> Result<Vec<NewsItem>, FetchError> {
    let result = cycle(fetcher, request).await;
    match &result {
        Ok(items) => info!(count = items.len(), "Feed loaded"),
        Err(e) => error!(error = %e, "Feed load failed"),
    }
    result
}

async fn cycle<F: Fetch>(fetcher: &F, request: &FetchRequest) -> Result<Vec<NewsItem>, FetchError> {
    let url = request.url()?;
    let body = fetcher.fetch(Some(&url)).await?;
    parser::parse_feed(&body)
}

/// One-shot fetch that reports every failure as `None`.
///
/// An unparsable `request_url` is logged and treated as absent, which makes
/// the fetch a no-op with an empty body.
#[instrument(level = "info", skip_all)]
pub async fn fetch_news_data<F: Fetch>(
    fetcher: &F,
    request_url: Option<&str>,
) -> Option<Vec<NewsItem>> {
    let url = request_url.and_then(|raw| match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(e) => {
            let e = FetchError::InvalidUrl {
                url: raw.to_string(),
                reason: e.to_string(),
            };
            error!(error = %e, "Problem building the URL");
            None
        }
    });

    match fetcher.fetch(url.as_ref()).await {
        Ok(body) => parser::parse(Some(&body)),
        Err(e) => {
            error!(error = %e, "Problem making the HTTP request");
            None
        }
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    state: LoadState,
}

/// Runs fetch cycles off the caller's task and publishes their outcome.
pub struct FeedLoader<F = HttpFetcher> {
    fetcher: Arc<F>,
    slot: Arc<watch::Sender<Slot>>,
}

impl FeedLoader<HttpFetcher> {
    /// A loader over a fresh [`HttpFetcher`].
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self::with_fetcher(HttpFetcher::new()?))
    }
}

impl<F: Fetch + 'static> FeedLoader<F> {
    pub fn with_fetcher(fetcher: F) -> Self {
        let (slot, _) = watch::channel(Slot::default());
        Self {
            fetcher: Arc::new(fetcher),
            slot: Arc::new(slot),
        }
    }

    /// Register the consumer. Intended to be called once, before the first
    /// [`start`](Self::start).
    pub fn subscribe(&self) -> FeedSubscription {
        FeedSubscription {
            rx: self.slot.subscribe(),
            seen: 0,
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> LoadState {
        self.slot.borrow().state.clone()
    }

    /// Run a cycle on the current task and return its outcome directly.
    pub async fn load(&self, request: &FetchRequest) -> Result<Vec<NewsItem>, FetchError> {
        run_cycle(self.fetcher.as_ref(), request).await
    }

    /// Start a cycle on a background task. Must be called within a tokio runtime.
    ///
    /// Supersedes any load already in flight. Returns the generation of the
    /// new load.
    pub fn start(&self, request: FetchRequest) -> u64 {
        let mut generation = 0;
        self.slot.send_modify(|slot| {
            slot.generation += 1;
            slot.state = LoadState::Fetching;
            generation = slot.generation;
        });
        debug!(generation, "Load started");

        let fetcher = Arc::clone(&self.fetcher);
        let slot = Arc::clone(&self.slot);
        tokio::spawn(async move {
            let outcome = run_cycle(fetcher.as_ref(), &request).await;
            let published = slot.send_if_modified(|current| {
                if current.generation != generation {
                    return false;
                }
                current.state = match outcome {
                    Ok(items) => LoadState::Delivered(items),
                    Err(e) => LoadState::Failed(Arc::new(e)),
                };
                true
            });
            if !published {
                debug!(generation, "Discarding result of superseded load");
            }
        });

        generation
    }

    /// Return to `Idle`, discarding the result of any load in flight.
    pub fn reset(&self) {
        self.slot.send_modify(|slot| {
            slot.generation += 1;
            slot.state = LoadState::Idle;
        });
        debug!("Loader reset");
    }
}

/// Consumer end of a [`FeedLoader`].
pub struct FeedSubscription {
    rx: watch::Receiver<Slot>,
    seen: u64,
}

impl FeedSubscription {
    /// Wait for the next finished load (`Delivered` or `Failed`).
    ///
    /// Each load is reported at most once. Returns `None` once the loader
    /// and all of its tasks are gone.
    pub async fn next_outcome(&mut self) -> Option<LoadState> {
        loop {
            {
                let slot = self.rx.borrow_and_update();
                if slot.state.is_finished() && slot.generation != self.seen {
                    self.seen = slot.generation;
                    return Some(slot.state.clone());
                }
            }
            if self.rx.changed().await.is_err() {
                return None;
            }
        }
    }

    pub fn current(&self) -> LoadState {
        self.rx.borrow().state.clone()
    }
}
