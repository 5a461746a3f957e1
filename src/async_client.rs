//! Async wrapper around [`TrendAnalyzer`] for use in Tokio runtimes.
//!
//! Runs SDK operations on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], since live fetches use a blocking HTTP
//! client. Also provides the periodic trending refresh.
//!
//! # Example
//!
//! ```no_run
//! use trend_analyzer::{AsyncTrendAnalyzer, TrendAnalyzer, TrendingRequest};
//! use std::time::Duration;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let sdk = AsyncTrendAnalyzer::new(TrendAnalyzer::builder().build().unwrap());
//!
//!     let trending = sdk.trending(TrendingRequest::default()).await.unwrap();
//!
//!     // Re-fetch every five minutes until the handle is dropped
//!     let refresh = sdk.spawn_refresh(Duration::from_secs(300), TrendingRequest::default());
//!     let (_, latest) = refresh.latest().snapshot();
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config;
use crate::error::{Result, TrendError};
use crate::models::{SearchFilters, TrendRecord, TrendingRequest};
use crate::sequence::LatestResults;
use crate::TrendAnalyzer;

// ---------------------------------------------------------------------------
// AsyncTrendAnalyzer
// ---------------------------------------------------------------------------

/// Async wrapper around [`TrendAnalyzer`].
///
/// Cheap to clone; clones share the analyzer and its latest-results slot.
#[derive(Clone)]
pub struct AsyncTrendAnalyzer {
    inner: Arc<TrendAnalyzer>,
}

impl AsyncTrendAnalyzer {
    pub fn new(analyzer: TrendAnalyzer) -> Self {
        Self {
            inner: Arc::new(analyzer),
        }
    }

    /// Run a sync SDK operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&TrendAnalyzer) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&sdk))
            .await
            .map_err(|e| TrendError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Search asynchronously. See [`TrendAnalyzer::search`].
    pub async fn search(&self, term: &str, filters: SearchFilters) -> Result<Vec<TrendRecord>> {
        let term = term.to_string();
        self.run(move |s| s.search(&term, &filters)).await
    }

    /// Fetch trending topics asynchronously. See [`TrendAnalyzer::trending`].
    pub async fn trending(&self, request: TrendingRequest) -> Result<Vec<TrendRecord>> {
        self.run(move |s| s.trending(&request)).await
    }

    /// Fetch trending topics and apply them to the shared latest-results slot.
    pub async fn refresh_trending(&self, request: TrendingRequest) -> Result<bool> {
        self.run(move |s| s.refresh_trending(&request)).await
    }

    /// The shared latest-results slot.
    pub fn latest(&self) -> Arc<LatestResults> {
        self.inner.latest().clone()
    }

    /// Access the wrapped analyzer.
    pub fn analyzer(&self) -> &TrendAnalyzer {
        &self.inner
    }

    /// Re-fetch trending topics every five minutes, starting immediately.
    pub fn spawn_default_refresh(&self, request: TrendingRequest) -> RefreshHandle {
        self.spawn_refresh(config::DEFAULT_REFRESH_INTERVAL, request)
    }

    /// Re-fetch trending topics every `interval`, starting immediately.
    ///
    /// Each tick takes a ticket before fetching, so a stale response is
    /// discarded rather than overwriting a newer one. Failed ticks are
    /// logged and skipped; there is no retry. Dropping the returned handle
    /// stops the loop.
    pub fn spawn_refresh(&self, interval: Duration, request: TrendingRequest) -> RefreshHandle {
        let sdk = self.clone();
        let latest = self.latest();
        let task = tokio::spawn(async move {
            // `interval` panics on a zero period.
            let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
            loop {
                ticker.tick().await;
                match sdk.refresh_trending(request.clone()).await {
                    Ok(true) => debug!("Trending refresh applied"),
                    Ok(false) => debug!("Trending refresh superseded by a newer response"),
                    Err(e) => warn!("Trending refresh failed: {}", e),
                }
            }
        });
        RefreshHandle { task, latest }
    }
}

// ---------------------------------------------------------------------------
// RefreshHandle
// ---------------------------------------------------------------------------

/// Handle to a running refresh loop. Aborts the loop when dropped.
pub struct RefreshHandle {
    task: JoinHandle<()>,
    latest: Arc<LatestResults>,
}

impl RefreshHandle {
    pub fn latest(&self) -> &Arc<LatestResults> {
        &self.latest
    }

    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
