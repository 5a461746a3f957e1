//! Trend data sources.
//!
//! [`TrendSource`] is the boundary the pipeline consumes. [`DailyTrendsSource`]
//! talks to the live daily-trends endpoint, [`SyntheticSource`] generates data
//! locally, and [`FallbackSource`] substitutes the local data whenever the
//! primary fails, so callers never see a source error.

use std::sync::{Arc, Mutex, OnceLock};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config;
use crate::error::{Result, TrendError};
use crate::generator::{self, SeriesGenerator};
use crate::models::{SearchFilters, TrendRecord, TrendingRequest};
use crate::payload::{self, Headline};
use crate::random::RandomSource;

/// Random source shared behind a lock so sources can be used through `&self`.
pub type SharedRandom = Arc<Mutex<Box<dyn RandomSource + Send>>>;

pub fn shared_random<R: RandomSource + Send + 'static>(rng: R) -> SharedRandom {
    Arc::new(Mutex::new(Box::new(rng)))
}

/// A provider of trend records.
pub trait TrendSource: Send + Sync {
    /// Time series for a custom search term.
    fn search(&self, term: &str, filters: &SearchFilters) -> Result<Vec<TrendRecord>>;

    /// Current trending topics, one record per (topic, platform).
    fn trending(&self, request: &TrendingRequest) -> Result<Vec<TrendRecord>>;
}

impl<T: TrendSource + ?Sized> TrendSource for Arc<T> {
    fn search(&self, term: &str, filters: &SearchFilters) -> Result<Vec<TrendRecord>> {
        (**self).search(term, filters)
    }

    fn trending(&self, request: &TrendingRequest) -> Result<Vec<TrendRecord>> {
        (**self).trending(request)
    }
}

impl<T: TrendSource + ?Sized> TrendSource for Box<T> {
    fn search(&self, term: &str, filters: &SearchFilters) -> Result<Vec<TrendRecord>> {
        (**self).search(term, filters)
    }

    fn trending(&self, request: &TrendingRequest) -> Result<Vec<TrendRecord>> {
        (**self).trending(request)
    }
}

/// Expand each headline into one record per platform of `generator`.
pub fn expand_headlines<R>(
    generator: &SeriesGenerator,
    headlines: &[Headline],
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<TrendRecord>
where
    R: RandomSource + ?Sized,
{
    headlines
        .iter()
        .flat_map(|h| generator.platform_snapshot(&h.query, h.percentage(), now, rng))
        .collect()
}

fn with_rng<T>(rng: &SharedRandom, f: impl FnOnce(&mut dyn RandomSource) -> T) -> T {
    let mut guard = match rng.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    f(&mut **guard)
}

// ---------------------------------------------------------------------------
// SyntheticSource
// ---------------------------------------------------------------------------

/// Locally generated data. Never fails.
pub struct SyntheticSource {
    generator: SeriesGenerator,
    clock: Arc<dyn Clock>,
    rng: SharedRandom,
    point_count: usize,
}

impl SyntheticSource {
    pub fn new(
        generator: SeriesGenerator,
        clock: Arc<dyn Clock>,
        rng: SharedRandom,
        point_count: usize,
    ) -> Self {
        Self {
            generator,
            clock,
            rng,
            point_count,
        }
    }

    pub fn generator(&self) -> &SeriesGenerator {
        &self.generator
    }
}

impl TrendSource for SyntheticSource {
    fn search(&self, term: &str, filters: &SearchFilters) -> Result<Vec<TrendRecord>> {
        let platforms = self.generator.platform_names();
        let window = filters.timeframe.window();
        Ok(with_rng(&self.rng, |rng| {
            self.generator
                .generate(term, &platforms, window, self.point_count, &self.clock, rng)
        }))
    }

    fn trending(&self, _request: &TrendingRequest) -> Result<Vec<TrendRecord>> {
        let now = self.clock.now();
        Ok(with_rng(&self.rng, |rng| {
            let headlines = generator::fallback_headlines(rng);
            expand_headlines(&self.generator, &headlines, now, rng)
        }))
    }
}

// ---------------------------------------------------------------------------
// DailyTrendsSource
// ---------------------------------------------------------------------------

/// Live daily-trends endpoint.
///
/// Only the trending view is backed by the endpoint; custom searches report
/// [`TrendError::SourceUnavailable`].
pub struct DailyTrendsSource {
    base_url: String,
    timeout: Duration,
    client: OnceLock<Client>,
    generator: SeriesGenerator,
    clock: Arc<dyn Clock>,
    rng: SharedRandom,
}

impl DailyTrendsSource {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        generator: SeriesGenerator,
        clock: Arc<dyn Clock>,
        rng: SharedRandom,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            client: OnceLock::new(),
            generator,
            clock,
            rng,
        }
    }

    /// Lazy HTTP client, created on first use.
    fn client(&self) -> Result<Client> {
        if let Some(client) = self.client.get() {
            return Ok(client.clone());
        }
        let client = Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(self.client.get_or_init(|| client).clone())
    }

    /// Request URL for a geo code on the given day.
    pub fn daily_trends_url(&self, geo: &str, now: DateTime<Utc>) -> String {
        format!(
            "{}/{}?hl=tr-TR&tz=-180&geo={}&ns=15&ed={}",
            self.base_url,
            config::DAILY_TRENDS_PATH,
            geo,
            now.format("%Y-%m-%d")
        )
    }

    /// Fetch and validate the headlines for a geo code.
    pub fn fetch_headlines(&self, geo: &str) -> Result<Vec<Headline>> {
        let url = self.daily_trends_url(geo, self.clock.now());
        let start = Instant::now();
        debug!("Fetching daily trends - geo={}", geo);

        let body = self
            .client()?
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()?
            .error_for_status()?
            .text()?;

        let headlines = payload::parse_daily_trends(&body)?;
        info!(
            "Daily trends fetch completed - geo={}, duration={:.2}s, headlines={}",
            geo,
            start.elapsed().as_secs_f32(),
            headlines.len()
        );
        Ok(headlines)
    }
}

impl TrendSource for DailyTrendsSource {
    fn search(&self, term: &str, _filters: &SearchFilters) -> Result<Vec<TrendRecord>> {
        Err(TrendError::SourceUnavailable(format!(
            "custom search for '{}' is not offered by the daily-trends endpoint",
            term
        )))
    }

    fn trending(&self, request: &TrendingRequest) -> Result<Vec<TrendRecord>> {
        let headlines = self.fetch_headlines(request.location.geo())?;
        let now = self.clock.now();
        Ok(with_rng(&self.rng, |rng| {
            expand_headlines(&self.generator, &headlines, now, rng)
        }))
    }
}

// ---------------------------------------------------------------------------
// FallbackSource
// ---------------------------------------------------------------------------

/// Tries `primary` once and substitutes `fallback` on any failure.
pub struct FallbackSource<P, F> {
    primary: P,
    fallback: F,
}

impl<P: TrendSource, F: TrendSource> FallbackSource<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }
}

impl<P: TrendSource, F: TrendSource> TrendSource for FallbackSource<P, F> {
    fn search(&self, term: &str, filters: &SearchFilters) -> Result<Vec<TrendRecord>> {
        match self.primary.search(term, filters) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!("Search for '{}' failed, using fallback data: {}", term, e);
                self.fallback.search(term, filters)
            }
        }
    }

    fn trending(&self, request: &TrendingRequest) -> Result<Vec<TrendRecord>> {
        match self.primary.trending(request) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!("Trending fetch failed, using fallback data: {}", e);
                self.fallback.trending(request)
            }
        }
    }
}
