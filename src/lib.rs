//! Trend analyzer SDK for Rust.
//!
//! Searches a topic and produces popularity metrics across platforms (search
//! engine, social network, video site, professional network, code hosting).
//! Data comes from a live daily-trends endpoint or from a synthetic generator,
//! and flows through a small pure pipeline: filter, group and rank, then
//! export to CSV.
//!
//! # Quick start
//!
//! ```no_run
//! use trend_analyzer::{CsvLayout, ExportKind, SearchFilters, TrendAnalyzer};
//!
//! let analyzer = TrendAnalyzer::builder().offline(true).build().unwrap();
//!
//! // Synthetic series for a custom search
//! let series = analyzer.search("rust", &SearchFilters::default()).unwrap();
//!
//! // Group per title and rank by mean percentage
//! let ranked = trend_analyzer::group_and_rank(&series);
//!
//! // Export to CSV
//! let export = analyzer.export(&series, ExportKind::Search, CsvLayout::Historical);
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod clock;
pub mod config;
pub mod csv;
pub mod error;
pub mod export;
pub mod filters;
pub mod generator;
pub mod models;
pub mod payload;
pub mod random;
pub mod ranking;
pub mod sequence;
pub mod source;

#[cfg(feature = "async")]
pub use async_client::{AsyncTrendAnalyzer, RefreshHandle};
pub use clock::{Clock, FixedClock, SystemClock};
pub use csv::{grouped_to_csv, parse_rows, to_csv, CsvLayout};
pub use error::{PayloadError, Result, TrendError};
pub use export::{CsvExport, ExportKind};
pub use filters::{filter_by_active_status, filter_by_category, filter_by_recency, FilterCriteria};
pub use generator::{PlatformProfile, SeriesGenerator};
pub use models::{
    ChartPoint, GroupedTrend, Location, PlatformStat, SearchFilters, TimeRange, Timeframe,
    TrendAttributes, TrendItem, TrendRecord, TrendingRequest,
};
pub use random::{RandomSource, RngSource, ScriptedRandom};
pub use ranking::{chart_points, group_and_rank};
pub use sequence::{LatestResults, RequestTicket};
pub use source::{DailyTrendsSource, FallbackSource, SyntheticSource, TrendSource};

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use source::SharedRandom;

// ---------------------------------------------------------------------------
// TrendAnalyzerBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`TrendAnalyzer`].
///
/// Use [`TrendAnalyzer::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](TrendAnalyzerBuilder::build).
pub struct TrendAnalyzerBuilder {
    endpoint: String,
    offline: bool,
    timeout: Duration,
    point_count: usize,
    platforms: Option<Vec<PlatformProfile>>,
    export_dir: Option<PathBuf>,
    seed: Option<u64>,
    clock: Option<Arc<dyn Clock>>,
    source: Option<Arc<dyn TrendSource>>,
}

impl Default for TrendAnalyzerBuilder {
    fn default() -> Self {
        Self {
            endpoint: config::TRENDS_BASE.to_string(),
            offline: false,
            timeout: config::DEFAULT_TIMEOUT,
            point_count: config::DEFAULT_POINT_COUNT,
            platforms: None,
            export_dir: None,
            seed: None,
            clock: None,
            source: None,
        }
    }
}

impl TrendAnalyzerBuilder {
    /// Base URL of the daily-trends service. Defaults to [`config::TRENDS_BASE`].
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, the analyzer never touches the network and serves
    /// synthetic data only. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Points per generated series. Defaults to 50.
    pub fn point_count(mut self, count: usize) -> Self {
        self.point_count = count;
        self
    }

    /// Replace the platform registry used by the generators.
    pub fn platforms(mut self, platforms: Vec<PlatformProfile>) -> Self {
        self.platforms = Some(platforms);
        self
    }

    /// Directory that [`TrendAnalyzer::save_export`] writes into.
    ///
    /// If not set, the platform download directory is used, or the current
    /// directory when there is none.
    pub fn export_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.export_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Seed the random source for reproducible synthetic data.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Use a custom clock instead of the system clock.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Use a custom primary source instead of the daily-trends endpoint.
    ///
    /// The synthetic source still backs it on failure.
    pub fn source(mut self, source: Arc<dyn TrendSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Build the analyzer.
    ///
    /// No network traffic happens here; the HTTP client is created lazily on
    /// the first live fetch.
    pub fn build(self) -> Result<TrendAnalyzer> {
        if self.point_count == 0 {
            return Err(TrendError::InvalidArgument(
                "point_count must be at least 1".to_string(),
            ));
        }

        let generator = match self.platforms {
            Some(platforms) => {
                if let Some(bad) = platforms.iter().find(|p| !p.scale.is_finite() || p.scale < 0.0) {
                    return Err(TrendError::InvalidArgument(format!(
                        "platform '{}' has invalid scale {}",
                        bad.name, bad.scale
                    )));
                }
                SeriesGenerator::new(platforms)
            }
            None => SeriesGenerator::default(),
        };

        let clock: Arc<dyn Clock> = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let rng: SharedRandom = match self.seed {
            Some(seed) => source::shared_random(RngSource::seeded(seed)),
            None => source::shared_random(RngSource::thread()),
        };

        let synthetic = SyntheticSource::new(
            generator.clone(),
            clock.clone(),
            rng.clone(),
            self.point_count,
        );

        let source: Arc<dyn TrendSource> = match (self.offline, self.source) {
            (true, _) => Arc::new(synthetic),
            (false, Some(primary)) => Arc::new(FallbackSource::new(primary, synthetic)),
            (false, None) => {
                let live = DailyTrendsSource::new(
                    self.endpoint,
                    self.timeout,
                    generator.clone(),
                    clock.clone(),
                    rng.clone(),
                );
                Arc::new(FallbackSource::new(live, synthetic))
            }
        };

        Ok(TrendAnalyzer {
            source,
            generator,
            clock,
            rng,
            export_dir: self.export_dir.unwrap_or_else(config::default_export_dir),
            latest: Arc::new(LatestResults::new()),
            point_count: self.point_count,
            offline: self.offline,
        })
    }
}

// ---------------------------------------------------------------------------
// TrendAnalyzer
// ---------------------------------------------------------------------------

/// The main entry point of the SDK.
///
/// Owns the configured source (live with synthetic fallback, or synthetic
/// only), the generator, and the injected clock and random source. Created
/// via [`TrendAnalyzer::builder()`].
pub struct TrendAnalyzer {
    source: Arc<dyn TrendSource>,
    generator: SeriesGenerator,
    clock: Arc<dyn Clock>,
    rng: SharedRandom,
    export_dir: PathBuf,
    latest: Arc<LatestResults>,
    point_count: usize,
    offline: bool,
}

impl TrendAnalyzer {
    /// Create a new builder for configuring the analyzer.
    pub fn builder() -> TrendAnalyzerBuilder {
        TrendAnalyzerBuilder::default()
    }

    // -- Data acquisition --------------------------------------------------

    /// Time series for a search term across all registered platforms.
    ///
    /// Source failures are absorbed by the synthetic fallback; only a blank
    /// term is reported as an error.
    pub fn search(&self, term: &str, filters: &SearchFilters) -> Result<Vec<TrendRecord>> {
        let term = non_blank(term)?;
        debug!("Searching '{}' over {}", term, filters.timeframe);
        self.source.search(term, filters)
    }

    /// Current trending topics, one record per (topic, platform).
    pub fn trending(&self, request: &TrendingRequest) -> Result<Vec<TrendRecord>> {
        self.source.trending(request)
    }

    /// Fetch trending topics under a new ticket and apply them to
    /// [`latest()`](Self::latest) unless a newer fetch already landed.
    ///
    /// Returns whether the result was applied.
    pub fn refresh_trending(&self, request: &TrendingRequest) -> Result<bool> {
        let ticket = self.latest.begin();
        let records = self.trending(request)?;
        Ok(self.latest.apply(ticket, records))
    }

    /// The most recently applied trending result set.
    pub fn latest(&self) -> &Arc<LatestResults> {
        &self.latest
    }

    /// Simulated ranked search results, `limit` entries long.
    pub fn simulate_results(&self, query: &str, limit: usize) -> Result<Vec<TrendRecord>> {
        let query = non_blank(query)?;
        let mut rng = lock_rng(&self.rng);
        Ok(self
            .generator
            .simulate_results(query, limit, &self.clock, &mut **rng))
    }

    /// Generate a synthetic series with the analyzer's clock and random source.
    pub fn generate<S: AsRef<str>>(
        &self,
        term: &str,
        platforms: &[S],
        window: Duration,
        point_count: usize,
    ) -> Vec<TrendRecord> {
        let mut rng = lock_rng(&self.rng);
        self.generator
            .generate(term, platforms, window, point_count, &self.clock, &mut **rng)
    }

    // -- Pipeline ----------------------------------------------------------

    /// Apply filter criteria against the analyzer's clock.
    pub fn filter<T: TrendAttributes + Clone>(&self, items: &[T], criteria: &FilterCriteria) -> Vec<T> {
        criteria.apply(items, &self.clock)
    }

    /// Group records by title and rank them by mean percentage.
    pub fn rank(&self, records: &[TrendRecord]) -> Vec<GroupedTrend> {
        ranking::group_and_rank(records)
    }

    // -- Export ------------------------------------------------------------

    /// Render records into a named CSV export stamped with the current time.
    pub fn export(&self, records: &[TrendRecord], kind: ExportKind, layout: CsvLayout) -> CsvExport {
        CsvExport::new(records, kind, layout, self.clock.now())
    }

    /// Render grouped trends into a named CSV export.
    pub fn export_grouped(&self, groups: &[GroupedTrend]) -> CsvExport {
        CsvExport::grouped(groups, self.clock.now())
    }

    /// Write an export into the configured export directory.
    pub fn save_export(&self, export: &CsvExport) -> Result<PathBuf> {
        export.write_to(&self.export_dir)
    }

    // -- Accessors ---------------------------------------------------------

    pub fn generator(&self) -> &SeriesGenerator {
        &self.generator
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn source(&self) -> &Arc<dyn TrendSource> {
        &self.source
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    pub fn point_count(&self) -> usize {
        self.point_count
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for TrendAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TrendAnalyzer(platforms=[{}], points={}, export_dir={}, offline={})",
            self.generator.platform_names().join(", "),
            self.point_count,
            self.export_dir.display(),
            self.offline
        )
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn non_blank(term: &str) -> Result<&str> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        return Err(TrendError::InvalidArgument(
            "search term must not be blank".to_string(),
        ));
    }
    Ok(trimmed)
}

fn lock_rng(rng: &SharedRandom) -> std::sync::MutexGuard<'_, Box<dyn RandomSource + Send>> {
    match rng.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
