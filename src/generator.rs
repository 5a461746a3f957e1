//! Synthetic trend series generator.
//!
//! Produces plausible popularity series for a term across platforms when no
//! live data source is available, plus the per-platform snapshots and the
//! offline headline list used by the fallback path. All randomness comes from
//! an injected [`RandomSource`] and all timestamps from an injected [`Clock`].

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::clock::Clock;
use crate::config;
use crate::models::TrendRecord;
use crate::payload::Headline;
use crate::random::RandomSource;

/// Windows longer than this are truncated.
const MAX_WINDOW_MS: i64 = 100 * 365 * 24 * 60 * 60 * 1000;

const BASELINE_MIN: f64 = 50.0;
const BASELINE_MAX: f64 = 100.0;
const JITTER: f64 = 10.0;
const SNAPSHOT_CHANGE: f64 = 100.0;

/// A platform and its scale relative to the primary search engine.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformProfile {
    pub name: String,
    pub scale: f64,
}

impl PlatformProfile {
    pub fn new(name: impl Into<String>, scale: f64) -> Self {
        Self {
            name: name.into(),
            scale,
        }
    }
}

/// Generates synthetic trend records for a registry of platforms.
///
/// Platforms missing from the registry are generated with a scale of `1.0`.
#[derive(Debug, Clone)]
pub struct SeriesGenerator {
    platforms: Vec<PlatformProfile>,
}

impl Default for SeriesGenerator {
    fn default() -> Self {
        Self::new(
            config::platform_scales()
                .into_iter()
                .map(|(name, scale)| PlatformProfile::new(name, scale))
                .collect(),
        )
    }
}

impl SeriesGenerator {
    pub fn new(platforms: Vec<PlatformProfile>) -> Self {
        Self { platforms }
    }

    /// Register a platform, replacing the scale of an existing one with the same name.
    pub fn with_platform(mut self, name: impl Into<String>, scale: f64) -> Self {
        let name = name.into();
        match self.platforms.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.scale = scale,
            None => self.platforms.push(PlatformProfile::new(name, scale)),
        }
        self
    }

    pub fn platforms(&self) -> &[PlatformProfile] {
        &self.platforms
    }

    pub fn platform_names(&self) -> Vec<String> {
        self.platforms.iter().map(|p| p.name.clone()).collect()
    }

    pub fn scale_for(&self, platform: &str) -> f64 {
        self.platforms
            .iter()
            .find(|p| p.name == platform)
            .map(|p| p.scale)
            .unwrap_or(1.0)
    }

    /// Generate `point_count` evenly spaced points per platform over
    /// `[now - window, now]`.
    ///
    /// One baseline in `[50, 100)` is drawn first and shared by every
    /// platform. Each point then draws one jitter value in `[-10, 10)`,
    /// platform by platform in the given order. Values are rounded to one
    /// decimal and clamped into `[0, 100]`; `change` is `0` for the first
    /// point and `value - baseline` afterwards.
    pub fn generate<S, C, R>(
        &self,
        term: &str,
        platforms: &[S],
        window: Duration,
        point_count: usize,
        clock: &C,
        rng: &mut R,
    ) -> Vec<TrendRecord>
    where
        S: AsRef<str>,
        C: Clock + ?Sized,
        R: RandomSource + ?Sized,
    {
        let timestamps = series_timestamps(clock.now(), window_millis(window), point_count);
        if timestamps.is_empty() || platforms.is_empty() {
            return Vec::new();
        }

        let baseline = rng.range(BASELINE_MIN, BASELINE_MAX);
        let mut records = Vec::with_capacity(platforms.len() * timestamps.len());

        for platform in platforms {
            let platform = platform.as_ref();
            let scale = self.scale_for(platform);

            for (i, ts) in timestamps.iter().enumerate() {
                let jitter = rng.range(-JITTER, JITTER);
                let value = clamp_percentage(round1(baseline * scale + jitter));
                let change = if i == 0 { 0.0 } else { value - baseline };
                records.push(TrendRecord::new(platform, term, value, change, *ts));
            }
        }

        records
    }

    /// One record per registered platform, scaled from a single headline value.
    pub fn platform_snapshot<R>(
        &self,
        term: &str,
        base_value: f64,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Vec<TrendRecord>
    where
        R: RandomSource + ?Sized,
    {
        self.platforms
            .iter()
            .map(|p| {
                let value = clamp_percentage(round1(base_value * p.scale + rng.range(-JITTER, JITTER)));
                let change = round1(rng.range(-SNAPSHOT_CHANGE, SNAPSHOT_CHANGE));
                TrendRecord::new(p.name.clone(), term, value, change, now)
            })
            .collect()
    }

    /// Simulated ranked search results for `query`, with linearly decaying percentages.
    pub fn simulate_results<C, R>(
        &self,
        query: &str,
        limit: usize,
        clock: &C,
        rng: &mut R,
    ) -> Vec<TrendRecord>
    where
        C: Clock + ?Sized,
        R: RandomSource + ?Sized,
    {
        if limit == 0 || self.platforms.is_empty() {
            return Vec::new();
        }

        let now = clock.now();
        let step = 100.0 / limit as f64 * 0.8;

        (0..limit)
            .map(|i| {
                let platform = &self.platforms[rng.index(self.platforms.len())].name;
                let percentage = clamp_percentage(round1(100.0 - i as f64 * step));
                let change = round1(rng.range(-SNAPSHOT_CHANGE, SNAPSHOT_CHANGE));
                let suffix = if rng.next_unit() > 0.5 { "trends" } else { "analytics" };
                TrendRecord::new(
                    platform.clone(),
                    format!("{} {}", query, suffix),
                    percentage,
                    change,
                    now,
                )
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Free-standing helpers
// ---------------------------------------------------------------------------

/// The offline headline list: one "<Category> News" entry per fallback
/// category, with traffic in `[500K, 1000K)`.
pub fn fallback_headlines<R>(rng: &mut R) -> Vec<Headline>
where
    R: RandomSource + ?Sized,
{
    config::fallback_categories()
        .iter()
        .map(|category| {
            let thousands = rng.range(500.0, 1000.0).floor() as u64;
            Headline {
                query: format!("{} News", category),
                formatted_traffic: format!("{}K+", thousands),
                articles: Vec::new(),
            }
        })
        .collect()
}

/// `n` timestamps ending at `now`, spaced by `window_ms / (n - 1)`.
///
/// The step never drops below one millisecond, so timestamps stay strictly
/// increasing even for tiny windows.
pub fn series_timestamps(now: DateTime<Utc>, window_ms: i64, n: usize) -> Vec<DateTime<Utc>> {
    match n {
        0 => Vec::new(),
        1 => vec![now],
        _ => {
            let intervals = (n - 1) as i64;
            let span = window_ms.max(intervals) as i128;
            (0..n as i128)
                .map(|i| {
                    let back = span - span * i / intervals as i128;
                    now.checked_sub_signed(TimeDelta::milliseconds(back as i64))
                        .unwrap_or(DateTime::<Utc>::MIN_UTC)
                })
                .collect()
        }
    }
}

pub fn clamp_percentage(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Round to one decimal. Negative zero comes back as `0.0`.
pub(crate) fn round1(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn window_millis(window: Duration) -> i64 {
    window.as_millis().min(MAX_WINDOW_MS as u128) as i64
}
