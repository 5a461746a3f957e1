//! Shared fixtures for the trend analyzer integration tests.
//!
//! Provides a pinned clock, record and item builders, and a source that
//! always fails, so fallback paths can be exercised without a network.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use trend_analyzer::{
    FixedClock, SearchFilters, TrendError, TrendItem, TrendRecord, TrendSource, TrendingRequest,
};

/// 2024-01-01T00:00:00Z, the instant every test clock is pinned to.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

pub fn fixed_clock() -> FixedClock {
    FixedClock(fixed_now())
}

pub fn record(title: &str, platform: &str, percentage: f64) -> TrendRecord {
    TrendRecord::new(platform, title, percentage, 0.0, fixed_now())
}

pub fn item(title: &str, category: Option<&str>, age: Duration, active: bool) -> TrendItem {
    TrendItem {
        title: title.to_string(),
        search_volume: "100K+".to_string(),
        started_time: fixed_now() - age,
        category: category.map(|c| c.to_string()),
        is_active: active,
        trend_breakdown: Vec::new(),
        percentage: 10.0,
    }
}

/// A mix of categories, ages and statuses around the 4h/24h/48h boundaries.
pub fn sample_items() -> Vec<TrendItem> {
    vec![
        item("election", Some("Politics"), Duration::hours(2), true),
        item("derby", Some("Sports"), Duration::hours(30), false),
        item("new phone", Some("Business and Finance"), Duration::hours(5), true),
        item("budget vote", Some("Politics"), Duration::hours(50), false),
        item("heatwave", Some("Climate"), Duration::minutes(30), false),
        item("mystery", None, Duration::hours(1), true),
        item("summit", Some("Politics"), Duration::hours(24), true),
    ]
}

pub fn titles<T: AsRef<str>>(values: impl IntoIterator<Item = T>) -> Vec<String> {
    values.into_iter().map(|v| v.as_ref().to_string()).collect()
}

/// A source whose every call fails, as an unreachable endpoint would.
pub struct FailingSource;

impl TrendSource for FailingSource {
    fn search(&self, _term: &str, _filters: &SearchFilters) -> trend_analyzer::Result<Vec<TrendRecord>> {
        Err(TrendError::SourceUnavailable("endpoint down".to_string()))
    }

    fn trending(&self, _request: &TrendingRequest) -> trend_analyzer::Result<Vec<TrendRecord>> {
        Err(TrendError::SourceUnavailable("endpoint down".to_string()))
    }
}

/// A source that always returns the same records.
pub struct StaticSource(pub Vec<TrendRecord>);

impl TrendSource for StaticSource {
    fn search(&self, _term: &str, _filters: &SearchFilters) -> trend_analyzer::Result<Vec<TrendRecord>> {
        Ok(self.0.clone())
    }

    fn trending(&self, _request: &TrendingRequest) -> trend_analyzer::Result<Vec<TrendRecord>> {
        Ok(self.0.clone())
    }
}
