//! Conjunctive filters over trend entries.
//!
//! Each filter borrows its input and returns a new vector, so the three axes
//! compose in any order with the same result.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::config::ALL_CATEGORIES;
use crate::models::{TimeRange, TrendAttributes};

const MILLIS_PER_HOUR: f64 = 60.0 * 60.0 * 1000.0;

/// Keep entries whose category is exactly `category`.
///
/// The [`ALL_CATEGORIES`] sentinel returns every entry.
pub fn filter_by_category<T>(records: &[T], category: &str) -> Vec<T>
where
    T: TrendAttributes + Clone,
{
    if category == ALL_CATEGORIES {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| r.category() == Some(category))
        .cloned()
        .collect()
}

/// Keep entries started at most `window_hours` before now (inclusive).
pub fn filter_by_recency<T, C>(records: &[T], window_hours: f64, clock: &C) -> Vec<T>
where
    T: TrendAttributes + Clone,
    C: Clock + ?Sized,
{
    let now = clock.now();
    records
        .iter()
        .filter(|r| {
            let age_hours = (now - r.started_time()).num_milliseconds() as f64 / MILLIS_PER_HOUR;
            age_hours <= window_hours
        })
        .cloned()
        .collect()
}

/// Keep only active entries when `active_only` is set.
pub fn filter_by_active_status<T>(records: &[T], active_only: bool) -> Vec<T>
where
    T: TrendAttributes + Clone,
{
    if !active_only {
        return records.to_vec();
    }
    records.iter().filter(|r| r.is_active()).cloned().collect()
}

// ---------------------------------------------------------------------------
// FilterCriteria
// ---------------------------------------------------------------------------

/// The three filter axes as one immutable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub category: String,
    pub recency_window_hours: f64,
    pub active_only: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            recency_window_hours: TimeRange::default().hours(),
            active_only: false,
        }
    }
}

impl FilterCriteria {
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn recency_window_hours(mut self, hours: f64) -> Self {
        self.recency_window_hours = hours;
        self
    }

    pub fn time_range(self, range: TimeRange) -> Self {
        self.recency_window_hours(range.hours())
    }

    pub fn active_only(mut self, active_only: bool) -> Self {
        self.active_only = active_only;
        self
    }

    /// Whether a single entry passes all three axes.
    pub fn matches<T, C>(&self, record: &T, clock: &C) -> bool
    where
        T: TrendAttributes,
        C: Clock + ?Sized,
    {
        let category_ok =
            self.category == ALL_CATEGORIES || record.category() == Some(self.category.as_str());
        let age_hours =
            (clock.now() - record.started_time()).num_milliseconds() as f64 / MILLIS_PER_HOUR;
        let active_ok = !self.active_only || record.is_active();
        category_ok && age_hours <= self.recency_window_hours && active_ok
    }

    /// Apply category, recency and status filters.
    pub fn apply<T, C>(&self, records: &[T], clock: &C) -> Vec<T>
    where
        T: TrendAttributes + Clone,
        C: Clock + ?Sized,
    {
        let by_category = filter_by_category(records, &self.category);
        let recent = filter_by_recency(&by_category, self.recency_window_hours, clock);
        filter_by_active_status(&recent, self.active_only)
    }
}
