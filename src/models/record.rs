use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrendError};

// ---------------------------------------------------------------------------
// TrendRecord - One observation of a term on a platform
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendRecord {
    pub platform: String,
    pub percentage: f64,
    pub change: f64,
    pub title: String,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl TrendRecord {
    pub fn new(
        platform: impl Into<String>,
        title: impl Into<String>,
        percentage: f64,
        change: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            platform: platform.into(),
            percentage,
            change,
            title: title.into(),
            timestamp,
        }
    }

    /// Check the range invariants: `percentage` in `[0, 100]` and a finite `change`.
    pub fn validate(&self) -> Result<()> {
        if !self.percentage.is_finite() || !(0.0..=100.0).contains(&self.percentage) {
            return Err(TrendError::Validation(format!(
                "percentage {} for '{}' on {} is outside [0, 100]",
                self.percentage, self.title, self.platform
            )));
        }
        if !self.change.is_finite() {
            return Err(TrendError::Validation(format!(
                "change for '{}' on {} is not finite",
                self.title, self.platform
            )));
        }
        Ok(())
    }

    /// Negative drift is displayed differently; zero counts as growth.
    pub fn is_decline(&self) -> bool {
        self.change < 0.0
    }

    /// Display form of the change, e.g. `+4.5%` or `-12%`.
    pub fn formatted_change(&self) -> String {
        if self.is_decline() {
            format!("{}%", self.change)
        } else {
            format!("+{}%", self.change.abs())
        }
    }

    /// Timestamp rendered the way it appears on the wire and in exports.
    pub fn iso_timestamp(&self) -> String {
        iso_millis::format(&self.timestamp)
    }
}

// ---------------------------------------------------------------------------
// PlatformStat / GroupedTrend - Per-title aggregation across platforms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformStat {
    pub percentage: f64,
    pub change: f64,
}

/// All platform readings for one title, with the mean percentage as `score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedTrend {
    pub title: String,
    pub platforms: BTreeMap<String, PlatformStat>,
    pub score: f64,
}

impl GroupedTrend {
    /// Platform with the highest percentage; the first one alphabetically on ties.
    pub fn top_platform(&self) -> Option<(&str, &PlatformStat)> {
        self.platforms
            .iter()
            .fold(None, |best: Option<(&String, &PlatformStat)>, (name, stat)| match best {
                Some((_, b)) if b.percentage >= stat.percentage => best,
                _ => Some((name, stat)),
            })
            .map(|(name, stat)| (name.as_str(), stat))
    }

    /// Flatten the group back into one record per platform.
    pub fn to_records(&self, timestamp: DateTime<Utc>) -> Vec<TrendRecord> {
        self.platforms
            .iter()
            .map(|(platform, stat)| {
                TrendRecord::new(
                    platform.clone(),
                    self.title.clone(),
                    stat.percentage,
                    stat.change,
                    timestamp,
                )
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// ChartPoint - Bar chart datum
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
    pub platform: String,
}

// ---------------------------------------------------------------------------
// ISO-8601 with millisecond precision and a `Z` suffix
// ---------------------------------------------------------------------------

pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
