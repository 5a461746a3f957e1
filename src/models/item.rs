use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Attributes the filter engine reads from a trend entry.
///
/// Implemented by [`TrendItem`]; callers with their own entry type can
/// implement it to reuse the filters.
pub trait TrendAttributes {
    fn category(&self) -> Option<&str>;
    fn started_time(&self) -> DateTime<Utc>;
    fn is_active(&self) -> bool;
}

// ---------------------------------------------------------------------------
// TrendItem - One "trending now" entry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendItem {
    pub title: String,
    pub search_volume: String,
    #[serde(with = "crate::models::record::iso_millis")]
    pub started_time: DateTime<Utc>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub trend_breakdown: Vec<String>,
    #[serde(default)]
    pub percentage: f64,
}

impl TrendAttributes for TrendItem {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn started_time(&self) -> DateTime<Utc> {
        self.started_time
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}
