use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config;

const HOUR: u64 = 60 * 60;
const DAY: u64 = 24 * HOUR;

// ---------------------------------------------------------------------------
// Timeframe - Window covered by a custom search series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Timeframe {
    LastHour,
    Last24Hours,
    #[default]
    Last7Days,
    Last30Days,
    Last90Days,
    Last12Months,
    Last5Years,
}

impl Timeframe {
    pub fn window(self) -> Duration {
        let secs = match self {
            Timeframe::LastHour => HOUR,
            Timeframe::Last24Hours => DAY,
            Timeframe::Last7Days => 7 * DAY,
            Timeframe::Last30Days => 30 * DAY,
            Timeframe::Last90Days => 90 * DAY,
            Timeframe::Last12Months => 365 * DAY,
            Timeframe::Last5Years => 5 * 365 * DAY,
        };
        Duration::from_secs(secs)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::LastHour => "LAST_HOUR",
            Timeframe::Last24Hours => "LAST_24_HOURS",
            Timeframe::Last7Days => "LAST_7_DAYS",
            Timeframe::Last30Days => "LAST_30_DAYS",
            Timeframe::Last90Days => "LAST_90_DAYS",
            Timeframe::Last12Months => "LAST_12_MONTHS",
            Timeframe::Last5Years => "LAST_5_YEARS",
        }
    }

    /// Parse a wire name, defaulting to the last seven days for unknown values.
    pub fn parse_or_default(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "LAST_HOUR" => Ok(Timeframe::LastHour),
            "LAST_24_HOURS" => Ok(Timeframe::Last24Hours),
            "LAST_7_DAYS" => Ok(Timeframe::Last7Days),
            "LAST_30_DAYS" => Ok(Timeframe::Last30Days),
            "LAST_90_DAYS" => Ok(Timeframe::Last90Days),
            "LAST_12_MONTHS" => Ok(Timeframe::Last12Months),
            "LAST_5_YEARS" => Ok(Timeframe::Last5Years),
            other => Err(format!("unknown timeframe '{}'", other)),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TimeRange - Recency window of the "trending now" view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "4h")]
    Past4Hours,
    #[serde(rename = "24h")]
    #[default]
    Past24Hours,
    #[serde(rename = "48h")]
    Past48Hours,
    #[serde(rename = "7d")]
    Past7Days,
}

impl TimeRange {
    pub fn hours(self) -> f64 {
        match self {
            TimeRange::Past4Hours => 4.0,
            TimeRange::Past24Hours => 24.0,
            TimeRange::Past48Hours => 48.0,
            TimeRange::Past7Days => 168.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeRange::Past4Hours => "Past 4 hours",
            TimeRange::Past24Hours => "Past 24 hours",
            TimeRange::Past48Hours => "Past 48 hours",
            TimeRange::Past7Days => "Past 7 days",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeRange::Past4Hours => "4h",
            TimeRange::Past24Hours => "24h",
            TimeRange::Past48Hours => "48h",
            TimeRange::Past7Days => "7d",
        }
    }

    /// Parse a wire value, defaulting to the past 24 hours for unknown values.
    pub fn parse_or_default(raw: &str) -> Self {
        match raw {
            "4h" => TimeRange::Past4Hours,
            "48h" => TimeRange::Past48Hours,
            "7d" => TimeRange::Past7Days,
            _ => TimeRange::Past24Hours,
        }
    }

    pub fn all() -> [TimeRange; 4] {
        [
            TimeRange::Past4Hours,
            TimeRange::Past24Hours,
            TimeRange::Past48Hours,
            TimeRange::Past7Days,
        ]
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Region selector; unknown codes resolve to the global feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location(pub String);

impl Location {
    pub fn worldwide() -> Self {
        Location("WORLDWIDE".to_string())
    }

    /// Geo code sent to the daily-trends endpoint.
    pub fn geo(&self) -> &'static str {
        config::country_codes()
            .get(self.0.to_uppercase().as_str())
            .copied()
            .unwrap_or("GLOBAL")
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::worldwide()
    }
}

impl From<&str> for Location {
    fn from(s: &str) -> Self {
        Location(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// SearchFilters / TrendingRequest - Source request parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub timeframe: Timeframe,
    pub location: Location,
    pub category: String,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            timeframe: Timeframe::default(),
            location: Location::default(),
            category: "ALL".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingRequest {
    pub time_range: TimeRange,
    pub location: Location,
    pub category: String,
}

impl Default for TrendingRequest {
    fn default() -> Self {
        Self {
            time_range: TimeRange::default(),
            location: Location::default(),
            category: "ALL".to_string(),
        }
    }
}
