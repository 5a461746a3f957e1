use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

pub const TRENDS_BASE: &str = "https://trends.google.com/trends";
pub const DAILY_TRENDS_PATH: &str = "api/dailytrends";

/// Sentinel category that disables category filtering.
pub const ALL_CATEGORIES: &str = "All categories";

pub const DEFAULT_POINT_COUNT: usize = 50;
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Traffic assumed for a headline whose `formattedTraffic` cannot be parsed.
pub const DEFAULT_TRAFFIC: u64 = 100_000;

/// Built-in platforms, in display order, with their scale relative to the
/// primary search engine.
pub fn platform_scales() -> Vec<(&'static str, f64)> {
    vec![
        ("Google", 1.0),
        ("Twitter", 0.8),
        ("YouTube", 0.7),
        ("LinkedIn", 0.5),
        ("GitHub", 0.3),
    ]
}

pub fn country_codes() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("WORLDWIDE", "GLOBAL"),
        ("TR", "TR"),
        ("US", "US"),
        ("GB", "GB"),
        ("DE", "DE"),
        ("FR", "FR"),
    ])
}

/// Headline categories used by the offline fallback list.
pub fn fallback_categories() -> [&'static str; 10] {
    [
        "Technology",
        "Sports",
        "Entertainment",
        "Politics",
        "Science",
        "Health",
        "Economy",
        "Education",
        "Arts",
        "Business",
    ]
}

/// Trend categories offered to the category filter, with their reference counts.
pub fn trend_categories() -> Vec<(&'static str, u32)> {
    vec![
        (ALL_CATEGORIES, 114),
        ("Autos and Vehicles", 1),
        ("Beauty and Fashion", 0),
        ("Business and Finance", 14),
        ("Climate", 4),
        ("Entertainment", 23),
        ("Food and Drink", 1),
        ("Games", 6),
        ("Health", 1),
        ("Hobbies and Leisure", 1),
        ("Jobs and Education", 5),
        ("Law and Government", 11),
        ("Other", 14),
        ("Pets and Animals", 0),
        ("Politics", 4),
    ]
}

pub fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}
