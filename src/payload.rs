//! Parsing of the daily-trends endpoint response.
//!
//! The endpoint is untrusted: the body is prefixed with an anti-hijacking
//! guard (`)]}',`), and any of the nested containers may be missing. Parsing
//! yields validated [`Headline`]s or a [`PayloadError`], never a partially
//! checked JSON value.

use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::PayloadError;

// ---------------------------------------------------------------------------
// Validated output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Headline {
    pub query: String,
    pub formatted_traffic: String,
    #[serde(default)]
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    #[serde(default)]
    pub time_ago: String,
    #[serde(default)]
    pub source: String,
}

impl Headline {
    /// Absolute traffic parsed from `formatted_traffic`, or the default when unparsable.
    pub fn traffic(&self) -> u64 {
        parse_traffic(&self.formatted_traffic).unwrap_or(config::DEFAULT_TRAFFIC)
    }

    /// Share of one million searches, capped at 100.
    pub fn percentage(&self) -> f64 {
        let pct = (self.traffic() as f64 / 1_000_000.0 * 100.0).round();
        pct.min(100.0)
    }
}

// ---------------------------------------------------------------------------
// Raw wire shape
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawResponse {
    default: Option<RawDefault>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDefault {
    trending_searches_days: Option<Vec<RawDay>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDay {
    trending_searches: Option<Vec<RawSearch>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSearch {
    title: Option<RawTitle>,
    formatted_traffic: Option<String>,
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct RawTitle {
    query: Option<String>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a daily-trends body into the headlines of the most recent day.
///
/// Entries without a query are skipped; an entry without traffic gets the
/// default figure.
pub fn parse_daily_trends(body: &str) -> Result<Vec<Headline>, PayloadError> {
    let start = body.find('{').ok_or(PayloadError::MissingPrefix)?;
    let raw: RawResponse =
        serde_json::from_str(&body[start..]).map_err(|e| PayloadError::Malformed(e.to_string()))?;

    let searches = raw
        .default
        .ok_or(PayloadError::MissingField("default"))?
        .trending_searches_days
        .ok_or(PayloadError::MissingField("default.trendingSearchesDays"))?
        .into_iter()
        .next()
        .ok_or(PayloadError::MissingField("default.trendingSearchesDays[0]"))?
        .trending_searches
        .ok_or(PayloadError::MissingField(
            "default.trendingSearchesDays[0].trendingSearches",
        ))?;

    let headlines: Vec<Headline> = searches
        .into_iter()
        .filter_map(|s| {
            let query = s.title.and_then(|t| t.query)?;
            let query = query.trim();
            if query.is_empty() {
                return None;
            }
            Some(Headline {
                query: query.to_string(),
                formatted_traffic: s
                    .formatted_traffic
                    .unwrap_or_else(|| format!("{}K+", config::DEFAULT_TRAFFIC / 1000)),
                articles: s.articles,
            })
        })
        .collect();

    if headlines.is_empty() {
        return Err(PayloadError::Empty);
    }
    Ok(headlines)
}

/// Parse a traffic label such as `"200K+"`, `"2M+"`, or `"5,000+"`.
pub fn parse_traffic(label: &str) -> Option<u64> {
    let cleaned: String = label
        .trim()
        .trim_end_matches('+')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    let (digits, multiplier) = match cleaned.chars().last()? {
        'K' | 'k' => (&cleaned[..cleaned.len() - 1], 1_000.0),
        'M' | 'm' => (&cleaned[..cleaned.len() - 1], 1_000_000.0),
        'B' | 'b' => (&cleaned[..cleaned.len() - 1], 1_000_000_000.0),
        _ => (cleaned.as_str(), 1.0),
    };

    let value: f64 = digits.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some((value * multiplier).round() as u64)
}
