//! Grouping of per-platform records by title, and ranking of the groups.

use std::collections::{BTreeMap, HashMap};

use crate::models::{ChartPoint, GroupedTrend, PlatformStat, TrendRecord};

/// Group records by title and rank the groups by mean platform percentage,
/// highest first.
///
/// A later record for the same `(title, platform)` replaces the earlier one.
/// Groups with equal scores keep the order in which their titles first appeared.
pub fn group_and_rank(records: &[TrendRecord]) -> Vec<GroupedTrend> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, BTreeMap<String, PlatformStat>> = HashMap::new();

    for record in records {
        let platforms = groups.entry(record.title.as_str()).or_insert_with(|| {
            order.push(record.title.as_str());
            BTreeMap::new()
        });
        platforms.insert(
            record.platform.clone(),
            PlatformStat {
                percentage: record.percentage,
                change: record.change,
            },
        );
    }

    let mut ranked: Vec<GroupedTrend> = order
        .into_iter()
        .filter_map(|title| {
            let platforms = groups.remove(title)?;
            let score = mean_percentage(&platforms);
            Some(GroupedTrend {
                title: title.to_string(),
                platforms,
                score,
            })
        })
        .collect();

    // `sort_by` is stable, which keeps first-seen order among ties.
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Bar chart points for the first `limit` records, labelled `#1`, `#2`, ...
pub fn chart_points(records: &[TrendRecord], limit: usize) -> Vec<ChartPoint> {
    records
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, r)| ChartPoint {
            name: format!("#{}", i + 1),
            value: r.percentage,
            platform: r.platform.clone(),
        })
        .collect()
}

fn mean_percentage(platforms: &BTreeMap<String, PlatformStat>) -> f64 {
    if platforms.is_empty() {
        return 0.0;
    }
    let total: f64 = platforms.values().map(|s| s.percentage).sum();
    total / platforms.len() as f64
}
