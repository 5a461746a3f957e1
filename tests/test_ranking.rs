//! Grouping and ranking tests.

mod common;

use common::record;
use trend_analyzer::{chart_points, group_and_rank, GroupedTrend, TrendRecord};

fn group_titles(groups: &[GroupedTrend]) -> Vec<String> {
    common::titles(groups.iter().map(|g| &g.title))
}

#[test]
fn groups_by_title_and_ranks_by_mean() {
    let records = vec![
        record("a", "Google", 80.0),
        record("a", "Twitter", 60.0),
        record("b", "Google", 50.0),
    ];

    let ranked = group_and_rank(&records);
    assert_eq!(group_titles(&ranked), vec!["a", "b"]);
    assert_eq!(ranked[0].score, 70.0);
    assert_eq!(ranked[1].score, 50.0);

    assert_eq!(ranked[0].platforms.len(), 2);
    assert_eq!(ranked[0].platforms["Google"].percentage, 80.0);
    assert_eq!(ranked[0].platforms["Twitter"].percentage, 60.0);
}

#[test]
fn higher_scoring_later_group_moves_first() {
    let records = vec![record("low", "Google", 10.0), record("high", "Google", 90.0)];
    assert_eq!(group_titles(&group_and_rank(&records)), vec!["high", "low"]);
}

#[test]
fn duplicate_platform_last_write_wins() {
    let mut late = record("a", "Google", 90.0);
    late.change = -4.0;
    let records = vec![record("a", "Google", 10.0), late];

    let ranked = group_and_rank(&records);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].platforms.len(), 1);
    assert_eq!(ranked[0].platforms["Google"].percentage, 90.0);
    assert_eq!(ranked[0].platforms["Google"].change, -4.0);
    assert_eq!(ranked[0].score, 90.0);
}

#[test]
fn ties_keep_first_seen_order() {
    let records = vec![
        record("x", "Google", 50.0),
        record("y", "Google", 50.0),
        record("z", "Google", 60.0),
        record("w", "Twitter", 50.0),
    ];
    assert_eq!(
        group_titles(&group_and_rank(&records)),
        vec!["z", "x", "y", "w"]
    );
}

#[test]
fn absent_platforms_do_not_count_as_zero() {
    let records = vec![
        record("solo", "Google", 80.0),
        record("pair", "Google", 70.0),
        record("pair", "Twitter", 70.0),
    ];

    let ranked = group_and_rank(&records);
    assert_eq!(group_titles(&ranked), vec!["solo", "pair"]);
    assert_eq!(ranked[0].score, 80.0);
}

#[test]
fn grouping_is_case_sensitive() {
    let records = vec![record("Rust", "Google", 10.0), record("rust", "Google", 20.0)];
    assert_eq!(group_and_rank(&records).len(), 2);
}

#[test]
fn regrouping_ranked_output_is_idempotent() {
    let records = vec![
        record("a", "Google", 80.0),
        record("b", "Google", 33.3),
        record("a", "Twitter", 61.7),
        record("c", "YouTube", 55.0),
        record("b", "GitHub", 12.1),
        record("c", "LinkedIn", 44.4),
    ];

    let first = group_and_rank(&records);
    let flattened: Vec<TrendRecord> = first
        .iter()
        .flat_map(|g| g.to_records(common::fixed_now()))
        .collect();
    let second = group_and_rank(&flattened);

    assert_eq!(first, second);
}

#[test]
fn empty_input_yields_no_groups() {
    assert!(group_and_rank(&[]).is_empty());
}

#[test]
fn top_platform_picks_highest_percentage() {
    let records = vec![
        record("a", "Google", 40.0),
        record("a", "YouTube", 75.0),
        record("a", "Twitter", 75.0),
    ];
    let ranked = group_and_rank(&records);
    let (name, stat) = ranked[0].top_platform().unwrap();
    assert_eq!(name, "Twitter");
    assert_eq!(stat.percentage, 75.0);
}

// ---------------------------------------------------------------------------
// chart_points
// ---------------------------------------------------------------------------

#[test]
fn chart_points_label_and_truncate() {
    let records: Vec<TrendRecord> = (0..15)
        .map(|i| record("t", "Google", 100.0 - i as f64))
        .collect();

    let points = chart_points(&records, 10);
    assert_eq!(points.len(), 10);
    assert_eq!(points[0].name, "#1");
    assert_eq!(points[9].name, "#10");
    assert_eq!(points[9].value, 91.0);
    assert_eq!(points[0].platform, "Google");
}
