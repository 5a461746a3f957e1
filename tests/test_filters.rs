//! Filter engine tests over sample "trending now" items.

mod common;

use chrono::Duration;
use trend_analyzer::config::ALL_CATEGORIES;
use trend_analyzer::{
    filter_by_active_status, filter_by_category, filter_by_recency, FilterCriteria, TimeRange,
    TrendItem,
};

fn names(items: &[TrendItem]) -> Vec<String> {
    common::titles(items.iter().map(|i| &i.title))
}

// ---------------------------------------------------------------------------
// filter_by_category
// ---------------------------------------------------------------------------

#[test]
fn all_categories_is_identity() {
    let items = common::sample_items();
    assert_eq!(filter_by_category(&items, ALL_CATEGORIES), items);
}

#[test]
fn category_match_is_exact_and_case_sensitive() {
    let items = common::sample_items();

    let politics = filter_by_category(&items, "Politics");
    assert_eq!(names(&politics), vec!["election", "budget vote", "summit"]);

    assert!(filter_by_category(&items, "politics").is_empty());
}

#[test]
fn items_without_category_never_match() {
    let items = common::sample_items();
    let other = filter_by_category(&items, "");
    assert!(other.is_empty());
}

// ---------------------------------------------------------------------------
// filter_by_recency
// ---------------------------------------------------------------------------

#[test]
fn recency_boundary_is_inclusive() {
    let clock = common::fixed_clock();
    let items = vec![
        common::item("exact", None, Duration::hours(24), true),
        common::item("over", None, Duration::hours(24) + Duration::milliseconds(1), true),
    ];

    let kept = filter_by_recency(&items, 24.0, &clock);
    assert_eq!(names(&kept), vec!["exact"]);
}

#[test]
fn recency_uses_fractional_hours() {
    let clock = common::fixed_clock();
    let items = vec![common::item("half", None, Duration::minutes(90), true)];

    assert!(filter_by_recency(&items, 1.0, &clock).is_empty());
    assert_eq!(filter_by_recency(&items, 1.5, &clock).len(), 1);
}

#[test]
fn recency_windows_from_time_ranges() {
    let clock = common::fixed_clock();
    let items = common::sample_items();

    let four = filter_by_recency(&items, TimeRange::Past4Hours.hours(), &clock);
    assert_eq!(names(&four), vec!["election", "heatwave", "mystery"]);

    let week = filter_by_recency(&items, TimeRange::Past7Days.hours(), &clock);
    assert_eq!(week.len(), items.len());
}

#[test]
fn future_items_are_kept() {
    let clock = common::fixed_clock();
    let items = vec![common::item("scheduled", None, Duration::hours(-3), false)];
    assert_eq!(filter_by_recency(&items, 4.0, &clock).len(), 1);
}

// ---------------------------------------------------------------------------
// filter_by_active_status
// ---------------------------------------------------------------------------

#[test]
fn inactive_flag_off_is_identity() {
    let items = common::sample_items();
    assert_eq!(filter_by_active_status(&items, false), items);
}

#[test]
fn active_only_keeps_active_items() {
    let items = common::sample_items();
    let active = filter_by_active_status(&items, true);
    assert_eq!(names(&active), vec!["election", "new phone", "mystery", "summit"]);
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

#[test]
fn filter_order_does_not_matter() {
    let clock = common::fixed_clock();
    let items = common::sample_items();

    let cat = |v: &[TrendItem]| filter_by_category(v, "Politics");
    let rec = |v: &[TrendItem]| filter_by_recency(v, 24.0, &clock);
    let act = |v: &[TrendItem]| filter_by_active_status(v, true);

    let orders: Vec<Vec<TrendItem>> = vec![
        act(&rec(&cat(&items))),
        rec(&act(&cat(&items))),
        cat(&act(&rec(&items))),
        act(&cat(&rec(&items))),
        cat(&rec(&act(&items))),
        rec(&cat(&act(&items))),
    ];

    for result in &orders {
        assert_eq!(result, &orders[0]);
    }
    assert_eq!(names(&orders[0]), vec!["election", "summit"]);
}

#[test]
fn criteria_apply_matches_each_item_test() {
    let clock = common::fixed_clock();
    let items = common::sample_items();
    let criteria = FilterCriteria::default()
        .category("Politics")
        .time_range(TimeRange::Past48Hours)
        .active_only(false);

    let applied = criteria.apply(&items, &clock);
    let by_matches: Vec<TrendItem> = items
        .iter()
        .filter(|i| criteria.matches(*i, &clock))
        .cloned()
        .collect();

    assert_eq!(applied, by_matches);
    assert_eq!(names(&applied), vec!["election", "summit"]);
}

#[test]
fn default_criteria_only_limits_recency() {
    let clock = common::fixed_clock();
    let items = common::sample_items();

    let applied = FilterCriteria::default().apply(&items, &clock);
    assert_eq!(
        names(&applied),
        vec!["election", "new phone", "heatwave", "mystery", "summit"]
    );
}

#[test]
fn filters_leave_input_untouched_and_handle_empty() {
    let clock = common::fixed_clock();
    let items = common::sample_items();
    let before = items.clone();

    let _ = FilterCriteria::default().active_only(true).apply(&items, &clock);
    assert_eq!(items, before);

    let empty: Vec<TrendItem> = Vec::new();
    assert!(FilterCriteria::default().apply(&empty, &clock).is_empty());
}

#[test]
fn every_listed_category_filters_exactly() {
    let items = common::sample_items();
    let categories = trend_analyzer::config::trend_categories();
    assert_eq!(categories[0].0, ALL_CATEGORIES);

    for (category, _) in categories.iter().skip(1) {
        let kept = filter_by_category(&items, category);
        assert!(kept.iter().all(|i| i.category.as_deref() == Some(*category)));
    }
    let climate = filter_by_category(&items, "Climate");
    assert_eq!(names(&climate), vec!["heatwave"]);
}
