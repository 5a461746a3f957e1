//! Record display helpers and query vocabulary tests.

mod common;

use trend_analyzer::{TimeRange, Timeframe, TrendRecord};

fn with_change(change: f64) -> TrendRecord {
    TrendRecord::new("Google", "t", 50.0, change, common::fixed_now())
}

// ---------------------------------------------------------------------------
// TrendRecord display
// ---------------------------------------------------------------------------

#[test]
fn growth_is_shown_with_plus_sign() {
    let r = with_change(4.5);
    assert!(!r.is_decline());
    assert_eq!(r.formatted_change(), "+4.5%");
}

#[test]
fn zero_change_is_neutral() {
    for change in [0.0, -0.0] {
        let r = with_change(change);
        assert!(!r.is_decline());
        assert_eq!(r.formatted_change(), "+0%");
    }
}

#[test]
fn decline_keeps_its_minus_sign() {
    let r = with_change(-12.0);
    assert!(r.is_decline());
    assert_eq!(r.formatted_change(), "-12%");
}

#[test]
fn iso_timestamp_has_millis_and_z() {
    assert_eq!(with_change(0.0).iso_timestamp(), "2024-01-01T00:00:00.000Z");
}

#[test]
fn record_serializes_camel_case_with_iso_timestamp() {
    let json = serde_json::to_value(with_change(1.5)).unwrap();
    assert_eq!(json["timestamp"], "2024-01-01T00:00:00.000Z");
    assert_eq!(json["change"], 1.5);

    let back: TrendRecord = serde_json::from_value(json).unwrap();
    assert_eq!(back, with_change(1.5));
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut r = with_change(0.0);
    assert!(r.validate().is_ok());
    r.percentage = 100.1;
    assert!(r.validate().is_err());
    r.percentage = 10.0;
    r.change = f64::INFINITY;
    assert!(r.validate().is_err());
}

// ---------------------------------------------------------------------------
// Timeframe
// ---------------------------------------------------------------------------

#[test]
fn timeframe_parses_wire_names_or_defaults() {
    assert_eq!(Timeframe::parse_or_default("LAST_HOUR"), Timeframe::LastHour);
    assert_eq!(Timeframe::parse_or_default("LAST_5_YEARS"), Timeframe::Last5Years);
    assert_eq!(Timeframe::parse_or_default("last_hour"), Timeframe::Last7Days);
    assert_eq!(Timeframe::parse_or_default(""), Timeframe::Last7Days);
    assert!("NEVER".parse::<Timeframe>().is_err());
    assert_eq!(Timeframe::Last30Days.to_string(), "LAST_30_DAYS");
}

#[test]
fn timeframe_windows() {
    assert_eq!(Timeframe::LastHour.window().as_secs(), 3600);
    assert_eq!(Timeframe::Last7Days.window().as_secs(), 7 * 86_400);
}

// ---------------------------------------------------------------------------
// TimeRange
// ---------------------------------------------------------------------------

#[test]
fn time_ranges_are_listed_shortest_first() {
    let all = TimeRange::all();
    assert_eq!(all.len(), 4);
    assert!(all.windows(2).all(|w| w[0].hours() < w[1].hours()));
    assert!(all.contains(&TimeRange::default()));
}

#[test]
fn time_range_labels_and_wire_values() {
    let labels: Vec<&str> = TimeRange::all().iter().map(|r| r.label()).collect();
    assert_eq!(
        labels,
        vec!["Past 4 hours", "Past 24 hours", "Past 48 hours", "Past 7 days"]
    );

    for range in TimeRange::all() {
        assert_eq!(TimeRange::parse_or_default(range.as_str()), range);
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, format!("\"{}\"", range.as_str()));
    }
    assert_eq!(TimeRange::parse_or_default("1y"), TimeRange::Past24Hours);
}
