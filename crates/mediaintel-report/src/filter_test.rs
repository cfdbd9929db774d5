use super::*;
use crate::clean::clean;
use crate::parse::parse_csv;

const FIXTURE: &str = "Date,Engagements,Sentiment,Platform,Media Type,Location\n\
    2024-01-01,100,Positive,Twitter,Video,Jakarta\n\
    2024-01-02,50,Negative,Facebook,Image,Bandung\n\
    2024-01-03,70,Positive,Twitter,Text,Jakarta\n\
    2024-01-04,20,Neutral,Facebook,Video,Surabaya\n\
    2024-01-05,90,Positive,Twitter,Video,Medan\n";

fn dataset(csv: &str) -> Dataset {
    let raw = parse_csv(csv.as_bytes()).expect("fixture should parse");
    clean(&raw, false).0
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

#[test]
fn unconstrained_spec_is_identity() {
    let data = dataset(FIXTURE);
    let filtered = apply_filter(&data, &FilterSpec::default());
    assert_eq!(filtered, data);
}

#[test]
fn platform_filter_keeps_only_matching_rows() {
    let data = dataset(FIXTURE);
    let spec = FilterSpec {
        platform: Some("Twitter".to_string()),
        ..FilterSpec::default()
    };
    let filtered = apply_filter(&data, &spec);
    assert_eq!(filtered.len(), 3);
    assert!(filtered
        .records()
        .iter()
        .all(|r| r.platform.as_deref() == Some("Twitter")));
}

#[test]
fn equality_is_case_sensitive() {
    let data = dataset(FIXTURE);
    let spec = FilterSpec {
        platform: Some("twitter".to_string()),
        ..FilterSpec::default()
    };
    assert!(apply_filter(&data, &spec).is_empty());
}

#[test]
fn date_range_is_inclusive_on_both_ends() {
    let data = dataset(FIXTURE);
    let spec = FilterSpec {
        date_from: Some(date(2)),
        date_to: Some(date(4)),
        ..FilterSpec::default()
    };
    let filtered = apply_filter(&data, &spec);
    let days: Vec<NaiveDate> = filtered.records().iter().filter_map(|r| r.date).collect();
    assert_eq!(days, vec![date(2), date(3), date(4)]);
}

#[test]
fn open_ended_date_bounds_work_independently() {
    let data = dataset(FIXTURE);
    let from_only = FilterSpec {
        date_from: Some(date(4)),
        ..FilterSpec::default()
    };
    assert_eq!(apply_filter(&data, &from_only).len(), 2);

    let to_only = FilterSpec {
        date_to: Some(date(1)),
        ..FilterSpec::default()
    };
    assert_eq!(apply_filter(&data, &to_only).len(), 1);
}

#[test]
fn constraints_on_absent_columns_are_skipped() {
    let data = dataset("Engagements,Platform\n1,Twitter\n2,Facebook\n");
    let spec = FilterSpec {
        location: Some("Jakarta".to_string()),
        date_from: Some(date(1)),
        date_to: Some(date(1)),
        ..FilterSpec::default()
    };
    assert_eq!(apply_filter(&data, &spec).len(), 2);
}

#[test]
fn null_cells_never_match_an_equality_constraint() {
    let data = dataset("Date,Sentiment\n2024-01-01,\n2024-01-02,Positive\n");
    let spec = FilterSpec {
        sentiment: Some("Positive".to_string()),
        ..FilterSpec::default()
    };
    assert_eq!(apply_filter(&data, &spec).len(), 1);
}

#[test]
fn sequential_filters_equal_their_conjunction() {
    let data = dataset(FIXTURE);
    let first = FilterSpec {
        sentiment: Some("Positive".to_string()),
        date_to: Some(date(4)),
        ..FilterSpec::default()
    };
    let second = FilterSpec {
        location: Some("Jakarta".to_string()),
        date_from: Some(date(2)),
        ..FilterSpec::default()
    };
    let conjunction = FilterSpec {
        sentiment: Some("Positive".to_string()),
        location: Some("Jakarta".to_string()),
        date_from: Some(date(2)),
        date_to: Some(date(4)),
        ..FilterSpec::default()
    };

    let sequential = apply_filters(&data, &[first.clone(), second.clone()]);
    let reversed = apply_filters(&data, &[second, first]);
    let once = apply_filter(&data, &conjunction);

    assert_eq!(sequential, once);
    assert_eq!(reversed, once);
    assert_eq!(once.len(), 1);
}

#[test]
fn conflicting_constraints_yield_empty_result() {
    let data = dataset(FIXTURE);
    let twitter = FilterSpec {
        platform: Some("Twitter".to_string()),
        ..FilterSpec::default()
    };
    let facebook = FilterSpec {
        platform: Some("Facebook".to_string()),
        ..FilterSpec::default()
    };
    assert!(apply_filters(&data, &[twitter, facebook]).is_empty());
}

#[test]
fn adding_constraints_never_grows_the_result() {
    let data = dataset(FIXTURE);
    let mut spec = FilterSpec::default();
    let mut previous = apply_filter(&data, &spec).len();

    spec.set_constraint(Field::MediaType, Some("Video".to_string()));
    let with_media = apply_filter(&data, &spec).len();
    assert!(with_media <= previous);
    previous = with_media;

    spec.set_constraint(Field::Platform, Some("Twitter".to_string()));
    let with_platform = apply_filter(&data, &spec).len();
    assert!(with_platform <= previous);
    previous = with_platform;

    spec.date_from = Some(date(3));
    assert!(apply_filter(&data, &spec).len() <= previous);
}

#[test]
fn filtering_leaves_input_untouched() {
    let data = dataset(FIXTURE);
    let before = data.clone();
    let spec = FilterSpec {
        platform: Some("Facebook".to_string()),
        ..FilterSpec::default()
    };
    let _ = apply_filter(&data, &spec);
    assert_eq!(data, before);
}

#[test]
fn set_constraint_can_clear_a_field() {
    let mut spec = FilterSpec::default();
    spec.set_constraint(Field::Location, Some("Medan".to_string()));
    assert_eq!(spec.constraint(Field::Location), Some("Medan"));
    spec.set_constraint(Field::Location, None);
    assert!(spec.is_unconstrained());
}

#[test]
fn filter_options_lists_sorted_distinct_values_and_date_bounds() {
    let data = dataset(FIXTURE);
    let options = FilterOptions::from_dataset(&data);
    assert_eq!(options.platforms, vec!["Facebook", "Twitter"]);
    assert_eq!(options.sentiments, vec!["Negative", "Neutral", "Positive"]);
    assert_eq!(options.media_types, vec!["Image", "Text", "Video"]);
    assert_eq!(
        options.locations,
        vec!["Bandung", "Jakarta", "Medan", "Surabaya"]
    );
    assert_eq!(options.date_range, Some((date(1), date(5))));
}

#[test]
fn filter_options_empty_for_absent_columns() {
    let data = dataset("Engagements\n3\n");
    let options = FilterOptions::from_dataset(&data);
    assert!(options.platforms.is_empty());
    assert!(options.date_range.is_none());
}
