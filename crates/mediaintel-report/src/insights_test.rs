use super::*;
use crate::aggregate::aggregate;
use crate::clean::clean;
use crate::parse::parse_csv;

fn aggregates(csv: &str) -> Aggregates {
    let raw = parse_csv(csv.as_bytes()).expect("fixture should parse");
    aggregate(&clean(&raw, false).0)
}

const FIXTURE: &str = "Date,Engagements,Sentiment,Platform,Media Type,Location\n\
    2024-01-01,100,Positive,Twitter,Video,Jakarta\n\
    2024-01-02,30,Negative,Facebook,Image,Bandung\n\
    2024-01-03,60,Positive,Twitter,Video,Jakarta\n\
    2024-01-04,20,Neutral,Facebook,Text,Medan\n";

#[test]
fn sentiment_names_dominant_and_least() {
    let agg = aggregates(FIXTURE);
    let sentences = sentiment_insights(&agg.sentiment);
    assert_eq!(
        sentences,
        vec![
            "The dominant sentiment is **Positive** with **2** entries, indicating a generally positive perception.".to_string(),
            "**Negative** represents the smallest share with **1** entries.".to_string(),
        ]
    );
}

#[test]
fn single_category_gives_one_sentence() {
    let agg = aggregates("Sentiment\nPositive\nPositive\n");
    assert_eq!(sentiment_insights(&agg.sentiment).len(), 1);
}

#[test]
fn trend_reports_peak_and_direction() {
    let agg = aggregates(FIXTURE);
    assert_eq!(
        trend_insights(&agg.trend),
        vec![
            "Engagement peaked around **2024-01-01** with **100** engagements.".to_string(),
            "The overall trend shows **decreasing** engagement over the selected period."
                .to_string(),
        ]
    );
}

#[test]
fn single_day_trend_omits_direction() {
    let agg = aggregates("Date,Engagements\n2024-01-01,10\n");
    let sentences = trend_insights(&agg.trend);
    assert_eq!(sentences.len(), 1);
    assert!(sentences[0].contains("2024-01-01"));
}

#[test]
fn platform_sentences_use_engagement_sums() {
    let agg = aggregates(FIXTURE);
    assert_eq!(
        platform_insights(&agg.platform),
        vec![
            "**Twitter** consistently drives the highest engagement with a total of **160**."
                .to_string(),
            "Platforms such as **Facebook** show lower engagement.".to_string(),
        ]
    );
}

#[test]
fn media_type_least_uses_first_minimum_in_order() {
    let agg = aggregates(FIXTURE);
    let sentences = media_type_insights(&agg.media_type);
    assert_eq!(
        sentences[0],
        "**Video** is the most frequently used media type with **2** entries."
    );
    // Image and Text tie at one row; key order puts Image first.
    assert_eq!(
        sentences[1],
        "**Image** is less common and may be an area to explore."
    );
}

#[test]
fn location_sentences() {
    let agg = aggregates(FIXTURE);
    assert_eq!(
        location_insights(&agg.locations),
        vec![
            "**Jakarta** is the primary geographic area for engagement with a total of **160** engagements.".to_string(),
            "**Medan** has the lowest engagement among the top locations.".to_string(),
        ]
    );
}

#[test]
fn empty_facets_fall_back_to_placeholders() {
    let agg = aggregates("Notes\nx\n");
    let insights = derive_insights(&agg);
    assert_eq!(insights.len(), 5);
    for facet in &insights {
        assert!(facet.sentences.is_empty());
        assert_eq!(facet.lines(), vec![facet.facet.no_data_message()]);
    }
}

#[test]
fn derive_insights_follows_facet_order() {
    let agg = aggregates(FIXTURE);
    let facets: Vec<Facet> = derive_insights(&agg).iter().map(|i| i.facet).collect();
    assert_eq!(facets, Facet::ALL.to_vec());
}

#[test]
fn emphasis_to_html_converts_every_pair() {
    assert_eq!(
        emphasis_to_html("**Twitter** leads with **10**."),
        "<strong>Twitter</strong> leads with <strong>10</strong>."
    );
}

#[test]
fn emphasis_to_html_leaves_unpaired_marker() {
    assert_eq!(emphasis_to_html("a ** b"), "a ** b");
    assert_eq!(emphasis_to_html("plain"), "plain");
    assert_eq!(
        emphasis_to_html("**x** and **y"),
        "<strong>x</strong> and **y"
    );
}
