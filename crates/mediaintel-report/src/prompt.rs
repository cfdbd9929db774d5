//! Campaign summary prompt for the text-generation service.

use chrono::NaiveDate;
use mediaintel_core::Persona;
use serde::Serialize;

use crate::aggregate::Aggregates;
use crate::trend::TrendDirection;

/// Placeholder for any value a facet could not provide.
pub const NOT_AVAILABLE: &str = "N/A";

const PROFESSIONAL_PREFIX: &str = "As an internal professional, provide this summary. \
Focus on immediate actions and operational insights, in concise language.\n\n";

const CONSULTANT_PREFIX: &str = "As an expert consultant presenting a report to an important client, \
provide this summary. Focus on strategic recommendations and actionable insights, using formal, \
results-oriented language.\n\n";

/// The data points the summary prompt is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryFacts {
    pub dominant_sentiment: Option<String>,
    pub top_platform: Option<(String, u64)>,
    pub trend: TrendDirection,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub dominant_media_type: Option<String>,
    pub top_location: Option<(String, u64)>,
}

impl SummaryFacts {
    #[must_use]
    pub fn from_aggregates(aggregates: &Aggregates) -> Self {
        let pair = |e: &crate::aggregate::CategoryEntry| (e.key.clone(), e.value);
        Self {
            dominant_sentiment: aggregates.sentiment.dominant().map(|e| e.key.clone()),
            top_platform: aggregates.platform.dominant().map(pair),
            trend: aggregates.trend.direction(),
            date_range: aggregates.trend.date_range(),
            dominant_media_type: aggregates.media_type.dominant().map(|e| e.key.clone()),
            top_location: aggregates.locations.dominant().map(pair),
        }
    }
}

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_AVAILABLE)
}

fn split_pair(pair: Option<&(String, u64)>) -> (String, String) {
    pair.map_or_else(
        || (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
        |(key, value)| (key.clone(), value.to_string()),
    )
}

/// Build the prompt. The line structure is identical whichever facts are
/// missing; absent values read `N/A`.
#[must_use]
pub fn build_summary_prompt(facts: &SummaryFacts, persona: Persona) -> String {
    let prefix = match persona {
        Persona::Professional => PROFESSIONAL_PREFIX,
        Persona::Consultant => CONSULTANT_PREFIX,
    };

    let (platform, platform_total) = split_pair(facts.top_platform.as_ref());
    let (location, location_total) = split_pair(facts.top_location.as_ref());
    let (start, end) = facts.date_range.map_or_else(
        || (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
        |(s, e)| (s.format("%Y-%m-%d").to_string(), e.format("%Y-%m-%d").to_string()),
    );

    format!(
        "{prefix}Based on the following media intelligence data and insights, provide a concise \
campaign strategy summary (key actions and recommendations).
- Dominant Sentiment: {sentiment}.
- Top Engagement Platform: {platform} with {platform_total} engagements.
- Overall Engagement Trend: {trend} from {start} to {end}.
- Most Frequently Used Media Type: {media}.
- Top Location for Engagement: {location} with {location_total} engagements.
Suggest 3-5 actionable recommendations to optimize the media campaign. Focus on actionable \
steps grounded in these data points.",
        sentiment = or_na(facts.dominant_sentiment.as_deref()),
        trend = facts.trend,
        media = or_na(facts.dominant_media_type.as_deref()),
    )
}
