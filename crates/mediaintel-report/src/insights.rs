//! Fixed-template insight sentences for each report facet.
//!
//! Sentences mark key values with Markdown bold (`**value**`). Renderers that
//! want HTML can pass each sentence through [`emphasis_to_html`].

use serde::Serialize;

use crate::aggregate::{Aggregates, CategoryBreakdown, EngagementTrend};

/// The five fixed report dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Sentiment,
    Trend,
    Platform,
    MediaType,
    Locations,
}

impl Facet {
    pub const ALL: [Facet; 5] = [
        Facet::Sentiment,
        Facet::Trend,
        Facet::Platform,
        Facet::MediaType,
        Facet::Locations,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Facet::Sentiment => "Sentiment Breakdown",
            Facet::Trend => "Engagement Trend Over Time",
            Facet::Platform => "Engagement by Platform",
            Facet::MediaType => "Media Type Mix",
            Facet::Locations => "Top 5 Locations",
        }
    }

    /// Placeholder shown instead of a chart and insights when the facet is empty.
    #[must_use]
    pub fn no_data_message(self) -> &'static str {
        match self {
            Facet::Sentiment => "No sentiment data to display.",
            Facet::Trend => "No engagement trend data to display.",
            Facet::Platform => "No platform engagement data to display.",
            Facet::MediaType => "No media type data to display.",
            Facet::Locations => "No location data to display.",
        }
    }
}

/// Insight sentences for one facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetInsights {
    pub facet: Facet,
    pub sentences: Vec<String>,
}

impl FacetInsights {
    /// Sentences to display, or the facet's no-data placeholder.
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        if self.sentences.is_empty() {
            vec![self.facet.no_data_message()]
        } else {
            self.sentences.iter().map(String::as_str).collect()
        }
    }
}

#[must_use]
pub fn sentiment_insights(breakdown: &CategoryBreakdown) -> Vec<String> {
    let mut out = Vec::new();
    let Some(top) = breakdown.dominant() else {
        return out;
    };
    out.push(format!(
        "The dominant sentiment is **{}** with **{}** entries, indicating a generally {} perception.",
        top.key,
        top.value,
        top.key.to_lowercase()
    ));
    if breakdown.len() > 1 {
        if let Some(least) = breakdown.least() {
            out.push(format!(
                "**{}** represents the smallest share with **{}** entries.",
                least.key, least.value
            ));
        }
    }
    out
}

#[must_use]
pub fn trend_insights(trend: &EngagementTrend) -> Vec<String> {
    let mut out = Vec::new();
    let Some(peak) = trend.peak() else {
        return out;
    };
    out.push(format!(
        "Engagement peaked around **{}** with **{}** engagements.",
        peak.date.format("%Y-%m-%d"),
        peak.engagements
    ));
    if trend.day_count() > 1 {
        out.push(format!(
            "The overall trend shows **{}** engagement over the selected period.",
            trend.direction()
        ));
    }
    out
}

#[must_use]
pub fn platform_insights(breakdown: &CategoryBreakdown) -> Vec<String> {
    let mut out = Vec::new();
    let Some(top) = breakdown.dominant() else {
        return out;
    };
    out.push(format!(
        "**{}** consistently drives the highest engagement with a total of **{}**.",
        top.key, top.value
    ));
    if breakdown.len() > 1 {
        if let Some(least) = breakdown.least() {
            out.push(format!(
                "Platforms such as **{}** show lower engagement.",
                least.key
            ));
        }
    }
    out
}

#[must_use]
pub fn media_type_insights(breakdown: &CategoryBreakdown) -> Vec<String> {
    let mut out = Vec::new();
    let Some(top) = breakdown.dominant() else {
        return out;
    };
    out.push(format!(
        "**{}** is the most frequently used media type with **{}** entries.",
        top.key, top.value
    ));
    if breakdown.len() > 1 {
        if let Some(least) = breakdown.least() {
            out.push(format!(
                "**{}** is less common and may be an area to explore.",
                least.key
            ));
        }
    }
    out
}

#[must_use]
pub fn location_insights(breakdown: &CategoryBreakdown) -> Vec<String> {
    let mut out = Vec::new();
    let Some(top) = breakdown.dominant() else {
        return out;
    };
    out.push(format!(
        "**{}** is the primary geographic area for engagement with a total of **{}** engagements.",
        top.key, top.value
    ));
    if breakdown.len() > 1 {
        if let Some(least) = breakdown.least() {
            out.push(format!(
                "**{}** has the lowest engagement among the top locations.",
                least.key
            ));
        }
    }
    out
}

/// Insights for every facet, in [`Facet::ALL`] order.
#[must_use]
pub fn derive_insights(aggregates: &Aggregates) -> Vec<FacetInsights> {
    Facet::ALL
        .into_iter()
        .map(|facet| {
            let sentences = match facet {
                Facet::Sentiment => sentiment_insights(&aggregates.sentiment),
                Facet::Trend => trend_insights(&aggregates.trend),
                Facet::Platform => platform_insights(&aggregates.platform),
                Facet::MediaType => media_type_insights(&aggregates.media_type),
                Facet::Locations => location_insights(&aggregates.locations),
            };
            FacetInsights { facet, sentences }
        })
        .collect()
}

/// Replace each `**text**` pair with `<strong>text</strong>`.
///
/// A trailing unpaired `**` is left as-is.
#[must_use]
pub fn emphasis_to_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find("**") {
        let inner = &rest[open + 2..];
        let Some(close) = inner.find("**") else {
            break;
        };
        out.push_str(&rest[..open]);
        out.push_str("<strong>");
        out.push_str(&inner[..close]);
        out.push_str("</strong>");
        rest = &inner[close + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
#[path = "insights_test.rs"]
mod tests;
