//! Per-facet grouping over a filtered dataset.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use mediaintel_core::{Dataset, Field};
use serde::Serialize;

use crate::trend::{classify_trend, TrendDirection};

/// How many locations the location facet keeps.
pub const TOP_LOCATIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryEntry {
    pub key: String,
    pub value: u64,
}

/// Category totals ordered by value descending, ties broken by key ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryBreakdown {
    entries: Vec<CategoryEntry>,
}

impl CategoryBreakdown {
    fn from_totals(totals: BTreeMap<String, u64>) -> Self {
        let mut entries: Vec<CategoryEntry> = totals
            .into_iter()
            .map(|(key, value)| CategoryEntry { key, value })
            .collect();
        // Stable sort over key-ordered input keeps ties in key order.
        entries.sort_by(|a, b| b.value.cmp(&a.value));
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest measure; the first entry in facet order.
    #[must_use]
    pub fn dominant(&self) -> Option<&CategoryEntry> {
        self.entries.first()
    }

    /// Lowest measure; the first entry in facet order holding the minimum.
    #[must_use]
    pub fn least(&self) -> Option<&CategoryEntry> {
        let min = self.entries.iter().map(|e| e.value).min()?;
        self.entries.iter().find(|e| e.value == min)
    }

    /// Keep the `n` highest entries.
    #[must_use]
    pub fn top(&self, n: usize) -> Self {
        Self {
            entries: self.entries.iter().take(n).cloned().collect(),
        }
    }

    /// Entries by value ascending (ties by key), the order horizontal bar
    /// charts draw bottom-up.
    #[must_use]
    pub fn ascending(&self) -> Vec<CategoryEntry> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| a.value.cmp(&b.value).then_with(|| a.key.cmp(&b.key)));
        entries
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub engagements: u64,
}

/// Engagement totals per calendar day, in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EngagementTrend {
    points: Vec<TrendPoint>,
}

impl EngagementTrend {
    #[must_use]
    pub fn points(&self) -> &[TrendPoint] {
        &self.points
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of distinct days with data.
    #[must_use]
    pub fn day_count(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn direction(&self) -> TrendDirection {
        let totals: Vec<u64> = self.points.iter().map(|p| p.engagements).collect();
        classify_trend(&totals)
    }

    /// Earliest day holding the maximum total.
    #[must_use]
    pub fn peak(&self) -> Option<&TrendPoint> {
        let max = self.points.iter().map(|p| p.engagements).max()?;
        self.points.iter().find(|p| p.engagements == max)
    }

    /// First and last day with data.
    #[must_use]
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.points.first()?.date, self.points.last()?.date))
    }

    /// One point per calendar day between the first and last day, with zero
    /// for days that had no records.
    #[must_use]
    pub fn daily_series(&self) -> Vec<TrendPoint> {
        let Some((start, end)) = self.date_range() else {
            return Vec::new();
        };
        let mut known = self.points.iter().peekable();
        start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|date| {
                let engagements = match known.peek() {
                    Some(p) if p.date == date => known.next().map_or(0, |p| p.engagements),
                    _ => 0,
                };
                TrendPoint { date, engagements }
            })
            .collect()
    }
}

/// Aggregates for all five report facets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aggregates {
    /// Row count per sentiment.
    pub sentiment: CategoryBreakdown,
    /// Engagement sum per day.
    pub trend: EngagementTrend,
    /// Engagement sum per platform.
    pub platform: CategoryBreakdown,
    /// Row count per media type.
    pub media_type: CategoryBreakdown,
    /// Engagement sum of the top locations.
    pub locations: CategoryBreakdown,
}

#[derive(Debug, Clone, Copy)]
enum Measure {
    Count,
    Engagements,
}

/// Sums saturate at `u64::MAX`.
fn group_by(dataset: &Dataset, field: Field, measure: Measure) -> CategoryBreakdown {
    if !dataset.has(field) {
        return CategoryBreakdown::default();
    }
    if matches!(measure, Measure::Engagements) && !dataset.has(Field::Engagements) {
        return CategoryBreakdown::default();
    }

    let mut totals: BTreeMap<String, u64> = BTreeMap::new();
    for record in dataset.records() {
        let Some(key) = record.text(field) else {
            continue;
        };
        let amount = match measure {
            Measure::Count => 1,
            Measure::Engagements => record.engagements,
        };
        let total = totals.entry(key.to_string()).or_default();
        *total = total.saturating_add(amount);
    }
    CategoryBreakdown::from_totals(totals)
}

fn daily_engagements(dataset: &Dataset) -> EngagementTrend {
    if !dataset.has(Field::Date) || !dataset.has(Field::Engagements) {
        return EngagementTrend::default();
    }

    let mut totals: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in dataset.records() {
        if let Some(date) = record.date {
            let total = totals.entry(date).or_default();
            *total = total.saturating_add(record.engagements);
        }
    }
    EngagementTrend {
        points: totals
            .into_iter()
            .map(|(date, engagements)| TrendPoint { date, engagements })
            .collect(),
    }
}

/// Compute every facet over `dataset`. Facets whose columns are absent come
/// back empty.
#[must_use]
pub fn aggregate(dataset: &Dataset) -> Aggregates {
    Aggregates {
        sentiment: group_by(dataset, Field::Sentiment, Measure::Count),
        trend: daily_engagements(dataset),
        platform: group_by(dataset, Field::Platform, Measure::Engagements),
        media_type: group_by(dataset, Field::MediaType, Measure::Count),
        locations: group_by(dataset, Field::Location, Measure::Engagements).top(TOP_LOCATIONS),
    }
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
