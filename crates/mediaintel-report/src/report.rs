//! One recomputation pass: filtered dataset to facets and insights.

use mediaintel_core::Dataset;
use serde::Serialize;

use crate::aggregate::{aggregate, Aggregates};
use crate::insights::{derive_insights, FacetInsights};
use crate::prompt::SummaryFacts;

/// Everything a renderer needs for the current filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub row_count: usize,
    pub aggregates: Aggregates,
    pub insights: Vec<FacetInsights>,
}

impl Report {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    #[must_use]
    pub fn summary_facts(&self) -> SummaryFacts {
        SummaryFacts::from_aggregates(&self.aggregates)
    }
}

/// Aggregate `filtered` and derive insights for every facet.
#[must_use]
pub fn build_report(filtered: &Dataset) -> Report {
    let aggregates = aggregate(filtered);
    let insights = derive_insights(&aggregates);
    Report {
        row_count: filtered.len(),
        aggregates,
        insights,
    }
}
