//! Conjunctive equality and date-range filtering over a cleaned dataset.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use mediaintel_core::{Dataset, Field, Record};
use serde::{Deserialize, Serialize};

/// User-selected constraints. `None` leaves a field unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub platform: Option<String>,
    pub sentiment: Option<String>,
    pub media_type: Option<String>,
    pub location: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl FilterSpec {
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }

    /// Equality constraint for a categorical field.
    #[must_use]
    pub fn constraint(&self, field: Field) -> Option<&str> {
        match field {
            Field::Platform => self.platform.as_deref(),
            Field::Sentiment => self.sentiment.as_deref(),
            Field::MediaType => self.media_type.as_deref(),
            Field::Location => self.location.as_deref(),
            Field::Date | Field::Engagements => None,
        }
    }

    /// Set or clear the equality constraint for a categorical field.
    /// Ignored for `Date` and `Engagements`.
    pub fn set_constraint(&mut self, field: Field, value: Option<String>) {
        match field {
            Field::Platform => self.platform = value,
            Field::Sentiment => self.sentiment = value,
            Field::MediaType => self.media_type = value,
            Field::Location => self.location = value,
            Field::Date | Field::Engagements => {}
        }
    }

    fn matches(&self, dataset: &Dataset, record: &Record) -> bool {
        for field in Field::TEXT {
            if !dataset.has(field) {
                continue;
            }
            if let Some(wanted) = self.constraint(field) {
                if record.text(field) != Some(wanted) {
                    return false;
                }
            }
        }

        let has_range = self.date_from.is_some() || self.date_to.is_some();
        if has_range && dataset.has(Field::Date) {
            let Some(date) = record.date else {
                return false;
            };
            if self.date_from.is_some_and(|from| date < from) {
                return false;
            }
            if self.date_to.is_some_and(|to| date > to) {
                return false;
            }
        }

        true
    }
}

/// Apply `spec` to `dataset`, returning a new dataset.
///
/// Constraints on columns the dataset does not carry are skipped.
#[must_use]
pub fn apply_filter(dataset: &Dataset, spec: &FilterSpec) -> Dataset {
    if spec.is_unconstrained() {
        return dataset.clone();
    }

    for field in Field::TEXT {
        if spec.constraint(field).is_some() && !dataset.has(field) {
            tracing::debug!(column = %field, "filter on absent column skipped");
        }
    }

    let records: Vec<Record> = dataset
        .records()
        .iter()
        .filter(|r| spec.matches(dataset, r))
        .cloned()
        .collect();

    tracing::debug!(
        before = dataset.len(),
        after = records.len(),
        "applied filter"
    );

    dataset.with_records(records)
}

/// Apply several specs in sequence. Equivalent to filtering once by their
/// conjunction.
#[must_use]
pub fn apply_filters(dataset: &Dataset, specs: &[FilterSpec]) -> Dataset {
    specs
        .iter()
        .fold(dataset.clone(), |acc, spec| apply_filter(&acc, spec))
}

/// Values a user can pick from when building a [`FilterSpec`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub platforms: Vec<String>,
    pub sentiments: Vec<String>,
    pub media_types: Vec<String>,
    pub locations: Vec<String>,
    /// Earliest and latest date, when the dataset has dates.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl FilterOptions {
    /// Sorted distinct values per categorical field, skipping null cells.
    #[must_use]
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let distinct = |field: Field| -> Vec<String> {
            if !dataset.has(field) {
                return Vec::new();
            }
            dataset
                .records()
                .iter()
                .filter_map(|r| r.text(field))
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(str::to_string)
                .collect()
        };

        let mut dates = dataset.records().iter().filter_map(|r| r.date);
        let date_range = dates.next().map(|first| {
            dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)))
        });

        Self {
            platforms: distinct(Field::Platform),
            sentiments: distinct(Field::Sentiment),
            media_types: distinct(Field::MediaType),
            locations: distinct(Field::Location),
            date_range,
        }
    }
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
