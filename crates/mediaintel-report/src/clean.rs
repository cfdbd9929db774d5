//! Date and engagement normalisation plus incomplete-row removal.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use mediaintel_core::{Dataset, Field, Record};
use serde::Serialize;

use crate::parse::RawDataset;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Row counts before and after cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CleaningReport {
    pub initial_count: usize,
    pub final_count: usize,
    pub rows_removed: usize,
}

/// Parse a calendar date. Date-times are truncated to their day.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    {
        return Some(date);
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt.date());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Parse an engagement count. Anything that is not a finite, non-negative
/// number counts as zero; decimals are truncated.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_engagements(raw: Option<&str>) -> u64 {
    let Some(raw) = raw.map(str::trim) else {
        return 0;
    };
    if let Ok(n) = raw.parse::<u64>() {
        return n;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v.trunc() as u64,
        _ => 0,
    }
}

/// Clean a parsed upload.
///
/// 1. Rows whose `Date` does not parse are always dropped (no-op when the
///    column is absent).
/// 2. `Engagements` that do not parse become `0`; when the column is absent
///    every record gets `0` and the column becomes present.
/// 3. With `drop_incomplete_rows`, rows with any null categorical field are
///    dropped.
///
/// An empty result is valid.
#[must_use]
pub fn clean(raw: &RawDataset, drop_incomplete_rows: bool) -> (Dataset, CleaningReport) {
    let has_date = raw.has(Field::Date);
    let has_engagements = raw.has(Field::Engagements);

    if !has_date {
        tracing::warn!("upload has no 'Date' column; trend facet and date filters are unavailable");
    }
    if !has_engagements {
        tracing::warn!("upload has no 'Engagements' column; defaulting every row to 0");
    }

    let present_text: Vec<Field> = Field::TEXT.into_iter().filter(|f| raw.has(*f)).collect();

    let mut invalid_dates = 0usize;
    let mut incomplete = 0usize;
    let mut records = Vec::with_capacity(raw.len());

    for row in raw.rows() {
        let date = if has_date {
            match raw.cell(row, Field::Date).and_then(parse_date) {
                Some(date) => Some(date),
                None => {
                    invalid_dates += 1;
                    continue;
                }
            }
        } else {
            None
        };

        let engagements = if has_engagements {
            parse_engagements(raw.cell(row, Field::Engagements))
        } else {
            0
        };

        let text = |field: Field| raw.cell(row, field).map(str::to_string);
        let record = Record {
            date,
            engagements,
            sentiment: text(Field::Sentiment),
            platform: text(Field::Platform),
            media_type: text(Field::MediaType),
            location: text(Field::Location),
            passthrough: raw.passthrough_cells(row),
        };

        if drop_incomplete_rows && present_text.iter().any(|f| record.text(*f).is_none()) {
            incomplete += 1;
            continue;
        }

        records.push(record);
    }

    let mut columns = raw.columns().clone();
    columns.insert(Field::Engagements);

    let initial_count = raw.len();
    let final_count = records.len();
    let report = CleaningReport {
        initial_count,
        final_count,
        rows_removed: initial_count - final_count,
    };

    tracing::info!(
        initial = initial_count,
        kept = final_count,
        invalid_dates,
        incomplete,
        "cleaned upload"
    );

    (
        Dataset::new(columns, raw.passthrough_headers(), records),
        report,
    )
}

#[cfg(test)]
#[path = "clean_test.rs"]
mod tests;
