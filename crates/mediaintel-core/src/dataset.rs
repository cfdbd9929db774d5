//! Engagement records and the column-presence model shared by every
//! pipeline stage.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One of the six recognised semantic columns of an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    Date,
    Engagements,
    Sentiment,
    Platform,
    #[serde(rename = "Media Type")]
    MediaType,
    Location,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Date,
        Field::Engagements,
        Field::Sentiment,
        Field::Platform,
        Field::MediaType,
        Field::Location,
    ];

    /// Categorical fields compared by exact string equality.
    pub const TEXT: [Field; 4] = [
        Field::Sentiment,
        Field::Platform,
        Field::MediaType,
        Field::Location,
    ];

    /// Column header as it must appear in the upload (case-sensitive).
    #[must_use]
    pub fn header(self) -> &'static str {
        match self {
            Field::Date => "Date",
            Field::Engagements => "Engagements",
            Field::Sentiment => "Sentiment",
            Field::Platform => "Platform",
            Field::MediaType => "Media Type",
            Field::Location => "Location",
        }
    }

    /// Match a header against the recognised fields. No trimming or case folding.
    #[must_use]
    pub fn from_header(header: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.header() == header)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

/// Which recognised fields a dataset actually carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSet(BTreeSet<Field>);

impl ColumnSet {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains(&field)
    }

    pub fn insert(&mut self, field: Field) {
        self.0.insert(field);
    }

    pub fn iter(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Field> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A single cleaned engagement event.
///
/// Text fields are `None` either because the column is absent from the
/// dataset or because the cell was empty and incomplete rows were kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub date: Option<NaiveDate>,
    pub engagements: u64,
    pub sentiment: Option<String>,
    pub platform: Option<String>,
    pub media_type: Option<String>,
    pub location: Option<String>,
    /// Cells of unrecognised columns, in `Dataset::passthrough_headers` order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub passthrough: Vec<Option<String>>,
}

impl Record {
    /// Value of a categorical field. `None` for `Date` and `Engagements`.
    #[must_use]
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Sentiment => self.sentiment.as_deref(),
            Field::Platform => self.platform.as_deref(),
            Field::MediaType => self.media_type.as_deref(),
            Field::Location => self.location.as_deref(),
            Field::Date | Field::Engagements => None,
        }
    }
}

/// An ordered, immutable set of records sharing one column layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dataset {
    columns: ColumnSet,
    passthrough_headers: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    #[must_use]
    pub fn new(columns: ColumnSet, passthrough_headers: Vec<String>, records: Vec<Record>) -> Self {
        Self {
            columns,
            passthrough_headers,
            records,
        }
    }

    /// Build a dataset with the same layout and a different set of records.
    #[must_use]
    pub fn with_records(&self, records: Vec<Record>) -> Self {
        Self {
            columns: self.columns.clone(),
            passthrough_headers: self.passthrough_headers.clone(),
            records,
        }
    }

    #[must_use]
    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    #[must_use]
    pub fn has(&self, field: Field) -> bool {
        self.columns.contains(field)
    }

    #[must_use]
    pub fn passthrough_headers(&self) -> &[String] {
        &self.passthrough_headers
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_match_exactly() {
        assert_eq!(Field::from_header("Media Type"), Some(Field::MediaType));
        assert_eq!(Field::from_header("media type"), None);
        assert_eq!(Field::from_header(" Date"), None);
        assert_eq!(Field::from_header("Notes"), None);
    }

    #[test]
    fn every_field_round_trips_through_header() {
        for field in Field::ALL {
            assert_eq!(Field::from_header(field.header()), Some(field));
        }
    }

    #[test]
    fn record_text_ignores_non_text_fields() {
        let record = Record {
            sentiment: Some("Positive".to_string()),
            engagements: 5,
            ..Record::default()
        };
        assert_eq!(record.text(Field::Sentiment), Some("Positive"));
        assert_eq!(record.text(Field::Engagements), None);
        assert_eq!(record.text(Field::Platform), None);
    }

    #[test]
    fn with_records_keeps_layout() {
        let columns: ColumnSet = [Field::Platform, Field::Engagements].into_iter().collect();
        let dataset = Dataset::new(columns.clone(), vec!["Notes".to_string()], vec![]);
        let derived = dataset.with_records(vec![Record::default()]);
        assert_eq!(derived.columns(), &columns);
        assert_eq!(derived.passthrough_headers(), ["Notes".to_string()]);
        assert_eq!(derived.len(), 1);
        assert!(dataset.is_empty());
    }

    #[test]
    fn column_set_serializes_with_upload_headers() {
        let columns: ColumnSet = [Field::MediaType, Field::Date].into_iter().collect();
        let json = serde_json::to_string(&columns).unwrap();
        assert_eq!(json, r#"["Date","Media Type"]"#);
    }
}
