//! Upload parsing: raw CSV bytes into an untyped, column-aware table.

use std::collections::BTreeMap;

use csv::{ErrorKind, ReaderBuilder};
use mediaintel_core::{ColumnSet, Field};

use crate::error::ParseError;

/// Cell values read as null, mirroring the default missing-value markers of
/// common dataframe readers. Matched exactly; padded markers stay text.
const NULL_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "#N/A", "<NA>",
];

/// A row of raw cells. `None` marks a null cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    cells: Vec<Option<String>>,
}

impl RawRecord {
    fn cell(&self, position: usize) -> Option<&str> {
        self.cells.get(position).and_then(Option::as_deref)
    }
}

/// Parsed upload before any cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDataset {
    columns: ColumnSet,
    positions: BTreeMap<Field, usize>,
    passthrough: Vec<(usize, String)>,
    rows: Vec<RawRecord>,
}

impl RawDataset {
    #[must_use]
    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    #[must_use]
    pub fn has(&self, field: Field) -> bool {
        self.columns.contains(field)
    }

    #[must_use]
    pub fn rows(&self) -> &[RawRecord] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Headers of unrecognised columns, in upload order.
    #[must_use]
    pub fn passthrough_headers(&self) -> Vec<String> {
        self.passthrough.iter().map(|(_, h)| h.clone()).collect()
    }

    /// Value of a recognised field in `row`; `None` when the column is absent
    /// or the cell is null.
    #[must_use]
    pub fn cell<'a>(&self, row: &'a RawRecord, field: Field) -> Option<&'a str> {
        self.positions.get(&field).and_then(|&pos| row.cell(pos))
    }

    /// Passthrough cells of `row`, aligned with [`RawDataset::passthrough_headers`].
    #[must_use]
    pub fn passthrough_cells(&self, row: &RawRecord) -> Vec<Option<String>> {
        self.passthrough
            .iter()
            .map(|(pos, _)| row.cell(*pos).map(str::to_string))
            .collect()
    }
}

fn to_cell(raw: &str) -> Option<String> {
    if NULL_MARKERS.contains(&raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Parse an uploaded CSV table. The first row is the header.
///
/// Headers are matched case-sensitively against the recognised fields. When a
/// recognised header repeats, the first occurrence wins and later ones are
/// kept as passthrough columns. An upload without any recognised column still
/// parses.
///
/// # Errors
///
/// Returns [`ParseError`] when the bytes are not UTF-8, there is no header
/// row, or a row's width differs from the header's.
pub fn parse_csv(bytes: &[u8]) -> Result<RawDataset, ParseError> {
    let text = std::str::from_utf8(bytes).map_err(|e| ParseError::Encoding {
        offset: e.valid_up_to(),
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    if text.trim().is_empty() {
        return Err(ParseError::MissingHeader);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(map_csv_error)?.clone();

    let mut columns = ColumnSet::empty();
    let mut positions = BTreeMap::new();
    let mut passthrough = Vec::new();
    for (pos, header) in headers.iter().enumerate() {
        match Field::from_header(header) {
            Some(field) if !columns.contains(field) => {
                columns.insert(field);
                positions.insert(field, pos);
            }
            Some(field) => {
                tracing::warn!(column = %field, position = pos, "duplicate column kept as passthrough");
                passthrough.push((pos, header.to_string()));
            }
            None => passthrough.push((pos, header.to_string())),
        }
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(map_csv_error)?;
        rows.push(RawRecord {
            cells: record.iter().map(to_cell).collect(),
        });
    }

    tracing::debug!(
        rows = rows.len(),
        recognised = columns.len(),
        passthrough = passthrough.len(),
        "parsed upload"
    );

    Ok(RawDataset {
        columns,
        positions,
        passthrough,
        rows,
    })
}

fn map_csv_error(err: csv::Error) -> ParseError {
    if let ErrorKind::UnequalLengths {
        pos,
        expected_len,
        len,
    } = err.kind()
    {
        return ParseError::RaggedRow {
            line: pos.as_ref().map_or(0, csv::Position::line),
            expected: *expected_len,
            found: *len,
        };
    }
    ParseError::from(err)
}
