use thiserror::Error;

/// Errors raised while reading an uploaded table.
///
/// Cleaning, filtering and aggregation never fail; a `ParseError` is the only
/// way the pipeline aborts.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The upload is not valid UTF-8.
    #[error("upload is not valid UTF-8 (first invalid byte at offset {offset})")]
    Encoding { offset: usize },

    /// The upload has no header row at all.
    #[error("upload is empty: expected a header row")]
    MissingHeader,

    /// A data row has a different number of cells than the header.
    #[error("row on line {line} has {found} fields, header has {expected}")]
    RaggedRow {
        line: u64,
        expected: u64,
        found: u64,
    },

    /// Any other tokenizer failure from the CSV reader.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}
