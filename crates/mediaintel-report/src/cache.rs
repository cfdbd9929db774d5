//! Memoised parsing and cleaning keyed on the raw upload.

use std::collections::HashMap;
use std::sync::Arc;

use mediaintel_core::Dataset;
use sha2::{Digest, Sha256};

use crate::clean::{clean, CleaningReport};
use crate::error::ParseError;
use crate::parse::{parse_csv, RawDataset};

/// A cleaned upload ready for filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedUpload {
    pub digest: String,
    pub dataset: Dataset,
    pub report: CleaningReport,
}

/// Cache of parsed and cleaned uploads.
///
/// Parsing is keyed on the SHA-256 of the upload bytes; cleaning additionally
/// on the `drop_incomplete_rows` flag, so toggling the flag re-cleans without
/// re-parsing. Only the most recent upload is retained: a different upload
/// that parses successfully evicts the previous one.
#[derive(Debug, Default)]
pub struct UploadCache {
    parsed: HashMap<String, Arc<RawDataset>>,
    cleaned: HashMap<(String, bool), Arc<CleanedUpload>>,
}

impl UploadCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and clean `bytes`, reusing earlier work for identical input.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the upload is malformed. Failures are not
    /// cached.
    pub fn load(
        &mut self,
        bytes: &[u8],
        drop_incomplete_rows: bool,
    ) -> Result<Arc<CleanedUpload>, ParseError> {
        let digest = format!("{:x}", Sha256::digest(bytes));

        if let Some(hit) = self.cleaned.get(&(digest.clone(), drop_incomplete_rows)) {
            tracing::debug!(digest = %digest, drop_incomplete_rows, "upload cache hit");
            return Ok(Arc::clone(hit));
        }

        let raw = match self.parsed.get(&digest) {
            Some(raw) => Arc::clone(raw),
            None => {
                let raw = Arc::new(parse_csv(bytes)?);
                self.evict_all_but(&digest);
                self.parsed.insert(digest.clone(), Arc::clone(&raw));
                raw
            }
        };

        let (dataset, report) = clean(&raw, drop_incomplete_rows);
        let upload = Arc::new(CleanedUpload {
            digest: digest.clone(),
            dataset,
            report,
        });
        self.cleaned
            .insert((digest, drop_incomplete_rows), Arc::clone(&upload));
        Ok(upload)
    }

    fn evict_all_but(&mut self, digest: &str) {
        let before = self.parsed.len();
        self.parsed.retain(|d, _| d == digest);
        self.cleaned.retain(|(d, _), _| d == digest);
        if before > self.parsed.len() {
            tracing::debug!(evicted = before - self.parsed.len(), "dropped previous upload");
        }
    }

    /// Number of uploads currently held.
    #[must_use]
    pub fn parsed_len(&self) -> usize {
        self.parsed.len()
    }

    /// Number of cached (upload, flag) cleaning results.
    #[must_use]
    pub fn cleaned_len(&self) -> usize {
        self.cleaned.len()
    }
}
