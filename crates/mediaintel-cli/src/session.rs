//! Per-user interaction state: the current upload, filter choices, persona
//! and summary outcome.
//!
//! Every mutation recomputes the filtered report from the cached cleaned
//! upload, so the report always reflects the current selection.

use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;
use mediaintel_core::{Dataset, Field, Persona};
use mediaintel_llm::{begin_summary, cancel_summary, finish_summary, SummaryState, TextGenerator};
use mediaintel_report::{
    apply_filter, build_report, CleanedUpload, CleaningReport, FilterOptions, FilterSpec,
    ParseError, Report, UploadCache,
};

pub(crate) struct Session {
    cache: UploadCache,
    bytes: Vec<u8>,
    upload: Option<Arc<CleanedUpload>>,
    drop_incomplete_rows: bool,
    filter: FilterSpec,
    persona: Persona,
    summary: SummaryState,
    report: Report,
}

impl Session {
    pub(crate) fn new(drop_incomplete_rows: bool, persona: Persona) -> Self {
        Self {
            cache: UploadCache::new(),
            bytes: Vec::new(),
            upload: None,
            drop_incomplete_rows,
            filter: FilterSpec::default(),
            persona,
            summary: SummaryState::Idle,
            report: build_report(&Dataset::default()),
        }
    }

    /// Replace the current upload. Filters are kept; the summary is reset.
    pub(crate) fn load(&mut self, bytes: Vec<u8>) -> Result<(), ParseError> {
        let upload = self.cache.load(&bytes, self.drop_incomplete_rows)?;
        tracing::info!(
            digest = %upload.digest,
            rows = upload.dataset.len(),
            rows_removed = upload.report.rows_removed,
            "upload loaded"
        );
        self.bytes = bytes;
        self.upload = Some(upload);
        self.summary = SummaryState::Idle;
        self.refresh();
        Ok(())
    }

    /// Re-clean the current upload with a different incomplete-row policy.
    pub(crate) fn set_drop_incomplete_rows(&mut self, drop: bool) -> Result<(), ParseError> {
        self.drop_incomplete_rows = drop;
        if self.upload.is_some() {
            self.upload = Some(self.cache.load(&self.bytes, drop)?);
        }
        self.refresh();
        Ok(())
    }

    pub(crate) fn set_filter(&mut self, field: Field, value: Option<String>) {
        self.filter.set_constraint(field, value);
        self.refresh();
    }

    pub(crate) fn set_date_from(&mut self, date: Option<NaiveDate>) {
        self.filter.date_from = date;
        self.refresh();
    }

    pub(crate) fn set_date_to(&mut self, date: Option<NaiveDate>) {
        self.filter.date_to = date;
        self.refresh();
    }

    pub(crate) fn replace_filter(&mut self, filter: FilterSpec) {
        self.filter = filter;
        self.refresh();
    }

    pub(crate) fn clear_filters(&mut self) {
        self.replace_filter(FilterSpec::default());
    }

    pub(crate) fn set_persona(&mut self, persona: Persona) {
        self.persona = persona;
    }

    fn refresh(&mut self) {
        let filtered = match &self.upload {
            Some(upload) => apply_filter(&upload.dataset, &self.filter),
            None => Dataset::default(),
        };
        self.report = build_report(&filtered);
        if self.report.is_empty() && self.upload.is_some() {
            tracing::info!("current filters match no rows");
        }
    }

    pub(crate) fn report(&self) -> &Report {
        &self.report
    }

    pub(crate) fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub(crate) fn persona(&self) -> Persona {
        self.persona
    }

    pub(crate) fn drop_incomplete_rows(&self) -> bool {
        self.drop_incomplete_rows
    }

    pub(crate) fn summary(&self) -> &SummaryState {
        &self.summary
    }

    pub(crate) fn cleaning(&self) -> Option<CleaningReport> {
        self.upload.as_ref().map(|u| u.report)
    }

    /// Choices offered for each filter, computed on the unfiltered upload.
    pub(crate) fn options(&self) -> FilterOptions {
        self.upload
            .as_ref()
            .map(|u| FilterOptions::from_dataset(&u.dataset))
            .unwrap_or_default()
    }

    /// The prompt a summary request would send, or `None` when the
    /// selection is empty.
    pub(crate) fn summary_prompt(&self) -> Option<String> {
        let mut scratch = SummaryState::Idle;
        begin_summary(&mut scratch, &self.report, self.persona)
    }

    /// Record a failure that happened before any request could be sent.
    pub(crate) fn summary_unavailable(&mut self, reason: String) {
        self.summary = SummaryState::Failed(reason);
    }

    /// Request a summary of the current report, abandoning it if `cancel`
    /// resolves first.
    pub(crate) async fn summarize<G, C>(&mut self, generator: &G, cancel: C)
    where
        G: TextGenerator,
        C: Future<Output = ()>,
    {
        let Some(prompt) = begin_summary(&mut self.summary, &self.report, self.persona) else {
            return;
        };
        tokio::select! {
            outcome = generator.generate(&prompt) => finish_summary(&mut self.summary, outcome),
            () = cancel => cancel_summary(&mut self.summary),
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
