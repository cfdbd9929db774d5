//! AI campaign-summary lifecycle.
//!
//! `Idle -> Requesting -> Success | Failed`, and `Requesting -> Idle` on
//! cancel. A failed request never touches the report it was built from.

use mediaintel_core::Persona;
use mediaintel_report::{build_summary_prompt, Report};
use serde::Serialize;

use crate::client::TextGenerator;
use crate::error::ApiError;

/// Shown instead of calling the service when the selection has no rows.
pub const EMPTY_SELECTION_MESSAGE: &str = "No filtered data to build a summary from.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "text", rename_all = "snake_case")]
pub enum SummaryState {
    #[default]
    Idle,
    Requesting,
    Success(String),
    Failed(String),
}

impl SummaryState {
    #[must_use]
    pub fn is_requesting(&self) -> bool {
        matches!(self, Self::Requesting)
    }

    /// The generated summary, if the last request succeeded.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Move to `Requesting` and return the prompt to send.
///
/// An empty report moves straight to `Failed` and returns `None`; no request
/// should be made.
pub fn begin_summary(state: &mut SummaryState, report: &Report, persona: Persona) -> Option<String> {
    if report.is_empty() {
        tracing::info!("summary skipped: filtered selection is empty");
        *state = SummaryState::Failed(EMPTY_SELECTION_MESSAGE.to_string());
        return None;
    }
    *state = SummaryState::Requesting;
    Some(build_summary_prompt(&report.summary_facts(), persona))
}

/// Record the outcome of a request started with [`begin_summary`].
///
/// Ignored unless the state is still `Requesting`, so a late reply after a
/// cancel does not resurrect the request.
pub fn finish_summary(state: &mut SummaryState, outcome: Result<String, ApiError>) {
    if !state.is_requesting() {
        tracing::debug!("discarding summary outcome: request no longer active");
        return;
    }
    *state = match outcome {
        Ok(text) => {
            tracing::info!(chars = text.len(), "summary generated");
            SummaryState::Success(text)
        }
        Err(e) => {
            tracing::warn!(error = %e, "summary generation failed");
            SummaryState::Failed(e.to_string())
        }
    };
}

/// Abandon an in-flight request.
pub fn cancel_summary(state: &mut SummaryState) {
    if state.is_requesting() {
        tracing::info!("summary request cancelled");
        *state = SummaryState::Idle;
    }
}

/// Build the prompt for `report`, send it, and record the outcome in `state`.
pub async fn generate_summary<G: TextGenerator>(
    state: &mut SummaryState,
    generator: &G,
    report: &Report,
    persona: Persona,
) {
    let Some(prompt) = begin_summary(state, report, persona) else {
        return;
    };
    let outcome = generator.generate(&prompt).await;
    finish_summary(state, outcome);
}
