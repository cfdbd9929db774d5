//! Gemini text-generation client and the campaign-summary state machine.

pub mod client;
pub mod error;
pub mod summary;
pub(crate) mod types;

pub use client::{GeminiClient, TextGenerator};
pub use error::ApiError;
pub use summary::{
    begin_summary, cancel_summary, finish_summary, generate_summary, SummaryState,
    EMPTY_SELECTION_MESSAGE,
};
