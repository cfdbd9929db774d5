//! Cleaning, filtering, aggregation and insight derivation for uploaded
//! media-engagement tables.
//!
//! The pipeline runs `parse_csv` -> `clean` -> `apply_filter` -> `build_report`.
//! Only parsing can fail; every later stage accepts empty input and produces
//! empty (but well-formed) output.

pub mod aggregate;
pub mod cache;
pub mod clean;
pub mod error;
pub mod filter;
pub mod insights;
pub mod parse;
pub mod prompt;
pub mod report;
pub mod trend;

pub use aggregate::{aggregate, Aggregates, CategoryBreakdown, CategoryEntry, EngagementTrend, TrendPoint};
pub use cache::{CleanedUpload, UploadCache};
pub use clean::{clean, CleaningReport};
pub use error::ParseError;
pub use filter::{apply_filter, apply_filters, FilterOptions, FilterSpec};
pub use insights::{derive_insights, emphasis_to_html, Facet, FacetInsights};
pub use parse::{parse_csv, RawDataset};
pub use prompt::{build_summary_prompt, SummaryFacts, NOT_AVAILABLE};
pub use report::{build_report, Report};
pub use trend::{classify_trend, TrendDirection};
