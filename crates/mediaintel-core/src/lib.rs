//! Shared configuration and data model for the media intelligence toolkit.

pub mod app_config;
pub mod config;
pub mod dataset;

use thiserror::Error;

pub use app_config::{AppConfig, Persona};
pub use config::{load_app_config, load_app_config_from_env};
pub use dataset::{ColumnSet, Dataset, Field, Record};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
