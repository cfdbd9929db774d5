use crate::app_config::{AppConfig, Persona};
use crate::ConfigError;

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default; the Gemini API key is optional because only
/// summary generation needs it.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected a boolean, got '{other}'"),
            }),
        }
    };

    let log_level = or_default("MEDIAINTEL_LOG_LEVEL", "info");

    let gemini_api_key = lookup("GEMINI_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty());
    let gemini_model = or_default("MEDIAINTEL_GEMINI_MODEL", DEFAULT_GEMINI_MODEL);
    let gemini_base_url = or_default("MEDIAINTEL_GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL);

    let llm_timeout_secs = parse_u64("MEDIAINTEL_LLM_TIMEOUT_SECS", "30")?;
    if llm_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "MEDIAINTEL_LLM_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least one second".to_string(),
        });
    }

    let drop_incomplete_rows = parse_bool("MEDIAINTEL_DROP_INCOMPLETE_ROWS", "true")?;

    let persona = or_default("MEDIAINTEL_PERSONA", "professional")
        .parse::<Persona>()
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "MEDIAINTEL_PERSONA".to_string(),
            reason,
        })?;

    Ok(AppConfig {
        log_level,
        gemini_api_key,
        gemini_model,
        gemini_base_url,
        llm_timeout_secs,
        drop_incomplete_rows,
        persona,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
