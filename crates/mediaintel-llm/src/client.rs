//! HTTP client for the Gemini `generateContent` API.
//!
//! One POST per call, no retries. The API key travels in the
//! `x-goog-api-key` header so it never appears in URLs or error messages.

use std::future::Future;
use std::time::Duration;

use mediaintel_core::AppConfig;
use reqwest::{Client, Url};

use crate::error::ApiError;
use crate::types::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

const API_KEY_HEADER: &str = "x-goog-api-key";
const MAX_ERROR_BODY_CHARS: usize = 300;

/// A black-box prompt-to-text service.
pub trait TextGenerator {
    /// Generate text for `prompt`.
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, ApiError>> + Send;
}

/// Client for the Gemini text-generation API.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: Url,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingApiKey`] when no key is configured, or any
    /// error from [`GeminiClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        let api_key = config
            .gemini_api_key
            .as_deref()
            .ok_or(ApiError::MissingApiKey)?;
        Self::with_base_url(
            api_key,
            &config.gemini_model,
            config.llm_timeout_secs,
            &config.gemini_base_url,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute http(s) URL.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("mediaintel/0.1 (campaign-summary)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "expected an http or https URL".to_string(),
            });
        }

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            base_url: parsed,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// `{base}/models/{model}:generateContent`
    fn endpoint(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("models")
                .push(&format!("{}:generateContent", self.model));
        }
        url
    }

    /// Sends `prompt` as a single user turn and returns the first generated
    /// text part.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure or timeout.
    /// - [`ApiError::Status`] on a non-2xx response.
    /// - [`ApiError::Deserialize`] if the body is not JSON.
    /// - [`ApiError::MalformedResponse`] if no text part is present.
    pub async fn generate_content(&self, prompt: &str) -> Result<String, ApiError> {
        let url = self.endpoint();
        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "requesting summary");

        let response = self
            .client
            .post(url.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&GenerateContentRequest::user_prompt(prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), model = %self.model, "Gemini request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
                context: format!("generateContent(model={})", self.model),
                source: e,
            })?;

        parsed.first_text().ok_or_else(|| {
            ApiError::MalformedResponse("no candidates[0].content.parts[0].text".to_string())
        })
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        self.generate_content(prompt).await
    }
}

/// Prefer the structured `error.message`; fall back to a truncated body.
fn error_message(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return envelope.error.message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> GeminiClient {
        GeminiClient::with_base_url("test-key", "gemini-2.0-flash", 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn endpoint_appends_model_path() {
        let client = test_client("https://generativelanguage.googleapis.com/v1beta/");
        assert_eq!(
            client.endpoint().as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn endpoint_handles_missing_trailing_slash() {
        let client = test_client("http://127.0.0.1:9999");
        assert_eq!(
            client.endpoint().as_str(),
            "http://127.0.0.1:9999/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn model_is_reported_as_configured() {
        let client = test_client("https://example.com");
        assert_eq!(client.model(), "gemini-2.0-flash");
    }

    #[test]
    fn endpoint_never_contains_api_key() {
        let client = test_client("https://example.com/v1beta");
        assert!(!client.endpoint().as_str().contains("test-key"));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = GeminiClient::with_base_url("k", "m", 30, "mailto:someone@example.com")
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl { .. }), "got {err:?}");
    }

    #[test]
    fn rejects_unparsable_base_url() {
        let err = GeminiClient::with_base_url("k", "m", 30, "not a url").unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl { .. }), "got {err:?}");
    }

    #[test]
    fn debug_redacts_api_key() {
        let client = test_client("https://example.com");
        assert!(!format!("{client:?}").contains("test-key"));
    }

    #[test]
    fn error_message_prefers_structured_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body), "API key not valid");
    }

    #[test]
    fn error_message_truncates_raw_body() {
        let body = "x".repeat(1000);
        assert_eq!(error_message(&body).len(), MAX_ERROR_BODY_CHARS);
        assert_eq!(error_message("  "), "empty response body");
    }
}
