use thiserror::Error;

/// Errors returned by the text-generation client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("Gemini API returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not valid JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON without a generated text part.
    #[error("unexpected Gemini response structure: {0}")]
    MalformedResponse(String),

    /// No API key was configured.
    #[error("GEMINI_API_KEY is not set; summary generation is unavailable")]
    MissingApiKey,

    /// The configured base URL cannot be used.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
