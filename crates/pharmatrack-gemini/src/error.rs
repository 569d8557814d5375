use pharmatrack_core::DataSourceError;
use thiserror::Error;

/// Errors returned by the Gemini report client.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// The drug name was blank after trimming; no request was sent.
    #[error("drug name must not be empty")]
    EmptyDrugName,

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gemini answered with a non-2xx status and an `error` envelope.
    #[error("Gemini API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The response carried no candidates, e.g. because the prompt was blocked.
    #[error("Gemini returned no candidates: {0}")]
    EmptyResponse(String),

    /// The response body or the generated report did not match the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl From<GeminiError> for DataSourceError {
    fn from(err: GeminiError) -> Self {
        DataSourceError::new(err.to_string())
    }
}
