//! HTTP client for the Gemini `generateContent` endpoint.
//!
//! Sends the grounded report prompt, checks the HTTP status and error
//! envelope, and turns the generated JSON into a [`DrugReport`].

use std::time::Duration;

use async_trait::async_trait;
use pharmatrack_core::{AppConfig, DataSource, DataSourceError, DrugReport};
use reqwest::{Client, StatusCode, Url};

use crate::error::GeminiError;
use crate::normalize::into_report;
use crate::prompt::build_request;
use crate::types::{ErrorEnvelope, GenerateContentResponse};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for grounded drug facility reports.
///
/// Use [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl GeminiClient {
    /// Creates a client for `model` on the production API.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, GeminiError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`GeminiError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("pharmatrack/0.1 (facility-report)")
            .build()?;

        let endpoint = build_endpoint(base_url, model)?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
        })
    }

    /// Builds a client from application config.
    ///
    /// # Errors
    ///
    /// Same as [`GeminiClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, GeminiError> {
        Self::with_base_url(
            &config.gemini_api_key,
            &config.gemini_model,
            config.gemini_timeout_secs,
            &config.gemini_base_url,
        )
    }

    /// Full `generateContent` URL this client posts to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Asks the model for every FDA-registered facility making `drug_name`.
    ///
    /// Makes exactly one request; a failed fetch is only repeated by a new
    /// search.
    ///
    /// # Errors
    ///
    /// - [`GeminiError::EmptyDrugName`] if `drug_name` is blank.
    /// - [`GeminiError::ApiError`] on a non-2xx status.
    /// - [`GeminiError::Http`] on network failure.
    /// - [`GeminiError::EmptyResponse`] if no candidate came back.
    /// - [`GeminiError::Deserialize`] if the body or generated report is malformed.
    pub async fn fetch_facility_report(&self, drug_name: &str) -> Result<DrugReport, GeminiError> {
        let drug_name = drug_name.trim();
        if drug_name.is_empty() {
            return Err(GeminiError::EmptyDrugName);
        }

        let response = self.generate(drug_name).await?;

        let report = into_report(drug_name, &response)?;
        tracing::debug!(
            drug = drug_name,
            sites = report.sites.len(),
            sources = report.sources.len(),
            "Gemini report parsed"
        );
        Ok(report)
    }

    async fn generate(&self, drug_name: &str) -> Result<GenerateContentResponse, GeminiError> {
        let request = build_request(drug_name);
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Self::api_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| GeminiError::Deserialize {
            context: format!("generateContent(drug={drug_name})"),
            source: e,
        })
    }

    /// Maps a non-2xx response to [`GeminiError::ApiError`], preferring the
    /// message from the `error` envelope over the raw body.
    fn api_error(status: StatusCode, body: &str) -> GeminiError {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .map(|env| match env.error.status {
                Some(code) if !env.error.message.is_empty() => {
                    format!("{code}: {}", env.error.message)
                }
                Some(code) => code,
                None => env.error.message,
            })
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_owned()
            });
        GeminiError::ApiError {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl DataSource for GeminiClient {
    async fn fetch_report(&self, drug_name: &str) -> Result<DrugReport, DataSourceError> {
        self.fetch_facility_report(drug_name)
            .await
            .map_err(DataSourceError::from)
    }
}

/// Resolves `v1beta/models/{model}:generateContent` against `base_url`.
///
/// Accepts model ids with or without the `models/` prefix.
fn build_endpoint(base_url: &str, model: &str) -> Result<Url, GeminiError> {
    let invalid = |reason: String| GeminiError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason,
    };

    // Exactly one trailing slash so `join` appends rather than replacing the
    // last path segment.
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(invalid("URL cannot be a base".to_owned()));
    }

    let model = model.trim().trim_start_matches("models/");
    base.join(&format!("v1beta/models/{model}:generateContent"))
        .map_err(|e| invalid(e.to_string()))
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
