//! Document summarization via the AI HTTP endpoint.
//!
//! The summarizer sits behind a trait so upload orchestration can run against
//! a stub in tests; the HTTP implementation posts a single file as multipart
//! form data and validates the JSON response before anyone trusts it. No
//! retries happen here, the caller decides whether a failed call is worth
//! repeating.

/// Validated response shapes for summarization results.
pub mod schema;

pub use schema::{ImportantDate, Stakeholder, SummaryBrief, SummarySimple};

use crate::attachments::FilePayload;
use crate::attachments::urls::join_endpoint;
use crate::config::get_config;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::Form;
use thiserror::Error;
use validator::Validate;

const SUMMARIZE_PATH: &str = "aiapi/summarizeDocument";

/// Errors surfaced while requesting a document summary.
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// HTTP layer failed before receiving a response.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Endpoint responded with a non-success status.
    #[error("Failed to summarize file: {0}")]
    UnexpectedStatus(String),
    /// Response body was not the expected JSON shape.
    #[error("Malformed summary response: {0}")]
    Decode(#[from] serde_json::Error),
    /// Response parsed but violated the summary schema bounds.
    #[error("Summary failed validation: {0}")]
    InvalidSummary(#[from] validator::ValidationErrors),
}

/// Interface implemented by document summarization providers.
#[async_trait]
pub trait DocumentSummarizer: Send + Sync {
    /// Produce a validated summary for a single file.
    async fn summarize(&self, file: &FilePayload) -> Result<SummarySimple, SummarizeError>;
}

/// HTTP client for the `/aiapi/summarizeDocument` endpoint.
pub struct HttpSummarizer {
    client: Client,
    base_url: String,
}

impl HttpSummarizer {
    /// Construct a client targeting the configured AI base URL.
    pub fn new() -> Result<Self, SummarizeError> {
        Self::with_base_url(get_config().summarizer_url())
    }

    /// Construct a client targeting an explicit base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, SummarizeError> {
        let client = Client::builder().user_agent("taskattach/0.2").build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl DocumentSummarizer for HttpSummarizer {
    async fn summarize(&self, file: &FilePayload) -> Result<SummarySimple, SummarizeError> {
        let form = Form::new().part("file", file.to_part()?);
        let response = self
            .client
            .post(join_endpoint(&self.base_url, SUMMARIZE_PATH))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let reason = status
                .canonical_reason()
                .map(str::to_owned)
                .unwrap_or_else(|| status.to_string());
            let error = SummarizeError::UnexpectedStatus(reason);
            tracing::error!(file = %file.file_name, error = %error, "Summarization request failed");
            return Err(error);
        }

        let body: serde_json::Value = response.json().await?;
        let summary: SummarySimple = serde_json::from_value(body)?;
        summary.validate()?;
        tracing::debug!(
            file = %file.file_name,
            chars = summary.summary.len(),
            "Summarized document"
        );
        Ok(summary)
    }
}
