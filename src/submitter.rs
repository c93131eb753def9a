//! Lead submission to the remote intake endpoint
//!
//! Delivery is at-most-once and unconfirmed: one POST per lead, no retry,
//! and the response is never read. `Sent` only means the request left
//! without a transport error.

use crate::state_machine::LeadRecord;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;

/// Endpoint used when none is configured
pub const DEFAULT_LEAD_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbzC7GskpEFRz_qAy6E9i1MbaQTbuP6BTT_52h0hhwdMlw25lsAoBEuxWmEl0fvoz17O/exec";

/// The endpoint only accepts simple cross-origin requests, so the JSON
/// body travels as plain text.
const BODY_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

/// Result of a single submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Sent,
    Failed(String),
}

impl SubmissionOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, SubmissionOutcome::Sent)
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("failed to serialize lead: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl From<Result<(), SubmitError>> for SubmissionOutcome {
    fn from(result: Result<(), SubmitError>) -> Self {
        match result {
            Ok(()) => SubmissionOutcome::Sent,
            Err(e) => SubmissionOutcome::Failed(e.to_string()),
        }
    }
}

/// Sends completed leads somewhere a human will follow up
#[async_trait]
pub trait LeadSubmitter: Send + Sync {
    /// Make one delivery attempt. Never retries.
    async fn submit(&self, lead: &LeadRecord) -> SubmissionOutcome;
}

/// Posts leads to a fixed HTTP endpoint
pub struct HttpLeadSubmitter {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpLeadSubmitter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    async fn post(&self, lead: &LeadRecord) -> Result<(), SubmitError> {
        let body = serde_json::to_string(lead)?;

        // Status and body are deliberately ignored
        self.client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, BODY_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        Ok(())
    }
}

#[async_trait]
impl LeadSubmitter for HttpLeadSubmitter {
    async fn submit(&self, lead: &LeadRecord) -> SubmissionOutcome {
        let start = std::time::Instant::now();
        let result = self.post(lead).await;
        let duration = start.elapsed();

        match &result {
            Ok(()) => {
                tracing::info!(
                    endpoint = %self.endpoint,
                    duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
                    "Lead sent"
                );
            }
            Err(e) => {
                tracing::warn!(
                    endpoint = %self.endpoint,
                    duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
                    error = %e,
                    "Lead submission failed"
                );
            }
        }

        result.into()
    }
}
