//! Delivery of validated leads to the configured upstream endpoint.
//!
//! Retry rules:
//! - 2xx: success, body decoded as JSON
//! - 4xx: terminal, never retried
//! - 5xx, timeout, network and decode failures: retried while attempts remain
//!
//! The delay before attempt `n + 1` is `n * base_delay` (linear).

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::SubmissionError;
use crate::models::{LeadRecord, SubmissionOutcome};

/// Timeout and retry budget for a submission call chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Upper bound for a single attempt.
    pub timeout: Duration,
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Linear backoff unit.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(10_000),
            max_attempts: 3,
            base_delay: Duration::from_millis(1_000),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }
}

/// Raw upstream reply: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// A single network round trip carrying a lead.
#[async_trait]
pub trait LeadTransport: Send + Sync {
    async fn send(&self, record: &LeadRecord) -> Result<TransportResponse, SubmissionError>;
}

/// POSTs leads as JSON with the headers the landing-page form used.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Creates a new `HttpTransport`.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Absolute URL the leads are POSTed to.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, SubmissionError> {
        let client = reqwest::Client::builder().build().map_err(|e| {
            SubmissionError::Network(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LeadTransport for HttpTransport {
    async fn send(&self, record: &LeadRecord) -> Result<TransportResponse, SubmissionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("X-Requested-With", "XMLHttpRequest")
            .json(record)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SubmissionError::Timeout
                } else {
                    SubmissionError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SubmissionError::Network(format!("Failed to read response: {}", e)))?;

        Ok(TransportResponse { status, body })
    }
}

/// Sends leads upstream with bounded retries.
#[derive(Clone)]
pub struct SubmissionService {
    transport: Arc<dyn LeadTransport>,
    policy: RetryPolicy,
}

impl SubmissionService {
    pub fn new(transport: Arc<dyn LeadTransport>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Delivers `record`, retrying transient failures.
    ///
    /// The record is expected to have passed [`crate::validation::validate`].
    pub async fn submit(&self, record: &LeadRecord) -> SubmissionOutcome {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let error = match self.attempt(record).await {
                Ok(body) => {
                    tracing::info!("✓ Lead delivered on attempt {}", attempt);
                    return SubmissionOutcome::Success(body);
                }
                Err(error) => error,
            };

            if !error.is_retryable() {
                tracing::warn!("Attempt {} failed with terminal error: {}", attempt, error);
                return SubmissionOutcome::Failure(error);
            }

            if attempt >= max_attempts {
                tracing::error!(
                    "Attempt {} failed, retry budget of {} exhausted: {}",
                    attempt,
                    max_attempts,
                    error
                );
                return SubmissionOutcome::Failure(error);
            }

            let delay = self.policy.backoff(attempt);
            tracing::warn!(
                "Attempt {} failed, retrying in {}ms: {}",
                attempt,
                delay.as_millis(),
                error
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn attempt(&self, record: &LeadRecord) -> Result<Value, SubmissionError> {
        let response = tokio::time::timeout(self.policy.timeout, self.transport.send(record))
            .await
            .map_err(|_| SubmissionError::Timeout)??;

        classify(response)
    }
}

fn classify(response: TransportResponse) -> Result<Value, SubmissionError> {
    let TransportResponse { status, body } = response;
    match status {
        200..=299 => serde_json::from_str(&body).map_err(|e| SubmissionError::Decode(e.to_string())),
        400..=499 => Err(SubmissionError::Client { status, body }),
        500..=599 => Err(SubmissionError::Server { status, body }),
        _ => Err(SubmissionError::UnexpectedStatus { status, body }),
    }
}
