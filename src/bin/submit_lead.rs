//! Utility to submit a lead record from a JSON file through the same
//! validation and retry path the HTTP service uses.
//!
//! Usage: `submit_lead <lead.json>`

use std::env;
use std::sync::Arc;

use lead_intake_api::config::Config;
use lead_intake_api::models::{SubmissionOutcome, LANDING_PAGE_SOURCE};
use lead_intake_api::submission::{HttpTransport, SubmissionService};
use lead_intake_api::validation::validate;

/// Main entry point for the submission utility.
///
/// Reads the lead, validates it, and posts it to `SUBMISSION_ENDPOINT`.
/// Exits with an error if validation fails or the retry budget runs out.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let path = env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("Usage: submit_lead <lead.json>"))?;

    let config = Config::from_env()?;

    let raw = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path, e))?;
    let mut record: lead_intake_api::models::LeadRecord = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("{} is not a valid lead record: {}", path, e))?;

    record.sanitize_phone();
    record.timestamp.get_or_insert_with(chrono::Utc::now);
    record
        .source
        .get_or_insert_with(|| LANDING_PAGE_SOURCE.to_string());

    validate(&record)?;

    let transport = HttpTransport::new(config.submission_endpoint.clone())?;
    let service = SubmissionService::new(Arc::new(transport), config.retry_policy());

    println!("Submitting lead from {} to {}", path, config.submission_endpoint);

    match service.submit(&record).await {
        SubmissionOutcome::Success(body) => {
            println!("✓ Submitted");
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
        SubmissionOutcome::Failure(error) => Err(anyhow::anyhow!("Submission failed: {}", error)),
    }
}
