use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::brochure::Brochure;
use crate::catalog::{self, University, FEE_NOTE};
use crate::config::Config;
use crate::errors::AppError;
use crate::models::{LeadRecord, SubmissionOutcome, LANDING_PAGE_SOURCE};
use crate::submission::SubmissionService;
use crate::tracking::{track, TrackedEvent};
use crate::validation::validate;

/// Header carrying the `document.title` of the page the form was posted from.
pub const PAGE_TITLE_HEADER: &str = "x-page-title";

pub const SUBMISSION_SUCCESS_MESSAGE: &str =
    "Application submitted successfully! We will contact you soon.";

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Delivers validated leads upstream.
    pub submission: SubmissionService,
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "lead-intake-api",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /api/v1/leads
///
/// Flow:
/// 1. Parse the body; malformed JSON is returned as 400.
/// 2. Stamp metadata (university, timestamp, source, user agent, referrer).
/// 3. Sanitize the phone number the way the form input does.
/// 4. Validate; the first violation is returned as 422.
/// 5. Submit upstream with retries.
/// 6. Track the outcome.
///
/// # Returns
///
/// * `Result<Json<Value>, AppError>` - Upstream body on success, 502 once retries are exhausted.
pub async fn submit_lead(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<LeadRecord>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(mut record) = payload?;
    let submission_id = Uuid::new_v4();
    stamp_metadata(&mut record, &headers, Utc::now());
    record.sanitize_phone();

    validate(&record)?;

    let university = record.university.clone().unwrap_or_default();
    tracing::info!(
        "📨 Submitting lead {} to {}: university={}, course={}",
        submission_id,
        state.config.submission_endpoint,
        university,
        record.course
    );

    match state.submission.submit(&record).await {
        SubmissionOutcome::Success(body) => {
            tracing::info!("✓ Lead {} submitted", submission_id);
            track(&TrackedEvent::SubmitSuccess {
                university,
                course: record.course.clone(),
            });
            Ok(Json(json!({
                "success": true,
                "message": SUBMISSION_SUCCESS_MESSAGE,
                "data": body,
            })))
        }
        SubmissionOutcome::Failure(error) => {
            tracing::error!("❌ Lead {} submission failed: {}", submission_id, error);
            track(&TrackedEvent::SubmitError {
                university,
                error: error.to_string(),
            });
            Err(AppError::SubmissionFailed(error))
        }
    }
}

/// Fills in the metadata the landing page used to attach before posting.
///
/// A `university` supplied by the client is kept; otherwise it is resolved
/// from the page title header. The timestamp is always server time.
pub fn stamp_metadata(record: &mut LeadRecord, headers: &HeaderMap, now: DateTime<Utc>) {
    let supplied = record
        .university
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty());
    if supplied.is_none() {
        let title = header_str(headers, PAGE_TITLE_HEADER).unwrap_or_default();
        record.university = Some(University::from_page_title(&title).name().to_string());
    }

    record.timestamp = Some(now);

    if record.source.as_deref().map_or(true, |s| s.trim().is_empty()) {
        record.source = Some(LANDING_PAGE_SOURCE.to_string());
    }
    if let Some(agent) = header_str(headers, header::USER_AGENT.as_str()) {
        record.user_agent = Some(agent);
    }
    if let Some(referrer) = header_str(headers, header::REFERER.as_str()) {
        record.referrer = Some(referrer);
    }
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

/// GET /api/v1/universities
pub async fn list_universities() -> Json<Value> {
    Json(json!({ "universities": catalog::profiles() }))
}

/// GET /api/v1/universities/:slug/fees
pub async fn university_fees(Path(slug): Path<String>) -> Result<Json<Value>, AppError> {
    let university = parse_slug(&slug)?;
    Ok(Json(fee_table(university)))
}

#[derive(Debug, Deserialize)]
pub struct FeeQuery {
    /// Page path such as `/mit-university.html`.
    pub page: Option<String>,
}

/// GET /api/v1/fees?page=...
///
/// Resolves the fee table from the landing page path; unknown pages get the MIT table.
pub async fn fees_for_page(Query(query): Query<FeeQuery>) -> Json<Value> {
    let university = University::from_page_path(query.page.as_deref().unwrap_or_default());
    Json(fee_table(university))
}

fn fee_table(university: University) -> Value {
    json!({
        "university": university.name(),
        "fees": catalog::fee_schedule(university),
        "note": FEE_NOTE,
    })
}

/// GET /api/v1/universities/:slug/brochure
pub async fn download_brochure(Path(slug): Path<String>) -> Result<impl IntoResponse, AppError> {
    let university = parse_slug(&slug)?;
    let brochure = Brochure::for_university(university.name());
    tracing::info!("Brochure downloaded: {}", brochure.file_name);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", brochure.file_name),
            ),
        ],
        brochure.content,
    ))
}

fn parse_slug(slug: &str) -> Result<University, AppError> {
    University::from_slug(slug)
        .ok_or_else(|| AppError::NotFound(format!("Unknown university: {}", slug)))
}
