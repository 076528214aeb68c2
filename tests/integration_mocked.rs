/// Integration tests with a mocked lead webhook
/// Exercises the reqwest transport and retry loop without hitting real services
use lead_intake_api::errors::SubmissionError;
use lead_intake_api::models::{LeadRecord, SubmissionOutcome};
use lead_intake_api::submission::{HttpTransport, RetryPolicy, SubmissionService};
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper function to create a fast retry policy for tests
fn test_policy() -> RetryPolicy {
    RetryPolicy {
        timeout: Duration::from_millis(200),
        max_attempts: 3,
        base_delay: Duration::from_millis(20),
    }
}

fn service_for(mock_server: &MockServer, policy: RetryPolicy) -> SubmissionService {
    let transport = HttpTransport::new(format!("{}/hook", mock_server.uri())).unwrap();
    SubmissionService::new(Arc::new(transport), policy)
}

fn sample_lead() -> LeadRecord {
    serde_json::from_value(serde_json::json!({
        "fullName": "Ananya Gupta",
        "email": "ananya@example.com",
        "phone": "9876501234",
        "state": "Delhi",
        "course": "MBA",
        "intake": "Spring 2026",
        "consent": true,
        "university": "MIT University",
        "source": "University Landing Page"
    }))
    .unwrap()
}

#[tokio::test]
async fn test_success_returns_decoded_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(header("content-type", "application/json"))
        .and(header("x-requested-with", "XMLHttpRequest"))
        .and(body_partial_json(serde_json::json!({
            "fullName": "Ananya Gupta",
            "consent": true,
            "university": "MIT University"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = service_for(&mock_server, test_policy())
        .submit(&sample_lead())
        .await;

    match outcome {
        SubmissionOutcome::Success(body) => assert_eq!(body, serde_json::json!({ "ok": true })),
        other => panic!("expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_errors_retry_until_budget_exhausted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let outcome = service_for(&mock_server, test_policy())
        .submit(&sample_lead())
        .await;

    match outcome {
        SubmissionOutcome::Failure(err) => {
            assert_eq!(err.status(), Some(500));
            assert_eq!(
                err.to_string(),
                "HTTP 500: Internal Server Error. Response: Internal Server Error"
            );
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_client_error_makes_exactly_one_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = service_for(&mock_server, test_policy())
        .submit(&sample_lead())
        .await;

    assert!(matches!(
        outcome,
        SubmissionOutcome::Failure(SubmissionError::Client { status: 404, .. })
    ));
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_recovers_after_transient_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "lead-42" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = service_for(&mock_server, test_policy())
        .submit(&sample_lead())
        .await;

    match outcome {
        SubmissionOutcome::Success(body) => assert_eq!(body["id"], "lead-42"),
        other => panic!("expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout_then_success_after_one_backoff() {
    let mock_server = MockServer::start().await;
    let policy = test_policy();

    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "ok": true }))
                .set_delay(Duration::from_secs(2)),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .mount(&mock_server)
        .await;

    let started = Instant::now();
    let outcome = service_for(&mock_server, policy)
        .submit(&sample_lead())
        .await;
    let elapsed = started.elapsed();

    assert!(outcome.is_success());
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
    // one timeout plus one backoff unit, well short of the delayed response
    assert!(elapsed >= policy.timeout + policy.base_delay);
    assert!(elapsed < Duration::from_secs(2));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    // Nothing listens on port 9 (discard) locally
    let transport = HttpTransport::new("http://127.0.0.1:9/hook").unwrap();
    let service = SubmissionService::new(Arc::new(transport), test_policy());

    let outcome = service.submit(&sample_lead()).await;

    match outcome {
        SubmissionOutcome::Failure(err) => assert!(
            matches!(err, SubmissionError::Network(_) | SubmissionError::Timeout),
            "unexpected error: {:?}",
            err
        ),
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_concurrent_submissions_are_independent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .expect(10)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server, test_policy());

    let mut handles = vec![];
    for i in 0..10 {
        let service = service.clone();
        let handle = tokio::spawn(async move {
            let mut lead = sample_lead();
            lead.phone = format!("987650123{}", i);
            service.submit(&lead).await
        });
        handles.push(handle);
    }

    for handle in handles {
        let outcome = handle.await.unwrap();
        assert!(outcome.is_success());
    }
}
