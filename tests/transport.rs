//! Request execution: auth, bodies, error mapping, rate limits and cancellation.

mod common;

use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use common::{agent_json, client_for, setup, ticket_json, TEST_API_KEY, TEST_AUTH_HEADER};
use freshdesk::models::{CreateTicketRequest, TicketPriority, TicketStatus, UpdateTicketRequest};
use freshdesk::{Attachment, CancellationToken, FreshdeskError, RateLimit};

#[tokio::test]
async fn test_requests_carry_basic_auth() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/tickets/1"))
        .and(header("authorization", TEST_AUTH_HEADER))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ticket_json(1)))
        .expect(1)
        .mount(&server)
        .await;

    let ticket = assert_ok!(client.tickets().get(1, &[]).await);
    assert_eq!(ticket.id, 1);
    assert_eq!(ticket.status, Some(TicketStatus::Open));
}

#[tokio::test]
async fn test_status_codes_map_to_error_variants() {
    let (server, client) = setup().await;

    for code in [400u16, 401, 403, 404, 409, 500] {
        Mock::given(method("GET"))
            .and(path(format!("/api/v2/tickets/{}", code)))
            .respond_with(ResponseTemplate::new(code).set_body_json(json!({
                "description": "Validation failed",
                "errors": [{ "field": "email", "message": "It should be a valid email address", "code": "invalid_value" }]
            })))
            .mount(&server)
            .await;
    }

    let tickets = client.tickets();
    let err = tickets.get(400, &[]).await.unwrap_err();
    match &err {
        FreshdeskError::InvalidRequest(response) => {
            assert_eq!(response.status, StatusCode::BAD_REQUEST);
            assert_eq!(response.field_errors().len(), 1);
            assert_eq!(response.field_errors()[0].field.as_deref(), Some("email"));
        }
        other => panic!("expected InvalidRequest, got {:?}", other),
    }

    assert!(matches!(
        tickets.get(401, &[]).await,
        Err(FreshdeskError::Authentication(_))
    ));
    assert!(matches!(
        tickets.get(403, &[]).await,
        Err(FreshdeskError::Authorization(_))
    ));

    let not_found = tickets.get(404, &[]).await.unwrap_err();
    assert!(not_found.is_not_found());

    assert!(matches!(
        tickets.get(409, &[]).await,
        Err(FreshdeskError::Conflict(_))
    ));

    let server_error = tickets.get(500, &[]).await.unwrap_err();
    assert!(matches!(server_error, FreshdeskError::Api(_)));
    assert_eq!(server_error.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
}

#[tokio::test]
async fn test_error_messages_never_contain_api_key() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/tickets/7"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(format!("bad key {}", TEST_API_KEY)),
        )
        .mount(&server)
        .await;

    let err = client.tickets().get(7, &[]).await.unwrap_err();
    assert!(!err.to_string().contains(TEST_API_KEY));
}

#[tokio::test]
async fn test_rate_limited_request_waits_for_retry_after() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/tickets/1"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "1"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/tickets/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ticket_json(1)))
        .expect(1)
        .mount(&server)
        .await;

    let started = Instant::now();
    let ticket = client.tickets().get(1, &[]).await.unwrap();

    assert_eq!(ticket.id, 1);
    assert!(started.elapsed() >= Duration::from_secs(1));
}

#[tokio::test]
async fn test_rate_limit_without_retry_after_fails_immediately() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/tickets/1"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let err = assert_err!(client.tickets().get(1, &[]).await);
    assert!(matches!(err, FreshdeskError::Api(_)));
    assert!(err.is_rate_limit());
}

#[tokio::test]
async fn test_rate_limit_retries_respect_cap() {
    let server = wiremock::MockServer::start().await;
    let client = client_for(&server, |config| config.with_max_rate_limit_retries(2));

    Mock::given(method("GET"))
        .and(path("/api/v2/tickets/1"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .expect(3)
        .mount(&server)
        .await;

    let err = assert_err!(client.tickets().get(1, &[]).await);
    assert!(err.is_rate_limit());
}

#[tokio::test]
async fn test_rate_limit_counters_are_recorded() {
    let (server, client) = setup().await;

    assert_eq!(client.rate_limit(), RateLimit::default());

    Mock::given(method("GET"))
        .and(path("/api/v2/tickets/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ticket_json(1))
                .insert_header("x-ratelimit-total", "700")
                .insert_header("x-ratelimit-remaining", "698")
                .insert_header("x-ratelimit-used-currentrequest", "2"),
        )
        .mount(&server)
        .await;

    client.tickets().get(1, &[]).await.unwrap();

    let clone = client.clone();
    assert_eq!(
        clone.rate_limit(),
        RateLimit {
            total: Some(700),
            remaining: Some(698),
            used_by_last_request: Some(2),
        }
    );
}

#[tokio::test]
async fn test_body_without_attachments_is_json() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/v2/tickets/5"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "status": 4, "priority": 3 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ticket_json(5)))
        .expect(1)
        .mount(&server)
        .await;

    let request = UpdateTicketRequest::new()
        .status(TicketStatus::Resolved)
        .priority(TicketPriority::High);
    client.tickets().update(5, &request).await.unwrap();
}

#[tokio::test]
async fn test_body_with_attachments_is_multipart() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/tickets"))
        .respond_with(ResponseTemplate::new(201).set_body_json(ticket_json(9)))
        .expect(1)
        .mount(&server)
        .await;

    let request = CreateTicketRequest::new("jane@example.com", "Printer", "It is on fire")
        .with_priority(TicketPriority::Urgent)
        .with_attachment(Attachment::new("log.txt", b"smoke detected".to_vec()).with_content_type("text/plain"));

    let ticket = client.tickets().create(&request).await.unwrap();
    assert_eq!(ticket.id, 9);

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"), "{}", content_type);

    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"subject\""));
    assert!(body.contains("Printer"));
    assert!(body.contains("name=\"priority\""));
    assert!(body.contains("attachments[]"));
    assert!(body.contains("filename=\"log.txt\""));
    assert!(body.contains("smoke detected"));
}

#[tokio::test]
async fn test_delete_accepts_empty_response() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v2/tickets/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert_ok!(client.tickets().delete(3).await);
}

#[tokio::test]
async fn test_invalid_input_fails_before_any_request() {
    let (server, client) = setup().await;

    assert!(matches!(
        client.tickets().get(0, &[]).await,
        Err(FreshdeskError::Validation(_))
    ));
    assert!(matches!(
        client.tickets().update(1, &UpdateTicketRequest::new()).await,
        Err(FreshdeskError::Validation(_))
    ));
    assert!(matches!(
        client.custom_objects().get_schema("  ").await,
        Err(FreshdeskError::Validation(_))
    ));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cancelled_client_sends_nothing() {
    let (server, client) = setup().await;

    let token = CancellationToken::new();
    token.cancel();

    let result = client.with_cancellation(token).tickets().get(1, &[]).await;
    assert!(matches!(result, Err(FreshdeskError::Cancelled)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cancellation_interrupts_retry_wait() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/tickets/1"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    let client = client.with_cancellation(token.clone());

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        token.cancel();
    });

    let started = Instant::now();
    let result = client.tickets().get(1, &[]).await;

    assert!(matches!(result, Err(FreshdeskError::Cancelled)));
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn test_connection_check() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/agents/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(agent_json(42)))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    client.test_connection().await.unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v2/agents/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client.test_connection().await.unwrap_err();
    assert!(matches!(err, FreshdeskError::ConnectionTest { .. }));
}
