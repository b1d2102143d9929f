//! Shared fixtures for the wiremock-backed integration tests.

#![allow(dead_code)]

use freshdesk::{Config, FreshdeskClient};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test_api_key";

/// `Basic base64("test_api_key:X")`.
pub const TEST_AUTH_HEADER: &str = "Basic dGVzdF9hcGlfa2V5Olg=";

/// Starts a mock server and a client pointed at it.
pub async fn setup() -> (MockServer, FreshdeskClient) {
    let server = MockServer::start().await;
    let client = client_for(&server, |config| config);
    (server, client)
}

/// Builds a client for `server`, letting the test adjust the config first.
pub fn client_for(server: &MockServer, adjust: impl FnOnce(Config) -> Config) -> FreshdeskClient {
    let config = Config::new(server.uri(), TEST_API_KEY).expect("valid test config");
    FreshdeskClient::new(&adjust(config)).expect("client builds")
}

pub fn ticket_json(id: i64) -> Value {
    json!({
        "id": id,
        "subject": format!("Ticket {}", id),
        "status": 2,
        "priority": 1,
        "source": 2,
        "requester_id": 1000 + id,
        "created_at": "2024-03-01T10:00:00Z",
        "updated_at": "2024-03-01T10:05:00Z"
    })
}

pub fn contact_json(id: i64) -> Value {
    json!({
        "id": id,
        "name": format!("Contact {}", id),
        "email": format!("contact{}@example.com", id),
        "active": true
    })
}

pub fn agent_json(id: i64) -> Value {
    json!({
        "id": id,
        "available": true,
        "occasional": false,
        "contact": { "name": "Jane Agent", "email": "jane@example.com" }
    })
}

/// A `Link` header pointing at `path_and_query` on the mock server.
pub fn next_link(server: &MockServer, path_and_query: &str) -> String {
    format!("<{}{}>; rel=\"next\"", server.uri(), path_and_query)
}
