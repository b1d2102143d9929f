//! Endpoint wiring for the resource APIs.

mod common;

use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use common::{contact_json, setup, ticket_json};
use freshdesk::models::{
    ContactRequest, MergeContactsRequest, NoteRequest, ReplyRequest, SatisfactionRatingFilter,
    SatisfactionRatingRequest, TicketInclude, TimeEntryRequest,
};
use freshdesk::{Attachment, FreshdeskError};

#[tokio::test]
async fn test_ticket_get_with_includes() {
    let (server, client) = setup().await;

    let mut body = ticket_json(12);
    body["requester"] = json!({ "id": 1012, "name": "Jane", "email": "jane@example.com" });
    body["stats"] = json!({ "resolved_at": null, "first_responded_at": "2024-03-01T11:00:00Z" });

    Mock::given(method("GET"))
        .and(path("/api/v2/tickets/12"))
        .and(query_param("include", "requester,stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let ticket = client
        .tickets()
        .get(12, &[TicketInclude::Requester, TicketInclude::Stats])
        .await
        .unwrap();

    assert_eq!(ticket.id, 12);
    assert!(ticket.requester.is_some());
    assert!(ticket.stats.is_some());
}

#[tokio::test]
async fn test_reply_and_private_note() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/tickets/5/reply"))
        .and(body_partial_json(json!({ "body": "On it" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 501, "body": "On it", "ticket_id": 5, "private": false, "incoming": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v2/tickets/5/notes"))
        .and(body_partial_json(json!({ "body": "Escalated", "private": true })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 502, "body": "Escalated", "ticket_id": 5, "private": true, "source": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let conversations = client.conversations();
    let reply = conversations
        .create_reply(5, &ReplyRequest::new("On it"))
        .await
        .unwrap();
    let note = conversations
        .create_note(5, &NoteRequest::private("Escalated"))
        .await
        .unwrap();

    assert_eq!(reply.id, 501);
    assert!(!reply.is_private_note());
    assert!(note.is_private_note());
}

#[tokio::test]
async fn test_contact_avatar_is_uploaded_as_avatar_field() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/contacts"))
        .respond_with(ResponseTemplate::new(201).set_body_json(contact_json(77)))
        .expect(1)
        .mount(&server)
        .await;

    let request = ContactRequest::with_email("Jane Doe", "jane@example.com")
        .avatar(Attachment::new("jane.png", vec![0x89, b'P', b'N', b'G']).with_content_type("image/png"));

    let contact = client.contacts().create(&request).await.unwrap();
    assert_eq!(contact.id, 77);

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"avatar\""));
    assert!(body.contains("filename=\"jane.png\""));
    assert!(body.contains("name=\"email\""));
}

#[tokio::test]
async fn test_contact_hard_delete_and_merge() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v2/contacts/8/hard_delete"))
        .and(query_param("force", "true"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v2/contacts/merge"))
        .and(body_json(json!({ "primary_contact_id": 1, "secondary_contact_ids": [2, 3] })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let contacts = client.contacts();
    contacts.hard_delete(8).await.unwrap();
    contacts
        .merge(&MergeContactsRequest::new(1, vec![2, 3]))
        .await
        .unwrap();

    assert!(matches!(
        contacts.merge(&MergeContactsRequest::new(1, Vec::new())).await,
        Err(FreshdeskError::Validation(_))
    ));
}

#[tokio::test]
async fn test_company_autocomplete() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/companies/autocomplete"))
        .and(query_param("name", "Acme Co"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "companies": [{ "id": 3, "name": "Acme Corp" }, { "id": 4, "name": "Acme Co-op" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let matches = client.companies().autocomplete("Acme Co").await.unwrap();
    let names: Vec<&str> = matches.iter().map(|c| c.display_name()).collect();
    assert_eq!(names, vec!["Acme Corp", "Acme Co-op"]);
}

#[tokio::test]
async fn test_time_entry_is_logged_as_hours_and_minutes() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/tickets/5/time_entries"))
        .and(body_partial_json(json!({ "time_spent": "01:30", "note": "Onsite" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 900, "ticket_id": 5, "time_spent": "01:30", "timer_running": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let entry = client
        .time_entries()
        .create(5, &TimeEntryRequest::minutes(90).note("Onsite"))
        .await
        .unwrap();

    assert_eq!(entry.minutes_spent(), Some(90));
}

#[tokio::test]
async fn test_satisfaction_ratings() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/surveys/satisfaction_ratings"))
        .and(query_param("user_id", "15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1, "ticket_id": 5, "user_id": 15, "ratings": { "default_question": 103 }
        }])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v2/tickets/5/satisfaction_ratings"))
        .and(body_partial_json(json!({ "ratings": { "default_question": 103 } })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 2, "ticket_id": 5, "ratings": { "default_question": 103 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let filter = SatisfactionRatingFilter {
        user_id: Some(15),
        ..Default::default()
    };
    let ratings: Vec<_> = client
        .satisfaction_ratings()
        .list(&filter)
        .try_collect()
        .await
        .unwrap();
    assert_eq!(ratings.len(), 1);
    assert_eq!(ratings[0].overall(), Some(103));

    let created = client
        .satisfaction_ratings()
        .create(5, &SatisfactionRatingRequest::overall(103))
        .await
        .unwrap();
    assert_eq!(created.id, 2);
}

#[tokio::test]
async fn test_solution_search_and_canned_responses() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/search/solutions"))
        .and(query_param("term", "reset password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 31, "title": "Resetting your password", "status": 2, "folder_id": 4 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/canned_response_folders/6/responses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 61, "title": "Greeting", "content_html": "<p>Hi</p>", "folder_id": 6 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let articles = client.solutions().search_articles("reset password").await.unwrap();
    assert_eq!(articles.len(), 1);
    assert!(articles[0].is_published());

    let responses = client.canned_responses().list_in_folder(6).await.unwrap();
    assert_eq!(responses[0].id, 61);
}

#[tokio::test]
async fn test_custom_object_schemas() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/custom_objects/schemas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "schemas": [{
                "id": 7,
                "name": "books",
                "title": "Books",
                "fields": [{ "id": "f1", "name": "title", "label": "Title", "type": "TEXT", "required": true }],
                "created_time": 1709287200000i64
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let schemas = client.custom_objects().list_schemas().await.unwrap();
    assert_eq!(schemas.len(), 1);
    assert_eq!(schemas[0].id, "7");
    assert!(schemas[0].field("title").is_some());
    assert!(schemas[0].created_at().is_some());
}
