//! Event resource client tests against a mock backend

mod helpers;

use assert_matches::assert_matches;
use serde_json::json;
use wiremock::{
    matchers::{body_partial_json, header, method, path, query_param},
    Mock, ResponseTemplate,
};

use geohod::models::{EventFilter, EventPayload, EventStatus, FinishOptions};
use geohod::utils::errors::{DomainConflict, GeoHodError};
use helpers::*;

#[tokio::test]
async fn test_get_event_normalizes_alternate_shapes() {
    let mock = BackendMockServer::new().await;
    mock.mock_event(
        "e1",
        json!({
            "id": 42,
            "title": "Sunset walk",
            "date": "2099-06-01T18:30:00",
            "maxParticipants": 10,
            "participantsCount": 4,
            "author": { "id": "2002", "name": "Oleg", "username": "oleg" }
        }),
    )
    .await;

    let event = mock.event_service().get_event("e1").await.unwrap();

    assert_eq!(event.id, "42");
    assert_eq!(event.name, "Sunset walk");
    assert_eq!(event.participants_count, 4);
    assert_eq!(event.status, EventStatus::Active);
    assert_eq!(event.author.first_name.as_deref(), Some("Oleg"));
    assert_eq!(event.author.tg_username.as_deref(), Some("oleg"));
    assert_eq!(event.date, instant("2099-06-01T18:30:00Z"));
}

#[tokio::test]
async fn test_requests_carry_init_data_header() {
    let mock = BackendMockServer::new().await;
    Mock::given(method("GET"))
        .and(path(BackendMockServer::path("events/e1")))
        .and(header("authorization", TEST_INIT_DATA))
        .respond_with(ResponseTemplate::new(200).set_body_json(event_json(
            "e1",
            "2099-06-01T10:00:00Z",
            "ACTIVE",
            10,
            1,
            2002,
        )))
        .expect(1)
        .mount(&mock.server)
        .await;

    mock.event_service().get_event("e1").await.unwrap();
}

#[tokio::test]
async fn test_list_events_sends_filter_query() {
    let mock = BackendMockServer::new().await;
    Mock::given(method("GET"))
        .and(path(BackendMockServer::path("events")))
        .and(query_param("iamAuthor", "true"))
        .and(query_param("statuses", "ACTIVE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(event_page_json(vec![
            event_json("e1", "2099-06-01T10:00:00Z", "ACTIVE", 10, 1, 1001),
            event_json("e2", "2099-06-02T10:00:00Z", "ACTIVE", 5, 5, 1001),
        ])))
        .expect(1)
        .mount(&mock.server)
        .await;

    let filter = EventFilter::authored().with_statuses(&[EventStatus::Active]);
    let page = mock.event_service().list_events(&filter).await.unwrap();

    assert_eq!(page.content.len(), 2);
    assert_eq!(page.total_elements, 2);
    assert!(page.content[1].is_full());
}

#[tokio::test]
async fn test_participants_accepts_bare_array() {
    let mock = BackendMockServer::new().await;
    Mock::given(method("GET"))
        .and(path(BackendMockServer::path("events/e1/participants")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            user_json(1001, "Anna"),
            user_json(1002, "Boris"),
        ])))
        .mount(&mock.server)
        .await;

    let participants = mock.event_service().get_event_participants("e1").await.unwrap();
    assert_eq!(participants.len(), 2);
    assert_eq!(participants[0].id, "1001");
}

#[tokio::test]
async fn test_create_event_posts_iso_date() {
    let mock = BackendMockServer::new().await;
    Mock::given(method("POST"))
        .and(path(BackendMockServer::path("events")))
        .and(body_partial_json(json!({
            "name": "Kayaking",
            "maxParticipants": 12,
            "date": "2099-06-01T10:00:00.000Z"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "new-1" })))
        .expect(1)
        .mount(&mock.server)
        .await;

    let payload = EventPayload {
        name: "Kayaking".to_string(),
        date: instant("2099-06-01T10:00:00Z"),
        max_participants: 12,
        description: None,
    };
    let id = mock.event_service().create_event(&payload).await.unwrap();
    assert_eq!(id, "new-1");
}

#[tokio::test]
async fn test_missing_event_maps_to_not_found() {
    let mock = BackendMockServer::new().await;
    mock.mock_failure("GET", "events/gone", 404, "Event not found").await;

    let result = mock.event_service().get_event("gone").await;
    assert_matches!(result, Err(GeoHodError::NotFound { .. }));
}

#[tokio::test]
async fn test_full_group_rejection_maps_to_event_full() {
    let mock = BackendMockServer::new().await;
    mock.mock_failure("POST", "events/e1/register", 400, "The group is already full")
        .await;

    let err = mock.event_service().register_for_event("e1").await.unwrap_err();
    assert_matches!(err, GeoHodError::DomainConflict(DomainConflict::EventFull));
    assert_eq!(err.user_message(), "Unfortunately, the group is already full");
}

#[tokio::test]
async fn test_server_error_is_reported_as_server() {
    let mock = BackendMockServer::new().await;
    mock.mock_failure("PATCH", "events/e1/cancel", 500, "boom").await;

    let result = mock.event_service().cancel_event("e1").await;
    assert_matches!(result, Err(GeoHodError::Server { status: 500, .. }));
}

#[tokio::test]
async fn test_finish_requires_donation_text_before_calling() {
    let mock = BackendMockServer::new().await;
    Mock::given(method("POST"))
        .and(path(BackendMockServer::path("events/e1/finish")))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock.server)
        .await;

    let options = FinishOptions {
        send_vote: true,
        send_donation: true,
        donation: Some("   ".to_string()),
    };
    let result = mock.event_service().finish_event("e1", &options).await;
    assert_matches!(result, Err(GeoHodError::Validation(_)));
}

#[tokio::test]
async fn test_remove_participant_path() {
    let mock = BackendMockServer::new().await;
    mock.mock_ok("DELETE", "events/e1/participants/1002").await;

    mock.event_service()
        .remove_event_participant("e1", "1002")
        .await
        .unwrap();
    assert_eq!(mock.count_requests("DELETE", "events/e1/participants/1002").await, 1);
}

#[tokio::test]
async fn test_malformed_event_is_invalid_response() {
    let mock = BackendMockServer::new().await;
    mock.mock_event("e1", json!({ "id": "e1", "date": "2099-06-01T10:00:00Z" }))
        .await;

    let result = mock.event_service().get_event("e1").await;
    assert_matches!(result, Err(GeoHodError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_capacity_wording_on_update_is_not_group_full() {
    let mock = BackendMockServer::new().await;
    mock.mock_failure("PUT", "events/e1", 400, "maximum participants is 100")
        .await;

    let payload = EventPayload {
        name: "Kayaking".to_string(),
        date: instant("2099-06-01T10:00:00Z"),
        max_participants: 150,
        description: None,
    };
    let err = mock.event_service().update_event("e1", &payload).await.unwrap_err();

    assert_matches!(err, GeoHodError::Server { status: 400, .. });
    assert_eq!(err.user_message(), "maximum participants is 100");
}

#[tokio::test]
async fn test_unregister_capacity_wording_is_group_full() {
    let mock = BackendMockServer::new().await;
    mock.mock_failure("DELETE", "events/e1/unregister", 422, "Group is full")
        .await;

    let result = mock.event_service().unregister_from_event("e1").await;
    assert_matches!(result, Err(GeoHodError::DomainConflict(DomainConflict::EventFull)));
}
