//! API Integration Tests

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use leaderboard_api::api::routes::{
    CreateLeaderboardRequest, CreatorInput, EventInput, ReplaceEntriesRequest,
};
use leaderboard_api::RecordId;
use serde_json::Value;
use tower::util::ServiceExt;

mod common;

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn creator(user_id: RecordId, earnings: i64) -> CreatorInput {
    CreatorInput { user_id, earnings }
}

fn event(wager_id: RecordId, earnings: i64) -> EventInput {
    EventInput { wager_id, earnings }
}

fn json_request<T: serde::Serialize>(method: &str, uri: &str, body: &T) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_health_and_request_id() {
    let (app, _) = common::memory_app();

    let response = app.clone().oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_get_defaults_to_current_month() {
    let (app, _) = common::memory_app();

    let (status, json) = send(&app, get("/leaderboard")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["year"], 2024);
    assert_eq!(json["month"], 3);
    assert_eq!(json["top_creators"], serde_json::json!([]));
    assert_eq!(json["top_events"], serde_json::json!([]));
}

#[tokio::test]
async fn test_get_unparsable_params_fall_back() {
    let (app, _) = common::memory_app();

    let (status, json) = send(&app, get("/leaderboard?year=abc&month=")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["year"], 2024);
    assert_eq!(json["month"], 3);
}

#[tokio::test]
async fn test_get_month_out_of_range() {
    let (app, _) = common::memory_app();

    let (status, json) = send(&app, get("/leaderboard?year=2024&month=13")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error_code"], "invalid_argument");
}

#[tokio::test]
async fn test_create_and_read_back_with_masked_names() {
    let (app, backend) = common::memory_app();

    let named = common::id_created_at(1_700_000_000);
    let emailed = common::id_created_at(1_700_000_100);
    let anonymous = common::id_created_at(1_700_000_200);
    let w1 = common::id_created_at(1_700_001_000);
    let w2 = common::id_created_at(1_700_002_000);

    let ivy = common::user(named, "ivy", "ivy@example.com", "https://cdn/ivy.png");
    backend.insert_user(ivy).await;
    backend.insert_user(common::user(emailed, "", "ab@example.com", "")).await;
    // w2 is seeded first; output order must still follow the stored list
    backend.insert_wager(common::wager(w2, "Second wager", named)).await;
    backend.insert_wager(common::wager(w1, "First wager", emailed)).await;

    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/leaderboards",
            &CreateLeaderboardRequest {
                year: 2024,
                month: 2,
                top_creators: vec![
                    creator(named, 900),
                    creator(emailed, 800),
                    creator(anonymous, 700),
                ],
                top_events: vec![event(w1, 60), event(w2, 50)],
            },
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["id"].as_str().is_some());

    let (status, json) = send(&app, get("/leaderboard?year=2024&month=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], created["id"]);

    let creators = json["top_creators"].as_array().unwrap();
    assert_eq!(creators.len(), 3);
    assert_eq!(creators[0]["name"], "ivy");
    assert_eq!(creators[0]["avatar"], "https://cdn/ivy.png");
    assert_eq!(creators[0]["earnings"], 900);
    assert_eq!(creators[1]["name"], "*b@example.com");
    assert_eq!(creators[2]["name"], "1700000200");

    let events = json["top_events"].as_array().unwrap();
    assert_eq!(events[0]["title"], "First wager");
    assert_eq!(events[0]["name"], "*b@example.com");
    assert_eq!(events[1]["title"], "Second wager");
    assert_eq!(events[1]["name"], "ivy");

    for entry in creators.iter().chain(events.iter()) {
        assert!(entry.get("username").is_none());
        assert!(entry.get("email").is_none());
        assert!(entry.get("user_id").is_none());
    }
}

#[tokio::test]
async fn test_replace_entries_flow() {
    let (app, _) = common::memory_app();

    let (_, created) = send(
        &app,
        json_request(
            "POST",
            "/leaderboards",
            &CreateLeaderboardRequest {
                year: 2024,
                month: 1,
                top_creators: vec![creator(common::id_created_at(1), 1)],
                top_events: vec![event(common::id_created_at(2), 2)],
            },
        ),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();

    let replacement = ReplaceEntriesRequest {
        top_creators: vec![creator(common::id_created_at(1_600_000_000), 42)],
        top_events: vec![],
    };

    let uri = format!("/leaderboards/{}/entries", id);
    let (status, _) = send(&app, json_request("PUT", &uri, &replacement)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, json) = send(&app, get("/leaderboard?year=2024&month=1")).await;
    assert_eq!(json["top_creators"].as_array().unwrap().len(), 1);
    assert_eq!(json["top_creators"][0]["earnings"], 42);
    assert_eq!(json["top_creators"][0]["name"], "1600000000");
    assert_eq!(json["top_events"], serde_json::json!([]));

    let unknown = RecordId::generate(common::now());
    let uri = format!("/leaderboards/{}/entries", unknown);
    let (status, json) = send(&app, json_request("PUT", &uri, &replacement)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error_code"], "leaderboard_not_found");

    let uri = format!("/leaderboards/{}/entries", RecordId::nil());
    let (status, json) = send(&app, json_request("PUT", &uri, &replacement)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error_code"], "invalid_argument");
}

#[tokio::test]
async fn test_create_rejects_invalid_month() {
    let (app, _) = common::memory_app();

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/leaderboards",
            &CreateLeaderboardRequest {
                year: 2024,
                month: 0,
                top_creators: vec![],
                top_events: vec![],
            },
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_store_failure_is_500() {
    let (app, backend) = common::memory_app();
    backend.fail_with("replica lag").await;

    let (status, json) = send(&app, get("/leaderboard?year=2024&month=3")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error_code"], "store_unavailable");
    assert!(!json["error"].as_str().unwrap().contains("replica lag"));
}

#[tokio::test]
async fn test_malformed_path_id_uses_error_body() {
    let (app, _) = common::memory_app();

    let (status, json) = send(
        &app,
        json_request(
            "PUT",
            "/leaderboards/not-a-uuid/entries",
            &ReplaceEntriesRequest {
                top_creators: vec![],
                top_events: vec![],
            },
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error_code"], "invalid_request");
    assert!(json["details"].as_str().is_some());
}

#[tokio::test]
async fn test_malformed_body_uses_error_body() {
    let (app, _) = common::memory_app();

    let request = Request::builder()
        .method("POST")
        .uri("/leaderboards")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"year": "soon"}"#))
        .unwrap();
    let (status, json) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error_code"], "invalid_request");
    assert!(json["error"].as_str().unwrap().starts_with("Invalid request"));
}
