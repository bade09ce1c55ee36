//! Integration tests for the HTTP API.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. This validates handler logic and routing
//! without needing a live network connection.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use switchboard_service::{
    AppState, CompanionClient, Resolvers, StubCompanionClient, build_router, package_info,
};
use switchboard_types::{PersonDraft, PersonFields};
use tower::ServiceExt;

fn make_state() -> Arc<AppState> {
    Arc::new(AppState::new(Resolvers::new(
        package_info(),
        "io.switchboard.test",
    )))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(path: &str, json: &Value) -> Request<Body> {
    Request::post(path)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_info() {
    let router = build_router(make_state());

    let response = router
        .oneshot(Request::get("/info").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["name"], "switchboard-service");
    assert_eq!(
        json["id"],
        format!("switchboard-service:{}", env!("CARGO_PKG_VERSION"))
    );
}

#[tokio::test]
async fn test_add_person_then_get() {
    let state = make_state();

    let response = build_router(Arc::clone(&state))
        .oneshot(post_json("/api/people", &serde_json::json!({"name": "Ann", "age": 41})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_to_json(response.into_body()).await["id"]
        .as_str()
        .unwrap()
        .to_owned();
    assert!(!id.is_empty());

    let response = build_router(state)
        .oneshot(
            Request::get(format!("/api/people/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json, serde_json::json!({"id": id, "name": "Ann", "age": 41}));
}

#[tokio::test]
async fn test_add_person_keeps_caller_id() {
    let router = build_router(make_state());

    let response = router
        .oneshot(post_json("/api/people", &serde_json::json!({"id": "p-9", "name": "Cy"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["id"], "p-9");
}

#[tokio::test]
async fn test_add_person_notifies_subscribers() {
    let state = make_state();
    let mut sub = state.resolvers.person_added().unwrap();

    let response = build_router(Arc::clone(&state))
        .oneshot(post_json("/api/people", &serde_json::json!({"name": "Di"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let event = sub.recv().await.unwrap();
    assert_eq!(event.payload().fields.name(), Some("Di"));
}

#[tokio::test]
async fn test_list_people() {
    let state = make_state();
    for name in ["a", "b"] {
        state
            .resolvers
            .add_person(PersonDraft::with_id(name, PersonFields::named(name)))
            .await;
    }

    let response = build_router(state)
        .oneshot(Request::get("/api/people").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"], 2);
    assert_eq!(json["people"][0]["id"], "a");
    assert_eq!(json["people"][1]["name"], "b");
}

#[tokio::test]
async fn test_get_person_missing_is_null() {
    let router = build_router(make_state());

    let response = router
        .oneshot(Request::get("/api/people/nobody").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert!(json.is_null());
}

#[tokio::test]
async fn test_add_person_rejects_non_object_body() {
    let router = build_router(make_state());

    let response = router
        .oneshot(post_json("/api/people", &serde_json::json!([1, 2, 3])))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_companion_info_without_client() {
    let router = build_router(make_state());

    let response = router
        .oneshot(Request::get("/api/companion/info").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert!(json["id"].is_null());
}

#[tokio::test]
async fn test_companion_failure_is_bad_gateway() {
    let resolvers = Resolvers::new(package_info(), "io.switchboard.test").with_client(Some(
        CompanionClient::Stub(StubCompanionClient::failing("timeout")),
    ));
    let router = build_router(Arc::new(AppState::new(resolvers)));

    let response = router
        .oneshot(Request::get("/api/companion/info").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], 502);
    assert_eq!(json["error"], "companion service request failed");
}

#[tokio::test]
async fn test_websocket_route_requires_upgrade() {
    let router = build_router(make_state());

    let response = router
        .oneshot(Request::get("/ws/person-added").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_add_person_accepts_any_name_type() {
    let state = make_state();

    let response = build_router(Arc::clone(&state))
        .oneshot(post_json("/api/people", &serde_json::json!({"id": "n", "name": 42})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = build_router(state)
        .oneshot(Request::get("/api/people/n").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json, serde_json::json!({"id": "n", "name": 42}));
}

#[tokio::test]
async fn test_null_name_reads_back_unchanged() {
    let state = make_state();
    let input = serde_json::json!({"id": "x", "name": null});

    let response = build_router(Arc::clone(&state))
        .oneshot(post_json("/api/people", &input))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = build_router(state)
        .oneshot(Request::get("/api/people/x").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json, input);
}
