//! Handler tests for the Tasks domain
//!
//! These drive `handlers::router` with `oneshot()` over the in-memory store:
//! - JSON bodies in and out
//! - HTTP status codes per error kind
//! - validation of request bodies

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_tasks::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    handlers::router(TaskService::new(InMemoryTaskRepository::new()))
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create(app: &Router, title: &str, description: &str) -> Task {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "title": title, "description": description }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_task_returns_201() {
    let app = app();
    let task = create(&app, "Buy milk", "2%").await;

    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.description, "2%");
    assert!(!task.completed);
    assert_eq!(task.id.len(), 24);
}

#[tokio::test]
async fn test_create_without_description_omits_it() {
    let response = app()
        .oneshot(json_request("POST", "/", json!({ "title": "Walk dog" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response.into_body()).await;
    assert!(body.get("description").is_none());
    assert_eq!(body["completed"], false);
}

#[tokio::test]
async fn test_create_validates_title() {
    let app = app();

    for body in [
        json!({ "title": "" }),
        json!({ "title": "x".repeat(201) }),
        json!({ "title": "ok", "description": "d".repeat(1001) }),
    ] {
        let response = app.clone().oneshot(json_request("POST", "/", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: Value = json_body(response.into_body()).await;
        assert_eq!(error["error"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_create_missing_title_is_rejected() {
    let response = app()
        .oneshot(json_request("POST", "/", json!({ "description": "2%" })))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_get_task_round_trip() {
    let app = app();
    let created = create(&app, "Buy milk", "2%").await;

    let response = app
        .oneshot(empty_request("GET", &format!("/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let fetched: Task = json_body(response.into_body()).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_malformed_id_is_400() {
    let response = app()
        .oneshot(empty_request("GET", "/not-24-hex-chars"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["error"], "INVALID_ARGUMENT");
    assert_eq!(error["message"], "Invalid task ID");
}

#[tokio::test]
async fn test_get_unknown_id_is_404() {
    let response = app()
        .oneshot(empty_request("GET", "/507f1f77bcf86cd799439011"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["error"], "NOT_FOUND");
    assert_eq!(error["message"], "Task not found");
}

#[tokio::test]
async fn test_list_with_filter() {
    let app = app();
    let first = create(&app, "a", "").await;
    create(&app, "b", "").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", first.id),
            json!({ "completed": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let all: Vec<Task> = json_body(
        app.clone()
            .oneshot(empty_request("GET", "/"))
            .await
            .unwrap()
            .into_body(),
    )
    .await;
    assert_eq!(all.len(), 2);

    let done: Vec<Task> = json_body(
        app.clone()
            .oneshot(empty_request("GET", "/?completed=true"))
            .await
            .unwrap()
            .into_body(),
    )
    .await;
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].id, first.id);

    // an empty value is the same as no filter
    let unfiltered: Vec<Task> = json_body(
        app.clone()
            .oneshot(empty_request("GET", "/?completed="))
            .await
            .unwrap()
            .into_body(),
    )
    .await;
    assert_eq!(unfiltered.len(), 2);
}

#[tokio::test]
async fn test_list_rejects_unrecognised_filter() {
    let app = app();
    create(&app, "Buy milk", "").await;

    for uri in [
        "/?completed=maybe",
        "/?completed=False",
        "/?completed=1",
        "/?completed=0",
        "/?completed=true&completed=false",
    ] {
        let response = app.clone().oneshot(empty_request("GET", uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(response.headers()["content-type"], "application/json");

        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body["code"], 1010, "{uri}");
        assert_eq!(body["error"], "BAD_REQUEST", "{uri}");
    }
}

#[tokio::test]
async fn test_update_empty_body_is_400() {
    let app = app();
    let created = create(&app, "Buy milk", "").await;

    let response = app
        .oneshot(json_request("PUT", &format!("/{}", created.id), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["error"], "INVALID_ARGUMENT");
    assert_eq!(error["message"], "No fields to update");
}

#[tokio::test]
async fn test_update_blank_title_is_validation_error() {
    let app = app();
    let created = create(&app, "Buy milk", "").await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id),
            json!({ "title": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_delete_returns_confirmation_then_404() {
    let app = app();
    let created = create(&app, "Buy milk", "2%").await;
    let uri = format!("/{}", created.id);

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let confirmation: DeleteTaskResponse = json_body(response.into_body()).await;
    assert_eq!(confirmation.message, "Task deleted successfully");
    assert_eq!(confirmation.id, created.id);

    let again = app
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);

    let get = app.oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(get.status(), StatusCode::NOT_FOUND);
}
