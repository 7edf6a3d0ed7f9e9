use axum::body::{Body, to_bytes};
use axum::http;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::common::mock_app::MockApp;

mod common;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_ingest_reading_appends_one_row() {
    let app = MockApp::new().await;

    let req_body = json!({"temperature": 22.5, "humidity": 40.0}).to_string();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method(http::Method::POST)
                .uri("/data/")
                .header("Content-Type", "application/json")
                .body(Body::from(req_body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "success"}));
    assert_eq!(app.reading_count().await, 1);
}

#[tokio::test]
async fn test_ingest_reading_with_air_quality() {
    let app = MockApp::new().await;

    let req_body = json!({"temperature": 22.5, "humidity": 40.0, "airQuality": 87.0}).to_string();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method(http::Method::POST)
                .uri("/data/")
                .header("Content-Type", "application/json")
                .body(Body::from(req_body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let latest = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/latest/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_json(latest).await;

    assert_eq!(body["airQuality"], json!(87.0));
}

#[tokio::test]
async fn test_ingest_missing_temperature_is_rejected() {
    let app = MockApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method(http::Method::POST)
                .uri("/data/")
                .header("Content-Type", "application/json")
                .body(Body::from(json!({"humidity": 40.0}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(app.reading_count().await, 0);
}

#[tokio::test]
async fn test_ingest_non_json_content_type_is_rejected() {
    let app = MockApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method(http::Method::POST)
                .uri("/data/")
                .header("Content-Type", "text/plain")
                .body(Body::from("temperature=22.5"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.reading_count().await, 0);
}

#[tokio::test]
async fn test_ingest_malformed_json_is_rejected() {
    let app = MockApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method(http::Method::POST)
                .uri("/data/")
                .header("Content-Type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.reading_count().await, 0);
}

#[tokio::test]
async fn test_ingest_rejects_other_methods() {
    let app = MockApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/data/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_get_all_data_on_empty_store() {
    let app = MockApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/get_all_data/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_get_all_data_returns_newest_window_ascending() {
    let app = MockApp::new().await;

    for i in 0..60 {
        app.insert_reading(i as f64, 40.0, None).await;
    }

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/get_all_data/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let points = body_json(response).await;
    let points = points.as_array().unwrap();

    // The 50 newest readings, oldest first.
    assert_eq!(points.len(), 50);
    assert_eq!(points[0]["temperature"], json!(10.0));
    assert_eq!(points[49]["temperature"], json!(59.0));
}

#[tokio::test]
async fn test_get_all_data_point_shape() {
    let app = MockApp::new().await;
    app.insert_reading(22.5, 40.0, None).await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/get_all_data/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let points = body_json(response).await;
    let point = &points.as_array().unwrap()[0];

    // HH:MM:SS
    let timestamp = point["timestamp"].as_str().unwrap();
    assert_eq!(timestamp.len(), 8);
    assert_eq!(timestamp.as_bytes()[2], b':');
    assert_eq!(timestamp.as_bytes()[5], b':');

    assert_eq!(point["temperature"], json!(22.5));
    assert_eq!(point["humidity"], json!(40.0));
    assert_eq!(point["airQuality"], Value::Null);
}

#[tokio::test]
async fn test_latest_reading_returns_newest() {
    let app = MockApp::new().await;
    app.insert_reading(20.0, 40.0, None).await;
    app.insert_reading(25.0, 45.0, Some(12.0)).await;

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/latest/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["temperature"], json!(25.0));
    assert_eq!(body["humidity"], json!(45.0));
}

#[tokio::test]
async fn test_latest_reading_on_empty_store() {
    let app = MockApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/latest/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "No data yet");
}
