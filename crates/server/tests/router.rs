use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use service::storage::memory::MemoryStore;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::routes;
use server::state::ServerState;

async fn app() -> Router {
    let state = ServerState::open(&MemoryStore::new()).await.expect("memory store");
    routes::build_router(state, CorsLayer::very_permissive())
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).expect("request")
}

async fn body_json(res: axum::response::Response) -> Value {
    let bytes = to_bytes(res.into_body(), 64 * 1024).await.expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn put_with_unchanged_values_is_ok() {
    let app = app().await;
    let res = app
        .clone()
        .oneshot(json_request(Method::POST, "/users", json!({"id": "u1", "name": "Ana"})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app
        .clone()
        .oneshot(json_request(Method::PUT, "/users/u1", json!({"name": "Ana"})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await, json!({"message": "User updated successfully"}));
}

#[tokio::test]
async fn put_merges_and_keeps_identifier() {
    let app = app().await;
    app.clone()
        .oneshot(json_request(Method::POST, "/dishes", json!({"id": "d1", "name": "Soup", "price": 3})))
        .await
        .unwrap();
    let res = app
        .clone()
        .oneshot(json_request(Method::PUT, "/dishes/d1", json!({"id": "d2", "price": 5})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.clone().oneshot(empty_request(Method::GET, "/dishes/d1")).await.unwrap();
    assert_eq!(body_json(res).await, json!({"id": "d1", "name": "Soup", "price": 5}));
    let res = app.oneshot(empty_request(Method::GET, "/dishes/d2")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_returns_array() {
    let app = app().await;
    let res = app.clone().oneshot(empty_request(Method::GET, "/dishes")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await, json!([]));
}

#[tokio::test]
async fn unknown_collection_is_404() {
    let res = app().await.oneshot(empty_request(Method::GET, "/orders")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn metrics_count_resource_outcomes() {
    let app = app().await;
    app.clone().oneshot(empty_request(Method::GET, "/users/missing")).await.unwrap();
    let res = app.oneshot(empty_request(Method::GET, "/metrics")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = to_bytes(res.into_body(), 1024 * 1024).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("resource_requests_total"));
    assert!(text.contains("resource=\"users\""));
}

#[tokio::test]
async fn array_body_is_rejected_with_json_error() {
    let app = app().await;
    let res = app
        .clone()
        .oneshot(json_request(Method::POST, "/users", json!(["not", "a", "record"])))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(res).await, json!({"error": "record must be a JSON object, got array"}));

    let res = app
        .oneshot(json_request(Method::PUT, "/dishes/d1", json!("price")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(res).await, json!({"error": "record must be a JSON object, got string"}));
}

#[tokio::test]
async fn missing_content_type_is_415_with_json_error() {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/dishes")
        .body(Body::from(json!({"id": "d1"}).to_string()))
        .expect("request");
    let res = app().await.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body = body_json(res).await;
    assert!(body["error"].as_str().is_some_and(|msg| !msg.is_empty()));
}
