use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use todoapp::server::{create_router, AppState};
use todoapp::store::collection::CollectionStore;
use todoapp::store::file::FileStore;
use todoapp::store::mem_collection::MemCollection;
use tower::ServiceExt;

fn file_app() -> (TempDir, Router) {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("data").join("todos.json"));
    (dir, create_router(AppState::new(Box::new(store))))
}

fn collection_app() -> (Arc<CollectionStore<MemCollection>>, Router) {
    let store = Arc::new(CollectionStore::new(MemCollection::new()));
    let app = create_router(AppState::new(Box::new(Arc::clone(&store))));
    (store, app)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header("Content-Type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).expect("request"))
        .await
        .expect("response");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

async fn send_raw(app: &Router, method: &str, uri: &str, raw: &'static str) -> StatusCode {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(raw))
        .expect("request");
    app.clone().oneshot(request).await.expect("response").status()
}

/// The part of the contract both backends share.
async fn check_contract(app: Router) {
    let (status, body) = send(&app, "GET", "/api/todos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    // create
    let (status, milk) = send(&app, "POST", "/api/todos", Some(json!({ "text": "Buy milk" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(milk["text"], "Buy milk");
    assert_eq!(milk["completed"], false);
    assert!(milk["createdAt"].is_string());
    let milk_id = milk["id"].as_str().unwrap().to_string();

    for bad in [json!({ "text": "   " }), json!({ "text": "" }), json!({})] {
        let (status, body) = send(&app, "POST", "/api/todos", Some(bad)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Todo text is required");
    }
    assert_eq!(
        send_raw(&app, "POST", "/api/todos", "{not json").await,
        StatusCode::BAD_REQUEST
    );

    // update
    let uri = format!("/api/todos/{}", milk_id);
    let (status, updated) = send(&app, "PUT", &uri, Some(json!({ "completed": true }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], milk_id.as_str());
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["createdAt"], milk["createdAt"]);

    let (status, body) = send(&app, "PUT", &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Completed status is required");

    let (status, _) = send(&app, "PUT", "/api/todos/", Some(json!({ "completed": true }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // clear
    let (status, walk) = send(&app, "POST", "/api/todos", Some(json!({ "text": "Walk dog" }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "DELETE", "/api/todos", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, list) = send(&app, "GET", "/api/todos", None).await;
    assert_eq!(list, json!([walk.clone()]));

    let (status, _) = send(&app, "DELETE", "/api/todos", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, again) = send(&app, "GET", "/api/todos", None).await;
    assert_eq!(again, list);

    // delete twice
    let uri = format!("/api/todos/{}", walk["id"].as_str().unwrap());
    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Todo not found");

    let (status, _) = send(&app, "DELETE", "/api/todos/", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn file_backend_contract() {
    let (_dir, app) = file_app();
    check_contract(app).await;
}

#[tokio::test]
async fn collection_backend_contract() {
    let (_store, app) = collection_app();
    check_contract(app).await;
}

#[tokio::test]
async fn collection_rejects_malformed_ids() {
    let (_store, app) = collection_app();

    let (status, _) = send(
        &app,
        "PUT",
        "/api/todos/not-a-real-id",
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "DELETE", "/api/todos/undefined", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // well-formed but absent
    let (status, _) = send(
        &app,
        "PUT",
        "/api/todos/0123456789abcdef01234567",
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn file_backend_unknown_id_is_not_found() {
    let (_dir, app) = file_app();
    let (status, body) = send(
        &app,
        "PUT",
        "/api/todos/not-a-real-id",
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Todo not found");
}

#[tokio::test]
async fn file_backend_blank_id_is_bad_request() {
    let (_dir, app) = file_app();
    send(&app, "POST", "/api/todos", Some(json!({ "text": "keep" }))).await;

    let (status, body) = send(&app, "DELETE", "/api/todos/%20", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid todo id"));

    let (status, _) = send(
        &app,
        "PUT",
        "/api/todos/%20%20",
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, "GET", "/api/todos", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn collection_lists_newest_first() {
    let (_store, app) = collection_app();
    for text in ["first", "second"] {
        send(&app, "POST", "/api/todos", Some(json!({ "text": text }))).await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    let (_, list) = send(&app, "GET", "/api/todos", None).await;
    assert_eq!(list[0]["text"], "second");
    assert_eq!(list[1]["text"], "first");
}

#[tokio::test]
async fn storage_failure_is_generic_500() {
    let (store, app) = collection_app();
    store.collection().set_simulate_failure(true);

    let (status, body) = send(&app, "GET", "/api/todos", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch todos" }));

    let (status, body) = send(&app, "POST", "/api/todos", Some(json!({ "text": "x" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to create todo");

    let (status, body) = send(&app, "DELETE", "/api/todos", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to clear completed todos");
}

#[tokio::test]
async fn validation_runs_before_storage() {
    let (store, app) = collection_app();
    store.collection().set_simulate_failure(true);

    let (status, _) = send(&app, "POST", "/api/todos", Some(json!({ "text": " " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn corrupt_data_file_is_500() {
    let (dir, app) = file_app();
    let path = dir.path().join("data").join("todos.json");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{ broken").unwrap();

    let (status, body) = send(&app, "GET", "/api/todos", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch todos");
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let (_store, app) = collection_app();
    let request = Request::builder()
        .method("GET")
        .uri("/api/todos")
        .header("Origin", "http://example.com")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}
