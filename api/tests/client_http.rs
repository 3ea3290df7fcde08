//! HTTP-level tests for the API client, against a mock backend.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use donelist_api::{ApiClient, ApiError, CreateTodo, LoginRequest};
use donelist_core::environment::{AUTH_TOKEN_KEY, Storage, USER_KEY};
use donelist_testing::mocks::MemoryStorage;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn todo_json(id: &str, title: &str, completed: bool) -> serde_json::Value {
    json!({
        "id": id,
        "user_id": "u1",
        "title": title,
        "description": "",
        "completed": completed,
        "created_at": "2025-03-01T10:00:00Z",
        "updated_at": "2025-03-01T10:00:00Z"
    })
}

fn client_with(server: &MockServer, storage: Arc<MemoryStorage>) -> ApiClient {
    ApiClient::new(server.uri(), storage).expect("client should build")
}

#[tokio::test]
async fn bearer_header_is_attached_from_storage() {
    let server = MockServer::start().await;
    let storage = Arc::new(MemoryStorage::new());
    storage.set(AUTH_TOKEN_KEY, "tok");

    Mock::given(method("GET"))
        .and(path("/todos"))
        .and(header("Authorization", "Bearer tok"))
        .and(query_param("skip", "0"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "ok",
            "data": [todo_json("t1", "Buy milk", false)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(&server, storage);
    let todos = client.list_todos(0, 100).await.unwrap();

    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].id, "t1");
}

#[tokio::test]
async fn no_bearer_header_without_stored_token() {
    let server = MockServer::start().await;
    let storage = Arc::new(MemoryStorage::new());

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "ok",
            "data": {
                "id": "1",
                "name": "Ada",
                "email": "a@b.com",
                "is_active": true,
                "created_at": "2025-03-01T10:00:00Z",
                "updated_at": "2025-03-01T10:00:00Z"
            }
        })))
        .mount(&server)
        .await;

    let client = client_with(&server, storage);
    client.me().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn unauthorized_clears_session_and_signals() {
    let server = MockServer::start().await;
    let storage = Arc::new(MemoryStorage::new());
    storage.set(AUTH_TOKEN_KEY, "stale");
    storage.set(USER_KEY, "{}");

    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Token expired",
            "error": "AUTH"
        })))
        .mount(&server)
        .await;

    let client = client_with(&server, Arc::clone(&storage));
    let mut invalidations = client.subscribe_invalidations();

    let err = client.list_todos(0, 100).await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { ref message } if message == "Token expired"));

    // Session side effect: both keys gone, one signal published
    assert!(storage.get(AUTH_TOKEN_KEY).is_none());
    assert!(storage.get(USER_KEY).is_none());
    invalidations.try_recv().unwrap();
    assert!(invalidations.try_recv().is_err());
}

#[tokio::test]
async fn failed_envelope_maps_to_backend_error() {
    let server = MockServer::start().await;
    let storage = Arc::new(MemoryStorage::new());

    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Email already registered"
        })))
        .mount(&server)
        .await;

    let client = client_with(&server, storage);
    let err = client
        .signup(&donelist_api::SignupRequest {
            name: "Ada".to_string(),
            email: "a@b.com".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap_err();

    assert!(
        matches!(err, ApiError::Backend { ref message } if message == "Email already registered")
    );
}

#[tokio::test]
async fn login_decodes_the_session_payload() {
    let server = MockServer::start().await;
    let storage = Arc::new(MemoryStorage::new());

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Login successful",
            "data": {
                "user": {
                    "id": "1",
                    "name": "Ada",
                    "email": "a@b.com",
                    "is_active": true,
                    "created_at": "2025-03-01T10:00:00Z",
                    "updated_at": "2025-03-01T10:00:00Z"
                },
                "token": {
                    "access_token": "tok",
                    "token_type": "bearer",
                    "expires_in": 3600
                }
            }
        })))
        .mount(&server)
        .await;

    let client = client_with(&server, storage);
    let session = client
        .login(&LoginRequest {
            email: "a@b.com".to_string(),
            password: "x".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(session.user.id, "1");
    assert_eq!(session.token.access_token, "tok");
}

#[tokio::test]
async fn delete_succeeds_without_payload() {
    let server = MockServer::start().await;
    let storage = Arc::new(MemoryStorage::new());

    Mock::given(method("DELETE"))
        .and(path("/todos/t2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Todo deleted"
        })))
        .mount(&server)
        .await;

    let client = client_with(&server, storage);
    client.delete_todo("t2").await.unwrap();
}

#[tokio::test]
async fn get_todo_fetches_a_single_record() {
    let server = MockServer::start().await;
    let storage = Arc::new(MemoryStorage::new());

    Mock::given(method("GET"))
        .and(path("/todos/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "ok",
            "data": todo_json("t1", "Buy milk", false)
        })))
        .mount(&server)
        .await;

    let client = client_with(&server, storage);
    let todo = client.get_todo("t1").await.unwrap();
    assert_eq!(todo.title, "Buy milk");
}

#[tokio::test]
async fn toggle_returns_the_updated_todo() {
    let server = MockServer::start().await;
    let storage = Arc::new(MemoryStorage::new());

    Mock::given(method("PATCH"))
        .and(path("/todos/t1/toggle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "ok",
            "data": todo_json("t1", "Buy milk", true)
        })))
        .mount(&server)
        .await;

    let client = client_with(&server, storage);
    let todo = client.toggle_todo("t1").await.unwrap();
    assert!(todo.completed);
}

#[tokio::test]
async fn create_posts_only_provided_fields() {
    let server = MockServer::start().await;
    let storage = Arc::new(MemoryStorage::new());

    Mock::given(method("POST"))
        .and(path("/todos"))
        .and(wiremock::matchers::body_json(json!({"title": "A"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "ok",
            "data": todo_json("t3", "A", false)
        })))
        .mount(&server)
        .await;

    let client = client_with(&server, storage);
    let todo = client
        .create_todo(&CreateTodo {
            title: Some("A".to_string()),
            description: None,
        })
        .await
        .unwrap();

    assert_eq!(todo.id, "t3");
}
