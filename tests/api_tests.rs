//! End-to-end tests for the HTTP surface: auth, task CRUD, filtering,
//! pagination, and cross-user isolation.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use taskarr::config::Config;
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let db_path = std::env::temp_dir().join(format!("taskarr-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    // Cheap Argon2 params to keep tests fast
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;

    let state = taskarr::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    taskarr::api::router(state)
}

async fn send_json(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn register(app: &Router, username: &str, email: &str, password: &str) -> String {
    let (status, body) = send_json(
        app,
        "POST",
        "/users/register",
        None,
        json!({ "username": username, "email": email, "password": password }),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "registration failed: {body}");
    assert_eq!(body["message"], "User registered successfully.");
    let token = body["data"].as_str().expect("token in registration response");
    assert!(!token.is_empty());
    token.to_string()
}

#[tokio::test]
async fn register_login_roundtrip() {
    let app = spawn_app().await;
    register(&app, "alice", "a@x.com", "Pw1234!").await;

    // Login by username
    let (status, body) = send_json(
        &app,
        "POST",
        "/users/login",
        None,
        json!({ "identifier": "alice", "password": "Pw1234!" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Authenticating...");
    assert!(!body["data"].as_str().unwrap().is_empty());

    // Login by email
    let (status, body) = send_json(
        &app,
        "POST",
        "/users/login",
        None,
        json!({ "identifier": "a@x.com", "password": "Pw1234!" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["data"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let app = spawn_app().await;
    register(&app, "alice", "a@x.com", "Pw1234!").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/users/register",
        None,
        json!({ "username": "alice", "email": "other@x.com", "password": "Pw1234!" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username already exists.");
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn registration_requires_username_then_email() {
    let app = spawn_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/users/register",
        None,
        json!({ "username": "", "email": "", "password": "Pw1234!" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    // Username is checked before email when both are missing
    assert_eq!(body["message"], "Username is required.");

    let (status, body) = send_json(
        &app,
        "POST",
        "/users/register",
        None,
        json!({ "username": "bob", "email": "", "password": "Pw1234!" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email is required.");
}

#[tokio::test]
async fn invalid_credentials_are_indistinguishable() {
    let app = spawn_app().await;
    register(&app, "alice", "a@x.com", "Pw1234!").await;

    let (status_wrong, body_wrong) = send_json(
        &app,
        "POST",
        "/users/login",
        None,
        json!({ "identifier": "alice", "password": "nope" }),
    )
    .await;

    let (status_unknown, body_unknown) = send_json(
        &app,
        "POST",
        "/users/login",
        None,
        json!({ "identifier": "mallory", "password": "nope" }),
    )
    .await;

    assert_eq!(status_wrong, StatusCode::BAD_REQUEST);
    assert_eq!(status_unknown, StatusCode::BAD_REQUEST);
    assert_eq!(body_wrong["message"], "Invalid username or password.");
    assert_eq!(body_wrong["message"], body_unknown["message"]);
}

#[tokio::test]
async fn task_routes_require_a_valid_token() {
    let app = spawn_app().await;

    let (status, _) = send(&app, "GET", "/tasks", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/tasks", Some("not-a-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_task_validates_status_strictly() {
    let app = spawn_app().await;
    let token = register(&app, "alice", "a@x.com", "Pw1234!").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/tasks",
        Some(&token),
        json!({ "title": "Write report", "status": "bogus" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Invalid status value. Allowed values: Pending, InProgress, Completed."
    );

    // Case-insensitive variants are fine
    for status_value in ["pending", "PENDING", "InProgress"] {
        let (status, body) = send_json(
            &app,
            "POST",
            "/tasks",
            Some(&token),
            json!({ "title": "Write report", "status": status_value, "priority": "low" }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "status {status_value}: {body}");
        assert_eq!(body["message"], "Task created successfully.");
    }
}

#[tokio::test]
async fn empty_listing_returns_not_found_with_metadata() {
    let app = spawn_app().await;
    let token = register(&app, "alice", "a@x.com", "Pw1234!").await;

    let (status, body) = send(&app, "GET", "/tasks?page_number=3&page_size=25", Some(&token)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "No tasks found.");
    assert_eq!(body["data"]["tasks"], Value::Null);
    assert_eq!(body["data"]["page_number"], 3);
    assert_eq!(body["data"]["page_size"], 25);
    assert_eq!(body["data"]["total_count"], 0);
}

#[tokio::test]
async fn crud_roundtrip() {
    let app = spawn_app().await;
    let token = register(&app, "alice", "a@x.com", "Pw1234!").await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/tasks",
        Some(&token),
        json!({
            "title": "Write report",
            "description": "quarterly numbers",
            "due_date": "2025-09-06T12:00:00Z",
            "status": "Pending",
            "priority": "High"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "GET", "/tasks", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let tasks = body["data"]["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["status"], "Pending");
    assert_eq!(tasks[0]["priority"], "High");
    let id = tasks[0]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "GET", &format!("/tasks/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Write report");

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/tasks/{id}"),
        Some(&token),
        json!({ "status": "completed", "title": "Write final report" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task updated successfully.");

    let (_, body) = send(&app, "GET", &format!("/tasks/{id}"), Some(&token)).await;
    assert_eq!(body["data"]["status"], "Completed");
    assert_eq!(body["data"]["title"], "Write final report");
    assert_eq!(body["data"]["description"], "quarterly numbers");

    let (status, body) = send(&app, "DELETE", &format!("/tasks/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task deleted successfully.");

    let (status, body) = send(&app, "GET", &format!("/tasks/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Task not found.");
}

#[tokio::test]
async fn foreign_tasks_look_missing() {
    let app = spawn_app().await;
    let alice = register(&app, "alice", "a@x.com", "Pw1234!").await;
    let bob = register(&app, "bob", "b@x.com", "Pw1234!").await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/tasks",
        Some(&alice),
        json!({ "title": "Alice's task" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, "GET", "/tasks", Some(&alice)).await;
    let id = body["data"]["tasks"][0]["id"].as_str().unwrap().to_string();

    // Same 404 as a nonexistent id, for every operation
    let (status, body) = send(&app, "GET", &format!("/tasks/{id}"), Some(&bob)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Task not found.");

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/tasks/{id}"),
        Some(&bob),
        json!({ "title": "hijacked" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Task not found.");

    let (status, body) = send(&app, "DELETE", &format!("/tasks/{id}"), Some(&bob)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Task not found.");

    // And the task is still intact for its owner
    let (status, body) = send(&app, "GET", &format!("/tasks/{id}"), Some(&alice)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Alice's task");
}

#[tokio::test]
async fn pagination_skips_and_counts() {
    let app = spawn_app().await;
    let token = register(&app, "alice", "a@x.com", "Pw1234!").await;

    for i in 0..15 {
        let (status, _) = send_json(
            &app,
            "POST",
            "/tasks",
            Some(&token),
            json!({ "title": format!("Task {i}") }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/tasks?page_number=2&page_size=10", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["tasks"].as_array().unwrap().len(), 5);
    assert_eq!(body["data"]["total_count"], 15);
    assert_eq!(body["data"]["page_number"], 2);
    assert_eq!(body["data"]["page_size"], 10);
}

#[tokio::test]
async fn listing_filters_by_status_priority_and_day() {
    let app = spawn_app().await;
    let token = register(&app, "alice", "a@x.com", "Pw1234!").await;

    let fixtures = [
        ("Ship release", "completed", "high", "2025-09-06T09:00:00Z"),
        ("Fix bug", "pending", "high", "2025-09-06T18:30:00Z"),
        ("Water plants", "pending", "low", "2025-09-07"),
    ];
    for (title, status, priority, due) in fixtures {
        let (code, _) = send_json(
            &app,
            "POST",
            "/tasks",
            Some(&token),
            json!({ "title": title, "status": status, "priority": priority, "due_date": due }),
        )
        .await;
        assert_eq!(code, StatusCode::CREATED);
    }

    let (_, body) = send(&app, "GET", "/tasks?status=pending", Some(&token)).await;
    assert_eq!(body["data"]["total_count"], 2);

    let (_, body) = send(&app, "GET", "/tasks?status=pending&priority=LOW", Some(&token)).await;
    assert_eq!(body["data"]["total_count"], 1);
    assert_eq!(body["data"]["tasks"][0]["title"], "Water plants");

    // Day filter ignores time-of-day
    let (_, body) = send(&app, "GET", "/tasks?due_date=2025-09-06", Some(&token)).await;
    assert_eq!(body["data"]["total_count"], 2);

    // Unparseable filter means "no filter", not an error
    let (status, body) = send(&app, "GET", "/tasks?status=bogus", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_count"], 3);
}

#[tokio::test]
async fn bad_due_date_format_is_rejected_at_the_boundary() {
    let app = spawn_app().await;
    let token = register(&app, "alice", "a@x.com", "Pw1234!").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/tasks",
        Some(&token),
        json!({ "title": "Write report", "due_date": "06/09/2025" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Invalid dueDate format. Expected format: yyyy-MM-dd or yyyy-MM-ddTHH:mm:ssZ (ISO 8601)."
    );
}
