// roster-client/tests/http_integration.rs
// Runs the reqwest transport against a local axum server

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Form, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use roster_client::{
    ClientConfig, ClientError, EmployeeClient, EmployeeDraft, HttpClient, HttpPinVerifier,
    NetworkHttpClient, PinVerifier, Shift,
};
use serde_json::{Value, json};

#[derive(Clone, Default)]
struct Seen {
    calls: Arc<Mutex<Vec<String>>>,
}

impl Seen {
    fn push(&self, entry: String) {
        self.calls.lock().unwrap().push(entry);
    }

    fn all(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

async fn list_users() -> Json<Value> {
    Json(json!({
        "total": 2,
        "users": [
            {"id": 1, "username": "a", "full_name": "Alpha", "shift": "day", "status": "working"},
            {"id": 2, "username": "b", "full_name": "Bravo", "shift": null, "status": null}
        ]
    }))
}

async fn user_detail(Path(id): Path<i64>) -> (StatusCode, Json<Value>) {
    if id == 1 {
        (
            StatusCode::OK,
            Json(json!({"user": {"id": 1, "username": "a", "full_name": "Alpha", "avatar_base64": "AAAA"}})),
        )
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"message": "Employee not found"})))
    }
}

async fn change_shift(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Path(username): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if auth != "Bearer secret" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Not logged in or session expired"})),
        );
    }
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    seen.push(format!(
        "shift {username} {} {content_type}",
        form.get("new_shift").cloned().unwrap_or_default()
    ));
    (StatusCode::OK, Json(json!({"success": true})))
}

async fn resign(Path(username): Path<String>) -> Json<Value> {
    if username == "ghost" {
        Json(json!({"success": false, "message": "No user with this username"}))
    } else {
        Json(json!({"success": true, "message": "resigned"}))
    }
}

async fn add_user_account(
    State(seen): State<Seen>,
    Form(form): Form<Vec<(String, String)>>,
) -> (StatusCode, Json<Value>) {
    let keys: Vec<&str> = form.iter().map(|(k, _)| k.as_str()).collect();
    seen.push(format!("add {}", keys.join(",")));
    let username = form
        .iter()
        .find(|(k, _)| k == "username")
        .map(|(_, v)| v.clone())
        .unwrap_or_default();
    if username == "dup" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "message": "Username already exists"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"success": true, "message": "created", "user_id": 9, "username": username})),
    )
}

async fn reset_employee() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::BAD_GATEWAY, "upstream exploded")
}

async fn pin_verify(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["pin"] == "123456" && body["username"] == "admin" {
        (StatusCode::OK, Json(json!({"success": true})))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Invalid PIN"})),
        )
    }
}

async fn spawn_server() -> (String, Seen) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let seen = Seen::default();
    let app = Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", get(user_detail))
        .route("/edit-users/by-username/{username}/shift", put(change_shift))
        .route("/edit-users/by-username/{username}/resign", put(resign))
        .route("/add-user-account", post(add_user_account))
        .route("/employees/{id}/reset", post(reset_employee))
        .route("/broken", get(broken))
        .route("/system/pin-verify", post(pin_verify))
        .route("/health", get(|| async { Json(json!({"status": "ok"})) }))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), seen)
}

fn employees(base_url: &str) -> EmployeeClient {
    ClientConfig::new(base_url)
        .with_token("secret")
        .build_employee_client()
        .unwrap()
}

#[tokio::test]
async fn test_list_and_search_over_http() {
    let (url, _) = spawn_server().await;
    let client = employees(&url);

    let all = client.list(None).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].shift, Shift::Day);

    let bravo = client.list(Some("brav")).await.unwrap();
    assert_eq!(bravo.len(), 1);
    assert_eq!(bravo[0].username, "b");

    let one = client.list(Some("1")).await.unwrap();
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].avatar_data_uri().as_deref(), Some("data:image/png;base64,AAAA"));

    assert!(client.list(Some("77")).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_form_put_with_bearer_token() {
    let (url, seen) = spawn_server().await;
    let client = employees(&url);

    let new_shift = client.change_shift("a", Shift::Day).await.unwrap();
    assert_eq!(new_shift, Shift::Night);
    assert_eq!(
        seen.all(),
        ["shift a night application/x-www-form-urlencoded"]
    );
}

#[tokio::test]
async fn test_missing_token_surfaces_detail_message() {
    let (url, _) = spawn_server().await;
    let client = ClientConfig::new(&url).build_employee_client().unwrap();

    let err = client.change_shift("a", Shift::Day).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(err.to_string(), "Not logged in or session expired");
}

#[tokio::test]
async fn test_success_false_is_rejected() {
    let (url, _) = spawn_server().await;
    let err = employees(&url).resign("ghost").await.unwrap_err();
    assert!(matches!(err, ClientError::Rejected { .. }));
    assert_eq!(err.to_string(), "No user with this username");
}

#[tokio::test]
async fn test_create_field_order_and_duplicate() {
    let (url, seen) = spawn_server().await;
    let client = employees(&url);

    let draft = EmployeeDraft {
        username: "new".into(),
        ..Default::default()
    };
    let created = client.create(&draft).await.unwrap();
    assert_eq!(created.user_id, Some(9));
    assert_eq!(
        seen.all(),
        ["add username,full_name,age,address,phone,shift"]
    );

    let dup = EmployeeDraft {
        username: "dup".into(),
        ..Default::default()
    };
    let err = client.create(&dup).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(err.to_string(), "Username already exists");
}

#[tokio::test]
async fn test_empty_body_is_null() {
    let (url, _) = spawn_server().await;
    let http = NetworkHttpClient::new(&url).unwrap();
    let body = http.post_empty("employees/3/reset").await.unwrap();
    assert!(body.is_null());
}

#[tokio::test]
async fn test_plain_text_error_body() {
    let (url, _) = spawn_server().await;
    let http = NetworkHttpClient::new(&url).unwrap();
    let err = http.get("broken").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
    assert_eq!(err.to_string(), "upstream exploded");
}

#[tokio::test]
async fn test_health_probe() {
    let (url, _) = spawn_server().await;
    NetworkHttpClient::new(&url).unwrap().health().await.unwrap();
}

#[tokio::test]
async fn test_truncated_body_is_invalid_response() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = socket.read(&mut buf).await;
        // promises 100 bytes, sends 3, hangs up
        socket
            .write_all(b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 100\r\n\r\n{\"a")
            .await
            .unwrap();
    });

    let http = NetworkHttpClient::new(&format!("http://{addr}")).unwrap();
    let err = http.get("users").await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let http = NetworkHttpClient::new(&format!("http://{addr}")).unwrap();
    let err = http.get("users").await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
}

#[tokio::test]
async fn test_pin_verifier_over_http() {
    let (url, _) = spawn_server().await;
    let http: Arc<dyn HttpClient> = Arc::new(NetworkHttpClient::new(&url).unwrap());
    let verifier = HttpPinVerifier::new(http, "admin");

    assert!(verifier.verify(" 123456 ").await.unwrap());
    assert!(!verifier.verify("999999").await.unwrap());
}
