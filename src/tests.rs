//! Integration tests for the room directory backend.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use crate::config::Config;
use crate::db::{init_database, Repository};
use crate::{create_router, AppState};

const ADMIN_TOKEN: &str = "admin_admin1_1700000000000";

fn test_config() -> Config {
    Config {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        log_level: "warn".to_string(),
        ..Config::default()
    }
}

fn test_state(repo: Repository) -> AppState {
    AppState {
        repo: Arc::new(repo),
        config: Arc::new(test_config()),
    }
}

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    _temp_dir: Option<TempDir>,
}

impl TestFixture {
    async fn new() -> Self {
        Self::serve(test_state(Repository::in_memory()), None).await
    }

    async fn with_sqlite() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pool = init_database(&temp_dir.path().join("test.sqlite"))
            .await
            .expect("Failed to init DB");
        let repo = Repository::sqlite(pool, true)
            .await
            .expect("Failed to open repository");
        Self::serve(test_state(repo), Some(temp_dir)).await
    }

    async fn serve(state: AppState, temp_dir: Option<TempDir>) -> Self {
        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn sync_version(&self) -> i64 {
        let body: Value = self
            .client
            .get(self.url("/api/sync/version"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        body["version"].as_i64().unwrap()
    }

    async fn admin_token(&self) -> String {
        let body: Value = self
            .client
            .post(self.url("/api/auth/admin-login"))
            .json(&json!({ "adminId": "admin1", "password": "admin123" }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        body["token"].as_str().unwrap().to_string()
    }
}

fn room_ids(body: &Value) -> Vec<String> {
    body["rooms"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_and_ping() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");

    let resp = fixture
        .client
        .get(fixture.url("/api/ping"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "ping");
}

#[tokio::test]
async fn test_student_login() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/auth/student-login"))
        .json(&json!({ "registrationNumber": "STU001" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert!(body["token"].as_str().unwrap().starts_with("student_STU001_"));
    assert!(body.get("message").is_none());

    let resp = fixture
        .client
        .post(fixture.url("/api/auth/student-login"))
        .json(&json!({ "registrationNumber": "STU999" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid registration number");
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_student_login_validation() {
    let fixture = TestFixture::new().await;

    for payload in [
        json!({}),
        json!({ "registrationNumber": "" }),
        json!({ "registrationNumber": 1 }),
    ] {
        let resp = fixture
            .client
            .post(fixture.url("/api/auth/student-login"))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400, "payload {}", payload);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert!(body["message"].is_string());
    }
}

#[tokio::test]
async fn test_admin_login() {
    let fixture = TestFixture::new().await;

    let token = fixture.admin_token().await;
    assert!(token.starts_with("admin_admin1_"));

    let resp = fixture
        .client
        .post(fixture.url("/api/auth/admin-login"))
        .json(&json!({ "adminId": "admin1", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid admin credentials");

    let resp = fixture
        .client
        .post(fixture.url("/api/auth/admin-login"))
        .json(&json!({ "adminId": "admin1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_list_and_get_rooms() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/rooms"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        room_ids(&body),
        vec!["room_001", "room_002", "room_003", "room_004", "room_005"]
    );

    let resp = fixture
        .client
        .get(fixture.url("/api/rooms/room_003"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["room"]["departmentName"], "Mechanical Engineering");
    assert_eq!(body["room"]["capacity"], 35);

    let resp = fixture
        .client
        .get(fixture.url("/api/rooms/room_999"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Room not found");
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_search_rooms() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/rooms/search?roomNumber=101"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let rooms = body["rooms"].as_array().unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["roomNumber"], "101");
    assert_eq!(rooms[0]["blockName"], "Block A");
    assert_eq!(rooms[0]["departmentName"], "Computer Science");
    assert_eq!(rooms[0]["floorNumber"], 1);
    assert_eq!(rooms[0]["capacity"], 30);

    let body: Value = fixture
        .client
        .get(fixture.url("/api/rooms/search?departmentName=comp"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(room_ids(&body), vec!["room_001", "room_005"]);

    let body: Value = fixture
        .client
        .get(fixture.url("/api/rooms/search?floorNumber=2&blockName=block%20b"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(room_ids(&body), vec!["room_003", "room_004"]);

    // Empty parameters are not constraints.
    let body: Value = fixture
        .client
        .get(fixture.url("/api/rooms/search?departmentName=&floorNumber="))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(room_ids(&body).len(), 5);

    let resp = fixture
        .client
        .get(fixture.url("/api/rooms/search?floorNumber=one"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_room_crud_as_admin() {
    let fixture = TestFixture::new().await;
    let token = fixture.admin_token().await;
    let initial_version = fixture.sync_version().await;
    assert_eq!(initial_version, 0);

    // Create
    let resp = fixture
        .client
        .post(fixture.url("/api/rooms"))
        .bearer_auth(&token)
        .json(&json!({
            "blockName": "Block D",
            "floorNumber": 4,
            "roomNumber": "401",
            "departmentName": "Physics",
            "capacity": 50
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    let room_id = body["room"]["id"].as_str().unwrap().to_string();
    assert!(room_id.starts_with("room_"));
    assert_eq!(body["room"]["blockName"], "Block D");
    assert_eq!(body["room"]["floorNumber"], 4);
    assert_eq!(body["room"]["roomNumber"], "401");
    assert_eq!(body["room"]["departmentName"], "Physics");
    assert_eq!(body["room"]["capacity"], 50);
    assert!(body["room"]["createdAt"].as_i64().unwrap() > 0);
    assert_eq!(fixture.sync_version().await, initial_version + 1);

    // Update
    let resp = fixture
        .client
        .patch(fixture.url(&format!("/api/rooms/{}", room_id)))
        .bearer_auth(&token)
        .json(&json!({ "capacity": 55, "id": "ignored" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["room"]["id"], room_id.as_str());
    assert_eq!(body["room"]["capacity"], 55);
    assert_eq!(body["room"]["departmentName"], "Physics");
    assert_eq!(fixture.sync_version().await, initial_version + 2);

    // Update of a missing room
    let resp = fixture
        .client
        .patch(fixture.url("/api/rooms/room_missing"))
        .bearer_auth(&token)
        .json(&json!({ "capacity": 10 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(fixture.sync_version().await, initial_version + 2);

    // Delete twice
    let resp = fixture
        .client
        .delete(fixture.url(&format!("/api/rooms/{}", room_id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);

    let resp = fixture
        .client
        .delete(fixture.url(&format!("/api/rooms/{}", room_id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(fixture.sync_version().await, initial_version + 3);
}

#[tokio::test]
async fn test_create_room_validation() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/rooms"))
        .bearer_auth(ADMIN_TOKEN)
        .json(&json!({ "blockName": "Block D", "roomNumber": "401" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Missing required fields");
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let resp = fixture
        .client
        .post(fixture.url("/api/rooms"))
        .bearer_auth(ADMIN_TOKEN)
        .json(&json!({
            "blockName": "Block D",
            "floorNumber": "four",
            "roomNumber": "401",
            "departmentName": "Physics"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = fixture
        .client
        .patch(fixture.url("/api/rooms/room_001"))
        .bearer_auth(ADMIN_TOKEN)
        .json(&json!({ "roomNumber": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    assert_eq!(fixture.sync_version().await, 0);
}

#[tokio::test]
async fn test_admin_routes_require_admin_token() {
    let fixture = TestFixture::new().await;
    let new_room = json!({
        "blockName": "Block D",
        "floorNumber": 4,
        "roomNumber": "401",
        "departmentName": "Physics"
    });

    let resp = fixture
        .client
        .post(fixture.url("/api/rooms"))
        .json(&new_room)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Admin access required");

    let resp = fixture
        .client
        .post(fixture.url("/api/rooms"))
        .bearer_auth("student_STU001_1700000000000")
        .json(&new_room)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    let resp = fixture
        .client
        .delete(fixture.url("/api/rooms/room_001"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    let resp = fixture
        .client
        .patch(fixture.url("/api/rooms/room_001"))
        .json(&json!({ "capacity": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    assert_eq!(fixture.sync_version().await, 0);
    let resp = fixture
        .client
        .get(fixture.url("/api/rooms/room_001"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_sqlite_backend_roundtrip() {
    let fixture = TestFixture::with_sqlite().await;
    let token = fixture.admin_token().await;

    let body: Value = fixture
        .client
        .get(fixture.url("/api/rooms"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(room_ids(&body).len(), 5);

    let resp = fixture
        .client
        .post(fixture.url("/api/rooms"))
        .bearer_auth(&token)
        .json(&json!({
            "blockName": "Block E",
            "floorNumber": 0,
            "roomNumber": "G01",
            "departmentName": "Library"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert!(body["room"].get("capacity").is_none());

    let body: Value = fixture
        .client
        .get(fixture.url("/api/rooms/search?floorNumber=0"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let rooms = body["rooms"].as_array().unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["departmentName"], "Library");
    assert_eq!(fixture.sync_version().await, 1);
}

#[tokio::test]
async fn test_gate_runs_before_body_parsing() {
    let app = create_router(test_state(Repository::empty()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/rooms")
                .header("content-type", "application/json")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "Admin access required");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = create_router(test_state(Repository::empty()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/rooms")
                .header("authorization", format!("Bearer {}", ADMIN_TOKEN))
                .header("content-type", "application/json")
                .body(Body::from("{\"blockName\":"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_bad_query_string_is_json_error() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/rooms/search?roomNumber=101&roomNumber=102"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let content_type = resp.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("application/json"));
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_undecodable_room_id_is_json_error() {
    let app = create_router(test_state(Repository::in_memory()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/rooms/%FF")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}
