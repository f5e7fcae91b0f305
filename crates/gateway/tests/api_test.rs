//! HTTP-level tests over the in-memory store.

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{JwtConfig, UserValidError, ACCESS_DENIED_MESSAGE, JSON_UTF8};
use domain::{ROLE_ADMIN, ROLE_USER};
use gateway_lib::routes::create_router;
use gateway_lib::state::AppState;
use user_service_lib::config::{StoreKind, UserServiceConfig};
use user_service_lib::repository::{CollectionUserRepository, UserRepository};
use user_service_lib::Services;

const SECRET: &str = "test-secret-key-for-testing-only-32chars";
const PASSWORD: &str = "SecurePass123!";

struct TestApp {
    router: Router,
    repo: Arc<CollectionUserRepository>,
}

fn test_app() -> TestApp {
    let repo = Arc::new(CollectionUserRepository::new());
    let config = UserServiceConfig {
        store: StoreKind::Memory,
        database: Default::default(),
        jwt: JwtConfig::new(SECRET, 1).unwrap(),
    };
    let services = Services::with_repository(repo.clone(), &config);

    TestApp {
        router: create_router(AppState::new(services)),
        repo,
    }
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, content_type, body)
    }

    async fn sign_up(&self, payload: Value) -> (StatusCode, Option<String>, Value) {
        self.send(json_request("POST", "/auth/signup", None, payload)).await
    }

    async fn login(&self, username: &str) -> String {
        let (status, _, body) = self
            .send(json_request(
                "POST",
                "/auth/login",
                None,
                json!({ "username": username, "password": PASSWORD }),
            ))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["access_token"].as_str().unwrap().to_string()
    }

    async fn promote(&self, username: &str) {
        let mut user = self.repo.find_by_username(username).await.unwrap().unwrap();
        user.set_roles([ROLE_USER, ROLE_ADMIN].iter().map(|r| r.to_string()).collect());
        self.repo.save(user).await.unwrap();
    }
}

fn signup_payload(username: &str) -> Value {
    json!({
        "username": username,
        "password": PASSWORD,
        "email": format!("{}@example.com", username),
        "phone": "010-1234-5678",
        "age": 30
    })
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_signup_returns_profile_without_password() {
    let app = test_app();

    let (status, _, body) = app.sign_up(signup_payload("alice")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "username": "alice",
            "email": "alice@example.com",
            "phone": "010-1234-5678",
            "age": 30,
            "membership": "BASIC"
        })
    );

    let stored = app.repo.find_by_username("alice").await.unwrap().unwrap();
    assert_ne!(stored.password, PASSWORD);
    assert_eq!(stored.roles, BTreeSet::from([ROLE_USER.to_string()]));
}

#[tokio::test]
async fn test_duplicate_signup_uses_catalog_entry() {
    let app = test_app();
    app.sign_up(signup_payload("alice")).await;

    let (status, content_type, body) = app.sign_up(signup_payload("alice")).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(content_type.as_deref(), Some(JSON_UTF8));
    assert_eq!(
        body,
        json!({
            "status": 409,
            "errorType": "CONFLICT",
            "messages": [UserValidError::DuplicateUsername.message()],
            "path": "/auth/signup"
        })
    );
}

#[tokio::test]
async fn test_signup_reports_each_violation() {
    let app = test_app();
    let mut payload = signup_payload("bob");
    payload["age"] = json!(13);
    payload["phone"] = json!("12345");

    let (status, _, body) = app.sign_up(payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorType"], "BAD_REQUEST");
    assert_eq!(body["path"], "/auth/signup");
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].as_str().unwrap().starts_with("age"));
    assert!(messages[1].as_str().unwrap().starts_with("phone"));
    assert!(app.repo.find_by_username("bob").await.unwrap().is_none());
}

#[tokio::test]
async fn test_signup_accepts_age_bounds() {
    let app = test_app();

    let mut youngest = signup_payload("young");
    youngest["age"] = json!(14);
    let mut oldest = signup_payload("old");
    oldest["age"] = json!(120);

    assert_eq!(app.sign_up(youngest).await.0, StatusCode::CREATED);
    assert_eq!(app.sign_up(oldest).await.0, StatusCode::CREATED);
}

#[tokio::test]
async fn test_login_failures_use_catalog_entries() {
    let app = test_app();
    app.sign_up(signup_payload("alice")).await;

    let (status, _, body) = app
        .send(json_request(
            "POST",
            "/auth/login",
            None,
            json!({ "username": "alice", "password": "wrong" }),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["messages"], json!([UserValidError::InvalidUsernamePassword.message()]));

    let (status, _, body) = app
        .send(json_request(
            "POST",
            "/auth/login",
            None,
            json!({ "username": "nobody", "password": PASSWORD }),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["messages"], json!([UserValidError::UsernameNotFound.message()]));
    assert_eq!(body["path"], "/auth/login");
}

#[tokio::test]
async fn test_profile_requires_token() {
    let app = test_app();

    let (status, _, body) = app.send(empty_request("GET", "/users/me", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errorType"], "UNAUTHORIZED");
    assert_eq!(body["path"], "/users/me");

    let (status, _, _) = app
        .send(empty_request("GET", "/users/me", Some("not-a-jwt")))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_read_update_delete() {
    let app = test_app();
    app.sign_up(signup_payload("alice")).await;
    let token = app.login("alice").await;

    let (status, _, body) = app.send(empty_request("GET", "/users/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert!(body.get("password").is_none());

    let (status, _, body) = app
        .send(json_request(
            "PUT",
            "/users/me",
            Some(&token),
            json!({ "age": 31, "membership": "GOLD" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["age"], 31);
    // Tier changes are reserved for administrators
    assert_eq!(body["membership"], "BASIC");
    assert_eq!(body["email"], "alice@example.com");

    let (status, _, body) = app
        .send(json_request("PUT", "/users/me", Some(&token), json!({ "age": 121 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["messages"].as_array().unwrap().len(), 1);

    let (status, _, _) = app.send(empty_request("DELETE", "/users/me", Some(&token))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The token outlives the account but no longer authenticates
    let (status, _, _) = app.send(empty_request("GET", "/users/me", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_route_denies_regular_user() {
    let app = test_app();
    app.sign_up(signup_payload("alice")).await;
    let token = app.login("alice").await;

    let (status, content_type, body) = app
        .send(empty_request("GET", "/admin/users", Some(&token)))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(content_type.as_deref(), Some(JSON_UTF8));
    assert_eq!(
        body,
        json!({
            "status": 401,
            "errorType": "UNAUTHORIZED",
            "messages": [ACCESS_DENIED_MESSAGE],
            "path": "/admin/users"
        })
    );
}

#[tokio::test]
async fn test_admin_manages_accounts() {
    let app = test_app();
    app.sign_up(signup_payload("root")).await;
    app.sign_up(signup_payload("alice")).await;
    app.promote("root").await;
    let token = app.login("root").await;

    let (status, _, body) = app
        .send(empty_request("GET", "/admin/users", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    let alice_id = users
        .iter()
        .find(|u| u["username"] == "alice")
        .and_then(|u| u["id"].as_i64())
        .unwrap();

    let (status, _, body) = app
        .send(json_request(
            "PUT",
            &format!("/admin/users/{}/roles", alice_id),
            Some(&token),
            json!({ "roles": [ROLE_USER, ROLE_ADMIN] }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["roles"], json!([ROLE_ADMIN, ROLE_USER]));

    let (status, _, _) = app
        .send(json_request(
            "PUT",
            &format!("/admin/users/{}/roles", alice_id),
            Some(&token),
            json!({ "roles": [] }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = app
        .send(empty_request(
            "DELETE",
            &format!("/admin/users/{}", alice_id),
            Some(&token),
        ))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(app.repo.find_by_username("alice").await.unwrap().is_none());

    let (status, _, body) = app
        .send(empty_request(
            "DELETE",
            &format!("/admin/users/{}", alice_id),
            Some(&token),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["path"], format!("/admin/users/{}", alice_id));
}

#[tokio::test]
async fn test_role_change_applies_to_existing_token() {
    let app = test_app();
    app.sign_up(signup_payload("alice")).await;
    let token = app.login("alice").await;

    app.promote("alice").await;

    let (status, _, _) = app
        .send(empty_request("GET", "/admin/users", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_renders_error_body() {
    let app = test_app();

    let (status, content_type, body) = app.send(empty_request("GET", "/nowhere", None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(content_type.as_deref(), Some(JSON_UTF8));
    assert_eq!(body["errorType"], "NOT_FOUND");
    assert_eq!(body["path"], "/nowhere");
}

#[tokio::test]
async fn test_health_reports_memory_store() {
    let app = test_app();

    let (status, _, body) = app.send(empty_request("GET", "/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"]["kind"], "memory");
}

#[tokio::test]
async fn test_change_password() {
    let app = test_app();
    app.sign_up(signup_payload("alice")).await;
    let token = app.login("alice").await;

    let (status, _, body) = app
        .send(json_request(
            "PUT",
            "/users/me/password",
            Some(&token),
            json!({ "current_password": "wrong-guess", "new_password": "N3wSecret!" }),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["messages"], json!([UserValidError::InvalidUsernamePassword.message()]));

    let (status, _, _) = app
        .send(json_request(
            "PUT",
            "/users/me/password",
            Some(&token),
            json!({ "current_password": PASSWORD, "new_password": "N3wSecret!" }),
        ))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, _) = app
        .send(json_request(
            "POST",
            "/auth/login",
            None,
            json!({ "username": "alice", "password": PASSWORD }),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, body) = app
        .send(json_request(
            "POST",
            "/auth/login",
            None,
            json!({ "username": "alice", "password": "N3wSecret!" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].is_string());
}

#[tokio::test]
async fn test_admin_changes_membership() {
    let app = test_app();
    app.sign_up(signup_payload("root")).await;
    app.sign_up(signup_payload("alice")).await;
    app.promote("root").await;
    let admin = app.login("root").await;
    let user = app.login("alice").await;
    let alice_id = app.repo.find_by_username("alice").await.unwrap().unwrap().id.unwrap();
    let uri = format!("/admin/users/{}/membership", alice_id);

    let (status, _, _) = app
        .send(json_request("PUT", &uri, Some(&user), json!({ "membership": "GOLD" })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, body) = app
        .send(json_request("PUT", &uri, Some(&admin), json!({ "membership": "GOLD" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["membership"], "GOLD");

    let (status, _, body) = app.send(empty_request("GET", "/users/me", Some(&user))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["membership"], "GOLD");

    let (status, content_type, _) = app
        .send(json_request("PUT", &uri, Some(&admin), json!({ "membership": "PLATINUM" })))
        .await;
    assert!(status.is_client_error());
    assert_eq!(content_type.as_deref(), Some(JSON_UTF8));

    let (status, _, _) = app
        .send(json_request(
            "PUT",
            "/admin/users/9999/membership",
            Some(&admin),
            json!({ "membership": "SILVER" }),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_id_renders_error_body() {
    let app = test_app();
    app.sign_up(signup_payload("root")).await;
    app.promote("root").await;
    let token = app.login("root").await;

    let (status, content_type, body) = app
        .send(empty_request("DELETE", "/admin/users/abc", Some(&token)))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type.as_deref(), Some(JSON_UTF8));
    assert_eq!(body["errorType"], "BAD_REQUEST");
    assert_eq!(body["path"], "/admin/users/abc");
    assert_eq!(body["messages"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_wrong_method_renders_error_body() {
    let app = test_app();
    app.sign_up(signup_payload("alice")).await;
    let token = app.login("alice").await;

    let (status, content_type, body) = app
        .send(empty_request("POST", "/users/me", Some(&token)))
        .await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(content_type.as_deref(), Some(JSON_UTF8));
    assert_eq!(body["errorType"], "METHOD_NOT_ALLOWED");
    assert_eq!(body["path"], "/users/me");
}
