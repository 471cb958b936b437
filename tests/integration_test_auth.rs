mod common;

use axum::http::StatusCode;
use common::{TestApp, PASSWORD};
use serde_json::json;

#[tokio::test]
async fn test_register_and_login() {
    let app = TestApp::new().await;

    let (status, body) = app.request("POST", "/auth/register", None, Some(json!({
        "email": "Org@Example.com",
        "password": PASSWORD,
        "name": "Olga"
    }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "org@example.com");
    assert!(body.get("passwordHash").is_none());

    let (status, body) = app.request("POST", "/auth/login", None, Some(json!({
        "email": "org@example.com",
        "password": PASSWORD
    }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["accessToken"].as_str().unwrap().is_empty());
    assert!(!body["userId"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = TestApp::new().await;
    app.register("org@example.com").await;

    let (status, body) = app.request("POST", "/auth/register", None, Some(json!({
        "email": "org@example.com",
        "password": PASSWORD
    }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::new().await;

    let (status, body) = app.request("POST", "/auth/register", None, Some(json!({
        "email": "not-an-email",
        "password": PASSWORD
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("email"));

    let (status, _) = app.request("POST", "/auth/register", None, Some(json!({
        "email": "org@example.com",
        "password": "short"
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.request("POST", "/auth/register", None, Some(json!({
        "email": "org@example.com"
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_look_the_same() {
    let app = TestApp::new().await;
    app.register("org@example.com").await;

    let (status, wrong_password) = app.request("POST", "/auth/login", None, Some(json!({
        "email": "org@example.com",
        "password": "not-the-password"
    }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(wrong_password.get("accessToken").is_none());

    let (status, unknown) = app.request("POST", "/auth/login", None, Some(json!({
        "email": "nobody@example.com",
        "password": PASSWORD
    }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password["message"], unknown["message"]);
}

#[tokio::test]
async fn test_organizer_routes_require_bearer() {
    let app = TestApp::new().await;

    let (status, body) = app.request("GET", "/events", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Missing bearer token");

    let (status, _) = app.request("GET", "/events", Some("garbage.token.value"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.request("POST", "/events/guests", None, Some(json!({
        "eventId": "x", "email": "a@x.com"
    }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let (status, body) = app.request("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
