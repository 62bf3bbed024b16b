use serde_json::{Value, json};

use crate::helpers::{PASSWORD, TestApp, error_message, signup_body};

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new().await;

    let response = app.get_health().await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn signup_returns_201_and_a_profile_without_password() {
    let app = TestApp::new().await;

    let response = app
        .post_signup(&signup_body("ada", "ada@example.com", PASSWORD, "USER"))
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["user"]["username"], json!("ada"));
    assert_eq!(body["user"]["email"], json!("ada@example.com"));
    assert_eq!(body["user"]["user_type"], json!("USER"));
    assert!(body["user"]["user_id"].is_string());
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let app = TestApp::new().await;
    app.signup("ada", "ada@example.com", "USER").await;

    let response = app
        .post_signup(&signup_body("other", "ada@example.com", "different", "ADMIN"))
        .await;

    assert_eq!(response.status().as_u16(), 409);
    assert_eq!(error_message(response).await, "User already exists");
}

#[tokio::test]
async fn invalid_candidates_are_rejected_with_400() {
    let app = TestApp::new().await;
    let long_name = "x".repeat(25);

    let test_cases = [
        (
            signup_body("ada", "not-an-email", PASSWORD, "USER"),
            "invalid email",
        ),
        (
            signup_body("ada", "ada@example.com", "short", "USER"),
            "short password",
        ),
        (
            signup_body(&long_name, "ada@example.com", PASSWORD, "USER"),
            "username over 24 chars",
        ),
        (
            signup_body("", "ada@example.com", PASSWORD, "USER"),
            "empty username",
        ),
        (
            signup_body("ada", "ada@example.com", PASSWORD, "ROOT"),
            "unknown role",
        ),
        (json!({ "email": "ada@example.com" }), "missing fields"),
    ];

    for (body, description) in test_cases {
        let response = app.post_signup(&body).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "expected 400 for {description}"
        );
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].is_string(), "error body for {description}");
    }
}

#[tokio::test]
async fn twenty_four_character_username_is_accepted() {
    let app = TestApp::new().await;
    let name = "y".repeat(24);

    let response = app
        .post_signup(&signup_body(&name, "long@example.com", PASSWORD, "ADMIN"))
        .await;

    assert_eq!(response.status().as_u16(), 201);
}

#[tokio::test]
async fn request_past_the_timeout_is_answered_with_408() {
    let app = TestApp::with_request_timeout(std::time::Duration::from_millis(1)).await;

    let response = app
        .post_signup(&signup_body("ada", "ada@example.com", PASSWORD, "USER"))
        .await;

    assert_eq!(response.status().as_u16(), 408);
}
