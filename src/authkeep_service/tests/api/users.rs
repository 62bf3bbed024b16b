use authkeep_core::UserProfile;
use serde_json::{Value, json};

use crate::helpers::{PASSWORD, TestApp, error_message};

#[tokio::test]
async fn get_all_paginates_in_creation_order() {
    let app = TestApp::new().await;
    let admin = app
        .signup_and_login("admin", "admin@example.com", "ADMIN")
        .await;
    for i in 1..=24 {
        app.signup(
            &format!("user-{i:02}"),
            &format!("user{i:02}@example.com"),
            "USER",
        )
        .await;
    }

    let response = app
        .get_all(&admin.access_token, "?page=2&recordPerPage=10")
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["total_count"], json!(25));
    assert_eq!(body["page"], json!(2));
    assert_eq!(body["record_per_page"], json!(10));
    let users: Vec<UserProfile> = serde_json::from_value(body["users"].clone()).unwrap();
    let names: Vec<String> = users.into_iter().map(|user| user.username).collect();
    let expected: Vec<String> = (10..=19).map(|i| format!("user-{i:02}")).collect();
    assert_eq!(names, expected);
}

#[tokio::test]
async fn non_positive_page_behaves_as_first_page() {
    let app = TestApp::new().await;
    let admin = app
        .signup_and_login("admin", "admin@example.com", "ADMIN")
        .await;
    app.signup("user", "user@example.com", "USER").await;

    let response = app
        .get_all(&admin.access_token, "?page=0&recordPerPage=-5")
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["page"], json!(1));
    assert_eq!(body["record_per_page"], json!(10));
    assert_eq!(body["users"][0]["username"], json!("admin"));
    assert_eq!(body["total_count"], json!(2));
}

#[tokio::test]
async fn get_all_is_admin_only() {
    let app = TestApp::new().await;
    let user = app
        .signup_and_login("user", "user@example.com", "USER")
        .await;

    let response = app.get_all(&user.access_token, "").await;

    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn protected_routes_need_a_token() {
    let app = TestApp::new().await;

    let response = app.get_all("", "").await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn users_can_read_themselves_but_not_others() {
    let app = TestApp::new().await;
    let ada = app
        .signup_and_login("ada", "ada@example.com", "USER")
        .await;
    let bob = app.signup("bob", "bob@example.com", "USER").await;

    let own = app
        .get_user(&ada.access_token, &ada.user.user_id.as_uuid().to_string())
        .await;
    let other = app
        .get_user(&ada.access_token, &bob.user_id.as_uuid().to_string())
        .await;

    assert_eq!(own.status().as_u16(), 200);
    let profile: UserProfile = own.json().await.unwrap();
    assert_eq!(profile, ada.user);
    assert_eq!(other.status().as_u16(), 403);
}

#[tokio::test]
async fn admins_can_read_anyone() {
    let app = TestApp::new().await;
    let admin = app
        .signup_and_login("admin", "admin@example.com", "ADMIN")
        .await;
    let bob = app.signup("bob", "bob@example.com", "USER").await;

    let response = app
        .get_user(&admin.access_token, &bob.user_id.as_uuid().to_string())
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let profile: UserProfile = response.json().await.unwrap();
    assert_eq!(profile, bob);
}

#[tokio::test]
async fn unknown_and_malformed_ids() {
    let app = TestApp::new().await;
    let admin = app
        .signup_and_login("admin", "admin@example.com", "ADMIN")
        .await;

    let unknown = app
        .get_user(&admin.access_token, "6f1c2b1e-3f0a-4e58-9d8f-2b8a4a1c7e11")
        .await;
    let malformed = app.get_user(&admin.access_token, "not-a-uuid").await;

    assert_eq!(unknown.status().as_u16(), 404);
    assert_eq!(malformed.status().as_u16(), 400);
}

#[tokio::test]
async fn update_user_changes_the_callers_profile() {
    let app = TestApp::new().await;
    let ada = app
        .signup_and_login("ada", "ada@example.com", "USER")
        .await;

    let response = app
        .patch_update_user(
            &ada.access_token,
            &json!({ "email": "ada.lovelace@example.com", "username": "lovelace" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"]["email"], json!("ada.lovelace@example.com"));
    assert_eq!(body["user"]["username"], json!("lovelace"));

    let login = app
        .post_login(&json!({ "email": "ada.lovelace@example.com", "password": PASSWORD }))
        .await;
    assert_eq!(login.status().as_u16(), 200);
}

#[tokio::test]
async fn update_user_requires_a_non_empty_email() {
    let app = TestApp::new().await;
    let ada = app
        .signup_and_login("ada", "ada@example.com", "USER")
        .await;

    let response = app
        .patch_update_user(&ada.access_token, &json!({ "email": "", "username": "ada" }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(error_message(response).await, "Email must not be empty");
}

#[tokio::test]
async fn update_user_to_a_taken_email_is_a_conflict() {
    let app = TestApp::new().await;
    let ada = app
        .signup_and_login("ada", "ada@example.com", "USER")
        .await;
    app.signup("bob", "bob@example.com", "USER").await;

    let response = app
        .patch_update_user(
            &ada.access_token,
            &json!({ "email": "bob@example.com", "username": "ada" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn updating_someone_else_needs_admin() {
    let app = TestApp::new().await;
    let ada = app
        .signup_and_login("ada", "ada@example.com", "USER")
        .await;
    let admin = app
        .signup_and_login("admin", "admin@example.com", "ADMIN")
        .await;
    let bob = app.signup("bob", "bob@example.com", "USER").await;
    let body = json!({
        "user_id": bob.user_id.as_uuid().to_string(),
        "email": "robert@example.com",
        "username": "robert",
    });

    let as_user = app.patch_update_user(&ada.access_token, &body).await;
    let as_admin = app.patch_update_user(&admin.access_token, &body).await;

    assert_eq!(as_user.status().as_u16(), 403);
    assert_eq!(as_admin.status().as_u16(), 200);
}

#[tokio::test]
async fn delete_removes_the_record_once() {
    let app = TestApp::new().await;
    let admin = app
        .signup_and_login("admin", "admin@example.com", "ADMIN")
        .await;
    let bob = app.signup("bob", "bob@example.com", "USER").await;
    let bob_id = bob.user_id.as_uuid().to_string();

    let first = app.post_delete_user(&admin.access_token, &bob_id).await;
    let second = app.post_delete_user(&admin.access_token, &bob_id).await;

    assert_eq!(first.status().as_u16(), 200);
    assert_eq!(second.status().as_u16(), 404);
    let lookup = app.get_user(&admin.access_token, &bob_id).await;
    assert_eq!(lookup.status().as_u16(), 404);
}

#[tokio::test]
async fn users_cannot_delete_others() {
    let app = TestApp::new().await;
    let ada = app
        .signup_and_login("ada", "ada@example.com", "USER")
        .await;
    let bob = app.signup("bob", "bob@example.com", "USER").await;

    let response = app
        .post_delete_user(&ada.access_token, &bob.user_id.as_uuid().to_string())
        .await;

    assert_eq!(response.status().as_u16(), 403);
}
