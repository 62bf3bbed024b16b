use std::sync::Arc;

use authkeep_adapters::{
    Argon2Hasher, HashMapOtpStore, HashMapUserStore, JwtAuthConfig, JwtTokenService,
    MockEmailClient, SessionCookieConfig, config::test,
};
use authkeep_application::AccountService;
use authkeep_core::{TokenService, UserProfile};
use authkeep_service::AuthService;
use reqwest::{Client, Response, header::SET_COOKIE};
use secrecy::Secret;
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const PASSWORD: &str = "password123";

pub struct TestApp {
    pub address: String,
    pub http_client: Client,
    pub email_client: MockEmailClient,
    pub tokens: Arc<dyn TokenService>,
}

pub struct LoggedIn {
    pub user: UserProfile,
    pub access_token: String,
    pub refresh_cookie: String,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::spawn(MockEmailClient::new(), chrono::Duration::minutes(5), None).await
    }

    pub async fn with_email_client(email_client: MockEmailClient) -> Self {
        Self::spawn(email_client, chrono::Duration::minutes(5), None).await
    }

    pub async fn with_otp_ttl(otp_ttl: chrono::Duration) -> Self {
        Self::spawn(MockEmailClient::new(), otp_ttl, None).await
    }

    pub async fn with_request_timeout(request_timeout: std::time::Duration) -> Self {
        Self::spawn(
            MockEmailClient::new(),
            chrono::Duration::minutes(5),
            Some(request_timeout),
        )
        .await
    }

    async fn spawn(
        email_client: MockEmailClient,
        otp_ttl: chrono::Duration,
        request_timeout: Option<std::time::Duration>,
    ) -> Self {
        let tokens = JwtTokenService::new(jwt_config());
        let refresh_ttl = jwt_config().refresh_ttl_in_seconds;

        let accounts = AccountService::new(
            HashMapUserStore::new(),
            HashMapOtpStore::new(),
            email_client.clone(),
            Argon2Hasher::new(),
            tokens,
        )
        .with_otp_ttl(otp_ttl);
        let tokens = accounts.tokens();

        let listener = TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        let mut service = AuthService::new(accounts, SessionCookieConfig::new(refresh_ttl, None));
        if let Some(request_timeout) = request_timeout {
            service = service.with_request_timeout(request_timeout);
        }
        tokio::spawn(service.run_standalone(listener, None));

        let http_client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            address,
            http_client,
            email_client,
            tokens,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1{}", self.address, path)
    }

    pub async fn get_health(&self) -> Response {
        self.http_client
            .get(self.url("/health"))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_signup<Body: serde::Serialize>(&self, body: &Body) -> Response {
        self.http_client
            .post(self.url("/signup"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_login<Body: serde::Serialize>(&self, body: &Body) -> Response {
        self.http_client
            .post(self.url("/login"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_refresh(&self, refresh_token: Option<&str>) -> Response {
        let mut request = self.http_client.post(self.url("/refresh"));
        if let Some(token) = refresh_token {
            request = request.header("Cookie", format!("refresh_token={token}"));
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn post_forgot_password(&self, email: &str) -> Response {
        self.http_client
            .post(self.url("/forgotpassword"))
            .json(&json!({ "email": email }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_verify_otp(&self, email: &str, otp: &str) -> Response {
        self.http_client
            .post(self.url("/verify_otp"))
            .json(&json!({ "email": email, "otp": otp }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Sends the reset token in the `token` header.
    pub async fn post_reset_password(
        &self,
        reset_token: &str,
        email: &str,
        new_password: &str,
    ) -> Response {
        self.http_client
            .post(self.url("/password/reset"))
            .header("token", reset_token)
            .json(&json!({ "email": email, "new_password": new_password }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_reset_password_with_bearer(
        &self,
        reset_token: &str,
        email: &str,
        new_password: &str,
    ) -> Response {
        self.http_client
            .post(self.url("/password/reset"))
            .bearer_auth(reset_token)
            .json(&json!({ "email": email, "new_password": new_password }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_user(&self, access_token: &str, user_id: &str) -> Response {
        self.http_client
            .get(self.url(&format!("/user/getuser/{user_id}")))
            .bearer_auth(access_token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_all(&self, access_token: &str, query: &str) -> Response {
        self.http_client
            .get(self.url(&format!("/user/getall{query}")))
            .bearer_auth(access_token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn patch_update_user<Body: serde::Serialize>(
        &self,
        access_token: &str,
        body: &Body,
    ) -> Response {
        self.http_client
            .patch(self.url("/user/update_user"))
            .bearer_auth(access_token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_delete_user(&self, access_token: &str, user_id: &str) -> Response {
        self.http_client
            .post(self.url(&format!("/user/delete/{user_id}")))
            .bearer_auth(access_token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_logout(&self, access_token: Option<&str>) -> Response {
        let mut request = self.http_client.post(self.url("/user/logout"));
        if let Some(token) = access_token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn signup(&self, username: &str, email: &str, user_type: &str) -> UserProfile {
        let response = self
            .post_signup(&signup_body(username, email, PASSWORD, user_type))
            .await;
        assert_eq!(response.status().as_u16(), 201);
        let body: Value = response.json().await.unwrap();
        serde_json::from_value(body["user"].clone()).unwrap()
    }

    pub async fn login(&self, email: &str, password: &str) -> LoggedIn {
        let response = self
            .post_login(&json!({ "email": email, "password": password }))
            .await;
        assert_eq!(response.status().as_u16(), 200);
        let refresh_cookie = refresh_cookie(&response).expect("login sets the refresh cookie");
        let body: Value = response.json().await.unwrap();

        LoggedIn {
            user: serde_json::from_value(body["user"].clone()).unwrap(),
            access_token: body["token"].as_str().unwrap().to_string(),
            refresh_cookie,
        }
    }

    pub async fn signup_and_login(&self, username: &str, email: &str, user_type: &str) -> LoggedIn {
        self.signup(username, email, user_type).await;
        self.login(email, PASSWORD).await
    }

    /// The code carried by the most recent reset email.
    pub async fn latest_otp(&self) -> String {
        let sent = self.email_client.sent_emails().await;
        let email = sent.last().expect("no email was sent");
        email
            .text_content
            .trim()
            .rsplit(' ')
            .next()
            .unwrap()
            .to_string()
    }

    pub async fn reset_token_for(&self, email: &str) -> String {
        assert_eq!(self.post_forgot_password(email).await.status().as_u16(), 200);
        let otp = self.latest_otp().await;
        let response = self.post_verify_otp(email, &otp).await;
        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        body["reset_token"].as_str().unwrap().to_string()
    }
}

pub fn jwt_config() -> JwtAuthConfig {
    JwtAuthConfig::new(Secret::new(test::JWT_SECRET.to_string()))
}

pub fn signup_body(username: &str, email: &str, password: &str, user_type: &str) -> Value {
    json!({
        "username": username,
        "email": email,
        "password": password,
        "user_type": user_type,
    })
}

/// Raw `Set-Cookie` header for the refresh token, if the response set one.
pub fn refresh_cookie_header(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("refresh_token="))
        .map(str::to_string)
}

pub fn refresh_cookie(response: &Response) -> Option<String> {
    refresh_cookie_header(response).and_then(|header| {
        header
            .split(';')
            .next()
            .and_then(|pair| pair.strip_prefix("refresh_token="))
            .map(str::to_string)
    })
}

pub async fn error_message(response: Response) -> String {
    let body: Value = response.json().await.unwrap();
    body["error"].as_str().unwrap().to_string()
}
