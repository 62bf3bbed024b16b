use authkeep_adapters::SessionCookieConfig;
use authkeep_application::AccountService;
use authkeep_core::{Email, Password, UserProfile};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::error::AccountApiError;

/// The access token goes into the body, the refresh token into an HttpOnly cookie.
#[tracing::instrument(name = "Login", skip(accounts, cookies, jar, payload))]
pub async fn login(
    State(accounts): State<AccountService>,
    State(cookies): State<SessionCookieConfig>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AccountApiError> {
    let Json(request) = payload?;
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    let session = accounts.login(email, password).await?;
    let cookie = cookies.create_refresh_cookie(session.tokens.refresh_token)?;

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            message: "login successful".to_string(),
            token: session.tokens.access_token,
            user: session.profile,
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: UserProfile,
}
