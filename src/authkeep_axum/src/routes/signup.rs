use authkeep_application::AccountService;
use authkeep_core::{NewUser, UserProfile};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::error::AccountApiError;

#[tracing::instrument(name = "Signup", skip(accounts, payload))]
pub async fn signup(
    State(accounts): State<AccountService>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AccountApiError> {
    let Json(request) = payload?;
    let candidate = NewUser::parse(
        request.username,
        request.email,
        request.password,
        &request.user_type,
    )?;

    let user = accounts.signup(candidate).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            success: true,
            message: "user account created successfully!".to_string(),
            user,
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: Secret<String>,
    pub password: Secret<String>,
    pub user_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub success: bool,
    pub message: String,
    pub user: UserProfile,
}
