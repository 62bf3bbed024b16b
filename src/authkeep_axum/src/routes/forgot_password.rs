use authkeep_application::AccountService;
use authkeep_core::Email;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::error::AccountApiError;

#[tracing::instrument(name = "Forgot password", skip(accounts, payload))]
pub async fn forgot_password(
    State(accounts): State<AccountService>,
    payload: Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AccountApiError> {
    let Json(request) = payload?;
    let email = Email::try_from(request.email)?;

    accounts.forgot_password(email.clone()).await?;

    Ok(Json(ForgotPasswordResponse {
        message: "Password reset email sent successfully".to_string(),
        email: email.as_ref().expose_secret().clone(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Secret<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ForgotPasswordResponse {
    pub message: String,
    pub email: String,
}
