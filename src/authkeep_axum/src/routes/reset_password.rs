use authkeep_application::AccountService;
use authkeep_core::{Email, Password, ResetClaims};
use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use secrecy::Secret;
use serde::Deserialize;

use crate::{error::AccountApiError, routes::MessageResponse};

/// Expects the reset token to have been checked by middleware, with its
/// claims provided via `Extension`.
#[tracing::instrument(name = "Reset password", skip(accounts, claims, payload))]
pub async fn reset_password(
    State(accounts): State<AccountService>,
    Extension(claims): Extension<ResetClaims>,
    payload: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AccountApiError> {
    let Json(request) = payload?;
    let email = Email::try_from(request.email)?;
    let new_password = Password::try_from(request.new_password)?;

    accounts
        .reset_password(&claims, email, new_password)
        .await?;

    Ok(Json(MessageResponse::new("Password updated successfully")))
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: Secret<String>,
    pub new_password: Secret<String>,
}
