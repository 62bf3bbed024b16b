use authkeep_application::AccountService;
use authkeep_core::{Email, OtpCode, OtpStoreError};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::error::AccountApiError;

#[tracing::instrument(name = "Verify OTP", skip(accounts, payload))]
pub async fn verify_otp(
    State(accounts): State<AccountService>,
    payload: Result<Json<VerifyOtpRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AccountApiError> {
    let Json(request) = payload?;
    let email = Email::try_from(request.email)?;
    // A code that cannot match any record is reported like any other mismatch.
    let code = OtpCode::parse(&request.otp).map_err(|_| OtpStoreError::InvalidCode)?;

    let reset_token = accounts.verify_otp(email, code).await?;

    Ok(Json(VerifyOtpResponse {
        message: "OTP verified successfully".to_string(),
        reset_token,
    }))
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: Secret<String>,
    pub otp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    pub message: String,
    pub reset_token: String,
}
