use authkeep_application::AccountService;
use authkeep_core::{AccessClaims, Email, UserId, UserProfile, Username};
use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::error::AccountApiError;

/// Updates the caller's own profile unless `user_id` names another record.
#[tracing::instrument(name = "Update user", skip(accounts, claims, payload))]
pub async fn update_user(
    State(accounts): State<AccountService>,
    Extension(claims): Extension<AccessClaims>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AccountApiError> {
    let Json(request) = payload?;
    let target = request
        .user_id
        .as_deref()
        .map(UserId::parse)
        .transpose()?;
    let email = Email::try_from(request.email)?;
    let username = Username::parse(request.username)?;

    let user = accounts
        .update_user(&claims, target, email, username)
        .await?;

    Ok(Json(UpdateUserResponse {
        success: "update successful".to_string(),
        user,
    }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub user_id: Option<String>,
    pub email: Secret<String>,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateUserResponse {
    pub success: String,
    pub user: UserProfile,
}
