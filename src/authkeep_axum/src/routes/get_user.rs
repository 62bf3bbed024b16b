use authkeep_application::AccountService;
use authkeep_core::{AccessClaims, UserId};
use axum::{
    Extension, Json,
    extract::{Path, State, rejection::PathRejection},
    response::IntoResponse,
};

use crate::error::AccountApiError;

#[tracing::instrument(name = "Get user", skip(accounts, claims, user_id))]
pub async fn get_user(
    State(accounts): State<AccountService>,
    Extension(claims): Extension<AccessClaims>,
    user_id: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AccountApiError> {
    let Path(user_id) = user_id?;
    let user_id = UserId::parse(&user_id)?;

    let profile = accounts.get_user(&claims, user_id).await?;

    Ok(Json(profile))
}
