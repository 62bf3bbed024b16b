use authkeep_application::AccountService;
use authkeep_core::{AccessClaims, UserId};
use axum::{
    Extension, Json,
    extract::{Path, State, rejection::PathRejection},
    response::IntoResponse,
};

use crate::{error::AccountApiError, routes::MessageResponse};

#[tracing::instrument(name = "Delete user", skip(accounts, claims, user_id))]
pub async fn delete_user(
    State(accounts): State<AccountService>,
    Extension(claims): Extension<AccessClaims>,
    user_id: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AccountApiError> {
    let Path(user_id) = user_id?;
    let user_id = UserId::parse(&user_id)?;

    accounts.delete_user(&claims, user_id).await?;

    Ok(Json(MessageResponse::new(
        "account has been successfully deleted",
    )))
}
