use authkeep_application::AccountService;
use authkeep_core::{AccessClaims, Pagination, UserProfile};
use axum::{
    Extension, Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::error::AccountApiError;

/// Admin only. Unparseable or non-positive paging values fall back to defaults.
#[tracing::instrument(name = "List users", skip(accounts, claims))]
pub async fn list_users(
    State(accounts): State<AccountService>,
    Extension(claims): Extension<AccessClaims>,
    Query(query): Query<ListUsersQuery>,
) -> Result<impl IntoResponse, AccountApiError> {
    let pagination = Pagination::new(
        lenient_number(query.page.as_deref()),
        lenient_number(query.record_per_page.as_deref()),
    );

    let page = accounts.get_all(&claims, pagination).await?;

    Ok(Json(ListUsersResponse {
        users: page.users.iter().map(|user| user.profile()).collect(),
        total_count: page.total_count,
        page: page.pagination.page(),
        record_per_page: page.pagination.page_size(),
    }))
}

fn lenient_number(value: Option<&str>) -> i64 {
    value
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0)
}

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<String>,
    #[serde(rename = "recordPerPage")]
    pub record_per_page: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserProfile>,
    pub total_count: u64,
    pub page: u32,
    pub record_per_page: u32,
}
