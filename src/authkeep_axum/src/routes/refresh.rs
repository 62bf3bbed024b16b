use authkeep_adapters::{SessionCookieConfig, auth_validation::extract_token};
use authkeep_application::AccountService;
use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::error::AccountApiError;

/// Rotates the session: a fresh access token in the body and a fresh refresh cookie.
#[tracing::instrument(name = "Refresh", skip_all)]
pub async fn refresh(
    State(accounts): State<AccountService>,
    State(cookies): State<SessionCookieConfig>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AccountApiError> {
    let refresh_token = extract_token(&jar, &cookies.cookie_name)?.to_owned();

    let session = accounts.refresh(&refresh_token).await?;
    let cookie = cookies.create_refresh_cookie(session.tokens.refresh_token)?;

    Ok((
        jar.add(cookie),
        Json(RefreshResponse {
            message: "Tokens are refreshed".to_string(),
            new_access_token: session.tokens.access_token,
        }),
    ))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub message: String,
    pub new_access_token: String,
}
