use authkeep_adapters::SessionCookieConfig;
use authkeep_core::AccessClaims;
use axum::{Extension, Json, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;

use crate::routes::MessageResponse;

/// Clears the refresh cookie. Issued tokens stay valid until they expire.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout(
    State(cookies): State<SessionCookieConfig>,
    Extension(claims): Extension<AccessClaims>,
    jar: CookieJar,
) -> impl IntoResponse {
    tracing::info!(user_id = %claims.user_id.as_uuid(), "user logged out");
    (
        jar.add(cookies.create_removal_cookie()),
        Json(MessageResponse::new("logged out successfully")),
    )
}
