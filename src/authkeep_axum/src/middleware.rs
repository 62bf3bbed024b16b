use authkeep_core::AuthValidator;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::request::Parts;

use crate::error::AccountApiError;

/// Runs `validator` against the request and stores its claims as an extension
/// for the wrapped route.
///
/// Installed with `axum::middleware::from_fn_with_state(validator, authenticate::<V>)`.
pub async fn authenticate<V>(
    State(validator): State<V>,
    request: Request,
    next: Next,
) -> Result<Response, AccountApiError>
where
    V: AuthValidator<RequestParts = Parts>,
    AccountApiError: From<V::Error>,
{
    let (parts, body) = request.into_parts();
    let claims = validator.validate(&parts).await.inspect_err(|e| {
        tracing::debug!(error = %e, "rejected credentials");
    })?;

    let mut request = Request::from_parts(parts, body);
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
