use async_trait::async_trait;

/// Validates the credentials carried by an inbound request.
///
/// Validators pull a token out of the request parts, verify it and hand the
/// resulting claims to protected routes. Access and reset tokens both arrive as
/// bearer credentials but yield different claim sets, so each has its own
/// validator.
///
/// The validator receives `RequestParts` (headers, method, URI, extensions) rather
/// than the full request to avoid issues with non-`Sync` request bodies.
#[async_trait]
pub trait AuthValidator: Clone + Send + Sync + 'static {
    /// Claims made available to the route handler on success.
    type Claims: Clone + Send + Sync + 'static;

    /// Typically `http::request::Parts`.
    type RequestParts;

    type Error: std::error::Error + Send + Sync + 'static;

    /// # Errors
    ///
    /// Returns an error if:
    /// - No token is present
    /// - The token is malformed, expired or of the wrong kind
    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error>;
}
