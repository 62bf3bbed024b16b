//! Mapping from account failures to HTTP responses.
//!
//! Every failure leaves the service as `{"error": "<message>"}` with the status
//! of its kind.

use authkeep_adapters::TokenAuthError;
use authkeep_application::{
    DeleteUserError, ForgotPasswordError, GetUserError, ListUsersError, LoginError, RefreshError,
    ResetPasswordError, SignupError, UpdateUserError, VerifyOtpError,
};
use authkeep_core::{
    EmailClientError, HasherError, OtpError, OtpStoreError, TokenError, UserError, UserStoreError,
};
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccountApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Expired(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("Server misconfiguration: {0}")]
    ServerMisconfiguration(String),
    #[error("Service unavailable: {0}")]
    DependencyFailure(String),
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AccountApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountApiError::Validation(_) => StatusCode::BAD_REQUEST,
            AccountApiError::Conflict(_) => StatusCode::CONFLICT,
            AccountApiError::NotFound(_) => StatusCode::NOT_FOUND,
            AccountApiError::Unauthorized(_) | AccountApiError::Expired(_) => {
                StatusCode::UNAUTHORIZED
            }
            AccountApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            AccountApiError::ServerMisconfiguration(_) | AccountApiError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AccountApiError::DependencyFailure(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AccountApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AccountApiError {
    fn from(rejection: JsonRejection) -> Self {
        AccountApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AccountApiError {
    fn from(rejection: PathRejection) -> Self {
        AccountApiError::Validation(rejection.body_text())
    }
}

impl From<UserError> for AccountApiError {
    fn from(error: UserError) -> Self {
        AccountApiError::Validation(error.to_string())
    }
}

impl From<OtpError> for AccountApiError {
    fn from(error: OtpError) -> Self {
        match error {
            OtpError::Malformed => AccountApiError::Validation(error.to_string()),
            OtpError::Invalid => AccountApiError::Unauthorized(error.to_string()),
            OtpError::Expired => AccountApiError::Expired(error.to_string()),
        }
    }
}

impl From<UserStoreError> for AccountApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserAlreadyExists => AccountApiError::Conflict(error.to_string()),
            UserStoreError::UserNotFound => AccountApiError::NotFound(error.to_string()),
            UserStoreError::UnexpectedError(e) => AccountApiError::DependencyFailure(e),
        }
    }
}

impl From<OtpStoreError> for AccountApiError {
    fn from(error: OtpStoreError) -> Self {
        match error {
            OtpStoreError::InvalidCode => AccountApiError::Unauthorized(error.to_string()),
            OtpStoreError::Expired => AccountApiError::Expired(error.to_string()),
            OtpStoreError::UnexpectedError(e) => AccountApiError::DependencyFailure(e),
        }
    }
}

impl From<TokenError> for AccountApiError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Invalid | TokenError::WrongKind { .. } => {
                AccountApiError::Unauthorized(error.to_string())
            }
            TokenError::Expired => AccountApiError::Expired(error.to_string()),
            TokenError::UnexpectedError(e) => AccountApiError::Unexpected(e),
        }
    }
}

impl From<TokenAuthError> for AccountApiError {
    fn from(error: TokenAuthError) -> Self {
        match error {
            TokenAuthError::MissingToken => AccountApiError::Unauthorized(error.to_string()),
            TokenAuthError::TokenError(e) => e.into(),
            TokenAuthError::UnexpectedError(e) => AccountApiError::Unexpected(e),
        }
    }
}

impl From<EmailClientError> for AccountApiError {
    fn from(error: EmailClientError) -> Self {
        match error {
            EmailClientError::Misconfigured(e) => AccountApiError::ServerMisconfiguration(e),
            EmailClientError::Delivery(e) => AccountApiError::DependencyFailure(e),
        }
    }
}

impl From<HasherError> for AccountApiError {
    fn from(error: HasherError) -> Self {
        AccountApiError::Unexpected(error.to_string())
    }
}

impl From<SignupError> for AccountApiError {
    fn from(error: SignupError) -> Self {
        match error {
            SignupError::UserStoreError(e) => e.into(),
            SignupError::HasherError(e) => e.into(),
        }
    }
}

impl From<LoginError> for AccountApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::UserStoreError(e) => e.into(),
            LoginError::IncorrectPassword => AccountApiError::Unauthorized(error.to_string()),
            LoginError::HasherError(e) => e.into(),
            LoginError::TokenError(e) => e.into(),
        }
    }
}

impl From<RefreshError> for AccountApiError {
    fn from(error: RefreshError) -> Self {
        match error {
            RefreshError::TokenError(e) => e.into(),
            // A refresh token whose subject is gone no longer authenticates anyone.
            RefreshError::UserStoreError(UserStoreError::UserNotFound) => {
                AccountApiError::Unauthorized("Invalid token".to_string())
            }
            RefreshError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<ForgotPasswordError> for AccountApiError {
    fn from(error: ForgotPasswordError) -> Self {
        match error {
            ForgotPasswordError::UserStoreError(e) => e.into(),
            ForgotPasswordError::OtpStoreError(e) => e.into(),
            ForgotPasswordError::EmailClientError(e) => e.into(),
            ForgotPasswordError::TemplateError(e) => AccountApiError::Unexpected(e),
        }
    }
}

impl From<VerifyOtpError> for AccountApiError {
    fn from(error: VerifyOtpError) -> Self {
        match error {
            VerifyOtpError::OtpStoreError(e) => e.into(),
            VerifyOtpError::TokenError(e) => e.into(),
        }
    }
}

impl From<ResetPasswordError> for AccountApiError {
    fn from(error: ResetPasswordError) -> Self {
        match error {
            ResetPasswordError::EmailMismatch | ResetPasswordError::TokenAlreadyUsed => {
                AccountApiError::Unauthorized(error.to_string())
            }
            ResetPasswordError::OtpStoreError(e) => e.into(),
            ResetPasswordError::UserStoreError(e) => e.into(),
            ResetPasswordError::HasherError(e) => e.into(),
        }
    }
}

impl From<ListUsersError> for AccountApiError {
    fn from(error: ListUsersError) -> Self {
        match error {
            ListUsersError::Forbidden => AccountApiError::Forbidden(error.to_string()),
            ListUsersError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<GetUserError> for AccountApiError {
    fn from(error: GetUserError) -> Self {
        match error {
            GetUserError::Forbidden => AccountApiError::Forbidden(error.to_string()),
            GetUserError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<UpdateUserError> for AccountApiError {
    fn from(error: UpdateUserError) -> Self {
        match error {
            UpdateUserError::Forbidden => AccountApiError::Forbidden(error.to_string()),
            UpdateUserError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<DeleteUserError> for AccountApiError {
    fn from(error: DeleteUserError) -> Self {
        match error {
            DeleteUserError::Forbidden => AccountApiError::Forbidden(error.to_string()),
            DeleteUserError::UserStoreError(e) => e.into(),
        }
    }
}
