pub mod jwt_token_service;
pub mod local_jwt_validator;

pub use jwt_token_service::{
    ACCESS_TOKEN_TTL_SECONDS, JwtAuthConfig, JwtTokenService, REFRESH_TOKEN_TTL_SECONDS,
    RESET_TOKEN_TTL_SECONDS,
};
pub use local_jwt_validator::{
    AccessTokenValidator, REFRESH_COOKIE_NAME, RESET_TOKEN_HEADER, ResetTokenValidator,
    SessionCookieConfig, TokenAuthError, extract_bearer_token, extract_token,
};
