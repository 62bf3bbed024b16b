use std::time::Duration;

use authkeep_adapters::{
    AccessTokenValidator, ResetTokenValidator, SessionCookieConfig, config::AllowedOrigins,
};
use authkeep_application::AccountService;
use authkeep_axum::{
    AppState, authenticate,
    routes::{
        delete_user, forgot_password, get_user, health, list_users, login, logout, refresh,
        reset_password, signup, update_user, verify_otp,
    },
};
use axum::{
    Router,
    http::{
        HeaderName, HeaderValue, Method, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE},
        request,
    },
    middleware::from_fn_with_state,
    routing::{get, patch, post},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(100);

/// All account routes, mounted under `/v1`.
pub struct AuthService {
    router: Router,
    request_timeout: Duration,
}

impl AuthService {
    /// Access token routes and the reset route each get their own validator;
    /// the token service behind both is the one `accounts` issues with.
    pub fn new(accounts: AccountService, cookies: SessionCookieConfig) -> Self {
        let tokens = accounts.tokens();
        let access_validator = AccessTokenValidator::new(tokens.clone());
        let reset_validator = ResetTokenValidator::new(tokens);

        let user_routes = Router::new()
            .route("/user/getuser/{id}", get(get_user))
            .route("/user/getall", get(list_users))
            .route("/user/update_user", patch(update_user))
            .route("/user/delete/{id}", post(delete_user))
            .route("/user/logout", post(logout))
            .route_layer(from_fn_with_state(
                access_validator,
                authenticate::<AccessTokenValidator>,
            ));

        let reset_routes = Router::new()
            .route("/password/reset", post(reset_password))
            .route_layer(from_fn_with_state(
                reset_validator,
                authenticate::<ResetTokenValidator>,
            ));

        let api = Router::new()
            .route("/signup", post(signup))
            .route("/login", post(login))
            .route("/refresh", post(refresh))
            .route("/forgotpassword", post(forgot_password))
            .route("/verify_otp", post(verify_otp))
            .route("/health", get(health))
            .merge(user_routes)
            .merge(reset_routes)
            .with_state(AppState::new(accounts, cookies));

        Self {
            router: Router::new().nest("/v1", api),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Requests running past the timeout are answered with `408 Request Timeout`.
    fn with_timeout_layer(mut self) -> Self {
        self.router = self.router.layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            self.request_timeout,
        ));
        self
    }

    /// Convert the AuthService into a router that can be mounted on another router
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional list of origins allowed to make credentialed requests
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        self = self.with_timeout_layer();
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PATCH])
                .allow_headers([
                    CONTENT_TYPE,
                    AUTHORIZATION,
                    HeaderName::from_static(authkeep_adapters::auth_validation::RESET_TOKEN_HEADER),
                ])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the auth service as a standalone server
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Auth service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
