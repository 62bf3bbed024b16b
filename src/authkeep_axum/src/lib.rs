//! Axum routes, authentication middleware and error mapping for the account
//! service.

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{AccountApiError, ErrorResponse};
pub use middleware::authenticate;
pub use state::AppState;
