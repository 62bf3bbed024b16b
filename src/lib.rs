//! # authkeep - User Account and Authentication Service
//!
//! Facade crate that re-exports the public APIs of the authkeep workspace.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `User`, `OtpCode`, token claims
//! - **Ports**: `UserStore`, `OtpStore`, `TokenService`, `CredentialHasher`, `EmailClient`
//! - **Use cases**: `SignupUseCase`, `LoginUseCase`, `RefreshUseCase`, etc., behind `AccountService`
//! - **Adapters**: `JwtTokenService`, `Argon2Hasher`, `PostgresUserStore`, `RedisOtpStore`,
//!   `PostmarkEmailClient`, configuration
//! - **Service**: `AuthService`, the router mounted under `/v1`

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use authkeep_core::*;
}

pub use authkeep_core::{
    AccessClaims, Email, NewUser, OtpCode, Pagination, Password, RefreshClaims, ResetClaims, Role,
    TokenKind, User, UserError, UserId, UserPage, UserProfile, Username,
};

// ============================================================================
// Ports
// ============================================================================

pub use authkeep_core::{
    CredentialHasher, EmailClient, OtpStore, OtpStoreError, TokenError, TokenService, UserStore,
    UserStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use authkeep_application::use_cases::*;
}

pub use authkeep_application::AccountService;

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Axum routes, middleware and error mapping
    pub mod http {
        pub use authkeep_axum::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use authkeep_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use authkeep_adapters::email::*;
    }

    /// JWT issuing and validation
    pub mod auth {
        pub use authkeep_adapters::auth_validation::*;
    }

    /// Configuration
    pub mod config {
        pub use authkeep_adapters::config::*;
    }
}

pub use authkeep_adapters::{
    Argon2Hasher, HashMapOtpStore, HashMapUserStore, JwtTokenService, MockEmailClient,
    PostgresUserStore, PostmarkEmailClient, RedisOtpStore,
};

// ============================================================================
// Auth Service (Main Entry Point)
// ============================================================================

pub use authkeep_service::{AuthService, configure_postgresql, configure_redis, get_redis_client};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the store and service traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use axum;
pub use http;
pub use tokio;
