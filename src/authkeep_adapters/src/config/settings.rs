use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use http::HeaderValue;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::constants::{DEFAULT_CONFIG_PATH, env, prod};
use crate::auth_validation::{
    ACCESS_TOKEN_TTL_SECONDS, JwtAuthConfig, REFRESH_TOKEN_TTL_SECONDS, RESET_TOKEN_TTL_SECONDS,
};
use crate::persistence::redis_otp_store::DEFAULT_RETENTION_SECONDS;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthServiceSetting {
    pub application: ApplicationSetting,
    pub auth: AuthSetting,
    pub postgres: PostgresSetting,
    pub redis: RedisSetting,
    pub email_client: EmailClientSetting,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSetting {
    pub address: String,
    pub request_timeout_in_secs: u64,
}

impl ApplicationSetting {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_in_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSetting {
    pub jwt: JwtSetting,
    pub otp_ttl_in_secs: i64,
    pub allowed_origins: AllowedOrigins,
    pub cookie_domain: Option<String>,
}

impl AuthSetting {
    pub fn otp_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.otp_ttl_in_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSetting {
    pub secret: Secret<String>,
    pub access_ttl_in_secs: i64,
    pub refresh_ttl_in_secs: i64,
    pub reset_ttl_in_secs: i64,
}

impl JwtSetting {
    pub fn auth_config(&self) -> JwtAuthConfig {
        JwtAuthConfig {
            jwt_secret: self.secret.clone(),
            access_ttl_in_seconds: self.access_ttl_in_secs,
            refresh_ttl_in_seconds: self.refresh_ttl_in_secs,
            reset_ttl_in_seconds: self.reset_ttl_in_secs,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSetting {
    pub url: Secret<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSetting {
    pub host_name: String,
    pub otp_retention_in_secs: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSetting {
    pub base_url: String,
    pub sender: Option<String>,
    pub auth_token: Secret<String>,
    pub timeout_in_millis: u64,
}

impl EmailClientSetting {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

/// Comma separated list of origins allowed to make credentialed CORS requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub struct AllowedOrigins(Vec<String>);

impl From<String> for AllowedOrigins {
    fn from(value: String) -> Self {
        Self(
            value
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }
}

impl AllowedOrigins {
    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.0.iter().any(|allowed| allowed == origin))
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AuthServiceSetting {
    /// Loads `.env`, the optional config file and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config_path = std::env::var(env::CONFIG_PATH_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        Self::from_sources(
            Some(&config_path),
            Environment::with_prefix(env::ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
            |name| std::env::var(name).ok(),
        )
    }

    /// Layers defaults, an optional file, prefixed environment variables and
    /// the well-known variables returned by `lookup`, later sources winning.
    pub fn from_sources(
        config_path: Option<&str>,
        environment: Environment,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("application.address", prod::APP_ADDRESS)?
            .set_default(
                "application.request_timeout_in_secs",
                prod::REQUEST_TIMEOUT_IN_SECS,
            )?
            .set_default("auth.jwt.secret", "")?
            .set_default("auth.jwt.access_ttl_in_secs", ACCESS_TOKEN_TTL_SECONDS)?
            .set_default("auth.jwt.refresh_ttl_in_secs", REFRESH_TOKEN_TTL_SECONDS)?
            .set_default("auth.jwt.reset_ttl_in_secs", RESET_TOKEN_TTL_SECONDS)?
            .set_default("auth.otp_ttl_in_secs", RESET_TOKEN_TTL_SECONDS)?
            .set_default("auth.allowed_origins", "")?
            .set_default("postgres.url", "")?
            .set_default("postgres.max_connections", prod::POSTGRES_MAX_CONNECTIONS)?
            .set_default("redis.host_name", prod::REDIS_HOST_NAME)?
            .set_default("redis.otp_retention_in_secs", DEFAULT_RETENTION_SECONDS)?
            .set_default("email_client.base_url", prod::email_client::BASE_URL)?
            .set_default("email_client.auth_token", "")?
            .set_default(
                "email_client.timeout_in_millis",
                prod::email_client::TIMEOUT_IN_MILLIS,
            )?;

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(false));
        }

        let settings: Self = builder
            .add_source(environment)
            .set_override_option("auth.jwt.secret", lookup(env::JWT_SECRET_ENV_VAR))?
            .set_override_option("postgres.url", lookup(env::DATABASE_URL_ENV_VAR))?
            .set_override_option("redis.host_name", lookup(env::REDIS_HOST_NAME_ENV_VAR))?
            .set_override_option(
                "email_client.auth_token",
                lookup(env::POSTMARK_AUTH_TOKEN_ENV_VAR),
            )?
            .set_override_option("email_client.sender", lookup(env::EMAIL_SENDER_ENV_VAR))?
            .set_override_option(
                "auth.allowed_origins",
                lookup(env::ALLOWED_ORIGINS_ENV_VAR),
            )?
            .set_override_option("auth.cookie_domain", lookup(env::COOKIE_DOMAIN_ENV_VAR))?
            .build()?
            .try_deserialize()?;

        if settings.auth.jwt.secret.expose_secret().trim().is_empty() {
            return Err(ConfigError::Message(format!(
                "{} must be set to a non-empty value",
                env::JWT_SECRET_ENV_VAR
            )));
        }

        Ok(settings)
    }
}
