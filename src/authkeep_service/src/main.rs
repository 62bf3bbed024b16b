use std::sync::Arc;

use authkeep_adapters::{
    Argon2Hasher, JwtTokenService, PostgresUserStore, PostmarkEmailClient, RedisOtpStore,
    SessionCookieConfig, config::AuthServiceSetting,
};
use authkeep_application::AccountService;
use authkeep_core::Email;
use authkeep_service::{AuthService, configure_postgresql, configure_redis, init_tracing};
use color_eyre::eyre::Result;
use reqwest::Client as HttpClient;
use secrecy::Secret;
use tokio::{net::TcpListener, sync::RwLock};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = AuthServiceSetting::load()?;

    let pg_pool = configure_postgresql(&settings.postgres).await?;
    let redis_conn = Arc::new(RwLock::new(configure_redis(&settings.redis.host_name)?));

    let user_store = PostgresUserStore::new(pg_pool);
    let otp_store =
        RedisOtpStore::new(redis_conn).with_retention(settings.redis.otp_retention_in_secs);

    let http_client = HttpClient::builder()
        .timeout(settings.email_client.timeout())
        .build()?;
    let sender = settings
        .email_client
        .sender
        .clone()
        .map(|sender| Email::try_from(Secret::new(sender)))
        .transpose()?;
    if sender.is_none() {
        tracing::warn!("No email sender configured; password reset emails are disabled");
    }
    let email_client = PostmarkEmailClient::new(
        settings.email_client.base_url.clone(),
        sender,
        settings.email_client.auth_token.clone(),
        http_client,
    );

    let tokens = JwtTokenService::new(settings.auth.jwt.auth_config());
    let cookies = SessionCookieConfig::new(
        settings.auth.jwt.refresh_ttl_in_secs,
        settings.auth.cookie_domain.clone(),
    );

    let accounts = AccountService::new(
        user_store,
        otp_store,
        email_client,
        Argon2Hasher::new(),
        tokens,
    )
    .with_otp_ttl(settings.auth.otp_ttl());

    let allowed_origins =
        Some(settings.auth.allowed_origins.clone()).filter(|origins| !origins.is_empty());

    let listener = TcpListener::bind(settings.application.address.as_str()).await?;

    AuthService::new(accounts, cookies)
        .with_request_timeout(settings.application.request_timeout())
        .run_standalone(listener, allowed_origins)
        .await?;

    Ok(())
}
