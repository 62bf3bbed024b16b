use std::time::Duration;

use authkeep_adapters::config::PostgresSetting;
use color_eyre::eyre::Result;
use redis::{Client, RedisResult};
use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};

const POSTGRES_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connects to Postgres and runs pending migrations.
pub async fn configure_postgresql(settings: &PostgresSetting) -> Result<PgPool> {
    let pg_pool = get_postgres_pool(settings.url.expose_secret(), settings.max_connections).await?;

    sqlx::migrate!().run(&pg_pool).await?;

    Ok(pg_pool)
}

pub fn configure_redis(redis_host_name: &str) -> Result<redis::Connection> {
    Ok(get_redis_client(redis_host_name)?.get_connection()?)
}

pub async fn get_postgres_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(POSTGRES_ACQUIRE_TIMEOUT)
        .connect(url)
        .await
}

pub fn get_redis_client(redis_hostname: &str) -> RedisResult<Client> {
    let redis_url = format!("redis://{}/", redis_hostname);
    redis::Client::open(redis_url)
}
