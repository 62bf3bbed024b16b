use std::sync::{Arc, LazyLock};

use authkeep_core::{Email, OtpCode, OtpRecord, OtpStore, OtpStoreError};
use chrono::{DateTime, Utc};
use redis::{Connection, Script};
use secrecy::ExposeSecret;
use tokio::sync::RwLock;

/// Keeps an expired record around long enough to report it as expired rather
/// than unknown; Redis drops it after that.
pub const DEFAULT_RETENTION_SECONDS: i64 = 60 * 60;

// 1 = redeemed, 0 = no matching unused code, -1 = matching code past expiry.
static REDEEM_SCRIPT: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r#"
        local fields = redis.call('HMGET', KEYS[1], 'code', 'used', 'expires_at')
        if not fields[1] or fields[1] ~= ARGV[1] or fields[2] == '1' then
            return 0
        end
        if tonumber(fields[3]) < tonumber(ARGV[2]) then
            return -1
        end
        redis.call('HSET', KEYS[1], 'used', '1')
        return 1
        "#,
    )
});

#[derive(Clone)]
pub struct RedisOtpStore {
    conn: Arc<RwLock<Connection>>,
    retention_seconds: i64,
}

impl RedisOtpStore {
    pub fn new(conn: Arc<RwLock<Connection>>) -> Self {
        Self {
            conn,
            retention_seconds: DEFAULT_RETENTION_SECONDS,
        }
    }

    pub fn with_retention(mut self, retention_seconds: i64) -> Self {
        self.retention_seconds = retention_seconds;
        self
    }
}

#[async_trait::async_trait]
impl OtpStore for RedisOtpStore {
    #[tracing::instrument(name = "Storing OTP in Redis", skip_all)]
    async fn replace_code(&self, record: OtpRecord) -> Result<(), OtpStoreError> {
        let key = get_key(&record.email);
        let remaining = (record.expires_at - Utc::now()).num_seconds().max(0);
        let fields = [
            ("code", record.code.as_str().to_owned()),
            ("expires_at", record.expires_at.timestamp().to_string()),
            ("used", if record.used { "1" } else { "0" }.to_owned()),
        ];

        let mut conn = self.conn.write().await;
        redis::pipe()
            .atomic()
            .del(&key)
            .ignore()
            .hset_multiple(&key, &fields)
            .ignore()
            .expire(&key, remaining + self.retention_seconds)
            .ignore()
            .query::<()>(&mut *conn)
            .map_err(|e| OtpStoreError::UnexpectedError(e.to_string()))
    }

    #[tracing::instrument(name = "Redeeming OTP in Redis", skip_all)]
    async fn redeem_code(
        &self,
        email: &Email,
        code: &OtpCode,
        now: DateTime<Utc>,
    ) -> Result<(), OtpStoreError> {
        let key = get_key(email);

        let mut conn = self.conn.write().await;
        let outcome: i64 = REDEEM_SCRIPT
            .key(&key)
            .arg(code.as_str())
            .arg(now.timestamp())
            .invoke(&mut *conn)
            .map_err(|e| OtpStoreError::UnexpectedError(e.to_string()))?;

        match outcome {
            1 => Ok(()),
            -1 => Err(OtpStoreError::Expired),
            _ => Err(OtpStoreError::InvalidCode),
        }
    }

    #[tracing::instrument(name = "Consuming reset token in Redis", skip_all)]
    async fn consume_reset_token(
        &self,
        token_id: &str,
        expires_at: i64,
    ) -> Result<bool, OtpStoreError> {
        let key = format!("{RESET_TOKEN_KEY_PREFIX}{token_id}");
        let ttl = (expires_at - Utc::now().timestamp()).max(1);

        let mut conn = self.conn.write().await;
        let stored: Option<String> = redis::cmd("SET")
            .arg(&key)
            .arg(1)
            .arg("NX")
            .arg("EX")
            .arg(ttl)
            .query(&mut *conn)
            .map_err(|e| OtpStoreError::UnexpectedError(e.to_string()))?;

        Ok(stored.is_some())
    }
}

const OTP_KEY_PREFIX: &str = "otp:";
const RESET_TOKEN_KEY_PREFIX: &str = "otp:reset:";

fn get_key(email: &Email) -> String {
    format!("{}{}", OTP_KEY_PREFIX, email.as_ref().expose_secret())
}
