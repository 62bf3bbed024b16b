use std::collections::HashMap;
use std::sync::Arc;

use authkeep_core::{Email, OtpCode, OtpRecord, OtpStore, OtpStoreError};
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// One record per email; replacing and redeeming both happen under the write lock.
#[derive(Default, Clone)]
pub struct HashMapOtpStore {
    records: Arc<RwLock<HashMap<Email, OtpRecord>>>,
    spent_reset_tokens: Arc<RwLock<HashMap<String, i64>>>,
}

impl HashMapOtpStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl OtpStore for HashMapOtpStore {
    async fn replace_code(&self, record: OtpRecord) -> Result<(), OtpStoreError> {
        let mut records = self.records.write().await;
        records.insert(record.email.clone(), record);
        Ok(())
    }

    async fn redeem_code(
        &self,
        email: &Email,
        code: &OtpCode,
        now: DateTime<Utc>,
    ) -> Result<(), OtpStoreError> {
        let mut records = self.records.write().await;
        let Some(record) = records.get_mut(email) else {
            return Err(OtpStoreError::InvalidCode);
        };
        record.redeem(code, now)?;
        Ok(())
    }

    async fn consume_reset_token(
        &self,
        token_id: &str,
        expires_at: i64,
    ) -> Result<bool, OtpStoreError> {
        let now = Utc::now().timestamp();
        let mut spent = self.spent_reset_tokens.write().await;
        spent.retain(|_, expiry| *expiry >= now);
        if spent.contains_key(token_id) {
            return Ok(false);
        }
        spent.insert(token_id.to_owned(), expires_at);
        Ok(true)
    }
}
