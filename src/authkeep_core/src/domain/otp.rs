use chrono::{DateTime, Utc};
use rand::Rng;
use thiserror::Error;

use super::email::Email;

pub const OTP_LENGTH: usize = 6;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OtpError {
    #[error("OTP must be exactly 6 digits")]
    Malformed,
    #[error("Invalid OTP")]
    Invalid,
    #[error("OTP expired")]
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Uniformly random code in `000000..=999999`.
    pub fn generate() -> Self {
        let value = rand::rng().random_range(0..1_000_000u32);
        Self(format!("{value:06}"))
    }

    pub fn parse(code: &str) -> Result<Self, OtpError> {
        let code = code.trim();
        if code.len() != OTP_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(OtpError::Malformed);
        }
        Ok(Self(code.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for OtpCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct OtpRecord {
    pub email: Email,
    pub code: OtpCode,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
}

impl OtpRecord {
    pub fn new(email: Email, code: OtpCode, expires_at: DateTime<Utc>) -> Self {
        Self {
            email,
            code,
            expires_at,
            used: false,
        }
    }

    /// Consumes the record if `code` matches, it is unused and not yet expired.
    ///
    /// A used record or a wrong code is `Invalid`; a matching unused record past
    /// its expiry is `Expired` and stays unused.
    pub fn redeem(&mut self, code: &OtpCode, now: DateTime<Utc>) -> Result<(), OtpError> {
        if self.used || &self.code != code {
            return Err(OtpError::Invalid);
        }
        if now > self.expires_at {
            return Err(OtpError::Expired);
        }
        self.used = true;
        Ok(())
    }
}
