use std::fmt;

use serde::{Deserialize, Serialize};

use super::{email::Email, role::Role, user_id::UserId, username::Username};

/// Discriminates what a signed token may be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
    Reset,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
            TokenKind::Reset => "reset",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct AccessClaims {
    pub user_id: UserId,
    pub email: Email,
    pub username: Username,
    pub role: Role,
    pub expires_at: i64,
}

impl AccessClaims {
    /// Admins may act on any account, everyone else only on their own.
    pub fn may_act_on(&self, user_id: &UserId) -> bool {
        self.role.is_admin() || &self.user_id == user_id
    }
}

#[derive(Debug, Clone)]
pub struct RefreshClaims {
    pub user_id: UserId,
    pub expires_at: i64,
}

#[derive(Debug, Clone)]
pub struct ResetClaims {
    pub email: Email,
    /// Unique per issued token; a spent id is never accepted again.
    pub token_id: String,
    pub expires_at: i64,
}

#[derive(Debug, Clone)]
pub enum TokenClaims {
    Access(AccessClaims),
    Refresh(RefreshClaims),
    Reset(ResetClaims),
}

impl TokenClaims {
    pub fn kind(&self) -> TokenKind {
        match self {
            TokenClaims::Access(_) => TokenKind::Access,
            TokenClaims::Refresh(_) => TokenKind::Refresh,
            TokenClaims::Reset(_) => TokenKind::Reset,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}
