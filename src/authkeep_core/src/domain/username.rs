use std::fmt;

use serde::Serialize;

use super::user::UserError;

pub const MAX_USERNAME_LENGTH: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn parse(username: String) -> Result<Self, UserError> {
        let trimmed = username.trim();
        let length = trimmed.chars().count();
        if length == 0 || length > MAX_USERNAME_LENGTH {
            return Err(UserError::InvalidUsername);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
