//! Account route handlers.
//!
//! Protected handlers read their claims from request extensions populated by
//! [`crate::middleware::authenticate`].

pub mod delete_user;
pub mod forgot_password;
pub mod get_user;
pub mod health;
pub mod list_users;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod reset_password;
pub mod signup;
pub mod update_user;
pub mod verify_otp;

use serde::{Deserialize, Serialize};

pub use delete_user::delete_user;
pub use forgot_password::forgot_password;
pub use get_user::get_user;
pub use health::health;
pub use list_users::list_users;
pub use login::login;
pub use logout::logout;
pub use refresh::refresh;
pub use reset_password::reset_password;
pub use signup::signup;
pub use update_user::update_user;
pub use verify_otp::verify_otp;

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
