pub mod email;
pub mod otp;
pub mod pagination;
pub mod password;
pub mod role;
pub mod token;
pub mod user;
pub mod user_id;
pub mod username;
