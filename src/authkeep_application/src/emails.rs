use askama::Template;

pub const RESET_PASSWORD_SUBJECT: &str = "Reset your password";

#[derive(Template)]
#[template(path = "reset_password.html")]
pub struct ResetPasswordEmail<'a> {
    pub otp: &'a str,
    pub ttl_minutes: i64,
}

impl ResetPasswordEmail<'_> {
    pub fn text(&self) -> String {
        format!("Your OTP code is: {}", self.otp)
    }
}
