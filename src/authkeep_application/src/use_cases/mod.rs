pub mod delete_user;
pub mod forgot_password;
pub mod get_user;
pub mod list_users;
pub mod login;
pub mod refresh;
pub mod reset_password;
pub mod signup;
pub mod update_user;
pub mod verify_otp;

pub use delete_user::{DeleteUserError, DeleteUserUseCase};
pub use forgot_password::{ForgotPasswordError, ForgotPasswordUseCase};
pub use get_user::{GetUserError, GetUserUseCase};
pub use list_users::{ListUsersError, ListUsersUseCase};
pub use login::{AuthenticatedSession, LoginError, LoginUseCase};
pub use refresh::{RefreshError, RefreshUseCase};
pub use reset_password::{ResetPasswordError, ResetPasswordUseCase};
pub use signup::{SignupError, SignupUseCase};
pub use update_user::{UpdateUserError, UpdateUserUseCase};
pub use verify_otp::{VerifyOtpError, VerifyOtpUseCase};
