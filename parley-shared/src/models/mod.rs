pub mod auth;
pub mod errors;
pub mod server_config;
pub mod timestamp;
pub mod user;

pub use auth::{
    CreateAccountRequest, PasswordResetRequest, ResendVerificationRequest, SendResetRequest,
    SessionRequest, SessionResponse,
};
pub use errors::{ApiErrorCode, ErrorResponse};
pub use server_config::{CaptchaFeature, Features, ServerConfig};
pub use timestamp::Timestamp;
pub use user::User;
