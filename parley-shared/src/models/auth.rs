use serde::{Deserialize, Serialize};

use super::User;

/// Request to open a session with email/password credentials.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionRequest {
    /// Account email address.
    pub email: String,

    /// Account password.
    pub password: String,

    /// CAPTCHA token, present when the server requires one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub captcha: Option<String>,
}

/// Response to a successful session request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionResponse {
    /// Opaque session token presented on subsequent requests.
    pub token: String,

    /// The signed-in account.
    pub user: User,
}

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateAccountRequest {
    /// Email address to register under.
    pub email: String,

    /// Desired username.
    pub username: String,

    /// Account password.
    pub password: String,

    /// Date of birth, as entered.
    pub date_of_birth: String,

    /// Invite code, required when the server is invite-only.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub invite: Option<String>,

    /// CAPTCHA token, present when the server requires one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub captcha: Option<String>,
}

/// Request a password-reset email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendResetRequest {
    /// Email address of the account to reset.
    pub email: String,

    /// CAPTCHA token, present when the server requires one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub captcha: Option<String>,
}

/// Complete a password reset using the token from the reset email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasswordResetRequest {
    /// Token from the reset email.
    pub token: String,

    /// Replacement password.
    pub password: String,
}

/// Request a fresh account-verification email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResendVerificationRequest {
    /// Email address of the unverified account.
    pub email: String,

    /// CAPTCHA token, present when the server requires one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub captcha: Option<String>,
}
