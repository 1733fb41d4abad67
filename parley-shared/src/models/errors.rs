use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Coarse failure code attached to rejected authentication requests.
///
/// The named variants are the codes the client attributes to a specific form
/// field; every other code travels verbatim as [`ApiErrorCode::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApiErrorCode {
    /// The email address is already bound to an account.
    EmailInUse,
    /// No account exists for the supplied email address.
    UnknownUser,
    /// The invite code was rejected.
    InvalidInvite,
    /// Any other failure, carried as its wire string.
    Other(String),
}

impl ApiErrorCode {
    /// Wire representation of the code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::EmailInUse => "email_in_use",
            Self::UnknownUser => "unknown_user",
            Self::InvalidInvite => "invalid_invite",
            Self::Other(code) => code,
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ApiErrorCode {
    fn from(value: &str) -> Self {
        match value {
            "email_in_use" => Self::EmailInUse,
            "unknown_user" => Self::UnknownUser,
            "invalid_invite" => Self::InvalidInvite,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ApiErrorCode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "email_in_use" => Self::EmailInUse,
            "unknown_user" => Self::UnknownUser,
            "invalid_invite" => Self::InvalidInvite,
            _ => Self::Other(value),
        }
    }
}

impl Serialize for ApiErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from(String::deserialize(deserializer)?))
    }
}

/// Error envelope returned by the Parley API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, thiserror::Error)]
#[error("{code}{}", .details.as_ref().map(|d| format!(": {d}")).unwrap_or_default())]
pub struct ErrorResponse {
    /// Machine-readable failure code.
    pub code: ApiErrorCode,
    /// Optional human-oriented detail; never required for handling.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Creates an error response carrying only a code.
    pub fn new(code: impl Into<ApiErrorCode>) -> Self {
        Self {
            code: code.into(),
            details: None,
        }
    }

    /// Creates an error response with a code and supporting detail.
    pub fn with_details(code: impl Into<ApiErrorCode>, details: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            details: Some(details.into()),
        }
    }
}
