//! Field model and validation logic for the authentication forms.
//!
//! This module contains the field kinds and validation functions used by the
//! login and registration forms, extracted from the form container to enable
//! easier testing.

use once_cell::sync::Lazy;
use regex::Regex;
use strum_macros::EnumIter;

/// Matches `local@domain.tld`: letters, digits and `._%+-` in the local part,
/// letters, digits and `.-` in the domain, and a TLD of two or more letters.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern compiles")
});

/// Semantic role of a form input.
///
/// The kind selects the validation rule set, the transport name, and the
/// rendered input type. Transport aliasing does not change which rules run:
/// `current_password` travels as `password` but validates under its original
/// kind's rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum FieldKind {
    /// Sign-in email address.
    Email,
    /// Desired username during registration.
    Username,
    /// Password being entered or set.
    Password,
    /// Invite code for invite-only servers.
    Invite,
    /// Email address during registration.
    RegEmail,
    /// Date of birth during registration.
    Date,
    /// The account's existing password, re-entered for confirmation.
    CurrentPassword,
}

impl FieldKind {
    /// Key naming the field in i18n tables and the input store.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Username => "username",
            Self::Password => "password",
            Self::Invite => "invite",
            Self::RegEmail => "reg_email",
            Self::Date => "date",
            Self::CurrentPassword => "current_password",
        }
    }

    /// Key under which the field's value is sent to the server.
    ///
    /// `current_password` travels as `password`; every other kind sends its
    /// own name.
    #[must_use]
    pub fn transport_name(self) -> &'static str {
        match self {
            Self::CurrentPassword => "password",
            other => other.as_str(),
        }
    }

    /// HTML input type rendered for the field.
    #[must_use]
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Invite | Self::Username => "text",
            Self::CurrentPassword => "password",
            other => other.as_str(),
        }
    }
}

/// Validation failures a field value can produce.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ValidationError {
    /// Field is required but empty.
    Required,
    /// Value is below the kind's minimum length.
    TooShort,
    /// Value is above the kind's maximum length.
    TooLong,
    /// Value does not match the kind's expected shape.
    InvalidFormat,
}

impl ValidationError {
    /// Key naming the failure in i18n tables.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::InvalidFormat => "invalid_format",
        }
    }
}

/// Validates a single field value under the rules for its kind.
///
/// Rules run in precedence order and the first failure wins:
///
/// * passwords: required, then 8..=1024 bytes
/// * email addresses: required, then the [`EMAIL_PATTERN`] shape
/// * usernames: required, then 2..=32 bytes
/// * everything else: required only
///
/// Failures are returned as data; this function never panics and has no side
/// effects.
pub fn validate(kind: FieldKind, value: &str) -> Result<(), ValidationError> {
    match kind {
        FieldKind::Password | FieldKind::CurrentPassword => {
            if value.is_empty() {
                Err(ValidationError::Required)
            } else if value.len() < 8 {
                Err(ValidationError::TooShort)
            } else if value.len() > 1024 {
                Err(ValidationError::TooLong)
            } else {
                Ok(())
            }
        }
        FieldKind::Email | FieldKind::RegEmail => {
            if value.is_empty() {
                Err(ValidationError::Required)
            } else if !EMAIL_PATTERN.is_match(value) {
                Err(ValidationError::InvalidFormat)
            } else {
                Ok(())
            }
        }
        FieldKind::Username => {
            if value.is_empty() {
                Err(ValidationError::Required)
            } else if value.len() < 2 {
                Err(ValidationError::TooShort)
            } else if value.len() > 32 {
                Err(ValidationError::TooLong)
            } else {
                Ok(())
            }
        }
        FieldKind::Invite | FieldKind::Date => {
            if value.is_empty() {
                Err(ValidationError::Required)
            } else {
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_kind_has_transport_and_input_mappings() {
        for kind in FieldKind::iter() {
            assert!(!kind.transport_name().is_empty());
            assert!(!kind.input_type().is_empty());
        }
    }

    #[test]
    fn password_boundaries() {
        assert_eq!(
            validate(FieldKind::Password, ""),
            Err(ValidationError::Required)
        );
        assert_eq!(
            validate(FieldKind::Password, "1234567"),
            Err(ValidationError::TooShort)
        );
        assert!(validate(FieldKind::Password, "12345678").is_ok());
        assert!(validate(FieldKind::Password, &"a".repeat(1024)).is_ok());
        assert_eq!(
            validate(FieldKind::Password, &"a".repeat(1025)),
            Err(ValidationError::TooLong)
        );
    }

    #[test]
    fn current_password_validates_under_password_rules() {
        assert_eq!(
            validate(FieldKind::CurrentPassword, ""),
            Err(ValidationError::Required)
        );
        assert_eq!(
            validate(FieldKind::CurrentPassword, "short"),
            Err(ValidationError::TooShort)
        );
        assert!(validate(FieldKind::CurrentPassword, "long enough").is_ok());
    }

    #[test]
    fn username_bounds_are_inclusive() {
        assert_eq!(
            validate(FieldKind::Username, ""),
            Err(ValidationError::Required)
        );
        assert_eq!(
            validate(FieldKind::Username, "a"),
            Err(ValidationError::TooShort)
        );
        assert!(validate(FieldKind::Username, "ab").is_ok());
        assert!(validate(FieldKind::Username, &"u".repeat(32)).is_ok());
        assert_eq!(
            validate(FieldKind::Username, &"u".repeat(33)),
            Err(ValidationError::TooLong)
        );
    }

    #[test]
    fn email_shape() {
        assert!(validate(FieldKind::Email, "a@b.co").is_ok());
        assert!(validate(FieldKind::Email, "User.Name+tag@Example.COM").is_ok());

        assert_eq!(
            validate(FieldKind::Email, ""),
            Err(ValidationError::Required)
        );
        for bad in ["a@b", "a.com", "@b.com", "a@.co", "a b@c.co"] {
            assert_eq!(
                validate(FieldKind::Email, bad),
                Err(ValidationError::InvalidFormat),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn reg_email_shares_email_rules() {
        assert!(validate(FieldKind::RegEmail, "a@b.co").is_ok());
        assert_eq!(
            validate(FieldKind::RegEmail, "a@b"),
            Err(ValidationError::InvalidFormat)
        );
    }

    #[test]
    fn invite_and_date_are_required_only() {
        for kind in [FieldKind::Invite, FieldKind::Date] {
            assert_eq!(validate(kind, ""), Err(ValidationError::Required));
            assert!(validate(kind, "anything").is_ok());
        }
    }

    #[test]
    fn transport_names_alias_current_password() {
        assert_eq!(FieldKind::CurrentPassword.transport_name(), "password");
        assert_eq!(FieldKind::Email.transport_name(), "email");
        assert_eq!(FieldKind::RegEmail.transport_name(), "reg_email");
        assert_eq!(FieldKind::Invite.transport_name(), "invite");
    }

    #[test]
    fn input_types() {
        assert_eq!(FieldKind::Invite.input_type(), "text");
        assert_eq!(FieldKind::Username.input_type(), "text");
        assert_eq!(FieldKind::CurrentPassword.input_type(), "password");
        assert_eq!(FieldKind::Password.input_type(), "password");
        assert_eq!(FieldKind::Email.input_type(), "email");
        assert_eq!(FieldKind::Date.input_type(), "date");
    }
}
