//! Submission state machine for the authentication forms.
//!
//! [`LoginFlow`] owns one form instance's lifecycle: it validates the page's
//! active fields, decides whether a CAPTCHA challenge interposes, hands a
//! ready-to-send payload back to the container, and folds the settlement of
//! the network call into state. All IO stays with the caller; every method
//! here is synchronous and touches nothing outside `self`.

use std::collections::HashMap;
use std::mem;

use shared::models::{ApiErrorCode, Features};
use strum_macros::EnumIter;

use super::login_validation::{FieldKind, ValidationError, validate};

/// Page variants of the authentication form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum FormPage {
    /// Sign in with an existing account.
    Login,
    /// Register a new account.
    Create,
    /// Request a password-reset email.
    SendReset,
    /// Set a new password using an emailed token.
    Reset,
    /// Request a fresh verification email.
    Resend,
}

impl FormPage {
    /// Key naming the page in i18n tables and route keys.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Create => "create",
            Self::SendReset => "send_reset",
            Self::Reset => "reset",
            Self::Resend => "resend",
        }
    }

    /// Fields validated and rendered for this page, in render order.
    ///
    /// Registration appends the invite field when the server is invite-only.
    #[must_use]
    pub fn active_fields(self, invite_only: bool) -> &'static [FieldKind] {
        match self {
            Self::Login => &[FieldKind::Email, FieldKind::Password],
            Self::Create if invite_only => &[
                FieldKind::RegEmail,
                FieldKind::Username,
                FieldKind::Date,
                FieldKind::Password,
                FieldKind::Invite,
            ],
            Self::Create => &[
                FieldKind::RegEmail,
                FieldKind::Username,
                FieldKind::Date,
                FieldKind::Password,
            ],
            Self::SendReset | Self::Resend => &[FieldKind::Email],
            Self::Reset => &[FieldKind::Password],
        }
    }

    /// Whether this page participates in CAPTCHA challenges.
    ///
    /// The reset flow is already gated by the emailed token and never
    /// challenges, whatever the server configuration says.
    #[must_use]
    pub fn challengeable(self) -> bool {
        !matches!(self, Self::Reset)
    }
}

/// Current value of every form field.
///
/// All fields default to the empty string. The invite code is seeded from the
/// URL once at construction and only read afterwards; the store is written by
/// input events and read, never written, by [`LoginFlow`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInputs {
    /// Sign-in email address.
    pub email: String,
    /// Registration email address.
    pub reg_email: String,
    /// Desired username.
    pub username: String,
    /// Password value (shared by the password kinds).
    pub password: String,
    /// Invite code.
    pub invite: String,
    /// Date of birth.
    pub date: String,
}

impl FormInputs {
    /// Inputs with the invite field seeded from a URL invite code.
    #[must_use]
    pub fn with_invite(invite: Option<String>) -> Self {
        Self {
            invite: invite.unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Current value for a field kind.
    #[must_use]
    pub fn value(&self, kind: FieldKind) -> &str {
        match kind {
            FieldKind::Email => &self.email,
            FieldKind::RegEmail => &self.reg_email,
            FieldKind::Username => &self.username,
            FieldKind::Password | FieldKind::CurrentPassword => &self.password,
            FieldKind::Invite => &self.invite,
            FieldKind::Date => &self.date,
        }
    }

    /// Replaces the value for a field kind.
    pub fn set(&mut self, kind: FieldKind, value: String) {
        match kind {
            FieldKind::Email => self.email = value,
            FieldKind::RegEmail => self.reg_email = value,
            FieldKind::Username => self.username = value,
            FieldKind::Password | FieldKind::CurrentPassword => self.password = value,
            FieldKind::Invite => self.invite = value,
            FieldKind::Date => self.date = value,
        }
    }
}

/// Validated field values handed to the submit handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitPayload {
    /// Snapshot of the inputs taken when validation passed.
    pub fields: FormInputs,
    /// CAPTCHA token, present once a challenge has been passed.
    pub captcha: Option<String>,
}

/// Pending CAPTCHA challenge.
///
/// Holds the validated inputs until the user passes or cancels the widget.
/// Owned by [`LoginFlow`] while awaiting; consumed by whichever continuation
/// fires first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptchaChallenge {
    pending: FormInputs,
}

/// Error shown against a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The value failed local validation; no network call was made.
    Invalid(ValidationError),
    /// The server rejected the submitted value.
    Rejected(ApiErrorCode),
}

impl FieldError {
    /// i18n key for the error label.
    #[must_use]
    pub fn i18n_key(&self) -> String {
        match self {
            Self::Invalid(error) => format!("login.errors.{}", error.as_str()),
            Self::Rejected(code) => format!("login.errors.{}", code.as_str()),
        }
    }
}

/// Lifecycle state of one form instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    /// Waiting for user input.
    Idle,
    /// Running field validation for a submit attempt.
    Validating,
    /// A CAPTCHA challenge is on screen.
    AwaitingCaptcha(CaptchaChallenge),
    /// The submit handler is in flight.
    Submitting(SubmitPayload),
    /// The handler resolved; carries the submitted email address.
    Succeeded(String),
    /// The handler rejected with a failure not attributable to a field.
    FailedGlobally(ApiErrorCode),
}

/// What the container must do after a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDisposition {
    /// Validation failed, or the attempt was not allowed; nothing to send.
    Rejected,
    /// A CAPTCHA challenge must complete before anything is sent.
    Challenge,
    /// Send this payload now.
    Dispatch(SubmitPayload),
}

/// State machine driving one authentication form instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginFlow {
    page: FormPage,
    state: SubmissionState,
    field_errors: HashMap<FieldKind, FieldError>,
}

impl LoginFlow {
    /// A fresh flow for the given page, idle and error-free.
    #[must_use]
    pub fn new(page: FormPage) -> Self {
        Self {
            page,
            state: SubmissionState::Idle,
            field_errors: HashMap::new(),
        }
    }

    /// The page this flow drives.
    #[must_use]
    pub fn page(&self) -> FormPage {
        self.page
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Error shown against a field, if any.
    #[must_use]
    pub fn field_error(&self, kind: FieldKind) -> Option<&FieldError> {
        self.field_errors.get(&kind)
    }

    /// Failure code for the page-level banner, when the last attempt failed
    /// globally.
    #[must_use]
    pub fn global_error(&self) -> Option<&ApiErrorCode> {
        match &self.state {
            SubmissionState::FailedGlobally(code) => Some(code),
            _ => None,
        }
    }

    /// Whether a submit attempt may start now.
    ///
    /// Attempts are allowed from idle and from a global failure; a pending
    /// challenge or in-flight submission blocks resubmission.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        matches!(
            self.state,
            SubmissionState::Idle | SubmissionState::FailedGlobally(_)
        )
    }

    /// Runs a submit attempt over the current inputs.
    ///
    /// Clears every error left by the previous attempt, validates the page's
    /// active fields, then either rejects the attempt (validation errors land
    /// in the per-field overlay and the flow returns to idle), raises a
    /// CAPTCHA challenge, or hands back the payload to dispatch. An attempt
    /// made while a challenge or submission is pending is rejected without
    /// touching state.
    pub fn submit(&mut self, inputs: &FormInputs, features: &Features) -> SubmitDisposition {
        if !self.can_submit() {
            return SubmitDisposition::Rejected;
        }

        self.state = SubmissionState::Validating;
        self.field_errors.clear();

        for &kind in self.page.active_fields(features.invite_only) {
            if let Err(error) = validate(kind, inputs.value(kind)) {
                self.field_errors.insert(kind, FieldError::Invalid(error));
            }
        }
        if !self.field_errors.is_empty() {
            self.state = SubmissionState::Idle;
            return SubmitDisposition::Rejected;
        }

        if features.captcha.enabled && self.page.challengeable() {
            self.state = SubmissionState::AwaitingCaptcha(CaptchaChallenge {
                pending: inputs.clone(),
            });
            SubmitDisposition::Challenge
        } else {
            let payload = SubmitPayload {
                fields: inputs.clone(),
                captcha: None,
            };
            self.state = SubmissionState::Submitting(payload.clone());
            SubmitDisposition::Dispatch(payload)
        }
    }

    /// Completes a pending challenge with the widget's token.
    ///
    /// Returns the payload to dispatch. When no challenge is pending the
    /// continuation is a stray fire and is ignored.
    pub fn resolve_captcha(&mut self, token: String) -> Option<SubmitPayload> {
        let challenge = match mem::replace(&mut self.state, SubmissionState::Idle) {
            SubmissionState::AwaitingCaptcha(challenge) => challenge,
            other => {
                self.state = other;
                return None;
            }
        };

        let payload = SubmitPayload {
            fields: challenge.pending,
            captcha: Some(token),
        };
        self.state = SubmissionState::Submitting(payload.clone());
        Some(payload)
    }

    /// Abandons a pending challenge and returns to the form, error-free.
    ///
    /// Ignored when no challenge is pending.
    pub fn cancel_captcha(&mut self) {
        if matches!(self.state, SubmissionState::AwaitingCaptcha(_)) {
            self.state = SubmissionState::Idle;
        }
    }

    /// Folds the submit handler's settlement back into state.
    ///
    /// Success records the submitted email address. Field-attributable
    /// rejections land in the overlay with the flow back at idle; any other
    /// code becomes the page-level failure state. Ignored when no submission
    /// is in flight.
    pub fn settle(&mut self, result: Result<(), ApiErrorCode>) {
        let payload = match mem::replace(&mut self.state, SubmissionState::Idle) {
            SubmissionState::Submitting(payload) => payload,
            other => {
                self.state = other;
                return;
            }
        };

        match result {
            Ok(()) => {
                let email = match self.page {
                    FormPage::Create => payload.fields.reg_email,
                    _ => payload.fields.email,
                };
                self.state = SubmissionState::Succeeded(email);
            }
            Err(code) => match attributed_field(&code) {
                Some(kind) => {
                    self.field_errors.insert(kind, FieldError::Rejected(code));
                }
                None => self.state = SubmissionState::FailedGlobally(code),
            },
        }
    }
}

/// Field a failure code attaches to, when it is field-attributable.
fn attributed_field(code: &ApiErrorCode) -> Option<FieldKind> {
    match code {
        ApiErrorCode::EmailInUse | ApiErrorCode::UnknownUser => Some(FieldKind::Email),
        ApiErrorCode::InvalidInvite => Some(FieldKind::Invite),
        ApiErrorCode::Other(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::CaptchaFeature;
    use strum::IntoEnumIterator;

    fn features(captcha: bool, invite_only: bool) -> Features {
        Features {
            captcha: CaptchaFeature {
                enabled: captcha,
                key: "site-key".to_string(),
            },
            email: true,
            invite_only,
        }
    }

    fn login_inputs() -> FormInputs {
        FormInputs {
            email: "a@b.co".to_string(),
            password: "password123".to_string(),
            ..FormInputs::default()
        }
    }

    fn create_inputs() -> FormInputs {
        FormInputs {
            reg_email: "new@example.com".to_string(),
            username: "newuser".to_string(),
            password: "password123".to_string(),
            date: "2000-01-01".to_string(),
            invite: "WELCOME".to_string(),
            ..FormInputs::default()
        }
    }

    #[test]
    fn active_fields_per_page() {
        assert_eq!(
            FormPage::Login.active_fields(false),
            &[FieldKind::Email, FieldKind::Password][..]
        );
        assert_eq!(
            FormPage::Create.active_fields(false),
            &[
                FieldKind::RegEmail,
                FieldKind::Username,
                FieldKind::Date,
                FieldKind::Password,
            ][..]
        );
        assert_eq!(
            FormPage::Create.active_fields(true).last(),
            Some(&FieldKind::Invite)
        );
        assert_eq!(
            FormPage::SendReset.active_fields(false),
            &[FieldKind::Email][..]
        );
        assert_eq!(
            FormPage::Resend.active_fields(false),
            &[FieldKind::Email][..]
        );
        assert_eq!(
            FormPage::Reset.active_fields(false),
            &[FieldKind::Password][..]
        );
    }

    #[test]
    fn every_page_activates_at_least_one_field() {
        for page in FormPage::iter() {
            assert!(!page.active_fields(true).is_empty());
            assert!(!page.active_fields(false).is_empty());
        }
    }

    #[test]
    fn only_the_reset_page_skips_the_challenge() {
        for page in FormPage::iter() {
            assert_eq!(page.challengeable(), page != FormPage::Reset);
        }
    }

    #[test]
    fn submit_without_captcha_dispatches_and_succeeds() {
        let mut flow = LoginFlow::new(FormPage::Login);

        let disposition = flow.submit(&login_inputs(), &features(false, false));
        let SubmitDisposition::Dispatch(payload) = disposition else {
            panic!("expected dispatch, got {disposition:?}");
        };
        assert_eq!(payload.captcha, None);
        assert_eq!(payload.fields.email, "a@b.co");
        assert!(matches!(flow.state(), SubmissionState::Submitting(_)));

        flow.settle(Ok(()));
        assert_eq!(
            flow.state(),
            &SubmissionState::Succeeded("a@b.co".to_string())
        );
    }

    #[test]
    fn validation_failure_blocks_submission() {
        let mut flow = LoginFlow::new(FormPage::Login);
        let inputs = FormInputs {
            email: "a@b.co".to_string(),
            password: "short".to_string(),
            ..FormInputs::default()
        };

        assert_eq!(
            flow.submit(&inputs, &features(false, false)),
            SubmitDisposition::Rejected
        );
        assert_eq!(flow.state(), &SubmissionState::Idle);
        assert_eq!(
            flow.field_error(FieldKind::Password),
            Some(&FieldError::Invalid(ValidationError::TooShort))
        );
        assert_eq!(flow.field_error(FieldKind::Email), None);
    }

    #[test]
    fn captcha_challenge_interposes_when_enabled() {
        let mut flow = LoginFlow::new(FormPage::Login);

        assert_eq!(
            flow.submit(&login_inputs(), &features(true, false)),
            SubmitDisposition::Challenge
        );
        assert!(matches!(flow.state(), SubmissionState::AwaitingCaptcha(_)));
    }

    #[test]
    fn reset_page_never_challenges() {
        let mut flow = LoginFlow::new(FormPage::Reset);
        let inputs = FormInputs {
            password: "password123".to_string(),
            ..FormInputs::default()
        };

        let disposition = flow.submit(&inputs, &features(true, false));
        assert!(matches!(disposition, SubmitDisposition::Dispatch(_)));
    }

    #[test]
    fn cancelled_challenge_returns_to_idle_without_errors() {
        let mut flow = LoginFlow::new(FormPage::Login);
        flow.submit(&login_inputs(), &features(true, false));

        flow.cancel_captcha();
        assert_eq!(flow.state(), &SubmissionState::Idle);
        assert_eq!(flow.global_error(), None);
        assert_eq!(flow.field_error(FieldKind::Email), None);
    }

    #[test]
    fn resolved_challenge_attaches_the_token() {
        let mut flow = LoginFlow::new(FormPage::Login);
        flow.submit(&login_inputs(), &features(true, false));

        let payload = flow
            .resolve_captcha("token-123".to_string())
            .expect("challenge should resolve");
        assert_eq!(payload.captcha.as_deref(), Some("token-123"));
        assert_eq!(payload.fields, login_inputs());
        assert!(matches!(flow.state(), SubmissionState::Submitting(_)));
    }

    #[test]
    fn stray_continuations_are_ignored() {
        let mut flow = LoginFlow::new(FormPage::Login);

        assert_eq!(flow.resolve_captcha("token".to_string()), None);
        flow.cancel_captcha();
        assert_eq!(flow.state(), &SubmissionState::Idle);

        flow.submit(&login_inputs(), &features(true, false));
        flow.resolve_captcha("token".to_string());

        // The challenge is consumed; a second fire of either continuation
        // must not disturb the in-flight submission.
        assert_eq!(flow.resolve_captcha("token-again".to_string()), None);
        flow.cancel_captcha();
        assert!(matches!(flow.state(), SubmissionState::Submitting(_)));
    }

    #[test]
    fn submit_while_awaiting_captcha_is_rejected() {
        let mut flow = LoginFlow::new(FormPage::Login);
        flow.submit(&login_inputs(), &features(true, false));
        let awaiting = flow.clone();

        assert_eq!(
            flow.submit(&login_inputs(), &features(true, false)),
            SubmitDisposition::Rejected
        );
        assert_eq!(flow, awaiting);
    }

    #[test]
    fn email_in_use_lands_on_the_email_field() {
        let mut flow = LoginFlow::new(FormPage::Login);
        flow.submit(&login_inputs(), &features(false, false));

        flow.settle(Err(ApiErrorCode::EmailInUse));
        assert_eq!(flow.state(), &SubmissionState::Idle);
        assert_eq!(
            flow.field_error(FieldKind::Email),
            Some(&FieldError::Rejected(ApiErrorCode::EmailInUse))
        );
        assert_eq!(flow.global_error(), None);
    }

    #[test]
    fn unknown_user_lands_on_the_email_field() {
        let mut flow = LoginFlow::new(FormPage::Login);
        flow.submit(&login_inputs(), &features(false, false));

        flow.settle(Err(ApiErrorCode::UnknownUser));
        assert_eq!(flow.state(), &SubmissionState::Idle);
        assert_eq!(
            flow.field_error(FieldKind::Email),
            Some(&FieldError::Rejected(ApiErrorCode::UnknownUser))
        );
    }

    #[test]
    fn invalid_invite_lands_on_the_invite_field() {
        let mut flow = LoginFlow::new(FormPage::Create);
        flow.submit(&create_inputs(), &features(false, true));

        flow.settle(Err(ApiErrorCode::InvalidInvite));
        assert_eq!(flow.state(), &SubmissionState::Idle);
        assert_eq!(
            flow.field_error(FieldKind::Invite),
            Some(&FieldError::Rejected(ApiErrorCode::InvalidInvite))
        );
    }

    #[test]
    fn unrecognized_code_fails_globally_without_overlay() {
        let mut flow = LoginFlow::new(FormPage::Login);
        flow.submit(&login_inputs(), &features(false, false));

        flow.settle(Err(ApiErrorCode::Other("rate_limited".to_string())));
        assert_eq!(
            flow.global_error(),
            Some(&ApiErrorCode::Other("rate_limited".to_string()))
        );
        for kind in [FieldKind::Email, FieldKind::Password, FieldKind::Invite] {
            assert_eq!(flow.field_error(kind), None);
        }
        assert!(flow.can_submit(), "a global failure must allow resubmission");
    }

    #[test]
    fn resubmission_clears_previous_errors() {
        let mut flow = LoginFlow::new(FormPage::Login);

        flow.submit(&login_inputs(), &features(false, false));
        flow.settle(Err(ApiErrorCode::EmailInUse));
        assert!(flow.field_error(FieldKind::Email).is_some());

        let disposition = flow.submit(&login_inputs(), &features(false, false));
        assert!(matches!(disposition, SubmitDisposition::Dispatch(_)));
        assert_eq!(flow.field_error(FieldKind::Email), None);

        flow.settle(Err(ApiErrorCode::Other("internal_error".to_string())));
        assert!(flow.global_error().is_some());

        flow.submit(&login_inputs(), &features(false, false));
        assert_eq!(flow.global_error(), None);
    }

    #[test]
    fn create_page_validates_invite_only_when_configured() {
        let mut flow = LoginFlow::new(FormPage::Create);
        let inputs = FormInputs {
            invite: String::new(),
            ..create_inputs()
        };

        // Invite inactive: the empty invite is not consulted.
        let disposition = flow.submit(&inputs, &features(false, false));
        assert!(matches!(disposition, SubmitDisposition::Dispatch(_)));

        // Invite active: the empty invite blocks submission.
        let mut flow = LoginFlow::new(FormPage::Create);
        assert_eq!(
            flow.submit(&inputs, &features(false, true)),
            SubmitDisposition::Rejected
        );
        assert_eq!(
            flow.field_error(FieldKind::Invite),
            Some(&FieldError::Invalid(ValidationError::Required))
        );
    }

    #[test]
    fn create_page_success_records_the_registration_email() {
        let mut flow = LoginFlow::new(FormPage::Create);
        flow.submit(&create_inputs(), &features(false, true));

        flow.settle(Ok(()));
        assert_eq!(
            flow.state(),
            &SubmissionState::Succeeded("new@example.com".to_string())
        );
    }

    #[test]
    fn settle_without_submission_is_ignored() {
        let mut flow = LoginFlow::new(FormPage::Login);
        flow.settle(Ok(()));
        assert_eq!(flow.state(), &SubmissionState::Idle);

        flow.settle(Err(ApiErrorCode::EmailInUse));
        assert_eq!(flow.field_error(FieldKind::Email), None);
    }
}
