//! Password reset: request a link, then set a new password with the token
//! from that link.

use tracing::info;

use complaint_shared::validation::{
    normalize_email, validate_confirm_password, validate_new_password, validate_reset_email,
    validate_reset_token,
};

use super::{fail_with, FailureCopy, Form, FormState, Navigation, SubmitOutcome};
use crate::guard::LOGIN_PATH;
use crate::http::ApiClient;
use crate::session::SessionStore;

const REQUEST_COPY: FailureCopy = FailureCopy::new("Unable to send reset email. Please try again.");
const RESET_COPY: FailureCopy = FailureCopy::new("Unable to reset password. Please try again.")
    .not_found("This reset link is invalid or has expired.");

pub const RESET_LINK_SENT: &str = "If an account exists for that email, we sent a password reset link.";
pub const PASSWORD_UPDATED: &str = "Your password has been updated. You can sign in now.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForgotPasswordField {
    Email,
}

#[derive(Debug, Default)]
pub struct ForgotPasswordForm {
    pub email: String,
    allowed_domains: Vec<String>,
    state: FormState<ForgotPasswordField>,
}

impl ForgotPasswordForm {
    pub fn new(allowed_domains: Vec<String>) -> Self {
        Self {
            allowed_domains,
            ..Self::default()
        }
    }

    /// On success the confirmation copy is displayed; it never reveals
    /// whether the account exists.
    pub async fn submit(&mut self, api: &ApiClient, session: &SessionStore) -> SubmitOutcome<String> {
        if !self.begin_submit(&session.snapshot()) {
            return SubmitOutcome::Blocked;
        }

        let result = api.request_password_reset(&normalize_email(&self.email)).await;
        if !result.is_ok() {
            return fail_with(self.state.submission_mut(), &result, &REQUEST_COPY);
        }

        info!("Password reset requested");
        self.state.submission_mut().succeed(RESET_LINK_SENT);
        SubmitOutcome::Display(RESET_LINK_SENT.to_string())
    }
}

impl Form for ForgotPasswordForm {
    type Field = ForgotPasswordField;

    const FIELDS: &'static [ForgotPasswordField] = &[ForgotPasswordField::Email];

    fn field_error(&self, field: ForgotPasswordField) -> String {
        match field {
            ForgotPasswordField::Email => validate_reset_email(&self.email, &self.allowed_domains),
        }
    }

    fn state(&self) -> &FormState<ForgotPasswordField> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FormState<ForgotPasswordField> {
        &mut self.state
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetPasswordField {
    Token,
    Password,
    ConfirmPassword,
}

#[derive(Debug, Default)]
pub struct ResetPasswordForm {
    reset_token: String,
    pub password: String,
    pub confirm_password: String,
    state: FormState<ResetPasswordField>,
}

impl ResetPasswordForm {
    /// `reset_token` comes from the emailed link.
    pub fn new(reset_token: impl Into<String>) -> Self {
        Self {
            reset_token: reset_token.into(),
            ..Self::default()
        }
    }

    pub fn has_valid_link(&self) -> bool {
        validate_reset_token(&self.reset_token).is_empty()
    }

    pub async fn submit(&mut self, api: &ApiClient, session: &SessionStore) -> SubmitOutcome<()> {
        if !self.begin_submit(&session.snapshot()) {
            return SubmitOutcome::Blocked;
        }

        let result = api
            .confirm_password_reset(self.reset_token.trim(), &self.password)
            .await;
        if !result.is_ok() {
            return fail_with(self.state.submission_mut(), &result, &RESET_COPY);
        }

        info!("Password reset confirmed");
        self.password.clear();
        self.confirm_password.clear();
        self.state.submission_mut().succeed(PASSWORD_UPDATED);
        SubmitOutcome::Navigate(Navigation::to(LOGIN_PATH).with_flash(PASSWORD_UPDATED))
    }
}

impl Form for ResetPasswordForm {
    type Field = ResetPasswordField;

    const FIELDS: &'static [ResetPasswordField] = &[
        ResetPasswordField::Token,
        ResetPasswordField::Password,
        ResetPasswordField::ConfirmPassword,
    ];

    fn field_error(&self, field: ResetPasswordField) -> String {
        match field {
            ResetPasswordField::Token => validate_reset_token(&self.reset_token),
            ResetPasswordField::Password => validate_new_password(&self.password),
            ResetPasswordField::ConfirmPassword => {
                validate_confirm_password(&self.password, &self.confirm_password)
            }
        }
    }

    fn state(&self) -> &FormState<ResetPasswordField> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FormState<ResetPasswordField> {
        &mut self.state
    }
}
