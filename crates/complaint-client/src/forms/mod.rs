//! Form controllers.
//!
//! Every form follows one lifecycle: field values plus per-field touched
//! flags, pure validators evaluated on demand, a single [`Submission`] that
//! blocks re-entry while loading, and exactly one success effect per form.
//! Failures are turned into user-facing copy by [`failure_message`].

pub mod complaint;
pub mod feedback;
pub mod login;
pub mod lookup;
pub mod password;
pub mod register;
pub mod respond;
pub mod status;

use serde::Serialize;

use crate::http::ApiResult;
use crate::session::SessionSnapshot;

pub use complaint::CreateComplaintForm;
pub use feedback::FeedbackForm;
pub use login::LoginForm;
pub use lookup::LookupForm;
pub use password::{ForgotPasswordForm, ResetPasswordForm};
pub use register::RegisterForm;
pub use respond::RespondForm;
pub use status::StatusForm;

pub const NETWORK_MESSAGE: &str = "Unable to reach the server. Check your connection and try again.";
pub const SIGN_IN_AGAIN_MESSAGE: &str = "You need to sign in again.";
pub const RATE_LIMITED_MESSAGE: &str = "Too many attempts. Please wait a bit and try again.";
pub const NOT_FOUND_MESSAGE: &str = "Not found.";
pub const SIGN_IN_REQUIRED: &str = "Sign in required.";
pub const STAFF_REQUIRED: &str = "Staff access required.";

// ---------------------------------------------------------------------------
// Submission lifecycle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Status of the latest submission and the message that goes with it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Submission {
    status: SubmitStatus,
    message: String,
}

impl Submission {
    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_loading(&self) -> bool {
        self.status == SubmitStatus::Loading
    }

    /// Enter `Loading` and clear the previous message. Refused while a
    /// submission is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        self.status = SubmitStatus::Loading;
        self.message.clear();
        true
    }

    pub fn succeed(&mut self, message: impl Into<String>) {
        self.status = SubmitStatus::Success;
        self.message = message.into();
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = SubmitStatus::Error;
        self.message = message.into();
    }
}

/// Touched flags and submission state shared by every form.
#[derive(Debug, Clone)]
pub struct FormState<F> {
    touched: Vec<F>,
    submitted: bool,
    submission: Submission,
}

impl<F> Default for FormState<F> {
    fn default() -> Self {
        Self {
            touched: Vec::new(),
            submitted: false,
            submission: Submission::default(),
        }
    }
}

impl<F: Copy + PartialEq> FormState<F> {
    pub fn touch(&mut self, field: F) {
        if !self.touched.contains(&field) {
            self.touched.push(field);
        }
    }

    pub fn is_touched(&self, field: F) -> bool {
        self.touched.contains(&field)
    }

    /// A submit was attempted: every field's error becomes visible.
    pub fn reveal(&mut self) {
        self.submitted = true;
    }

    pub fn shows_errors_for(&self, field: F) -> bool {
        self.submitted || self.is_touched(field)
    }

    /// Forget touched flags after the fields were cleared.
    pub fn reset_touched(&mut self) {
        self.touched.clear();
        self.submitted = false;
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    pub fn submission_mut(&mut self) -> &mut Submission {
        &mut self.submission
    }
}

// ---------------------------------------------------------------------------
// Form trait
// ---------------------------------------------------------------------------

pub trait Form {
    type Field: Copy + PartialEq + 'static;

    /// Fields that carry a validator.
    const FIELDS: &'static [Self::Field];

    /// Validation message for `field`, empty when valid.
    fn field_error(&self, field: Self::Field) -> String;

    fn state(&self) -> &FormState<Self::Field>;

    fn state_mut(&mut self) -> &mut FormState<Self::Field>;

    /// Message describing an unmet external requirement, if any.
    fn precondition(&self, _session: &SessionSnapshot) -> Option<&'static str> {
        None
    }

    fn is_valid(&self) -> bool {
        Self::FIELDS
            .iter()
            .all(|field| self.field_error(*field).is_empty())
    }

    fn can_submit(&self, session: &SessionSnapshot) -> bool {
        self.is_valid()
            && !self.state().submission().is_loading()
            && self.precondition(session).is_none()
    }

    /// Validation message to show right now: empty until the field was
    /// touched or a submit was attempted.
    fn visible_error(&self, field: Self::Field) -> String {
        if self.state().shows_errors_for(field) {
            self.field_error(field)
        } else {
            String::new()
        }
    }

    fn touch(&mut self, field: Self::Field) {
        self.state_mut().touch(field);
    }

    fn first_error(&self) -> Option<String> {
        Self::FIELDS
            .iter()
            .map(|field| self.field_error(*field))
            .find(|message| !message.is_empty())
    }

    fn submission(&self) -> &Submission {
        self.state().submission()
    }

    /// Gate a submit attempt. On `true` the submission is `Loading` and the
    /// caller must issue its request.
    fn begin_submit(&mut self, session: &SessionSnapshot) -> bool {
        self.state_mut().reveal();
        if self.state().submission().is_loading() {
            return false;
        }
        if let Some(message) = self.precondition(session) {
            self.state_mut().submission_mut().fail(message);
            return false;
        }
        if !self.is_valid() {
            return false;
        }
        self.state_mut().submission_mut().begin()
    }
}

pub(crate) fn require_signed_in(session: &SessionSnapshot) -> Option<&'static str> {
    (!session.is_signed_in()).then_some(SIGN_IN_REQUIRED)
}

pub(crate) fn require_staff(session: &SessionSnapshot) -> Option<&'static str> {
    if !session.is_signed_in() {
        Some(SIGN_IN_REQUIRED)
    } else if !session.is_admin {
        Some(STAFF_REQUIRED)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Where to go after a successful submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<String>,
}

impl Navigation {
    pub fn to(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            highlight: None,
            flash: None,
        }
    }

    pub fn with_flash(mut self, message: impl Into<String>) -> Self {
        self.flash = Some(message.into());
        self
    }

    pub fn with_highlight(mut self, id: u64) -> Self {
        self.highlight = Some(id);
        self
    }
}

/// Result of one `submit` call.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<D> {
    /// Validation, a precondition or an in-flight submission stopped it
    /// before any request was made.
    Blocked,
    /// The request failed; the message is on the form's [`Submission`].
    Failed { status: u16 },
    /// Success, fields were cleared.
    Cleared,
    /// Success, move to another page.
    Navigate(Navigation),
    /// Success, show the returned data.
    Display(D),
}

impl<D> SubmitOutcome<D> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Cleared | Self::Navigate(_) | Self::Display(_))
    }
}

// ---------------------------------------------------------------------------
// Failure copy
// ---------------------------------------------------------------------------

/// Per-form failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureCopy {
    pub generic: &'static str,
    pub unauthorized: &'static str,
    pub not_found: &'static str,
}

impl FailureCopy {
    pub const fn new(generic: &'static str) -> Self {
        Self {
            generic,
            unauthorized: SIGN_IN_AGAIN_MESSAGE,
            not_found: NOT_FOUND_MESSAGE,
        }
    }

    pub const fn unauthorized(self, message: &'static str) -> Self {
        Self {
            unauthorized: message,
            ..self
        }
    }

    pub const fn not_found(self, message: &'static str) -> Self {
        Self {
            not_found: message,
            ..self
        }
    }
}

/// User-facing message for a failed request.
pub fn failure_message<T>(result: &ApiResult<T>, copy: &FailureCopy) -> String {
    match result.status() {
        0 => NETWORK_MESSAGE.to_string(),
        401 | 403 => copy.unauthorized.to_string(),
        404 => copy.not_found.to_string(),
        429 => RATE_LIMITED_MESSAGE.to_string(),
        _ => match result.detail().filter(|d| !d.trim().is_empty()) {
            Some(detail) => format!("{} {}", copy.generic, detail),
            None => copy.generic.to_string(),
        },
    }
}

/// Record a failed request on `submission` and produce the outcome.
pub(crate) fn fail_with<T, D>(
    submission: &mut Submission,
    result: &ApiResult<T>,
    copy: &FailureCopy,
) -> SubmitOutcome<D> {
    submission.fail(failure_message(result, copy));
    SubmitOutcome::Failed {
        status: result.status(),
    }
}
