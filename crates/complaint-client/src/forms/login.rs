use tracing::{info, warn};

use complaint_shared::validation::{validate_identifier, validate_login_password};
use complaint_shared::LoginRequest;

use super::{fail_with, FailureCopy, Form, FormState, Navigation, SubmitOutcome};
use crate::guard::post_login_target;
use crate::http::ApiClient;
use crate::session::{ProbeHandle, SessionStore};

const COPY: FailureCopy =
    FailureCopy::new("Sign in failed. Please try again.").unauthorized("Incorrect email/ID or password.");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Identifier,
    Password,
}

/// Sign in with an email or university ID.
#[derive(Debug, Default)]
pub struct LoginForm {
    pub identifier: String,
    pub password: String,
    /// Page the user was sent away from by the route guard.
    pub from: Option<String>,
    state: FormState<LoginField>,
    probe: Option<ProbeHandle>,
}

impl LoginForm {
    pub fn new(from: Option<String>) -> Self {
        Self {
            from,
            ..Self::default()
        }
    }

    /// The staff probe started by the last successful sign-in.
    pub fn take_probe(&mut self) -> Option<ProbeHandle> {
        self.probe.take()
    }

    pub async fn submit(&mut self, api: &ApiClient, session: &SessionStore) -> SubmitOutcome<()> {
        if !self.begin_submit(&session.snapshot()) {
            return SubmitOutcome::Blocked;
        }

        let identifier = self.identifier.trim().to_string();
        let request = LoginRequest {
            username: identifier.clone(),
            password: self.password.clone(),
        };
        let result = api.login(&request).await;

        let token = match result.data() {
            Some(body) if result.is_ok() && !body.token.is_empty() => body.token.clone(),
            _ if result.is_ok() => {
                warn!("Login succeeded without a token");
                self.state.submission_mut().fail(COPY.generic);
                return SubmitOutcome::Failed {
                    status: result.status(),
                };
            }
            _ => return fail_with(self.state.submission_mut(), &result, &COPY),
        };

        match session.set_token(&token) {
            Ok(probe) => self.probe = probe,
            Err(e) => {
                warn!(error = %e, "Failed to persist session");
                self.state.submission_mut().fail("Could not save your session. Please try again.");
                return SubmitOutcome::Failed {
                    status: result.status(),
                };
            }
        }
        // best effort once the token is stored
        if let Err(e) = session.set_display_identifier(&identifier) {
            warn!(error = %e, "Failed to persist display identifier");
        }

        info!("Signed in");
        self.password.clear();
        self.state.submission_mut().succeed("Signed in successfully.");
        SubmitOutcome::Navigate(Navigation::to(post_login_target(self.from.as_deref())))
    }
}

impl Form for LoginForm {
    type Field = LoginField;

    const FIELDS: &'static [LoginField] = &[LoginField::Identifier, LoginField::Password];

    fn field_error(&self, field: LoginField) -> String {
        match field {
            LoginField::Identifier => validate_identifier(&self.identifier),
            LoginField::Password => validate_login_password(&self.password),
        }
    }

    fn state(&self) -> &FormState<LoginField> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FormState<LoginField> {
        &mut self.state
    }
}
