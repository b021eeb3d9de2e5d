use tracing::info;

use complaint_shared::validation::{
    normalize_email, split_full_name, validate_agreement, validate_confirm_password,
    validate_full_name, validate_new_password, validate_university_email,
};
use complaint_shared::RegisterRequest;

use super::{fail_with, FailureCopy, Form, FormState, Navigation, SubmitOutcome};
use crate::guard::LOGIN_PATH;
use crate::http::ApiClient;
use crate::session::SessionStore;

const COPY: FailureCopy = FailureCopy::new("Registration failed. Please try again.");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    FullName,
    Email,
    Password,
    ConfirmPassword,
    Agreement,
}

#[derive(Debug, Default)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    /// Optional. Used as the username when given.
    pub student_id: String,
    pub password: String,
    pub confirm_password: String,
    pub agreed: bool,
    allowed_domains: Vec<String>,
    state: FormState<RegisterField>,
}

impl RegisterForm {
    pub fn new(allowed_domains: Vec<String>) -> Self {
        Self {
            allowed_domains,
            ..Self::default()
        }
    }

    fn request(&self) -> RegisterRequest {
        let email = normalize_email(&self.email);
        let student_id = self.student_id.trim();
        let (first_name, last_name) = split_full_name(&self.full_name);

        RegisterRequest {
            username: if student_id.is_empty() {
                email.clone()
            } else {
                student_id.to_string()
            },
            password: self.password.clone(),
            email: Some(email),
            first_name: Some(first_name).filter(|s| !s.is_empty()),
            last_name: Some(last_name).filter(|s| !s.is_empty()),
        }
    }

    pub async fn submit(&mut self, api: &ApiClient, session: &SessionStore) -> SubmitOutcome<()> {
        if !self.begin_submit(&session.snapshot()) {
            return SubmitOutcome::Blocked;
        }

        let result = api.register(&self.request()).await;
        if !result.is_ok() {
            return fail_with(self.state.submission_mut(), &result, &COPY);
        }

        info!("Account registered");
        let message = "Account created. You can sign in now.";
        self.password.clear();
        self.confirm_password.clear();
        self.state.submission_mut().succeed(message);
        SubmitOutcome::Navigate(Navigation::to(LOGIN_PATH).with_flash(message))
    }
}

impl Form for RegisterForm {
    type Field = RegisterField;

    const FIELDS: &'static [RegisterField] = &[
        RegisterField::FullName,
        RegisterField::Email,
        RegisterField::Password,
        RegisterField::ConfirmPassword,
        RegisterField::Agreement,
    ];

    fn field_error(&self, field: RegisterField) -> String {
        match field {
            RegisterField::FullName => validate_full_name(&self.full_name),
            RegisterField::Email => validate_university_email(&self.email, &self.allowed_domains),
            RegisterField::Password => validate_new_password(&self.password),
            RegisterField::ConfirmPassword => {
                validate_confirm_password(&self.password, &self.confirm_password)
            }
            RegisterField::Agreement => validate_agreement(self.agreed),
        }
    }

    fn state(&self) -> &FormState<RegisterField> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FormState<RegisterField> {
        &mut self.state
    }
}
