use tracing::info;

use complaint_shared::validation::{parse_category, validate_category, validate_complaint_text};
use complaint_shared::NewComplaint;

use super::{fail_with, require_signed_in, FailureCopy, Form, FormState, Navigation, SubmitOutcome};
use crate::guard::Route;
use crate::http::ApiClient;
use crate::session::{SessionSnapshot, SessionStore};

const COPY: FailureCopy = FailureCopy::new("Failed to create complaint.");

pub const CREATED_MESSAGE: &str = "Complaint created.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplaintField {
    Text,
    Category,
}

/// File a new complaint. On success the user is sent to their complaint
/// list with the new row highlighted.
#[derive(Debug, Default)]
pub struct CreateComplaintForm {
    pub text: String,
    /// Blank for the general category.
    pub category: String,
    state: FormState<ComplaintField>,
}

impl CreateComplaintForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(&mut self, api: &ApiClient, session: &SessionStore) -> SubmitOutcome<()> {
        let snapshot = session.snapshot();
        if !self.begin_submit(&snapshot) {
            return SubmitOutcome::Blocked;
        }

        let payload = NewComplaint {
            text: self.text.trim().to_string(),
            category: parse_category(&self.category).ok().flatten(),
        };
        let result = api.create_complaint(&payload, &snapshot.token).await;

        let Some(created) = result.data().filter(|_| result.is_ok()) else {
            return fail_with(self.state.submission_mut(), &result, &COPY);
        };
        let id = created.id;

        info!(complaint_id = id, "Complaint created");
        self.text.clear();
        self.category.clear();
        self.state.reset_touched();
        self.state.submission_mut().succeed(CREATED_MESSAGE);

        SubmitOutcome::Navigate(
            Navigation::to(Route::MyComplaints.path())
                .with_highlight(id)
                .with_flash(CREATED_MESSAGE),
        )
    }
}

impl Form for CreateComplaintForm {
    type Field = ComplaintField;

    const FIELDS: &'static [ComplaintField] = &[ComplaintField::Text, ComplaintField::Category];

    fn field_error(&self, field: ComplaintField) -> String {
        match field {
            ComplaintField::Text => validate_complaint_text(&self.text),
            ComplaintField::Category => validate_category(&self.category),
        }
    }

    fn state(&self) -> &FormState<ComplaintField> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FormState<ComplaintField> {
        &mut self.state
    }

    fn precondition(&self, session: &SessionSnapshot) -> Option<&'static str> {
        require_signed_in(session)
    }
}
