use tracing::info;

use complaint_shared::validation::{parse_positive_id, validate_complaint_id, validate_response_text};
use complaint_shared::NewAdminResponse;

use super::{fail_with, require_staff, FailureCopy, Form, FormState, SubmitOutcome};
use crate::http::ApiClient;
use crate::session::{SessionSnapshot, SessionStore};

const COPY: FailureCopy = FailureCopy::new("Failed to submit response.").not_found("Complaint not found.");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespondField {
    ComplaintId,
    ResponseText,
}

/// Staff: attach an official response to a complaint.
#[derive(Debug, Default)]
pub struct RespondForm {
    pub complaint_id: String,
    pub response_text: String,
    state: FormState<RespondField>,
}

impl RespondForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(&mut self, api: &ApiClient, session: &SessionStore) -> SubmitOutcome<()> {
        let snapshot = session.snapshot();
        if !self.begin_submit(&snapshot) {
            return SubmitOutcome::Blocked;
        }
        let Ok(complaint) = parse_positive_id(&self.complaint_id) else {
            return SubmitOutcome::Blocked;
        };

        let payload = NewAdminResponse {
            complaint,
            response_text: self.response_text.trim().to_string(),
        };
        let result = api.respond(&payload, &snapshot.token).await;
        if !result.is_ok() {
            return fail_with(self.state.submission_mut(), &result, &COPY);
        }

        info!(complaint_id = complaint, "Response recorded");
        self.complaint_id.clear();
        self.response_text.clear();
        self.state.reset_touched();
        self.state.submission_mut().succeed("Response recorded.");
        SubmitOutcome::Cleared
    }
}

impl Form for RespondForm {
    type Field = RespondField;

    const FIELDS: &'static [RespondField] = &[RespondField::ComplaintId, RespondField::ResponseText];

    fn field_error(&self, field: RespondField) -> String {
        match field {
            RespondField::ComplaintId => validate_complaint_id(&self.complaint_id),
            RespondField::ResponseText => validate_response_text(&self.response_text),
        }
    }

    fn state(&self) -> &FormState<RespondField> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FormState<RespondField> {
        &mut self.state
    }

    fn precondition(&self, session: &SessionSnapshot) -> Option<&'static str> {
        require_staff(session)
    }
}
