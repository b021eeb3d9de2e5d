use tracing::info;

use complaint_shared::validation::{parse_positive_id, validate_complaint_id};
use complaint_shared::ComplaintStatus;

use super::{fail_with, require_staff, FailureCopy, Form, FormState, SubmitOutcome};
use crate::http::ApiClient;
use crate::session::{SessionSnapshot, SessionStore};

const COPY: FailureCopy = FailureCopy::new("Failed to update status.").not_found("Complaint not found.");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusField {
    ComplaintId,
    Status,
}

/// Staff: move a complaint to another status.
#[derive(Debug)]
pub struct StatusForm {
    pub complaint_id: String,
    /// Wire value, one of [`ComplaintStatus::STAFF_SETTABLE`].
    pub status: String,
    state: FormState<StatusField>,
}

impl Default for StatusForm {
    fn default() -> Self {
        Self {
            complaint_id: String::new(),
            status: ComplaintStatus::New.as_str().to_string(),
            state: FormState::default(),
        }
    }
}

impl StatusForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(&mut self, api: &ApiClient, session: &SessionStore) -> SubmitOutcome<()> {
        let snapshot = session.snapshot();
        if !self.begin_submit(&snapshot) {
            return SubmitOutcome::Blocked;
        }
        let (Ok(id), Ok(status)) = (
            parse_positive_id(&self.complaint_id),
            ComplaintStatus::parse_staff(&self.status),
        ) else {
            return SubmitOutcome::Blocked;
        };

        let result = api.update_status(id, &status, &snapshot.token).await;
        if !result.is_ok() {
            return fail_with(self.state.submission_mut(), &result, &COPY);
        }

        info!(complaint_id = id, status = %status, "Complaint status updated");
        *self = Self::default();
        self.state.submission_mut().succeed("Status updated.");
        SubmitOutcome::Cleared
    }
}

impl Form for StatusForm {
    type Field = StatusField;

    const FIELDS: &'static [StatusField] = &[StatusField::ComplaintId, StatusField::Status];

    fn field_error(&self, field: StatusField) -> String {
        match field {
            StatusField::ComplaintId => validate_complaint_id(&self.complaint_id),
            StatusField::Status => match ComplaintStatus::parse_staff(&self.status) {
                Ok(_) => String::new(),
                Err(_) => "Choose NEW, IN_PROGRESS, RESOLVED or CLOSED.".into(),
            },
        }
    }

    fn state(&self) -> &FormState<StatusField> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FormState<StatusField> {
        &mut self.state
    }

    fn precondition(&self, session: &SessionSnapshot) -> Option<&'static str> {
        require_staff(session)
    }
}
