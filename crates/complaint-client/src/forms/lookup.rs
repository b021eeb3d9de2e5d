use complaint_shared::validation::{parse_positive_id, validate_complaint_id};
use complaint_shared::Complaint;

use super::{fail_with, require_signed_in, FailureCopy, Form, FormState, SubmitOutcome};
use crate::http::ApiClient;
use crate::session::{SessionSnapshot, SessionStore};

pub const NOT_FOUND: &str = "Complaint not found.";

const COPY: FailureCopy = FailureCopy::new("Unable to load complaint details.").not_found(NOT_FOUND);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupField {
    ComplaintId,
}

/// Fetch one complaint by id.
#[derive(Debug, Default)]
pub struct LookupForm {
    pub complaint_id: String,
    state: FormState<LookupField>,
}

impl LookupForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(
        &mut self,
        api: &ApiClient,
        session: &SessionStore,
    ) -> SubmitOutcome<Complaint> {
        let snapshot = session.snapshot();
        if !self.begin_submit(&snapshot) {
            return SubmitOutcome::Blocked;
        }
        let Ok(id) = parse_positive_id(&self.complaint_id) else {
            return SubmitOutcome::Blocked;
        };

        let result = api.get_complaint(id, &snapshot.token).await;
        if !result.is_ok() {
            return fail_with(self.state.submission_mut(), &result, &COPY);
        }
        let status = result.status();
        match result.into_data() {
            Some(complaint) => {
                self.state.submission_mut().succeed("");
                SubmitOutcome::Display(complaint)
            }
            None => {
                self.state.submission_mut().fail(COPY.generic);
                SubmitOutcome::Failed { status }
            }
        }
    }
}

impl Form for LookupForm {
    type Field = LookupField;

    const FIELDS: &'static [LookupField] = &[LookupField::ComplaintId];

    fn field_error(&self, field: LookupField) -> String {
        match field {
            LookupField::ComplaintId => validate_complaint_id(&self.complaint_id),
        }
    }

    fn state(&self) -> &FormState<LookupField> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FormState<LookupField> {
        &mut self.state
    }

    fn precondition(&self, session: &SessionSnapshot) -> Option<&'static str> {
        require_signed_in(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_must_be_a_positive_number() {
        let mut form = LookupForm::new();
        form.complaint_id = "0".into();
        assert_eq!(
            form.field_error(LookupField::ComplaintId),
            "Complaint ID must be a positive number."
        );
        form.complaint_id = " 42 ".into();
        assert!(form.is_valid());
    }
}
