use tracing::info;

use complaint_shared::validation::{parse_positive_id, validate_comment, validate_complaint_id};
use complaint_shared::NewFeedback;

use super::{fail_with, require_signed_in, FailureCopy, Form, FormState, SubmitOutcome};
use crate::http::ApiClient;
use crate::session::{SessionSnapshot, SessionStore};

const COPY: FailureCopy = FailureCopy::new("Failed to send feedback.").not_found("Complaint not found.");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackField {
    ComplaintId,
    Comment,
}

/// Tell staff how a resolution went.
///
/// When opened from a complaint's page the id is preset and locked; clearing
/// the form after a successful send keeps a locked id.
#[derive(Debug, Default)]
pub struct FeedbackForm {
    complaint_id: String,
    locked: bool,
    pub comment: String,
    /// `None` leaves the acceptance question unanswered.
    pub is_accepted: Option<bool>,
    state: FormState<FeedbackField>,
}

impl FeedbackForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feedback for a known complaint; the id cannot be edited.
    pub fn for_complaint(id: u64) -> Self {
        Self {
            complaint_id: id.to_string(),
            locked: true,
            ..Self::default()
        }
    }

    pub fn complaint_id(&self) -> &str {
        &self.complaint_id
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Edit the complaint id. Ignored when locked.
    pub fn set_complaint_id(&mut self, value: impl Into<String>) -> bool {
        if self.locked {
            return false;
        }
        self.complaint_id = value.into();
        true
    }

    pub async fn submit(&mut self, api: &ApiClient, session: &SessionStore) -> SubmitOutcome<()> {
        let snapshot = session.snapshot();
        if !self.begin_submit(&snapshot) {
            return SubmitOutcome::Blocked;
        }
        let Ok(complaint) = parse_positive_id(&self.complaint_id) else {
            return SubmitOutcome::Blocked;
        };

        let payload = NewFeedback {
            complaint,
            comment: self.comment.trim().to_string(),
            is_accepted: self.is_accepted,
        };
        let result = api.send_feedback(&payload, &snapshot.token).await;
        if !result.is_ok() {
            return fail_with(self.state.submission_mut(), &result, &COPY);
        }

        info!(complaint_id = complaint, "Feedback sent");
        if !self.locked {
            self.complaint_id.clear();
        }
        self.comment.clear();
        self.is_accepted = None;
        self.state.reset_touched();
        self.state.submission_mut().succeed("Feedback sent.");
        SubmitOutcome::Cleared
    }
}

impl Form for FeedbackForm {
    type Field = FeedbackField;

    const FIELDS: &'static [FeedbackField] = &[FeedbackField::ComplaintId, FeedbackField::Comment];

    fn field_error(&self, field: FeedbackField) -> String {
        match field {
            FeedbackField::ComplaintId => validate_complaint_id(&self.complaint_id),
            FeedbackField::Comment => validate_comment(&self.comment),
        }
    }

    fn state(&self) -> &FormState<FeedbackField> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FormState<FeedbackField> {
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
    fn preset_id_is_locked() {
        let mut form = FeedbackForm::for_complaint(7);
        assert!(form.is_locked());
        assert!(!form.set_complaint_id("8"));
        assert_eq!(form.complaint_id(), "7");
        assert_eq!(form.field_error(FeedbackField::ComplaintId), "");
    }

    #[test]
    fn free_form_id_is_editable() {
        let mut form = FeedbackForm::new();
        assert!(form.set_complaint_id("12"));
        form.comment = "Fixed quickly, thanks".into();
        assert!(form.is_valid());
    }
}
