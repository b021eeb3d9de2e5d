use tracing::warn;

use complaint_shared::Complaint;

use crate::http::{ApiClient, ApiResult};
use crate::session::SessionStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailState {
    #[default]
    Idle,
    Loading,
    Loaded(Complaint),
    NotFound,
    Failed(String),
}

/// A single complaint, loaded by id.
#[derive(Debug, Default)]
pub struct ComplaintDetailView {
    state: DetailState,
}

impl ComplaintDetailView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn complaint(&self) -> Option<&Complaint> {
        match &self.state {
            DetailState::Loaded(complaint) => Some(complaint),
            _ => None,
        }
    }

    pub async fn load(&mut self, id: u64, api: &ApiClient, session: &SessionStore) -> &DetailState {
        self.state = DetailState::Loading;
        let result = api.get_complaint(id, &session.token()).await;
        self.state = detail_state(result);
        if !matches!(self.state, DetailState::Loaded(_)) {
            warn!(complaint_id = id, state = ?self.state, "Complaint detail unavailable");
        }
        &self.state
    }
}

fn detail_state(result: ApiResult<Complaint>) -> DetailState {
    let status = result.status();
    match result.into_data() {
        Some(complaint) => DetailState::Loaded(complaint),
        None => match status {
            404 => DetailState::NotFound,
            401 | 403 => DetailState::Failed("You need to sign in again.".into()),
            _ => DetailState::Failed("Unable to load complaint details.".into()),
        },
    }
}
