//! Complaint list: fetch, page, filter and highlight.
//!
//! Filtering by status and free text works on the rows already fetched and
//! never issues a request. `load_more` appends the next page.

use tracing::{debug, warn};

use complaint_shared::constants::GENERAL_CATEGORY;
use complaint_shared::{Complaint, ComplaintPage, StatusGroup};

use crate::api::ListParams;
use crate::forms::Navigation;
use crate::http::{ApiClient, ApiResult};
use crate::session::SessionStore;

pub const SIGN_IN_AGAIN: &str = "You need to sign in again.";
pub const LOAD_FAILED: &str = "Unable to load complaints. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSource {
    /// The signed-in user's own complaints.
    Mine,
    /// Every complaint. Staff only.
    Queue,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Group(StatusGroup),
}

impl StatusFilter {
    fn matches(self, complaint: &Complaint) -> bool {
        match self {
            Self::All => true,
            Self::Group(group) => complaint.status.group() == Some(group),
        }
    }
}

/// One row as it should be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow<'a> {
    pub complaint: &'a Complaint,
    pub highlighted: bool,
}

#[derive(Debug)]
pub struct ComplaintListView {
    source: ListSource,
    items: Vec<Complaint>,
    page: u32,
    has_more: bool,
    loading: bool,
    error: String,
    flash: Option<String>,
    highlight: Option<u64>,
    highlight_shown: bool,
    pub search: String,
    pub status_filter: StatusFilter,
}

impl ComplaintListView {
    pub fn new(source: ListSource) -> Self {
        Self {
            source,
            items: Vec::new(),
            page: 0,
            has_more: false,
            loading: false,
            error: String::new(),
            flash: None,
            highlight: None,
            highlight_shown: false,
            search: String::new(),
            status_filter: StatusFilter::All,
        }
    }

    /// Carry a highlight id and flash message over from the page that
    /// navigated here.
    pub fn with_navigation(mut self, navigation: &Navigation) -> Self {
        self.highlight = navigation.highlight;
        self.flash = navigation.flash.clone();
        self
    }

    pub fn source(&self) -> ListSource {
        self.source
    }

    pub fn items(&self) -> &[Complaint] {
        &self.items
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn flash(&self) -> Option<&str> {
        self.flash.as_deref()
    }

    pub fn highlight(&self) -> Option<u64> {
        self.highlight
    }

    /// Fetch the first page and replace whatever was shown.
    pub async fn refresh(&mut self, api: &ApiClient, session: &SessionStore) -> bool {
        self.fetch(api, session, 1).await
    }

    /// Fetch the next page and append it. No-op without a next page.
    pub async fn load_more(&mut self, api: &ApiClient, session: &SessionStore) -> bool {
        if !self.has_more || self.loading {
            return false;
        }
        self.fetch(api, session, self.page + 1).await
    }

    async fn fetch(&mut self, api: &ApiClient, session: &SessionStore, page: u32) -> bool {
        let token = session.token();
        self.loading = true;
        self.error.clear();

        let result = match self.source {
            ListSource::Mine => api.list_complaints(&ListParams::page(page), &token).await,
            ListSource::Queue => api
                .list_all_complaints(&token)
                .await
                .map(ComplaintPage::List),
        };
        self.loading = false;

        self.apply(page, result)
    }

    fn apply(&mut self, page: u32, result: ApiResult<ComplaintPage>) -> bool {
        let status = result.status();
        let Some(body) = result.into_data() else {
            warn!(status, page, "Failed to load complaints");
            self.error = match status {
                401 | 403 => SIGN_IN_AGAIN.to_string(),
                _ => LOAD_FAILED.to_string(),
            };
            return false;
        };

        // the first fetch shows the highlight, the next one drops it
        if self.highlight_shown {
            self.highlight = None;
        } else if self.highlight.is_some() {
            self.highlight_shown = true;
        }

        self.has_more = body.has_next();
        let rows = body.into_results();
        debug!(page, rows = rows.len(), has_more = self.has_more, "Complaints loaded");

        if page <= 1 {
            self.items = rows;
        } else {
            self.items.extend(rows);
        }
        self.page = page;
        true
    }

    /// Swap in an updated copy of a complaint already in the list.
    pub fn replace(&mut self, complaint: Complaint) -> bool {
        match self.items.iter_mut().find(|c| c.id == complaint.id) {
            Some(slot) => {
                *slot = complaint;
                true
            }
            None => false,
        }
    }

    /// Rows after the status and search filters, newest first.
    pub fn visible(&self) -> Vec<ListRow<'_>> {
        let needle = self.search.trim().to_lowercase();
        let mut rows: Vec<ListRow<'_>> = self
            .items
            .iter()
            .filter(|c| self.status_filter.matches(c))
            .filter(|c| needle.is_empty() || matches_search(c, &needle))
            .map(|complaint| ListRow {
                complaint,
                highlighted: self.highlight == Some(complaint.id),
            })
            .collect();
        rows.sort_by(|a, b| b.complaint.created_at.cmp(&a.complaint.created_at));
        rows
    }
}

fn matches_search(complaint: &Complaint, needle: &str) -> bool {
    let category = complaint
        .category
        .map(|c| c.to_string())
        .unwrap_or_else(|| GENERAL_CATEGORY.to_string());

    complaint.id.to_string().contains(needle)
        || category.contains(needle)
        || complaint.text.to_lowercase().contains(needle)
}
