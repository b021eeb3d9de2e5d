use reqwest::Method;
use url::form_urlencoded;

use complaint_shared::constants::PATH_COMPLAINTS;
use complaint_shared::{Complaint, ComplaintPage, NewComplaint};

use crate::http::{ApiClient, ApiResult, RequestOptions};

/// Query parameters for `GET complaints/`. Empty values are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Free text matched by the backend.
    pub search: Option<String>,
    /// Wire status value; `"all"` means no status filter.
    pub status: Option<String>,
    pub category: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
}

impl ListParams {
    /// Only a page number.
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    /// `?key=value&...`, or an empty string when nothing is set.
    pub fn query_string(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        let mut any = false;

        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            query.append_pair("search", search);
            any = true;
        }
        if let Some(status) = self
            .status
            .as_deref()
            .filter(|s| !s.is_empty() && *s != "all")
        {
            query.append_pair("status", status);
            any = true;
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            query.append_pair("category", category);
            any = true;
        }
        if let Some(page) = self.page.filter(|p| *p > 0) {
            query.append_pair("page", &page.to_string());
            any = true;
        }

        if any {
            format!("?{}", query.finish())
        } else {
            String::new()
        }
    }
}

impl ApiClient {
    /// `POST complaints/`. Returns the stored complaint.
    pub async fn create_complaint(&self, payload: &NewComplaint, token: &str) -> ApiResult<Complaint> {
        self.request(
            PATH_COMPLAINTS,
            RequestOptions::new(Method::POST).json(payload).token(token),
        )
        .await
    }

    /// The signed-in user's complaints.
    pub async fn list_complaints(&self, params: &ListParams, token: &str) -> ApiResult<ComplaintPage> {
        let path = format!("{PATH_COMPLAINTS}{}", params.query_string());
        self.request(&path, RequestOptions::get().token(token)).await
    }

    /// One complaint by id; 404 when it does not exist or is not visible.
    pub async fn get_complaint(&self, id: u64, token: &str) -> ApiResult<Complaint> {
        let path = format!("{PATH_COMPLAINTS}{id}/");
        self.request(&path, RequestOptions::get().token(token)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_params_add_no_query() {
        assert_eq!(ListParams::default().query_string(), "");
        let all = ListParams {
            status: Some("all".into()),
            search: Some(String::new()),
            ..ListParams::default()
        };
        assert_eq!(all.query_string(), "");
    }

    #[test]
    fn params_are_encoded_in_order() {
        let params = ListParams {
            search: Some("wifi down".into()),
            status: Some("IN_REVIEW".into()),
            category: Some("3".into()),
            page: Some(2),
        };
        assert_eq!(
            params.query_string(),
            "?search=wifi+down&status=IN_REVIEW&category=3&page=2"
        );
    }
}
