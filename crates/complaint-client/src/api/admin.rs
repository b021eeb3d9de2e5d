use futures::future::BoxFuture;
use reqwest::Method;
use serde_json::Value;

use complaint_shared::constants::{PATH_ADMIN_COMPLAINTS, PATH_ADMIN_RESPONSE};
use complaint_shared::{Complaint, ComplaintStatus, NewAdminResponse, StatusUpdate};

use crate::http::{ApiClient, ApiResult, RequestOptions};
use crate::session::StaffProbe;

impl ApiClient {
    /// Every complaint in the system. Staff only.
    pub async fn list_all_complaints(&self, token: &str) -> ApiResult<Vec<Complaint>> {
        self.request(PATH_ADMIN_COMPLAINTS, RequestOptions::get().token(token))
            .await
    }

    /// `HEAD admin/complaints/`: 2xx iff `token` belongs to staff.
    pub async fn probe_staff(&self, token: &str) -> ApiResult<Value> {
        self.request(
            PATH_ADMIN_COMPLAINTS,
            RequestOptions::new(Method::HEAD).token(token),
        )
        .await
    }

    /// `PATCH admin/complaints/{id}/status/`. Staff only.
    pub async fn update_status(
        &self,
        id: u64,
        status: &ComplaintStatus,
        token: &str,
    ) -> ApiResult<Value> {
        let path = format!("{PATH_ADMIN_COMPLAINTS}{id}/status/");
        let payload = StatusUpdate {
            status: status.clone(),
        };
        self.request(
            &path,
            RequestOptions::new(Method::PATCH).json(&payload).token(token),
        )
        .await
    }

    /// `POST admin/response/`: attach an official response. Staff only.
    pub async fn respond(&self, payload: &NewAdminResponse, token: &str) -> ApiResult<Value> {
        self.request(
            PATH_ADMIN_RESPONSE,
            RequestOptions::new(Method::POST).json(payload).token(token),
        )
        .await
    }
}

impl StaffProbe for ApiClient {
    fn probe(&self, token: String) -> BoxFuture<'static, bool> {
        let client = self.clone();
        Box::pin(async move { client.probe_staff(&token).await.is_ok() })
    }
}
