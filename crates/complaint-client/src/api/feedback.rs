use reqwest::Method;
use serde_json::Value;

use complaint_shared::constants::PATH_FEEDBACK;
use complaint_shared::NewFeedback;

use crate::http::{ApiClient, ApiResult, RequestOptions};

impl ApiClient {
    /// `POST feedback/` on a resolved complaint. The reply body is not used.
    pub async fn send_feedback(&self, payload: &NewFeedback, token: &str) -> ApiResult<Value> {
        self.request(
            PATH_FEEDBACK,
            RequestOptions::new(Method::POST).json(payload).token(token),
        )
        .await
    }
}
