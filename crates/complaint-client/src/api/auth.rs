use reqwest::Method;
use serde_json::Value;

use complaint_shared::constants::{
    PATH_LOGIN, PATH_PASSWORD_RESET, PATH_PASSWORD_RESET_CONFIRM, PATH_REGISTER,
};
use complaint_shared::{
    LoginRequest, LoginResponse, PasswordResetConfirm, PasswordResetRequest, RegisterRequest,
};

use crate::http::{ApiClient, ApiResult, RequestOptions};

impl ApiClient {
    /// `POST auth/login/`. A 2xx reply carries the session token.
    pub async fn login(&self, payload: &LoginRequest) -> ApiResult<LoginResponse> {
        self.request(PATH_LOGIN, RequestOptions::new(Method::POST).json(payload))
            .await
    }

    /// Returns the created account record as the backend sends it.
    pub async fn register(&self, payload: &RegisterRequest) -> ApiResult<Value> {
        self.request(PATH_REGISTER, RequestOptions::new(Method::POST).json(payload))
            .await
    }

    /// `POST auth/password/reset/`: email a reset link to `email`.
    pub async fn request_password_reset(&self, email: &str) -> ApiResult<Value> {
        let payload = PasswordResetRequest {
            email: email.to_string(),
        };
        self.request(
            PATH_PASSWORD_RESET,
            RequestOptions::new(Method::POST).json(&payload),
        )
        .await
    }

    /// `POST auth/password/reset/confirm/`: set a new password with the
    /// token from the emailed link.
    pub async fn confirm_password_reset(&self, reset_token: &str, password: &str) -> ApiResult<Value> {
        let payload = PasswordResetConfirm {
            token: reset_token.to_string(),
            password: password.to_string(),
        };
        self.request(
            PATH_PASSWORD_RESET_CONFIRM,
            RequestOptions::new(Method::POST).json(&payload),
        )
        .await
    }
}
