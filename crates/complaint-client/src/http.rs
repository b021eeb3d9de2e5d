//! Thin JSON client for the Complaint Hub backend.
//!
//! [`ApiClient::request`] is the single way the client talks to the backend.
//! It never returns `Err` and never panics: every outcome, including a
//! connection that could not be made at all, comes back as an [`ApiResult`].
//! There are no retries, caches or request deduplication here; callers that
//! want a retry policy own it.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use complaint_shared::constants::AUTH_SCHEME;

use crate::error::ClientError;

// ---------------------------------------------------------------------------
// ApiResult
// ---------------------------------------------------------------------------

/// Uniform outcome of a backend request.
///
/// `ok` is true iff the status was 2xx and the payload parsed into `T`.
/// `data` is present only when `ok`, `error` only when not. A `status` of 0
/// means no response was received.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResult<T> {
    ok: bool,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip)]
    from_detail: bool,
}

impl<T> ApiResult<T> {
    /// A parsed 2xx reply. A status outside 2xx never yields an ok result:
    /// the data is dropped and the status text becomes the error.
    pub fn success(status: u16, data: T) -> Self {
        if !(200..300).contains(&status) {
            warn!(status, "Refusing to mark a non-2xx status as success");
            return Self::failure(status, status_text(status));
        }
        Self {
            ok: true,
            status,
            data: Some(data),
            error: None,
            from_detail: false,
        }
    }

    /// A reply that could not be used; `error` is shown as-is.
    pub fn failure(status: u16, error: impl Into<String>) -> Self {
        Self {
            ok: false,
            status,
            data: None,
            error: Some(error.into()),
            from_detail: false,
        }
    }

    /// A failure whose message is the server's own `detail` string.
    pub fn detail_failure(status: u16, detail: impl Into<String>) -> Self {
        Self {
            from_detail: true,
            ..Self::failure(status, detail)
        }
    }

    /// No response was received (DNS, refused connection, timeout, ...).
    pub fn transport(error: impl Into<String>) -> Self {
        Self::failure(0, error)
    }

    /// True iff the status was 2xx and the payload parsed.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// HTTP status, or 0 when no response arrived.
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_transport_failure(&self) -> bool {
        !self.ok && self.status == 0
    }

    /// Parsed payload; present only when ok.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Failure message; present only when not ok.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The server-supplied `detail` message, if the error came from one.
    pub fn detail(&self) -> Option<&str> {
        if self.from_detail {
            self.error.as_deref()
        } else {
            None
        }
    }

    /// Convert the payload, keeping status and error.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        ApiResult {
            ok: self.ok,
            status: self.status,
            data: self.data.map(f),
            error: self.error,
            from_detail: self.from_detail,
        }
    }
}

// ---------------------------------------------------------------------------
// Request options
// ---------------------------------------------------------------------------

/// Per-request settings for [`ApiClient::request`].
#[derive(Debug, Clone)]
pub struct RequestOptions<'a> {
    pub method: Method,
    /// JSON body; sent with `Content-Type: application/json`.
    pub body: Option<Value>,
    /// Sent as `Authorization: Token <token>` when present.
    pub token: Option<&'a str>,
}

impl Default for RequestOptions<'_> {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            token: None,
        }
    }
}

impl<'a> RequestOptions<'a> {
    /// Options for `method` with no body and no token.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// A plain `GET`.
    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => self.body = Some(value),
            Err(e) => {
                // only reachable for maps with non-string keys
                warn!(error = %e, "Failed to encode request body, sending null");
                self.body = Some(Value::Null);
            }
        }
        self
    }

    /// Authenticate as `token`. Empty tokens are ignored.
    pub fn token(mut self, token: &'a str) -> Self {
        self.token = Some(token).filter(|t| !t.is_empty());
        self
    }
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// Handle to the backend. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for `base_url`, with an optional transport timeout.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.into(),
        })
    }

    /// Base URL every path is joined onto.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path`, with exactly one `/` at the join.
    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// Issue one request and normalize every outcome into an [`ApiResult`].
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions<'_>,
    ) -> ApiResult<T> {
        let url = self.url(path);
        let method = options.method.clone();

        let mut req = self.http.request(options.method, &url);
        if let Some(body) = &options.body {
            let bytes = serde_json::to_vec(body).unwrap_or_else(|_| b"null".to_vec());
            req = req.header(CONTENT_TYPE, "application/json").body(bytes);
        }
        if let Some(token) = options.token {
            req = req.header(AUTHORIZATION, format!("{AUTH_SCHEME} {token}"));
        }

        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(%method, path, error = %e, "Request failed before a response arrived");
                return ApiResult::transport(transport_message(&e));
            }
        };

        let status = resp.status();
        let payload = parse_payload(resp).await;

        debug!(%method, path, status = status.as_u16(), "Request completed");

        if status.is_success() {
            return match serde_json::from_value::<T>(payload) {
                Ok(data) => ApiResult::success(status.as_u16(), data),
                Err(e) => {
                    warn!(%method, path, error = %e, "Unexpected response body");
                    ApiResult::failure(
                        status.as_u16(),
                        format!("Unexpected response from server: {e}"),
                    )
                }
            };
        }

        error_result(status, payload)
    }
}

/// Join `base` and `path` with exactly one `/`.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// JSON when the response says so, text otherwise, `null` if reading fails.
async fn parse_payload(resp: reqwest::Response) -> Value {
    let is_json = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));

    if is_json {
        match resp.bytes().await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or(Value::Null),
            Err(_) => Value::Null,
        }
    } else {
        match resp.text().await {
            Ok(text) => Value::String(text),
            Err(_) => Value::Null,
        }
    }
}

/// Canonical reason phrase, or `HTTP <code>` when there is none.
fn status_text(code: u16) -> String {
    match StatusCode::from_u16(code).ok().and_then(|s| s.canonical_reason()) {
        Some(reason) => reason.to_string(),
        None => format!("HTTP {code}"),
    }
}

fn error_result<T>(status: StatusCode, payload: Value) -> ApiResult<T> {
    let code = status.as_u16();
    let fallback = status_text(code);

    match payload {
        Value::Null => ApiResult::failure(code, fallback),
        Value::String(text) if text.is_empty() => ApiResult::failure(code, fallback),
        Value::String(text) => ApiResult::failure(code, text),
        Value::Object(ref map) => match map.get("detail") {
            Some(Value::String(detail)) => ApiResult::detail_failure(code, detail.clone()),
            _ => ApiResult::failure(code, payload.to_string()),
        },
        other => ApiResult::failure(code, other.to_string()),
    }
}

fn transport_message(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timed out".to_string()
    } else if e.is_connect() {
        format!("Could not connect to server: {e}")
    } else {
        format!("Network error: {e}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn join_url_normalizes_slashes() {
        let expected = "http://host/api/complaints/";
        assert_eq!(join_url("http://host/api", "complaints/"), expected);
        assert_eq!(join_url("http://host/api/", "complaints/"), expected);
        assert_eq!(join_url("http://host/api/", "/complaints/"), expected);
        assert_eq!(join_url("http://host/api//", "//complaints/"), expected);
    }

    #[test]
    fn detail_string_becomes_the_error() {
        let result: ApiResult<Value> =
            error_result(StatusCode::BAD_REQUEST, json!({ "detail": "X" }));
        assert!(!result.is_ok());
        assert_eq!(result.error(), Some("X"));
        assert_eq!(result.detail(), Some("X"));
    }

    #[test]
    fn non_string_detail_stringifies_payload() {
        let result: ApiResult<Value> =
            error_result(StatusCode::BAD_REQUEST, json!({ "detail": ["a", "b"] }));
        assert_eq!(result.error(), Some(r#"{"detail":["a","b"]}"#));
        assert_eq!(result.detail(), None);
    }

    #[test]
    fn empty_payload_falls_back_to_status_text() {
        let null: ApiResult<Value> = error_result(StatusCode::NOT_FOUND, Value::Null);
        assert_eq!(null.error(), Some("Not Found"));

        let empty: ApiResult<Value> =
            error_result(StatusCode::BAD_GATEWAY, Value::String(String::new()));
        assert_eq!(empty.error(), Some("Bad Gateway"));

        let plain: ApiResult<Value> =
            error_result(StatusCode::SERVICE_UNAVAILABLE, Value::String("down".into()));
        assert_eq!(plain.error(), Some("down"));
    }

    #[test]
    fn unknown_status_without_reason() {
        let status = StatusCode::from_u16(599).unwrap();
        let result: ApiResult<Value> = error_result(status, Value::Null);
        assert_eq!(result.error(), Some("HTTP 599"));
    }

    #[test]
    fn result_serializes_to_wire_shape() {
        let ok = ApiResult::success(200, json!({ "token": "abc" }));
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({ "ok": true, "status": 200, "data": { "token": "abc" } })
        );

        let failed: ApiResult<Value> = ApiResult::transport("connection refused");
        assert!(failed.is_transport_failure());
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({ "ok": false, "status": 0, "error": "connection refused" })
        );
    }

    #[test]
    fn success_requires_a_2xx_status() {
        let created = ApiResult::success(201, json!({ "id": 1 }));
        assert!(created.is_ok());
        assert_eq!(created.error(), None);

        let bogus = ApiResult::success(500, Value::Null);
        assert!(!bogus.is_ok());
        assert_eq!(bogus.status(), 500);
        assert!(bogus.data().is_none());
        assert_eq!(bogus.error(), Some("Internal Server Error"));

        let none: ApiResult<Value> = ApiResult::success(0, Value::Null);
        assert!(none.is_transport_failure());
        assert_eq!(none.error(), Some("HTTP 0"));
    }

    #[test]
    fn empty_token_is_not_sent() {
        let options = RequestOptions::get().token("");
        assert!(options.token.is_none());
    }
}
