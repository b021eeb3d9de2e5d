//! In-process mock of the Complaint Hub backend.
//!
//! Every request is recorded; replies are looked up by method and path
//! (with the query string first, then without it). Unknown routes answer
//! `404 {"detail": "Not found."}`.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};

use complaint_client::{ApiClient, SessionStore};
use complaint_store::MemoryStore;

#[derive(Debug, Clone)]
pub enum Reply {
    Json(StatusCode, Value),
    Raw(StatusCode, &'static str, String),
    Empty(StatusCode),
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Self::Json(StatusCode::OK, body)
    }
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Default)]
struct Inner {
    routes: Vec<(Method, String, Reply)>,
    requests: Vec<Recorded>,
}

#[derive(Clone)]
pub struct MockBackend {
    inner: Arc<Mutex<Inner>>,
    addr: SocketAddr,
}

impl MockBackend {
    pub async fn start() -> Self {
        let inner = Arc::new(Mutex::new(Inner::default()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let app = Router::new().fallback(handle).with_state(inner.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { inner, addr }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api/", self.addr)
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.base_url(), None).unwrap()
    }

    /// Answer `method /api/{path}` with `reply`. Later registrations win.
    pub fn on(&self, method: Method, path: &str, reply: Reply) {
        let full = format!("/api/{}", path.trim_start_matches('/'));
        self.inner.lock().unwrap().routes.insert(0, (method, full, reply));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.lock().unwrap().requests.clone()
    }

    /// Recorded requests, ignoring staff probes.
    pub fn calls(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method != Method::HEAD)
            .collect()
    }

    pub fn probes(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == Method::HEAD)
            .collect()
    }

    /// A signed-in session whose staff flag has already been derived.
    pub async fn session(&self, api: &ApiClient, token: &str, staff: bool) -> SessionStore {
        let status = if staff {
            StatusCode::OK
        } else {
            StatusCode::FORBIDDEN
        };
        self.on(Method::HEAD, "admin/complaints/", Reply::Empty(status));

        let session = SessionStore::load(Box::new(MemoryStore::new()), Arc::new(api.clone())).unwrap();
        if let Some(probe) = session.set_token(token).unwrap() {
            probe.wait().await;
        }
        assert_eq!(session.is_admin(), staff);
        session
    }
}

async fn handle(
    State(inner): State<Arc<Mutex<Inner>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let path = uri.path().to_string();
    let query = uri.query().map(str::to_string);

    let mut inner = inner.lock().unwrap();
    inner.requests.push(Recorded {
        method: method.clone(),
        path: path.clone(),
        query: query.clone(),
        authorization: header(AUTHORIZATION),
        content_type: header(CONTENT_TYPE),
        body: body.to_vec(),
    });

    let with_query = match &query {
        Some(q) => format!("{path}?{q}"),
        None => path.clone(),
    };
    let reply = inner
        .routes
        .iter()
        .find(|(m, p, _)| *m == method && *p == with_query)
        .or_else(|| inner.routes.iter().find(|(m, p, _)| *m == method && *p == path))
        .map(|(_, _, reply)| reply.clone())
        .unwrap_or_else(|| Reply::Json(StatusCode::NOT_FOUND, json!({ "detail": "Not found." })));

    match reply {
        Reply::Json(status, value) => (
            status,
            [(CONTENT_TYPE, "application/json")],
            value.to_string(),
        )
            .into_response(),
        Reply::Raw(status, content_type, text) => {
            (status, [(CONTENT_TYPE, content_type)], text).into_response()
        }
        Reply::Empty(status) => status.into_response(),
    }
}

pub fn complaint_json(id: u64, text: &str, day: u32) -> Value {
    json!({
        "id": id,
        "text": text,
        "status": "NEW",
        "user": 1,
        "category": null,
        "created_at": format!("2024-03-{day:02}T09:00:00Z"),
    })
}
