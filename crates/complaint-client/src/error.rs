use complaint_store::StoreError;
use thiserror::Error;

/// Errors raised while wiring the client together.
///
/// Requests to the backend never produce these: their failures travel as
/// values inside [`ApiResult`](crate::http::ApiResult).
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("HTTP client setup failed: {0}")]
    HttpSetup(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
