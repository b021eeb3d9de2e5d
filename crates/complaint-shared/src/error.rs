use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharedError {
    #[error("Invalid complaint ID: {0:?}")]
    InvalidId(String),

    #[error("Invalid category: {0:?}")]
    InvalidCategory(String),

    #[error("Unknown complaint status: {0}")]
    UnknownStatus(String),
}
