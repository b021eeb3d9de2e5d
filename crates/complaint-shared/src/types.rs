//! Wire models exchanged with the Complaint Hub backend.
//!
//! Field names follow the backend's snake_case JSON exactly, so every struct
//! round-trips through `serde_json` without renames.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SharedError;

// ---------------------------------------------------------------------------
// Complaint status
// ---------------------------------------------------------------------------

/// Lifecycle state of a complaint as reported by the backend.
///
/// The backend has used two vocabularies over time (`NEW`/`IN_PROGRESS`/`CLOSED`
/// and `SUBMITTED`/`IN_REVIEW`/`REJECTED`); both are accepted and collapse to
/// the same [`StatusGroup`] for display and filtering. Anything else is kept
/// verbatim in [`ComplaintStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComplaintStatus {
    New,
    Submitted,
    InProgress,
    InReview,
    Resolved,
    Closed,
    Rejected,
    Other(String),
}

impl ComplaintStatus {
    /// Statuses a staff member may assign through the status form.
    pub const STAFF_SETTABLE: [ComplaintStatus; 4] = [
        ComplaintStatus::New,
        ComplaintStatus::InProgress,
        ComplaintStatus::Resolved,
        ComplaintStatus::Closed,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::New => "NEW",
            Self::Submitted => "SUBMITTED",
            Self::InProgress => "IN_PROGRESS",
            Self::InReview => "IN_REVIEW",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
            Self::Rejected => "REJECTED",
            Self::Other(raw) => raw,
        }
    }

    pub fn group(&self) -> Option<StatusGroup> {
        match self {
            Self::New | Self::Submitted => Some(StatusGroup::Submitted),
            Self::InReview => Some(StatusGroup::InReview),
            Self::InProgress => Some(StatusGroup::InProgress),
            Self::Resolved => Some(StatusGroup::Resolved),
            Self::Closed | Self::Rejected => Some(StatusGroup::Rejected),
            Self::Other(_) => None,
        }
    }

    /// Human-readable label; unknown statuses fall back to the raw value.
    pub fn label(&self) -> &str {
        match self.group() {
            Some(group) => group.label(),
            None => self.as_str(),
        }
    }

    /// Parse a status a staff member is allowed to set.
    pub fn parse_staff(value: &str) -> Result<Self, SharedError> {
        let status = Self::from(value.trim().to_ascii_uppercase());
        if Self::STAFF_SETTABLE.contains(&status) {
            Ok(status)
        } else {
            Err(SharedError::UnknownStatus(value.to_string()))
        }
    }
}

impl From<String> for ComplaintStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "NEW" => Self::New,
            "SUBMITTED" => Self::Submitted,
            "IN_PROGRESS" => Self::InProgress,
            "IN_REVIEW" => Self::InReview,
            "RESOLVED" => Self::Resolved,
            "CLOSED" => Self::Closed,
            "REJECTED" => Self::Rejected,
            _ => Self::Other(value),
        }
    }
}

impl From<ComplaintStatus> for String {
    fn from(value: ComplaintStatus) -> Self {
        match value {
            ComplaintStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display group shared by synonymous statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusGroup {
    Submitted,
    InReview,
    InProgress,
    Resolved,
    Rejected,
}

impl StatusGroup {
    pub fn label(self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::InReview => "In review",
            Self::InProgress => "In progress",
            Self::Resolved => "Resolved",
            Self::Rejected => "Rejected",
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A complaint as owned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    pub id: u64,
    pub text: String,
    pub status: ComplaintStatus,
    pub user: u64,
    pub category: Option<u64>,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Complaint {
    /// Last modification time, falling back to creation time.
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }
}

/// Body of `GET complaints/`: either a bare array or a paginated envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComplaintPage {
    List(Vec<Complaint>),
    Paginated {
        results: Vec<Complaint>,
        #[serde(default)]
        next: Option<String>,
        #[serde(default)]
        count: Option<u64>,
    },
}

impl ComplaintPage {
    pub fn into_results(self) -> Vec<Complaint> {
        match self {
            Self::List(items) => items,
            Self::Paginated { results, .. } => results,
        }
    }

    /// True only for a paginated body that names a next page.
    pub fn has_next(&self) -> bool {
        match self {
            Self::List(_) => false,
            Self::Paginated { next, .. } => next.as_deref().is_some_and(|n| !n.is_empty()),
        }
    }
}

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComplaint {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: ComplaintStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAdminResponse {
    pub complaint: u64,
    pub response_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFeedback {
    pub complaint: u64,
    pub comment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_accepted: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordResetConfirm {
    pub token: String,
    pub password: String,
}
