//! Client configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the client can start with zero
//! configuration against a local development backend.

use std::path::PathBuf;
use std::time::Duration;

use complaint_shared::constants::{DEFAULT_API_BASE_URL, DEFAULT_EMAIL_DOMAIN};

use crate::error::ClientError;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every backend path is joined onto.
    /// Env: `COMPLAINT_API_BASE_URL`
    /// Default: `http://localhost:8000/api/`
    pub api_base_url: String,

    /// Location of the session database.
    /// Env: `COMPLAINT_DB_PATH`
    /// Default: `None` (platform data directory).
    pub db_path: Option<PathBuf>,

    /// Email domains accepted by registration and password reset.
    /// Env: `COMPLAINT_EMAIL_DOMAINS` (comma-separated)
    /// Default: `astanait.edu.kz`
    pub allowed_email_domains: Vec<String>,

    /// Transport-level timeout applied by reqwest.
    /// Env: `COMPLAINT_HTTP_TIMEOUT_SECS`
    /// Default: none.
    pub http_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            db_path: None,
            allowed_email_domains: vec![DEFAULT_EMAIL_DOMAIN.to_string()],
            http_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("COMPLAINT_API_BASE_URL") {
            match url::Url::parse(url.trim()) {
                Ok(_) => config.api_base_url = url.trim().to_string(),
                Err(e) => {
                    tracing::warn!(value = %url, error = %e, "Invalid COMPLAINT_API_BASE_URL, using default");
                }
            }
        }

        if let Some(path) = lookup("COMPLAINT_DB_PATH") {
            if !path.trim().is_empty() {
                config.db_path = Some(PathBuf::from(path.trim()));
            }
        }

        if let Some(raw) = lookup("COMPLAINT_EMAIL_DOMAINS") {
            let domains = parse_domains(&raw);
            if domains.is_empty() {
                tracing::warn!(value = %raw, "Empty COMPLAINT_EMAIL_DOMAINS, using default");
            } else {
                config.allowed_email_domains = domains;
            }
        }

        if let Some(raw) = lookup("COMPLAINT_HTTP_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.http_timeout = Some(Duration::from_secs(secs)),
                _ => {
                    tracing::warn!(value = %raw, "Invalid COMPLAINT_HTTP_TIMEOUT_SECS, ignoring");
                }
            }
        }

        config
    }

    /// Replace the base URL, e.g. from a command-line flag.
    pub fn set_api_base_url(&mut self, url: &str) -> Result<(), ClientError> {
        let url = url.trim();
        url::Url::parse(url).map_err(|e| ClientError::Config(format!("API URL {url:?}: {e}")))?;
        self.api_base_url = url.to_string();
        Ok(())
    }
}

fn parse_domains(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|d| d.trim().trim_start_matches('@').to_lowercase())
        .filter(|d| !d.is_empty())
        .collect()
}
