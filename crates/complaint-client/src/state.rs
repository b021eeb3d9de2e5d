//! Application state shared by every command.
//!
//! Built once at start-up and passed by reference; there are no globals.

use std::sync::Arc;

use tracing::info;

use complaint_store::{Database, KeyValueStore, MemoryStore};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::ApiClient;
use crate::session::{ProbeHandle, SessionStore};

pub struct AppState {
    pub config: ClientConfig,

    /// Backend client. Clones share one connection pool.
    pub api: ApiClient,

    /// The signed-in session, persisted write-through.
    pub session: SessionStore,
}

impl AppState {
    /// Open storage, restore the session and build the API client.
    ///
    /// With `ephemeral` the session lives in memory only and nothing touches
    /// the disk.
    pub fn init(config: ClientConfig, ephemeral: bool) -> Result<Self, ClientError> {
        let api = ApiClient::new(config.api_base_url.clone(), config.http_timeout)?;

        let storage: Box<dyn KeyValueStore> = if ephemeral {
            info!("Using in-memory session storage");
            Box::new(MemoryStore::new())
        } else {
            let db = match &config.db_path {
                Some(path) => Database::open_at(path)?,
                None => Database::new()?,
            };
            info!(path = ?db.path(), "Session database opened");
            Box::new(db)
        };

        let session = SessionStore::load(storage, Arc::new(api.clone()))?;

        Ok(Self {
            config,
            api,
            session,
        })
    }

    /// Confirm a restored staff flag with the server.
    pub fn refresh_staff_flag(&self) -> Option<ProbeHandle> {
        self.session.refresh_staff_flag()
    }
}
