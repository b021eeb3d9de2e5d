//! Complaint Hub client library.
//!
//! Talks to the Complaint Hub REST backend, keeps the signed-in session in a
//! local SQLite file and exposes the form controllers, route guard and list
//! views that the `complaint-hub` binary drives.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod forms;
pub mod guard;
pub mod http;
pub mod session;
pub mod state;
pub mod views;

use tracing_subscriber::{fmt, EnvFilter};

pub use config::ClientConfig;
pub use error::ClientError;
pub use http::{ApiClient, ApiResult, RequestOptions};
pub use session::{SessionSnapshot, SessionStore, StaffProbe};
pub use state::AppState;

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the
/// default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("complaint_client=info,complaint_store=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
