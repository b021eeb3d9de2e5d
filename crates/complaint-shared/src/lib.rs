//! # complaint-shared
//!
//! Types and pure helpers shared by the Complaint Hub crates: the backend's
//! wire models, request payloads, storage keys and endpoint paths, and the
//! field validators every form runs before touching the network.

pub mod constants;
pub mod error;
pub mod timestamp;
pub mod types;
pub mod validation;

pub use error::SharedError;
pub use types::*;
