//! # complaint-store
//!
//! Durable client-side storage for Complaint Hub, backed by SQLite.
//!
//! The session only needs a handful of string keys, so the crate exposes a
//! small [`KeyValueStore`] trait. [`Database`] implements it on top of a
//! `rusqlite::Connection`; [`MemoryStore`] implements it in memory for tests
//! and ephemeral sessions.

pub mod database;
pub mod kv;
pub mod migrations;

mod error;

pub use database::Database;
pub use error::StoreError;
pub use kv::{KeyValueStore, MemoryStore};
