//! Typed wrappers over [`ApiClient::request`] for each backend resource.
//!
//! Each sub-module adds an `impl ApiClient` block for one resource family,
//! so call sites read `api.create_complaint(..)`, `api.list_all_complaints(..)`
//! and so on. Every method returns an [`ApiResult`] and never fails on its own.
//!
//! [`ApiClient::request`]: crate::http::ApiClient::request
//! [`ApiResult`]: crate::http::ApiResult

pub mod admin;
pub mod auth;
pub mod complaints;
pub mod feedback;

pub use complaints::ListParams;
