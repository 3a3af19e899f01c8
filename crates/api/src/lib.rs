//! HTTP API layer for givehub.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: report submission, admin moderation, activity log views
//! - **Extractors**: authentication
//! - **Middleware**: bearer-token authentication, application state
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
