//! API endpoints.

mod admin;
mod reports;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/reports", reports::router())
        .nest("/admin", admin::router())
}
