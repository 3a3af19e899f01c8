//! API middleware.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use givehub_common::StorageBackend;
use givehub_core::{AccountService, ActivityLogService, ReportService};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService,
    pub activity_log_service: ActivityLogService,
    pub report_service: ReportService,
    pub storage: Arc<dyn StorageBackend>,
}

/// Authentication middleware.
///
/// Resolves a bearer token to its user and stashes the model in the request
/// extensions. Requests without a valid token pass through unauthenticated;
/// the [`crate::extractors::AuthUser`] extractor turns that into a 401 on
/// routes that require a user.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(user) = state.account_service.authenticate_by_token(token).await
    {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}
