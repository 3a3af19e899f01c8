//! Report submission endpoints.

use axum::{Json, Router, extract::State, routing::post};
use givehub_common::{AppError, AppResult};
use givehub_core::SubmitReportInput;
use givehub_db::entities::report;
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Create report submission router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(submit_report))
}

/// Report response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: String,
    pub reporter_user_id: String,
    pub reporter_role: String,
    pub reported_entity_type: String,
    pub reported_entity_id: String,
    pub reported_user_id: String,
    pub reason: String,
    pub description: String,
    pub evidence_path: Option<String>,
    pub severity: String,
    pub status: String,
    pub penalty_days: Option<i32>,
    pub admin_notes: Option<String>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<String>,
    pub action_taken: Option<String>,
    pub created_at: String,
}

impl From<report::Model> for ReportResponse {
    fn from(report: report::Model) -> Self {
        Self {
            id: report.id,
            reporter_user_id: report.reporter_user_id,
            reporter_role: report.reporter_role.to_value(),
            reported_entity_type: report.reported_entity_type,
            reported_entity_id: report.reported_entity_id,
            reported_user_id: report.reported_user_id,
            reason: report.reason.to_value(),
            description: report.description,
            evidence_path: report.evidence_path,
            severity: report.severity.to_value(),
            status: report.status.to_value(),
            penalty_days: report.penalty_days,
            admin_notes: report.admin_notes,
            reviewed_by: report.reviewed_by,
            reviewed_at: report.reviewed_at.map(|t| t.to_rfc3339()),
            action_taken: report.action_taken.map(sea_orm::ActiveEnum::to_value),
            created_at: report.created_at.to_rfc3339(),
        }
    }
}

/// Submit report request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportRequest {
    pub entity_type: String,
    pub entity_id: String,
    pub reason: String,

    #[validate(length(min = 1, max = 2000))]
    pub description: String,

    pub evidence_path: Option<String>,
}

/// File a report against a platform entity.
async fn submit_report(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<SubmitReportRequest>,
) -> AppResult<ApiResponse<ReportResponse>> {
    req.validate()?;

    let reason = report::ReportReason::try_from_value(&req.reason)
        .map_err(|_| AppError::Validation(format!("Unknown reason: {}", req.reason)))?;

    let report = state
        .report_service
        .submit(
            &user,
            SubmitReportInput {
                entity_type: req.entity_type,
                entity_id: req.entity_id,
                reason,
                description: req.description,
                evidence_path: req.evidence_path,
            },
        )
        .await?;

    Ok(ApiResponse::ok(report.into()))
}
