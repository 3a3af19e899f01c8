//! Admin moderation and audit endpoints.

use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use chrono::{DateTime, Utc};
use givehub_common::{AppError, AppResult};
use givehub_core::{
    ActivityListQuery, ActivityStatistics, ApproveReportInput, ReportContext, ReportListQuery,
    ReportStatistics, StartReviewInput,
};
use givehub_db::entities::{
    activity_log::{self, ActionType},
    report::{ReportReason, ReportSeverity, ReportStatus},
    user::{self, UserRole},
};
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::reports::ReportResponse;
use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Create admin router.
pub fn router() -> Router<AppState> {
    Router::new()
        // Reports
        .route("/reports", get(list_reports))
        .route("/reports/statistics", get(report_statistics))
        .route("/reports/{id}", get(get_report))
        .route("/reports/{id}", delete(delete_report))
        .route("/reports/{id}/evidence", get(get_evidence))
        .route("/reports/{id}/review", post(start_review))
        .route("/reports/{id}/approve", post(approve_report))
        .route("/reports/{id}/reject", post(reject_report))
        // Activity logs
        .route("/activity-logs", get(list_activity_logs))
        .route("/activity-logs/statistics", get(activity_statistics))
        .route("/activity-logs/export", get(export_activity_logs))
}

const fn default_limit() -> u64 {
    50
}

/// Parse an enum-valued parameter, rejecting unknown values.
fn parse_enum_param<E>(value: Option<&String>, name: &str) -> AppResult<Option<E>>
where
    E: ActiveEnum<Value = String>,
{
    value
        .map(|raw| {
            E::try_from_value(raw)
                .map_err(|_| AppError::Validation(format!("Unknown {name}: {raw}")))
        })
        .transpose()
}

fn require_admin(user: &user::Model, action: &str) -> AppResult<()> {
    if user.role != UserRole::Admin {
        return Err(AppError::Forbidden(format!("Only admins can {action}")));
    }
    Ok(())
}

// ========== Report Types ==========

/// Activity log entry response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogResponse {
    pub id: String,
    pub actor_user_id: String,
    pub action_type: String,
    pub description: Option<String>,
    pub target_type: Option<String>,
    pub target_id: Option<String>,
    pub details: Option<serde_json::Value>,
    pub created_at: String,
}

impl From<activity_log::Model> for ActivityLogResponse {
    fn from(entry: activity_log::Model) -> Self {
        Self {
            id: entry.id,
            actor_user_id: entry.actor_user_id,
            action_type: entry.action_type.to_value(),
            description: entry.description,
            target_type: entry.target_type,
            target_id: entry.target_id,
            details: entry.details,
            created_at: entry.created_at.to_rfc3339(),
        }
    }
}

/// Report with moderation context response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportContextResponse {
    pub report: ReportResponse,
    pub reports_against_target: Vec<ReportResponse>,
    pub prior_suspensions: Vec<ActivityLogResponse>,
}

impl From<ReportContext> for ReportContextResponse {
    fn from(context: ReportContext) -> Self {
        Self {
            report: context.report.into(),
            reports_against_target: context
                .reports_against_target
                .into_iter()
                .map(Into::into)
                .collect(),
            prior_suspensions: context
                .prior_suspensions
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

/// Evidence URL response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceResponse {
    pub url: String,
}

/// Report statistics response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatisticsResponse {
    pub total: u64,
    pub by_status: StatusCountsResponse,
    pub by_reason: BTreeMap<String, u64>,
    pub recent: Vec<ReportResponse>,
}

/// Counts per report status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCountsResponse {
    pub pending: u64,
    pub under_review: u64,
    pub resolved: u64,
    pub dismissed: u64,
}

impl From<ReportStatistics> for ReportStatisticsResponse {
    fn from(stats: ReportStatistics) -> Self {
        Self {
            total: stats.total,
            by_status: StatusCountsResponse {
                pending: stats.by_status.pending,
                under_review: stats.by_status.under_review,
                resolved: stats.by_status.resolved,
                dismissed: stats.by_status.dismissed,
            },
            by_reason: stats.by_reason,
            recent: stats.recent.into_iter().map(Into::into).collect(),
        }
    }
}

/// List reports query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReportsQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

/// Start review request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartReviewRequest {
    #[serde(default)]
    pub severity: Option<String>,
}

/// Approve report request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveReportRequest {
    pub severity: String,
    #[serde(default)]
    pub penalty_days: Option<i32>,
    pub admin_notes: String,
}

/// Reject report request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectReportRequest {
    pub admin_notes: String,
}

// ========== Report Endpoints ==========

/// List reports (admin only).
async fn list_reports(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListReportsQuery>,
) -> AppResult<ApiResponse<Vec<ReportResponse>>> {
    require_admin(&user, "view reports")?;

    let status = parse_enum_param::<ReportStatus>(query.status.as_ref(), "status")?;
    let reason = parse_enum_param::<ReportReason>(query.reason.as_ref(), "reason")?;

    let reports = state
        .report_service
        .list(&ReportListQuery {
            status,
            entity_type: query.entity_type,
            reason,
            search: query.search,
            limit: query.limit.min(100),
            offset: query.offset,
        })
        .await?;

    Ok(ApiResponse::ok(
        reports.into_iter().map(Into::into).collect(),
    ))
}

/// Get a report with its moderation context (admin only).
async fn get_report(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<ReportContextResponse>> {
    require_admin(&user, "view reports")?;

    let context = state.report_service.get_with_context(&id).await?;

    Ok(ApiResponse::ok(context.into()))
}

/// Resolve a report's evidence file to a servable URL (admin only).
async fn get_evidence(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<EvidenceResponse>> {
    require_admin(&user, "view evidence")?;

    let report = state.report_service.get(&id).await?;
    let Some(path) = report.evidence_path else {
        return Err(AppError::NotFound(format!(
            "Report {id} has no evidence attached"
        )));
    };
    if !state.storage.exists(&path).await? {
        return Err(AppError::NotFound(format!(
            "Evidence file missing from storage: {path}"
        )));
    }

    Ok(ApiResponse::ok(EvidenceResponse {
        url: state.storage.public_url(&path),
    }))
}

/// Pick a pending report up for review (admin only).
async fn start_review(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StartReviewRequest>,
) -> AppResult<ApiResponse<ReportResponse>> {
    require_admin(&user, "review reports")?;

    let severity = parse_enum_param::<ReportSeverity>(req.severity.as_ref(), "severity")?;

    info!(admin_id = %user.id, report_id = %id, "Starting report review");

    let report = state
        .report_service
        .start_review(&user.id, &id, StartReviewInput { severity })
        .await?;

    Ok(ApiResponse::ok(report.into()))
}

/// Approve a report and suspend the accountable user (admin only).
async fn approve_report(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ApproveReportRequest>,
) -> AppResult<ApiResponse<ReportResponse>> {
    require_admin(&user, "decide reports")?;

    let severity = ReportSeverity::try_from_value(&req.severity)
        .map_err(|_| AppError::Validation(format!("Unknown severity: {}", req.severity)))?;

    info!(admin_id = %user.id, report_id = %id, "Approving report");

    let report = state
        .report_service
        .approve(
            &user.id,
            &id,
            ApproveReportInput {
                severity,
                penalty_days: req.penalty_days,
                admin_notes: req.admin_notes,
            },
        )
        .await?;

    Ok(ApiResponse::ok(report.into()))
}

/// Reject a report with no penalty (admin only).
async fn reject_report(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<RejectReportRequest>,
) -> AppResult<ApiResponse<ReportResponse>> {
    require_admin(&user, "decide reports")?;

    info!(admin_id = %user.id, report_id = %id, "Rejecting report");

    let report = state
        .report_service
        .reject(&user.id, &id, &req.admin_notes)
        .await?;

    Ok(ApiResponse::ok(report.into()))
}

/// Hard-delete a report (admin only).
async fn delete_report(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    require_admin(&user, "delete reports")?;

    info!(admin_id = %user.id, report_id = %id, "Deleting report");

    state.report_service.delete(&user.id, &id).await?;

    Ok(ApiResponse::ok(()))
}

/// Get report statistics (admin only).
async fn report_statistics(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<ReportStatisticsResponse>> {
    require_admin(&user, "view report statistics")?;

    let stats = state.report_service.statistics().await?;

    Ok(ApiResponse::ok(stats.into()))
}

// ========== Activity Log Types ==========

/// Activity log list response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogListResponse {
    pub logs: Vec<ActivityLogResponse>,
    pub total: u64,
}

/// Activity statistics response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStatisticsResponse {
    pub total: u64,
    pub donations: u64,
    pub campaigns: u64,
    pub registrations: u64,
}

impl From<ActivityStatistics> for ActivityStatisticsResponse {
    fn from(stats: ActivityStatistics) -> Self {
        Self {
            total: stats.total,
            donations: stats.donations,
            campaigns: stats.campaigns,
            registrations: stats.registrations,
        }
    }
}

/// List activity logs query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListActivityLogsQuery {
    #[serde(default)]
    pub action_type: Option<String>,
    #[serde(default)]
    pub target_type: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

impl ListActivityLogsQuery {
    fn into_list_query(self) -> AppResult<ActivityListQuery> {
        let action_type =
            parse_enum_param::<ActionType>(self.action_type.as_ref(), "action type")?;

        Ok(ActivityListQuery {
            action_type,
            target_type: self.target_type,
            start_date: self.start_date,
            end_date: self.end_date,
            search: self.search,
            limit: self.limit.min(100),
            offset: self.offset,
        })
    }
}

// ========== Activity Log Endpoints ==========

/// List activity log entries (admin only).
async fn list_activity_logs(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListActivityLogsQuery>,
) -> AppResult<ApiResponse<ActivityLogListResponse>> {
    require_admin(&user, "view activity logs")?;

    let query = query.into_list_query()?;
    let logs = state.activity_log_service.list(&query).await?;
    let total = state.activity_log_service.count(&query).await?;

    Ok(ApiResponse::ok(ActivityLogListResponse {
        logs: logs.into_iter().map(Into::into).collect(),
        total,
    }))
}

/// Get activity statistics (admin only).
async fn activity_statistics(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<ActivityStatisticsResponse>> {
    require_admin(&user, "view activity statistics")?;

    let stats = state.activity_log_service.statistics().await?;

    Ok(ApiResponse::ok(stats.into()))
}

/// Export activity log entries as CSV (admin only).
async fn export_activity_logs(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListActivityLogsQuery>,
) -> AppResult<Response> {
    require_admin(&user, "export activity logs")?;

    let query = query.into_list_query()?;
    let csv = state.activity_log_service.export_csv(&query).await?;

    info!(admin_id = %user.id, "Exported activity log CSV");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"activity_logs.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}
