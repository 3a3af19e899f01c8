//! Report moderation workflow.
//!
//! Reports move `pending -> under_review -> {resolved | dismissed}`, with a
//! direct decision from `pending` also allowed. Terminal states are sinks:
//! every transition re-checks the stored status, so a second admin deciding
//! the same report gets a conflict instead of silently overwriting the first
//! decision.

use std::collections::BTreeMap;

use chrono::Utc;
use givehub_common::{AppError, AppResult, IdGenerator};
use givehub_db::{
    entities::{
        EntityRef,
        activity_log::{self, ActionType},
        report::{self, ModerationAction, ReportReason, ReportSeverity, ReportStatus},
        user::{self, UserRole},
    },
    repositories::{EntityDirectory, ReportFilter, ReportRepository, UserRepository},
};
use sea_orm::{ActiveEnum, Iterable, Set};
use serde::Serialize;
use serde_json::json;

use super::account::AccountService;
use super::activity_log::{ActivityLogService, RecordActivityInput};

/// How many related rows the moderation context view carries.
const CONTEXT_LIMIT: u64 = 20;
/// How many reports the statistics endpoint lists as recent.
const RECENT_LIMIT: u64 = 5;

/// A new report, as filed by a platform user.
#[derive(Debug, Clone)]
pub struct SubmitReportInput {
    pub entity_type: String,
    pub entity_id: String,
    pub reason: ReportReason,
    pub description: String,
    pub evidence_path: Option<String>,
}

/// Optional initial assessment when an admin picks a report up.
#[derive(Debug, Clone, Default)]
pub struct StartReviewInput {
    pub severity: Option<ReportSeverity>,
}

/// An admin's approval decision.
#[derive(Debug, Clone)]
pub struct ApproveReportInput {
    pub severity: ReportSeverity,
    /// Overrides the severity's suggested suspension length.
    pub penalty_days: Option<i32>,
    pub admin_notes: String,
}

/// Parsed listing query.
#[derive(Debug, Clone, Default)]
pub struct ReportListQuery {
    pub status: Option<ReportStatus>,
    pub entity_type: Option<String>,
    pub reason: Option<ReportReason>,
    pub search: Option<String>,
    pub limit: u64,
    pub offset: u64,
}

/// A report together with the moderation history around its target.
#[derive(Debug, Clone, Serialize)]
pub struct ReportContext {
    pub report: report::Model,
    /// Other reports filed against the same entity.
    pub reports_against_target: Vec<report::Model>,
    /// Prior suspensions recorded against the accountable user.
    pub prior_suspensions: Vec<activity_log::Model>,
}

/// Counts per lifecycle status.
#[derive(Debug, Clone, Serialize)]
pub struct StatusCounts {
    pub pending: u64,
    pub under_review: u64,
    pub resolved: u64,
    pub dismissed: u64,
}

/// Aggregate counts for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ReportStatistics {
    pub total: u64,
    pub by_status: StatusCounts,
    pub by_reason: BTreeMap<String, u64>,
    pub recent: Vec<report::Model>,
}

/// Report moderation service.
#[derive(Clone)]
pub struct ReportService {
    report_repo: ReportRepository,
    user_repo: UserRepository,
    directory: EntityDirectory,
    accounts: AccountService,
    activity: ActivityLogService,
    id_gen: IdGenerator,
}

impl ReportService {
    /// Create a new report service.
    #[must_use]
    pub const fn new(
        report_repo: ReportRepository,
        user_repo: UserRepository,
        directory: EntityDirectory,
        accounts: AccountService,
        activity: ActivityLogService,
    ) -> Self {
        Self {
            report_repo,
            user_repo,
            directory,
            accounts,
            activity,
            id_gen: IdGenerator::new(),
        }
    }

    /// File a report against a platform entity.
    ///
    /// The accountable user is resolved and snapshotted at submission time,
    /// together with the reporter's role. Reporting an entity you are
    /// yourself accountable for is rejected.
    pub async fn submit(
        &self,
        reporter: &user::Model,
        input: SubmitReportInput,
    ) -> AppResult<report::Model> {
        let description = input.description.trim().to_string();
        if description.is_empty() {
            return Err(AppError::Validation("Description is required".to_string()));
        }
        if description.chars().count() > 2000 {
            return Err(AppError::Validation(
                "Description must be at most 2000 characters".to_string(),
            ));
        }

        let Some(entity) = EntityRef::from_parts(&input.entity_type, input.entity_id.clone())
        else {
            return Err(AppError::Validation(format!(
                "Unknown entity type: {}",
                input.entity_type
            )));
        };

        let resolved = self
            .directory
            .resolve(&entity)
            .await?
            .ok_or_else(|| AppError::NotFound(entity.to_string()))?;

        if resolved.accountable_user_id == reporter.id {
            return Err(AppError::BadRequest(
                "You cannot report your own account or content".to_string(),
            ));
        }

        let model = report::ActiveModel {
            id: Set(self.id_gen.generate()),
            reporter_user_id: Set(reporter.id.clone()),
            reporter_role: Set(reporter.role),
            reported_entity_type: Set(entity.kind().to_string()),
            reported_entity_id: Set(entity.id().to_string()),
            reported_user_id: Set(resolved.accountable_user_id),
            reason: Set(input.reason),
            description: Set(description),
            evidence_path: Set(input.evidence_path),
            severity: Set(ReportSeverity::Pending),
            status: Set(ReportStatus::Pending),
            penalty_days: Set(None),
            admin_notes: Set(None),
            reviewed_by: Set(None),
            reviewed_at: Set(None),
            action_taken: Set(None),
            created_at: Set(Utc::now().into()),
        };
        let report = self.report_repo.create(model).await?;

        let kind = entity.kind();
        let _ = self
            .activity
            .record(
                Some(&reporter.id),
                ActionType::ReportSubmitted,
                RecordActivityInput {
                    description: Some(format!(
                        "{} reported {} '{}'",
                        reporter.username, kind, resolved.label
                    )),
                    target: Some(entity),
                    details: Some(json!({
                        "report_id": report.id,
                        "reason": input.reason.to_value(),
                    })),
                },
            )
            .await;

        Ok(report)
    }

    /// Pick a pending report up for review.
    ///
    /// Only `pending` reports can enter review; anything else conflicts.
    /// An initial severity assessment may be recorded, but the review
    /// stamp (`reviewed_by`/`reviewed_at`) is reserved for the decision.
    pub async fn start_review(
        &self,
        admin_id: &str,
        report_id: &str,
        input: StartReviewInput,
    ) -> AppResult<report::Model> {
        self.verify_admin(admin_id).await?;
        let report = self.report_repo.get_by_id(report_id).await?;

        if report.status != ReportStatus::Pending {
            return Err(AppError::Conflict(format!(
                "Report {} is already {}",
                report.id,
                report.status.to_value()
            )));
        }

        if input.severity == Some(ReportSeverity::Pending) {
            return Err(AppError::Validation(
                "Severity must be an assessed level".to_string(),
            ));
        }

        let mut model: report::ActiveModel = report.into();
        model.status = Set(ReportStatus::UnderReview);
        if let Some(severity) = input.severity {
            model.severity = Set(severity);
        }

        self.report_repo.update(model).await
    }

    /// Approve a report: resolve it and suspend the accountable user.
    ///
    /// The suspension length is the admin's `penalty_days` if given, else
    /// the severity's suggestion; either way it must be 1..=90. The report
    /// update lands first, then the suspension (a suspension failure
    /// surfaces loudly), then a best-effort `account_suspended` entry.
    pub async fn approve(
        &self,
        admin_id: &str,
        report_id: &str,
        input: ApproveReportInput,
    ) -> AppResult<report::Model> {
        let admin = self.verify_admin(admin_id).await?;
        let report = self.report_repo.get_by_id(report_id).await?;
        Self::ensure_undecided(&report)?;

        if input.severity == ReportSeverity::Pending {
            return Err(AppError::Validation(
                "Severity must be an assessed level".to_string(),
            ));
        }

        let notes = input.admin_notes.trim();
        if notes.is_empty() {
            return Err(AppError::Validation("Admin notes are required".to_string()));
        }

        let days = effective_penalty_days(input.severity, input.penalty_days)?;

        let Some(entity) = report.reported_entity() else {
            return Err(AppError::Internal(format!(
                "report {} references unknown entity kind {}",
                report.id, report.reported_entity_type
            )));
        };
        let resolved = self
            .directory
            .resolve(&entity)
            .await?
            .ok_or_else(|| AppError::NotFound(entity.to_string()))?;

        let reviewed_at = Utc::now();
        let logged_report_id = report.id.clone();

        let mut model: report::ActiveModel = report.into();
        model.status = Set(ReportStatus::Resolved);
        model.severity = Set(input.severity);
        model.penalty_days = Set(Some(days));
        model.admin_notes = Set(Some(notes.to_string()));
        model.reviewed_by = Set(Some(admin.id));
        model.reviewed_at = Set(Some(reviewed_at.into()));
        model.action_taken = Set(Some(ModerationAction::Suspended));
        let updated = self.report_repo.update(model).await?;

        self.accounts
            .suspend(&resolved.accountable_user_id, days, reviewed_at)
            .await?;

        let _ = self
            .activity
            .record(
                Some(admin_id),
                ActionType::AccountSuspended,
                RecordActivityInput {
                    description: Some(format!(
                        "Suspended account {} for {} days over report {}",
                        resolved.accountable_user_id, days, logged_report_id
                    )),
                    target: Some(EntityRef::User(resolved.accountable_user_id)),
                    details: Some(json!({
                        "report_id": logged_report_id,
                        "penalty_days": days,
                        "reported_entity_type": entity.kind(),
                        "reported_entity_id": entity.id(),
                    })),
                },
            )
            .await;

        Ok(updated)
    }

    /// Reject a report: dismiss it with no penalty.
    ///
    /// Dismissal notes must carry substance (at least 10 characters), since
    /// they are the only record of why no action was taken.
    pub async fn reject(
        &self,
        admin_id: &str,
        report_id: &str,
        admin_notes: &str,
    ) -> AppResult<report::Model> {
        let admin = self.verify_admin(admin_id).await?;
        let report = self.report_repo.get_by_id(report_id).await?;
        Self::ensure_undecided(&report)?;

        let notes = admin_notes.trim();
        if notes.chars().count() < 10 {
            return Err(AppError::Validation(
                "Rejection notes must be at least 10 characters".to_string(),
            ));
        }

        let target = report.reported_entity();
        let logged_report_id = report.id.clone();

        let mut model: report::ActiveModel = report.into();
        model.status = Set(ReportStatus::Dismissed);
        model.admin_notes = Set(Some(notes.to_string()));
        model.reviewed_by = Set(Some(admin.id));
        model.reviewed_at = Set(Some(Utc::now().into()));
        model.action_taken = Set(Some(ModerationAction::Dismissed));
        let updated = self.report_repo.update(model).await?;

        let _ = self
            .activity
            .record(
                Some(admin_id),
                ActionType::ReportReviewed,
                RecordActivityInput {
                    description: Some(format!("Dismissed report {logged_report_id}")),
                    target,
                    details: Some(json!({
                        "report_id": logged_report_id,
                        "outcome": "dismissed",
                    })),
                },
            )
            .await;

        Ok(updated)
    }

    /// Hard-delete a report in any state.
    pub async fn delete(&self, admin_id: &str, report_id: &str) -> AppResult<()> {
        self.verify_admin(admin_id).await?;
        let report = self.report_repo.get_by_id(report_id).await?;
        self.report_repo.delete(report_id).await?;

        let _ = self
            .activity
            .record(
                Some(admin_id),
                ActionType::ReportDeleted,
                RecordActivityInput {
                    description: Some(format!(
                        "Deleted report {} against {} {}",
                        report.id, report.reported_entity_type, report.reported_entity_id
                    )),
                    target: report.reported_entity(),
                    details: Some(json!({
                        "report_id": report.id,
                        "status_at_deletion": report.status.to_value(),
                    })),
                },
            )
            .await;

        Ok(())
    }

    /// Fetch one report.
    pub async fn get(&self, report_id: &str) -> AppResult<report::Model> {
        self.report_repo.get_by_id(report_id).await
    }

    /// Fetch one report with its moderation context.
    pub async fn get_with_context(&self, report_id: &str) -> AppResult<ReportContext> {
        let report = self.report_repo.get_by_id(report_id).await?;

        let reports_against_target = match report.reported_entity() {
            Some(entity) => {
                self.report_repo
                    .list_for_target(&entity, &report.id, CONTEXT_LIMIT)
                    .await?
            }
            None => Vec::new(),
        };
        let prior_suspensions = self
            .activity
            .suspension_history(&report.reported_user_id, CONTEXT_LIMIT)
            .await?;

        Ok(ReportContext {
            report,
            reports_against_target,
            prior_suspensions,
        })
    }

    /// List reports matching `query`, newest first.
    pub async fn list(&self, query: &ReportListQuery) -> AppResult<Vec<report::Model>> {
        let filter = self.filter_for(query).await?;
        self.report_repo
            .list(&filter, query.limit, query.offset)
            .await
    }

    /// Aggregate counts per status and reason, plus the latest submissions.
    pub async fn statistics(&self) -> AppResult<ReportStatistics> {
        let total = self.report_repo.count_all().await?;

        let by_status = StatusCounts {
            pending: self.report_repo.count_by_status(ReportStatus::Pending).await?,
            under_review: self
                .report_repo
                .count_by_status(ReportStatus::UnderReview)
                .await?,
            resolved: self
                .report_repo
                .count_by_status(ReportStatus::Resolved)
                .await?,
            dismissed: self
                .report_repo
                .count_by_status(ReportStatus::Dismissed)
                .await?,
        };

        let mut by_reason = BTreeMap::new();
        for reason in ReportReason::iter() {
            let count = self.report_repo.count_by_reason(reason).await?;
            by_reason.insert(reason.to_value(), count);
        }

        let recent = self.report_repo.recent(RECENT_LIMIT).await?;

        Ok(ReportStatistics {
            total,
            by_status,
            by_reason,
            recent,
        })
    }

    async fn verify_admin(&self, admin_id: &str) -> AppResult<user::Model> {
        let admin = self.user_repo.get_by_id(admin_id).await?;
        if admin.role != UserRole::Admin {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }
        Ok(admin)
    }

    fn ensure_undecided(report: &report::Model) -> AppResult<()> {
        if report.status.is_terminal() {
            return Err(AppError::Conflict(format!(
                "Report {} has already been {}",
                report.id,
                report.status.to_value()
            )));
        }
        Ok(())
    }

    async fn filter_for(&self, query: &ReportListQuery) -> AppResult<ReportFilter> {
        if let Some(kind) = &query.entity_type
            && !EntityRef::is_valid_kind(kind)
        {
            return Err(AppError::Validation(format!("Unknown entity type: {kind}")));
        }

        let search = match &query.search {
            Some(term) if !term.trim().is_empty() => {
                let term = term.trim().to_string();
                let matching_actor_ids = self.user_repo.search_ids_by_username(&term).await?;
                Some(givehub_db::repositories::SearchFilter {
                    term,
                    matching_actor_ids,
                })
            }
            _ => None,
        };

        Ok(ReportFilter {
            status: query.status,
            entity_type: query.entity_type.clone(),
            reason: query.reason,
            search,
        })
    }
}

/// The suspension length an approval resolves to.
fn effective_penalty_days(
    severity: ReportSeverity,
    requested: Option<i32>,
) -> AppResult<i32> {
    let Some(days) = requested.or_else(|| severity.suggested_penalty_days()) else {
        return Err(AppError::Validation(
            "A penalty length is required".to_string(),
        ));
    };
    if !(1..=90).contains(&days) {
        return Err(AppError::Validation(
            "Penalty days must be between 1 and 90".to_string(),
        ));
    }
    Ok(days)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use givehub_db::repositories::ActivityLogRepository;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn test_user(id: &str, role: UserRole) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: format!("{id}-name"),
            name: None,
            role,
            token: Some(format!("token-{id}")),
            is_suspended: false,
            suspended_until: None,
            created_at: Utc::now().into(),
        }
    }

    fn test_report(id: &str, status: ReportStatus) -> report::Model {
        report::Model {
            id: id.to_string(),
            reporter_user_id: "reporter1".to_string(),
            reporter_role: UserRole::Donor,
            reported_entity_type: "user".to_string(),
            reported_entity_id: "user9".to_string(),
            reported_user_id: "user9".to_string(),
            reason: ReportReason::Fraud,
            description: "Collected donations for a campaign that does not exist".to_string(),
            evidence_path: None,
            severity: ReportSeverity::Pending,
            status,
            penalty_days: None,
            admin_notes: None,
            reviewed_by: None,
            reviewed_at: None,
            action_taken: None,
            created_at: Utc::now().into(),
        }
    }

    fn test_log_entry(id: &str, action: ActionType) -> activity_log::Model {
        activity_log::Model {
            id: id.to_string(),
            actor_user_id: "admin1".to_string(),
            action_type: action,
            description: None,
            target_type: Some("user".to_string()),
            target_id: Some("user9".to_string()),
            details: None,
            created_at: Utc::now().into(),
        }
    }

    fn service(mock: MockDatabase) -> ReportService {
        let conn = Arc::new(mock.into_connection());
        ReportService::new(
            ReportRepository::new(conn.clone()),
            UserRepository::new(conn.clone()),
            EntityDirectory::new(conn.clone()),
            AccountService::new(UserRepository::new(conn.clone())),
            ActivityLogService::new(
                ActivityLogRepository::new(conn.clone()),
                UserRepository::new(conn),
            ),
        )
    }

    fn submit_input() -> SubmitReportInput {
        SubmitReportInput {
            entity_type: "user".to_string(),
            entity_id: "user9".to_string(),
            reason: ReportReason::Fraud,
            description: "Collected donations for a campaign that does not exist".to_string(),
            evidence_path: None,
        }
    }

    #[tokio::test]
    async fn test_submit_creates_pending_report() {
        let mock = MockDatabase::new(DatabaseBackend::Postgres)
            // Directory resolve.
            .append_query_results([[test_user("user9", UserRole::Donor)]])
            // Report insert.
            .append_query_results([[test_report("report1", ReportStatus::Pending)]])
            // Activity entry insert.
            .append_query_results([[test_log_entry("log1", ActionType::ReportSubmitted)]]);
        let svc = service(mock);

        let reporter = test_user("reporter1", UserRole::Donor);
        let report = svc.submit(&reporter, submit_input()).await.unwrap();

        assert_eq!(report.status, ReportStatus::Pending);
        assert_eq!(report.severity, ReportSeverity::Pending);
        assert_eq!(report.reported_user_id, "user9");
    }

    #[tokio::test]
    async fn test_submit_survives_recording_failure() {
        // No activity insert mocked: the entry fails, the report still lands.
        let mock = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_user("user9", UserRole::Donor)]])
            .append_query_results([[test_report("report1", ReportStatus::Pending)]]);
        let svc = service(mock);

        let reporter = test_user("reporter1", UserRole::Donor);
        let report = svc.submit(&reporter, submit_input()).await.unwrap();

        assert_eq!(report.id, "report1");
    }

    #[tokio::test]
    async fn test_submit_rejects_self_report() {
        let mock = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_user("user9", UserRole::Donor)]]);
        let svc = service(mock);

        let reporter = test_user("user9", UserRole::Donor);
        let result = svc.submit(&reporter, submit_input()).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_submit_rejects_unknown_entity_kind() {
        let svc = service(MockDatabase::new(DatabaseBackend::Postgres));

        let reporter = test_user("reporter1", UserRole::Donor);
        let input = SubmitReportInput {
            entity_type: "invoice".to_string(),
            ..submit_input()
        };
        let result = svc.submit(&reporter, input).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_submit_rejects_missing_entity() {
        let mock = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()]);
        let svc = service(mock);

        let reporter = test_user("reporter1", UserRole::Donor);
        let result = svc.submit(&reporter, submit_input()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_submit_rejects_overlong_description() {
        let svc = service(MockDatabase::new(DatabaseBackend::Postgres));

        let reporter = test_user("reporter1", UserRole::Donor);
        let input = SubmitReportInput {
            description: "x".repeat(2001),
            ..submit_input()
        };
        let result = svc.submit(&reporter, input).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_start_review_moves_pending_to_under_review() {
        let mut reviewed = test_report("report1", ReportStatus::UnderReview);
        reviewed.severity = ReportSeverity::High;

        let mock = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_user("admin1", UserRole::Admin)]])
            .append_query_results([[test_report("report1", ReportStatus::Pending)]])
            .append_query_results([[reviewed]]);
        let svc = service(mock);

        let report = svc
            .start_review(
                "admin1",
                "report1",
                StartReviewInput {
                    severity: Some(ReportSeverity::High),
                },
            )
            .await
            .unwrap();

        assert_eq!(report.status, ReportStatus::UnderReview);
        assert!(report.reviewed_by.is_none());
        assert!(report.reviewed_at.is_none());
    }

    #[tokio::test]
    async fn test_start_review_conflicts_when_not_pending() {
        let mock = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_user("admin1", UserRole::Admin)]])
            .append_query_results([[test_report("report1", ReportStatus::UnderReview)]]);
        let svc = service(mock);

        let result = svc
            .start_review("admin1", "report1", StartReviewInput::default())
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_start_review_rejects_unassessed_severity() {
        let mock = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_user("admin1", UserRole::Admin)]])
            .append_query_results([[test_report("report1", ReportStatus::Pending)]]);
        let svc = service(mock);

        let result = svc
            .start_review(
                "admin1",
                "report1",
                StartReviewInput {
                    severity: Some(ReportSeverity::Pending),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_start_review_requires_admin() {
        let mock = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_user("donor1", UserRole::Donor)]]);
        let svc = service(mock);

        let result = svc
            .start_review("donor1", "report1", StartReviewInput::default())
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_approve_resolves_report_and_suspends() {
        let mut resolved = test_report("report1", ReportStatus::Resolved);
        resolved.severity = ReportSeverity::High;
        resolved.penalty_days = Some(15);
        resolved.action_taken = Some(ModerationAction::Suspended);

        let mut suspended = test_user("user9", UserRole::Donor);
        suspended.is_suspended = true;

        let mock = MockDatabase::new(DatabaseBackend::Postgres)
            // Admin re-verification.
            .append_query_results([[test_user("admin1", UserRole::Admin)]])
            // Report fetch.
            .append_query_results([[test_report("report1", ReportStatus::UnderReview)]])
            // Directory resolve of the reported user.
            .append_query_results([[test_user("user9", UserRole::Donor)]])
            // Report update.
            .append_query_results([[resolved]])
            // Suspension: user fetch, then user update.
            .append_query_results([[test_user("user9", UserRole::Donor)]])
            .append_query_results([[suspended]])
            // Activity entry insert.
            .append_query_results([[test_log_entry("log1", ActionType::AccountSuspended)]]);
        let svc = service(mock);

        let report = svc
            .approve(
                "admin1",
                "report1",
                ApproveReportInput {
                    severity: ReportSeverity::High,
                    penalty_days: None,
                    admin_notes: "Verified against the campaign ledger".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(report.status, ReportStatus::Resolved);
        assert_eq!(report.penalty_days, Some(15));
        assert_eq!(report.action_taken, Some(ModerationAction::Suspended));
    }

    #[tokio::test]
    async fn test_approve_conflicts_on_decided_report() {
        let mock = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_user("admin1", UserRole::Admin)]])
            .append_query_results([[test_report("report1", ReportStatus::Dismissed)]]);
        let svc = service(mock);

        let result = svc
            .approve(
                "admin1",
                "report1",
                ApproveReportInput {
                    severity: ReportSeverity::Low,
                    penalty_days: None,
                    admin_notes: "Second decision must not overwrite the first".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_approve_rejects_out_of_bounds_penalty() {
        // Validation fires before any mutation: no update is mocked.
        let mock = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_user("admin1", UserRole::Admin)]])
            .append_query_results([[test_report("report1", ReportStatus::Pending)]]);
        let svc = service(mock);

        let result = svc
            .approve(
                "admin1",
                "report1",
                ApproveReportInput {
                    severity: ReportSeverity::Low,
                    penalty_days: Some(120),
                    admin_notes: "Way too long".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_approve_rejects_unassessed_severity() {
        let mock = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_user("admin1", UserRole::Admin)]])
            .append_query_results([[test_report("report1", ReportStatus::Pending)]]);
        let svc = service(mock);

        let result = svc
            .approve(
                "admin1",
                "report1",
                ApproveReportInput {
                    severity: ReportSeverity::Pending,
                    penalty_days: Some(7),
                    admin_notes: "No assessment given".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_approve_refuses_admin_target() {
        let mut resolved = test_report("report1", ReportStatus::Resolved);
        resolved.severity = ReportSeverity::High;

        let mock = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_user("admin1", UserRole::Admin)]])
            .append_query_results([[test_report("report1", ReportStatus::Pending)]])
            // The reported user turns out to be an admin.
            .append_query_results([[test_user("user9", UserRole::Admin)]])
            .append_query_results([[resolved]])
            .append_query_results([[test_user("user9", UserRole::Admin)]]);
        let svc = service(mock);

        let result = svc
            .approve(
                "admin1",
                "report1",
                ApproveReportInput {
                    severity: ReportSeverity::High,
                    penalty_days: None,
                    admin_notes: "Escalating against an admin account".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_reject_dismisses_without_suspension() {
        let mut dismissed = test_report("report1", ReportStatus::Dismissed);
        dismissed.action_taken = Some(ModerationAction::Dismissed);

        // Only the report update and the log entry are mocked: a suspension
        // would consume extra results and fail the test.
        let mock = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_user("admin1", UserRole::Admin)]])
            .append_query_results([[test_report("report1", ReportStatus::UnderReview)]])
            .append_query_results([[dismissed]])
            .append_query_results([[test_log_entry("log1", ActionType::ReportReviewed)]]);
        let svc = service(mock);

        let report = svc
            .reject("admin1", "report1", "No evidence of wrongdoing found")
            .await
            .unwrap();

        assert_eq!(report.status, ReportStatus::Dismissed);
        assert_eq!(report.penalty_days, None);
        assert_eq!(report.action_taken, Some(ModerationAction::Dismissed));
    }

    #[tokio::test]
    async fn test_reject_directly_from_pending() {
        let mut dismissed = test_report("report1", ReportStatus::Dismissed);
        dismissed.action_taken = Some(ModerationAction::Dismissed);

        let mock = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_user("admin1", UserRole::Admin)]])
            .append_query_results([[test_report("report1", ReportStatus::Pending)]])
            .append_query_results([[dismissed]])
            .append_query_results([[test_log_entry("log1", ActionType::ReportReviewed)]]);
        let svc = service(mock);

        let report = svc
            .reject("admin1", "report1", "Duplicate of an already decided report")
            .await
            .unwrap();

        assert_eq!(report.status, ReportStatus::Dismissed);
    }

    #[tokio::test]
    async fn test_reject_requires_substantive_notes() {
        let mock = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_user("admin1", UserRole::Admin)]])
            .append_query_results([[test_report("report1", ReportStatus::Pending)]]);
        let svc = service(mock);

        let result = svc.reject("admin1", "report1", "too short").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_report_in_any_state() {
        let mock = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_user("admin1", UserRole::Admin)]])
            .append_query_results([[test_report("report1", ReportStatus::Resolved)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([[test_log_entry("log1", ActionType::ReportDeleted)]]);
        let svc = service(mock);

        let result = svc.delete("admin1", "report1").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_get_with_context_collects_history() {
        let mock = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_report("report1", ReportStatus::Pending)]])
            .append_query_results([[
                test_report("report2", ReportStatus::Resolved),
                test_report("report3", ReportStatus::Dismissed),
            ]])
            .append_query_results([[test_log_entry("log1", ActionType::AccountSuspended)]]);
        let svc = service(mock);

        let context = svc.get_with_context("report1").await.unwrap();

        assert_eq!(context.report.id, "report1");
        assert_eq!(context.reports_against_target.len(), 2);
        assert_eq!(context.prior_suspensions.len(), 1);
    }

    #[tokio::test]
    async fn test_list_rejects_unknown_entity_type() {
        let svc = service(MockDatabase::new(DatabaseBackend::Postgres));

        let query = ReportListQuery {
            entity_type: Some("invoice".to_string()),
            limit: 50,
            ..ReportListQuery::default()
        };
        let result = svc.list(&query).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_statistics_status_counts_add_up() {
        let count = |n: i64| {
            [maplit::btreemap! {
                "num_items" => sea_orm::Value::BigInt(Some(n))
            }]
        };
        let mut mock = MockDatabase::new(DatabaseBackend::Postgres)
            // Total, then the four status buckets.
            .append_query_results([count(10)])
            .append_query_results([count(4)])
            .append_query_results([count(3)])
            .append_query_results([count(2)])
            .append_query_results([count(1)]);
        // One count per reason.
        for _ in ReportReason::iter() {
            mock = mock.append_query_results([count(0)]);
        }
        let mock =
            mock.append_query_results([[test_report("report1", ReportStatus::Pending)]]);
        let svc = service(mock);

        let stats = svc.statistics().await.unwrap();

        assert_eq!(stats.total, 10);
        let by_status = &stats.by_status;
        assert_eq!(
            by_status.pending + by_status.under_review + by_status.resolved + by_status.dismissed,
            stats.total
        );
        assert_eq!(stats.by_reason.len(), 9);
        assert_eq!(stats.recent.len(), 1);
    }

    #[test]
    fn test_effective_penalty_defaults_from_severity() {
        assert_eq!(
            effective_penalty_days(ReportSeverity::Medium, None).unwrap(),
            7
        );
        assert_eq!(
            effective_penalty_days(ReportSeverity::Critical, None).unwrap(),
            30
        );
        assert_eq!(
            effective_penalty_days(ReportSeverity::Low, Some(45)).unwrap(),
            45
        );
    }

    #[test]
    fn test_effective_penalty_enforces_bounds() {
        assert!(effective_penalty_days(ReportSeverity::Low, Some(0)).is_err());
        assert!(effective_penalty_days(ReportSeverity::Low, Some(91)).is_err());
        assert!(effective_penalty_days(ReportSeverity::Pending, None).is_err());
    }
}
