//! Activity log recorder and query service.
//!
//! `record` is the single write path for the audit trail. It is best-effort
//! by contract: failures go to the log at warn level and come back as an
//! error the call site discards, so the surrounding business operation never
//! fails because of it.

use chrono::{DateTime, Utc};
use givehub_common::{AppError, AppResult, IdGenerator};
use givehub_db::{
    entities::{
        EntityRef, activity_log,
        activity_log::{ActionCategory, ActionType},
    },
    repositories::{ActivityLogFilter, ActivityLogRepository, SearchFilter, UserRepository},
};
use sea_orm::{ActiveEnum, Set};
use serde::Serialize;

/// Context attached to a recorded action.
#[derive(Debug, Clone, Default)]
pub struct RecordActivityInput {
    /// Human-readable summary.
    pub description: Option<String>,
    /// Entity the action touched.
    pub target: Option<EntityRef>,
    /// Structured context stored as JSONB.
    pub details: Option<serde_json::Value>,
}

/// Parsed listing/export query.
#[derive(Debug, Clone, Default)]
pub struct ActivityListQuery {
    pub action_type: Option<ActionType>,
    pub target_type: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub search: Option<String>,
    pub limit: u64,
    pub offset: u64,
}

/// Aggregate counts for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityStatistics {
    pub total: u64,
    pub donations: u64,
    pub campaigns: u64,
    pub registrations: u64,
}

/// Activity log service.
#[derive(Clone)]
pub struct ActivityLogService {
    log_repo: ActivityLogRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl ActivityLogService {
    /// Create a new activity log service.
    #[must_use]
    pub const fn new(log_repo: ActivityLogRepository, user_repo: UserRepository) -> Self {
        Self {
            log_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Append one entry to the audit trail.
    ///
    /// With no actor this is a no-op returning `Ok(None)`: anonymous
    /// traffic is simply not audited. A persistence failure is reported at
    /// warn level here and returned; business call sites discard the result
    /// (`let _ =`) so the primary operation is never rolled back over it.
    pub async fn record(
        &self,
        actor_user_id: Option<&str>,
        action: ActionType,
        input: RecordActivityInput,
    ) -> AppResult<Option<activity_log::Model>> {
        let Some(actor_id) = actor_user_id else {
            tracing::debug!(action = %action.to_value(), "no authenticated actor, skipping entry");
            return Ok(None);
        };

        let (target_type, target_id) = match &input.target {
            Some(target) => (
                Some(target.kind().to_string()),
                Some(target.id().to_string()),
            ),
            None => (None, None),
        };

        let model = activity_log::ActiveModel {
            id: Set(self.id_gen.generate()),
            actor_user_id: Set(actor_id.to_string()),
            action_type: Set(action),
            description: Set(input.description),
            target_type: Set(target_type),
            target_id: Set(target_id),
            details: Set(input.details),
            created_at: Set(Utc::now().into()),
        };

        match self.log_repo.insert(model).await {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                tracing::warn!(
                    action = %action.to_value(),
                    actor = %actor_id,
                    error = %e,
                    "failed to record activity entry"
                );
                Err(e)
            }
        }
    }

    /// List entries matching `query`, newest first.
    pub async fn list(&self, query: &ActivityListQuery) -> AppResult<Vec<activity_log::Model>> {
        let filter = self.filter_for(query).await?;
        self.log_repo.list(&filter, query.limit, query.offset).await
    }

    /// Count entries matching `query`.
    pub async fn count(&self, query: &ActivityListQuery) -> AppResult<u64> {
        let filter = self.filter_for(query).await?;
        self.log_repo.count(&filter).await
    }

    /// Aggregate counts per dashboard bucket.
    ///
    /// Buckets come from the explicit action/category mapping, so an action
    /// is counted by what it is declared to be, never by its spelling.
    pub async fn statistics(&self) -> AppResult<ActivityStatistics> {
        let total = self.log_repo.count_all().await?;
        let donations = self
            .log_repo
            .count_by_action_types(&ActionType::in_category(ActionCategory::Donation))
            .await?;
        let campaigns = self
            .log_repo
            .count_by_action_types(&ActionType::in_category(ActionCategory::Campaign))
            .await?;
        let registrations = self
            .log_repo
            .count_by_action_types(&ActionType::in_category(ActionCategory::Registration))
            .await?;

        Ok(ActivityStatistics {
            total,
            donations,
            campaigns,
            registrations,
        })
    }

    /// Export entries matching `query` as CSV, oldest first.
    ///
    /// CSV format: id,created_at,actor_user_id,action_type,target_type,target_id,description
    pub async fn export_csv(&self, query: &ActivityListQuery) -> AppResult<String> {
        let filter = self.filter_for(query).await?;
        let entries = self.log_repo.list_for_export(&filter).await?;

        let mut csv = String::from(
            "id,created_at,actor_user_id,action_type,target_type,target_id,description\n",
        );

        for entry in &entries {
            // Escape CSV fields (double quotes and newlines)
            let escape_csv = |s: &str| {
                if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
                    format!("\"{}\"", s.replace('"', "\"\""))
                } else {
                    s.to_string()
                }
            };

            let target_type = entry.target_type.as_deref().unwrap_or("");
            let target_id = entry.target_id.as_deref().unwrap_or("");
            let description = entry.description.as_deref().unwrap_or("");

            csv.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                escape_csv(&entry.id),
                escape_csv(&entry.created_at.to_rfc3339()),
                escape_csv(&entry.actor_user_id),
                escape_csv(&entry.action_type.to_value()),
                escape_csv(target_type),
                escape_csv(target_id),
                escape_csv(description),
            ));
        }

        Ok(csv)
    }

    /// Suspension entries recorded against a user account, newest first.
    pub async fn suspension_history(
        &self,
        user_id: &str,
        limit: u64,
    ) -> AppResult<Vec<activity_log::Model>> {
        self.log_repo
            .list_for_target(
                &EntityRef::User(user_id.to_string()),
                ActionType::AccountSuspended,
                limit,
            )
            .await
    }

    async fn filter_for(&self, query: &ActivityListQuery) -> AppResult<ActivityLogFilter> {
        if let Some(kind) = &query.target_type
            && !EntityRef::is_valid_kind(kind)
        {
            return Err(AppError::Validation(format!("Unknown target type: {kind}")));
        }

        if let (Some(start), Some(end)) = (query.start_date, query.end_date)
            && end < start
        {
            return Err(AppError::Validation(
                "end_date must not precede start_date".to_string(),
            ));
        }

        let search = match &query.search {
            Some(term) if !term.trim().is_empty() => {
                let term = term.trim().to_string();
                let matching_actor_ids = self.user_repo.search_ids_by_username(&term).await?;
                Some(SearchFilter {
                    term,
                    matching_actor_ids,
                })
            }
            _ => None,
        };

        Ok(ActivityLogFilter {
            action_type: query.action_type,
            target_type: query.target_type.clone(),
            start_date: query.start_date,
            end_date: query.end_date,
            search,
        })
    }
}
