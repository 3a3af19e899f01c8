//! Activity log repository.
//!
//! Append-only: entries can be inserted, listed and counted. There is
//! deliberately no update or delete here.

use std::sync::Arc;

use crate::entities::{
    ActivityLog, EntityRef,
    activity_log::{self, ActionType},
};
use chrono::{DateTime, Utc};
use givehub_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

/// Free-text search over a listing.
///
/// `matching_actor_ids` is resolved by the caller from a username lookup so
/// the log query itself needs no join.
#[derive(Debug, Clone)]
pub struct SearchFilter {
    /// Raw search term, matched against the description.
    pub term: String,
    /// Users whose username matched the term.
    pub matching_actor_ids: Vec<String>,
}

/// Filters for listing, counting and exporting activity log entries.
#[derive(Debug, Clone, Default)]
pub struct ActivityLogFilter {
    pub action_type: Option<ActionType>,
    pub target_type: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub search: Option<SearchFilter>,
}

impl ActivityLogFilter {
    fn condition(&self) -> Condition {
        let mut cond = Condition::all();

        if let Some(action) = self.action_type {
            cond = cond.add(activity_log::Column::ActionType.eq(action));
        }
        if let Some(kind) = &self.target_type {
            cond = cond.add(activity_log::Column::TargetType.eq(kind));
        }
        if let Some(start) = self.start_date {
            cond = cond.add(activity_log::Column::CreatedAt.gte(start));
        }
        if let Some(end) = self.end_date {
            cond = cond.add(activity_log::Column::CreatedAt.lte(end));
        }
        if let Some(search) = &self.search {
            let pattern = format!(
                "%{}%",
                search.term.replace('%', "\\%").replace('_', "\\_")
            );
            let mut matches = Condition::any().add(activity_log::Column::Description.like(&pattern));
            if !search.matching_actor_ids.is_empty() {
                matches = matches.add(
                    activity_log::Column::ActorUserId.is_in(search.matching_actor_ids.clone()),
                );
            }
            cond = cond.add(matches);
        }

        cond
    }
}

/// Activity log repository for database operations.
#[derive(Clone)]
pub struct ActivityLogRepository {
    db: Arc<DatabaseConnection>,
}

impl ActivityLogRepository {
    /// Create a new activity log repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Append a new entry.
    pub async fn insert(
        &self,
        model: activity_log::ActiveModel,
    ) -> AppResult<activity_log::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List entries matching `filter`, newest first.
    pub async fn list(
        &self,
        filter: &ActivityLogFilter,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<activity_log::Model>> {
        ActivityLog::find()
            .filter(filter.condition())
            .order_by_desc(activity_log::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all entries matching `filter` in chronological order.
    ///
    /// Export order is oldest first so the CSV reads top to bottom.
    pub async fn list_for_export(
        &self,
        filter: &ActivityLogFilter,
    ) -> AppResult<Vec<activity_log::Model>> {
        ActivityLog::find()
            .filter(filter.condition())
            .order_by_asc(activity_log::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count entries matching `filter`.
    pub async fn count(&self, filter: &ActivityLogFilter) -> AppResult<u64> {
        ActivityLog::find()
            .filter(filter.condition())
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all entries.
    pub async fn count_all(&self) -> AppResult<u64> {
        ActivityLog::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count entries whose action is one of `actions`.
    pub async fn count_by_action_types(&self, actions: &[ActionType]) -> AppResult<u64> {
        if actions.is_empty() {
            return Ok(0);
        }

        ActivityLog::find()
            .filter(activity_log::Column::ActionType.is_in(actions.to_vec()))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Entries with `action` against a specific target, newest first.
    ///
    /// Feeds the moderation context shown alongside a report under review.
    pub async fn list_for_target(
        &self,
        target: &EntityRef,
        action: ActionType,
        limit: u64,
    ) -> AppResult<Vec<activity_log::Model>> {
        ActivityLog::find()
            .filter(activity_log::Column::TargetType.eq(target.kind()))
            .filter(activity_log::Column::TargetId.eq(target.id()))
            .filter(activity_log::Column::ActionType.eq(action))
            .order_by_desc(activity_log::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
