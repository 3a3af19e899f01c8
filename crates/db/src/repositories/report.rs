//! Report repository.

use std::sync::Arc;

use crate::entities::{
    EntityRef, Report,
    report::{self, ReportReason, ReportStatus},
};
use givehub_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use super::activity_log::SearchFilter;

/// Filters for listing reports.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub status: Option<ReportStatus>,
    pub entity_type: Option<String>,
    pub reason: Option<ReportReason>,
    pub search: Option<SearchFilter>,
}

impl ReportFilter {
    fn condition(&self) -> Condition {
        let mut cond = Condition::all();

        if let Some(status) = self.status {
            cond = cond.add(report::Column::Status.eq(status));
        }
        if let Some(kind) = &self.entity_type {
            cond = cond.add(report::Column::ReportedEntityType.eq(kind));
        }
        if let Some(reason) = self.reason {
            cond = cond.add(report::Column::Reason.eq(reason));
        }
        if let Some(search) = &self.search {
            let pattern = format!(
                "%{}%",
                search.term.replace('%', "\\%").replace('_', "\\_")
            );
            let mut matches = Condition::any().add(report::Column::Description.like(&pattern));
            if !search.matching_actor_ids.is_empty() {
                matches = matches
                    .add(report::Column::ReporterUserId.is_in(search.matching_actor_ids.clone()));
            }
            cond = cond.add(matches);
        }

        cond
    }
}

/// Report repository for database operations.
#[derive(Clone)]
pub struct ReportRepository {
    db: Arc<DatabaseConnection>,
}

impl ReportRepository {
    /// Create a new report repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new report.
    pub async fn create(&self, model: report::ActiveModel) -> AppResult<report::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a report by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<report::Model>> {
        Report::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a report by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<report::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ReportNotFound(id.to_string()))
    }

    /// List reports matching `filter`, newest first.
    pub async fn list(
        &self,
        filter: &ReportFilter,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<report::Model>> {
        Report::find()
            .filter(filter.condition())
            .order_by_desc(report::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a report.
    pub async fn update(&self, model: report::ActiveModel) -> AppResult<report::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a report.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let result = Report::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(AppError::ReportNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Count all reports.
    pub async fn count_all(&self) -> AppResult<u64> {
        Report::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count reports with a given status.
    pub async fn count_by_status(&self, status: ReportStatus) -> AppResult<u64> {
        Report::find()
            .filter(report::Column::Status.eq(status))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count reports filed for a given reason.
    pub async fn count_by_reason(&self, reason: ReportReason) -> AppResult<u64> {
        Report::find()
            .filter(report::Column::Reason.eq(reason))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Most recently filed reports.
    pub async fn recent(&self, limit: u64) -> AppResult<Vec<report::Model>> {
        Report::find()
            .order_by_desc(report::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Other reports filed against the same entity, newest first.
    pub async fn list_for_target(
        &self,
        target: &EntityRef,
        exclude_id: &str,
        limit: u64,
    ) -> AppResult<Vec<report::Model>> {
        Report::find()
            .filter(report::Column::ReportedEntityType.eq(target.kind()))
            .filter(report::Column::ReportedEntityId.eq(target.id()))
            .filter(report::Column::Id.ne(exclude_id))
            .order_by_desc(report::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
