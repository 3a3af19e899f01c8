//! Report entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::entity_ref::EntityRef;
use super::user::UserRole;

/// Report lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum ReportStatus {
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    #[sea_orm(string_value = "under_review")]
    UnderReview,
    #[sea_orm(string_value = "resolved")]
    Resolved,
    #[sea_orm(string_value = "dismissed")]
    Dismissed,
}

impl ReportStatus {
    /// Terminal statuses accept no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Dismissed)
    }
}

/// Why the report was filed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum ReportReason {
    #[sea_orm(string_value = "fraud")]
    Fraud,
    #[sea_orm(string_value = "fake_proof")]
    FakeProof,
    #[sea_orm(string_value = "scam")]
    Scam,
    #[sea_orm(string_value = "fake_charity")]
    FakeCharity,
    #[sea_orm(string_value = "misuse_of_funds")]
    MisuseOfFunds,
    #[sea_orm(string_value = "spam")]
    Spam,
    #[sea_orm(string_value = "harassment")]
    Harassment,
    #[sea_orm(string_value = "inappropriate_content")]
    InappropriateContent,
    #[sea_orm(string_value = "other")]
    Other,
}

/// Severity assigned by the reviewing admin.
///
/// `Pending` means not yet assessed; it is the value reports are created
/// with and is not accepted in a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum ReportSeverity {
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
    #[sea_orm(string_value = "critical")]
    Critical,
}

impl ReportSeverity {
    /// Default suspension length when the admin does not pick one.
    #[must_use]
    pub const fn suggested_penalty_days(self) -> Option<i32> {
        match self {
            Self::Pending => None,
            Self::Low => Some(3),
            Self::Medium => Some(7),
            Self::High => Some(15),
            Self::Critical => Some(30),
        }
    }
}

/// Outcome recorded on a report that reached a terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum ModerationAction {
    #[sea_orm(string_value = "suspended")]
    Suspended,
    #[sea_orm(string_value = "dismissed")]
    Dismissed,
}

/// Report model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// The user who filed the report.
    pub reporter_user_id: String,
    /// Reporter's role at submission time.
    pub reporter_role: UserRole,
    /// Kind of the reported entity.
    pub reported_entity_type: String,
    /// Id of the reported entity.
    pub reported_entity_id: String,
    /// The account held accountable for the reported entity, resolved when
    /// the report is filed.
    pub reported_user_id: String,
    /// Why the report was filed.
    pub reason: ReportReason,
    /// Reporter's account of the problem.
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Storage key of an uploaded evidence file.
    #[sea_orm(nullable)]
    pub evidence_path: Option<String>,
    /// Severity assessed by the reviewing admin.
    pub severity: ReportSeverity,
    /// Current lifecycle status.
    pub status: ReportStatus,
    /// Suspension length applied on approval.
    #[sea_orm(nullable)]
    pub penalty_days: Option<i32>,
    /// Admin's decision notes.
    #[sea_orm(column_type = "Text", nullable)]
    pub admin_notes: Option<String>,
    /// Admin who decided the report.
    #[sea_orm(nullable)]
    pub reviewed_by: Option<String>,
    /// When the report was decided.
    #[sea_orm(nullable)]
    pub reviewed_at: Option<DateTimeWithTimeZone>,
    /// Outcome of the review.
    #[sea_orm(nullable)]
    pub action_taken: Option<ModerationAction>,
    /// When the report was filed.
    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    /// The reported entity as a typed reference.
    ///
    /// Rows are only written through [`EntityRef`], so this is `None` only
    /// for hand-edited data.
    #[must_use]
    pub fn reported_entity(&self) -> Option<EntityRef> {
        EntityRef::from_parts(&self.reported_entity_type, &self.reported_entity_id)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
