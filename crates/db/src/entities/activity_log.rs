//! Activity log entity.
//!
//! Append-only audit trail of user and admin actions. Rows are only ever
//! inserted; there is no update or delete path anywhere in the crate.

use sea_orm::Iterable;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::entity_ref::EntityRef;

/// Kind of event captured by an activity log entry.
///
/// The vocabulary is closed. Adding an action means adding a variant here
/// and a branch in [`ActionType::category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(64))")]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    #[sea_orm(string_value = "login")]
    Login,
    #[sea_orm(string_value = "logout")]
    Logout,
    #[sea_orm(string_value = "user_registered")]
    UserRegistered,
    #[sea_orm(string_value = "charity_registered")]
    CharityRegistered,
    #[sea_orm(string_value = "charity_approved")]
    CharityApproved,
    #[sea_orm(string_value = "charity_rejected")]
    CharityRejected,
    #[sea_orm(string_value = "campaign_created")]
    CampaignCreated,
    #[sea_orm(string_value = "campaign_updated")]
    CampaignUpdated,
    #[sea_orm(string_value = "campaign_closed")]
    CampaignClosed,
    #[sea_orm(string_value = "donation_created")]
    DonationCreated,
    #[sea_orm(string_value = "donation_confirmed")]
    DonationConfirmed,
    #[sea_orm(string_value = "donation_refunded")]
    DonationRefunded,
    #[sea_orm(string_value = "report_submitted")]
    ReportSubmitted,
    #[sea_orm(string_value = "report_reviewed")]
    ReportReviewed,
    #[sea_orm(string_value = "report_deleted")]
    ReportDeleted,
    #[sea_orm(string_value = "account_suspended")]
    AccountSuspended,
    #[sea_orm(string_value = "account_reactivated")]
    AccountReactivated,
    #[sea_orm(string_value = "account_deactivated")]
    AccountDeactivated,
    #[sea_orm(string_value = "profile_updated")]
    ProfileUpdated,
}

/// Broad grouping of actions, used by the statistics endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Auth,
    Registration,
    Charity,
    Campaign,
    Donation,
    Moderation,
    Account,
}

impl ActionType {
    /// Category this action belongs to.
    ///
    /// Exhaustive on purpose: a new variant will not compile until it is
    /// classified here.
    #[must_use]
    pub const fn category(self) -> ActionCategory {
        match self {
            Self::Login | Self::Logout => ActionCategory::Auth,
            Self::UserRegistered | Self::CharityRegistered => ActionCategory::Registration,
            Self::CharityApproved | Self::CharityRejected => ActionCategory::Charity,
            Self::CampaignCreated | Self::CampaignUpdated | Self::CampaignClosed => {
                ActionCategory::Campaign
            }
            Self::DonationCreated | Self::DonationConfirmed | Self::DonationRefunded => {
                ActionCategory::Donation
            }
            Self::ReportSubmitted
            | Self::ReportReviewed
            | Self::ReportDeleted
            | Self::AccountSuspended => ActionCategory::Moderation,
            Self::AccountReactivated | Self::AccountDeactivated | Self::ProfileUpdated => {
                ActionCategory::Account
            }
        }
    }

    /// All actions belonging to `category`.
    #[must_use]
    pub fn in_category(category: ActionCategory) -> Vec<Self> {
        Self::iter().filter(|a| a.category() == category).collect()
    }
}

/// Activity log entry model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_activity_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// The user who performed the action.
    pub actor_user_id: String,
    /// What happened.
    pub action_type: ActionType,
    /// Human-readable summary of the event.
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Kind of the entity the action touched.
    #[sea_orm(nullable)]
    pub target_type: Option<String>,
    /// Id of the entity the action touched.
    #[sea_orm(nullable)]
    pub target_id: Option<String>,
    /// Structured context, e.g. penalty days on a suspension.
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub details: Option<Json>,
    /// When the action happened.
    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    /// The entry's target as a typed reference, if both columns are set and
    /// the stored kind is one of the four reportable kinds.
    #[must_use]
    pub fn target(&self) -> Option<EntityRef> {
        match (self.target_type.as_deref(), self.target_id.as_deref()) {
            (Some(kind), Some(id)) => EntityRef::from_parts(kind, id),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
