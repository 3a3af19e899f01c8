//! Reported-entity directory.
//!
//! Resolves a polymorphic [`EntityRef`] to the row it points at: a display
//! label plus the user account held accountable for it. The match is
//! exhaustive over the reference kinds, so adding a reportable kind will
//! not compile until resolution is defined for it.

use std::sync::Arc;

use crate::entities::{Campaign, Charity, Donation, EntityRef, User};
use givehub_common::{AppError, AppResult};
use sea_orm::{DatabaseConnection, EntityTrait};

/// What a reference resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntity {
    /// Human-readable label for moderation views and log descriptions.
    pub label: String,
    /// The account accountable for the entity. Suspensions land here.
    pub accountable_user_id: String,
}

/// Lookup of reportable entities across their tables.
#[derive(Clone)]
pub struct EntityDirectory {
    db: Arc<DatabaseConnection>,
}

impl EntityDirectory {
    /// Create a new entity directory.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Resolve a reference, or `None` when the referenced row is gone.
    pub async fn resolve(&self, entity: &EntityRef) -> AppResult<Option<ResolvedEntity>> {
        match entity {
            EntityRef::User(id) => {
                let Some(user) = User::find_by_id(id)
                    .one(self.db.as_ref())
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?
                else {
                    return Ok(None);
                };

                Ok(Some(ResolvedEntity {
                    label: user.username,
                    accountable_user_id: user.id,
                }))
            }
            EntityRef::Charity(id) => {
                let Some(charity) = Charity::find_by_id(id)
                    .one(self.db.as_ref())
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?
                else {
                    return Ok(None);
                };

                Ok(Some(ResolvedEntity {
                    label: charity.name,
                    accountable_user_id: charity.owner_user_id,
                }))
            }
            EntityRef::Campaign(id) => {
                let Some(campaign) = Campaign::find_by_id(id)
                    .one(self.db.as_ref())
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?
                else {
                    return Ok(None);
                };

                // The owning charity answers for its campaigns.
                let Some(charity) = Charity::find_by_id(&campaign.charity_id)
                    .one(self.db.as_ref())
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?
                else {
                    return Ok(None);
                };

                Ok(Some(ResolvedEntity {
                    label: campaign.title,
                    accountable_user_id: charity.owner_user_id,
                }))
            }
            EntityRef::Donation(id) => {
                let Some(donation) = Donation::find_by_id(id)
                    .one(self.db.as_ref())
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?
                else {
                    return Ok(None);
                };

                Ok(Some(ResolvedEntity {
                    label: format!("donation {}", donation.id),
                    accountable_user_id: donation.donor_user_id,
                }))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::{campaign, charity, donation, user, user::UserRole};
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_resolve_user_is_self_accountable() {
        let user = user::Model {
            id: "user1".to_string(),
            username: "alice".to_string(),
            name: None,
            role: UserRole::Donor,
            token: None,
            is_suspended: false,
            suspended_until: None,
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );

        let directory = EntityDirectory::new(db);
        let resolved = directory
            .resolve(&EntityRef::User("user1".to_string()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(resolved.label, "alice");
        assert_eq!(resolved.accountable_user_id, "user1");
    }

    #[tokio::test]
    async fn test_resolve_campaign_walks_to_charity_owner() {
        let campaign = campaign::Model {
            id: "campaign1".to_string(),
            charity_id: "charity1".to_string(),
            title: "Clean Water".to_string(),
            description: None,
            goal_amount: 500_000,
            raised_amount: 0,
            is_active: true,
            created_at: Utc::now().into(),
        };
        let charity = charity::Model {
            id: "charity1".to_string(),
            owner_user_id: "owner1".to_string(),
            name: "WaterWorks".to_string(),
            description: None,
            is_verified: true,
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[campaign]])
                .append_query_results([[charity]])
                .into_connection(),
        );

        let directory = EntityDirectory::new(db);
        let resolved = directory
            .resolve(&EntityRef::Campaign("campaign1".to_string()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(resolved.label, "Clean Water");
        assert_eq!(resolved.accountable_user_id, "owner1");
    }

    #[tokio::test]
    async fn test_resolve_donation_points_at_donor() {
        let donation = donation::Model {
            id: "donation1".to_string(),
            donor_user_id: "donor1".to_string(),
            campaign_id: "campaign1".to_string(),
            amount: 2_500,
            message: None,
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[donation]])
                .into_connection(),
        );

        let directory = EntityDirectory::new(db);
        let resolved = directory
            .resolve(&EntityRef::Donation("donation1".to_string()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(resolved.accountable_user_id, "donor1");
    }

    #[tokio::test]
    async fn test_resolve_missing_row_is_none() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<charity::Model>::new()])
                .into_connection(),
        );

        let directory = EntityDirectory::new(db);
        let resolved = directory
            .resolve(&EntityRef::Charity("missing".to_string()))
            .await
            .unwrap();

        assert!(resolved.is_none());
    }
}
