//! Account lifecycle service.
//!
//! Token authentication plus the suspend/activate operations the report
//! review flow drives.

use chrono::{DateTime, Duration, Utc};
use givehub_common::{AppError, AppResult};
use givehub_db::{
    entities::{user, user::UserRole},
    repositories::UserRepository,
};
use sea_orm::Set;

/// Account service for authentication and lifecycle operations.
#[derive(Clone)]
pub struct AccountService {
    user_repo: UserRepository,
}

impl AccountService {
    /// Create a new account service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    /// Resolve an access token to its user.
    ///
    /// Suspended accounts cannot act while their window is open; a window
    /// that has lapsed no longer blocks (reactivation is lazy).
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<user::Model> {
        let user = self
            .user_repo
            .find_by_token(token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if user.is_suspended
            && user
                .suspended_until
                .is_none_or(|until| until > Utc::now())
        {
            return Err(AppError::Forbidden("Account is suspended".to_string()));
        }

        Ok(user)
    }

    /// Get a user by ID.
    pub async fn get_user(&self, id: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_id(id).await
    }

    /// Suspend an account for `days` days starting at `from`.
    ///
    /// The window ends exactly at `from + days`, so callers passing a
    /// decision timestamp get a window anchored to the decision.
    pub async fn suspend(
        &self,
        user_id: &str,
        days: i32,
        from: DateTime<Utc>,
    ) -> AppResult<user::Model> {
        let user = self.user_repo.get_by_id(user_id).await?;

        // Admins cannot be suspended through moderation.
        if user.role == UserRole::Admin {
            return Err(AppError::Forbidden("Cannot suspend an admin".to_string()));
        }

        let until = from + Duration::days(i64::from(days));

        let mut model: user::ActiveModel = user.into();
        model.is_suspended = Set(true);
        model.suspended_until = Set(Some(until.into()));

        self.user_repo.update(model).await
    }

    /// Lift a suspension.
    pub async fn activate(&self, user_id: &str) -> AppResult<user::Model> {
        let user = self.user_repo.get_by_id(user_id).await?;

        let mut model: user::ActiveModel = user.into();
        model.is_suspended = Set(false);
        model.suspended_until = Set(None);

        self.user_repo.update(model).await
    }
}
