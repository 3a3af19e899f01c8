//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Setup test database:
//!   docker-compose -f docker-compose.test.yml up -d test-db
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `givehub_test`)
//!   `TEST_DB_PASSWORD` (default: `givehub_test`)
//!   `TEST_DB_NAME` (default: `givehub_test`)

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use chrono::Utc;
use givehub_common::IdGenerator;
use givehub_db::entities::{
    EntityRef, activity_log, activity_log::ActionType, report, report::ReportReason,
    report::ReportStatus, user, user::UserRole,
};
use givehub_db::repositories::{
    ActivityLogFilter, ActivityLogRepository, ReportRepository, UserRepository,
};
use givehub_db::test_utils::{TestDatabase, TestDbConfig};
use sea_orm::Set;

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_database_connection() {
    let config = TestDbConfig::default();
    let result = TestDatabase::with_config(config).await;
    assert!(result.is_ok(), "Failed to connect: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_database_cleanup() {
    let db = TestDatabase::new().await.expect("Failed to connect");
    let result = db.cleanup().await;
    assert!(result.is_ok(), "Cleanup failed: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_execute_query() {
    let db = TestDatabase::new().await.expect("Failed to connect");

    // Connection should be valid
    use sea_orm::ConnectionTrait;
    let result = db
        .connection()
        .execute(sea_orm::Statement::from_string(
            sea_orm::DatabaseBackend::Postgres,
            "SELECT 1".to_string(),
        ))
        .await;

    assert!(result.is_ok(), "Query failed: {:?}", result.err());
}

/// Full round-trip over a freshly migrated schema: create users, append a
/// log entry, file a report, read everything back.
#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_migrated_schema_round_trip() {
    let db = TestDatabase::create_unique()
        .await
        .expect("Failed to create test database");
    givehub_db::migrate(db.connection())
        .await
        .expect("Migrations failed");

    let conn = Arc::new(db.connection().clone());
    let ids = IdGenerator::new();

    let users = UserRepository::new(conn.clone());
    let logs = ActivityLogRepository::new(conn.clone());
    let reports = ReportRepository::new(conn);

    let reporter = users
        .create(user::ActiveModel {
            id: Set(ids.generate()),
            username: Set("alice".to_string()),
            name: Set(Some("Alice".to_string())),
            role: Set(UserRole::Donor),
            token: Set(Some(ids.generate_token())),
            is_suspended: Set(false),
            suspended_until: Set(None),
            created_at: Set(Utc::now().into()),
        })
        .await
        .unwrap();

    let reported = users
        .create(user::ActiveModel {
            id: Set(ids.generate()),
            username: Set("mallory".to_string()),
            name: Set(None),
            role: Set(UserRole::CharityAdmin),
            token: Set(None),
            is_suspended: Set(false),
            suspended_until: Set(None),
            created_at: Set(Utc::now().into()),
        })
        .await
        .unwrap();

    // Append-only log write and read-back.
    let entry = logs
        .insert(activity_log::ActiveModel {
            id: Set(ids.generate()),
            actor_user_id: Set(reporter.id.clone()),
            action_type: Set(ActionType::Login),
            description: Set(Some("alice logged in".to_string())),
            target_type: Set(None),
            target_id: Set(None),
            details: Set(None),
            created_at: Set(Utc::now().into()),
        })
        .await
        .unwrap();

    let listed = logs
        .list(&ActivityLogFilter::default(), 10, 0)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, entry.id);

    let auth_count = logs
        .count_by_action_types(&[ActionType::Login, ActionType::Logout])
        .await
        .unwrap();
    assert_eq!(auth_count, 1);

    // Report row against the second user.
    let report = reports
        .create(report::ActiveModel {
            id: Set(ids.generate()),
            reporter_user_id: Set(reporter.id.clone()),
            reporter_role: Set(reporter.role),
            reported_entity_type: Set("user".to_string()),
            reported_entity_id: Set(reported.id.clone()),
            reported_user_id: Set(reported.id.clone()),
            reason: Set(ReportReason::Spam),
            description: Set("Unsolicited fundraising spam".to_string()),
            evidence_path: Set(None),
            severity: Set(report::ReportSeverity::Pending),
            status: Set(ReportStatus::Pending),
            penalty_days: Set(None),
            admin_notes: Set(None),
            reviewed_by: Set(None),
            reviewed_at: Set(None),
            action_taken: Set(None),
            created_at: Set(Utc::now().into()),
        })
        .await
        .unwrap();

    let fetched = reports.get_by_id(&report.id).await.unwrap();
    assert_eq!(fetched.status, ReportStatus::Pending);
    assert_eq!(
        fetched.reported_entity(),
        Some(EntityRef::User(reported.id.clone()))
    );

    assert_eq!(reports.count_by_status(ReportStatus::Pending).await.unwrap(), 1);

    db.drop_database().await.expect("Failed to drop database");
}

#[test]
fn test_config_from_env() {
    // Test that default config is valid
    let config = TestDbConfig::default();
    assert!(!config.host.is_empty());
    assert!(config.port > 0);
    assert!(!config.username.is_empty());
    assert!(!config.database.is_empty());
}

#[test]
fn test_database_url_format() {
    let config = TestDbConfig {
        host: "testhost".to_string(),
        port: 5432,
        username: "testuser".to_string(),
        password: "testpass".to_string(),
        database: "testdb".to_string(),
    };

    let url = config.database_url();
    assert!(url.starts_with("postgres://"));
    assert!(url.contains("testhost"));
    assert!(url.contains("5432"));
    assert!(url.contains("testuser"));
    assert!(url.contains("testdb"));
}

#[test]
fn test_postgres_url_format() {
    let config = TestDbConfig::default();
    let url = config.postgres_url();
    assert!(url.ends_with("/postgres"));
}
