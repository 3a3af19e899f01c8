//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250915_000001_create_user_table;
mod m20250915_000002_create_charity_table;
mod m20250915_000003_create_campaign_table;
mod m20250915_000004_create_donation_table;
mod m20250915_000005_create_activity_log_table;
mod m20250915_000006_create_report_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250915_000001_create_user_table::Migration),
            Box::new(m20250915_000002_create_charity_table::Migration),
            Box::new(m20250915_000003_create_campaign_table::Migration),
            Box::new(m20250915_000004_create_donation_table::Migration),
            Box::new(m20250915_000005_create_activity_log_table::Migration),
            Box::new(m20250915_000006_create_report_table::Migration),
        ]
    }
}
