//! Create report table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reports::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Reports::ReporterUserId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reports::ReporterRole)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reports::ReportedEntityType)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reports::ReportedEntityId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reports::ReportedUserId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reports::Reason).string_len(32).not_null())
                    .col(ColumnDef::new(Reports::Description).text().not_null())
                    .col(ColumnDef::new(Reports::EvidencePath).string_len(1024))
                    .col(
                        ColumnDef::new(Reports::Severity)
                            .string_len(32)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Reports::Status)
                            .string_len(32)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Reports::PenaltyDays).integer())
                    .col(ColumnDef::new(Reports::AdminNotes).text())
                    .col(ColumnDef::new(Reports::ReviewedBy).string_len(32))
                    .col(ColumnDef::new(Reports::ReviewedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Reports::ActionTaken).string_len(32))
                    .col(
                        ColumnDef::new(Reports::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reports_reporter")
                            .from(Reports::Table, Reports::ReporterUserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reports_reported_user")
                            .from(Reports::Table, Reports::ReportedUserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reports_reviewer")
                            .from(Reports::Table, Reports::ReviewedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: status (moderation queue)
        manager
            .create_index(
                Index::create()
                    .name("idx_reports_status")
                    .table(Reports::Table)
                    .col(Reports::Status)
                    .to_owned(),
            )
            .await?;

        // Index: (reported_entity_type, reported_entity_id) - repeat offenders
        manager
            .create_index(
                Index::create()
                    .name("idx_reports_reported_entity")
                    .table(Reports::Table)
                    .col(Reports::ReportedEntityType)
                    .col(Reports::ReportedEntityId)
                    .to_owned(),
            )
            .await?;

        // Index: reported_user_id (reports against an account)
        manager
            .create_index(
                Index::create()
                    .name("idx_reports_reported_user_id")
                    .table(Reports::Table)
                    .col(Reports::ReportedUserId)
                    .to_owned(),
            )
            .await?;

        // Index: created_at (recent reports, newest-first listing)
        manager
            .create_index(
                Index::create()
                    .name("idx_reports_created_at")
                    .table(Reports::Table)
                    .col(Reports::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reports::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Reports {
    Table,
    Id,
    ReporterUserId,
    ReporterRole,
    ReportedEntityType,
    ReportedEntityId,
    ReportedUserId,
    Reason,
    Description,
    EvidencePath,
    Severity,
    Status,
    PenaltyDays,
    AdminNotes,
    ReviewedBy,
    ReviewedAt,
    ActionTaken,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
