//! Create activity log table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserActivityLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserActivityLogs::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserActivityLogs::ActorUserId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserActivityLogs::ActionType)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserActivityLogs::Description).text())
                    .col(ColumnDef::new(UserActivityLogs::TargetType).string_len(32))
                    .col(ColumnDef::new(UserActivityLogs::TargetId).string_len(32))
                    .col(ColumnDef::new(UserActivityLogs::Details).json_binary())
                    .col(
                        ColumnDef::new(UserActivityLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_activity_logs_actor")
                            .from(UserActivityLogs::Table, UserActivityLogs::ActorUserId)
                            .to(User::Table, User::Id)
                            // Audit rows must survive; deleting a user with
                            // history is refused at the database level.
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: actor_user_id (per-user history)
        manager
            .create_index(
                Index::create()
                    .name("idx_user_activity_logs_actor_user_id")
                    .table(UserActivityLogs::Table)
                    .col(UserActivityLogs::ActorUserId)
                    .to_owned(),
            )
            .await?;

        // Index: action_type (filtered listing and statistics)
        manager
            .create_index(
                Index::create()
                    .name("idx_user_activity_logs_action_type")
                    .table(UserActivityLogs::Table)
                    .col(UserActivityLogs::ActionType)
                    .to_owned(),
            )
            .await?;

        // Index: (target_type, target_id) - moderation context lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_user_activity_logs_target")
                    .table(UserActivityLogs::Table)
                    .col(UserActivityLogs::TargetType)
                    .col(UserActivityLogs::TargetId)
                    .to_owned(),
            )
            .await?;

        // Index: created_at (date-range filters, export ordering)
        manager
            .create_index(
                Index::create()
                    .name("idx_user_activity_logs_created_at")
                    .table(UserActivityLogs::Table)
                    .col(UserActivityLogs::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserActivityLogs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserActivityLogs {
    Table,
    Id,
    ActorUserId,
    ActionType,
    Description,
    TargetType,
    TargetId,
    Details,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
