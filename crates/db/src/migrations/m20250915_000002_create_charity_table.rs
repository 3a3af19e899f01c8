//! Create charity table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Charity::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Charity::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Charity::OwnerUserId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Charity::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Charity::Description).text())
                    .col(
                        ColumnDef::new(Charity::IsVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Charity::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_charity_owner")
                            .from(Charity::Table, Charity::OwnerUserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: name
        manager
            .create_index(
                Index::create()
                    .name("idx_charity_name")
                    .table(Charity::Table)
                    .col(Charity::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: owner_user_id
        manager
            .create_index(
                Index::create()
                    .name("idx_charity_owner_user_id")
                    .table(Charity::Table)
                    .col(Charity::OwnerUserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Charity::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Charity {
    Table,
    Id,
    OwnerUserId,
    Name,
    Description,
    IsVerified,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
