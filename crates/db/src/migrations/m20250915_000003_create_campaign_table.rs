//! Create campaign table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Campaign::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Campaign::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Campaign::CharityId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Campaign::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Campaign::Description).text())
                    .col(
                        ColumnDef::new(Campaign::GoalAmount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Campaign::RaisedAmount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Campaign::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Campaign::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaign_charity")
                            .from(Campaign::Table, Campaign::CharityId)
                            .to(Charity::Table, Charity::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: charity_id (for listing a charity's campaigns)
        manager
            .create_index(
                Index::create()
                    .name("idx_campaign_charity_id")
                    .table(Campaign::Table)
                    .col(Campaign::CharityId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Campaign::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Campaign {
    Table,
    Id,
    CharityId,
    Title,
    Description,
    GoalAmount,
    RaisedAmount,
    IsActive,
    CreatedAt,
}

#[derive(Iden)]
enum Charity {
    Table,
    Id,
}
