//! Create donation table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Donation::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Donation::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Donation::DonorUserId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Donation::CampaignId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Donation::Amount).big_integer().not_null())
                    .col(ColumnDef::new(Donation::Message).text())
                    .col(
                        ColumnDef::new(Donation::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_donation_donor")
                            .from(Donation::Table, Donation::DonorUserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_donation_campaign")
                            .from(Donation::Table, Donation::CampaignId)
                            .to(Campaign::Table, Campaign::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: donor_user_id (for a donor's donation history)
        manager
            .create_index(
                Index::create()
                    .name("idx_donation_donor_user_id")
                    .table(Donation::Table)
                    .col(Donation::DonorUserId)
                    .to_owned(),
            )
            .await?;

        // Index: campaign_id (for a campaign's donation list)
        manager
            .create_index(
                Index::create()
                    .name("idx_donation_campaign_id")
                    .table(Donation::Table)
                    .col(Donation::CampaignId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Donation::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Donation {
    Table,
    Id,
    DonorUserId,
    CampaignId,
    Amount,
    Message,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}

#[derive(Iden)]
enum Campaign {
    Table,
    Id,
}
