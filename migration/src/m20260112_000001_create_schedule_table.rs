use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Schedule::Table)
                    .if_not_exists()
                    .col(pk_auto(Schedule::Id))
                    .col(string(Schedule::GuildId))
                    .col(string(Schedule::Title))
                    .col(integer(Schedule::Kind).default(0))
                    .col(text(Schedule::Format))
                    .col(string(Schedule::PostRoutine))
                    .col(string_null(Schedule::PostChannelId))
                    .col(boolean(Schedule::Active).default(false))
                    .col(boolean(Schedule::Pin).default(false))
                    .col(boolean(Schedule::Discoverable).default(false))
                    .col(string_null(Schedule::CurrentPin))
                    .col(timestamp_null(Schedule::LastFire))
                    .col(string_null(Schedule::ManagerRoles))
                    .col(integer(Schedule::PostedNumber).default(0))
                    .col(integer(Schedule::CurrentNumber).default(0))
                    .col(string(Schedule::CreatedBy))
                    .col(string(Schedule::ModifiedBy))
                    .col(timestamp(Schedule::DateCreated))
                    .col(timestamp(Schedule::DateModified))
                    .to_owned(),
            )
            .await?;

        // Titles are unique per guild, case-sensitive
        manager
            .create_index(
                Index::create()
                    .name("idx_schedule_guild_title")
                    .table(Schedule::Table)
                    .col(Schedule::GuildId)
                    .col(Schedule::Title)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Schedule::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Schedule {
    Table,
    Id,
    GuildId,
    Title,
    Kind,
    Format,
    PostRoutine,
    PostChannelId,
    Active,
    Pin,
    Discoverable,
    CurrentPin,
    LastFire,
    ManagerRoles,
    PostedNumber,
    CurrentNumber,
    CreatedBy,
    ModifiedBy,
    DateCreated,
    DateModified,
}
