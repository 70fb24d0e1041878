use sea_orm_migration::{prelude::*, schema::*};

use super::m20260112_000001_create_schedule_table::Schedule;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScheduleMessage::Table)
                    .if_not_exists()
                    .col(pk_auto(ScheduleMessage::Id))
                    .col(integer(ScheduleMessage::ScheduleId))
                    .col(text(ScheduleMessage::Message))
                    .col(string_null(ScheduleMessage::Tags))
                    .col(integer(ScheduleMessage::Number))
                    .col(string_null(ScheduleMessage::PostedMessageId))
                    .col(string_null(ScheduleMessage::PostedChannelId))
                    .col(timestamp_null(ScheduleMessage::DatePosted))
                    .col(string(ScheduleMessage::CreatedBy))
                    .col(string(ScheduleMessage::ModifiedBy))
                    .col(timestamp(ScheduleMessage::DateCreated))
                    .col(timestamp(ScheduleMessage::DateModified))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_schedule_message_schedule_id")
                            .from(ScheduleMessage::Table, ScheduleMessage::ScheduleId)
                            .to(Schedule::Table, Schedule::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Non-unique: reorders shift numbers row by row within a transaction,
        // so a unique index would reject valid intermediate states
        manager
            .create_index(
                Index::create()
                    .name("idx_schedule_message_number")
                    .table(ScheduleMessage::Table)
                    .col(ScheduleMessage::ScheduleId)
                    .col(ScheduleMessage::Number)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScheduleMessage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ScheduleMessage {
    Table,
    Id,
    ScheduleId,
    Message,
    Tags,
    Number,
    PostedMessageId,
    PostedChannelId,
    DatePosted,
    CreatedBy,
    ModifiedBy,
    DateCreated,
    DateModified,
}
