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
                    .table(ScheduleTag::Table)
                    .if_not_exists()
                    .col(pk_auto(ScheduleTag::Id))
                    .col(integer(ScheduleTag::ScheduleId))
                    .col(string(ScheduleTag::Name))
                    .col(text_null(ScheduleTag::Description))
                    .col(string(ScheduleTag::CreatedBy))
                    .col(timestamp(ScheduleTag::DateCreated))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_schedule_tag_schedule_id")
                            .from(ScheduleTag::Table, ScheduleTag::ScheduleId)
                            .to(Schedule::Table, Schedule::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schedule_tag_name")
                    .table(ScheduleTag::Table)
                    .col(ScheduleTag::ScheduleId)
                    .col(ScheduleTag::Name)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScheduleTag::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ScheduleTag {
    Table,
    Id,
    ScheduleId,
    Name,
    Description,
    CreatedBy,
    DateCreated,
}
