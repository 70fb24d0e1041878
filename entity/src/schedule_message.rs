//! Schedule message entity: one queued post belonging to a schedule.

use sea_orm::entity::prelude::*;

/// A message queued for posting under a schedule.
///
/// `number` is the message's ordinal within its schedule, assigned at
/// creation as `schedule.current_number + 1`. A message is backlog while
/// `number > schedule.posted_number`; deletion leaves gaps in the numbering
/// on purpose.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "schedule_message")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub schedule_id: i32,

    #[sea_orm(column_type = "Text")]
    pub message: String,

    /// Space-separated normalized tag tokens for discovery.
    pub tags: Option<String>,

    /// Ordinal within the owning schedule.
    pub number: i32,

    /// Discord message ID once posted.
    pub posted_message_id: Option<String>,

    /// Discord channel ID the message was posted to.
    pub posted_channel_id: Option<String>,

    /// Set exactly once, when the message is posted.
    pub date_posted: Option<DateTimeUtc>,

    pub created_by: String,
    pub modified_by: String,
    pub date_created: DateTimeUtc,
    pub date_modified: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::schedule::Entity",
        from = "Column::ScheduleId",
        to = "super::schedule::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Schedule,
}

impl Related<super::schedule::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedule.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
