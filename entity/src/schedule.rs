//! Schedule entity: a per-guild recurring posting configuration.

use sea_orm::entity::prelude::*;

/// Ordering mode for a schedule's message backlog.
///
/// Only `Queue` is implemented; the other variants are reserved so existing
/// rows keep their meaning when more modes land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum ScheduleKind {
    /// Messages post in queue order and are consumed once.
    #[sea_orm(num_value = 0)]
    Queue = 0,
    /// Reserved: repeat the backlog in order without consuming it.
    #[sea_orm(num_value = 1)]
    Rotation = 1,
    /// Reserved: post a random backlog message.
    #[sea_orm(num_value = 2)]
    Random = 2,
}

/// A recurring posting configuration owned by one guild.
///
/// `current_number` is the highest message ordinal ever assigned for this
/// schedule and only grows. `posted_number` is the ordinal of the last
/// successfully posted message; the open backlog is the half-open range
/// `(posted_number, current_number]`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "schedule")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Discord guild ID, stored as string.
    #[sea_orm(indexed)]
    pub guild_id: String,

    /// Title, unique within its guild (case-sensitive).
    pub title: String,

    pub kind: ScheduleKind,

    /// Post template; must contain the `${message}` placeholder to be
    /// postable.
    #[sea_orm(column_type = "Text")]
    pub format: String,

    /// 5-field cron expression (minute hour day month weekday), UTC.
    pub post_routine: String,

    /// Discord channel ID posts go to, stored as string.
    pub post_channel_id: Option<String>,

    pub active: bool,
    pub pin: bool,
    pub discoverable: bool,

    /// Discord message ID of the currently pinned post, if any.
    pub current_pin: Option<String>,

    /// Time of the last consumed fire window.
    pub last_fire: Option<DateTimeUtc>,

    /// Space-separated Discord role IDs allowed to manage this schedule
    /// besides server admins.
    pub manager_roles: Option<String>,

    pub posted_number: i32,
    pub current_number: i32,

    pub created_by: String,
    pub modified_by: String,
    pub date_created: DateTimeUtc,
    pub date_modified: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::schedule_message::Entity")]
    ScheduleMessage,
    #[sea_orm(has_many = "super::schedule_tag::Entity")]
    ScheduleTag,
}

impl Related<super::schedule_message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScheduleMessage.def()
    }
}

impl Related<super::schedule_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScheduleTag.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Parses `manager_roles` into role IDs, skipping malformed tokens.
    pub fn manager_role_ids(&self) -> Vec<u64> {
        self.manager_roles
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .filter_map(|id| id.parse().ok())
            .collect()
    }
}
