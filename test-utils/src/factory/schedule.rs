//! Schedule factory for creating test schedule entities.
//!
//! This module provides factory methods for creating schedule entities with
//! sensible defaults, reducing boilerplate in tests. The factory supports
//! customization through a builder pattern.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use entity::schedule::ScheduleKind;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test schedules with customizable fields.
///
/// Provides a builder pattern for creating schedule entities with default
/// values that can be overridden as needed for specific test scenarios.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::schedule::ScheduleFactory;
///
/// let schedule = ScheduleFactory::new(&db)
///     .title("Daily Questions")
///     .format("Today: ${message}")
///     .active(true)
///     .build()
///     .await?;
/// ```
pub struct ScheduleFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    title: String,
    kind: ScheduleKind,
    format: String,
    post_routine: String,
    post_channel_id: Option<String>,
    active: bool,
    pin: bool,
    discoverable: bool,
    current_pin: Option<String>,
    last_fire: Option<DateTime<Utc>>,
    manager_roles: Option<String>,
    posted_number: i32,
    current_number: i32,
    created_by: String,
}

impl<'a> ScheduleFactory<'a> {
    /// Creates a new ScheduleFactory with default values.
    ///
    /// Defaults:
    /// - guild_id: unique numeric string
    /// - title: `"Schedule {id}"` where id is auto-incremented
    /// - kind: `ScheduleKind::Queue`
    /// - format: `"${message}"`
    /// - post_routine: `"0 0 * * *"` (daily at midnight UTC)
    /// - post_channel_id: `None`
    /// - active/pin/discoverable: `false`
    /// - posted_number/current_number: `0`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    ///
    /// # Returns
    /// - `ScheduleFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: (1000 + id).to_string(),
            title: format!("Schedule {}", id),
            kind: ScheduleKind::Queue,
            format: "${message}".to_string(),
            post_routine: "0 0 * * *".to_string(),
            post_channel_id: None,
            active: false,
            pin: false,
            discoverable: false,
            current_pin: None,
            last_fire: None,
            manager_roles: None,
            posted_number: 0,
            current_number: 0,
            created_by: "100".to_string(),
        }
    }

    /// Sets the owning guild ID.
    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    /// Sets the schedule title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the backlog ordering mode.
    pub fn kind(mut self, kind: ScheduleKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the post format template.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Sets the cron posting routine.
    pub fn post_routine(mut self, post_routine: impl Into<String>) -> Self {
        self.post_routine = post_routine.into();
        self
    }

    /// Sets the post channel ID.
    pub fn post_channel_id(mut self, post_channel_id: Option<String>) -> Self {
        self.post_channel_id = post_channel_id;
        self
    }

    /// Sets whether the schedule is active.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Sets whether posts are pinned.
    pub fn pin(mut self, pin: bool) -> Self {
        self.pin = pin;
        self
    }

    /// Sets whether the schedule is discoverable in cross-schedule search.
    pub fn discoverable(mut self, discoverable: bool) -> Self {
        self.discoverable = discoverable;
        self
    }

    /// Sets the currently pinned message ID.
    pub fn current_pin(mut self, current_pin: Option<String>) -> Self {
        self.current_pin = current_pin;
        self
    }

    /// Sets the last consumed fire time.
    pub fn last_fire(mut self, last_fire: Option<DateTime<Utc>>) -> Self {
        self.last_fire = last_fire;
        self
    }

    /// Sets the manager role IDs, space-separated.
    pub fn manager_roles(mut self, manager_roles: Option<String>) -> Self {
        self.manager_roles = manager_roles;
        self
    }

    /// Sets the last posted message ordinal.
    pub fn posted_number(mut self, posted_number: i32) -> Self {
        self.posted_number = posted_number;
        self
    }

    /// Sets the highest assigned message ordinal.
    pub fn current_number(mut self, current_number: i32) -> Self {
        self.current_number = current_number;
        self
    }

    /// Builds and inserts the schedule entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::schedule::Model)` - Created schedule entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::schedule::Model, DbErr> {
        let now = Utc::now();
        entity::schedule::ActiveModel {
            id: ActiveValue::NotSet,
            guild_id: ActiveValue::Set(self.guild_id),
            title: ActiveValue::Set(self.title),
            kind: ActiveValue::Set(self.kind),
            format: ActiveValue::Set(self.format),
            post_routine: ActiveValue::Set(self.post_routine),
            post_channel_id: ActiveValue::Set(self.post_channel_id),
            active: ActiveValue::Set(self.active),
            pin: ActiveValue::Set(self.pin),
            discoverable: ActiveValue::Set(self.discoverable),
            current_pin: ActiveValue::Set(self.current_pin),
            last_fire: ActiveValue::Set(self.last_fire),
            manager_roles: ActiveValue::Set(self.manager_roles),
            posted_number: ActiveValue::Set(self.posted_number),
            current_number: ActiveValue::Set(self.current_number),
            created_by: ActiveValue::Set(self.created_by.clone()),
            modified_by: ActiveValue::Set(self.created_by),
            date_created: ActiveValue::Set(now),
            date_modified: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a schedule with default values.
///
/// Shorthand for `ScheduleFactory::new(db).build().await`.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok(entity::schedule::Model)` - Created schedule entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_schedule(db: &DatabaseConnection) -> Result<entity::schedule::Model, DbErr> {
    ScheduleFactory::new(db).build().await
}
