//! Schedule message factory for creating test message entities.
//!
//! This module provides factory methods for creating schedule message
//! entities with sensible defaults, reducing boilerplate in tests. The
//! factory supports customization through a builder pattern.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test schedule messages with customizable fields.
///
/// The caller picks the `number`; keeping it consistent with the owning
/// schedule's `current_number` is the test's responsibility.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::schedule_message::ScheduleMessageFactory;
///
/// let message = ScheduleMessageFactory::new(&db, schedule.id, 1)
///     .message("Pick a color")
///     .tags(Some("icebreaker".to_string()))
///     .build()
///     .await?;
/// ```
pub struct ScheduleMessageFactory<'a> {
    db: &'a DatabaseConnection,
    schedule_id: i32,
    message: String,
    tags: Option<String>,
    number: i32,
    posted_message_id: Option<String>,
    posted_channel_id: Option<String>,
    date_posted: Option<DateTime<Utc>>,
    created_by: String,
}

impl<'a> ScheduleMessageFactory<'a> {
    /// Creates a new ScheduleMessageFactory with default values.
    ///
    /// Defaults:
    /// - message: `"Test message {id}"` where id is auto-incremented
    /// - tags: `None`
    /// - posted fields: `None` (the message is backlog)
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `schedule_id` - Schedule this message belongs to
    /// - `number` - Ordinal within the owning schedule
    ///
    /// # Returns
    /// - `ScheduleMessageFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection, schedule_id: i32, number: i32) -> Self {
        let id = next_id();
        Self {
            db,
            schedule_id,
            message: format!("Test message {}", id),
            tags: None,
            number,
            posted_message_id: None,
            posted_channel_id: None,
            date_posted: None,
            created_by: "100".to_string(),
        }
    }

    /// Sets the message text.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the space-separated tag tokens.
    pub fn tags(mut self, tags: Option<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Marks the message as already posted.
    ///
    /// # Arguments
    /// - `message_id` - Remote message ID
    /// - `channel_id` - Remote channel ID
    /// - `date_posted` - Posting time
    pub fn posted(
        mut self,
        message_id: impl Into<String>,
        channel_id: impl Into<String>,
        date_posted: DateTime<Utc>,
    ) -> Self {
        self.posted_message_id = Some(message_id.into());
        self.posted_channel_id = Some(channel_id.into());
        self.date_posted = Some(date_posted);
        self
    }

    /// Builds and inserts the schedule message entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::schedule_message::Model)` - Created message entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::schedule_message::Model, DbErr> {
        let now = Utc::now();
        entity::schedule_message::ActiveModel {
            id: ActiveValue::NotSet,
            schedule_id: ActiveValue::Set(self.schedule_id),
            message: ActiveValue::Set(self.message),
            tags: ActiveValue::Set(self.tags),
            number: ActiveValue::Set(self.number),
            posted_message_id: ActiveValue::Set(self.posted_message_id),
            posted_channel_id: ActiveValue::Set(self.posted_channel_id),
            date_posted: ActiveValue::Set(self.date_posted),
            created_by: ActiveValue::Set(self.created_by.clone()),
            modified_by: ActiveValue::Set(self.created_by),
            date_created: ActiveValue::Set(now),
            date_modified: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a schedule message with default values.
///
/// Shorthand for `ScheduleMessageFactory::new(db, schedule_id, number).build().await`.
///
/// # Arguments
/// - `db` - Database connection
/// - `schedule_id` - Schedule this message belongs to
/// - `number` - Ordinal within the owning schedule
///
/// # Returns
/// - `Ok(entity::schedule_message::Model)` - Created message entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_schedule_message(
    db: &DatabaseConnection,
    schedule_id: i32,
    number: i32,
) -> Result<entity::schedule_message::Model, DbErr> {
    ScheduleMessageFactory::new(db, schedule_id, number)
        .build()
        .await
}
