//! Schedule tag factory for creating test tag entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test schedule tags with customizable fields.
pub struct ScheduleTagFactory<'a> {
    db: &'a DatabaseConnection,
    schedule_id: i32,
    name: String,
    description: Option<String>,
    created_by: String,
}

impl<'a> ScheduleTagFactory<'a> {
    /// Creates a new ScheduleTagFactory with default values.
    ///
    /// Defaults:
    /// - name: `"tag-{id}"` where id is auto-incremented
    /// - description: `None`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `schedule_id` - Schedule this tag belongs to
    ///
    /// # Returns
    /// - `ScheduleTagFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection, schedule_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            schedule_id,
            name: format!("tag-{}", id),
            description: None,
            created_by: "100".to_string(),
        }
    }

    /// Sets the tag name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the tag description.
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Builds and inserts the schedule tag entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::schedule_tag::Model)` - Created tag entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::schedule_tag::Model, DbErr> {
        entity::schedule_tag::ActiveModel {
            id: ActiveValue::NotSet,
            schedule_id: ActiveValue::Set(self.schedule_id),
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(self.description),
            created_by: ActiveValue::Set(self.created_by),
            date_created: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a schedule tag with default values.
///
/// Shorthand for `ScheduleTagFactory::new(db, schedule_id).build().await`.
///
/// # Arguments
/// - `db` - Database connection
/// - `schedule_id` - Schedule this tag belongs to
///
/// # Returns
/// - `Ok(entity::schedule_tag::Model)` - Created tag entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_schedule_tag(
    db: &DatabaseConnection,
    schedule_id: i32,
) -> Result<entity::schedule_tag::Model, DbErr> {
    ScheduleTagFactory::new(db, schedule_id).build().await
}
