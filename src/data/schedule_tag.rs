use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use entity::schedule_tag;

use crate::error::{schedule::ScheduleError, AppError};

/// Tag name length bound, in characters, after normalization.
pub const TAG_NAME_MAX: usize = 64;

pub struct ScheduleTagRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ScheduleTagRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a tag on a schedule. Names are normalized to a lowercase
    /// hyphenated token and are unique per schedule.
    ///
    /// # Returns
    /// - `Ok(Model)`: The created tag
    /// - `Err(AppError)`: Empty/overlong name, duplicate name, or database error
    pub async fn create(
        &self,
        schedule_id: i32,
        name: &str,
        description: Option<String>,
        created_by: u64,
    ) -> Result<schedule_tag::Model, AppError> {
        let name = normalize_tag_name(name);
        let len = name.chars().count();
        if len == 0 || len > TAG_NAME_MAX {
            return Err(ScheduleError::LengthOutOfRange {
                field: "tag name",
                min: 1,
                max: TAG_NAME_MAX,
            }
            .into());
        }
        if self.exists(schedule_id, &name).await? {
            return Err(ScheduleError::DuplicateTag(name).into());
        }

        let created = schedule_tag::ActiveModel {
            schedule_id: ActiveValue::Set(schedule_id),
            name: ActiveValue::Set(name),
            description: ActiveValue::Set(description),
            created_by: ActiveValue::Set(created_by.to_string()),
            date_created: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(created)
    }

    pub async fn get_by_schedule(
        &self,
        schedule_id: i32,
    ) -> Result<Vec<schedule_tag::Model>, DbErr> {
        entity::prelude::ScheduleTag::find()
            .filter(schedule_tag::Column::ScheduleId.eq(schedule_id))
            .order_by_asc(schedule_tag::Column::Name)
            .all(self.db)
            .await
    }

    pub async fn exists(&self, schedule_id: i32, name: &str) -> Result<bool, DbErr> {
        Ok(entity::prelude::ScheduleTag::find()
            .filter(schedule_tag::Column::ScheduleId.eq(schedule_id))
            .filter(schedule_tag::Column::Name.eq(normalize_tag_name(name)))
            .one(self.db)
            .await?
            .is_some())
    }

    /// Deletes a tag by name. Returns whether a row was removed.
    pub async fn delete(&self, schedule_id: i32, name: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::ScheduleTag::delete_many()
            .filter(schedule_tag::Column::ScheduleId.eq(schedule_id))
            .filter(schedule_tag::Column::Name.eq(normalize_tag_name(name)))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

/// Collapses whitespace to hyphens and lowercases, so "Daily Prompt" and
/// "daily-prompt" name the same tag.
fn normalize_tag_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
