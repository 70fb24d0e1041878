use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use entity::schedule::{self, ScheduleKind};

use crate::error::{schedule::ScheduleError, AppError};
use crate::scheduler::{render, routine::Routine};

/// Title length bounds, in characters.
pub const TITLE_MIN: usize = 3;
pub const TITLE_MAX: usize = 64;

/// Format template length bounds, in characters.
pub const FORMAT_MIN: usize = 3;
pub const FORMAT_MAX: usize = 1800;

/// Routine assigned to new schedules: daily at midnight UTC.
pub const DEFAULT_ROUTINE: &str = "0 0 * * *";

pub struct CreateScheduleParams {
    pub guild_id: u64,
    pub title: String,
    pub kind: ScheduleKind,
    pub pin: bool,
    pub discoverable: bool,
    pub created_by: u64,
}

/// Field updates for a schedule. `None` leaves a field untouched; the nested
/// options clear a value when `Some(None)`.
#[derive(Default)]
pub struct UpdateScheduleParams {
    pub format: Option<String>,
    pub post_routine: Option<String>,
    pub post_channel_id: Option<Option<u64>>,
    pub pin: Option<bool>,
    pub discoverable: Option<bool>,
    pub manager_roles: Option<Option<String>>,
}

pub struct ScheduleRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ScheduleRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new schedule with default format and routine.
    ///
    /// Titles are unique per guild, case-sensitive; the same title in a
    /// different guild is accepted. New schedules start inactive with an
    /// empty backlog.
    ///
    /// # Arguments
    /// - `params`: Guild, title, ordering mode, pin/discoverable flags, actor
    ///
    /// # Returns
    /// - `Ok(Model)`: The created schedule
    /// - `Err(AppError)`: Title out of bounds, duplicate title, or database error
    pub async fn create(&self, params: CreateScheduleParams) -> Result<schedule::Model, AppError> {
        let title = params.title.trim().to_string();
        let len = title.chars().count();
        if !(TITLE_MIN..=TITLE_MAX).contains(&len) {
            return Err(ScheduleError::LengthOutOfRange {
                field: "title",
                min: TITLE_MIN,
                max: TITLE_MAX,
            }
            .into());
        }

        let guild_id = params.guild_id.to_string();
        let duplicate = entity::prelude::Schedule::find()
            .filter(schedule::Column::GuildId.eq(guild_id.as_str()))
            .filter(schedule::Column::Title.eq(title.as_str()))
            .one(self.db)
            .await?
            .is_some();
        if duplicate {
            return Err(ScheduleError::DuplicateTitle(title).into());
        }

        let now = Utc::now();
        let actor = params.created_by.to_string();
        let created = schedule::ActiveModel {
            guild_id: ActiveValue::Set(guild_id),
            title: ActiveValue::Set(title),
            kind: ActiveValue::Set(params.kind),
            format: ActiveValue::Set(render::PLACEHOLDER.to_string()),
            post_routine: ActiveValue::Set(DEFAULT_ROUTINE.to_string()),
            post_channel_id: ActiveValue::Set(None),
            active: ActiveValue::Set(false),
            pin: ActiveValue::Set(params.pin),
            discoverable: ActiveValue::Set(params.discoverable),
            current_pin: ActiveValue::Set(None),
            last_fire: ActiveValue::Set(None),
            manager_roles: ActiveValue::Set(None),
            posted_number: ActiveValue::Set(0),
            current_number: ActiveValue::Set(0),
            created_by: ActiveValue::Set(actor.clone()),
            modified_by: ActiveValue::Set(actor),
            date_created: ActiveValue::Set(now),
            date_modified: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(created)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<schedule::Model>, DbErr> {
        entity::prelude::Schedule::find_by_id(id).one(self.db).await
    }

    pub async fn get_by_title(
        &self,
        guild_id: u64,
        title: &str,
    ) -> Result<Option<schedule::Model>, DbErr> {
        entity::prelude::Schedule::find()
            .filter(schedule::Column::GuildId.eq(guild_id.to_string()))
            .filter(schedule::Column::Title.eq(title))
            .one(self.db)
            .await
    }

    /// Gets all active schedules across all guilds, for daemon startup.
    pub async fn get_active(&self) -> Result<Vec<schedule::Model>, DbErr> {
        entity::prelude::Schedule::find()
            .filter(schedule::Column::Active.eq(true))
            .order_by_asc(schedule::Column::Id)
            .all(self.db)
            .await
    }

    /// Gets paginated schedules for a guild, ordered by title.
    ///
    /// # Arguments
    /// - `guild_id`: Discord guild ID
    /// - `page`: Page number (0-indexed)
    /// - `per_page`: Number of items per page
    ///
    /// # Returns
    /// - `Ok((schedules, total))`: Vector of schedules and total count
    /// - `Err(DbErr)`: Database error
    pub async fn get_by_guild_paginated(
        &self,
        guild_id: u64,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<schedule::Model>, u64), DbErr> {
        let query = entity::prelude::Schedule::find()
            .filter(schedule::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(schedule::Column::Title);

        let paginator = query.paginate(self.db, per_page);
        let total = paginator.num_items().await?;
        let schedules = paginator.fetch_page(page).await?;

        Ok((schedules, total))
    }

    /// Updates configuration fields, stamping `date_modified`/`modified_by`.
    ///
    /// Format length and routine syntax are validated here so a bad value
    /// fails at the command, not deep inside the fire loop.
    pub async fn update(
        &self,
        id: i32,
        params: UpdateScheduleParams,
        modified_by: u64,
    ) -> Result<schedule::Model, AppError> {
        let current = self
            .get_by_id(id)
            .await?
            .ok_or(ScheduleError::NotFound(id))?;
        let mut active_model: schedule::ActiveModel = current.into();

        if let Some(format) = params.format {
            let len = format.chars().count();
            if !(FORMAT_MIN..=FORMAT_MAX).contains(&len) {
                return Err(ScheduleError::LengthOutOfRange {
                    field: "format",
                    min: FORMAT_MIN,
                    max: FORMAT_MAX,
                }
                .into());
            }
            active_model.format = ActiveValue::Set(format);
        }
        if let Some(routine) = params.post_routine {
            Routine::parse(&routine)?;
            active_model.post_routine = ActiveValue::Set(routine);
        }
        if let Some(channel) = params.post_channel_id {
            active_model.post_channel_id = ActiveValue::Set(channel.map(|id| id.to_string()));
        }
        if let Some(pin) = params.pin {
            active_model.pin = ActiveValue::Set(pin);
        }
        if let Some(discoverable) = params.discoverable {
            active_model.discoverable = ActiveValue::Set(discoverable);
        }
        if let Some(manager_roles) = params.manager_roles {
            active_model.manager_roles = ActiveValue::Set(manager_roles);
        }
        active_model.modified_by = ActiveValue::Set(modified_by.to_string());
        active_model.date_modified = ActiveValue::Set(Utc::now());

        Ok(active_model.update(self.db).await?)
    }

    /// Toggles `active`, stamping `last_fire` on activation so the first
    /// fire is the next cron occurrence rather than a catch-up of history.
    pub async fn set_active(
        &self,
        id: i32,
        active: bool,
        modified_by: u64,
    ) -> Result<schedule::Model, AppError> {
        let current = self
            .get_by_id(id)
            .await?
            .ok_or(ScheduleError::NotFound(id))?;
        let now = Utc::now();
        let mut active_model: schedule::ActiveModel = current.into();
        active_model.active = ActiveValue::Set(active);
        if active {
            active_model.last_fire = ActiveValue::Set(Some(now));
        }
        active_model.modified_by = ActiveValue::Set(modified_by.to_string());
        active_model.date_modified = ActiveValue::Set(now);

        Ok(active_model.update(self.db).await?)
    }

    /// Advances the posted pointer for one fire.
    ///
    /// The `WHERE posted_number = expected` filter is the optimistic guard
    /// against concurrent fires: the loser observes zero affected rows and
    /// must roll back its transaction without delivering.
    ///
    /// # Arguments
    /// - `id`: Schedule ID
    /// - `expected_posted_number`: `posted_number` observed when the fire began
    /// - `new_posted_number`: Ordinal of the message being posted
    /// - `now`: Fire time, recorded as `last_fire`
    ///
    /// # Returns
    /// - `Ok(())`: Pointer advanced
    /// - `Err(ScheduleError::ConcurrentAdvance)`: Another fire won the race
    pub async fn claim_fire(
        &self,
        id: i32,
        expected_posted_number: i32,
        new_posted_number: i32,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let result = entity::prelude::Schedule::update_many()
            .col_expr(
                schedule::Column::PostedNumber,
                Expr::value(new_posted_number),
            )
            .col_expr(schedule::Column::LastFire, Expr::value(Some(now)))
            .col_expr(schedule::Column::DateModified, Expr::value(now))
            .filter(schedule::Column::Id.eq(id))
            .filter(schedule::Column::PostedNumber.eq(expected_posted_number))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(ScheduleError::ConcurrentAdvance.into());
        }
        Ok(())
    }

    /// Records a due fire that found nothing to post. The tick is consumed
    /// (`last_fire` advances) so an empty backlog does not busy-retry the
    /// same window.
    pub async fn consume_tick(&self, id: i32, now: DateTime<Utc>) -> Result<(), DbErr> {
        entity::prelude::Schedule::update_many()
            .col_expr(schedule::Column::LastFire, Expr::value(Some(now)))
            .filter(schedule::Column::Id.eq(id))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Records which posted message is currently pinned, if any.
    pub async fn set_current_pin(
        &self,
        id: i32,
        current_pin: Option<String>,
    ) -> Result<(), DbErr> {
        entity::prelude::Schedule::update_many()
            .col_expr(schedule::Column::CurrentPin, Expr::value(current_pin))
            .filter(schedule::Column::Id.eq(id))
            .exec(self.db)
            .await?;
        Ok(())
    }
}
