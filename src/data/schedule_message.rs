use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DbErr, EntityTrait, ExprTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, TransactionSession, TransactionTrait,
};

use entity::{schedule, schedule_message};

use crate::delivery::SentMessage;
use crate::error::{schedule::ScheduleError, AppError};
use crate::scheduler::render;

/// Sort orders for message listings, all descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSort {
    Number,
    Created,
    Modified,
}

pub struct ListMessagesParams {
    /// `Some(true)` restricts to unposted messages, `Some(false)` to posted.
    pub backlog: Option<bool>,
    pub sort: MessageSort,
    pub page: u64,
    pub per_page: u64,
}

/// Where a reordered message should land within the backlog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderTarget {
    /// The earliest postable slot, `posted_number + 1`.
    Front,
    /// The latest slot, `current_number`.
    Back,
    /// An explicit ordinal in `(posted_number, current_number]`.
    Position(i32),
}

pub struct ScheduleMessageRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ScheduleMessageRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Appends a message to the schedule's backlog.
    ///
    /// The new message takes `current_number + 1`; the increment and the
    /// read-back happen in a single `UPDATE ... RETURNING` statement so
    /// concurrent adds can never assign duplicate numbers.
    ///
    /// # Arguments
    /// - `schedule_id`: Owning schedule
    /// - `author`: Discord user ID of the message author
    /// - `message`: Message text, 1-1800 characters and at most 2000 once
    ///   substituted into the schedule's format
    /// - `tags`: Optional space-separated tags, normalized to lowercase
    ///
    /// # Returns
    /// - `Ok(Model)`: The created message with its assigned number
    /// - `Err(AppError)`: Unknown schedule, length violation, or database error
    pub async fn add(
        &self,
        schedule_id: i32,
        author: u64,
        message: String,
        tags: Option<String>,
    ) -> Result<schedule_message::Model, AppError> {
        let schedule = entity::prelude::Schedule::find_by_id(schedule_id)
            .one(self.db)
            .await?
            .ok_or(ScheduleError::NotFound(schedule_id))?;
        render::check_message(&schedule.format, &message)?;
        let tags = tags.as_deref().and_then(normalize_tags);

        let updated = entity::prelude::Schedule::update_many()
            .col_expr(
                schedule::Column::CurrentNumber,
                Expr::col(schedule::Column::CurrentNumber).add(1),
            )
            .filter(schedule::Column::Id.eq(schedule_id))
            .exec_with_returning(self.db)
            .await?;
        let number = updated
            .first()
            .map(|schedule| schedule.current_number)
            .ok_or(ScheduleError::NotFound(schedule_id))?;

        let now = Utc::now();
        let actor = author.to_string();
        let created = schedule_message::ActiveModel {
            schedule_id: ActiveValue::Set(schedule_id),
            message: ActiveValue::Set(message),
            tags: ActiveValue::Set(tags),
            number: ActiveValue::Set(number),
            posted_message_id: ActiveValue::Set(None),
            posted_channel_id: ActiveValue::Set(None),
            date_posted: ActiveValue::Set(None),
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

    pub async fn get_by_id(&self, id: i32) -> Result<Option<schedule_message::Model>, DbErr> {
        entity::prelude::ScheduleMessage::find_by_id(id)
            .one(self.db)
            .await
    }

    pub async fn get_by_number(
        &self,
        schedule_id: i32,
        number: i32,
    ) -> Result<Option<schedule_message::Model>, DbErr> {
        entity::prelude::ScheduleMessage::find()
            .filter(schedule_message::Column::ScheduleId.eq(schedule_id))
            .filter(schedule_message::Column::Number.eq(number))
            .one(self.db)
            .await
    }

    /// Gets the next backlog message: the smallest `number` strictly greater
    /// than `posted_number`. Deleted ordinals are skipped naturally since
    /// selection is by ordering, not contiguous enumeration.
    pub async fn next_in_backlog(
        &self,
        schedule_id: i32,
        posted_number: i32,
    ) -> Result<Option<schedule_message::Model>, DbErr> {
        entity::prelude::ScheduleMessage::find()
            .filter(schedule_message::Column::ScheduleId.eq(schedule_id))
            .filter(schedule_message::Column::Number.gt(posted_number))
            .order_by_asc(schedule_message::Column::Number)
            .one(self.db)
            .await
    }

    /// Gets paginated messages for a schedule.
    ///
    /// # Returns
    /// - `Ok((messages, total))`: Vector of messages and total count
    /// - `Err(DbErr)`: Database error
    pub async fn list(
        &self,
        schedule_id: i32,
        params: ListMessagesParams,
    ) -> Result<(Vec<schedule_message::Model>, u64), DbErr> {
        let mut query = entity::prelude::ScheduleMessage::find()
            .filter(schedule_message::Column::ScheduleId.eq(schedule_id));

        match params.backlog {
            Some(true) => query = query.filter(schedule_message::Column::DatePosted.is_null()),
            Some(false) => query = query.filter(schedule_message::Column::DatePosted.is_not_null()),
            None => {}
        }

        query = match params.sort {
            MessageSort::Number => query.order_by_desc(schedule_message::Column::Number),
            MessageSort::Created => query.order_by_desc(schedule_message::Column::DateCreated),
            MessageSort::Modified => query.order_by_desc(schedule_message::Column::DateModified),
        };

        let paginator = query.paginate(self.db, params.per_page);
        let total = paginator.num_items().await?;
        let messages = paginator.fetch_page(params.page).await?;

        Ok((messages, total))
    }

    /// Edits a message's text and tags. The number never changes here.
    pub async fn edit(
        &self,
        id: i32,
        message: Option<String>,
        tags: Option<Option<String>>,
        modified_by: u64,
    ) -> Result<schedule_message::Model, AppError> {
        let existing = self
            .get_by_id(id)
            .await?
            .ok_or(ScheduleError::MessageNotFound(id))?;
        let schedule = entity::prelude::Schedule::find_by_id(existing.schedule_id)
            .one(self.db)
            .await?
            .ok_or(ScheduleError::NotFound(existing.schedule_id))?;

        let mut active_model: schedule_message::ActiveModel = existing.into();
        if let Some(text) = message {
            render::check_message(&schedule.format, &text)?;
            active_model.message = ActiveValue::Set(text);
        }
        if let Some(tags) = tags {
            active_model.tags = ActiveValue::Set(tags.as_deref().and_then(normalize_tags));
        }
        active_model.modified_by = ActiveValue::Set(modified_by.to_string());
        active_model.date_modified = ActiveValue::Set(Utc::now());

        Ok(active_model.update(self.db).await?)
    }

    /// Deletes a message outright. Survivors are not renumbered; the backlog
    /// fetch skips the gap.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::ScheduleMessage::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Stamps a message as posted with its remote IDs. Runs inside the fire
    /// transaction, never on its own.
    pub async fn mark_posted(&self, id: i32, sent: &SentMessage) -> Result<(), DbErr> {
        entity::prelude::ScheduleMessage::update_many()
            .col_expr(
                schedule_message::Column::PostedMessageId,
                Expr::value(Some(sent.message_id.clone())),
            )
            .col_expr(
                schedule_message::Column::PostedChannelId,
                Expr::value(Some(sent.channel_id.clone())),
            )
            .col_expr(
                schedule_message::Column::DatePosted,
                Expr::value(Some(sent.timestamp)),
            )
            .col_expr(
                schedule_message::Column::DateModified,
                Expr::value(sent.timestamp),
            )
            .filter(schedule_message::Column::Id.eq(id))
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn count(&self, schedule_id: i32) -> Result<u64, DbErr> {
        entity::prelude::ScheduleMessage::find()
            .filter(schedule_message::Column::ScheduleId.eq(schedule_id))
            .count(self.db)
            .await
    }

    pub async fn count_backlog(&self, schedule_id: i32, posted_number: i32) -> Result<u64, DbErr> {
        entity::prelude::ScheduleMessage::find()
            .filter(schedule_message::Column::ScheduleId.eq(schedule_id))
            .filter(schedule_message::Column::Number.gt(posted_number))
            .count(self.db)
            .await
    }

    /// Free-text search over message bodies and tags for a guild, newest
    /// first. `discoverable_only` restricts results to schedules marked
    /// discoverable, for user-facing search.
    pub async fn search(
        &self,
        guild_id: u64,
        term: &str,
        discoverable_only: bool,
    ) -> Result<Vec<schedule_message::Model>, DbErr> {
        let term = term.trim().to_lowercase();
        let mut query = entity::prelude::ScheduleMessage::find()
            .join(JoinType::InnerJoin, schedule_message::Relation::Schedule.def())
            .filter(schedule::Column::GuildId.eq(guild_id.to_string()));
        if discoverable_only {
            query = query.filter(schedule::Column::Discoverable.eq(true));
        }

        query
            .filter(
                Condition::any()
                    .add(schedule_message::Column::Message.contains(&term))
                    .add(schedule_message::Column::Tags.contains(&term)),
            )
            .order_by_desc(schedule_message::Column::DateCreated)
            .all(self.db)
            .await
    }

    /// Gets messages carrying an exact tag token, in backlog order.
    pub async fn list_by_tag(
        &self,
        schedule_id: i32,
        tag: &str,
    ) -> Result<Vec<schedule_message::Model>, DbErr> {
        let tag = tag.trim().to_lowercase();
        // LIKE narrows the candidates; the token match is exact
        let candidates = entity::prelude::ScheduleMessage::find()
            .filter(schedule_message::Column::ScheduleId.eq(schedule_id))
            .filter(schedule_message::Column::Tags.contains(&tag))
            .order_by_asc(schedule_message::Column::Number)
            .all(self.db)
            .await?;

        Ok(candidates
            .into_iter()
            .filter(|message| {
                message
                    .tags
                    .as_deref()
                    .unwrap_or_default()
                    .split_whitespace()
                    .any(|token| token == tag)
            })
            .collect())
    }
}

impl<'a, C: ConnectionTrait + TransactionTrait> ScheduleMessageRepository<'a, C> {
    /// Moves a backlog message to the earliest postable slot.
    pub async fn move_to_front(
        &self,
        schedule_id: i32,
        message_id: i32,
        modified_by: u64,
    ) -> Result<schedule_message::Model, AppError> {
        self.reorder(schedule_id, message_id, ReorderTarget::Front, modified_by)
            .await
    }

    /// Moves a backlog message to the latest slot.
    pub async fn move_to_back(
        &self,
        schedule_id: i32,
        message_id: i32,
        modified_by: u64,
    ) -> Result<schedule_message::Model, AppError> {
        self.reorder(schedule_id, message_id, ReorderTarget::Back, modified_by)
            .await
    }

    /// Moves a backlog message to an explicit position.
    pub async fn move_to_position(
        &self,
        schedule_id: i32,
        message_id: i32,
        target: i32,
        modified_by: u64,
    ) -> Result<schedule_message::Model, AppError> {
        self.reorder(
            schedule_id,
            message_id,
            ReorderTarget::Position(target),
            modified_by,
        )
        .await
    }

    /// Reorders one backlog message, shifting every message strictly between
    /// the old and new position by one.
    ///
    /// The whole renumbering is a single transaction so no concurrent reader
    /// observes duplicate or missing numbers among backlog items. The target
    /// must satisfy `posted_number < target <= current_number`; the schedule
    /// and message are re-read inside the transaction so the bounds are
    /// checked against current state.
    ///
    /// # Returns
    /// - `Ok(Model)`: The moved message with its new number
    /// - `Err(AppError)`: Unknown schedule/message, message already posted,
    ///   target out of range, or database error
    pub async fn reorder(
        &self,
        schedule_id: i32,
        message_id: i32,
        target: ReorderTarget,
        modified_by: u64,
    ) -> Result<schedule_message::Model, AppError> {
        let txn = self.db.begin().await?;

        let schedule = entity::prelude::Schedule::find_by_id(schedule_id)
            .one(&txn)
            .await?
            .ok_or(ScheduleError::NotFound(schedule_id))?;
        let message = entity::prelude::ScheduleMessage::find_by_id(message_id)
            .filter(schedule_message::Column::ScheduleId.eq(schedule_id))
            .one(&txn)
            .await?
            .ok_or(ScheduleError::MessageNotFound(message_id))?;

        if message.number <= schedule.posted_number {
            return Err(ScheduleError::NotInBacklog(message.number).into());
        }

        let min = schedule.posted_number + 1;
        let max = schedule.current_number;
        let target = match target {
            ReorderTarget::Front => min,
            ReorderTarget::Back => max,
            ReorderTarget::Position(position) => position,
        };
        if target < min || target > max {
            return Err(ScheduleError::NumberOutOfRange {
                got: target,
                min,
                max,
            }
            .into());
        }

        let old = message.number;
        if target > old {
            // Moving later: pull the in-between block one slot earlier
            entity::prelude::ScheduleMessage::update_many()
                .col_expr(
                    schedule_message::Column::Number,
                    Expr::col(schedule_message::Column::Number).sub(1),
                )
                .filter(schedule_message::Column::ScheduleId.eq(schedule_id))
                .filter(schedule_message::Column::Number.gt(old))
                .filter(schedule_message::Column::Number.lte(target))
                .exec(&txn)
                .await?;
        } else if target < old {
            // Moving earlier: push the in-between block one slot later
            entity::prelude::ScheduleMessage::update_many()
                .col_expr(
                    schedule_message::Column::Number,
                    Expr::col(schedule_message::Column::Number).add(1),
                )
                .filter(schedule_message::Column::ScheduleId.eq(schedule_id))
                .filter(schedule_message::Column::Number.gte(target))
                .filter(schedule_message::Column::Number.lt(old))
                .exec(&txn)
                .await?;
        }

        let mut active_model: schedule_message::ActiveModel = message.into();
        active_model.number = ActiveValue::Set(target);
        active_model.modified_by = ActiveValue::Set(modified_by.to_string());
        active_model.date_modified = ActiveValue::Set(Utc::now());
        let moved = active_model.update(&txn).await?;

        txn.commit().await?;
        Ok(moved)
    }
}

/// Normalizes a tag string to lowercase space-separated tokens. Empty input
/// normalizes to `None`.
fn normalize_tags(tags: &str) -> Option<String> {
    let normalized = tags
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    (!normalized.is_empty()).then_some(normalized)
}
