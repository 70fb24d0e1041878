//! One fire: the single logical post attempt for a schedule.

use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};

use entity::schedule;

use crate::data::schedule::ScheduleRepository;
use crate::data::schedule_message::ScheduleMessageRepository;
use crate::delivery::Messenger;
use crate::error::{
    schedule::{NotReadyReason, ScheduleError},
    AppError,
};

use super::{gate, render, routine::Routine};

/// Result of a fire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    Posted { number: i32, message_id: String },
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Schedule is not active and the fire was not forced.
    Inactive,
    /// The validity gate refused the fire.
    NotReady(NotReadyReason),
    /// The current window was already consumed, e.g. by a duplicate timer
    /// event or a concurrent fire.
    NotDue,
    /// Nothing left in the backlog; the tick was consumed.
    EmptyBacklog,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inactive => f.write_str("schedule is inactive"),
            Self::NotReady(reason) => write!(f, "schedule is not ready: {reason}"),
            Self::NotDue => f.write_str("no fire window is open"),
            Self::EmptyBacklog => f.write_str("backlog is empty"),
        }
    }
}

fn is_due(schedule: &schedule::Model, routine: &Routine, now: DateTime<Utc>) -> bool {
    let anchor = schedule.last_fire.unwrap_or(schedule.date_created);
    routine.is_due(anchor, now)
}

/// Executes one post attempt for a schedule.
///
/// Steps: gate check, due check, backlog fetch, render, deliver, commit.
/// Everything that advances state runs inside one transaction. The
/// `posted_number` claim happens before delivery, so of two racing fires
/// only one ever reaches the messaging API; a delivery failure rolls the
/// claim back and the message stays queued for the next tick.
///
/// `force` bypasses the active and due checks (admin "post now") but not the
/// gate or the transactional guard.
pub async fn fire(
    db: &DatabaseConnection,
    messenger: &dyn Messenger,
    schedule_id: i32,
    force: bool,
) -> Result<PostOutcome, AppError> {
    let schedule = ScheduleRepository::new(db)
        .get_by_id(schedule_id)
        .await?
        .ok_or(ScheduleError::NotFound(schedule_id))?;

    if !schedule.active && !force {
        return Ok(PostOutcome::Skipped(SkipReason::Inactive));
    }
    if let Err(reason) = gate::check(messenger, &schedule).await {
        tracing::warn!(
            "Skipping fire for schedule {} '{}': {}",
            schedule.id,
            schedule.title,
            reason
        );
        return Ok(PostOutcome::Skipped(SkipReason::NotReady(reason)));
    }

    let routine = Routine::parse(&schedule.post_routine)?;
    let now = Utc::now();
    if !force && !is_due(&schedule, &routine, now) {
        return Ok(PostOutcome::Skipped(SkipReason::NotDue));
    }

    // An uncommitted transaction rolls back on drop, so every early error
    // return below leaves the database untouched.
    let txn = db.begin().await?;
    let schedules = ScheduleRepository::new(&txn);
    let messages = ScheduleMessageRepository::new(&txn);

    // Re-read inside the transaction; a concurrent fire may have advanced
    // the schedule since the checks above
    let Some(schedule) = schedules.get_by_id(schedule_id).await? else {
        txn.rollback().await?;
        return Err(ScheduleError::NotFound(schedule_id).into());
    };
    if !force && !is_due(&schedule, &routine, now) {
        txn.rollback().await?;
        return Ok(PostOutcome::Skipped(SkipReason::NotDue));
    }

    let Some(message) = messages
        .next_in_backlog(schedule_id, schedule.posted_number)
        .await?
    else {
        schedules.consume_tick(schedule_id, now).await?;
        txn.commit().await?;
        let total = ScheduleMessageRepository::new(db).count(schedule_id).await?;
        tracing::info!(
            "Schedule {} '{}' fired with an empty backlog ({} message(s), all posted); tick consumed",
            schedule_id,
            schedule.title,
            total
        );
        return Ok(PostOutcome::Skipped(SkipReason::EmptyBacklog));
    };

    // Creation-time checks normally guarantee this fits; re-check anyway
    let rendered = render::render(&schedule.format, &message.message)?;

    let channel_id = schedule
        .post_channel_id
        .as_deref()
        .and_then(|id| id.parse::<u64>().ok())
        .ok_or(ScheduleError::NotReady(NotReadyReason::NoPostChannel))?;

    // Claim before delivering: of two racing fires, the loser observes the
    // already-advanced pointer and aborts without sending anything
    schedules
        .claim_fire(schedule_id, schedule.posted_number, message.number, now)
        .await?;

    if schedule.pin {
        if let Some(previous) = schedule
            .current_pin
            .as_deref()
            .and_then(|id| id.parse::<u64>().ok())
        {
            if let Err(err) = messenger.unpin(channel_id, previous).await {
                if err.is_skippable() {
                    tracing::debug!(
                        "Could not unpin previous post for schedule {}: {}",
                        schedule_id,
                        err
                    );
                } else {
                    txn.rollback().await?;
                    return Err(err.into());
                }
            }
        }
    }

    let sent = match messenger.send(channel_id, &rendered).await {
        Ok(sent) => sent,
        Err(err) => {
            // No partial state: the claim rolls back and the message stays
            // in the backlog for the next tick
            txn.rollback().await?;
            tracing::error!(
                "Delivery failed for schedule {} '{}': {}",
                schedule_id,
                schedule.title,
                err
            );
            return Err(err.into());
        }
    };

    if schedule.pin {
        let mut new_pin = None;
        if let Ok(sent_id) = sent.message_id.parse::<u64>() {
            match messenger.pin(channel_id, sent_id).await {
                Ok(()) => new_pin = Some(sent.message_id.clone()),
                // The message is already delivered; a pin failure must not
                // unwind the advance
                Err(err) => {
                    tracing::warn!("Could not pin post for schedule {}: {}", schedule_id, err);
                }
            }
        }
        schedules.set_current_pin(schedule_id, new_pin).await?;
    }

    messages.mark_posted(message.id, &sent).await?;
    txn.commit().await?;

    tracing::info!(
        "Posted schedule {} '{}' #{} to channel {}",
        schedule_id,
        schedule.title,
        message.number,
        sent.channel_id
    );
    Ok(PostOutcome::Posted {
        number: message.number,
        message_id: sent.message_id,
    })
}
