//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including ID generation and convenience methods for creating entities
//! with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
///
/// This atomic counter ensures each factory-created entity gets a unique
/// identifier to prevent collisions in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// This function provides monotonically increasing values for use in
/// generating unique test identifiers across all factories.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a schedule with a pre-filled backlog of `count` messages.
///
/// The schedule is created active with a post channel and its
/// `current_number` already advanced to `count`; messages are numbered
/// `1..=count` and all unposted. Use the individual factories if you need
/// to customize specific entities.
///
/// # Arguments
/// - `db` - Database connection
/// - `count` - Number of backlog messages to create
///
/// # Returns
/// - `Ok((schedule, messages))` - Created schedule and its messages in number order
/// - `Err(DbErr)` - Database error during creation
pub async fn create_schedule_with_backlog(
    db: &DatabaseConnection,
    count: i32,
) -> Result<
    (
        entity::schedule::Model,
        Vec<entity::schedule_message::Model>,
    ),
    DbErr,
> {
    let schedule = crate::factory::schedule::ScheduleFactory::new(db)
        .post_channel_id(Some("200".to_string()))
        .active(true)
        .current_number(count)
        .build()
        .await?;

    let mut messages = Vec::with_capacity(count as usize);
    for number in 1..=count {
        let message =
            crate::factory::schedule_message::create_schedule_message(db, schedule.id, number)
                .await?;
        messages.push(message);
    }

    Ok((schedule, messages))
}
