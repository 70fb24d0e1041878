//! Error types for the cadence bot.
//!
//! `AppError` is the top-level error type; it aggregates configuration,
//! database, Discord, scheduler, and schedule-domain errors. User-facing
//! failures (bad input, schedule not ready) live in `ScheduleError` so the
//! command layer can turn them into denial replies instead of stack traces.

pub mod config;
pub mod schedule;

use thiserror::Error;

use crate::delivery::DeliveryError;
use crate::error::{config::ConfigError, schedule::ScheduleError};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Schedule-domain error: validation failures, not-ready schedules,
    /// out-of-range reorders, and the concurrent-advance guard.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity. Boxed due to large size.
    #[error(transparent)]
    Discord(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    Scheduler(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Message delivery failure from the messaging collaborator.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Boxes the error to reduce the size of the AppError enum, as
/// serenity::Error is very large and would make all AppError variants larger
/// if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::Discord(Box::new(err))
    }
}
