use crate::data::schedule::{CreateScheduleParams, ScheduleRepository, UpdateScheduleParams};
use crate::error::{schedule::ScheduleError, AppError};
use chrono::Utc;
use entity::schedule::ScheduleKind;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_by_guild_paginated;
mod get_by_title;
mod set_active;
