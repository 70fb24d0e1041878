use crate::data::schedule::ScheduleRepository;
use crate::data::schedule_message::{ListMessagesParams, MessageSort, ScheduleMessageRepository};
use crate::error::{schedule::ScheduleError, AppError};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use test_utils::{builder::TestBuilder, factory};

mod add;
mod next_in_backlog;
mod reorder;
