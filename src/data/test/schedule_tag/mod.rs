use crate::data::schedule_tag::ScheduleTagRepository;
use crate::error::{schedule::ScheduleError, AppError};
use test_utils::{builder::TestBuilder, factory};

mod delete;
