mod schedule;
mod schedule_message;
mod schedule_tag;
