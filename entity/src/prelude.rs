pub use super::schedule::Entity as Schedule;
pub use super::schedule_message::Entity as ScheduleMessage;
pub use super::schedule_tag::Entity as ScheduleTag;
