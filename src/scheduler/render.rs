//! Format-string rendering: fill one named placeholder into a
//! bounded-length string.

use crate::error::schedule::ScheduleError;

pub const PLACEHOLDER: &str = "${message}";

/// Message text length bounds, in characters.
pub const MESSAGE_MIN: usize = 1;
pub const MESSAGE_MAX: usize = 1800;

/// Discord's hard limit on message content.
pub const MAX_POSTED_LEN: usize = 2000;

pub fn has_placeholder(format: &str) -> bool {
    format.contains(PLACEHOLDER)
}

/// Substitutes `message` at every placeholder occurrence and enforces the
/// posted-length limit.
pub fn render(format: &str, message: &str) -> Result<String, ScheduleError> {
    let rendered = format.replace(PLACEHOLDER, message);
    let len = rendered.chars().count();
    if len > MAX_POSTED_LEN {
        return Err(ScheduleError::RenderedTooLong {
            len,
            max: MAX_POSTED_LEN,
        });
    }
    Ok(rendered)
}

/// Validates message text at creation/edit time: raw length bounds plus the
/// rendered-length limit against the owning schedule's format.
pub fn check_message(format: &str, message: &str) -> Result<(), ScheduleError> {
    let len = message.chars().count();
    if !(MESSAGE_MIN..=MESSAGE_MAX).contains(&len) {
        return Err(ScheduleError::LengthOutOfRange {
            field: "message",
            min: MESSAGE_MIN,
            max: MESSAGE_MAX,
        });
    }
    render(format, message).map(|_| ())
}
