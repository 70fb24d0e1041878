//! Validity gate: the precondition check before activation or a fire.
//!
//! Policy: a schedule that fails the gate while active stays active; its
//! fires are skipped and the caller UI surfaces "not ready". Nothing here
//! mutates state.

use entity::schedule;

use crate::delivery::{ChannelPermission, Messenger};
use crate::error::schedule::NotReadyReason;

use super::render;
use super::routine::Routine;

/// Checks whether a schedule is currently postable.
///
/// Required: a post channel, the `${message}` placeholder in the format, a
/// parseable routine, and send permission in the channel (plus
/// manage-messages and history access when `pin` is set). A failed
/// permission query counts as missing permissions.
pub async fn check(
    messenger: &dyn Messenger,
    schedule: &schedule::Model,
) -> Result<(), NotReadyReason> {
    let Some(channel_id) = schedule
        .post_channel_id
        .as_deref()
        .and_then(|id| id.parse::<u64>().ok())
    else {
        return Err(NotReadyReason::NoPostChannel);
    };

    if !render::has_placeholder(&schedule.format) {
        return Err(NotReadyReason::MissingPlaceholder);
    }
    if Routine::parse(&schedule.post_routine).is_err() {
        return Err(NotReadyReason::InvalidRoutine);
    }

    let mut required = vec![ChannelPermission::SendMessages];
    if schedule.pin {
        required.extend([
            ChannelPermission::ManageMessages,
            ChannelPermission::ViewChannel,
            ChannelPermission::ReadMessageHistory,
        ]);
    }

    match messenger.has_channel_permissions(channel_id, &required).await {
        Ok(true) => Ok(()),
        Ok(false) | Err(_) => Err(NotReadyReason::MissingPermissions),
    }
}
