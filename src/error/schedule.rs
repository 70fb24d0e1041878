use thiserror::Error;

/// Why the validity gate refused to let a schedule post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotReadyReason {
    /// No post channel is configured.
    NoPostChannel,
    /// The format string has no `${message}` placeholder.
    MissingPlaceholder,
    /// The post routine does not parse as a 5-field cron expression.
    InvalidRoutine,
    /// The bot lacks the required permissions in the post channel.
    MissingPermissions,
}

impl std::fmt::Display for NotReadyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Self::NoPostChannel => "no post channel is set",
            Self::MissingPlaceholder => "the format is missing the ${message} placeholder",
            Self::InvalidRoutine => "the post routine is not a valid cron expression",
            Self::MissingPermissions => "the bot is missing permissions in the post channel",
        };
        f.write_str(reason)
    }
}

/// Schedule-domain errors surfaced to managing users.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("schedule {0} does not exist")]
    NotFound(i32),

    #[error("a schedule titled '{0}' already exists in this server")]
    DuplicateTitle(String),

    #[error("message {0} does not exist")]
    MessageNotFound(i32),

    #[error("a tag named '{0}' already exists on this schedule")]
    DuplicateTag(String),

    #[error("{field} must be {min} to {max} characters")]
    LengthOutOfRange {
        field: &'static str,
        min: usize,
        max: usize,
    },

    #[error("invalid post routine '{0}'")]
    InvalidRoutine(String),

    #[error("target position must be between {min} and {max}, got {got}")]
    NumberOutOfRange { got: i32, min: i32, max: i32 },

    #[error("message #{0} is not in the backlog")]
    NotInBacklog(i32),

    #[error("rendered message is {len} characters, over the {max} limit")]
    RenderedTooLong { len: usize, max: usize },

    #[error("schedule is not ready to post: {0}")]
    NotReady(NotReadyReason),

    /// The optimistic `posted_number` guard observed an advance made by a
    /// concurrent fire. The losing fire rolls back without posting.
    #[error("schedule was advanced by a concurrent post")]
    ConcurrentAdvance,
}
