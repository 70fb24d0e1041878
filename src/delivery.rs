//! Outbound message delivery abstraction.
//!
//! The daemon never talks to Discord directly; it posts through the
//! [`Messenger`] trait so fires can be exercised against a mock in tests.
//! The production implementation over `serenity::http::Http` lives in
//! `bot::messenger`.

use chrono::{DateTime, Utc};
use serenity::async_trait;
use thiserror::Error;

/// Channel permissions the validity gate checks before a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelPermission {
    SendMessages,
    /// Required to pin and unpin posts.
    ManageMessages,
    /// Required to fetch the previously pinned post.
    ViewChannel,
    /// Required to fetch the previously pinned post.
    ReadMessageHistory,
}

/// A successfully delivered message, as reported by the messaging API.
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub message_id: String,
    pub channel_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("missing permissions in the target channel")]
    Forbidden,

    #[error("channel or message not found")]
    NotFound,

    #[error("delivery failed: {0}")]
    Other(String),
}

impl DeliveryError {
    /// True for failures that pin housekeeping swallows rather than aborting
    /// a fire.
    pub fn is_skippable(&self) -> bool {
        matches!(self, Self::Forbidden | Self::NotFound)
    }
}

/// Messaging capability consumed by the daemon.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Posts `content` to the channel, returning the remote message handle.
    async fn send(&self, channel_id: u64, content: &str) -> Result<SentMessage, DeliveryError>;

    async fn pin(&self, channel_id: u64, message_id: u64) -> Result<(), DeliveryError>;

    async fn unpin(&self, channel_id: u64, message_id: u64) -> Result<(), DeliveryError>;

    /// Whether the bot's effective permissions in the channel include all of
    /// `permissions`.
    async fn has_channel_permissions(
        &self,
        channel_id: u64,
        permissions: &[ChannelPermission],
    ) -> Result<bool, DeliveryError>;
}
