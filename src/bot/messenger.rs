//! [`Messenger`] implementation over the Discord REST API.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serenity::all::{ChannelId, CreateMessage, MessageId, Permissions};
use serenity::async_trait;
use serenity::http::{Http, HttpError};

use crate::delivery::{ChannelPermission, DeliveryError, Messenger, SentMessage};

pub struct DiscordMessenger {
    http: Arc<Http>,
}

impl DiscordMessenger {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

/// Maps a Discord API failure onto the delivery error surface. Permission
/// and missing-target responses stay distinguishable so pin housekeeping
/// can skip them.
fn classify(err: serenity::Error) -> DeliveryError {
    if let serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) = &err {
        match response.status_code.as_u16() {
            403 => return DeliveryError::Forbidden,
            404 => return DeliveryError::NotFound,
            _ => {}
        }
    }
    DeliveryError::Other(err.to_string())
}

fn to_discord_permissions(permissions: &[ChannelPermission]) -> Permissions {
    permissions
        .iter()
        .fold(Permissions::empty(), |acc, permission| {
            acc | match permission {
                ChannelPermission::SendMessages => Permissions::SEND_MESSAGES,
                ChannelPermission::ManageMessages => Permissions::MANAGE_MESSAGES,
                ChannelPermission::ViewChannel => Permissions::VIEW_CHANNEL,
                ChannelPermission::ReadMessageHistory => Permissions::READ_MESSAGE_HISTORY,
            }
        })
}

#[async_trait]
impl Messenger for DiscordMessenger {
    async fn send(&self, channel_id: u64, content: &str) -> Result<SentMessage, DeliveryError> {
        let message = ChannelId::new(channel_id)
            .send_message(&self.http, CreateMessage::new().content(content))
            .await
            .map_err(classify)?;

        let timestamp = DateTime::<Utc>::from_timestamp(message.timestamp.unix_timestamp(), 0)
            .unwrap_or_else(Utc::now);

        Ok(SentMessage {
            message_id: message.id.get().to_string(),
            channel_id: message.channel_id.get().to_string(),
            timestamp,
        })
    }

    async fn pin(&self, channel_id: u64, message_id: u64) -> Result<(), DeliveryError> {
        ChannelId::new(channel_id)
            .pin(&self.http, MessageId::new(message_id))
            .await
            .map_err(classify)
    }

    async fn unpin(&self, channel_id: u64, message_id: u64) -> Result<(), DeliveryError> {
        ChannelId::new(channel_id)
            .unpin(&self.http, MessageId::new(message_id))
            .await
            .map_err(classify)
    }

    async fn has_channel_permissions(
        &self,
        channel_id: u64,
        permissions: &[ChannelPermission],
    ) -> Result<bool, DeliveryError> {
        let channel = self
            .http
            .get_channel(ChannelId::new(channel_id))
            .await
            .map_err(classify)?
            .guild()
            .ok_or(DeliveryError::NotFound)?;

        let guild = channel
            .guild_id
            .to_partial_guild(&self.http)
            .await
            .map_err(classify)?;
        let current_user = self.http.get_current_user().await.map_err(classify)?;
        let member = self
            .http
            .get_member(channel.guild_id, current_user.id)
            .await
            .map_err(classify)?;

        let effective = guild.user_permissions_in(&channel, &member);
        Ok(effective.contains(to_discord_permissions(permissions)))
    }
}
