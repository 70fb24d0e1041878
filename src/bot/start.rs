use std::sync::Arc;

use serenity::all::{ActivityData, Client, Context, EventHandler, GatewayIntents, Ready};
use serenity::async_trait;
use serenity::http::Http;

use crate::config::Config;
use crate::error::AppError;

/// Discord bot event handler
struct Handler {
    activity: Option<String>,
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!("{} is connected to Discord!", ready.user.name);

        if let Some(activity) = &self.activity {
            ctx.set_activity(Some(ActivityData::custom(activity.clone())));
        }
    }
}

/// Builds the Discord client and hands out its REST handle.
///
/// The REST handle is usable immediately; posting does not depend on the
/// gateway connection, so the schedule daemon can start before
/// [`start_bot`] is called.
///
/// # Arguments
/// - `config` - Application configuration
///
/// # Returns
/// - `Ok((client, http))` with the unstarted client and its REST handle
/// - `Err(AppError)` if client initialization fails
pub async fn init_bot(config: &Config) -> Result<(Client, Arc<Http>), AppError> {
    // Posting and permission checks go through REST; gateway traffic is only
    // needed for presence and guild availability
    let intents = GatewayIntents::GUILDS;

    let handler = Handler {
        activity: config.activity.clone(),
    };

    let client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await?;
    let http = client.http.clone();

    Ok((client, http))
}

/// Starts the Discord bot in a blocking manner
///
/// # Arguments
/// - `client` - The client built by [`init_bot`]
///
/// # Returns
/// - `Ok(())` if the bot runs to shutdown
/// - `Err(AppError)` if the gateway connection fails
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    // Blocks until shutdown
    client.start().await?;

    Ok(())
}
