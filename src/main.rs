mod bot;
mod config;
mod data;
mod delivery;
mod error;
mod scheduler;
mod startup;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::bot::messenger::DiscordMessenger;
use crate::config::Config;
use crate::error::AppError;
use crate::scheduler::Daemon;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let db = startup::connect_to_database(&config).await?;

    let (client, http) = bot::start::init_bot(&config).await?;
    let messenger = Arc::new(DiscordMessenger::new(http));

    // The daemon only needs the REST client, so it comes up before the
    // gateway connection is established.
    let daemon = Daemon::new(db.clone(), messenger).await?;
    daemon.init().await?;

    tracing::info!("Starting gateway client");
    bot::start::start_bot(client).await
}
