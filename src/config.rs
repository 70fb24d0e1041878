use crate::error::{config::ConfigError, AppError};

pub struct Config {
    pub database_url: String,
    pub discord_token: String,

    /// Optional custom activity shown on the bot's presence.
    pub activity: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            discord_token: std::env::var("DISCORD_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_TOKEN".to_string()))?,
            activity: std::env::var("BOT_ACTIVITY").ok(),
        })
    }
}
