//! Environment-based configuration.

use anyhow::{Context, Result};
use std::path::PathBuf;

const DEFAULT_STORE_PATH: &str = "last_forecasts.json";

#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot API token.
    pub telegram_token: String,

    /// Path of the per-chat forecast cache file.
    pub store_path: PathBuf,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// # Errors
    /// Fails when `TELEGRAM_TOKEN` is not set; the bot must not start
    /// without a credential.
    pub fn from_env() -> Result<Self> {
        let telegram_token = std::env::var("TELEGRAM_TOKEN")
            .context("TELEGRAM_TOKEN environment variable is not set")?;

        let store_path = std::env::var("FORECAST_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORE_PATH));

        Ok(Self {
            telegram_token,
            store_path,
        })
    }
}
