//! Telegram bot serving the Tula two-day forecast.

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;

mod config;
mod context;
mod handlers;
mod keyboards;

use config::Config;
use context::BotContext;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let weather = pogoda_weather::WeatherClient::new()?;
    let store = pogoda_store::ForecastStore::new(&config.store_path);
    let ctx = Arc::new(BotContext::new(weather, store));

    let bot = Bot::new(config.telegram_token.clone());

    tracing::info!("Bot started");

    Dispatcher::builder(bot, handlers::schema())
        .dependencies(dptree::deps![ctx])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
