//! Open-Meteo daily forecast client and message formatter for the Tula
//! weather bot.
//!
//! The client fetches a fixed-location two-day forecast; the formatter turns
//! the raw daily arrays into the Russian text blocks the bot sends.

pub mod client;
pub mod error;
pub mod format;
pub mod types;

pub use client::WeatherClient;
pub use error::FetchError;
pub use format::{render_day_block, render_full_message};
pub use types::DailyForecast;
