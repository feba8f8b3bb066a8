//! Event handlers: commands, reply-keyboard text, and inline callbacks.
//!
//! The controller is stateless; everything durable lives in the forecast
//! store. Fetch failures are caught at the transition boundary, logged in
//! full, and turned into a static failure message with the reply keyboard
//! still attached.

use std::sync::Arc;

use chrono::SecondsFormat;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{ChatAction, ChatId, ParseMode};
use teloxide::utils::command::BotCommands;

use pogoda_weather::{render_day_block, render_full_message, FetchError};

use crate::context::BotContext;
use crate::keyboards::{
    inline_keyboard, main_keyboard, BTN_LAST, BTN_REFRESH, BTN_WEATHER, CALLBACK_REFRESH,
};

const GREETING: &str = "Привет! Я присылаю прогноз погоды в Туле на сегодня и завтра.\n\n\
                        Используй кнопки или напиши /weather.";
const CHOOSE_PROMPT: &str = "Выберите:";
const REFRESH_PREFIX: &str = "Обновлено:";
const REFRESH_FAILED: &str = "Не удалось обновить прогноз. Попробуйте позже.";
const NOTHING_CACHED: &str =
    "Нет сохранённого прогноза для этого чата. Нажми «🌤 Погода в Туле» чтобы получить текущий прогноз.";
const INVALID_BUTTON: &str = "Некорректная кнопка.";
const HELP_FALLBACK: &str = "Напиши /weather или используй кнопки.";

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "приветствие и клавиатура")]
    Start,
    #[command(description = "прогноз на сегодня и завтра")]
    Weather,
}

/// Full dispatch tree: commands, then plain text, then callback queries.
pub fn schema() -> UpdateHandler<teloxide::RequestError> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(on_command),
                )
                .branch(dptree::endpoint(on_message)),
        )
        .branch(Update::filter_callback_query().endpoint(on_callback))
}

async fn on_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    ctx: Arc<BotContext>,
) -> ResponseResult<()> {
    match cmd {
        Command::Start => {
            bot.send_message(msg.chat.id, GREETING)
                .reply_markup(main_keyboard())
                .await?;
            Ok(())
        }
        Command::Weather => send_forecast(&bot, msg.chat.id, &ctx, None).await,
    }
}

async fn on_message(bot: Bot, msg: Message, ctx: Arc<BotContext>) -> ResponseResult<()> {
    match msg.text() {
        Some(BTN_WEATHER) => send_forecast(&bot, msg.chat.id, &ctx, None).await,
        Some(BTN_REFRESH) => send_forecast(&bot, msg.chat.id, &ctx, Some(REFRESH_PREFIX)).await,
        Some(BTN_LAST) => send_last(&bot, msg.chat.id, &ctx).await,
        _ => {
            bot.send_message(msg.chat.id, HELP_FALLBACK)
                .reply_markup(main_keyboard())
                .await?;
            Ok(())
        }
    }
}

async fn on_callback(bot: Bot, q: CallbackQuery, ctx: Arc<BotContext>) -> ResponseResult<()> {
    // Clears the client-side spinner.
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(chat) = q.message.as_ref().map(|m| m.chat.id) else {
        return Ok(());
    };

    match q.data.as_deref() {
        Some(data) if data.starts_with("day:") => match parse_day_callback(data) {
            Some(idx) => send_day_block(&bot, chat, &ctx, idx).await,
            None => {
                bot.send_message(chat, INVALID_BUTTON).await?;
                Ok(())
            }
        },
        Some(CALLBACK_REFRESH) => match fetch_and_cache(&ctx, chat).await {
            Ok(text) => {
                bot.send_message(chat, format!("{REFRESH_PREFIX}\n\n{text}"))
                    .parse_mode(ParseMode::Markdown)
                    .reply_markup(main_keyboard())
                    .await?;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Forecast refresh failed (callback): {}", e);
                bot.send_message(chat, REFRESH_FAILED)
                    .reply_markup(main_keyboard())
                    .await?;
                Ok(())
            }
        },
        _ => Ok(()),
    }
}

/// Fetch a fresh forecast, cache it for the chat, and return the rendered
/// full message. The store is only touched after a successful fetch.
async fn fetch_and_cache(ctx: &BotContext, chat: ChatId) -> Result<String, FetchError> {
    let daily = ctx.weather.fetch_forecast().await?;
    ctx.store.save(chat.0, &daily);
    Ok(render_full_message(&daily))
}

/// Fetch + cache + send the full two-day message, followed by the inline day
/// selector as a separate message so the reply keyboard stays visible.
async fn send_forecast(
    bot: &Bot,
    chat: ChatId,
    ctx: &BotContext,
    prefix: Option<&str>,
) -> ResponseResult<()> {
    bot.send_chat_action(chat, ChatAction::Typing).await?;

    match fetch_and_cache(ctx, chat).await {
        Ok(text) => {
            let body = match prefix {
                Some(p) => format!("{p}\n\n{text}"),
                None => text,
            };
            bot.send_message(chat, body)
                .parse_mode(ParseMode::Markdown)
                .reply_markup(main_keyboard())
                .await?;
            bot.send_message(chat, CHOOSE_PROMPT)
                .reply_markup(inline_keyboard())
                .await?;
        }
        Err(e) => {
            tracing::error!("Forecast fetch failed: {}", e);
            let text = if prefix.is_some() {
                REFRESH_FAILED
            } else {
                e.user_message()
            };
            bot.send_message(chat, text)
                .reply_markup(main_keyboard())
                .await?;
        }
    }
    Ok(())
}

async fn send_last(bot: &Bot, chat: ChatId, ctx: &BotContext) -> ResponseResult<()> {
    match ctx.store.load(chat.0) {
        Some(entry) => {
            let ts = entry.ts.to_rfc3339_opts(SecondsFormat::Secs, true);
            bot.send_message(chat, format!("Последнее сохранённое: {ts}\n\n{}", entry.text))
                .parse_mode(ParseMode::Markdown)
                .reply_markup(main_keyboard())
                .await?;
            bot.send_message(chat, CHOOSE_PROMPT)
                .reply_markup(inline_keyboard())
                .await?;
        }
        None => {
            bot.send_message(chat, NOTHING_CACHED)
                .reply_markup(main_keyboard())
                .await?;
        }
    }
    Ok(())
}

/// Send a single day block, preferring cached raw data and fetching fresh
/// only when nothing is cached for the chat.
async fn send_day_block(
    bot: &Bot,
    chat: ChatId,
    ctx: &BotContext,
    idx: usize,
) -> ResponseResult<()> {
    let label = if idx == 0 { "Сегодня" } else { "Завтра" };

    if let Some(entry) = ctx.store.load(chat.0) {
        bot.send_message(chat, render_day_block(&entry.daily, idx, label))
            .parse_mode(ParseMode::Markdown)
            .reply_markup(main_keyboard())
            .await?;
        return Ok(());
    }

    match ctx.weather.fetch_forecast().await {
        Ok(daily) => {
            ctx.store.save(chat.0, &daily);
            bot.send_message(chat, render_day_block(&daily, idx, label))
                .parse_mode(ParseMode::Markdown)
                .reply_markup(main_keyboard())
                .await?;
        }
        Err(e) => {
            tracing::error!("Forecast fetch failed (day callback): {}", e);
            bot.send_message(chat, e.user_message())
                .reply_markup(main_keyboard())
                .await?;
        }
    }
    Ok(())
}

fn parse_day_callback(data: &str) -> Option<usize> {
    data.strip_prefix("day:")?.parse().ok()
}
