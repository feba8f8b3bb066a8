//! Reply and inline keyboards.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

pub const BTN_WEATHER: &str = "🌤 Погода в Туле";
pub const BTN_REFRESH: &str = "🔁 Обновить";
pub const BTN_LAST: &str = "🕘 Последнее";

pub const CALLBACK_DAY_TODAY: &str = "day:0";
pub const CALLBACK_DAY_TOMORROW: &str = "day:1";
pub const CALLBACK_REFRESH: &str = "refresh";

/// Persistent reply keyboard offered with every response.
pub fn main_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new(BTN_WEATHER)],
        vec![KeyboardButton::new(BTN_REFRESH), KeyboardButton::new(BTN_LAST)],
    ])
    .resize_keyboard(true)
}

/// Day selector + refresh, attached after full-forecast replies.
pub fn inline_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("Сегодня", CALLBACK_DAY_TODAY),
            InlineKeyboardButton::callback("Завтра", CALLBACK_DAY_TOMORROW),
        ],
        vec![InlineKeyboardButton::callback(BTN_REFRESH, CALLBACK_REFRESH)],
    ])
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    #[test]
    fn test_main_keyboard_layout() {
        let kb = main_keyboard();
        assert_eq!(kb.keyboard.len(), 2);
        assert_eq!(kb.keyboard[0][0].text, BTN_WEATHER);
        assert_eq!(kb.keyboard[1][0].text, BTN_REFRESH);
        assert_eq!(kb.keyboard[1][1].text, BTN_LAST);
    }

    #[test]
    fn test_inline_keyboard_callback_payloads() {
        let kb = inline_keyboard();
        assert_eq!(kb.inline_keyboard.len(), 2);

        let payloads: Vec<_> = kb
            .inline_keyboard
            .iter()
            .flatten()
            .map(|b| match &b.kind {
                InlineKeyboardButtonKind::CallbackData(d) => d.clone(),
                other => panic!("unexpected button kind: {other:?}"),
            })
            .collect();

        assert_eq!(payloads, vec!["day:0", "day:1", "refresh"]);
    }
}
