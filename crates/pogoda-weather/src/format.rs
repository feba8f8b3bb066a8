//! Pure rendering of daily forecast data into the Russian message blocks the
//! bot sends.
//!
//! Formatting never fails: a missing, short, or non-numeric provider field
//! renders as the `—` placeholder so the user always gets a message.

use chrono::NaiveDate;
use serde_json::Value;

use crate::types::{weather_description, DailyForecast};

/// Placeholder glyph for absent or unparsable fields.
pub const PLACEHOLDER: &str = "—";

const TODAY_LABEL: &str = "Сегодня";
const TOMORROW_LABEL: &str = "Завтра";
const ATTRIBUTION: &str = "Данные: Open-Meteo.com";

/// Render one labeled day block from the daily arrays.
///
/// `idx` past the end of `time` yields just the label plus a "no data" line.
pub fn render_day_block(daily: &DailyForecast, idx: usize, label: &str) -> String {
    let Some(raw_date) = daily.time.get(idx) else {
        return format!("*{label}*\nНет данных.\n");
    };

    let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
        .map(|d| d.format("%d.%m.%Y").to_string())
        .unwrap_or_else(|_| raw_date.clone());

    let desc = daily
        .weathercode
        .get(idx)
        .and_then(Value::as_i64)
        .and_then(weather_description)
        .unwrap_or(PLACEHOLDER);

    let tmax = format_temperature(daily.temperature_2m_max.get(idx));
    let tmin = format_temperature(daily.temperature_2m_min.get(idx));
    let precip = format_measure(daily.precipitation_sum.get(idx), "мм");
    let wind = format_measure(daily.windspeed_10m_max.get(idx), "м/с");

    format!(
        "*{label} — {date}*\n{desc}\nМакс: {tmax}, мин: {tmin}\nОсадки: {precip}\nВетер: {wind}\n"
    )
}

/// Render the full two-day message: today + tomorrow + attribution footer.
pub fn render_full_message(daily: &DailyForecast) -> String {
    let today = render_day_block(daily, 0, TODAY_LABEL);
    let tomorrow = render_day_block(daily, 1, TOMORROW_LABEL);
    format!("{today}\n{tomorrow}\n\n{ATTRIBUTION}")
}

/// `{:+.0}°C`, e.g. `+5°C` / `-3°C`; placeholder when absent or non-numeric.
fn format_temperature(value: Option<&Value>) -> String {
    match value.and_then(Value::as_f64) {
        Some(v) => format!("{v:+.0}°C"),
        None => PLACEHOLDER.to_string(),
    }
}

fn format_measure(value: Option<&Value>, unit: &str) -> String {
    match value.and_then(Value::as_f64) {
        Some(v) => format!("{v} {unit}"),
        None => PLACEHOLDER.to_string(),
    }
}
