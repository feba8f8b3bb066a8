use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `daily` section of an Open-Meteo forecast response.
///
/// All arrays are index-aligned with `time` (one slot per calendar day), but
/// the provider may omit a field or return fewer entries than dates. Values
/// other than the dates are kept as raw JSON so a single malformed slot
/// degrades to a placeholder when rendering instead of failing the whole
/// response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Calendar dates, `YYYY-MM-DD`.
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Value>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Value>,
    #[serde(default)]
    pub precipitation_sum: Vec<Value>,
    #[serde(default)]
    pub weathercode: Vec<Value>,
    #[serde(default)]
    pub windspeed_10m_max: Vec<Value>,
}

/// Russian description for a WMO weather code.
///
/// Closed table; codes outside it return `None` and render as a placeholder.
/// See: https://open-meteo.com/en/docs#weathervariables
pub fn weather_description(code: i64) -> Option<&'static str> {
    let description = match code {
        0 => "Ясно",
        1 => "Преимущественно ясно",
        2 => "Переменная облачность",
        3 => "Пасмурно",
        45 => "Туман",
        48 => "Изморозь",
        51 => "Морось лёгкая",
        53 => "Морось",
        55 => "Морось интенсивная",
        61 => "Дождь лёгкий",
        63 => "Дождь",
        65 => "Дождь сильный",
        71 => "Снег лёгкий",
        73 => "Снег",
        75 => "Снег сильный",
        80 => "Ливни лёгкие",
        81 => "Ливни",
        82 => "Ливни сильные",
        95 => "Гроза",
        96 => "Гроза с градом",
        99 => "Гроза с сильным градом",
        _ => return None,
    };
    Some(description)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(weather_description(0), Some("Ясно"));
        assert_eq!(weather_description(3), Some("Пасмурно"));
        assert_eq!(weather_description(63), Some("Дождь"));
        assert_eq!(weather_description(99), Some("Гроза с сильным градом"));
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(weather_description(4), None);
        assert_eq!(weather_description(999), None);
        assert_eq!(weather_description(-1), None);
    }

    #[test]
    fn test_missing_arrays_deserialize_empty() {
        let daily: DailyForecast = serde_json::from_str(r#"{"time": ["2024-03-05"]}"#).unwrap();
        assert_eq!(daily.time.len(), 1);
        assert!(daily.temperature_2m_max.is_empty());
        assert!(daily.weathercode.is_empty());
    }

    #[test]
    fn test_non_numeric_values_deserialize() {
        // A provider slot that is not a number must not fail deserialization.
        let daily: DailyForecast = serde_json::from_str(
            r#"{"time": ["2024-03-05"], "temperature_2m_max": [null], "windspeed_10m_max": ["n/a"]}"#,
        )
        .unwrap();
        assert!(daily.temperature_2m_max[0].is_null());
        assert!(daily.windspeed_10m_max[0].is_string());
    }
}
