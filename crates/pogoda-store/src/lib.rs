//! Per-chat cache of the most recent forecast, persisted as one JSON file.
//!
//! The document maps stringified chat ids to cached entries and is reloaded
//! from disk at the start of every operation, then rewritten wholesale on
//! save. A process-wide mutex serializes the read-modify-write sequences
//! across concurrently dispatched handlers. Persistence failures never reach
//! the caller: a corrupt or unreadable file reads as an empty store, and a
//! failed write is logged and dropped. Losing the cache is acceptable;
//! blocking the chat on it is not.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use pogoda_weather::{render_full_message, DailyForecast};

/// One cached forecast for a chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedEntry {
    /// When the forecast was fetched (UTC).
    pub ts: DateTime<Utc>,
    /// Raw daily arrays as received from the provider.
    pub daily: DailyForecast,
    /// Pre-rendered full message.
    pub text: String,
}

type StoreDocument = BTreeMap<String, CachedEntry>;

#[derive(Debug)]
pub struct ForecastStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ForecastStore {
    /// Create a store backed by the given file. No I/O happens here; the
    /// file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Cache a forecast for a chat, replacing any previous entry.
    ///
    /// The entry carries the current UTC timestamp and the pre-rendered full
    /// message. Durability is best-effort: a write failure is logged, not
    /// reported.
    pub fn save(&self, chat_id: i64, daily: &DailyForecast) {
        let _guard = self.lock.lock();

        let mut document = read_document(&self.path);
        document.insert(
            chat_id.to_string(),
            CachedEntry {
                ts: Utc::now(),
                daily: daily.clone(),
                text: render_full_message(daily),
            },
        );
        write_document(&self.path, &document);
    }

    /// Return the cached entry for a chat, if any.
    pub fn load(&self, chat_id: i64) -> Option<CachedEntry> {
        let _guard = self.lock.lock();

        read_document(&self.path).remove(&chat_id.to_string())
    }
}

/// Read the whole document; missing, unreadable, or corrupt files are an
/// empty store.
fn read_document(path: &Path) -> StoreDocument {
    if !path.exists() {
        return StoreDocument::new();
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read forecast store {}: {}", path.display(), e);
            return StoreDocument::new();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!(
                "Corrupt forecast store {}, treating as empty: {}",
                path.display(),
                e
            );
            StoreDocument::new()
        }
    }
}

fn write_document(path: &Path, document: &StoreDocument) {
    let json = match serde_json::to_string_pretty(document) {
        Ok(j) => j,
        Err(e) => {
            tracing::error!("Failed to serialize forecast store: {}", e);
            return;
        }
    };

    if let Err(e) = std::fs::write(path, json) {
        tracing::error!("Failed to write forecast store {}: {}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use tempfile::tempdir;

    fn sample_daily() -> DailyForecast {
        serde_json::from_value(serde_json::json!({
            "time": ["2024-03-05", "2024-03-06"],
            "temperature_2m_max": [5.2, 1.0],
            "temperature_2m_min": [-3, -7.5],
            "precipitation_sum": [0, 2.4],
            "weathercode": [3, 71],
            "windspeed_10m_max": [12, 8.1]
        }))
        .unwrap()
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = ForecastStore::new(dir.path().join("forecasts.json"));
        let daily = sample_daily();

        store.save(42, &daily);
        let entry = store.load(42).unwrap();

        assert_eq!(entry.daily, daily);
        assert_eq!(entry.text, render_full_message(&daily));
    }

    #[test]
    fn test_load_unknown_chat_is_none() {
        let dir = tempdir().unwrap();
        let store = ForecastStore::new(dir.path().join("forecasts.json"));

        assert!(store.load(42).is_none());
    }

    #[test]
    fn test_save_overwrites_previous_entry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("forecasts.json");
        let store = ForecastStore::new(&path);
        let daily = sample_daily();

        store.save(42, &daily);
        store.save(42, &daily);

        let contents = std::fs::read_to_string(&path).unwrap();
        let document: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(document.as_object().unwrap().len(), 1);
        assert!(document.get("42").is_some());
    }

    #[test]
    fn test_entries_are_per_chat() {
        let dir = tempdir().unwrap();
        let store = ForecastStore::new(dir.path().join("forecasts.json"));
        let daily = sample_daily();

        store.save(1, &daily);
        store.save(2, &daily);

        assert!(store.load(1).is_some());
        assert!(store.load(2).is_some());
        assert!(store.load(3).is_none());
    }

    #[test]
    fn test_corrupt_file_reads_as_empty_then_recovers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("forecasts.json");
        std::fs::write(&path, "{ this is not json").unwrap();

        let store = ForecastStore::new(&path);
        assert!(store.load(42).is_none());

        // A save after corruption rewrites a valid document.
        store.save(42, &sample_daily());
        assert!(store.load(42).is_some());
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&contents).is_ok());
    }

    #[test]
    fn test_persisted_layout_is_human_readable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("forecasts.json");
        let store = ForecastStore::new(&path);

        store.save(42, &sample_daily());

        let contents = std::fs::read_to_string(&path).unwrap();
        let entry = &serde_json::from_str::<serde_json::Value>(&contents).unwrap()["42"];
        assert!(entry.get("ts").is_some());
        assert!(entry.get("daily").is_some());
        assert!(entry.get("text").is_some());
    }
}
