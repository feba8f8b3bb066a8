//! Explicit handler context instead of process-wide globals, so handlers can
//! be exercised without a live transport.

use pogoda_store::ForecastStore;
use pogoda_weather::WeatherClient;

pub struct BotContext {
    pub weather: WeatherClient,
    pub store: ForecastStore,
}

impl BotContext {
    pub fn new(weather: WeatherClient, store: ForecastStore) -> Self {
        Self { weather, store }
    }
}
