use serde::{Deserialize, Serialize};

/// Current conditions for a location, replaced wholesale on each successful
/// fetch. Fields beyond temperature and condition are provider-dependent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: String,
    pub temperature_c: i32,
    pub feels_like_c: Option<i32>,
    pub condition_text: String,
    pub condition_code: Option<i32>,
    pub humidity_pct: Option<u8>,
    pub wind_speed_kph: Option<f64>,
    pub visibility_km: Option<f64>,
    pub pressure_hpa: Option<f64>,
    pub uv_index: Option<f64>,
}

/// One day of the short-range forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub date: String,
    pub max_temp_c: i32,
    pub min_temp_c: i32,
    pub condition_text: String,
    pub humidity_pct: Option<u8>,
    pub wind_speed_kph: Option<f64>,
    pub chance_of_rain_pct: Option<u8>,
}

/// What a successful provider fetch yields: current conditions plus up to
/// three forecast days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherBundle {
    pub snapshot: WeatherSnapshot,
    pub forecast: Vec<ForecastEntry>,
}
