use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::model::{ForecastEntry, WeatherBundle, WeatherSnapshot};

use super::{FetchError, WeatherProvider, geoapify::GeoapifyClient, truncate_body};

pub(crate) const WTTR_BASE_URL: &str = "https://wttr.in";

/// wttr.in reports eight three-hour slots per day; slot 4 is midday, which is
/// the sample each forecast day is summarized from.
const MIDDAY_SLOT: usize = 4;

const FORECAST_DAYS: usize = 3;

/// Weather provider backed by wttr.in's JSON endpoint, with place-name
/// suggestions from Geoapify when an API key is configured.
#[derive(Debug, Clone)]
pub struct WttrProvider {
    base_url: String,
    http: Client,
    geoapify: Option<GeoapifyClient>,
}

impl WttrProvider {
    pub fn new(geoapify_api_key: Option<String>) -> Self {
        Self::with_base_url(WTTR_BASE_URL, geoapify_api_key)
    }

    /// Same provider against a different endpoint; used by tests.
    pub fn with_base_url(base_url: impl Into<String>, geoapify_api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
            geoapify: geoapify_api_key.map(GeoapifyClient::new),
        }
    }

    /// Point suggestions at a different Geoapify endpoint; used by tests.
    pub fn with_suggestions(mut self, client: GeoapifyClient) -> Self {
        self.geoapify = Some(client);
        self
    }

    /// `{base}/{location}?format=j1`, with the location percent-encoded as a
    /// path segment.
    fn report_url(&self, location: &str) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|err| FetchError::Network(format!("invalid wttr.in base url: {err}")))?;

        url.path_segments_mut()
            .map_err(|()| FetchError::Network("wttr.in base url cannot hold a path".to_string()))?
            .pop_if_empty()
            .push(location);
        url.set_query(Some("format=j1"));

        Ok(url)
    }
}

#[async_trait]
impl WeatherProvider for WttrProvider {
    async fn fetch_current_and_forecast(
        &self,
        location: &str,
    ) -> Result<WeatherBundle, FetchError> {
        let url = self.report_url(location)?;

        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::Network(err.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|err| FetchError::Network(err.to_string()))?;

        if !status.is_success() {
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        let parsed: WttrReport = serde_json::from_str(&body)
            .map_err(|err| FetchError::Malformed(format!("invalid wttr.in JSON: {err}")))?;

        let snapshot = snapshot_from(location, &parsed)?;
        let forecast = forecast_from(&parsed);

        Ok(WeatherBundle { snapshot, forecast })
    }

    async fn suggest(&self, partial: &str) -> Vec<String> {
        match &self.geoapify {
            Some(client) => client.autocomplete(&self.http, partial).await,
            None => Vec::new(),
        }
    }
}

// wttr.in encodes every numeric field as a JSON string ("20", "62", ...), so
// the wire shape is all-strings and conversion happens in a separate
// validation step.

#[derive(Debug, Deserialize)]
struct WttrReport {
    #[serde(default)]
    current_condition: Vec<WttrCurrent>,
    #[serde(default)]
    weather: Vec<WttrDay>,
}

#[derive(Debug, Deserialize)]
struct WttrCurrent {
    #[serde(rename = "temp_C")]
    temp_c: Option<String>,
    #[serde(rename = "FeelsLikeC")]
    feels_like_c: Option<String>,
    #[serde(rename = "weatherDesc", default)]
    weather_desc: Vec<WttrDesc>,
    #[serde(rename = "weatherCode")]
    weather_code: Option<String>,
    humidity: Option<String>,
    #[serde(rename = "windspeedKmph")]
    windspeed_kmph: Option<String>,
    visibility: Option<String>,
    pressure: Option<String>,
    #[serde(rename = "uvIndex")]
    uv_index: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WttrDesc {
    value: String,
}

#[derive(Debug, Deserialize)]
struct WttrDay {
    date: Option<String>,
    #[serde(rename = "maxtempC")]
    maxtemp_c: Option<String>,
    #[serde(rename = "mintempC")]
    mintemp_c: Option<String>,
    #[serde(default)]
    hourly: Vec<WttrHour>,
}

#[derive(Debug, Deserialize)]
struct WttrHour {
    #[serde(rename = "weatherDesc", default)]
    weather_desc: Vec<WttrDesc>,
    humidity: Option<String>,
    #[serde(rename = "windspeedKmph")]
    windspeed_kmph: Option<String>,
    #[serde(rename = "chanceofrain")]
    chance_of_rain: Option<String>,
}

/// Validate the report and build the snapshot. Temperature and condition
/// description are required; everything else degrades to `None` field by
/// field.
fn snapshot_from(location: &str, report: &WttrReport) -> Result<WeatherSnapshot, FetchError> {
    let current = report
        .current_condition
        .first()
        .ok_or_else(|| FetchError::Malformed("response carries no current_condition".to_string()))?;

    let temperature_c = current
        .temp_c
        .as_deref()
        .and_then(parse_i32)
        .ok_or_else(|| {
            FetchError::Malformed("current temperature is missing or not numeric".to_string())
        })?;

    let condition_text = current
        .weather_desc
        .first()
        .map(|d| d.value.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            FetchError::Malformed("current condition description is missing".to_string())
        })?;

    Ok(WeatherSnapshot {
        location: location.to_string(),
        temperature_c,
        feels_like_c: current.feels_like_c.as_deref().and_then(parse_i32),
        condition_text,
        condition_code: current.weather_code.as_deref().and_then(parse_i32),
        humidity_pct: current.humidity.as_deref().and_then(parse_u8),
        wind_speed_kph: current.windspeed_kmph.as_deref().and_then(parse_f64),
        visibility_km: current.visibility.as_deref().and_then(parse_f64),
        pressure_hpa: current.pressure.as_deref().and_then(parse_f64),
        uv_index: current.uv_index.as_deref().and_then(parse_f64),
    })
}

/// First three forecast days. Days missing a date, temperature bounds, or the
/// midday sample are skipped rather than failing the whole fetch.
fn forecast_from(report: &WttrReport) -> Vec<ForecastEntry> {
    report
        .weather
        .iter()
        .take(FORECAST_DAYS)
        .filter_map(|day| {
            let sample = day.hourly.get(MIDDAY_SLOT)?;
            let condition_text = sample
                .weather_desc
                .first()
                .map(|d| d.value.trim().to_string())
                .filter(|v| !v.is_empty())?;

            Some(ForecastEntry {
                date: day.date.clone()?,
                max_temp_c: day.maxtemp_c.as_deref().and_then(parse_i32)?,
                min_temp_c: day.mintemp_c.as_deref().and_then(parse_i32)?,
                condition_text,
                humidity_pct: sample.humidity.as_deref().and_then(parse_u8),
                wind_speed_kph: sample.windspeed_kmph.as_deref().and_then(parse_f64),
                chance_of_rain_pct: sample.chance_of_rain.as_deref().and_then(parse_u8),
            })
        })
        .collect()
}

fn parse_i32(s: &str) -> Option<i32> {
    s.trim().parse().ok()
}

fn parse_u8(s: &str) -> Option<u8> {
    s.trim().parse().ok()
}

fn parse_f64(s: &str) -> Option<f64> {
    s.trim().parse().ok()
}
