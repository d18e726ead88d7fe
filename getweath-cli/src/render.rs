//! Human-friendly output formatting: the clock header, current conditions
//! and the forecast cards.

use chrono::{Local, NaiveDate, Timelike};
use getweath_core::{
    ForecastEntry, SessionState, WeatherSnapshot,
    presentation::{self, SkyBucket},
};

const RESET: &str = "\x1b[0m";

/// 12-hour clock, weekday and long date, like the app header.
pub fn clock_header() -> String {
    let now = Local::now();
    format!(
        "{}  ·  {}, {}",
        now.format("%-I:%M %p"),
        now.format("%A"),
        now.format("%B %-d, %Y"),
    )
}

/// Render whatever the session currently holds.
pub fn report(state: &SessionState) -> String {
    let Some(snapshot) = &state.snapshot else {
        return "Enter a location to get weather information".to_string();
    };

    let mut out = String::new();

    let tint = tint_for(snapshot.condition_code, presentation::is_daytime(Local::now().hour()));
    out.push_str(&format!("{tint}{}{RESET}\n", snapshot.location));

    let icon = presentation::icon_for(&snapshot.condition_text);
    out.push_str(&format!("{icon} {}\n", snapshot.condition_text));

    out.push_str(&format!("{}°C", snapshot.temperature_c));
    if let Some(feels) = snapshot.feels_like_c {
        out.push_str(&format!("  (feels like {feels}°C)"));
    }
    out.push('\n');

    let details = detail_line(snapshot);
    if !details.is_empty() {
        out.push_str(&details);
        out.push('\n');
    }

    if !state.forecast.is_empty() {
        out.push('\n');
        out.push_str("3-Day Forecast\n");
        for entry in &state.forecast {
            out.push_str(&forecast_line(entry));
            out.push('\n');
        }
    }

    out
}

fn detail_line(snapshot: &WeatherSnapshot) -> String {
    let mut details: Vec<String> = Vec::new();
    if let Some(h) = snapshot.humidity_pct {
        details.push(format!("Humidity {h}%"));
    }
    if let Some(w) = snapshot.wind_speed_kph {
        details.push(format!("Wind {w} km/h"));
    }
    if let Some(v) = snapshot.visibility_km {
        details.push(format!("Visibility {v} km"));
    }
    if let Some(p) = snapshot.pressure_hpa {
        details.push(format!("Pressure {p} hPa"));
    }
    if let Some(u) = snapshot.uv_index {
        details.push(format!("UV {u}"));
    }
    details.join("  ·  ")
}

fn forecast_line(entry: &ForecastEntry) -> String {
    let icon = presentation::icon_for(&entry.condition_text);
    let day = NaiveDate::parse_from_str(&entry.date, "%Y-%m-%d")
        .map(|d| d.format("%a %b %-d").to_string())
        .unwrap_or_else(|_| entry.date.clone());

    let mut line = format!(
        "{day}: {icon} {}  {}° / {}°",
        entry.condition_text, entry.max_temp_c, entry.min_temp_c
    );
    if let Some(rain) = entry.chance_of_rain_pct {
        line.push_str(&format!("  rain {rain}%"));
    }
    if let Some(h) = entry.humidity_pct {
        line.push_str(&format!("  humidity {h}%"));
    }
    if let Some(w) = entry.wind_speed_kph {
        line.push_str(&format!("  wind {w} km/h"));
    }
    line
}

/// Terminal stand-in for the app's background gradients: one ANSI tint per
/// sky bucket and time of day.
fn tint_for(code: Option<i32>, daytime: bool) -> &'static str {
    let bucket = code.map(SkyBucket::from_code).unwrap_or(SkyBucket::Clear);
    match (bucket, daytime) {
        (SkyBucket::Clear, true) => "\x1b[1;33m",
        (SkyBucket::Clear, false) => "\x1b[1;34m",
        (SkyBucket::Cloudy, true) => "\x1b[1;36m",
        (SkyBucket::Cloudy, false) => "\x1b[1;90m",
        (SkyBucket::Rainy, _) => "\x1b[1;94m",
        (SkyBucket::Storm, _) => "\x1b[1;35m",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_without_snapshot_prompts_for_a_location() {
        let state = SessionState::default();
        assert_eq!(report(&state), "Enter a location to get weather information");
    }

    #[test]
    fn forecast_line_carries_icon_and_bounds() {
        let entry = ForecastEntry {
            date: "2026-08-27".to_string(),
            max_temp_c: 31,
            min_temp_c: 24,
            condition_text: "Light rain".to_string(),
            humidity_pct: Some(70),
            wind_speed_kph: Some(12.0),
            chance_of_rain_pct: Some(80),
        };

        let line = forecast_line(&entry);
        assert!(line.contains("🌦️"));
        assert!(line.contains("31° / 24°"));
        assert!(line.contains("rain 80%"));
    }

    #[test]
    fn forecast_line_keeps_unparseable_dates_verbatim() {
        let entry = ForecastEntry {
            date: "someday".to_string(),
            max_temp_c: 20,
            min_temp_c: 10,
            condition_text: "Cloudy".to_string(),
            humidity_pct: None,
            wind_speed_kph: None,
            chance_of_rain_pct: None,
        };

        assert!(forecast_line(&entry).starts_with("someday:"));
    }
}
