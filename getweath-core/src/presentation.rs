//! Pure mapping from weather conditions to display choices.
//!
//! The icon table is keyed to the wttr.in condition vocabulary and is
//! case-sensitive by design; anything unmatched falls back to
//! [`DEFAULT_ICON`]. The gradient table partitions the provider's numeric
//! condition codes into four sky buckets crossed with day/night.

/// Glyph shown when the condition text matches nothing in the table.
pub const DEFAULT_ICON: &str = "🌡️";

/// Display glyph for a condition description.
pub fn icon_for(condition: &str) -> &'static str {
    match condition {
        "Clear" | "Sunny" => "☀️",
        "Partly cloudy" => "⛅",
        "Cloudy" | "Overcast" => "☁️",
        "Mist" | "Fog" => "🌫️",
        "Light rain" => "🌦️",
        "Moderate rain" | "Rain" => "🌧️",
        "Heavy rain" => "⛈️",
        "Light snow" | "Heavy snow" => "🌨️",
        "Snow" => "❄️",
        "Thunder" => "⚡",
        "Thunderstorm" => "⛈️",
        _ => DEFAULT_ICON,
    }
}

/// Coarse sky classification derived from a numeric condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkyBucket {
    Clear,
    Cloudy,
    Rainy,
    Storm,
}

impl SkyBucket {
    /// Codes outside every known range land in the clear bucket.
    pub fn from_code(code: i32) -> Self {
        match code {
            1000 => SkyBucket::Clear,
            1001..=1009 => SkyBucket::Cloudy,
            1150..=1201 => SkyBucket::Rainy,
            1273.. => SkyBucket::Storm,
            _ => SkyBucket::Clear,
        }
    }
}

/// Background gradient for a condition code and time of day. One of eight
/// fixed values.
pub fn background_for(code: i32, is_daytime: bool) -> &'static str {
    let bucket = SkyBucket::from_code(code);

    if is_daytime {
        match bucket {
            SkyBucket::Clear => "linear-gradient(to right bottom, #ff8c00, #ff6b6b)",
            SkyBucket::Cloudy => "linear-gradient(to right bottom, #4ca1af, #c4e0e5)",
            SkyBucket::Rainy => "linear-gradient(to right bottom, #606c88, #3f4c6b)",
            SkyBucket::Storm => "linear-gradient(to right bottom, #373b44, #4286f4)",
        }
    } else {
        match bucket {
            SkyBucket::Clear => "linear-gradient(to right bottom, #2c3e50, #3498db)",
            SkyBucket::Cloudy => "linear-gradient(to right bottom, #203a43, #2c5364)",
            SkyBucket::Rainy => "linear-gradient(to right bottom, #1f1c2c, #928dab)",
            SkyBucket::Storm => "linear-gradient(to right bottom, #0f2027, #203a43)",
        }
    }
}

/// Daytime runs from 06:00 inclusive to 18:00 exclusive.
pub fn is_daytime(hour: u32) -> bool {
    (6..18).contains(&hour)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_for_known_conditions() {
        assert_eq!(icon_for("Clear"), "☀️");
        assert_eq!(icon_for("Sunny"), "☀️");
        assert_eq!(icon_for("Partly cloudy"), "⛅");
        assert_eq!(icon_for("Overcast"), "☁️");
        assert_eq!(icon_for("Light rain"), "🌦️");
        assert_eq!(icon_for("Heavy rain"), "⛈️");
        assert_eq!(icon_for("Snow"), "❄️");
        assert_eq!(icon_for("Thunder"), "⚡");
    }

    #[test]
    fn icon_for_unknown_condition_is_default() {
        assert_eq!(icon_for("unknown-condition-xyz"), DEFAULT_ICON);
        // The match is case-sensitive on purpose.
        assert_eq!(icon_for("clear"), DEFAULT_ICON);
        assert_eq!(icon_for(""), DEFAULT_ICON);
    }

    #[test]
    fn daytime_boundaries() {
        assert!(!is_daytime(5));
        assert!(is_daytime(6));
        assert!(is_daytime(17));
        assert!(!is_daytime(18));
    }

    #[test]
    fn sky_buckets_partition_the_code_range() {
        assert_eq!(SkyBucket::from_code(1000), SkyBucket::Clear);
        assert_eq!(SkyBucket::from_code(1001), SkyBucket::Cloudy);
        assert_eq!(SkyBucket::from_code(1009), SkyBucket::Cloudy);
        assert_eq!(SkyBucket::from_code(1150), SkyBucket::Rainy);
        assert_eq!(SkyBucket::from_code(1201), SkyBucket::Rainy);
        assert_eq!(SkyBucket::from_code(1273), SkyBucket::Storm);
        assert_eq!(SkyBucket::from_code(9999), SkyBucket::Storm);
        // Default bucket for codes outside all defined ranges.
        assert_eq!(SkyBucket::from_code(0), SkyBucket::Clear);
        assert_eq!(SkyBucket::from_code(1100), SkyBucket::Clear);
    }

    #[test]
    fn backgrounds_differ_by_time_of_day() {
        assert_ne!(background_for(1000, true), background_for(1000, false));
        assert_eq!(
            background_for(1005, true),
            "linear-gradient(to right bottom, #4ca1af, #c4e0e5)"
        );
        assert_eq!(
            background_for(1300, false),
            "linear-gradient(to right bottom, #0f2027, #203a43)"
        );
    }
}
