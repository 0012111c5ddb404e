//! Weather readings and their effect on travel.
//!
//! [`classify_weather`] turns a provider's free-text description into a
//! [`WeatherCategory`] and an impact factor in `0.0..=1.0`, where `0.0` means
//! no effect and `1.0` means travel is effectively impossible.

/// Wind force (Beaufort) from which wind adds to the impact.
const STRONG_WIND_FORCE: u8 = 6;
/// Extra impact for strong wind or extreme temperature.
const AGGRAVATING_IMPACT: f64 = 0.1;
/// Temperatures outside this range add to the impact.
const COMFORTABLE_TEMPERATURE_C: std::ops::RangeInclusive<f64> = -5.0..=38.0;

/// A point-in-time weather observation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherReading {
    /// Provider description, e.g. "light rain".
    pub description: String,
    /// Air temperature in degrees Celsius.
    pub temperature_c: f64,
    /// Wind force on the Beaufort scale.
    pub wind_force: u8,
}

impl WeatherReading {
    /// Construct a reading.
    #[must_use]
    pub fn new(description: impl Into<String>, temperature_c: f64, wind_force: u8) -> Self {
        Self {
            description: description.into(),
            temperature_c,
            wind_force,
        }
    }
}

/// Broad weather condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WeatherCategory {
    /// Clear or sunny.
    Clear,
    /// Cloud cover without precipitation.
    Cloudy,
    /// Rain, drizzle or showers.
    Rain,
    /// Snow or sleet.
    Snow,
    /// Fog or mist.
    Fog,
    /// Haze, smog or dust.
    Haze,
    /// Thunderstorms.
    Storm,
}

impl WeatherCategory {
    /// Report whether the category degrades driving conditions.
    #[must_use]
    pub const fn is_bad(&self) -> bool {
        matches!(
            self,
            Self::Rain | Self::Snow | Self::Fog | Self::Haze | Self::Storm
        )
    }

    /// Return the category as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Cloudy => "cloudy",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Fog => "fog",
            Self::Haze => "haze",
            Self::Storm => "storm",
        }
    }

    fn from_description(description: &str) -> Self {
        const KEYWORDS: [(&[&str], WeatherCategory); 6] = [
            (&["storm", "thunder"], WeatherCategory::Storm),
            (&["snow", "sleet"], WeatherCategory::Snow),
            (&["rain", "drizzle", "shower"], WeatherCategory::Rain),
            (&["fog", "mist"], WeatherCategory::Fog),
            (&["haze", "smog", "dust"], WeatherCategory::Haze),
            (&["cloud", "overcast"], WeatherCategory::Cloudy),
        ];
        let lowered = description.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(words, _)| words.iter().any(|word| lowered.contains(word)))
            .map_or(Self::Clear, |(_, category)| *category)
    }

    const fn base_impact(self, heavy: bool) -> f64 {
        match self {
            Self::Clear => 0.0,
            Self::Cloudy => 0.05,
            Self::Rain if heavy => 0.5,
            Self::Rain | Self::Haze => 0.3,
            Self::Snow => 0.6,
            Self::Fog => 0.4,
            Self::Storm => 0.7,
        }
    }
}

impl std::fmt::Display for WeatherCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Effect of a weather reading on travel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherImpact {
    /// Impact factor in `0.0..=1.0`.
    pub impact: f64,
    /// Condition the reading was classified as.
    pub category: WeatherCategory,
}

/// Classify a reading and estimate its travel impact.
///
/// # Examples
/// ```
/// use wayfarer_core::{WeatherCategory, WeatherReading, classify_weather};
///
/// let impact = classify_weather(&WeatherReading::new("Heavy rain", 12.0, 3));
/// assert_eq!(impact.category, WeatherCategory::Rain);
/// assert!((impact.impact - 0.5).abs() < 1e-9);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "impact accumulates floating-point penalties"
)]
pub fn classify_weather(reading: &WeatherReading) -> WeatherImpact {
    let category = WeatherCategory::from_description(&reading.description);
    let heavy = reading.description.to_lowercase().contains("heavy");
    let mut impact = category.base_impact(heavy);
    if reading.wind_force >= STRONG_WIND_FORCE {
        impact += AGGRAVATING_IMPACT;
    }
    if !COMFORTABLE_TEMPERATURE_C.contains(&reading.temperature_c) {
        impact += AGGRAVATING_IMPACT;
    }
    WeatherImpact {
        impact: impact.clamp(0.0, 1.0),
        category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Sunny", WeatherCategory::Clear, 0.0)]
    #[case("Overcast clouds", WeatherCategory::Cloudy, 0.05)]
    #[case("light rain", WeatherCategory::Rain, 0.3)]
    #[case("heavy rain", WeatherCategory::Rain, 0.5)]
    #[case("Snow showers", WeatherCategory::Snow, 0.6)]
    #[case("Freezing fog", WeatherCategory::Fog, 0.4)]
    #[case("haze", WeatherCategory::Haze, 0.3)]
    #[case("Thunderstorm with rain", WeatherCategory::Storm, 0.7)]
    fn classifies_descriptions(
        #[case] description: &str,
        #[case] category: WeatherCategory,
        #[case] impact: f64,
    ) {
        let result = classify_weather(&WeatherReading::new(description, 15.0, 2));
        assert_eq!(result.category, category);
        assert!(
            (result.impact - impact).abs() < 1e-9,
            "expected {impact}, got {}",
            result.impact
        );
    }

    #[rstest]
    fn wind_and_cold_aggravate_impact() {
        let result = classify_weather(&WeatherReading::new("snow", -12.0, 8));
        assert!((result.impact - 0.8).abs() < 1e-9, "got {}", result.impact);
    }

    #[rstest]
    fn impact_is_clamped() {
        let result = classify_weather(&WeatherReading::new("heavy thunderstorm", 41.0, 11));
        assert!(result.impact <= 1.0);
        assert!((result.impact - 0.9).abs() < 1e-9, "got {}", result.impact);
    }

    #[rstest]
    fn bad_categories() {
        assert!(WeatherCategory::Rain.is_bad());
        assert!(WeatherCategory::Haze.is_bad());
        assert!(!WeatherCategory::Cloudy.is_bad());
        assert!(!WeatherCategory::Clear.is_bad());
    }
}
