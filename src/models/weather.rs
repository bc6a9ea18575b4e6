//! Weather forecast model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Condition shown when no live forecast is available
pub const SYNTHETIC_CONDITION: WeatherCondition = WeatherCondition::Sunny;
/// Max temperature (°C) shown when no live forecast is available
pub const SYNTHETIC_TEMPERATURE_C: i32 = 30;

/// Daily weather condition labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum WeatherCondition {
    Sunny,
    MostlySunny,
    PartlyCloudy,
    Cloudy,
    Foggy,
    Rainy,
    LightRainShowers,
    RainShowers,
    Thunderstorm,
    Unknown,
}

impl WeatherCondition {
    /// Map a WMO weather code to a label; unmapped codes are `Unknown`
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => WeatherCondition::Sunny,
            1 => WeatherCondition::MostlySunny,
            2 => WeatherCondition::PartlyCloudy,
            3 => WeatherCondition::Cloudy,
            45 => WeatherCondition::Foggy,
            51 | 53 | 61 | 63 => WeatherCondition::Rainy,
            80 => WeatherCondition::LightRainShowers,
            81 => WeatherCondition::RainShowers,
            95 => WeatherCondition::Thunderstorm,
            _ => WeatherCondition::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "Sunny",
            WeatherCondition::MostlySunny => "Mostly Sunny",
            WeatherCondition::PartlyCloudy => "Partly Cloudy",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::Foggy => "Foggy",
            WeatherCondition::Rainy => "Rainy",
            WeatherCondition::LightRainShowers => "Light Rain Showers",
            WeatherCondition::RainShowers => "Rain Showers",
            WeatherCondition::Thunderstorm => "Thunderstorm",
            WeatherCondition::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One calendar day of forecast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WeatherDay {
    pub date: NaiveDate,
    pub condition: WeatherCondition,
    pub max_temp_c: i32,
}

impl WeatherDay {
    /// The "Sunny, 30°C" stand-in
    pub fn synthetic(date: NaiveDate) -> Self {
        Self {
            date,
            condition: SYNTHETIC_CONDITION,
            max_temp_c: SYNTHETIC_TEMPERATURE_C,
        }
    }

    /// "Sunny, 30°C"
    pub fn summary(&self) -> String {
        format!("{}, {}°C", self.condition, self.max_temp_c)
    }

    /// "2026-03-12: Sunny, 30°C"
    pub fn line(&self) -> String {
        format!("{}: {}", self.date.format("%Y-%m-%d"), self.summary())
    }
}

/// Why a forecast was synthesized instead of fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntheticReason {
    MissingCredential,
    LocationNotFound,
    BeyondHorizon,
    ProviderError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherSource {
    Live,
    Synthetic(SyntheticReason),
}

/// Best-effort forecast for a date range, one entry per day
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub days: Vec<WeatherDay>,
    pub source: WeatherSource,
}

impl WeatherReport {
    pub fn synthetic(dates: &[NaiveDate], reason: SyntheticReason) -> Self {
        Self {
            days: dates.iter().copied().map(WeatherDay::synthetic).collect(),
            source: WeatherSource::Synthetic(reason),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.days.iter().map(WeatherDay::line).collect()
    }

    /// Newline-joined lines, as shown to the user
    pub fn text(&self) -> String {
        self.lines().join("\n")
    }

    /// Line for the `index`-th trip day, synthesized when the report is short
    pub fn line_for(&self, index: usize, date: NaiveDate) -> String {
        self.days
            .get(index)
            .map(WeatherDay::line)
            .unwrap_or_else(|| WeatherDay::synthetic(date).line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_mapping() {
        assert_eq!(WeatherCondition::from_code(0).label(), "Sunny");
        assert_eq!(WeatherCondition::from_code(1).label(), "Mostly Sunny");
        assert_eq!(WeatherCondition::from_code(2).label(), "Partly Cloudy");
        assert_eq!(WeatherCondition::from_code(3).label(), "Cloudy");
        assert_eq!(WeatherCondition::from_code(45).label(), "Foggy");
        for code in [51, 53, 61, 63] {
            assert_eq!(WeatherCondition::from_code(code), WeatherCondition::Rainy);
        }
        assert_eq!(WeatherCondition::from_code(80).label(), "Light Rain Showers");
        assert_eq!(WeatherCondition::from_code(81).label(), "Rain Showers");
        assert_eq!(WeatherCondition::from_code(95).label(), "Thunderstorm");
        assert_eq!(WeatherCondition::from_code(71), WeatherCondition::Unknown);
        assert_eq!(WeatherCondition::from_code(-1), WeatherCondition::Unknown);
    }

    #[test]
    fn test_line_format() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 12).unwrap();
        assert_eq!(WeatherDay::synthetic(date).line(), "2026-03-12: Sunny, 30°C");

        let day = WeatherDay {
            date,
            condition: WeatherCondition::Rainy,
            max_temp_c: -3,
        };
        assert_eq!(day.line(), "2026-03-12: Rainy, -3°C");
    }

    #[test]
    fn test_line_for_pads_short_report() {
        let d1 = NaiveDate::from_ymd_opt(2026, 3, 12).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2026, 3, 13).unwrap();
        let report = WeatherReport {
            days: vec![WeatherDay {
                date: d1,
                condition: WeatherCondition::Cloudy,
                max_temp_c: 18,
            }],
            source: WeatherSource::Live,
        };
        assert_eq!(report.line_for(0, d1), "2026-03-12: Cloudy, 18°C");
        assert_eq!(report.line_for(1, d2), "2026-03-13: Sunny, 30°C");
        assert_eq!(report.text(), "2026-03-12: Cloudy, 18°C");
    }
}
