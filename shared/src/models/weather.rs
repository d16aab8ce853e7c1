//! Weather data models handed to the scoring engine

use serde::{Deserialize, Serialize};

/// One aggregated day of weather, as produced by the weather provider.
///
/// Only the first six fields take part in scoring. `night_temperature_celsius`
/// and `humidity_percent` are carried for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWeather {
    /// Daytime (maximum) temperature
    pub day_temperature_celsius: f64,
    pub wind_speed_mps: f64,
    /// Meteorological bearing, 0 = north, clockwise
    pub wind_bearing_deg: f64,
    pub cloud_cover_percent: f64,
    pub pressure_hpa: f64,
    /// Total precipitation for the day; `None` means no precipitation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night_temperature_celsius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity_percent: Option<f64>,
}

impl DailyWeather {
    /// Precipitation that actually counts as rain (present and positive)
    pub fn rain_mm(&self) -> Option<f64> {
        self.precipitation_mm.filter(|mm| *mm > 0.0)
    }
}

/// Live conditions shown on a location card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_celsius: f64,
    pub feels_like_celsius: f64,
    pub pressure_hpa: f64,
    pub humidity_percent: f64,
    pub wind_speed_mps: f64,
    pub wind_bearing_deg: f64,
    pub cloud_cover_percent: f64,
}
